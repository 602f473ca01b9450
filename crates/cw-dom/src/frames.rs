//! Animation Frames
//!
//! Frame callback requests. Owners requested while a frame runs land in
//! the following frame.

use crate::NodeId;

/// Pending animation frame requests
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: Vec<NodeId>,
    frame: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a callback for `owner` on the next frame
    pub fn request(&mut self, owner: NodeId) {
        self.pending.push(owner);
    }

    /// Start a frame: hand out the current batch and advance the counter
    pub fn take(&mut self) -> Vec<NodeId> {
        self.frame += 1;
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Frames started so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_during_frame_wait_for_next() {
        let mut frames = FrameQueue::new();
        frames.request(NodeId(4));

        let batch = frames.take();
        assert_eq!(batch, vec![NodeId(4)]);
        frames.request(NodeId(4));
        assert!(!frames.is_empty());

        assert_eq!(frames.take(), vec![NodeId(4)]);
        assert!(frames.is_empty());
        assert_eq!(frames.frame_count(), 2);
    }
}
