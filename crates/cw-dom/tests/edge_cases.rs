//! Edge case tests for cw-dom
//!
//! Shadow boundaries, reaction ordering and destroyed nodes.

use std::cell::RefCell;
use std::rc::Rc;

use cw_dom::{
    CustomElementOptions, CustomEvent, Document, DomError, DomTree, LifecycleCallback, NodeId,
    ShadowRootInit,
};

fn defined_doc() -> (Document, NodeId) {
    let mut doc = Document::new();
    doc.define(
        "x-widget",
        CustomElementOptions {
            observed_attributes: vec!["mode".into()],
        },
    )
    .unwrap();
    let element = doc.tree.create_element("x-widget");
    doc.mark_upgraded(element);
    (doc, element)
}

fn drain(doc: &mut Document) -> Vec<LifecycleCallback> {
    std::iter::from_fn(|| doc.next_reaction()).map(|r| r.callback).collect()
}

// ============================================================================
// LIFECYCLE REACTIONS
// ============================================================================

#[test]
fn test_unobserved_and_unupgraded_attributes_are_silent() {
    let (mut doc, element) = defined_doc();
    doc.set_attribute(element, "title", "x").unwrap();
    assert!(!doc.has_pending_reactions());

    let plain = doc.tree.create_element("x-widget");
    doc.set_attribute(plain, "mode", "a").unwrap();
    assert!(!doc.has_pending_reactions());

    doc.remove_attribute(element, "mode").unwrap();
    assert!(!doc.has_pending_reactions());
}

#[test]
fn test_reactions_follow_connectedness() {
    let (mut doc, element) = defined_doc();
    let wrapper = doc.tree.create_element("div");
    doc.append_child(wrapper, element).unwrap();
    assert!(drain(&mut doc).is_empty());

    let body = doc.body();
    doc.append_child(body, wrapper).unwrap();
    assert_eq!(drain(&mut doc), vec![LifecycleCallback::Connected]);

    let html = doc.document_element();
    doc.append_child(html, wrapper).unwrap();
    assert_eq!(
        drain(&mut doc),
        vec![LifecycleCallback::Disconnected, LifecycleCallback::Connected]
    );

    doc.remove_child(html, wrapper).unwrap();
    assert_eq!(drain(&mut doc), vec![LifecycleCallback::Disconnected]);
}

#[test]
fn test_attribute_change_values() {
    let (mut doc, element) = defined_doc();
    doc.set_attribute(element, "MODE", "a").unwrap();
    doc.set_attribute(element, "mode", "b").unwrap();

    let first = doc.next_reaction().unwrap();
    assert_eq!(first.attribute_name.as_deref(), Some("mode"));
    assert_eq!((first.old_value, first.new_value), (None, Some("a".into())));
    let second = doc.next_reaction().unwrap();
    assert_eq!((second.old_value, second.new_value), (Some("a".into()), Some("b".into())));
}

// ============================================================================
// SHADOW BOUNDARIES
// ============================================================================

#[test]
fn test_event_path_at_shadow_boundary() {
    let mut tree = DomTree::new();
    let host = tree.create_element("x-widget");
    tree.append_child(tree.root(), host).unwrap();
    let root = tree.attach_shadow(host, ShadowRootInit::default()).unwrap();
    let inner = tree.create_element("button");
    tree.append_child(root, inner).unwrap();

    assert_eq!(tree.event_path(inner, false, true), vec![inner]);
    assert_eq!(tree.event_path(inner, true, false), vec![inner, root]);
    assert_eq!(
        tree.event_path(inner, true, true),
        vec![inner, root, host, tree.root()]
    );
}

#[test]
fn test_composed_event_reaches_document_listener() {
    let mut doc = Document::new();
    let host = doc.tree.create_element("x-widget");
    let body = doc.body();
    doc.append_child(body, host).unwrap();
    let root = doc.tree.attach_shadow(host, ShadowRootInit::default()).unwrap();
    let inner = doc.tree.create_element("span");
    doc.tree.append_child(root, inner).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    doc.add_event_listener(body, "ping", move |event: &mut CustomEvent| {
        sink.borrow_mut().push(event.current_target());
    });

    assert_eq!(doc.dispatch_event(CustomEvent::new("ping", inner).bubbles(true)), 0);
    assert_eq!(
        doc.dispatch_event(CustomEvent::new("ping", inner).bubbles(true).composed(true)),
        1
    );
    assert_eq!(*seen.borrow(), vec![body]);
}

#[test]
fn test_slot_reassignment_on_attribute_change() {
    let mut tree = DomTree::new();
    let host = tree.create_element("x-widget");
    let root = tree.attach_shadow(host, ShadowRootInit::default()).unwrap();
    let default_slot = tree.create_element("slot");
    let named = tree.create_element("slot");
    tree.set_attribute(named, "name", "extra").unwrap();
    tree.append_child(root, default_slot).unwrap();
    tree.append_child(root, named).unwrap();

    let child = tree.create_element("p");
    tree.append_child(host, child).unwrap();
    assert_eq!(tree.assigned_slot(child), Some(default_slot));

    tree.set_attribute(child, "slot", "extra").unwrap();
    assert_eq!(tree.assigned_slot(child), Some(named));
    assert!(tree.assigned_elements(default_slot).is_empty());

    tree.set_attribute(child, "slot", "nowhere").unwrap();
    assert!(tree.is_unassigned_slottable(child));
    assert_eq!(tree.flat_parent(child), None);
}

// ============================================================================
// DESTROYED NODES
// ============================================================================

#[test]
fn test_destroyed_nodes_are_not_queryable() {
    let mut tree = DomTree::new();
    let host = tree.create_element("x-widget");
    let root = tree.attach_shadow(host, ShadowRootInit::default()).unwrap();
    let part = tree.create_element("div");
    tree.set_attribute(part, "part", "overlay").unwrap();
    tree.append_child(root, part).unwrap();

    assert_eq!(tree.query_part(host, "overlay"), Some(part));
    assert_eq!(tree.remove_subtree(part), 1);
    assert_eq!(tree.query_part(host, "overlay"), None);
    assert!(tree.get(part).is_none());
    assert_eq!(tree.set_attribute(part, "x", "y"), Err(DomError::NotFound(part)));
}

#[test]
fn test_deep_clone_skips_shadow_root() {
    let mut tree = DomTree::new();
    let host = tree.create_element("x-widget");
    tree.set_attribute(host, "mode", "a").unwrap();
    tree.attach_shadow(host, ShadowRootInit::default()).unwrap();
    let text = tree.create_text("light");
    tree.append_child(host, text).unwrap();

    let copy = tree.deep_clone(host).unwrap();
    assert_eq!(tree.shadow_root(copy), None);
    assert_eq!(tree.get_attribute(copy, "mode"), Some("a"));
    assert_eq!(tree.text_content(copy), "light");
    assert_eq!(tree.parent(copy), None);
}

#[test]
fn test_own_properties_survive_until_taken() {
    let mut doc = Document::new();
    let element = doc.tree.create_element("x-widget");
    doc.set_own_property(element, "mode", "early".into());
    assert!(doc.has_own_property(element, "mode"));
    assert_eq!(doc.take_own_property(element, "mode"), Some("early".into()));
    assert_eq!(doc.take_own_property(element, "mode"), None);
}

#[test]
fn test_forget_drops_script_state() {
    let (mut doc, element) = defined_doc();
    doc.set_own_property(element, "mode", "early".into());
    doc.set_own_property(element, "extra", 1.0.into());

    doc.forget(element);
    assert!(!doc.is_upgraded(element));
    assert!(!doc.has_own_property(element, "mode"));
    assert!(!doc.has_own_property(element, "extra"));
}
