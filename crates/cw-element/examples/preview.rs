//! Example: author preview of a content warning
//!
//! Toggles between structural and blurred hiding, then reveals.
//! Run with `RUST_LOG=debug` to see lifecycle logging.

use anyhow::Context;
use cw_dom::{DomTree, NodeData};
use cw_element::{CustomEvent, NodeId, REVEAL_EVENT, Runtime};
use tracing_subscriber::EnvFilter;

fn dump(tree: &DomTree, node: NodeId, depth: usize) {
    let indent = "  ".repeat(depth);
    let Some(data) = tree.get(node).map(|n| &n.data) else {
        return;
    };
    match data {
        NodeData::Element(element) => {
            let attrs: Vec<String> = element
                .attrs
                .iter()
                .map(|attr| format!(" {}=\"{}\"", attr.name, attr.value))
                .collect();
            println!("{}<{}{}>", indent, element.tag, attrs.concat());
            if let Some(root) = element.shadow_root {
                dump(tree, root, depth + 1);
            }
        }
        NodeData::ShadowRoot(_) => println!("{}#shadow-root", indent),
        NodeData::Text(text) => println!("{}{:?}", indent, text),
        NodeData::Comment(_) | NodeData::Document => {}
    }
    for child in tree.child_ids(node) {
        dump(tree, child, depth + 1);
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut runtime = Runtime::default();
    runtime.define().context("defining <content-warning>")?;

    let host = runtime.create_element("content-warning")?;
    runtime.set_attribute(host, "type", "violence spoilers")?;
    let paragraph = runtime.create_element("p")?;
    let text = runtime.create_text("The hero does not survive the final chapter.");
    runtime.append_child(paragraph, text)?;
    runtime.append_child(host, paragraph)?;
    let body = runtime.body();
    runtime.append_child(body, host)?;

    runtime.add_event_listener(body, REVEAL_EVENT, |event: &mut CustomEvent| {
        println!("{} -> {}", event.event_type, event.detail);
    });

    let frames = runtime.settle();
    println!("Initialized after {} frame(s)\n", frames);
    dump(runtime.document().tree(), host, 0);

    for _ in 0..2 {
        let blurred = runtime.toggle_attribute(host, "blur")?;
        let widget = runtime.widget(host).context("widget not upgraded")?;
        println!(
            "\nblur={} -> {:?}",
            blurred,
            widget.hiding_attributes(runtime.document().tree())
        );
    }

    println!();
    runtime.focus(host);
    runtime.key_down(host, "Enter");
    dump(runtime.document().tree(), host, 0);
    Ok(())
}
