//! Integration tests - content warning lifecycle end to end
//!
//! Define -> attach -> deferred init -> configure -> reveal, driven through
//! the runtime the way a host document would.

use std::cell::RefCell;
use std::rc::Rc;

use cw_a11y::{is_excluded_from_accessibility_tree, is_inert};
use cw_element::{
    CustomEvent, HidingAttributes, HidingMode, LabelParts, NodeId, PropertyValue, REVEAL_EVENT,
    RevealState, Runtime, compose,
};
use serde_json::Value;

/// Defined runtime with one initialized widget wrapping `<p>{text}</p>`
fn mount(attrs: &[(&str, &str)], text: &str) -> (Runtime, NodeId, NodeId) {
    let mut runtime = Runtime::default();
    runtime.define().unwrap();

    let host = runtime.create_element("content-warning").unwrap();
    for (name, value) in attrs {
        runtime.set_attribute(host, name, value).unwrap();
    }
    let paragraph = runtime.create_element("p").unwrap();
    let content = runtime.create_text(text);
    runtime.append_child(paragraph, content).unwrap();
    runtime.append_child(host, paragraph).unwrap();

    let body = runtime.body();
    runtime.append_child(body, host).unwrap();
    runtime.settle();
    (runtime, host, paragraph)
}

/// Collects the detail of every reveal event reaching `node`
fn record_reveals(runtime: &mut Runtime, node: NodeId) -> Rc<RefCell<Vec<Value>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    runtime.add_event_listener(node, REVEAL_EVENT, move |event: &mut CustomEvent| {
        sink.borrow_mut().push(event.detail.clone());
    });
    seen
}

fn button(runtime: &Runtime, host: NodeId) -> NodeId {
    runtime.widget(host).and_then(|w| w.references().button).unwrap()
}

fn hiding(runtime: &Runtime, host: NodeId) -> HidingAttributes {
    let widget = runtime.widget(host).unwrap();
    widget.hiding_attributes(runtime.document().tree()).unwrap()
}

fn announcement_children(runtime: &Runtime, host: NodeId) -> Vec<NodeId> {
    let region = runtime.widget(host).and_then(|w| w.references().announcement).unwrap();
    runtime.document().tree().element_children(region)
}

// ============================================================================
// INITIAL RENDER
// ============================================================================

#[test]
fn test_unconfigured_initial_render() {
    let (runtime, host, paragraph) = mount(&[], "plot twist");
    let widget = runtime.widget(host).unwrap();
    let tree = runtime.document().tree();

    assert!(widget.is_initialized());
    assert_eq!(
        widget.rendered_label(tree),
        Some(LabelParts {
            prefix: "Content Warning".into(),
            warning_type: "content".into(),
            suffix: Some("Click to reveal".into()),
        })
    );
    assert_eq!(
        hiding(&runtime, host),
        HidingAttributes { hidden: true, inert: true, aria_hidden: false }
    );
    assert!(announcement_children(&runtime, host).is_empty());

    // Content is in the document but unreachable
    assert_eq!(tree.parent(paragraph), Some(host));
    assert!(is_inert(tree, paragraph));
    assert!(is_excluded_from_accessibility_tree(tree, paragraph));
}

#[test]
fn test_nothing_renders_before_init_frames() {
    let mut runtime = Runtime::default();
    runtime.define().unwrap();
    let host = runtime.create_element("content-warning").unwrap();
    let body = runtime.body();
    runtime.append_child(body, host).unwrap();

    assert!(!runtime.widget(host).unwrap().references().is_rendered());
    runtime.run_frame();
    assert!(!runtime.widget(host).unwrap().references().is_rendered());
    runtime.run_frame();
    assert!(runtime.widget(host).unwrap().references().is_rendered());
}

#[test]
fn test_configured_label() {
    let (runtime, host, _) = mount(
        &[("type", "violence spoilers"), ("label-prefix", "Heads up"), ("label-suffix", "Show me")],
        "x",
    );
    let label = runtime.widget(host).unwrap().rendered_label(runtime.document().tree());
    assert_eq!(label, Some(compose(Some("Heads up"), Some("violence spoilers"), Some("Show me"))));
}

// ============================================================================
// REVEAL
// ============================================================================

#[test]
fn test_click_reveals_with_single_notification() {
    let (mut runtime, host, paragraph) = mount(&[("type", "violence spoilers")], "the scene");
    let body = runtime.body();
    let seen = record_reveals(&mut runtime, body);
    let overlay = runtime.widget(host).and_then(|w| w.references().overlay).unwrap();

    assert!(runtime.click(button(&runtime, host)));

    assert_eq!(runtime.get_property(host, "revealed"), PropertyValue::Flag(true));
    assert!(hiding(&runtime, host).is_empty());

    let events = seen.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["type"], "violence spoilers");

    // Prompt is gone and its handles invalidated
    let tree = runtime.document().tree();
    let refs = runtime.widget(host).unwrap().references();
    assert!(!tree.contains(overlay));
    assert_eq!(refs.overlay, None);
    assert_eq!(refs.button, None);
    assert_eq!(tree.query_part(host, "button"), None);
    assert!(!tree.has_attribute(host, "role"));
    assert!(!tree.has_attribute(host, "tabindex"));

    // Announcement holds a structural clone; the original stays put
    let clones = announcement_children(&runtime, host);
    assert_eq!(clones.len(), 1);
    assert_ne!(clones[0], paragraph);
    assert_eq!(tree.tag_name(clones[0]), Some("p"));
    assert_eq!(tree.text_content(clones[0]), "the scene");
    assert_eq!(tree.parent(paragraph), Some(host));
    assert!(!is_excluded_from_accessibility_tree(tree, paragraph));
}

#[test]
fn test_reveal_is_idempotent() {
    let (mut runtime, host, _) = mount(&[], "x");
    let seen = record_reveals(&mut runtime, host);
    let control = button(&runtime, host);

    assert!(runtime.click(control));
    let announced = announcement_children(&runtime, host);

    assert!(!runtime.click(control));
    assert!(!runtime.key_down(host, "Enter"));
    assert!(!runtime.reveal(host));

    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(announcement_children(&runtime, host), announced);
    assert_eq!(runtime.widget(host).unwrap().state(), RevealState::Revealed);
}

#[test]
fn test_notification_without_type_carries_null() {
    let (mut runtime, host, _) = mount(&[], "x");
    let seen = record_reveals(&mut runtime, host);
    runtime.reveal(host);
    assert_eq!(seen.borrow()[0]["type"], Value::Null);
}

#[test]
fn test_enter_key_reveals() {
    let (mut runtime, host, _) = mount(&[], "x");
    assert!(runtime.focus(host));

    assert!(!runtime.key_down(host, "Tab"));
    assert!(!runtime.key_down(host, " "));
    assert_eq!(runtime.get_property(host, "revealed"), PropertyValue::Flag(false));

    assert!(runtime.key_down(host, "Enter"));
    assert_eq!(runtime.get_property(host, "revealed"), PropertyValue::Flag(true));
}

#[test]
fn test_focus_moves_to_content() {
    let (mut runtime, host, _) = mount(&[], "x");
    runtime.reveal(host);
    let content = runtime.widget(host).and_then(|w| w.references().content);
    assert_eq!(runtime.active_element(), content);
}

#[test]
fn test_click_on_hidden_content_does_nothing() {
    let (mut runtime, host, paragraph) = mount(&[], "x");
    assert!(!runtime.click(paragraph));
    assert!(!runtime.widget(host).unwrap().is_revealed());
}

// ============================================================================
// HIDING MODES
// ============================================================================

#[test]
fn test_blur_toggles_never_mix_modes() {
    let (mut runtime, host, paragraph) = mount(&[], "x");

    for _ in 0..5 {
        let blurred = runtime.toggle_attribute(host, "blur").unwrap();
        let expected = HidingAttributes::derive(HidingMode::from_blur(blurred), RevealState::Hidden);
        assert_eq!(hiding(&runtime, host), expected);

        let tree = runtime.document().tree();
        assert!(is_excluded_from_accessibility_tree(tree, paragraph));
        assert_eq!(is_inert(tree, paragraph), !blurred);
    }
}

#[test]
fn test_mode_exclusivity_table() {
    for blur in [false, true] {
        let attrs: &[(&str, &str)] = if blur { &[("blur", "")] } else { &[] };
        let (mut runtime, host, _) = mount(attrs, "x");

        let hidden = hiding(&runtime, host);
        assert_eq!(hidden.hidden, !blur);
        assert_eq!(hidden.inert, !blur);
        assert_eq!(hidden.aria_hidden, blur);

        runtime.reveal(host);
        assert_eq!(hiding(&runtime, host), HidingAttributes::NONE);
    }
}

#[test]
fn test_blur_after_reveal_does_not_rehide() {
    let (mut runtime, host, _) = mount(&[], "x");
    runtime.reveal(host);
    runtime.set_attribute(host, "blur", "").unwrap();
    assert_eq!(hiding(&runtime, host), HidingAttributes::NONE);
    assert_eq!(runtime.get_property(host, "blur"), PropertyValue::Flag(true));
}

// ============================================================================
// PROPERTY / ATTRIBUTE BRIDGE
// ============================================================================

#[test]
fn test_property_attribute_round_trip() {
    let (mut runtime, host, _) = mount(&[], "x");

    runtime.set_property(host, "type", "nsfw").unwrap();
    assert_eq!(runtime.get_attribute(host, "type"), Some("nsfw"));

    runtime.set_attribute(host, "type", "gore").unwrap();
    assert_eq!(runtime.get_property(host, "type"), PropertyValue::Text("gore".into()));

    runtime.set_property(host, "type", PropertyValue::Absent).unwrap();
    assert_eq!(runtime.get_attribute(host, "type"), None);
    assert_eq!(runtime.get_property(host, "type"), PropertyValue::Absent);

    runtime.set_property(host, "labelPrefix", "Careful").unwrap();
    assert_eq!(runtime.get_attribute(host, "label-prefix"), Some("Careful"));
}

#[test]
fn test_property_changes_repaint_label() {
    let (mut runtime, host, _) = mount(&[], "x");
    runtime.set_property(host, "type", "violence").unwrap();
    runtime.set_property(host, "labelPrefix", "Warning").unwrap();

    let label = runtime.widget(host).unwrap().rendered_label(runtime.document().tree()).unwrap();
    assert_eq!(label.prefix, "Warning");
    assert_eq!(label.warning_type, "violence");
}

#[test]
fn test_early_property_before_definition() {
    let mut runtime = Runtime::default();
    let host = runtime.create_element("content-warning").unwrap();
    runtime.set_property(host, "type", "early-value").unwrap();
    runtime.set_property(host, "blur", true).unwrap();
    assert_eq!(runtime.get_attribute(host, "type"), None);
    assert_eq!(runtime.get_property(host, "type"), PropertyValue::Text("early-value".into()));

    let body = runtime.body();
    runtime.append_child(body, host).unwrap();
    runtime.define().unwrap();
    runtime.settle();

    assert_eq!(runtime.get_attribute(host, "type"), Some("early-value"));
    assert!(!runtime.document().has_own_property(host, "type"));
    assert_eq!(hiding(&runtime, host), HidingAttributes::derive(HidingMode::Visual, RevealState::Hidden));

    // Accessors own the key now
    runtime.set_property(host, "type", "later").unwrap();
    assert_eq!(runtime.get_attribute(host, "type"), Some("later"));
}

#[test]
fn test_early_property_on_detached_instance() {
    let mut runtime = Runtime::default();
    runtime.define().unwrap();
    let host = runtime.create_element("content-warning").unwrap();
    runtime.set_property(host, "type", "early-value").unwrap();

    let body = runtime.body();
    runtime.append_child(body, host).unwrap();
    runtime.settle();

    assert_eq!(runtime.get_attribute(host, "type"), Some("early-value"));
    let label = runtime.widget(host).unwrap().rendered_label(runtime.document().tree()).unwrap();
    assert_eq!(label.warning_type, "early-value");
}

#[test]
fn test_suffix_sentinel() {
    let (mut runtime, host, _) = mount(&[], "x");
    let label = |runtime: &Runtime| runtime.widget(host).unwrap().rendered_label(runtime.document().tree()).unwrap();

    runtime.set_property(host, "labelSuffix", "false").unwrap();
    assert_eq!(label(&runtime).suffix, None);
    assert_eq!(runtime.document().tree().query_part(host, "label-suffix"), None);

    runtime.set_property(host, "labelSuffix", PropertyValue::Absent).unwrap();
    assert_eq!(label(&runtime).suffix.as_deref(), Some("Click to reveal"));

    runtime.set_property(host, "labelSuffix", "Tap to show").unwrap();
    assert_eq!(label(&runtime).suffix.as_deref(), Some("Tap to show"));
}

// ============================================================================
// ATTACHMENT
// ============================================================================

#[test]
fn test_detach_and_reattach() {
    let (mut runtime, host, _) = mount(&[], "x");
    let body = runtime.body();
    let control = button(&runtime, host);

    runtime.remove_child(body, host).unwrap();
    assert!(!runtime.widget(host).unwrap().is_interactive());
    assert!(!runtime.click(control));

    runtime.append_child(body, host).unwrap();
    assert!(runtime.widget(host).unwrap().is_interactive());
    assert_eq!(runtime.settle(), 0);
    assert!(runtime.click(control));
}

#[test]
fn test_reveal_after_detach_never_fails() {
    let (mut runtime, host, _) = mount(&[("type", "spoilers")], "x");
    let body = runtime.body();
    let on_body = record_reveals(&mut runtime, body);
    let on_host = record_reveals(&mut runtime, host);

    runtime.remove_child(body, host).unwrap();
    assert!(runtime.reveal(host));
    assert!(!runtime.reveal(host));

    assert_eq!(on_host.borrow().len(), 1);
    assert!(on_body.borrow().is_empty());
    assert!(hiding(&runtime, host).is_empty());
    assert_eq!(runtime.active_element(), None);
}
