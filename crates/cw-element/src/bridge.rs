//! Property/attribute bridge
//!
//! Properties are views over the host's attributes. Text keys serialize
//! their value into the attribute, presence flags map truthiness onto
//! attribute presence, and an absent value removes the attribute.

use cw_dom::{Document, DomError, DomTree, NodeId, PropertyValue};

use crate::config::ConfigKey;

/// Read a configuration property from the host's attributes
pub fn get(tree: &DomTree, host: NodeId, key: ConfigKey) -> PropertyValue {
    if key.is_flag() {
        return PropertyValue::Flag(tree.has_attribute(host, key.attribute()));
    }
    tree.get_attribute(host, key.attribute())
        .map(|value| PropertyValue::Text(value.to_string()))
        .unwrap_or(PropertyValue::Absent)
}

/// Write a configuration property through to the host's attributes
pub fn set(doc: &mut Document, host: NodeId, key: ConfigKey, value: &PropertyValue) -> Result<(), DomError> {
    let name = key.attribute();
    if key.is_flag() {
        // Re-setting a present flag would queue a spurious change
        if value.is_truthy() {
            if !doc.tree().has_attribute(host, name) {
                doc.set_attribute(host, name, "")?;
            }
        } else {
            doc.remove_attribute(host, name)?;
        }
        return Ok(());
    }

    match value.to_attribute_value() {
        Some(serialized) => doc.set_attribute(host, name, &serialized),
        None => doc.remove_attribute(host, name),
    }
}

/// Migrate values assigned before upgrade onto the accessors.
///
/// Each shadowing own property is removed and its value re-applied through
/// [`set`]. Returns the number of migrated properties; a second call finds
/// nothing left to migrate.
pub fn upgrade_properties(doc: &mut Document, host: NodeId) -> Result<usize, DomError> {
    let mut migrated = 0;
    for key in ConfigKey::ALL {
        let Some(value) = doc.take_own_property(host, key.property()) else {
            continue;
        };
        tracing::trace!("Upgrading early property {} on {:?}", key.property(), host);
        set(doc, host, key, &value)?;
        migrated += 1;
    }
    Ok(migrated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(doc: &mut Document) -> NodeId {
        let host = doc.tree.create_element("content-warning");
        let body = doc.body();
        doc.append_child(body, host).unwrap();
        host
    }

    #[test]
    fn test_text_round_trip() {
        let mut doc = Document::new();
        let host = host(&mut doc);

        set(&mut doc, host, ConfigKey::Type, &"violence".into()).unwrap();
        assert_eq!(doc.tree().get_attribute(host, "type"), Some("violence"));

        doc.set_attribute(host, "type", "spoilers").unwrap();
        assert_eq!(get(doc.tree(), host, ConfigKey::Type), PropertyValue::Text("spoilers".into()));

        set(&mut doc, host, ConfigKey::Type, &PropertyValue::Absent).unwrap();
        assert!(!doc.tree().has_attribute(host, "type"));
        assert_eq!(get(doc.tree(), host, ConfigKey::Type), PropertyValue::Absent);
    }

    #[test]
    fn test_text_serialization() {
        let mut doc = Document::new();
        let host = host(&mut doc);

        set(&mut doc, host, ConfigKey::LabelPrefix, &PropertyValue::Number(3.0)).unwrap();
        assert_eq!(doc.tree().get_attribute(host, "label-prefix"), Some("3"));

        set(&mut doc, host, ConfigKey::LabelSuffix, &false.into()).unwrap();
        assert_eq!(doc.tree().get_attribute(host, "label-suffix"), Some("false"));
    }

    #[test]
    fn test_flags() {
        let mut doc = Document::new();
        let host = host(&mut doc);

        set(&mut doc, host, ConfigKey::Blur, &true.into()).unwrap();
        assert_eq!(doc.tree().get_attribute(host, "blur"), Some(""));
        assert_eq!(get(doc.tree(), host, ConfigKey::Blur), PropertyValue::Flag(true));

        for falsy in [PropertyValue::Absent, false.into(), "".into(), PropertyValue::Number(0.0)] {
            set(&mut doc, host, ConfigKey::Blur, &true.into()).unwrap();
            set(&mut doc, host, ConfigKey::Blur, &falsy).unwrap();
            assert!(!doc.tree().has_attribute(host, "blur"), "{:?} should clear", falsy);
        }
    }

    #[test]
    fn test_upgrade_properties_idempotent() {
        let mut doc = Document::new();
        let host = host(&mut doc);
        doc.set_own_property(host, "type", "early-value".into());
        doc.set_own_property(host, "inline", true.into());
        doc.set_own_property(host, "unrelated", "kept".into());

        assert_eq!(upgrade_properties(&mut doc, host).unwrap(), 2);
        assert_eq!(doc.tree().get_attribute(host, "type"), Some("early-value"));
        assert!(doc.tree().has_attribute(host, "inline"));
        assert!(!doc.has_own_property(host, "type"));
        assert!(doc.has_own_property(host, "unrelated"));

        assert_eq!(upgrade_properties(&mut doc, host).unwrap(), 0);
        assert_eq!(doc.tree().get_attribute(host, "type"), Some("early-value"));
    }
}
