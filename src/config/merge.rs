use serde_json::{Map, Value};

/// Merge `overrides` into `base`, one level deep.
///
/// Top-level keys whose values are objects on both sides are merged key by key
/// (override wins). Any other override value replaces the base value wholesale.
pub(super) fn merge_one_level(base: &mut Map<String, Value>, overrides: Map<String, Value>) {
    for (key, value) in overrides {
        let replacement = match (base.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                existing.extend(incoming);
                None
            }
            (_, value) => Some(value),
        };
        if let Some(value) = replacement {
            base.insert(key, value);
        }
    }
}

/// Rewrite a legacy single `editor` entry into an `editors` list.
///
/// Only applies when the document has no `editors` key of its own. The legacy
/// key is removed in every case.
pub(super) fn migrate_legacy_editor(doc: &mut Map<String, Value>) {
    let Some(legacy) = doc.remove("editor") else {
        return;
    };
    if doc.contains_key("editors") {
        return;
    }
    let editors = match legacy {
        Value::String(name) if !name.trim().is_empty() => vec![Value::String(name)],
        _ => Vec::new(),
    };
    doc.insert("editors".to_string(), Value::Array(editors));
}
