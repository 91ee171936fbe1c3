//! Recursive merge used when layering snapshot data over file defaults.

use serde_json::Value;

/// Merge overlay values into the base.
///
/// Objects merge key by key and arrays merge index by index, so an overlay
/// array only replaces the positions it has. Any other pairing replaces the
/// base value outright.
pub fn merge_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (Value::Array(base_items), Value::Array(overlay_items)) => {
            for (index, value) in overlay_items.iter().enumerate() {
                match base_items.get_mut(index) {
                    Some(existing) => merge_values(existing, value),
                    None => base_items.push(value.clone()),
                }
            }
        }
        (base_slot, overlay_value) => {
            *base_slot = overlay_value.clone();
        }
    }
}
