//! Settings layer merge
//!
//! - Tables: merged key by key
//! - Null or missing: the lower layer is kept
//! - Everything else: the higher layer replaces the lower one

use serde_json::Value;

/// Merge `overlay` on top of `base`.
///
/// Tables merge recursively. A `null` in the overlay leaves the base
/// value in place, so an unset override never erases a default.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }

        (base, Value::Null) => base,

        (_, overlay) => overlay,
    }
}

/// Merge layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<Value>) -> Value {
    layers.into_iter().fold(Value::Null, deep_merge)
}
