//! Default-filling merges over JSON objects.
//!
//! # Design
//! Both merges walk the sources left to right and only ever fill keys that
//! are missing (or null) on the target, so the first source to supply a key
//! wins. Sources are borrowed immutably; the target is the only value that
//! changes. Arrays are opaque: they are copied whole, never merged
//! element-wise.

use serde_json::{Map, Value};

/// True for values the deep merge recurses into. Arrays and scalars are not
/// plain objects.
pub fn is_plain_object(value: &Value) -> bool {
    value.is_object()
}

/// Shallow defaults: copy each source key into `target` when the target has
/// no non-null value for it.
///
/// ```
/// use serde_json::json;
/// use typed_fetch::merge::shallow_defaults;
///
/// let mut target = json!({"a": 1}).as_object().cloned().unwrap();
/// let b = json!({"b": 2}).as_object().cloned().unwrap();
/// let c = json!({"b": 3, "c": 4}).as_object().cloned().unwrap();
/// shallow_defaults(&mut target, [&b, &c]);
/// assert_eq!(serde_json::Value::Object(target), json!({"a": 1, "b": 2, "c": 4}));
/// ```
pub fn shallow_defaults<'a, I>(target: &mut Map<String, Value>, sources: I) -> &mut Map<String, Value>
where
    I: IntoIterator<Item = &'a Map<String, Value>>,
{
    for source in sources {
        for (key, value) in source {
            if value.is_null() {
                continue;
            }
            if target.get(key).map_or(true, Value::is_null) {
                target.insert(key.clone(), value.clone());
            }
        }
    }
    target
}

/// Deep defaults: like [`shallow_defaults`], but nested objects are merged
/// key by key.
///
/// A nested object introduced by a source is rebuilt through the merge
/// rather than copied verbatim, so its null members are dropped. When the
/// target already holds a non-object value for a key, the source value for
/// that key is ignored, even if it is an object.
pub fn deep_defaults<'a, I>(target: &mut Map<String, Value>, sources: I) -> &mut Map<String, Value>
where
    I: IntoIterator<Item = &'a Map<String, Value>>,
{
    for source in sources {
        for (key, value) in source {
            if value.is_null() {
                continue;
            }
            match target.get_mut(key) {
                None | Some(Value::Null) => {
                    let filled = match value {
                        Value::Object(nested) => {
                            let mut fresh = Map::new();
                            deep_defaults(&mut fresh, [nested]);
                            Value::Object(fresh)
                        }
                        other => other.clone(),
                    };
                    target.insert(key.clone(), filled);
                }
                Some(Value::Object(existing)) => {
                    if let Value::Object(nested) = value {
                        deep_defaults(existing, [nested]);
                    }
                }
                Some(_) => {}
            }
        }
    }
    target
}
