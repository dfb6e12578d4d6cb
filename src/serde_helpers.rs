//! The final typed decode step.
//!
//! By the time a value reaches [`deserialize_typed`] it has already been
//! conformed to its schema, so a failure here means the entity's Rust type and
//! its schema disagree. When the `tracing` feature is enabled the failing path
//! and the value found there are logged.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserialize a conformed JSON value into `T`.
#[cfg(feature = "tracing")]
pub fn deserialize_typed<T: DeserializeOwned>(value: Value) -> crate::Result<T> {
    use std::any::type_name;

    tracing::trace!(
        type_name = %type_name::<T>(),
        json = %value,
        "deserializing JSON"
    );

    serde_path_to_error::deserialize(&value).map_err(|path_err| {
        let path = path_err.path();
        tracing::error!(
            type_name = %type_name::<T>(),
            path = %path,
            value = %format_value(lookup_value(&value, path)),
            error = %path_err.inner(),
            "deserialization failed"
        );
        path_err.into_inner().into()
    })
}

/// Pass-through deserialization when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub fn deserialize_typed<T: DeserializeOwned>(value: Value) -> crate::Result<T> {
    Ok(serde_json::from_value(value)?)
}

/// Follows a `serde_path_to_error` path through `value`.
///
/// Returns `None` if the path leaves the structure or crosses a scalar.
#[cfg(feature = "tracing")]
fn lookup_value<'value>(
    value: &'value Value,
    path: &serde_path_to_error::Path,
) -> Option<&'value Value> {
    use serde_path_to_error::Segment;

    let mut current = value;
    for segment in path.iter() {
        current = match (segment, current) {
            (Segment::Seq { index }, Value::Array(items)) => items.get(*index)?,
            (Segment::Map { key }, Value::Object(map)) => map.get(key)?,
            (Segment::Enum { .. } | Segment::Unknown, _) => current,
            _ => return None,
        };
    }

    Some(current)
}

#[cfg(feature = "tracing")]
fn format_value(value: Option<&Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "<unable to retrieve>".to_owned(),
    }
}
