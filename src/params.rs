//! Query-string construction.
//!
//! Request structs are serialized with their Rust field names, then passed
//! through [`build`], which renames every key to the wire convention and drops
//! `null` entries so that unset filters never reach the query string.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::Result;
use crate::case::to_wire_case;
use crate::error::Error;

/// Wire-named query parameters, ready to hand to the HTTP transport.
pub type QueryParams = BTreeMap<String, String>;

/// Converts idiomatic-named parameters into wire-named query parameters.
///
/// Entries whose value is `null` are dropped. Strings are kept verbatim, other
/// scalars use their JSON text, and arrays are joined with commas.
///
/// ```
/// use cfb_data_sdk::params::build;
/// use serde_json::json;
///
/// let params = json!({ "year": 2020, "team": null, "home": "Oregon" });
/// let query = build(params.as_object().unwrap());
///
/// assert_eq!(query.len(), 2);
/// assert_eq!(query["year"], "2020");
/// assert_eq!(query["home"], "Oregon");
/// ```
#[must_use]
pub fn build(params: &Map<String, Value>) -> QueryParams {
    params
        .iter()
        .filter_map(|(key, value)| Some((to_wire_case(key), to_query_value(value)?)))
        .collect()
}

fn to_query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(to_query_value).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(","))
            }
        }
        other => Some(other.to_string()),
    }
}

/// Trait for converting request types to wire-named query parameters.
///
/// Automatically implemented for every [`Serialize`] type that serializes to a
/// JSON object (or to `null`, for requests without parameters).
pub trait ToQueryParams: Serialize {
    /// Serializes the request and runs it through [`build`].
    fn query_params(&self) -> Result<QueryParams> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(build(&map)),
            Value::Null => Ok(QueryParams::new()),
            other => Err(Error::validation(format!(
                "query parameters must serialize to an object, got {other}"
            ))),
        }
    }
}

impl<T: Serialize> ToQueryParams for T {}
