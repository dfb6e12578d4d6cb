//! Field schemas and the generic entity decoder.
//!
//! Every entity in [`crate::types::response`] describes its fields as data: a
//! name, any alias the API may use for it, and the semantic [`FieldType`].
//! [`deserialize`] walks a normalized JSON object against that schema and
//! produces a canonical object that the entity's `Deserialize` impl accepts
//! without further conversion:
//!
//! - aliased keys are folded onto their canonical name,
//! - scalars are decoded to their declared type (numeric strings count as
//!   numbers, numbers count as strings),
//! - date strings are parsed, and an unparseable date is an error,
//! - nested objects and lists recurse,
//! - absent and `null` fields are left out, and unknown fields are dropped.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

use crate::Result;
use crate::error::Error;

/// Canonical text form of a decoded date.
const DATE_FORMAT: &str = "%Y-%m-%d";

#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    /// ISO-8601 calendar date, stored as [`NaiveDate`].
    Date,
    /// A nested entity or value object.
    Object(&'static Schema),
    /// An ordered sequence of the inner type.
    List(&'static FieldType),
}

/// A single declared field of an entity.
#[non_exhaustive]
#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub field_type: FieldType,
    /// Other normalized key names the API uses for this field.
    pub aliases: &'static [&'static str],
}

impl Field {
    #[must_use]
    pub const fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            aliases: &[],
        }
    }

    #[must_use]
    pub const fn aliased(
        name: &'static str,
        field_type: FieldType,
        aliases: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            field_type,
            aliases,
        }
    }

    /// Looks the field up under its canonical name first, then its aliases.
    /// A non-null value wins over a null one.
    fn lookup<'map>(&self, map: &'map Map<String, Value>) -> Option<&'map Value> {
        let mut found = None;
        for key in std::iter::once(self.name).chain(self.aliases.iter().copied()) {
            match map.get(key) {
                Some(Value::Null) => found = found.or(Some(&Value::Null)),
                Some(value) => return Some(value),
                None => {}
            }
        }
        found
    }

    fn knows(&self, key: &str) -> bool {
        self.name == key || self.aliases.contains(&key)
    }
}

/// The declared shape of one entity type.
#[non_exhaustive]
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    #[must_use]
    pub const fn new(name: &'static str, fields: &'static [Field]) -> Self {
        Self { name, fields }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.knows(name))
    }
}

/// A typed record that can be built from a normalized API object.
pub trait Entity: DeserializeOwned {
    fn schema() -> &'static Schema;
}

/// Decodes one normalized JSON object into `T`.
pub fn deserialize<T: Entity>(value: &Value) -> Result<T> {
    let schema = T::schema();
    let conformed = match value {
        Value::Object(map) => Value::Object(conform(map, schema).map_err(Error::validation)?),
        other => {
            return Err(Error::validation(format!(
                "{}: expected an object, got {}",
                schema.name,
                type_name(other)
            )));
        }
    };

    crate::serde_helpers::deserialize_typed(conformed)
}

/// Decodes a normalized JSON array into a sequence of `T`, one per element.
pub fn deserialize_list<T: Entity>(value: &Value) -> Result<Vec<T>> {
    match value {
        Value::Array(items) => items.iter().map(deserialize).collect(),
        other => Err(Error::validation(format!(
            "{}: expected an array, got {}",
            T::schema().name,
            type_name(other)
        ))),
    }
}

/// Parses an ISO-8601 date.
///
/// Accepts a bare calendar date (`2018-09-01`), an RFC 3339 timestamp
/// (`2018-09-01T19:30:00.000Z`), or a timestamp without offset. Timestamps keep
/// the calendar date in their own offset.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    try_parse_date(input).map_err(Error::validation)
}

fn try_parse_date(input: &str) -> std::result::Result<NaiveDate, String> {
    let input = input.trim();

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(input).map(|dt| dt.date_naive()))
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .map_err(|e| format!("`{input}` is not an ISO-8601 date: {e}"))
}

fn conform(
    map: &Map<String, Value>,
    schema: &Schema,
) -> std::result::Result<Map<String, Value>, String> {
    #[cfg(feature = "tracing")]
    for key in map.keys().filter(|key| schema.field(key).is_none()) {
        tracing::debug!(entity = schema.name, field = %key, "dropping unknown field in API response");
    }

    let mut out = Map::with_capacity(schema.fields.len());
    for field in schema.fields {
        let Some(raw) = field.lookup(map) else {
            continue;
        };

        let decoded = decode(raw, field.field_type)
            .map_err(|reason| format!("{}.{}: {reason}", schema.name, field.name))?;
        if !decoded.is_null() {
            out.insert(field.name.to_owned(), decoded);
        }
    }

    Ok(out)
}

fn decode(value: &Value, field_type: FieldType) -> std::result::Result<Value, String> {
    if value.is_null() {
        return Ok(Value::Null);
    }

    let mismatch = || format!("expected {}, got {value}", expected_name(field_type));

    match field_type {
        FieldType::String => match value {
            Value::String(_) => Ok(value.clone()),
            Value::Number(n) => Ok(Value::String(n.to_string())),
            Value::Bool(b) => Ok(Value::String(b.to_string())),
            _ => Err(mismatch()),
        },
        FieldType::Integer => match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().and_then(integral))
                .map(Value::from)
                .ok_or_else(mismatch),
            Value::String(s) => s.trim().parse::<i64>().map(Value::from).map_err(|_e| mismatch()),
            _ => Err(mismatch()),
        },
        FieldType::Float => match value {
            Value::Number(_) => Ok(value.clone()),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(mismatch),
            _ => Err(mismatch()),
        },
        FieldType::Boolean => match value {
            Value::Bool(_) => Ok(value.clone()),
            Value::String(s) if s == "true" => Ok(Value::Bool(true)),
            Value::String(s) if s == "false" => Ok(Value::Bool(false)),
            _ => Err(mismatch()),
        },
        FieldType::Date => match value {
            Value::String(s) => {
                try_parse_date(s).map(|date| Value::String(date.format(DATE_FORMAT).to_string()))
            }
            _ => Err(mismatch()),
        },
        FieldType::Object(schema) => match value {
            Value::Object(map) => conform(map, schema).map(Value::Object),
            _ => Err(mismatch()),
        },
        FieldType::List(inner) => match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| decode(item, *inner).map_err(|e| format!("[{i}] {e}")))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Value::Array),
            _ => Err(mismatch()),
        },
    }
}

/// Returns `f` as an `i64` when it has no fractional part and fits.
fn integral(f: f64) -> Option<i64> {
    if f.fract() != 0.0 {
        return None;
    }
    format!("{f:.0}").parse().ok()
}

fn expected_name(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::String => "a string",
        FieldType::Integer => "an integer",
        FieldType::Float => "a number",
        FieldType::Boolean => "a boolean",
        FieldType::Date => "an ISO-8601 date string",
        FieldType::Object(schema) => schema.name,
        FieldType::List(_) => "an array",
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::error::Kind;

    static POINT_FIELDS: [Field; 2] = [
        Field::new("x", FieldType::Float),
        Field::new("y", FieldType::Float),
    ];
    static POINT_SCHEMA: Schema = Schema::new("Point", &POINT_FIELDS);

    static RECORD_FIELDS: [Field; 7] = [
        Field::new("id", FieldType::Integer),
        Field::new("label", FieldType::String),
        Field::new("active", FieldType::Boolean),
        Field::aliased("on", FieldType::Date, &["date"]),
        Field::new("point", FieldType::Object(&POINT_SCHEMA)),
        Field::new("scores", FieldType::List(&FieldType::Integer)),
        Field::aliased("total", FieldType::Integer, &["score"]),
    ];
    static RECORD_SCHEMA: Schema = Schema::new("Record", &RECORD_FIELDS);

    #[derive(Debug, Deserialize, PartialEq)]
    struct Point {
        x: Option<f64>,
        y: Option<f64>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Record {
        id: Option<i64>,
        label: Option<String>,
        active: Option<bool>,
        on: Option<NaiveDate>,
        point: Option<Point>,
        #[serde(default)]
        scores: Vec<i64>,
        total: Option<i64>,
    }

    impl Entity for Record {
        fn schema() -> &'static Schema {
            &RECORD_SCHEMA
        }
    }

    #[test]
    fn declared_fields_should_decode() {
        let value = json!({
            "id": 7,
            "label": "seven",
            "active": true,
            "on": "2018-09-01",
            "point": { "x": 1.5, "y": -2.0 },
            "scores": [7, 0, 14],
            "total": 21
        });

        let record: Record = deserialize(&value).expect("record decodes");

        assert_eq!(record.id, Some(7));
        assert_eq!(record.label.as_deref(), Some("seven"));
        assert_eq!(record.active, Some(true));
        assert_eq!(record.on, NaiveDate::from_ymd_opt(2018, 9, 1));
        assert_eq!(record.point, Some(Point { x: Some(1.5), y: Some(-2.0) }));
        assert_eq!(record.scores, vec![7, 0, 14]);
        assert_eq!(record.total, Some(21));
    }

    #[test]
    fn absent_null_and_unknown_fields_should_not_fail() {
        let value = json!({ "label": null, "scores": null, "surprise": { "deep": [1] } });

        let record: Record = deserialize(&value).expect("record decodes");

        assert_eq!(record.id, None);
        assert_eq!(record.label, None);
        assert!(record.scores.is_empty(), "null list falls back to empty");
        assert_eq!(record.point, None);
    }

    #[test]
    fn aliases_should_apply_the_same_decoding() {
        let value = json!({ "date": "2019-10-12T19:30:00.000Z", "score": "35" });

        let record: Record = deserialize(&value).expect("record decodes");

        assert_eq!(record.on, NaiveDate::from_ymd_opt(2019, 10, 12));
        assert_eq!(record.total, Some(35));
    }

    #[test]
    fn canonical_name_should_win_over_alias() {
        let value = json!({ "total": 10, "score": 99 });
        let record: Record = deserialize(&value).expect("record decodes");
        assert_eq!(record.total, Some(10));
    }

    #[test]
    fn non_null_alias_should_win_over_null_canonical() {
        let value = json!({ "on": null, "date": "2020-01-01" });
        let record: Record = deserialize(&value).expect("record decodes");
        assert_eq!(record.on, NaiveDate::from_ymd_opt(2020, 1, 1));
    }

    #[test]
    fn scalars_should_be_decoded_leniently() {
        let value = json!({ "id": 62.0, "label": 97403, "active": "false", "point": { "x": "44.5" } });

        let record: Record = deserialize(&value).expect("record decodes");

        assert_eq!(record.id, Some(62));
        assert_eq!(record.label.as_deref(), Some("97403"));
        assert_eq!(record.active, Some(false));
        assert_eq!(record.point, Some(Point { x: Some(44.5), y: None }));
    }

    #[test]
    fn unparseable_date_should_fail_loudly() {
        let err = deserialize::<Record>(&json!({ "on": "last saturday" })).unwrap_err();

        assert_eq!(err.kind(), Kind::Validation);
        assert!(err.to_string().contains("Record.on"), "{err}");
    }

    #[test]
    fn non_string_date_should_fail() {
        let err = deserialize::<Record>(&json!({ "on": 20_180_901 })).unwrap_err();
        assert_eq!(err.kind(), Kind::Validation);
    }

    #[test]
    fn fractional_integer_should_fail() {
        let err = deserialize::<Record>(&json!({ "id": 1.5 })).unwrap_err();
        assert!(err.to_string().contains("expected an integer"), "{err}");
    }

    #[test]
    fn bad_list_element_should_report_index() {
        let err = deserialize::<Record>(&json!({ "scores": [1, "x"] })).unwrap_err();
        assert!(err.to_string().contains("Record.scores: [1]"), "{err}");
    }

    #[test]
    fn empty_array_should_produce_empty_list() {
        let records: Vec<Record> = deserialize_list(&json!([])).expect("empty list decodes");
        assert!(records.is_empty(), "no records expected");
    }

    #[test]
    fn list_should_reject_single_object() {
        let err = deserialize_list::<Record>(&json!({ "id": 1 })).unwrap_err();
        assert_eq!(err.kind(), Kind::Validation);
    }

    #[test]
    fn object_should_reject_array() {
        let err = deserialize::<Record>(&json!([])).unwrap_err();
        assert!(err.to_string().contains("expected an object"), "{err}");
    }

    #[test]
    fn parse_date_should_accept_iso_variants() {
        let expected = NaiveDate::from_ymd_opt(2018, 9, 1);
        for input in [
            "2018-09-01",
            "2018-09-01T19:00:00.000Z",
            "2018-09-01T23:30:00-07:00",
            "2018-09-01T12:00:00",
        ] {
            assert_eq!(parse_date(input).ok(), expected, "failed for {input}");
        }
    }

    #[test]
    fn schema_field_should_resolve_aliases() {
        assert_eq!(RECORD_SCHEMA.field("score").map(|f| f.name), Some("total"));
        assert!(RECORD_SCHEMA.field("missing").is_none(), "unknown key");
    }
}
