//! Recursive key normalization for API responses.

use serde_json::{Map, Value};

use crate::case::to_idiomatic_case;

/// Returns a copy of `value` with every object key converted to `snake_case`.
///
/// Objects and arrays are rebuilt at every depth; strings, numbers, booleans and
/// `null` pass through untouched. The input is never modified. Normalizing an
/// already-normalized value returns an equal value.
///
/// ```
/// use cfb_data_sdk::normalize::normalize;
/// use serde_json::json;
///
/// let wire = json!([{ "homeTeam": "Oregon", "homeLineScores": [7, 14] }]);
/// assert_eq!(
///     normalize(&wire),
///     json!([{ "home_team": "Oregon", "home_line_scores": [7, 14] }])
/// );
/// ```
#[must_use]
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(normalize_map(map)),
        Value::Array(items) => Value::Array(items.iter().map(normalize).collect()),
        scalar => scalar.clone(),
    }
}

/// Owned variant of [`normalize`] that reuses scalar leaves instead of cloning them.
#[must_use]
pub fn normalize_owned(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (to_idiomatic_case(&key), normalize_owned(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_owned).collect()),
        scalar => scalar,
    }
}

fn normalize_map(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| (to_idiomatic_case(key), normalize(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn nested_objects_and_arrays_should_be_normalized() {
        let wire = json!({
            "team1Wins": 3,
            "games": [
                { "startDate": "2018-09-01", "homeLineScores": [7, 0, 14, 3] },
                { "startDate": "2019-10-12", "venueId": null }
            ],
            "location": { "countryCode": "US", "x": 44.05 }
        });

        let expected = json!({
            "team1_wins": 3,
            "games": [
                { "start_date": "2018-09-01", "home_line_scores": [7, 0, 14, 3] },
                { "start_date": "2019-10-12", "venue_id": null }
            ],
            "location": { "country_code": "US", "x": 44.05 }
        });

        assert_eq!(normalize(&wire), expected);
        assert_eq!(normalize_owned(wire), expected);
    }

    #[test]
    fn scalars_should_pass_through() {
        for scalar in [json!(null), json!(true), json!(12), json!(1.5), json!("startDate")] {
            assert_eq!(normalize(&scalar), scalar);
        }
    }

    #[test]
    fn normalize_should_be_idempotent() {
        let wire = json!([{ "offenseConference": "SEC", "clock": { "minutes": 4 } }]);
        let once = normalize(&wire);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn input_should_not_be_mutated() {
        let wire = json!({ "shortName": "Pac-12" });
        let snapshot = wire.clone();
        let _normalized = normalize(&wire);
        assert_eq!(wire, snapshot);
    }

    #[test]
    fn deep_nesting_should_terminate() {
        let mut value = json!({ "leafValue": 1 });
        for _ in 0..200 {
            value = json!({ "innerValue": [value] });
        }

        let mut current = &normalize(&value);
        for _ in 0..200 {
            current = &current["inner_value"][0];
        }
        assert_eq!(current, &json!({ "leaf_value": 1 }));
    }

    #[test]
    fn empty_array_should_stay_empty() {
        assert_eq!(normalize(&json!([])), json!([]));
    }
}
