use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A row of the `Cars` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Car {
    /// Assigned by MySQL on insert, never changed afterwards
    pub id: i64,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    /// `1` once the car has been soft-deleted
    pub deleted_flag: i8,
}

/// A column value exactly as the client sent it
///
/// Nothing is checked here; MySQL coerces or rejects the value under the
/// session's `sql_mode`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => FieldValue::Text(s),
            // Arrays and objects go over as their JSON text
            other => FieldValue::Text(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(FieldValue::from)
    }
}

/// Keeps an explicit `null` as `Some(FieldValue::Null)`; only a missing key stays `None`
fn supplied<'de, D>(deserializer: D) -> Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    FieldValue::deserialize(deserializer).map(Some)
}

/// Body of `POST /car`
///
/// Missing values are inserted as `NULL`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCar {
    #[serde(default, deserialize_with = "supplied")]
    pub make: Option<FieldValue>,
    #[serde(default, deserialize_with = "supplied")]
    pub model: Option<FieldValue>,
    #[serde(default, deserialize_with = "supplied")]
    pub year: Option<FieldValue>,
}

/// Body of `PUT /car/:id`; only keys present in the body are written
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarChanges {
    #[serde(default, deserialize_with = "supplied")]
    pub make: Option<FieldValue>,
    #[serde(default, deserialize_with = "supplied")]
    pub model: Option<FieldValue>,
    #[serde(default, deserialize_with = "supplied")]
    pub year: Option<FieldValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_serializes_flag_as_integer() {
        let car = Car {
            id: 7,
            make: Some("Toyota".to_string()),
            model: Some("Corolla".to_string()),
            year: Some(2020),
            deleted_flag: 0,
        };

        let json = serde_json::to_value(&car).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["make"], "Toyota");
        assert_eq!(json["year"], 2020);
        assert_eq!(json["deleted_flag"], 0);
    }

    #[test]
    fn test_changes_with_only_year() {
        let changes: CarChanges = serde_json::from_str(r#"{"year": 2021}"#).unwrap();
        assert_eq!(changes.year, Some(FieldValue::Integer(2021)));
        assert!(changes.make.is_none());
        assert!(changes.model.is_none());
    }

    #[test]
    fn test_changes_keep_explicit_null() {
        let changes: CarChanges = serde_json::from_str(r#"{"make": null}"#).unwrap();
        assert_eq!(changes.make, Some(FieldValue::Null));
        assert!(changes.model.is_none());
    }

    #[test]
    fn test_values_are_not_type_checked() {
        let changes: CarChanges =
            serde_json::from_str(r#"{"year": "2021", "make": 123, "model": 3.5}"#).unwrap();
        assert_eq!(changes.year, Some(FieldValue::Text("2021".to_string())));
        assert_eq!(changes.make, Some(FieldValue::Integer(123)));
        assert_eq!(changes.model, Some(FieldValue::Float(3.5)));
    }

    #[test]
    fn test_nested_values_become_json_text() {
        let car: NewCar = serde_json::from_str(r#"{"make": ["a", "b"], "year": true}"#).unwrap();
        assert_eq!(car.make, Some(FieldValue::Text(r#"["a","b"]"#.to_string())));
        assert_eq!(car.year, Some(FieldValue::Bool(true)));
    }

    #[test]
    fn test_new_car_allows_missing_fields() {
        let car: NewCar = serde_json::from_str(r#"{"make": "Honda"}"#).unwrap();
        assert_eq!(car.make, Some(FieldValue::Text("Honda".to_string())));
        assert!(car.model.is_none());
        assert!(car.year.is_none());
    }
}
