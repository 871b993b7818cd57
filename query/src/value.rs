use std::fmt;

use chrono::NaiveDate;
use md_error::QueryError;

use crate::schema::{FieldDef, FieldKind};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A parameter bound to a statement placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Text(String),
    Date(NaiveDate),
}

impl Value {
    /// Empty values put no constraint on a filter.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Converts a JSON value into the kind declared by `field`.
    pub fn from_serde_json(field: &FieldDef, value: &serde_json::Value) -> Result<Self, QueryError> {
        let kind = field.kind();
        let invalid = || QueryError::invalid_value(field.name(), kind.to_string());
        match value {
            serde_json::Value::Null => match field.is_nullable() {
                true => Ok(Self::Null),
                false => Err(QueryError::invalid_value(
                    field.name(),
                    format!("a non-null {kind}"),
                )),
            },
            serde_json::Value::Bool(value) => match kind {
                FieldKind::Bool => Ok(Self::Bool(*value)),
                _ => Err(invalid()),
            },
            serde_json::Value::Number(value) => match kind {
                FieldKind::Integer => value.as_i64().map(Self::Integer).ok_or_else(invalid),
                // tinyint columns come back from some clients as 0/1
                FieldKind::Bool => match value.as_i64() {
                    Some(0) => Ok(Self::Bool(false)),
                    Some(1) => Ok(Self::Bool(true)),
                    _ => Err(invalid()),
                },
                _ => Err(invalid()),
            },
            serde_json::Value::String(value) => match kind {
                FieldKind::Text => Ok(Self::Text(value.to_owned())),
                FieldKind::Date => NaiveDate::parse_from_str(value, DATE_FORMAT)
                    .map(Self::Date)
                    .map_err(|_| invalid()),
                _ => Err(invalid()),
            },
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => Err(invalid()),
        }
    }

    pub fn to_serde_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(value) => serde_json::Value::Bool(*value),
            Self::Integer(value) => serde_json::Value::from(*value),
            Self::Text(value) => serde_json::Value::String(value.to_owned()),
            Self::Date(value) => serde_json::Value::String(value.format(DATE_FORMAT).to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Date(value) => write!(f, "{}", value.format(DATE_FORMAT)),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const EMAIL: FieldDef = FieldDef::new("email", "email", FieldKind::Text);
    const PHONE: FieldDef = FieldDef::new("phone", "phone", FieldKind::Text);
    const NAME: FieldDef = FieldDef::new("name", "name", FieldKind::Text).not_null();
    const WATCHED: FieldDef = FieldDef::new("watched", "watched", FieldKind::Bool).not_null();
    const DATE_OF_BIRTH: FieldDef = FieldDef::new("dateOfBirth", "date_of_birth", FieldKind::Date);

    #[test]
    fn empty_values() {
        assert!(Value::Null.is_empty());
        assert!(Value::from("").is_empty());
        assert!(!Value::from("jo").is_empty());
        assert!(!Value::Bool(false).is_empty());
        assert!(!Value::Integer(0).is_empty());
    }

    #[test]
    fn converts_json_by_field_kind() {
        assert_eq!(
            Value::from_serde_json(&EMAIL, &json!("a@b.com")).unwrap(),
            Value::from("a@b.com")
        );
        assert_eq!(
            Value::from_serde_json(&WATCHED, &json!(true)).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            Value::from_serde_json(&WATCHED, &json!(0)).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            Value::from_serde_json(&DATE_OF_BIRTH, &json!("1990-04-01")).unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(1990, 4, 1).unwrap())
        );
        assert_eq!(
            Value::from_serde_json(&PHONE, &serde_json::Value::Null).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn rejects_json_of_the_wrong_kind() {
        assert_eq!(
            Value::from_serde_json(&WATCHED, &json!("yes")),
            Err(QueryError::invalid_value("watched", "bool"))
        );
        assert_eq!(
            Value::from_serde_json(&DATE_OF_BIRTH, &json!("01/04/1990")),
            Err(QueryError::invalid_value("dateOfBirth", "date"))
        );
        assert!(Value::from_serde_json(&NAME, &json!(["a"])).is_err());
        assert!(Value::from_serde_json(&WATCHED, &json!(2)).is_err());
    }

    #[test]
    fn rejects_null_for_not_null_fields() {
        assert_eq!(
            Value::from_serde_json(&NAME, &serde_json::Value::Null),
            Err(QueryError::invalid_value("name", "a non-null text"))
        );
        assert_eq!(
            Value::from_serde_json(&WATCHED, &serde_json::Value::Null),
            Err(QueryError::invalid_value("watched", "a non-null bool"))
        );
    }

    #[test]
    fn formats_for_patterns_and_json() {
        let date = Value::Date(NaiveDate::from_ymd_opt(2001, 9, 11).unwrap());
        assert_eq!(date.to_string(), "2001-09-11");
        assert_eq!(date.to_serde_json(), json!("2001-09-11"));
        assert_eq!(Value::from(Some(7_i64)), Value::Integer(7));
        assert_eq!(Value::from(None::<String>), Value::Null);
    }
}
