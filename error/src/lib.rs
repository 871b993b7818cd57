use thiserror::Error;

/// Failures detected while turning schemas, filters and patch documents into SQL.
///
/// Every variant is raised before any SQL text is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Malformed or incomplete record metadata.
    #[error("Schema of {record} is invalid: {message}")]
    Schema { record: String, message: String },

    /// A patch document names a field the record does not have.
    #[error("Field {field} does not exist in {record}")]
    UnknownField { record: String, field: String },

    /// A patch document does not carry a value for a primary-key field.
    #[error("Field {field} of {record} is required to target the row")]
    MissingKey { record: String, field: String },

    /// A patch document only carries primary-key fields.
    #[error("There is no field to update in {record}")]
    NoUpdatableFields { record: String },

    /// A value does not fit the kind declared for its field.
    #[error("Field {field} must be {expected}")]
    InvalidValue { field: String, expected: String },
}

impl QueryError {
    pub fn schema(record: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            record: record.into(),
            message: message.into(),
        }
    }

    pub fn unknown_field(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            record: record.into(),
            field: field.into(),
        }
    }

    pub fn missing_key(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingKey {
            record: record.into(),
            field: field.into(),
        }
    }

    pub fn no_updatable_fields(record: impl Into<String>) -> Self {
        Self::NoUpdatableFields {
            record: record.into(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            expected: expected.into(),
        }
    }

    /// Whether the error comes from the caller's input rather than from the schema.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Schema { .. })
    }
}

/// Errors surfaced to API clients.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InternalServerError(String),
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        if err.is_client_error() {
            Self::BadRequest(err.to_string())
        } else {
            Self::InternalServerError(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_errors_map_to_client_facing_errors() {
        assert_eq!(
            Error::from(QueryError::missing_key("user", "id")),
            Error::BadRequest("Field id of user is required to target the row".to_owned())
        );
        assert_eq!(
            Error::from(QueryError::unknown_field("movie", "rating")),
            Error::BadRequest("Field rating does not exist in movie".to_owned())
        );
        assert!(matches!(
            Error::from(QueryError::schema("user", "no primary key")),
            Error::InternalServerError(_)
        ));
    }
}
