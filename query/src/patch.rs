use itertools::Itertools;
use md_error::QueryError;

use crate::{placeholder::Placeholder, schema::ColumnMap, value::Value, Statement};

/// Field to value pairs of a partial update, kept in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatchDocument {
    entries: Vec<(String, Value)>,
}

impl PatchDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Decodes a JSON object, rejecting fields the record does not declare.
    pub fn from_serde_json(
        map: &ColumnMap,
        json: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, QueryError> {
        let mut document = Self::with_capacity(json.len());
        for (field, value) in json {
            let field_def = map
                .field(field)
                .ok_or_else(|| QueryError::unknown_field(map.record(), field))?;
            document.insert(field_def.name(), Value::from_serde_json(field_def, value)?);
        }
        Ok(document)
    }

    /// Sets a field, replacing an earlier value in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, old)) => Some(std::mem::replace(old, value)),
            None => {
                self.entries.push((field, value));
                None
            }
        }
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(field, value)| (field.as_str(), value))
    }
}

/// `UPDATE <table> SET <non-key columns> WHERE <key columns>`
///
/// SET follows the document order and WHERE follows the declared key order;
/// both share one placeholder sequence and params are bound in that order.
pub fn build_patch(
    document: &PatchDocument,
    map: &ColumnMap,
    placeholder: &Placeholder,
) -> Result<Statement, QueryError> {
    let primary_keys = map.require_primary_keys()?;

    let set_fields = document
        .iter()
        .filter(|(field, _)| !map.is_primary_key(field))
        .collect::<Vec<_>>();

    let mut key_columns = Vec::with_capacity(primary_keys.len());
    for key in primary_keys {
        let value = match document.get(key) {
            Some(value) if !value.is_empty() => value,
            _ => return Err(QueryError::missing_key(map.record(), *key)),
        };
        let column = map
            .column(key)
            .ok_or_else(|| QueryError::schema(map.record(), format!("key {key} has no column")))?;
        key_columns.push((column, value));
    }

    let mut set_columns = Vec::with_capacity(set_fields.len());
    for (field, value) in set_fields {
        let column = map
            .column(field)
            .ok_or_else(|| QueryError::unknown_field(map.record(), field))?;
        set_columns.push((column, value));
    }

    if set_columns.is_empty() {
        return Err(QueryError::no_updatable_fields(map.record()));
    }

    let mut sequence = placeholder.sequence();
    let set_clause = set_columns
        .iter()
        .map(|(column, _)| format!("{column} = {}", sequence.next_placeholder()))
        .join(", ");
    let where_clause = key_columns
        .iter()
        .map(|(column, _)| format!("{column} = {}", sequence.next_placeholder()))
        .join(" AND ");

    let params = set_columns
        .into_iter()
        .chain(key_columns)
        .map(|(_, value)| value.clone())
        .collect();

    Ok(Statement::new(
        format!("UPDATE {} SET {set_clause} WHERE {where_clause}", map.table()),
        params,
    ))
}
