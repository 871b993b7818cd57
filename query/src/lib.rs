//! SQL builders for filter-driven searches and partial updates.
//!
//! Everything here is pure: builders read static [`schema::RecordSchema`]
//! metadata plus caller-supplied values and return a [`Statement`] that the
//! dialect crates bind and execute.

pub mod filter;
pub mod patch;
pub mod placeholder;
pub mod schema;
pub mod select;
pub mod value;

pub use filter::{build_conditions, Conditions, Filter};
pub use md_error::QueryError;
pub use patch::{build_patch, PatchDocument};
pub use placeholder::Placeholder;
pub use schema::{ColumnMap, FieldDef, FieldKind, MatchRule, Record, RecordSchema};
pub use select::{build_count, build_query};
pub use value::Value;

/// SQL text plus the parameters bound to its placeholders, in placeholder order.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<Value>,
}

impl Statement {
    pub fn new(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}
