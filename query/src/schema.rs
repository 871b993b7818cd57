use std::sync::OnceLock;

use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};
use md_error::QueryError;
use strum_macros::{AsRefStr, Display, EnumString};

/// How a filter value is compared against its column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum MatchRule {
    Equal,
    Prefix,
    Contains,
}

impl MatchRule {
    pub fn operator(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::Prefix | Self::Contains => "like",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum FieldKind {
    Text,
    Bool,
    Integer,
    Date,
}

/// Static metadata of one record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDef {
    name: &'static str,
    column: &'static str,
    kind: FieldKind,
    rule: MatchRule,
    primary_key: bool,
    nullable: bool,
}

impl FieldDef {
    pub const fn new(name: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            column,
            kind,
            rule: MatchRule::Equal,
            primary_key: false,
            nullable: true,
        }
    }

    pub const fn rule(mut self, rule: MatchRule) -> Self {
        self.rule = rule;
        self
    }

    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Marks a column that rejects NULL writes.
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// External (JSON) name of the field.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn column(&self) -> &'static str {
        self.column
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn match_rule(&self) -> &MatchRule {
        &self.rule
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// Declared shape of a record type: its table and its fields in declaration order.
#[derive(Debug, PartialEq, Eq)]
pub struct RecordSchema {
    name: &'static str,
    table: &'static str,
    fields: &'static [FieldDef],
}

impl RecordSchema {
    pub const fn new(name: &'static str, table: &'static str, fields: &'static [FieldDef]) -> Self {
        Self {
            name,
            table,
            fields,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn fields(&self) -> &'static [FieldDef] {
        self.fields
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Field name to column mapping plus the ordered primary-key fields of one record type.
#[derive(Debug)]
pub struct ColumnMap {
    schema: &'static RecordSchema,
    columns: HashMap<&'static str, &'static str>,
    primary_keys: Vec<&'static str>,
}

impl ColumnMap {
    pub fn derive(schema: &'static RecordSchema) -> Result<Self, QueryError> {
        if !is_identifier(schema.table) {
            return Err(QueryError::schema(
                schema.name,
                format!("table {:?} is not a plain identifier", schema.table),
            ));
        }
        if schema.fields.is_empty() {
            return Err(QueryError::schema(schema.name, "no field is declared"));
        }

        let mut columns = HashMap::with_capacity(schema.fields.len());
        let mut mapped_columns = HashSet::with_capacity(schema.fields.len());
        let mut primary_keys = Vec::new();
        for field in schema.fields {
            if field.name.is_empty() {
                return Err(QueryError::schema(schema.name, "field name is empty"));
            }
            if !is_identifier(field.column) {
                return Err(QueryError::schema(
                    schema.name,
                    format!("column {:?} is not a plain identifier", field.column),
                ));
            }
            if columns.insert(field.name, field.column).is_some() {
                return Err(QueryError::schema(
                    schema.name,
                    format!("field {} is declared more than once", field.name),
                ));
            }
            if !mapped_columns.insert(field.column) {
                return Err(QueryError::schema(
                    schema.name,
                    format!("column {} is mapped more than once", field.column),
                ));
            }
            if field.primary_key {
                primary_keys.push(field.name);
            }
        }

        Ok(Self {
            schema,
            columns,
            primary_keys,
        })
    }

    /// Derives the map at most once per cell; later calls only read it.
    pub fn cached(
        cell: &'static OnceLock<Result<ColumnMap, QueryError>>,
        schema: &'static RecordSchema,
    ) -> Result<&'static ColumnMap, QueryError> {
        cell.get_or_init(|| Self::derive(schema))
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn schema(&self) -> &'static RecordSchema {
        self.schema
    }

    pub fn record(&self) -> &'static str {
        self.schema.name
    }

    pub fn table(&self) -> &'static str {
        self.schema.table
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, field: &str) -> Option<&'static str> {
        self.columns.get(field).copied()
    }

    pub fn field(&self, field: &str) -> Option<&'static FieldDef> {
        self.schema.field(field)
    }

    pub fn is_primary_key(&self, field: &str) -> bool {
        self.primary_keys.iter().any(|key| *key == field)
    }

    pub fn primary_keys(&self) -> &[&'static str] {
        &self.primary_keys
    }

    /// Primary keys for statements that must target rows; fails when none is declared.
    pub fn require_primary_keys(&self) -> Result<&[&'static str], QueryError> {
        if self.primary_keys.is_empty() {
            return Err(QueryError::schema(
                self.schema.name,
                "no primary key field is declared",
            ));
        }
        Ok(&self.primary_keys)
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`, the only names written into SQL text unquoted.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|char| char.is_ascii_alphanumeric() || char == '_')
        }
        _ => false,
    }
}

/// A record type with static schema metadata.
///
/// `column_map` is expected to keep its map in a `static OnceLock` and go
/// through [`ColumnMap::cached`], so the map is derived once per type.
pub trait Record {
    fn schema() -> &'static RecordSchema;

    fn column_map() -> Result<&'static ColumnMap, QueryError>;
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{ptr, thread};

    use super::*;

    const ACCOUNT_FIELDS: &[FieldDef] = &[
        FieldDef::new("id", "id", FieldKind::Text).primary_key(),
        FieldDef::new("username", "username", FieldKind::Text).rule(MatchRule::Prefix),
        FieldDef::new("email", "email", FieldKind::Text).rule(MatchRule::Prefix),
        FieldDef::new("phone", "phone", FieldKind::Text).rule(MatchRule::Contains),
        FieldDef::new("dateOfBirth", "date_of_birth", FieldKind::Date),
    ];

    pub(crate) static ACCOUNT_SCHEMA: RecordSchema =
        RecordSchema::new("user", "users", ACCOUNT_FIELDS);

    const MEMBERSHIP_FIELDS: &[FieldDef] = &[
        FieldDef::new("groupId", "group_id", FieldKind::Text).primary_key(),
        FieldDef::new("userId", "user_id", FieldKind::Text).primary_key(),
        FieldDef::new("role", "role", FieldKind::Text).not_null(),
        FieldDef::new("rank", "rank", FieldKind::Integer),
    ];

    pub(crate) static MEMBERSHIP_SCHEMA: RecordSchema =
        RecordSchema::new("membership", "memberships", MEMBERSHIP_FIELDS);

    const KEYLESS_FIELDS: &[FieldDef] = &[FieldDef::new("note", "note", FieldKind::Text)];

    pub(crate) static KEYLESS_SCHEMA: RecordSchema =
        RecordSchema::new("note", "notes", KEYLESS_FIELDS);

    pub(crate) fn account_map() -> &'static ColumnMap {
        static MAP: OnceLock<Result<ColumnMap, QueryError>> = OnceLock::new();
        ColumnMap::cached(&MAP, &ACCOUNT_SCHEMA).unwrap()
    }

    pub(crate) fn membership_map() -> &'static ColumnMap {
        static MAP: OnceLock<Result<ColumnMap, QueryError>> = OnceLock::new();
        ColumnMap::cached(&MAP, &MEMBERSHIP_SCHEMA).unwrap()
    }

    #[test]
    fn derives_columns_and_keys() {
        let map = ColumnMap::derive(&ACCOUNT_SCHEMA).unwrap();

        assert_eq!(map.len(), 5);
        assert_eq!(map.table(), "users");
        assert_eq!(map.column("dateOfBirth"), Some("date_of_birth"));
        assert_eq!(map.column("date_of_birth"), None);
        assert_eq!(map.primary_keys(), &["id"]);
        assert!(map.is_primary_key("id"));
        assert!(!map.is_primary_key("email"));
        assert_eq!(map.field("phone").unwrap().match_rule(), &MatchRule::Contains);
        assert!(map.field("phone").unwrap().is_nullable());
        assert!(!ColumnMap::derive(&MEMBERSHIP_SCHEMA)
            .unwrap()
            .field("role")
            .unwrap()
            .is_nullable());
    }

    #[test]
    fn keeps_declared_key_order() {
        let map = ColumnMap::derive(&MEMBERSHIP_SCHEMA).unwrap();
        assert_eq!(map.require_primary_keys().unwrap(), &["groupId", "userId"]);
    }

    #[test]
    fn keyless_schema_only_fails_when_keys_are_required() {
        let map = ColumnMap::derive(&KEYLESS_SCHEMA).unwrap();
        assert!(map.primary_keys().is_empty());
        assert!(matches!(
            map.require_primary_keys(),
            Err(QueryError::Schema { .. })
        ));
    }

    #[test]
    fn rejects_malformed_schemas() {
        const DUPLICATE_FIELD_FIELDS: &[FieldDef] = &[
            FieldDef::new("id", "id", FieldKind::Text),
            FieldDef::new("id", "other_id", FieldKind::Text),
        ];
        const DUPLICATE_COLUMN_FIELDS: &[FieldDef] = &[
            FieldDef::new("id", "id", FieldKind::Text),
            FieldDef::new("key", "id", FieldKind::Text),
        ];
        const ID_FIELD: &[FieldDef] = &[FieldDef::new("id", "id", FieldKind::Text)];

        static DUPLICATE_FIELD: RecordSchema =
            RecordSchema::new("dup", "dups", DUPLICATE_FIELD_FIELDS);
        static DUPLICATE_COLUMN: RecordSchema =
            RecordSchema::new("dup", "dups", DUPLICATE_COLUMN_FIELDS);
        static NO_FIELDS: RecordSchema = RecordSchema::new("empty", "empties", &[]);
        const INJECTED_COLUMN_FIELDS: &[FieldDef] = &[
            FieldDef::new("id", "id", FieldKind::Text),
            FieldDef::new("name", "name = name; DROP TABLE users; --", FieldKind::Text),
        ];
        const QUOTED_COLUMN_FIELDS: &[FieldDef] =
            &[FieldDef::new("id", "`id`", FieldKind::Text)];
        const DIGIT_COLUMN_FIELDS: &[FieldDef] =
            &[FieldDef::new("first", "1st", FieldKind::Text)];
        const EMPTY_COLUMN_FIELDS: &[FieldDef] = &[FieldDef::new("id", "", FieldKind::Text)];

        static NO_TABLE: RecordSchema = RecordSchema::new("tableless", "", ID_FIELD);
        static SPACED_TABLE: RecordSchema = RecordSchema::new("spaced", "my users", ID_FIELD);
        static QUALIFIED_TABLE: RecordSchema =
            RecordSchema::new("qualified", "public.users", ID_FIELD);
        static INJECTED_COLUMN: RecordSchema =
            RecordSchema::new("injected", "users", INJECTED_COLUMN_FIELDS);
        static QUOTED_COLUMN: RecordSchema =
            RecordSchema::new("quoted", "users", QUOTED_COLUMN_FIELDS);
        static DIGIT_COLUMN: RecordSchema =
            RecordSchema::new("digit", "users", DIGIT_COLUMN_FIELDS);
        static EMPTY_COLUMN: RecordSchema =
            RecordSchema::new("blank", "users", EMPTY_COLUMN_FIELDS);

        for schema in [
            &DUPLICATE_FIELD,
            &DUPLICATE_COLUMN,
            &NO_FIELDS,
            &NO_TABLE,
            &SPACED_TABLE,
            &QUALIFIED_TABLE,
            &INJECTED_COLUMN,
            &QUOTED_COLUMN,
            &DIGIT_COLUMN,
            &EMPTY_COLUMN,
        ] {
            assert!(matches!(
                ColumnMap::derive(schema),
                Err(QueryError::Schema { .. })
            ));
        }
    }

    #[test]
    fn identifiers_are_plain_ascii_names() {
        for name in ["id", "date_of_birth", "_tmp", "Users2"] {
            assert!(is_identifier(name), "{name}");
        }
        for name in ["", "2fa", "my-col", "a b", "naïve", "x;--", "\"id\""] {
            assert!(!is_identifier(name), "{name}");
        }
    }

    #[test]
    fn cached_map_is_derived_once() {
        let first = account_map();
        let others = (0..4)
            .map(|_| thread::spawn(|| account_map() as *const ColumnMap as usize))
            .collect::<Vec<_>>();
        for other in others {
            assert_eq!(other.join().unwrap(), first as *const ColumnMap as usize);
        }
        assert!(ptr::eq(first, account_map()));
    }

    #[test]
    fn cached_errors_are_returned_on_every_call() {
        static MAP: OnceLock<Result<ColumnMap, QueryError>> = OnceLock::new();
        static BROKEN: RecordSchema = RecordSchema::new("broken", "", &[]);

        assert!(ColumnMap::cached(&MAP, &BROKEN).is_err());
        assert!(ColumnMap::cached(&MAP, &BROKEN).is_err());
    }

    #[test]
    fn match_rules_parse_from_names() {
        assert_eq!("prefix".parse::<MatchRule>().unwrap(), MatchRule::Prefix);
        assert_eq!(MatchRule::Contains.as_ref(), "contains");
        assert_eq!(MatchRule::Equal.operator(), "=");
        assert_eq!(MatchRule::Prefix.operator(), "like");
    }
}
