use itertools::Itertools;

use crate::{
    placeholder::Placeholder,
    schema::{ColumnMap, MatchRule},
    value::Value,
};

/// A search request over one record type.
///
/// Every field is optional; `None` or an empty value leaves the field unconstrained.
pub trait Filter {
    fn value(&self, field: &str) -> Option<Value>;

    /// 1-based page number, `0` for no offset.
    fn page_index(&self) -> i64 {
        0
    }

    /// Rows per page, `0` for no limit.
    fn page_size(&self) -> i64 {
        0
    }
}

/// Unjoined WHERE predicates and the parameters they bind, one parameter per predicate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Conditions {
    conditions: Vec<String>,
    params: Vec<Value>,
}

impl Conditions {
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// `None` when there is nothing to filter on, so no `WHERE` is emitted.
    pub fn where_clause(&self) -> Option<String> {
        match self.conditions.is_empty() {
            true => None,
            false => Some(self.conditions.iter().join(" AND ")),
        }
    }

    pub fn into_params(self) -> Vec<Value> {
        self.params
    }
}

/// Builds one predicate per constrained field, walking the fields in schema order.
pub fn build_conditions<F: Filter + ?Sized>(
    filter: &F,
    map: &ColumnMap,
    placeholder: &Placeholder,
) -> Conditions {
    let mut sequence = placeholder.sequence();
    let mut conditions = Conditions::default();

    for field in map.schema().fields() {
        let value = match filter.value(field.name()) {
            Some(value) if !value.is_empty() => value,
            _ => continue,
        };
        let column = map.column(field.name()).unwrap_or(field.column());
        let rule = field.match_rule();

        conditions.conditions.push(format!(
            "{column} {} {}",
            rule.operator(),
            sequence.next_placeholder()
        ));
        conditions.params.push(match_value(rule, value));
    }

    conditions
}

fn match_value(rule: &MatchRule, value: Value) -> Value {
    match rule {
        MatchRule::Equal => value,
        MatchRule::Prefix => Value::Text(format!("{value}%")),
        MatchRule::Contains => Value::Text(format!("%{value}%")),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::schema::tests::account_map;

    #[derive(Default)]
    pub(crate) struct TestFilter {
        values: Vec<(&'static str, Value)>,
        page_index: i64,
        page_size: i64,
    }

    impl TestFilter {
        pub(crate) fn with(mut self, field: &'static str, value: impl Into<Value>) -> Self {
            self.values.push((field, value.into()));
            self
        }

        pub(crate) fn page(mut self, page_index: i64, page_size: i64) -> Self {
            self.page_index = page_index;
            self.page_size = page_size;
            self
        }
    }

    impl Filter for TestFilter {
        fn value(&self, field: &str) -> Option<Value> {
            self.values
                .iter()
                .find(|(name, _)| *name == field)
                .map(|(_, value)| value.clone())
        }

        fn page_index(&self) -> i64 {
            self.page_index
        }

        fn page_size(&self) -> i64 {
            self.page_size
        }
    }

    #[test]
    fn empty_filter_has_no_conditions() {
        let conditions =
            build_conditions(&TestFilter::default(), account_map(), &Placeholder::Question);

        assert!(conditions.is_empty());
        assert!(conditions.params().is_empty());
        assert_eq!(conditions.where_clause(), None);
    }

    #[test]
    fn empty_values_are_skipped() {
        let filter = TestFilter::default()
            .with("username", "")
            .with("phone", Value::Null);
        let conditions = build_conditions(&filter, account_map(), &Placeholder::Question);

        assert!(conditions.is_empty());
    }

    #[test]
    fn applies_match_rules() {
        let filter = TestFilter::default()
            .with("id", "u1")
            .with("username", "al")
            .with("phone", "al");
        let conditions = build_conditions(&filter, account_map(), &Placeholder::Question);

        assert_eq!(
            conditions.conditions(),
            &["id = ?", "username like ?", "phone like ?"]
        );
        assert_eq!(
            conditions.params(),
            &[Value::from("u1"), Value::from("al%"), Value::from("%al%")]
        );
    }

    #[test]
    fn follows_schema_order_not_filter_order() {
        let date = NaiveDate::from_ymd_opt(1990, 4, 1).unwrap();
        let filter = TestFilter::default()
            .with("dateOfBirth", date)
            .with("phone", "555")
            .with("email", "jo");
        let conditions = build_conditions(&filter, account_map(), &Placeholder::Numbered);

        assert_eq!(
            conditions.conditions(),
            &["email like $1", "phone like $2", "date_of_birth = $3"]
        );
        assert_eq!(
            conditions.params(),
            &[Value::from("jo%"), Value::from("%555%"), Value::Date(date)]
        );
        assert_eq!(
            conditions.where_clause().unwrap(),
            "email like $1 AND phone like $2 AND date_of_birth = $3"
        );
    }

    #[test]
    fn ignores_fields_outside_the_schema() {
        let filter = TestFilter::default()
            .with("nickname", "jo")
            .with("email", "jo");
        let conditions = build_conditions(&filter, account_map(), &Placeholder::Question);

        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions.conditions(), &["email like ?"]);
    }
}
