use crate::{
    filter::{build_conditions, Filter},
    placeholder::Placeholder,
    schema::ColumnMap,
    Statement,
};

/// `SELECT * FROM <table> [WHERE ...] [LIMIT n [OFFSET m]]`
pub fn build_query<F: Filter + ?Sized>(
    filter: &F,
    map: &ColumnMap,
    placeholder: &Placeholder,
) -> Statement {
    let conditions = build_conditions(filter, map, placeholder);

    let mut query = format!("SELECT * FROM {}", map.table());
    if let Some(where_clause) = conditions.where_clause() {
        query += &format!(" WHERE {where_clause}");
    }
    if let Some(pagination) = pagination(filter.page_index(), filter.page_size()) {
        query += &pagination;
    }

    Statement::new(query, conditions.into_params())
}

/// `SELECT COUNT(*) FROM <table> [WHERE ...]`, with its own placeholder sequence.
pub fn build_count<F: Filter + ?Sized>(
    filter: &F,
    map: &ColumnMap,
    placeholder: &Placeholder,
) -> Statement {
    let conditions = build_conditions(filter, map, placeholder);

    let mut query = format!("SELECT COUNT(*) FROM {}", map.table());
    if let Some(where_clause) = conditions.where_clause() {
        query += &format!(" WHERE {where_clause}");
    }

    Statement::new(query, conditions.into_params())
}

/// Rows skipped before the requested page; `None` unless both values are positive.
pub fn offset(page_index: i64, page_size: i64) -> Option<i64> {
    match page_index > 0 && page_size > 0 {
        true => Some((page_index - 1).saturating_mul(page_size)),
        false => None,
    }
}

fn pagination(page_index: i64, page_size: i64) -> Option<String> {
    if page_size <= 0 {
        return None;
    }
    let mut clause = format!(" LIMIT {page_size}");
    if let Some(offset) = offset(page_index, page_size) {
        clause += &format!(" OFFSET {offset}");
    }
    Some(clause)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{filter::tests::TestFilter, schema::tests::account_map, value::Value};

    #[test]
    fn no_filter_no_where() {
        let filter = TestFilter::default();

        let query = build_query(&filter, account_map(), &Placeholder::Question);
        let count = build_count(&filter, account_map(), &Placeholder::Question);

        assert_eq!(query.sql(), "SELECT * FROM users");
        assert!(query.params().is_empty());
        assert_eq!(count.sql(), "SELECT COUNT(*) FROM users");
        assert!(count.params().is_empty());
    }

    #[test]
    fn prefix_search_with_second_page() {
        let filter = TestFilter::default().with("username", "jo").page(2, 10);

        let query = build_query(&filter, account_map(), &Placeholder::Question);

        assert_eq!(
            query.sql(),
            "SELECT * FROM users WHERE username like ? LIMIT 10 OFFSET 10"
        );
        assert_eq!(query.params(), &[Value::from("jo%")]);
    }

    #[test]
    fn zero_page_size_emits_no_limit() {
        for page_index in [0, 1, 5] {
            let filter = TestFilter::default().with("id", "u1").page(page_index, 0);

            let query = build_query(&filter, account_map(), &Placeholder::Question);

            assert_eq!(query.sql(), "SELECT * FROM users WHERE id = ?");
        }
    }

    #[test]
    fn first_page_and_no_page_are_equivalent() {
        let none = build_query(
            &TestFilter::default().page(0, 20),
            account_map(),
            &Placeholder::Question,
        );
        let first = build_query(
            &TestFilter::default().page(1, 20),
            account_map(),
            &Placeholder::Question,
        );

        assert_eq!(none.sql(), "SELECT * FROM users LIMIT 20");
        assert_eq!(first.sql(), "SELECT * FROM users LIMIT 20 OFFSET 0");
        assert_eq!(offset(0, 20), None);
        assert_eq!(offset(1, 20), Some(0));
    }

    #[test]
    fn offset_arithmetic() {
        assert_eq!(offset(3, 20), Some(40));
        assert_eq!(offset(3, 0), None);
        assert_eq!(offset(-1, 20), None);

        let query = build_query(
            &TestFilter::default().page(3, 20),
            account_map(),
            &Placeholder::Numbered,
        );
        assert_eq!(query.sql(), "SELECT * FROM users LIMIT 20 OFFSET 40");
    }

    #[test]
    fn list_and_count_share_params_with_separate_numbering() {
        let filter = TestFilter::default()
            .with("email", "a@")
            .with("phone", "12")
            .page(2, 5);

        let query = build_query(&filter, account_map(), &Placeholder::Numbered);
        let count = build_count(&filter, account_map(), &Placeholder::Numbered);

        assert_eq!(
            query.sql(),
            "SELECT * FROM users WHERE email like $1 AND phone like $2 LIMIT 5 OFFSET 5"
        );
        assert_eq!(
            count.sql(),
            "SELECT COUNT(*) FROM users WHERE email like $1 AND phone like $2"
        );
        assert_eq!(query.params(), count.params());
        assert_eq!(count.params(), &[Value::from("a@%"), Value::from("%12%")]);
    }
}
