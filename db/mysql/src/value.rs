use md_query::Value;
use sqlx::{mysql::MySqlArguments, Arguments};

/// Binds statement params in placeholder order.
pub fn arguments(params: Vec<Value>) -> MySqlArguments {
    let mut arguments = MySqlArguments::default();
    Arguments::reserve(&mut arguments, params.len(), 0);
    for value in params {
        match value {
            Value::Null => Arguments::add(&mut arguments, None::<String>),
            Value::Bool(value) => Arguments::add(&mut arguments, value),
            Value::Integer(value) => Arguments::add(&mut arguments, value),
            Value::Text(value) => Arguments::add(&mut arguments, value),
            Value::Date(value) => Arguments::add(&mut arguments, value),
        }
    }
    arguments
}
