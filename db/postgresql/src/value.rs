use md_query::Value;
use sqlx::{
    encode::IsNull,
    postgres::{types::Oid, PgArgumentBuffer, PgArguments, PgTypeInfo},
    Arguments, Encode, Postgres, Type,
};

/// `unknown` pseudo-type; the server resolves it from the column it meets.
const UNKNOWN_OID: u32 = 705;

/// NULL without a declared type, so it can be assigned to text, date and boolean columns alike.
struct UntypedNull;

impl Type<Postgres> for UntypedNull {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_oid(Oid(UNKNOWN_OID))
    }
}

impl Encode<'_, Postgres> for UntypedNull {
    fn encode_by_ref(&self, _: &mut PgArgumentBuffer) -> IsNull {
        IsNull::Yes
    }
}

/// Binds statement params in placeholder order.
pub fn arguments(params: Vec<Value>) -> PgArguments {
    let mut arguments = PgArguments::default();
    Arguments::reserve(&mut arguments, params.len(), 0);
    for value in params {
        match value {
            Value::Null => Arguments::add(&mut arguments, UntypedNull),
            Value::Bool(value) => Arguments::add(&mut arguments, value),
            Value::Integer(value) => Arguments::add(&mut arguments, value),
            Value::Text(value) => Arguments::add(&mut arguments, value),
            Value::Date(value) => Arguments::add(&mut arguments, value),
        }
    }
    arguments
}
