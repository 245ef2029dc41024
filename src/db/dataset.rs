use serde::{Serialize, de::DeserializeOwned};
use sqlx::{FromRow, QueryBuilder, Sqlite, query_builder::Separated, sqlite::SqliteRow};

/// A nullable column value bound into a dynamically built statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    Integer(Option<i64>),
    Real(Option<f64>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        match self {
            SqlValue::Text(v) => v.is_none(),
            SqlValue::Integer(v) => v.is_none(),
            SqlValue::Real(v) => v.is_none(),
        }
    }

    pub(crate) fn push_bind(self, qb: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            SqlValue::Text(v) => qb.push_bind(v),
            SqlValue::Integer(v) => qb.push_bind(v),
            SqlValue::Real(v) => qb.push_bind(v),
        };
    }

    pub(crate) fn push_bind_separated(self, sep: &mut Separated<'_, '_, Sqlite, &'static str>) {
        match self {
            SqlValue::Text(v) => sep.push_bind(v),
            SqlValue::Integer(v) => sep.push_bind(v),
            SqlValue::Real(v) => sep.push_bind(v),
        };
    }
}

/// One of the statistics tables exposed over REST.
///
/// `Fields` is the request body shared by create, update and filter: every
/// column optional, plus an optional `id` that only filters honour.
pub trait Dataset:
    for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Sync + Unpin + 'static
{
    const TABLE: &'static str;
    /// Writable columns, in the order `bindings` yields them.
    const COLUMNS: &'static [&'static str];

    type Fields: DeserializeOwned + Send + Sync + 'static;

    fn bindings(fields: &Self::Fields) -> Vec<SqlValue>;

    fn id_of(fields: &Self::Fields) -> Option<i64>;
}
