//! Token kinds and the composed query type.

use crate::value::Value;
use tokio_postgres::types::ToSql;

/// A typed fragment awaiting assembly.
///
/// Tokens are structural descriptions: apart from `Raw` and nested
/// `Query` they carry no SQL text of their own, and are rendered into
/// text plus parameters only during assembly, against the running
/// parameter offset of the surrounding template. New kinds are added as
/// new variants; the assembler matches exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A scalar parameter value, bound as the next positional placeholder.
    Value(Value),
    /// A previously composed query, spliced in with its placeholders
    /// renumbered to continue the outer numbering.
    Query(Query),
    /// A dotted identifier (schema/table/column), rendered quoted and
    /// never parameterized.
    Identifier(Vec<String>),
    /// Trusted literal SQL with an optional fixed parameter list.
    ///
    /// Passed through verbatim: placeholders inside `sql` are *not*
    /// renumbered against the surrounding template. See [`raw`](crate::sql::raw).
    Raw {
        /// The literal SQL text.
        sql: String,
        /// Parameters referenced by the literal text, in order.
        values: Vec<Value>,
    },
    /// A flat comma-joined placeholder list (no parentheses).
    ValueList(Vec<Value>),
    /// One parenthesized row of values.
    Tuple(Vec<Value>),
    /// A comma-joined sequence of parenthesized rows of equal arity.
    TupleList(Vec<Vec<Value>>),
    /// A set-returning `unnest(...)` construct binding one typed array
    /// parameter per column.
    Unnest {
        /// Rows, each with one member per column.
        tuples: Vec<Vec<Value>>,
        /// Declared Postgres type name of each column.
        column_types: Vec<String>,
    },
}

impl From<Value> for Token {
    fn from(v: Value) -> Self {
        Token::Value(v)
    }
}

impl From<Query> for Token {
    fn from(q: Query) -> Self {
        Token::Query(q)
    }
}

macro_rules! impl_token_from_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Token {
                fn from(v: $ty) -> Self {
                    Token::Value(Value::from(v))
                }
            }
        )+
    };
}

impl_token_from_scalar!(
    bool,
    i16,
    i32,
    i64,
    f32,
    f64,
    &str,
    String,
    Vec<u8>,
    serde_json::Value,
    chrono::NaiveDateTime,
);

impl<T: Into<Value>> From<Option<T>> for Token {
    fn from(v: Option<T>) -> Self {
        Token::Value(Value::from(v.map(Into::into)))
    }
}

/// A composed query: parameterized SQL text plus its bound values.
///
/// Built once by [`template`](crate::sql::template) (or the
/// [`query!`](crate::query!) macro) and immutable thereafter — there is
/// no mutation API. Placeholder `$(i+1)` in [`sql`](Query::sql)
/// corresponds to `values[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    sql: String,
    values: Vec<Value>,
}

impl Query {
    pub(crate) fn from_parts(sql: String, values: Vec<Value>) -> Self {
        Self { sql, values }
    }

    /// The parameterized SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The bound parameter values, in placeholder order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values
            .iter()
            .map(|v| v as &(dyn ToSql + Sync))
            .collect()
    }

    /// Consume the query, yielding its SQL text and values.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.values)
    }
}
