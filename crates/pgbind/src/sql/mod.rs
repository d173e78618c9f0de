//! Safe SQL composition.
//!
//! This module assembles parameterized SQL from interleaved literal
//! text and typed tokens, guaranteeing that no dynamic value is ever
//! concatenated into the SQL text: scalars become `$1, $2, ...`
//! placeholders, identifiers are quoted, and structured tokens expand
//! into placeholder groups with the parameter offset threaded through.
//!
//! The usual entry point is the [`query!`](crate::query!) macro, which
//! alternates string literals with arguments:
//!
//! ```ignore
//! use pgbind::{query, sql};
//!
//! let q = query!(
//!     "SELECT id FROM ", sql::identifier(["public", "users"]),
//!     " WHERE status = ", "active",
//!     " AND id IN (", sql::value_list([1_i64, 2, 3]), ")"
//! )?;
//! assert_eq!(
//!     q.sql(),
//!     r#"SELECT id FROM "public"."users" WHERE status = $1 AND id IN ($2, $3, $4)"#
//! );
//! ```
//!
//! Composed [`Query`] values nest: embedding one query inside another
//! renumbers the inner placeholders to continue the outer sequence.

mod frag;
mod token;

#[cfg(test)]
mod tests;

pub use token::{Query, Token};

use crate::error::{BindError, BindResult};
use crate::value::Value;
use std::fmt::Write as _;

/// Assemble a query from literal segments and interleaved arguments.
///
/// `segments` must contain exactly one more entry than `args`; the
/// [`query!`](crate::query!) macro enforces this shape structurally.
/// Fragment text is appended exactly once and never re-scanned for
/// placeholders — nesting happens only through [`Token::Query`]
/// arguments.
pub fn template(segments: &[&str], args: Vec<Token>) -> BindResult<Query> {
    if segments.len() != args.len() + 1 {
        return Err(BindError::validation(format!(
            "Template expects one more literal segment than arguments: got {} segments and {} arguments",
            segments.len(),
            args.len()
        )));
    }

    let mut sql = String::new();
    let mut values: Vec<Value> = Vec::new();
    let mut args = args.into_iter();

    for (i, segment) in segments.iter().enumerate() {
        sql.push_str(segment);
        if i + 1 == segments.len() {
            break;
        }
        let Some(token) = args.next() else { break };

        let frag = match token {
            Token::Value(value) => {
                if !value.is_scalar() {
                    tracing::error!(
                        target: "pgbind.sql",
                        constructed_sql = %sql,
                        offending = ?value,
                        "unexpected value expression"
                    );
                    return Err(BindError::unexpected_value(sql, &value));
                }
                let _ = write!(sql, "${}", values.len() + 1);
                values.push(value);
                continue;
            }
            Token::Query(inner) => frag::nested_frag(inner, values.len()),
            Token::Identifier(names) => frag::identifier_frag(&names)?,
            Token::Raw {
                sql: raw_sql,
                values: fixed,
            } => frag::raw_frag(raw_sql, fixed),
            Token::ValueList(list) => frag::value_list_frag(list, values.len())?,
            Token::Tuple(members) => frag::tuple_frag(members, values.len())?,
            Token::TupleList(tuples) => frag::tuple_list_frag(tuples, values.len())?,
            Token::Unnest {
                tuples,
                column_types,
            } => frag::unnest_frag(tuples, &column_types, values.len())?,
        };
        sql.push_str(&frag.sql);
        values.extend(frag.values);
    }

    Ok(Query::from_parts(sql, values))
}

/// A dotted identifier token (schema/table/column).
///
/// Rendered with each part double-quoted and internal quotes doubled;
/// never parameterized, since identifiers cannot be bound as driver
/// parameters.
pub fn identifier<I, S>(names: I) -> Token
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Token::Identifier(names.into_iter().map(Into::into).collect())
}

/// Trusted literal SQL, passed through verbatim.
///
/// Placeholders inside the text are **not** renumbered against the
/// surrounding template: a raw fragment authored as `$1` keeps saying
/// `$1` even when spliced in after other dynamic parameters. Only embed
/// placeholder-bearing raw text at the start of a template, or number
/// it yourself against the full parameter list.
pub fn raw(sql: impl Into<String>) -> Token {
    Token::Raw {
        sql: sql.into(),
        values: Vec::new(),
    }
}

/// Trusted literal SQL with a fixed parameter list.
///
/// The values are appended to the query's parameters in order. The same
/// numbering caveat as [`raw`] applies.
pub fn raw_with<I, V>(sql: impl Into<String>, values: I) -> Token
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Token::Raw {
        sql: sql.into(),
        values: values.into_iter().map(Into::into).collect(),
    }
}

/// A flat comma-joined placeholder list, e.g. for `IN (...)` bodies.
///
/// Assembling an empty list fails: there is no valid SQL for zero
/// placeholders.
pub fn value_list<I, V>(values: I) -> Token
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Token::ValueList(values.into_iter().map(Into::into).collect())
}

/// One parenthesized row of values, e.g. `(col_a, col_b) = ($1, $2)`.
pub fn tuple<I, V>(values: I) -> Token
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Token::Tuple(values.into_iter().map(Into::into).collect())
}

/// A comma-joined sequence of parenthesized rows of equal arity, e.g.
/// a multi-row `VALUES` body.
pub fn tuple_list<I, T, V>(tuples: I) -> Token
where
    I: IntoIterator<Item = T>,
    T: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Token::TupleList(
        tuples
            .into_iter()
            .map(|t| t.into_iter().map(Into::into).collect())
            .collect(),
    )
}

/// A set-returning `unnest(...)` construct for bulk rows.
///
/// Rows are transposed into one typed array parameter per column, so a
/// thousand three-column rows bind three parameters, not three
/// thousand:
///
/// ```ignore
/// // unnest($1::"int4"[], $2::"text"[])
/// sql::unnest([(1_i64, "a"), (2, "b")].map(|(n, s)| vec![Value::from(n), Value::from(s)]),
///             ["int4", "text"])
/// ```
pub fn unnest<I, T, V, C, S>(tuples: I, column_types: C) -> Token
where
    I: IntoIterator<Item = T>,
    T: IntoIterator<Item = V>,
    V: Into<Value>,
    C: IntoIterator<Item = S>,
    S: Into<String>,
{
    Token::Unnest {
        tuples: tuples
            .into_iter()
            .map(|t| t.into_iter().map(Into::into).collect())
            .collect(),
        column_types: column_types.into_iter().map(Into::into).collect(),
    }
}

/// Build a [`Query`] from alternating string literals and arguments.
///
/// Literals and arguments must strictly alternate, starting and ending
/// with a literal (use `""` when an argument sits at either edge).
/// Arguments may be scalars, token constructors from
/// [`sql`](crate::sql), or nested [`Query`] values.
///
/// ```ignore
/// let ids = query!("SELECT id FROM users WHERE group_id = ", 7_i64, "")?;
/// let q = query!("DELETE FROM events WHERE user_id IN (", ids, ")")?;
/// ```
#[macro_export]
macro_rules! query {
    ($first:literal $(, $arg:expr, $lit:literal)* $(,)?) => {
        $crate::sql::template(
            &[$first $(, $lit)*],
            ::std::vec![$($crate::Token::from($arg)),*],
        )
    };
}
