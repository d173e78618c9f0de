//! Fragment factories.
//!
//! Each factory turns one token into `{sql, values}` given the current
//! parameter offset of the surrounding template, so placeholder numbers
//! stay contiguous across sibling fragments. Structural validation
//! happens here, before any partial fragment escapes.

use super::token::Query;
use crate::error::{BindError, BindResult};
use crate::ident::{identifier_sql, quote_part_into};
use crate::value::Value;
use std::fmt::Write as _;

/// A resolved fragment: SQL text plus the parameters it appends.
pub(crate) struct Frag {
    pub(crate) sql: String,
    pub(crate) values: Vec<Value>,
}

pub(crate) fn identifier_frag(names: &[String]) -> BindResult<Frag> {
    Ok(Frag {
        sql: identifier_sql(names)?,
        values: Vec::new(),
    })
}

/// Trusted literal passthrough: text and fixed values unchanged, no
/// placeholder renumbering.
pub(crate) fn raw_frag(sql: String, values: Vec<Value>) -> Frag {
    Frag { sql, values }
}

pub(crate) fn value_list_frag(values: Vec<Value>, offset: usize) -> BindResult<Frag> {
    if values.is_empty() {
        return Err(BindError::validation(
            "Value list must have at least one member",
        ));
    }

    let mut sql = String::new();
    for i in 0..values.len() {
        if i > 0 {
            sql.push_str(", ");
        }
        let _ = write!(sql, "${}", offset + i + 1);
    }
    Ok(Frag { sql, values })
}

pub(crate) fn tuple_frag(values: Vec<Value>, offset: usize) -> BindResult<Frag> {
    if values.is_empty() {
        return Err(BindError::validation("Tuple must have at least one member"));
    }

    let inner = value_list_frag(values, offset)?;
    Ok(Frag {
        sql: format!("({})", inner.sql),
        values: inner.values,
    })
}

pub(crate) fn tuple_list_frag(tuples: Vec<Vec<Value>>, offset: usize) -> BindResult<Frag> {
    let Some(first) = tuples.first() else {
        return Err(BindError::validation(
            "Tuple list must have at least one tuple",
        ));
    };
    let arity = first.len();

    let mut sql = String::new();
    let mut values = Vec::with_capacity(tuples.len() * arity);
    let mut offset = offset;
    for (i, tuple) in tuples.into_iter().enumerate() {
        if tuple.len() != arity {
            return Err(BindError::validation(format!(
                "Tuple lengths must match: expected {arity} members, tuple {i} has {}",
                tuple.len()
            )));
        }
        if i > 0 {
            sql.push_str(", ");
        }
        let len = tuple.len();
        let frag = tuple_frag(tuple, offset)?;
        sql.push_str(&frag.sql);
        values.extend(frag.values);
        offset += len;
    }
    Ok(Frag { sql, values })
}

pub(crate) fn unnest_frag(
    tuples: Vec<Vec<Value>>,
    column_types: &[String],
    offset: usize,
) -> BindResult<Frag> {
    if column_types.is_empty() {
        return Err(BindError::validation(
            "Unnest requires at least one column type",
        ));
    }

    if let Some(first) = tuples.first() {
        let arity = first.len();
        for (i, tuple) in tuples.iter().enumerate() {
            if tuple.len() != arity {
                return Err(BindError::validation(format!(
                    "Tuple lengths differ: expected {arity} members, tuple {i} has {}",
                    tuple.len()
                )));
            }
        }
        if column_types.len() != arity {
            return Err(BindError::validation(format!(
                "Column type count ({}) does not match tuple member count ({arity})",
                column_types.len()
            )));
        }
    }

    // Transpose rows into one array parameter per column.
    let mut columns: Vec<Vec<Value>> = (0..column_types.len())
        .map(|_| Vec::with_capacity(tuples.len()))
        .collect();
    for tuple in tuples {
        for (c, value) in tuple.into_iter().enumerate() {
            columns[c].push(value);
        }
    }

    let mut sql = String::from("unnest(");
    let mut values = Vec::with_capacity(column_types.len());
    for (c, (column, column_type)) in columns.into_iter().zip(column_types).enumerate() {
        if column_type.is_empty() {
            return Err(BindError::validation("Empty unnest column type"));
        }
        if c > 0 {
            sql.push_str(", ");
        }
        let _ = write!(sql, "${}::", offset + c + 1);
        quote_part_into(&mut sql, column_type);
        sql.push_str("[]");
        values.push(Value::Array(column));
    }
    sql.push(')');

    Ok(Frag { sql, values })
}

/// Splice a nested query: shift its placeholders past the parameters
/// already bound by the outer template and append its values.
pub(crate) fn nested_frag(query: Query, offset: usize) -> Frag {
    let (sql, values) = query.into_parts();
    Frag {
        sql: shift_placeholders(&sql, offset),
        values,
    }
}

/// Rewrite every `$N` placeholder to `$(N+offset)`.
///
/// Lone `$` characters (and digit runs too large to parse) are copied
/// through untouched.
fn shift_placeholders(sql: &str, offset: usize) -> String {
    if offset == 0 {
        return sql.to_owned();
    }

    let mut out = String::with_capacity(sql.len() + 8);
    let mut rest = sql;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let digits = rest[1..].bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            out.push('$');
            rest = &rest[1..];
            continue;
        }
        match rest[1..1 + digits].parse::<usize>() {
            Ok(n) => {
                let _ = write!(out, "${}", n + offset);
            }
            Err(_) => out.push_str(&rest[..1 + digits]),
        }
        rest = &rest[1 + digits..];
    }
    out.push_str(rest);
    out
}
