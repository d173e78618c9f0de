//! Delimited SQL identifier quoting.
//!
//! Identifiers (schema/table/column names) cannot be bound as driver
//! parameters, so dynamic identifier parts are rendered as delimited
//! identifiers instead: each part double-quoted, internal `"` escaped
//! by doubling, parts joined with `.`.

use crate::error::{BindError, BindResult};

/// Append one name part as a delimited identifier.
pub(crate) fn quote_part_into(out: &mut String, part: &str) {
    out.push('"');
    for ch in part.chars() {
        if ch == '"' {
            out.push('"');
            out.push('"');
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}

/// Render a dotted identifier from its name parts.
pub(crate) fn identifier_sql(names: &[String]) -> BindResult<String> {
    if names.is_empty() {
        return Err(BindError::validation(
            "Identifier requires at least one name part",
        ));
    }

    let mut cap = names.len().saturating_sub(1);
    for part in names {
        cap += part.len() + 2;
    }

    let mut out = String::with_capacity(cap);
    for (i, part) in names.iter().enumerate() {
        if part.is_empty() {
            return Err(BindError::validation("Empty identifier part"));
        }
        if part.contains('\0') {
            return Err(BindError::validation(
                "Identifier cannot contain NUL character",
            ));
        }
        if i > 0 {
            out.push('.');
        }
        quote_part_into(&mut out, part);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_part_is_quoted() {
        assert_eq!(identifier_sql(&parts(&["users"])).unwrap(), r#""users""#);
    }

    #[test]
    fn parts_are_dot_joined() {
        assert_eq!(
            identifier_sql(&parts(&["public", "users", "id"])).unwrap(),
            r#""public"."users"."id""#
        );
    }

    #[test]
    fn internal_quotes_are_doubled() {
        assert_eq!(
            identifier_sql(&parts(&[r#"has"quote"#])).unwrap(),
            r#""has""quote""#
        );
    }

    #[test]
    fn quoting_neutralizes_injection_attempts() {
        assert_eq!(
            identifier_sql(&parts(&[r#"users"; drop table users; --"#])).unwrap(),
            r#""users""; drop table users; --""#
        );
    }

    #[test]
    fn rejects_empty_list() {
        assert!(identifier_sql(&[]).is_err());
    }

    #[test]
    fn rejects_empty_part() {
        assert!(identifier_sql(&parts(&["public", ""])).is_err());
    }

    #[test]
    fn rejects_nul() {
        assert!(identifier_sql(&parts(&["us\0ers"])).is_err());
    }
}
