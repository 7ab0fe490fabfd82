//! Query-safety gate for incoming SQL.
//!
//! This is a narrowly-scoped textual heuristic, not a SQL parser: it checks
//! that a trimmed query case-insensitively starts with `select`, and appends
//! a row cap when the lowercase form lacks the substring `limit`. It does not
//! understand comments, string literals, or subqueries that legitimately
//! contain the word "limit". Escaping and parameter binding are deliberately
//! out of scope; the executed SQL is passed to the database untransformed
//! apart from the appended suffix.

use crate::constants::DEFAULT_ROW_LIMIT;
use crate::error::ServerError;

/// Validate a candidate SQL string and apply the row-cap heuristic.
///
/// Returns the trimmed query, suffixed with ` LIMIT 100` when it carries no
/// `limit` of its own. Fails with [`ServerError::InvalidQuery`] when the
/// query is absent, empty after trimming, or not SELECT-prefixed.
pub fn sanitize_query(raw: Option<&str>) -> Result<String, ServerError> {
    let sql = raw.map(str::trim).unwrap_or_default();
    let lowered = sql.to_lowercase();

    if !lowered.starts_with("select") {
        return Err(ServerError::invalid_query(
            "Only SELECT queries are allowed",
        ));
    }

    if lowered.contains("limit") {
        Ok(sql.to_string())
    } else {
        Ok(format!("{sql} LIMIT {DEFAULT_ROW_LIMIT}"))
    }
}
