//! Statement pagination (spec.md §4.2 `listStatement`).
//!
//! A cursor is simply the id of the last row returned, descending order;
//! `next_cursor` is omitted once a page comes back shorter than the
//! requested limit.

use thiserror::Error;

pub const DEFAULT_STATEMENT_LIMIT: i64 = 50;
pub const MAX_STATEMENT_LIMIT: i64 = 200;

#[derive(Debug, Error)]
pub enum CursorError {
    #[error("cursor must be a positive integer")]
    Malformed,
}

/// Parses a `cursor` query parameter into the last-seen id.
pub fn parse_cursor(raw: Option<&str>) -> Result<Option<i64>, CursorError> {
    match raw {
        None => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map_err(|_| CursorError::Malformed)
            .and_then(|id| {
                if id > 0 {
                    Ok(Some(id))
                } else {
                    Err(CursorError::Malformed)
                }
            }),
    }
}

/// Clamps a client-supplied `limit` into `1..=MAX_STATEMENT_LIMIT`.
pub fn clamp_limit(raw: Option<i64>) -> i64 {
    raw.unwrap_or(DEFAULT_STATEMENT_LIMIT)
        .clamp(1, MAX_STATEMENT_LIMIT)
}

/// Derives `next_cursor` from a page of ids: `None` once the page is shorter
/// than the requested limit (there is nothing more to fetch).
pub fn next_cursor(last_id_in_page: Option<i64>, page_len: usize, limit: i64) -> Option<i64> {
    if page_len < limit as usize {
        None
    } else {
        last_id_in_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_cursor() {
        assert_eq!(parse_cursor(Some("42")).unwrap(), Some(42));
    }

    #[test]
    fn rejects_non_positive_cursor() {
        assert!(parse_cursor(Some("0")).is_err());
        assert!(parse_cursor(Some("-5")).is_err());
    }

    #[test]
    fn clamps_limit_to_max() {
        assert_eq!(clamp_limit(Some(10_000)), MAX_STATEMENT_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(None), DEFAULT_STATEMENT_LIMIT);
    }

    #[test]
    fn next_cursor_is_none_on_short_page() {
        assert_eq!(next_cursor(Some(7), 3, 50), None);
        assert_eq!(next_cursor(Some(7), 50, 50), Some(7));
    }
}
