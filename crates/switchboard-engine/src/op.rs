//! Operation-keyword extraction from declarative query text.

use switchboard_core::{AppError, AppResult};

/// The operation a piece of query text performs, taken from its first
/// whitespace-delimited token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// List fetch.
    Query,
    /// Row count.
    Count,
    /// Insert.
    Add,
    /// Update.
    Update,
    /// Delete.
    Delete,
}

impl Operation {
    /// Extract the operation keyword from query text.
    ///
    /// The text must consist of optional leading blanks, the keyword, and
    /// at least one blank after it; anything else is an invalid-query
    /// error. An unrecognized keyword is rejected the same way rather than
    /// silently producing no result.
    pub fn parse(text: &str) -> AppResult<Self> {
        let trimmed = text.trim_start();
        let end = trimmed
            .find(char::is_whitespace)
            .ok_or_else(|| AppError::invalid_query(text))?;
        match &trimmed[..end] {
            "query" => Ok(Self::Query),
            "count" => Ok(Self::Count),
            "add" => Ok(Self::Add),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            _ => Err(AppError::invalid_query(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_core::error::ErrorKind;

    #[test]
    fn extracts_leading_keyword() {
        assert_eq!(Operation::parse("query Foo: [*]").unwrap(), Operation::Query);
        assert_eq!(Operation::parse("add Foo: {...}").unwrap(), Operation::Add);
        assert_eq!(Operation::parse("  count Foo").unwrap(), Operation::Count);
    }

    #[test]
    fn keyword_must_be_followed_by_a_blank() {
        let err = Operation::parse("query").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidQuery);
    }

    #[test]
    fn blank_text_is_invalid() {
        assert!(Operation::parse("").is_err());
        assert!(Operation::parse("   ").is_err());
    }

    #[test]
    fn unknown_keyword_is_invalid() {
        let err = Operation::parse("upsert Foo: {...}").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidQuery);
    }
}
