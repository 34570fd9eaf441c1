use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CoreError;

const MAX_SYMBOL_LEN: usize = 16;

/// Uppercase ticker symbol, the key shared by every record in the system.
///
/// Not checked against any exchange listing; only the shape is validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Trim and uppercase raw user input into a symbol.
    ///
    /// Index and share-class tickers such as `^GSPC` or `BRK.B` are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptySymbol`] for blank input and
    /// [`CoreError::InvalidSymbol`] for anything that cannot be a ticker.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptySymbol);
        }
        let upper = trimmed.to_ascii_uppercase();
        let valid_chars = upper
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));
        if !valid_chars || upper.len() > MAX_SYMBOL_LEN {
            return Err(CoreError::InvalidSymbol(trimmed.to_string()));
        }
        Ok(Self(upper))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Symbol {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uppercases_and_trims() {
        let symbol = Symbol::parse("  aapl ").unwrap();
        assert_eq!(symbol.as_str(), "AAPL");
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert_eq!(Symbol::parse("   "), Err(CoreError::EmptySymbol));
    }

    #[test]
    fn parse_accepts_index_and_share_class_tickers() {
        assert_eq!(Symbol::parse("^gspc").unwrap().as_str(), "^GSPC");
        assert_eq!(Symbol::parse("brk.b").unwrap().as_str(), "BRK.B");
    }

    #[test]
    fn parse_rejects_path_characters() {
        assert!(matches!(
            Symbol::parse("../etc"),
            Err(CoreError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn deserializes_through_parse() {
        let symbol: Symbol = serde_json::from_str("\"msft\"").unwrap();
        assert_eq!(symbol.to_string(), "MSFT");
    }
}
