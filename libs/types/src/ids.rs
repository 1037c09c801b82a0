//! Coin identifiers
//!
//! A `Symbol` is the short ticker that keys every coin in the wallet and
//! pairs cards on the board. Symbols are stored lowercase so "BTC" and
//! "btc" name the same asset.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticker symbol identifying a coin type (e.g. "btc", "eth").
///
/// Ordered so wallets keyed by `Symbol` iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Create a new Symbol from a string
    ///
    /// # Panics
    /// Panics if the ticker is empty or contains whitespace
    pub fn new(ticker: impl Into<String>) -> Self {
        match Self::try_new(ticker) {
            Some(symbol) => symbol,
            None => panic!("Symbol must be a non-empty ticker without whitespace"),
        }
    }

    /// Try to create a Symbol, returning None if invalid
    pub fn try_new(ticker: impl Into<String>) -> Option<Self> {
        let s = ticker.into();
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return None;
        }
        Some(Self(trimmed.to_lowercase()))
    }

    /// Get the ticker string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value.clone()).ok_or_else(|| format!("invalid symbol: {value:?}"))
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_creation() {
        let symbol = Symbol::new("btc");
        assert_eq!(symbol.as_str(), "btc");
    }

    #[test]
    fn test_symbol_is_lowercased() {
        assert_eq!(Symbol::new("ETH"), Symbol::new("eth"));
        assert_eq!(Symbol::new("  Xmr ").as_str(), "xmr");
    }

    #[test]
    fn test_symbol_try_new() {
        assert!(Symbol::try_new("ada").is_some());
        assert!(Symbol::try_new("").is_none());
        assert!(Symbol::try_new("   ").is_none());
        assert!(Symbol::try_new("b tc").is_none());
    }

    #[test]
    #[should_panic(expected = "Symbol must be a non-empty ticker")]
    fn test_symbol_invalid_format() {
        Symbol::new("");
    }

    #[test]
    fn test_symbol_serialization() {
        let symbol = Symbol::new("dash");
        let json = serde_json::to_string(&symbol).unwrap();
        assert_eq!(json, "\"dash\"");

        let deserialized: Symbol = serde_json::from_str(&json).unwrap();
        assert_eq!(symbol, deserialized);
        assert!(serde_json::from_str::<Symbol>("\"\"").is_err());
    }

    #[test]
    fn test_symbol_ordering() {
        let mut symbols = vec![Symbol::new("xrp"), Symbol::new("ada"), Symbol::new("btc")];
        symbols.sort();
        let names: Vec<&str> = symbols.iter().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["ada", "btc", "xrp"]);
    }
}
