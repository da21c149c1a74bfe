//! Stock symbol value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DomainError;

/// Longest ticker accepted by [`Symbol::validate`].
const MAX_SYMBOL_LEN: usize = 10;

/// A stock ticker symbol.
///
/// Construction never fails and keeps the text exactly as given, so a
/// registry built for `"aapl"` reports `"aapl"`. Services accepting user
/// input call [`Symbol::normalized`] and then [`Symbol::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Create a new Symbol from the text as given.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Canonical form of user input: trimmed and uppercased.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self(self.0.trim().to_uppercase())
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate the symbol as user input.
    ///
    /// # Errors
    ///
    /// Returns error if the symbol is empty, too long, or contains
    /// characters other than ASCII letters, digits and `.`.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            return Err(DomainError::invalid("symbol", "Symbol cannot be empty"));
        }

        if self.0.len() > MAX_SYMBOL_LEN {
            return Err(DomainError::invalid(
                "symbol",
                "Symbol exceeds maximum length",
            ));
        }

        // Class shares use a dot (BRK.B)
        if !self.0.chars().all(|c| c.is_ascii_alphanumeric() || c == '.') {
            return Err(DomainError::invalid(
                "symbol",
                "Symbol contains invalid characters",
            ));
        }

        Ok(())
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

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
