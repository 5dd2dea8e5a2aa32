use std::fmt;
use std::str::FromStr;

use crate::error::SymbolError;

/// Case-insensitive asset identifier such as `btc` or `dogecoin`.
///
/// The value is stored lowercased; that form keys the history files and is
/// sent to the price API. [`Symbol::display`] gives the uppercase label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(raw: &str) -> Result<Self, SymbolError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SymbolError::Empty);
        }
        // The key becomes part of a file name under the data directory.
        if let Some(ch) = trimmed.chars().find(|c| matches!(c, '/' | '\\' | '\0')) {
            return Err(SymbolError::InvalidCharacter {
                symbol: trimmed.to_string(),
                ch,
            });
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Lowercase key used for storage paths and API ids.
    pub fn key(&self) -> &str {
        &self.0
    }

    pub fn display(&self) -> String {
        self.0.to_uppercase()
    }
}

impl FromStr for Symbol {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
