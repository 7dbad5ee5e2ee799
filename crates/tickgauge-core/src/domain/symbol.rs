//! Ticker symbols.
//!
//! Symbols arrive from CLI arguments and comma-separated interactive input;
//! both funnel through the same normalization so `"aapl"`, `" AAPL "`, and
//! `"AAPL"` are one key in the report maps.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Normalized, uppercase ticker symbol.
///
/// Valid symbols are 1 to 15 ASCII characters, start with a letter, and
/// contain only letters, digits, `.` (share classes, e.g. BRK.B) and `-`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a single ticker.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();

        if normalized.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        if normalized.len() > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len: normalized.len(),
                max: MAX_SYMBOL_LEN,
            });
        }

        for (index, byte) in normalized.bytes().enumerate() {
            let ch = byte as char;
            let valid = if index == 0 {
                ch.is_ascii_alphabetic()
            } else {
                ch.is_ascii_alphanumeric() || ch == '.' || ch == '-'
            };
            if !valid {
                if index == 0 {
                    return Err(ValidationError::SymbolInvalidStart { ch });
                }
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    /// Parse a comma-separated ticker list.
    ///
    /// Blank entries are dropped, duplicates are kept once in first-seen
    /// order, and an input with no usable symbols is an error.
    pub fn parse_list(input: &str) -> Result<Vec<Self>, ValidationError> {
        let mut symbols: Vec<Self> = Vec::new();

        for part in input.split(',') {
            if part.trim().is_empty() {
                continue;
            }

            let symbol = Self::parse(part)?;
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }

        if symbols.is_empty() {
            return Err(ValidationError::EmptySymbolList);
        }

        Ok(symbols)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
