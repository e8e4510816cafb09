//! Numeric code representation of bytes.

use super::error::LayoutError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Numeric base used to render each byte in the code matrix.
///
/// Each variant has a fixed digit count per byte so that every byte occupies
/// the same number of columns regardless of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeType {
    /// Base 2, 8 digits per byte.
    Binary,
    /// Base 8, 3 digits per byte.
    Octal,
    /// Base 10, 3 digits per byte.
    Decimal,
    /// Base 16, 2 digits per byte.
    #[default]
    Hexadecimal,
}

impl CodeType {
    /// All code types in menu order.
    pub const ALL: [CodeType; 4] = [
        CodeType::Binary,
        CodeType::Octal,
        CodeType::Decimal,
        CodeType::Hexadecimal,
    ];

    /// Number of digits a single byte occupies.
    pub fn max_digits_for_byte(self) -> usize {
        match self {
            CodeType::Binary => 8,
            CodeType::Octal => 3,
            CodeType::Decimal => 3,
            CodeType::Hexadecimal => 2,
        }
    }

    /// Numeric base of the digits.
    pub fn base(self) -> u32 {
        match self {
            CodeType::Binary => 2,
            CodeType::Octal => 8,
            CodeType::Decimal => 10,
            CodeType::Hexadecimal => 16,
        }
    }

    /// The following entry of [`CodeType::ALL`], wrapping around.
    pub fn next(self) -> Self {
        match self {
            CodeType::Binary => CodeType::Octal,
            CodeType::Octal => CodeType::Decimal,
            CodeType::Decimal => CodeType::Hexadecimal,
            CodeType::Hexadecimal => CodeType::Binary,
        }
    }

    /// Lowercase configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            CodeType::Binary => "binary",
            CodeType::Octal => "octal",
            CodeType::Decimal => "decimal",
            CodeType::Hexadecimal => "hexadecimal",
        }
    }
}

impl fmt::Display for CodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeType {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary" | "bin" => Ok(CodeType::Binary),
            "octal" | "oct" => Ok(CodeType::Octal),
            "decimal" | "dec" => Ok(CodeType::Decimal),
            "hexadecimal" | "hex" => Ok(CodeType::Hexadecimal),
            _ => Err(LayoutError::invalid("code_type", format!("unknown code type '{s}'"))),
        }
    }
}

/// Letter case used for digits above 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeCharactersCase {
    /// `0-9a-f`
    Lower,
    /// `0-9A-F`
    #[default]
    Upper,
}

impl CodeCharactersCase {
    /// The other case.
    pub fn toggled(self) -> Self {
        match self {
            CodeCharactersCase::Lower => CodeCharactersCase::Upper,
            CodeCharactersCase::Upper => CodeCharactersCase::Lower,
        }
    }
}

impl FromStr for CodeCharactersCase {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lower" => Ok(CodeCharactersCase::Lower),
            "upper" => Ok(CodeCharactersCase::Upper),
            _ => Err(LayoutError::invalid(
                "code_case",
                format!("unknown character case '{s}'"),
            )),
        }
    }
}
