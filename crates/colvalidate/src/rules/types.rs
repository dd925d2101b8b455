//! Enumerated configuration options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Letter-case constraint for string values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Case {
    /// No case constraint.
    #[default]
    None,
    Lower,
    Upper,
    /// Every word starts with an upper-case letter, the rest lower-case.
    Title,
}

impl Case {
    /// Transform `s` into this case. Returns `None` when unconstrained.
    pub fn apply(&self, s: &str) -> Option<String> {
        match self {
            Case::None => None,
            Case::Lower => Some(s.to_lowercase()),
            Case::Upper => Some(s.to_uppercase()),
            Case::Title => Some(title_case(s)),
        }
    }

    /// Check whether `s` already satisfies this case.
    pub fn matches(&self, s: &str) -> bool {
        self.apply(s).is_none_or(|cased| cased == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Case::None => "none",
            Case::Lower => "lower",
            Case::Upper => "upper",
            Case::Title => "title",
        }
    }
}

/// Word boundaries are any non-alphabetic character.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_alphabetic();
    }
    out
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Case {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(Case::None),
            "lower" => Ok(Case::Lower),
            "upper" => Ok(Case::Upper),
            "title" => Ok(Case::Title),
            _ => Err(ValidationError::UnknownCase(s.to_string())),
        }
    }
}

impl TryFrom<String> for Case {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Shape of the payload returned alongside the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ReturnType {
    /// Report only.
    #[default]
    None,
    /// Coerced values with failing positions replaced by missing.
    Values,
    /// One boolean per row, `true` = failed.
    MaskSeries,
    /// One column per check.
    MaskFrame,
}

impl ReturnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnType::None => "none",
            ReturnType::Values => "values",
            ReturnType::MaskSeries => "mask_series",
            ReturnType::MaskFrame => "mask_frame",
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(ReturnType::None),
            "values" => Ok(ReturnType::Values),
            "mask_series" => Ok(ReturnType::MaskSeries),
            "mask_frame" => Ok(ReturnType::MaskFrame),
            _ => Err(ValidationError::UnknownReturnType(s.to_string())),
        }
    }
}

impl TryFrom<String> for ReturnType {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
