//! Error types for aci-inventory-api

use thiserror::Error;

/// A parameter value outside its allowed choices
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} '{value}', expected one of: {choices}")]
pub struct ParseError {
    /// Parameter being parsed
    pub kind: &'static str,
    /// Rejected input
    pub value: String,
    /// Comma-separated list of accepted values
    pub choices: String,
}

impl ParseError {
    pub(crate) fn new(kind: &'static str, value: &str, choices: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            choices: choices.join(", "),
        }
    }
}
