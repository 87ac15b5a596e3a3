use serde_json::Value;
use thiserror::Error;

/// Problems with the schema itself, found before any token is read.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("option '{name}' is an alias for unknown option '{target}'")]
    UnknownAliasTarget { name: String, target: String },

    #[error("option '{name}' is an alias for '{target}', which is itself an alias")]
    AliasChain { name: String, target: String },
}

/// Reasons a parse can fail. Every error aborts the whole parse.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("invalid argument: {token} (unknown option)")]
    UnknownOption { token: String },

    #[error("invalid argument: {token} (flag does not take a value, got '{value}')")]
    UnexpectedValue { token: String, value: String },

    #[error("invalid argument: {token} (missing value)")]
    MissingValue { token: String },

    #[error("invalid argument: {token} ('{name}' already set to {previous})")]
    DuplicateOption {
        token: String,
        name: String,
        previous: Value,
    },

    #[error("invalid argument: {token} (positional arguments are not allowed)")]
    UnrecognizedArgument { token: String },

    #[error("invalid argument: {token} (bad value for '{name}': {reason})")]
    InvalidValue {
        token: String,
        name: String,
        reason: String,
    },

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl ParseError {
    /// Stable kebab-case identifier for the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownOption { .. } => "unknown-option",
            Self::UnexpectedValue { .. } => "unexpected-value-for-flag",
            Self::MissingValue { .. } => "missing-value",
            Self::DuplicateOption { .. } => "duplicate-option",
            Self::UnrecognizedArgument { .. } => "unrecognized-argument",
            Self::InvalidValue { .. } => "invalid-value",
            Self::Schema(_) => "invalid-schema",
        }
    }

    /// The raw token that caused the error, if any.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::UnknownOption { token }
            | Self::UnexpectedValue { token, .. }
            | Self::MissingValue { token }
            | Self::DuplicateOption { token, .. }
            | Self::UnrecognizedArgument { token }
            | Self::InvalidValue { token, .. } => Some(token),
            Self::Schema(_) => None,
        }
    }
}
