//! Defines [`GeoError`], representing all errors returned by this crate.

use std::fmt::Debug;

use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoError {
    /// Textual or binary input does not match its grammar: a missing delimiter, a truncated
    /// stream or a non-numeric value in a numeric field.
    #[error("Malformed input: {0}")]
    MalformedSyntax(String),

    /// The input matched its grammar but a geometry invariant failed, e.g. an unclosed polygon
    /// ring or a coordinate tuple of the wrong arity for the declared dimension.
    #[error("Structural violation: {0}")]
    StructuralViolation(String),

    /// A geometry kind or format the codec has no mapping for.
    #[error("Unsupported variant: {0}")]
    UnsupportedVariant(String),

    /// A feature property was requested as a type it does not have.
    #[error("type assertion of `{key}` to {expected} failed")]
    TypeAssertion {
        /// Property key.
        key: String,
        /// Name of the requested type.
        expected: &'static str,
    },

    /// A feature id was neither a supported number nor a decimal string.
    #[error("no convert feature id: {0}")]
    IdentifierConversion(String),

    /// [serde_json::Error]
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// [std::io::Error]
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GeoError>;
