//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types shared across the Food Compliance Checker. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Token codec errors carry the offending token text.
//! - Vocabulary errors name the rejected value and what was expected.
//! - Crate-specific errors (wizard, analysis, store) live in their crates
//!   and convert into [`FccError`] where a caller needs one type.

use thiserror::Error;

/// Top-level error type for the Food Compliance Checker.
#[derive(Error, Debug)]
pub enum FccError {
    /// A category token could not be built or parsed.
    #[error("category error: {0}")]
    Category(#[from] CategoryError),

    /// A value fell outside a fixed vocabulary (answers, sections, modes).
    #[error("unknown {kind}: {value:?}")]
    UnknownValue {
        /// Which vocabulary was being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error building or decoding a compact category token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    /// The token string was empty.
    #[error("category token is empty")]
    EmptyToken,

    /// A `custom:` token carried no name, or a custom name was blank.
    #[error("custom category name must not be empty")]
    EmptyCustomName,

    /// A `main:sub` token had an empty side.
    #[error("category token {token:?} has an empty main or subcategory segment")]
    EmptySegment {
        /// The malformed token.
        token: String,
    },

    /// A main category identifier contained the `:` separator.
    #[error("main category id {main:?} must not contain ':'")]
    SeparatorInMainId {
        /// The rejected identifier.
        main: String,
    },

    /// A catalog token used the reserved `custom` prefix as its main id.
    #[error("main category id {0:?} is reserved for custom tokens")]
    ReservedMainId(String),

    /// A custom name was supplied for a main category that does not allow one.
    #[error("custom name supplied for main category {main:?}; only {allowed:?} accepts custom names")]
    CustomNameOutsideOther {
        /// The main category that was supplied.
        main: String,
        /// The custom-allowed main category.
        allowed: &'static str,
    },

    /// The custom-allowed main category was used without a custom name.
    #[error("main category {0:?} requires a custom name")]
    MissingCustomName(String),
}
