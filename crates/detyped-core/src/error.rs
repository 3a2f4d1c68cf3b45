//! # Error Hierarchy
//!
//! Error classification shared by the whole detyped workspace, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Every failure in the engine is local and synchronous. Nothing is
//! retried, because nothing is transient: the same inputs always fail the
//! same way. What callers need is the *class* of failure, which
//! [`ErrorKind`] provides.

use std::fmt;

use thiserror::Error;

/// The class of a failure, independent of which crate raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed something the engine cannot accept: a blank name,
    /// a malformed encoding, an undeclared attribute, a value that is not an
    /// instance of its descriptor.
    InvalidArgument,
    /// A typed read asked for a narrower shape than the stored value has.
    TypeMismatch,
    /// Content of an id-only placeholder was accessed.
    IllegalState,
    /// A persisted descriptor or value failed re-validation on load.
    Reconstruction,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::TypeMismatch => "TYPE_MISMATCH",
            Self::IllegalState => "ILLEGAL_STATE",
            Self::Reconstruction => "RECONSTRUCTION",
        };
        f.write_str(s)
    }
}

/// Implemented by every error type in the workspace.
pub trait Classify {
    /// The taxonomy class of this error.
    fn kind(&self) -> ErrorKind;
}

/// Validation errors for identity newtypes.
///
/// These carry the rejected input so a misconfigured caller can be
/// diagnosed from the message alone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Identifier type name is empty or whitespace.
    #[error("invalid identifier type: must be non-blank")]
    BlankIdentifierType,

    /// Entity identifier value is empty or whitespace.
    #[error("invalid entity id for type \"{id_type}\": value must be non-blank")]
    BlankIdValue {
        /// The identifier type the value was offered for.
        id_type: String,
    },

    /// An address must name at least one entity.
    #[error("invalid entity address: must contain at least one element")]
    EmptyAddress,

    /// Operation names are required on updates.
    #[error("invalid operation name: \"{0}\" (must be non-blank)")]
    BlankOperation(String),
}

impl Classify for ValidationError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

/// Returns true when `s` is empty after trimming.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
