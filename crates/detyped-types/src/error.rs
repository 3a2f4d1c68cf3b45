//! Errors raised while building, checking, or reloading descriptors.

use detyped_core::{Classify, ErrorKind};
use thiserror::Error;

/// Error during descriptor construction, value tagging, or reconstruction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Class name is empty or whitespace.
    #[error("null or empty class name")]
    BlankClassName,

    /// Type name is empty or whitespace.
    #[error("null or empty type name")]
    BlankTypeName,

    /// Description is empty or whitespace.
    #[error("null or empty description")]
    BlankDescription,

    /// The class name is not a well-formed array encoding.
    #[error("invalid array declaration: \"{0}\"")]
    InvalidEncoding(String),

    /// The base class of the class name is not permitted.
    #[error("not an allowed class name: \"{0}\"")]
    ClassNotAllowed(String),

    /// The class name is valid but does not fit the descriptor shape
    /// being built (e.g. an array class for a simple type).
    #[error("class \"{class_name}\" cannot describe a {expected} type")]
    WrongShape {
        /// The offending class name.
        class_name: String,
        /// The shape that was being built.
        expected: &'static str,
    },

    /// Array dimension outside `1..=MAX_DIMENSION`.
    #[error("invalid array dimension {0}: must be between 1 and 255")]
    InvalidDimension(usize),

    /// Array element types are never arrays; use the dimension instead.
    #[error("array element type must not itself be an array: \"{0}\"")]
    NestedArray(String),

    /// Composite item name is empty or whitespace.
    #[error("null or empty item name")]
    BlankItemName,

    /// The same item name was added twice to a composite.
    #[error("duplicate item \"{item}\" in composite type \"{type_name}\"")]
    DuplicateItem {
        /// The composite being built.
        type_name: String,
        /// The repeated item name.
        item: String,
    },

    /// A composite must declare at least one item.
    #[error("composite type \"{0}\" must declare at least one item")]
    EmptyComposite(String),

    /// An enum must declare at least one legal value.
    #[error("enum type \"{0}\" must declare at least one value")]
    EmptyEnum(String),

    /// Enum values must be non-blank and unique.
    #[error("invalid enum value \"{value}\" in \"{type_name}\": blank or duplicate")]
    InvalidEnumValue {
        /// The enum being built.
        type_name: String,
        /// The rejected value.
        value: String,
    },

    /// A table must index at least one column.
    #[error("table type \"{0}\" must declare at least one index column")]
    EmptyIndex(String),

    /// Table index columns must be items of the row type.
    #[error("index column \"{column}\" is not an item of row type \"{row_type}\"")]
    UnknownIndexColumn {
        /// The row type's name.
        row_type: String,
        /// The missing column.
        column: String,
    },

    /// A value offered for tagging was rejected by its descriptor.
    #[error("value is not an instance of \"{type_name}\"")]
    NotAnInstance {
        /// The descriptor's type name.
        type_name: String,
    },

    /// The allow-list configuration could not be read or was invalid.
    #[error("allow-list configuration error: {0}")]
    AllowList(String),

    /// A persisted descriptor failed re-validation on load.
    #[error("unexpected error deserializing meta type \"{class_name}\": {source}")]
    Reconstruction {
        /// The class name found in the persisted form.
        class_name: String,
        /// The validation failure.
        #[source]
        source: Box<TypeError>,
    },
}

impl TypeError {
    /// Wrap a validation failure raised while reloading `class_name`.
    pub(crate) fn reconstruction(class_name: impl Into<String>, source: TypeError) -> Self {
        Self::Reconstruction {
            class_name: class_name.into(),
            source: Box::new(source),
        }
    }
}

impl Classify for TypeError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Reconstruction { .. } => ErrorKind::Reconstruction,
            _ => ErrorKind::InvalidArgument,
        }
    }
}
