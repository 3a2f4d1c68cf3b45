//! Errors raised by entity schemas, entities, and updates.

use detyped_core::{Classify, ErrorKind, ValidationError};
use thiserror::Error;

/// Error while declaring a schema or reading and writing entity content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    /// Entity type name is empty or whitespace.
    #[error("null or empty entity type name")]
    BlankTypeName,

    /// Attribute name is empty or whitespace.
    #[error("null or empty attribute name")]
    BlankAttributeName,

    /// An attribute was declared with an empty or whitespace description.
    #[error("null or empty description for attribute \"{0}\"")]
    BlankDescription(String),

    /// The same attribute was declared twice on a schema.
    #[error("duplicate attribute \"{attribute}\" on entity type \"{type_name}\"")]
    DuplicateAttribute {
        /// The schema being built.
        type_name: String,
        /// The repeated attribute name.
        attribute: String,
    },

    /// The attribute is not declared by the entity's schema.
    #[error("attribute ({attribute}) not declared on \"{type_name}\"")]
    UndeclaredAttribute {
        /// The entity type.
        type_name: String,
        /// The undeclared attribute.
        attribute: String,
    },

    /// The value is not an instance of the attribute's descriptor.
    #[error("invalid attribute value ({attribute}), should be ({expected})")]
    RejectedValue {
        /// The attribute written.
        attribute: String,
        /// Rendering of the declared descriptor.
        expected: String,
    },

    /// A typed read asked for a shape the stored value does not have.
    #[error("attribute ({attribute}) is a {actual} value, not {expected}")]
    TypeMismatch {
        /// The attribute read.
        attribute: String,
        /// The requested shape.
        expected: &'static str,
        /// The stored value's kind.
        actual: &'static str,
    },

    /// Content of an id-only entity was accessed.
    #[error("entity {0} is id-only; content cannot be accessed")]
    IdOnly(String),

    /// Identity validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Classify for EntityError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::IdOnly(_) => ErrorKind::IllegalState,
            Self::Validation(e) => e.kind(),
            Self::BlankTypeName
            | Self::BlankAttributeName
            | Self::BlankDescription(_)
            | Self::DuplicateAttribute { .. }
            | Self::UndeclaredAttribute { .. }
            | Self::RejectedValue { .. } => ErrorKind::InvalidArgument,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy() {
        assert_eq!(
            EntityError::IdOnly("host=a".into()).kind(),
            ErrorKind::IllegalState
        );
        assert_eq!(
            EntityError::TypeMismatch {
                attribute: "port".into(),
                expected: "int",
                actual: "text",
            }
            .kind(),
            ErrorKind::TypeMismatch
        );
        assert_eq!(
            EntityError::from(ValidationError::EmptyAddress).kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn schema_and_write_errors_are_invalid_argument() {
        let errs = [
            EntityError::BlankTypeName,
            EntityError::BlankAttributeName,
            EntityError::BlankDescription("port".into()),
            EntityError::DuplicateAttribute {
                type_name: "server".into(),
                attribute: "port".into(),
            },
            EntityError::UndeclaredAttribute {
                type_name: "server".into(),
                attribute: "colour".into(),
            },
            EntityError::RejectedValue {
                attribute: "port".into(),
                expected: "int".into(),
            },
            EntityError::Validation(ValidationError::BlankOperation(" ".into())),
        ];
        for err in &errs {
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{err}");
        }
    }

    #[test]
    fn messages_name_the_attribute() {
        let err = EntityError::UndeclaredAttribute {
            type_name: "server".into(),
            attribute: "colour".into(),
        };
        assert_eq!(err.to_string(), "attribute (colour) not declared on \"server\"");
    }
}
