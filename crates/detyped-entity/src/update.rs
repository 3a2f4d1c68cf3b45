//! # Update Operations
//!
//! A [`ModelUpdate`] describes one operation invocation against an entity:
//! where (the address), what (the operation name), and with which
//! parameters. Its [`UpdateIdentifier`] groups updates by operation and by
//! the identifier types of the target address, independent of node names.

use detyped_core::{EntityAddress, UpdateIdentifier};
use detyped_types::Value;

use crate::error::EntityError;

/// An immutable operation invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelUpdate {
    address: EntityAddress,
    operation_id: String,
    params: Vec<Value>,
    identifier: UpdateIdentifier,
}

impl ModelUpdate {
    /// Describe `operation_id` applied at `address`.
    ///
    /// A missing parameter list is stored as an empty one.
    ///
    /// # Errors
    ///
    /// [`detyped_core::ValidationError::BlankOperation`] for a blank operation
    /// name.
    pub fn new(
        address: EntityAddress,
        operation_id: impl Into<String>,
        params: impl Into<Option<Vec<Value>>>,
    ) -> Result<Self, EntityError> {
        let operation_id = operation_id.into();
        let identifier = UpdateIdentifier::new(address.entity_id_types(), operation_id.as_str())?;
        Ok(Self {
            address,
            operation_id,
            params: params.into().unwrap_or_default(),
            identifier,
        })
    }

    /// The target entity's address.
    pub fn address(&self) -> &EntityAddress {
        &self.address
    }

    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }

    /// The parameters, possibly empty.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// The operation identifier derived from the address's identifier
    /// types and the operation name.
    pub fn update_identifier(&self) -> &UpdateIdentifier {
        &self.identifier
    }
}
