//! # Model Entities
//!
//! A [`ModelEntity`] is an identified bag of attribute values whose every
//! write is checked against the attribute's declared descriptor. It is the
//! enforcement point of the engine: no value enters an entity unchecked.
//!
//! ## Id-only placeholders
//!
//! An entity created with [`ModelEntity::id_only`] stands in for an entity
//! whose content was not loaded. Its identity and schema are readable; any
//! read or write of attribute content fails with [`EntityError::IdOnly`].
//!
//! ## Concurrency
//!
//! Writes take `&mut self`, so concurrent writers need the owner's own
//! synchronization. The schema is shared behind an `Arc` and never mutated.

use std::collections::BTreeMap;
use std::sync::Arc;

use detyped_core::EntityId;
use detyped_types::{Value, ValueShape};

use crate::error::EntityError;
use crate::info::EntityTypeInfo;

/// An identified, schema-checked attribute container.
#[derive(Debug, Clone)]
pub struct ModelEntity {
    id: EntityId,
    info: Arc<dyn EntityTypeInfo>,
    id_only: bool,
    attributes: BTreeMap<String, Value>,
}

impl ModelEntity {
    /// A full entity, initially without attribute values.
    pub fn new(id: EntityId, info: Arc<dyn EntityTypeInfo>) -> Self {
        Self {
            id,
            info,
            id_only: false,
            attributes: BTreeMap::new(),
        }
    }

    /// A placeholder carrying identity only.
    pub fn id_only(id: EntityId, info: Arc<dyn EntityTypeInfo>) -> Self {
        Self {
            id_only: true,
            ..Self::new(id, info)
        }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// The schema.
    pub fn info(&self) -> &dyn EntityTypeInfo {
        self.info.as_ref()
    }

    pub fn is_id_only(&self) -> bool {
        self.id_only
    }

    fn check_content(&self) -> Result<(), EntityError> {
        if self.id_only {
            return Err(EntityError::IdOnly(self.id.to_string()));
        }
        Ok(())
    }

    /// Store `value` under `name`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// - [`EntityError::IdOnly`] on a placeholder.
    /// - [`EntityError::UndeclaredAttribute`] if the schema does not
    ///   declare `name`.
    /// - [`EntityError::RejectedValue`] if `value` is not an instance of
    ///   the declared descriptor.
    ///
    /// On error the entity is unchanged.
    pub fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), EntityError> {
        self.check_content()?;
        let Some(attribute) = self.info.attribute_info(name) else {
            tracing::debug!(entity = %self.id, attribute = name, "undeclared attribute");
            return Err(EntityError::UndeclaredAttribute {
                type_name: self.info.type_name().to_string(),
                attribute: name.to_string(),
            });
        };
        if !attribute.meta_type().is_value(&value) {
            tracing::debug!(
                entity = %self.id,
                attribute = name,
                value_kind = value.kind_name(),
                "attribute value rejected"
            );
            return Err(EntityError::RejectedValue {
                attribute: name.to_string(),
                expected: attribute.meta_type().to_string(),
            });
        }
        self.attributes.insert(name.to_string(), value);
        Ok(())
    }

    /// The stored value, or `None` if the attribute has not been set.
    pub fn attribute(&self, name: &str) -> Result<Option<&Value>, EntityError> {
        self.check_content()?;
        Ok(self.attributes.get(name))
    }

    /// The stored value narrowed to `T`.
    ///
    /// # Errors
    ///
    /// [`EntityError::TypeMismatch`] if the stored value is not a `T`.
    pub fn attribute_as<'a, T>(&'a self, name: &str) -> Result<Option<T>, EntityError>
    where
        T: ValueShape<'a>,
    {
        let Some(value) = self.attribute(name)? else {
            return Ok(None);
        };
        T::from_value(value)
            .map(Some)
            .ok_or_else(|| EntityError::TypeMismatch {
                attribute: name.to_string(),
                expected: T::SHAPE,
                actual: value.untagged().kind_name(),
            })
    }

    /// Names of the attributes that have been set, in name order.
    pub fn attribute_names(&self) -> Result<Vec<&str>, EntityError> {
        self.check_content()?;
        Ok(self.attributes.keys().map(String::as_str).collect())
    }
}
