//! # Entity Schemas
//!
//! An entity's schema declares which attributes it may carry and the
//! descriptor each attribute's values must satisfy. Entities only read
//! their schema; it is shared, immutable, and may be provided by anything
//! that implements [`EntityTypeInfo`].

use std::fmt;
use std::sync::Arc;

use detyped_core::error::is_blank;
use detyped_core::{IdentifierType, Named, NamedComparator};
use detyped_types::MetaType;

use crate::error::EntityError;

/// One declared attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityAttributeInfo {
    name: String,
    description: Option<String>,
    meta_type: Arc<MetaType>,
}

impl EntityAttributeInfo {
    /// The attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The description, falling back to the attribute name.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.name)
    }

    /// The descriptor every value of this attribute must satisfy.
    pub fn meta_type(&self) -> &MetaType {
        &self.meta_type
    }
}

impl Named for EntityAttributeInfo {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Schema provider consulted by entities.
pub trait EntityTypeInfo: fmt::Debug + Send + Sync {
    /// Name of the entity type.
    fn type_name(&self) -> &str;

    /// The identifier type of entities of this type.
    fn identifier_type(&self) -> &IdentifierType;

    /// The declared attribute, or `None` if `name` is not declared.
    fn attribute_info(&self, name: &str) -> Option<&EntityAttributeInfo>;

    /// Declared attribute names.
    fn attribute_names(&self) -> Vec<&str>;
}

/// The shipped schema: a fixed, name-ordered set of attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntityInfo {
    type_name: String,
    identifier_type: IdentifierType,
    attributes: Vec<EntityAttributeInfo>,
}

impl ModelEntityInfo {
    pub fn builder(
        type_name: impl Into<String>,
        identifier_type: IdentifierType,
    ) -> ModelEntityInfoBuilder {
        ModelEntityInfoBuilder {
            type_name: type_name.into(),
            identifier_type,
            attributes: Vec::new(),
        }
    }

    /// Attributes in name order.
    pub fn attributes(&self) -> &[EntityAttributeInfo] {
        &self.attributes
    }
}

impl EntityTypeInfo for ModelEntityInfo {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn identifier_type(&self) -> &IdentifierType {
        &self.identifier_type
    }

    fn attribute_info(&self, name: &str) -> Option<&EntityAttributeInfo> {
        self.attributes
            .binary_search_by(|a| NamedComparator::INSTANCE.compare(a, name))
            .ok()
            .map(|i| &self.attributes[i])
    }

    fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(EntityAttributeInfo::name).collect()
    }
}

/// Accumulates attribute declarations for a [`ModelEntityInfo`].
#[derive(Debug, Clone)]
pub struct ModelEntityInfoBuilder {
    type_name: String,
    identifier_type: IdentifierType,
    attributes: Vec<EntityAttributeInfo>,
}

impl ModelEntityInfoBuilder {
    /// Declare an attribute.
    ///
    /// # Errors
    ///
    /// [`EntityError::BlankAttributeName`] or
    /// [`EntityError::DuplicateAttribute`].
    pub fn attribute(
        &mut self,
        name: impl Into<String>,
        meta_type: impl Into<Arc<MetaType>>,
    ) -> Result<&mut Self, EntityError> {
        self.push(name.into(), None, meta_type.into())
    }

    /// Declare an attribute with a description.
    ///
    /// # Errors
    ///
    /// As [`Self::attribute`], plus [`EntityError::BlankDescription`].
    pub fn attribute_with_description(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        meta_type: impl Into<Arc<MetaType>>,
    ) -> Result<&mut Self, EntityError> {
        let name = name.into();
        let description = description.into();
        if is_blank(&description) {
            return Err(EntityError::BlankDescription(name));
        }
        self.push(name, Some(description), meta_type.into())
    }

    fn push(
        &mut self,
        name: String,
        description: Option<String>,
        meta_type: Arc<MetaType>,
    ) -> Result<&mut Self, EntityError> {
        if is_blank(&name) {
            return Err(EntityError::BlankAttributeName);
        }
        if self.attributes.iter().any(|a| a.name == name) {
            return Err(EntityError::DuplicateAttribute {
                type_name: self.type_name.clone(),
                attribute: name,
            });
        }
        self.attributes.push(EntityAttributeInfo {
            name,
            description,
            meta_type,
        });
        Ok(self)
    }

    /// Produce the schema. An entity type with no attributes is allowed;
    /// its entities carry identity only.
    pub fn build(&self) -> Result<ModelEntityInfo, EntityError> {
        if is_blank(&self.type_name) {
            return Err(EntityError::BlankTypeName);
        }
        let mut attributes = self.attributes.clone();
        NamedComparator::INSTANCE.sort(&mut attributes);
        Ok(ModelEntityInfo {
            type_name: self.type_name.clone(),
            identifier_type: self.identifier_type.clone(),
            attributes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use detyped_types::SimpleMetaType;

    fn server_info() -> ModelEntityInfo {
        ModelEntityInfo::builder("server", IdentifierType::new("server").unwrap())
            .attribute("port", SimpleMetaType::integer())
            .unwrap()
            .attribute_with_description("host", "bind address", SimpleMetaType::string())
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn attributes_are_name_ordered() {
        assert_eq!(server_info().attribute_names(), ["host", "port"]);
    }

    #[test]
    fn lookup_declared_attribute() {
        let info = server_info();
        let port = info.attribute_info("port").unwrap();
        assert_eq!(port.meta_type(), &MetaType::from(SimpleMetaType::integer()));
        assert_eq!(port.description(), "port");
        assert_eq!(info.attribute_info("host").unwrap().description(), "bind address");
        assert!(info.attribute_info("colour").is_none());
        assert_eq!(info.identifier_type().as_str(), "server");
    }

    #[test]
    fn duplicate_attribute_rejected() {
        let mut b = ModelEntityInfo::builder("server", IdentifierType::new("server").unwrap());
        b.attribute("port", SimpleMetaType::integer()).unwrap();
        let err = b.attribute("port", SimpleMetaType::long()).unwrap_err();
        assert_eq!(
            err,
            EntityError::DuplicateAttribute {
                type_name: "server".into(),
                attribute: "port".into()
            }
        );
    }

    #[test]
    fn blank_names_rejected() {
        let mut b = ModelEntityInfo::builder(" ", IdentifierType::new("server").unwrap());
        assert_eq!(
            b.attribute("", SimpleMetaType::integer()).unwrap_err(),
            EntityError::BlankAttributeName
        );
        assert_eq!(b.build().unwrap_err(), EntityError::BlankTypeName);
    }

    #[test]
    fn blank_description_rejected() {
        let mut b = ModelEntityInfo::builder("server", IdentifierType::new("server").unwrap());
        let err = b
            .attribute_with_description("host", "  ", SimpleMetaType::string())
            .unwrap_err();
        assert_eq!(err, EntityError::BlankDescription("host".into()));
        assert!(b.build().unwrap().attribute_names().is_empty());
    }
}
