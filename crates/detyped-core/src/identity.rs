//! # Identity Newtypes
//!
//! Names for where an entity lives in the management model and for what is
//! done to it.
//!
//! An [`EntityAddress`] is a non-empty path of [`EntityId`]s. Each element
//! pairs an [`IdentifierType`] (the kind of node, e.g. `host`, `server`,
//! `subsystem`) with a value naming one node of that kind. An
//! [`UpdateIdentifier`] names an operation independently of the concrete
//! node values, so that every update of the same operation on the same kind
//! of entity shares one identifier.
//!
//! ## Validation
//!
//! All types reject blank input at construction time. Deserialization
//! routes through the same constructors, so a persisted identifier that
//! would be rejected when built fresh is rejected when loaded.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{is_blank, ValidationError};

/// Implement `Deserialize` for string newtypes that must validate their
/// contents: deserialize as a plain `String`, then route through `new()`
/// so invalid values are rejected at load time rather than accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// IdentifierType
// ---------------------------------------------------------------------------

/// The kind of a node in an entity address (`host`, `server`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct IdentifierType(String);

impl_validating_deserialize!(IdentifierType);

impl IdentifierType {
    /// Create an identifier type.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankIdentifierType`] for blank input.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if is_blank(&name) {
            return Err(ValidationError::BlankIdentifierType);
        }
        Ok(Self(name))
    }

    /// The type name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// EntityId
// ---------------------------------------------------------------------------

/// One element of an entity address: a node kind and the node's name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "EntityIdRepr")]
pub struct EntityId {
    id_type: IdentifierType,
    value: String,
}

#[derive(Deserialize)]
struct EntityIdRepr {
    id_type: IdentifierType,
    value: String,
}

impl TryFrom<EntityIdRepr> for EntityId {
    type Error = ValidationError;

    fn try_from(repr: EntityIdRepr) -> Result<Self, Self::Error> {
        Self::new(repr.id_type, repr.value)
    }
}

impl EntityId {
    /// Create an entity identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankIdValue`] if `value` is blank.
    pub fn new(id_type: IdentifierType, value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if is_blank(&value) {
            return Err(ValidationError::BlankIdValue {
                id_type: id_type.0,
            });
        }
        Ok(Self { id_type, value })
    }

    /// Shorthand for building both parts from strings.
    pub fn of(id_type: &str, value: &str) -> Result<Self, ValidationError> {
        Self::new(IdentifierType::new(id_type)?, value)
    }

    /// The kind of node this identifier names.
    pub fn id_type(&self) -> &IdentifierType {
        &self.id_type
    }

    /// The node's name.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.id_type, self.value)
    }
}

// ---------------------------------------------------------------------------
// EntityAddress
// ---------------------------------------------------------------------------

/// The location of an entity: the path of ids from the model root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<EntityId>", into = "Vec<EntityId>")]
pub struct EntityAddress(Vec<EntityId>);

impl TryFrom<Vec<EntityId>> for EntityAddress {
    type Error = ValidationError;

    fn try_from(path: Vec<EntityId>) -> Result<Self, Self::Error> {
        Self::new(path)
    }
}

impl From<EntityAddress> for Vec<EntityId> {
    fn from(address: EntityAddress) -> Self {
        address.0
    }
}

impl EntityAddress {
    /// Create an address from its path elements, root first.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyAddress`] for an empty path.
    pub fn new(path: Vec<EntityId>) -> Result<Self, ValidationError> {
        if path.is_empty() {
            return Err(ValidationError::EmptyAddress);
        }
        Ok(Self(path))
    }

    /// The path elements, root first.
    pub fn elements(&self) -> &[EntityId] {
        &self.0
    }

    /// The id of the addressed entity (the last path element).
    pub fn entity_id(&self) -> &EntityId {
        // Non-empty by construction.
        &self.0[self.0.len() - 1]
    }

    /// The identifier types along the path, root first.
    pub fn entity_id_types(&self) -> Vec<IdentifierType> {
        self.0.iter().map(|id| id.id_type.clone()).collect()
    }
}

impl fmt::Display for EntityAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.0 {
            write!(f, "/{element}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// UpdateIdentifier
// ---------------------------------------------------------------------------

/// Names an operation on a kind of entity, independent of node values.
///
/// Two updates invoking the same operation on entities whose addresses have
/// the same identifier types share an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "UpdateIdentifierRepr")]
pub struct UpdateIdentifier {
    id_types: Vec<IdentifierType>,
    operation_id: String,
}

#[derive(Deserialize)]
struct UpdateIdentifierRepr {
    id_types: Vec<IdentifierType>,
    operation_id: String,
}

impl TryFrom<UpdateIdentifierRepr> for UpdateIdentifier {
    type Error = ValidationError;

    fn try_from(repr: UpdateIdentifierRepr) -> Result<Self, Self::Error> {
        Self::new(repr.id_types, repr.operation_id)
    }
}

impl UpdateIdentifier {
    /// Derive an identifier from the identifier types of an address and an
    /// operation name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankOperation`] if `operation_id` is blank.
    pub fn new(
        id_types: Vec<IdentifierType>,
        operation_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let operation_id = operation_id.into();
        if is_blank(&operation_id) {
            return Err(ValidationError::BlankOperation(operation_id));
        }
        Ok(Self {
            id_types,
            operation_id,
        })
    }

    /// The identifier types, root first.
    pub fn id_types(&self) -> &[IdentifierType] {
        &self.id_types
    }

    /// The operation name.
    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }
}

impl fmt::Display for UpdateIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path: Vec<&str> = self.id_types.iter().map(IdentifierType::as_str).collect();
        write!(f, "{}:{}", path.join("/"), self.operation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> EntityAddress {
        EntityAddress::new(vec![
            EntityId::of("host", "master").unwrap(),
            EntityId::of("server", "one").unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_blank_identifier_type_rejected() {
        assert_eq!(
            IdentifierType::new("  ").unwrap_err(),
            ValidationError::BlankIdentifierType
        );
    }

    #[test]
    fn test_blank_id_value_rejected() {
        let err = EntityId::of("host", "").unwrap_err();
        assert!(matches!(err, ValidationError::BlankIdValue { .. }));
    }

    #[test]
    fn test_empty_address_rejected() {
        assert_eq!(
            EntityAddress::new(vec![]).unwrap_err(),
            ValidationError::EmptyAddress
        );
    }

    #[test]
    fn test_entity_id_types_follow_path() {
        let types = address().entity_id_types();
        let names: Vec<&str> = types.iter().map(IdentifierType::as_str).collect();
        assert_eq!(names, ["host", "server"]);
    }

    #[test]
    fn test_entity_id_is_last_element() {
        assert_eq!(address().entity_id().value(), "one");
    }

    #[test]
    fn test_address_display() {
        assert_eq!(address().to_string(), "/host=master/server=one");
    }

    #[test]
    fn test_blank_operation_rejected() {
        let err = UpdateIdentifier::new(address().entity_id_types(), " ").unwrap_err();
        assert_eq!(err, ValidationError::BlankOperation(" ".into()));
    }

    #[test]
    fn test_update_identifier_display() {
        let id = UpdateIdentifier::new(address().entity_id_types(), "reload").unwrap();
        assert_eq!(id.to_string(), "host/server:reload");
    }

    #[test]
    fn test_update_identifier_ignores_node_values() {
        let other = EntityAddress::new(vec![
            EntityId::of("host", "slave").unwrap(),
            EntityId::of("server", "two").unwrap(),
        ])
        .unwrap();
        let a = UpdateIdentifier::new(address().entity_id_types(), "reload").unwrap();
        let b = UpdateIdentifier::new(other.entity_id_types(), "reload").unwrap();
        assert_eq!(a, b);
    }

    // ── Serialization tests ──────────────────────────────────────────

    #[test]
    fn test_address_serde_roundtrip() {
        let json = serde_json::to_string(&address()).unwrap();
        let parsed: EntityAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, address());
    }

    #[test]
    fn test_deserialize_rejects_blank_identifier_type() {
        let result: Result<IdentifierType, _> = serde_json::from_str("\" \"");
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_blank_id_value() {
        let result: Result<EntityId, _> =
            serde_json::from_str(r#"{"id_type":"host","value":""}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_empty_address() {
        let result: Result<EntityAddress, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }
}
