//! # detyped-entity — Validated Attribute Containers
//!
//! Entities of the detyped management model: an identity, a schema that
//! declares attributes and their descriptors, and attribute values that
//! are checked against those descriptors on every write.
//!
//! ## Components
//!
//! - **Schemas** (`info.rs`): [`EntityTypeInfo`], the read-only schema
//!   interface, and [`ModelEntityInfo`], its builder-made implementation.
//!
//! - **Entities** (`entity.rs`): [`ModelEntity`], including id-only
//!   placeholders whose content cannot be accessed.
//!
//! - **Updates** (`update.rs`): [`ModelUpdate`], an operation invocation
//!   with its derived [`detyped_core::UpdateIdentifier`].
//!
//! ## Error Policy
//!
//! All fallible operations return [`EntityError`], which classifies into
//! the workspace [`detyped_core::ErrorKind`] taxonomy. A rejected write
//! never modifies the entity.

pub mod entity;
pub mod error;
pub mod info;
pub mod update;

pub use entity::ModelEntity;
pub use error::EntityError;
pub use info::{EntityAttributeInfo, EntityTypeInfo, ModelEntityInfo, ModelEntityInfoBuilder};
pub use update::ModelUpdate;
