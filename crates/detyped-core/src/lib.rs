#![deny(missing_docs)]

//! # detyped-core — Foundational Types for the Detyped Model
//!
//! This crate is the leaf of the detyped workspace. It defines the pieces
//! every other crate agrees on: how failures are classified, how entities
//! are identified and addressed, and how named things are ordered.
//!
//! ## Key Design Principles
//!
//! 1. **One error taxonomy.** Every error type in the workspace classifies
//!    itself into an [`ErrorKind`] through the [`Classify`] trait, so
//!    callers can tell caller mistakes from misuse of placeholders without
//!    matching on crate-specific variants.
//!
//! 2. **Validated identity newtypes.** `IdentifierType`, `EntityId`,
//!    `EntityAddress` reject blank input at construction and at
//!    deserialization. No bare strings for identifiers.
//!
//! 3. **Shared stateless ordering.** [`NamedComparator::INSTANCE`] is the
//!    single comparator for anything that carries a name.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `detyped-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod name;

// Re-export primary types for ergonomic imports.
pub use error::{Classify, ErrorKind, ValidationError};
pub use identity::{EntityAddress, EntityId, IdentifierType, UpdateIdentifier};
pub use name::{Named, NamedComparator};
