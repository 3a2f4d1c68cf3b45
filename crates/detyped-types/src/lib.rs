//! # detyped-types — Runtime Type Descriptors
//!
//! Describes the shape of management-model data as first-class values
//! ("meta-types") and answers one question about arbitrary data: is this
//! value an instance of this descriptor?
//!
//! ## Components
//!
//! - **Encoding** (`encoding.rs`): the bracket-prefixed array grammar
//!   (`[I`, `[[LString;`). Pure syntax, no policy.
//!
//! - **Allow-list** (`allow_list.rs`): the injected set of permitted base
//!   class names, with YAML configuration.
//!
//! - **Meta-types** (`meta_type/`): a closed union over the six descriptor
//!   shapes. Every shape validates its header (class, type name,
//!   description) through one constructor, used both for fresh construction
//!   and for deserialization.
//!
//! - **Values** (`value.rs`): raw values, values tagged with their
//!   descriptor, and narrowing reads.
//!
//! ## Concurrency
//!
//! Descriptors are immutable once built and are `Send + Sync`. Derived
//! data (a collection's hash and rendering) is computed at construction,
//! so there is no write-after-construction state at all.

pub mod allow_list;
pub mod encoding;
pub mod error;
pub mod meta_type;
pub mod value;

pub use allow_list::{AllowList, AllowListConfig};
pub use encoding::{ArrayEncoding, ElementEncoding, PrimitiveCode};
pub use error::TypeError;
pub use meta_type::{
    ArrayMetaType, CollectionMetaType, CompositeItem, CompositeMetaType, CompositeTypeBuilder,
    EnumMetaType, MetaType, MetaTypeRepr, SimpleKind, SimpleMetaType, TableMetaType, TypeHeader,
};
pub use value::{MetaValue, MetaValueRepr, Value, ValueShape};
