//! # Meta-Types
//!
//! A closed union over the descriptor shapes of the detyped model:
//!
//! ```text
//! MetaType
//!  ├── Simple       scalar class (String, Integer, int, Date, ...)
//!  ├── Array        N-dimension array of a non-array element
//!  ├── Collection   homogeneous iterable of one element type
//!  ├── Composite    fixed set of named, typed items
//!  ├── Enum         fixed set of legal string values
//!  └── Table        rows of one composite type, keyed by index columns
//! ```
//!
//! Every shape carries a [`TypeHeader`] of {class name, type name,
//! description, is-array}. The header is validated once, by
//! [`TypeHeader::checked`] or [`TypeHeader::exempt`]; deserialization goes
//! through the same constructors via [`MetaTypeRepr`], so there is no second
//! validation path.
//!
//! Capability predicates are exhaustive matches over the union. `is_array`
//! is the one exception: it is read from the header, where the array
//! parser fixed it at construction.

mod array;
mod collection;
mod composite;
mod enumeration;
mod repr;
mod simple;
mod table;

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use detyped_core::error::is_blank;

use crate::allow_list::AllowList;
use crate::encoding;
use crate::error::TypeError;
use crate::value::{MetaValue, Value};

pub use array::ArrayMetaType;
pub use collection::CollectionMetaType;
pub use composite::{CompositeItem, CompositeMetaType, CompositeTypeBuilder};
pub use enumeration::EnumMetaType;
pub use repr::{CompositeItemRepr, MetaTypeRepr};
pub use simple::{SimpleKind, SimpleMetaType};
pub use table::TableMetaType;

// ─── Header ──────────────────────────────────────────────────────────

/// The attributes shared by every descriptor shape.
///
/// Immutable once built. Equality of descriptors is defined per shape, not
/// on the header, so the header itself does not implement `PartialEq`.
#[derive(Debug, Clone)]
pub struct TypeHeader {
    class_name: String,
    type_name: String,
    description: String,
    array: bool,
}

impl TypeHeader {
    /// Validate a header whose base class must be permitted by `allow`.
    ///
    /// # Errors
    ///
    /// - [`TypeError::BlankClassName`], [`TypeError::BlankTypeName`],
    ///   [`TypeError::BlankDescription`] for blank strings.
    /// - [`TypeError::InvalidEncoding`] for a malformed array encoding.
    /// - [`TypeError::ClassNotAllowed`] if the base class is neither listed
    ///   nor a primitive letter.
    pub fn checked(
        class_name: impl Into<String>,
        type_name: impl Into<String>,
        description: impl Into<String>,
        allow: &AllowList,
    ) -> Result<Self, TypeError> {
        Self::validate(class_name.into(), type_name.into(), description.into(), Some(allow))
    }

    /// Validate a header that is exempt from the base-class check.
    ///
    /// Collections use this: their element type carries its own validity.
    pub fn exempt(
        class_name: impl Into<String>,
        type_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TypeError> {
        Self::validate(class_name.into(), type_name.into(), description.into(), None)
    }

    fn validate(
        class_name: String,
        type_name: String,
        description: String,
        allow: Option<&AllowList>,
    ) -> Result<Self, TypeError> {
        let result = Self::check(&class_name, &type_name, &description, allow);
        match result {
            Ok(array) => Ok(Self {
                class_name,
                type_name,
                description,
                array,
            }),
            Err(err) => {
                tracing::debug!(class_name = %class_name, error = %err, "rejected meta type");
                Err(err)
            }
        }
    }

    /// Returns the array flag for a valid header.
    fn check(
        class_name: &str,
        type_name: &str,
        description: &str,
        allow: Option<&AllowList>,
    ) -> Result<bool, TypeError> {
        if is_blank(class_name) {
            return Err(TypeError::BlankClassName);
        }
        if is_blank(type_name) {
            return Err(TypeError::BlankTypeName);
        }
        if is_blank(description) {
            return Err(TypeError::BlankDescription);
        }
        let Some(allow) = allow else {
            return Ok(false);
        };

        let parsed = encoding::parse(class_name)
            .ok_or_else(|| TypeError::InvalidEncoding(class_name.to_string()))?;
        if !allow.accepts_base(parsed.base_class_name()) {
            return Err(TypeError::ClassNotAllowed(class_name.to_string()));
        }
        Ok(parsed.is_array())
    }

    /// A header for names known to be valid. Callers guarantee the
    /// invariants [`TypeHeader::checked`] would enforce.
    pub(crate) fn trusted(class_name: &str, type_name: &str, description: &str) -> Self {
        Self {
            class_name: class_name.to_string(),
            type_name: type_name.to_string(),
            description: description.to_string(),
            array: false,
        }
    }

    /// The implementing class name.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The type name (defaults to the class name).
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The human-readable description (defaults to the class name).
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the class name is an array encoding.
    pub fn is_array(&self) -> bool {
        self.array
    }
}

// ─── MetaType ────────────────────────────────────────────────────────

/// A runtime descriptor of a value shape.
///
/// Equality is structural and defined per shape; descriptors of different
/// shapes are never equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MetaTypeRepr", into = "MetaTypeRepr")]
pub enum MetaType {
    Simple(SimpleMetaType),
    Array(ArrayMetaType),
    Collection(CollectionMetaType),
    Composite(CompositeMetaType),
    Enum(EnumMetaType),
    Table(TableMetaType),
}

impl MetaType {
    /// The shared header.
    pub fn header(&self) -> &TypeHeader {
        match self {
            Self::Simple(t) => t.header(),
            Self::Array(t) => t.header(),
            Self::Collection(t) => t.header(),
            Self::Composite(t) => t.header(),
            Self::Enum(t) => t.header(),
            Self::Table(t) => t.header(),
        }
    }

    /// The implementing class name.
    pub fn class_name(&self) -> &str {
        self.header().class_name()
    }

    /// The type name.
    pub fn type_name(&self) -> &str {
        self.header().type_name()
    }

    /// The description.
    pub fn description(&self) -> &str {
        self.header().description()
    }

    /// Whether the class name is an array encoding.
    pub fn is_array(&self) -> bool {
        self.header().is_array()
    }

    /// Whether this is a simple descriptor.
    pub fn is_simple(&self) -> bool {
        matches!(self, Self::Simple(_))
    }

    /// Whether this is a collection descriptor.
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }

    /// Whether this is a composite descriptor.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(_))
    }

    /// Whether this is an enum descriptor.
    pub fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }

    /// Whether this is a table descriptor.
    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table(_))
    }

    /// Short name of the shape, for diagnostics.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Simple(_) => "simple",
            Self::Array(_) => "array",
            Self::Collection(_) => "collection",
            Self::Composite(_) => "composite",
            Self::Enum(_) => "enum",
            Self::Table(_) => "table",
        }
    }

    /// The simple descriptor, if this is one.
    pub fn as_simple(&self) -> Option<&SimpleMetaType> {
        match self {
            Self::Simple(t) => Some(t),
            _ => None,
        }
    }

    /// The array descriptor, if this is one.
    pub fn as_array(&self) -> Option<&ArrayMetaType> {
        match self {
            Self::Array(t) => Some(t),
            _ => None,
        }
    }

    /// The collection descriptor, if this is one.
    pub fn as_collection(&self) -> Option<&CollectionMetaType> {
        match self {
            Self::Collection(t) => Some(t),
            _ => None,
        }
    }

    /// The composite descriptor, if this is one.
    pub fn as_composite(&self) -> Option<&CompositeMetaType> {
        match self {
            Self::Composite(t) => Some(t),
            _ => None,
        }
    }

    /// The enum descriptor, if this is one.
    pub fn as_enum(&self) -> Option<&EnumMetaType> {
        match self {
            Self::Enum(t) => Some(t),
            _ => None,
        }
    }

    /// The table descriptor, if this is one.
    pub fn as_table(&self) -> Option<&TableMetaType> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Nominal check: `value` is tagged with a descriptor equal to this one.
    pub fn describes(&self, value: &MetaValue) -> bool {
        value.meta_type() == self
    }

    /// Whether `candidate` is an instance of this descriptor.
    ///
    /// `Null` is never an instance. A value already tagged with a descriptor
    /// is an instance iff that descriptor equals this one; its content is not
    /// re-checked. Raw values are checked structurally by the shape.
    pub fn is_value(&self, candidate: &Value) -> bool {
        match candidate {
            Value::Null => false,
            Value::Typed(tagged) => self.describes(tagged),
            raw => match self {
                Self::Simple(t) => t.accepts_raw(raw),
                Self::Array(t) => t.accepts_raw(raw),
                Self::Collection(t) => t.accepts_raw(raw),
                Self::Composite(t) => t.accepts_raw(raw),
                Self::Enum(t) => t.accepts_raw(raw),
                Self::Table(t) => t.accepts_raw(raw),
            },
        }
    }
}

impl fmt::Display for MetaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple(t) => fmt::Display::fmt(t, f),
            Self::Array(t) => fmt::Display::fmt(t, f),
            Self::Collection(t) => fmt::Display::fmt(t, f),
            Self::Composite(t) => fmt::Display::fmt(t, f),
            Self::Enum(t) => fmt::Display::fmt(t, f),
            Self::Table(t) => fmt::Display::fmt(t, f),
        }
    }
}

macro_rules! impl_from_shape {
    ($($shape:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$shape> for MetaType {
                fn from(t: $shape) -> Self {
                    Self::$variant(t)
                }
            }

            impl From<$shape> for Arc<MetaType> {
                fn from(t: $shape) -> Self {
                    Arc::new(MetaType::$variant(t))
                }
            }
        )*
    };
}

impl_from_shape!(
    SimpleMetaType => Simple,
    ArrayMetaType => Array,
    CollectionMetaType => Collection,
    CompositeMetaType => Composite,
    EnumMetaType => Enum,
    TableMetaType => Table,
);

/// Hash of a single value with the std hasher, for cached hash fields.
pub(crate) fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> MetaType {
        SimpleMetaType::integer().into()
    }

    #[test]
    fn test_blank_strings_rejected() {
        let allow = AllowList::standard();
        assert_eq!(
            TypeHeader::checked("", "t", "d", allow).unwrap_err(),
            TypeError::BlankClassName
        );
        assert_eq!(
            TypeHeader::checked("String", "  ", "d", allow).unwrap_err(),
            TypeError::BlankTypeName
        );
        assert_eq!(
            TypeHeader::checked("String", "t", "\t", allow).unwrap_err(),
            TypeError::BlankDescription
        );
        assert_eq!(
            TypeHeader::exempt(" ", "t", "d").unwrap_err(),
            TypeError::BlankClassName
        );
    }

    #[test]
    fn test_primitive_letter_is_valid_non_array() {
        let h = TypeHeader::checked("I", "I", "I", AllowList::standard()).unwrap();
        assert!(!h.is_array());
    }

    #[test]
    fn test_primitive_array_header() {
        let h = TypeHeader::checked("[I", "[I", "[I", AllowList::standard()).unwrap();
        assert!(h.is_array());
        assert_eq!(encoding::base_class_name(h.class_name()), Some("I"));
    }

    #[test]
    fn test_malformed_encoding_rejected() {
        let err = TypeHeader::checked("[LString", "t", "d", AllowList::standard()).unwrap_err();
        assert_eq!(err, TypeError::InvalidEncoding("[LString".into()));
    }

    #[test]
    fn test_unlisted_base_rejected() {
        let err = TypeHeader::checked("[LWidget;", "t", "d", AllowList::standard()).unwrap_err();
        assert_eq!(err, TypeError::ClassNotAllowed("[LWidget;".into()));
    }

    #[test]
    fn test_injected_allow_list_is_used() {
        let allow = AllowList::new(["Widget"]).unwrap();
        assert!(TypeHeader::checked("[LWidget;", "t", "d", &allow).is_ok());
        assert!(TypeHeader::checked("String", "t", "d", &allow).is_err());
    }

    #[test]
    fn test_exempt_header_skips_allow_list() {
        let h = TypeHeader::exempt("Widget", "Widget", "Widget").unwrap();
        assert!(!h.is_array());
    }

    #[test]
    fn test_capabilities_are_exclusive() {
        let types: Vec<MetaType> = vec![
            int(),
            ArrayMetaType::new(1, int()).unwrap().into(),
            CollectionMetaType::new("List", int()).unwrap().into(),
            CompositeMetaType::builder("Point", "A point")
                .add_item("x", int())
                .unwrap()
                .create()
                .unwrap()
                .into(),
            EnumMetaType::new("Color", "Colors", ["RED"]).unwrap().into(),
        ];
        for t in &types {
            let flags = [
                t.is_simple(),
                t.is_collection(),
                t.is_composite(),
                t.is_enum(),
                t.is_table(),
                t.as_array().is_some(),
            ];
            assert_eq!(flags.iter().filter(|f| **f).count(), 1, "{t}");
        }
    }

    #[test]
    fn test_null_is_never_a_value() {
        assert!(!int().is_value(&Value::Null));
        let list: MetaType = CollectionMetaType::new("List", int()).unwrap().into();
        assert!(!list.is_value(&Value::Null));
    }

    #[test]
    fn test_describes_tagged_value() {
        let tagged = MetaValue::new(int(), Value::Int(1)).unwrap();
        assert!(int().describes(&tagged));
        assert!(!MetaType::from(SimpleMetaType::string()).describes(&tagged));
        assert!(int().is_value(&Value::Typed(tagged)));
    }

    #[test]
    fn test_different_shapes_never_equal() {
        let simple = int();
        let array: MetaType = ArrayMetaType::new(1, int()).unwrap().into();
        assert_ne!(simple, array);
    }
}
