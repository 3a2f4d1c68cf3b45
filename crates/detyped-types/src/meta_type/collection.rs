//! Collection descriptors.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::TypeError;
use crate::value::Value;

use super::{hash_of, MetaType, TypeHeader};

/// Descriptor of a homogeneous iterable, parameterized by one element type.
///
/// Collections are exempt from the allow-list: the class name names the
/// container (`List`, `Set`, ...), and the element type carries its own
/// validity.
///
/// The hash and the string form are pure functions of immutable fields and
/// are computed once, at construction.
#[derive(Debug, Clone)]
pub struct CollectionMetaType {
    header: TypeHeader,
    element: Arc<MetaType>,
    cached_hash: u64,
    cached_string: String,
}

impl CollectionMetaType {
    /// A collection named after its class.
    pub fn new(
        class_name: impl Into<String>,
        element: impl Into<Arc<MetaType>>,
    ) -> Result<Self, TypeError> {
        let class_name = class_name.into();
        Self::with_names(class_name.clone(), class_name.clone(), class_name, element)
    }

    /// A collection with an explicit description.
    pub fn with_description(
        class_name: impl Into<String>,
        description: impl Into<String>,
        element: impl Into<Arc<MetaType>>,
    ) -> Result<Self, TypeError> {
        let class_name = class_name.into();
        Self::with_names(class_name.clone(), class_name, description, element)
    }

    /// The general constructor.
    pub fn with_names(
        class_name: impl Into<String>,
        type_name: impl Into<String>,
        description: impl Into<String>,
        element: impl Into<Arc<MetaType>>,
    ) -> Result<Self, TypeError> {
        let header = TypeHeader::exempt(class_name, type_name, description)?;
        let element = element.into();
        let cached_hash = hash_of(header.type_name()).wrapping_add(hash_of(&*element));
        let cached_string = format!(
            "CollectionMetaType{{type={} elementType={}}}",
            header.type_name(),
            element
        );
        Ok(Self {
            header,
            element,
            cached_hash,
            cached_string,
        })
    }

    /// Factory for the common case: a collection class of an element type.
    pub fn collection_type(
        collection_class: impl Into<String>,
        element: impl Into<Arc<MetaType>>,
    ) -> Result<Self, TypeError> {
        Self::new(collection_class, element)
    }

    pub fn header(&self) -> &TypeHeader {
        &self.header
    }

    /// The element type.
    pub fn element_type(&self) -> &MetaType {
        &self.element
    }

    /// Shared handle to the element type.
    pub fn element_type_arc(&self) -> &Arc<MetaType> {
        &self.element
    }

    /// Whether every element is an instance of the element type.
    ///
    /// Stops at the first element that is not; later elements are never
    /// inspected.
    pub fn accepts<'v, I>(&self, elements: I) -> bool
    where
        I: IntoIterator<Item = &'v Value>,
    {
        elements
            .into_iter()
            .all(|element| self.element.is_value(element))
    }

    pub(crate) fn accepts_raw(&self, value: &Value) -> bool {
        match value {
            Value::List(items) => self.accepts(items),
            _ => false,
        }
    }
}

impl PartialEq for CollectionMetaType {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
            || (self.header.type_name() == other.header.type_name()
                && self.element == other.element)
    }
}

impl Eq for CollectionMetaType {}

impl Hash for CollectionMetaType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.cached_hash);
    }
}

impl fmt::Display for CollectionMetaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cached_string)
    }
}
