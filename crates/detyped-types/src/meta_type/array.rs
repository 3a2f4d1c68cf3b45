//! Array descriptors.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::allow_list::AllowList;
use crate::encoding::{self, ElementEncoding, PrimitiveCode, MAX_DIMENSION};
use crate::error::TypeError;
use crate::value::Value;

use super::{MetaType, SimpleMetaType, TypeHeader};

/// Descriptor of an N-dimension array.
///
/// The class name is derived from the element: `[`×N followed by the
/// primitive letter for primitive arrays, or `L<element class>;` otherwise.
/// Element types are never arrays themselves; depth is the dimension.
#[derive(Debug, Clone)]
pub struct ArrayMetaType {
    header: TypeHeader,
    dimension: usize,
    element: Arc<MetaType>,
    primitive: Option<PrimitiveCode>,
}

impl ArrayMetaType {
    /// An object array, checked against the standard allow-list.
    pub fn new(dimension: usize, element: impl Into<Arc<MetaType>>) -> Result<Self, TypeError> {
        Self::with_allow_list(dimension, element, AllowList::standard())
    }

    /// An object array, checked against `allow`.
    ///
    /// An element named by a bare primitive letter (`I`) encodes the same
    /// class as the primitive array, so it yields [`Self::primitive`].
    pub fn with_allow_list(
        dimension: usize,
        element: impl Into<Arc<MetaType>>,
        allow: &AllowList,
    ) -> Result<Self, TypeError> {
        let element = element.into();
        check_dimension(dimension)?;
        if element.is_array() || element.as_array().is_some() {
            return Err(TypeError::NestedArray(element.class_name().to_string()));
        }
        if let Some(code) = PrimitiveCode::from_base_name(element.class_name()) {
            return Self::primitive(dimension, code);
        }
        let class_name = encoding::encode(element.class_name(), dimension);
        Self::build(class_name, dimension, element, None, allow)
    }

    /// A primitive array (`[I`, `[[Z`, ...).
    pub fn primitive(dimension: usize, code: PrimitiveCode) -> Result<Self, TypeError> {
        check_dimension(dimension)?;
        let class_name = encoding::encode(&code.letter().to_string(), dimension);
        if !code.is_array_element() {
            return Err(TypeError::ClassNotAllowed(class_name));
        }
        let element = Arc::new(MetaType::Simple(SimpleMetaType::of_code(code)));
        Self::build(class_name, dimension, element, Some(code), AllowList::standard())
    }

    /// Rebuild an array descriptor from its encoded class name.
    ///
    /// Primitive encodings give primitive arrays; object encodings give
    /// arrays of the simple type named by the base class.
    pub fn from_class_name(class_name: &str, allow: &AllowList) -> Result<Self, TypeError> {
        let parsed = encoding::parse(class_name)
            .ok_or_else(|| TypeError::InvalidEncoding(class_name.to_string()))?;
        if !parsed.is_array() {
            return Err(TypeError::WrongShape {
                class_name: class_name.to_string(),
                expected: "array",
            });
        }
        match parsed.element() {
            ElementEncoding::Primitive(code) => Self::primitive(parsed.dimension(), code),
            ElementEncoding::Class => {
                let base = parsed.base_class_name();
                let element = SimpleMetaType::with_names(base, base, base, allow)?;
                Self::with_allow_list(parsed.dimension(), MetaType::Simple(element), allow)
            }
        }
    }

    fn build(
        class_name: String,
        dimension: usize,
        element: Arc<MetaType>,
        primitive: Option<PrimitiveCode>,
        allow: &AllowList,
    ) -> Result<Self, TypeError> {
        let description = format!("{dimension}-dimension array of {}", element.type_name());
        let header = TypeHeader::checked(class_name.clone(), class_name, description, allow)?;
        Ok(Self {
            header,
            dimension,
            element,
            primitive,
        })
    }

    pub fn header(&self) -> &TypeHeader {
        &self.header
    }

    /// Number of array levels (at least one).
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The leaf element type.
    pub fn element_type(&self) -> &MetaType {
        &self.element
    }

    /// Shared handle to the leaf element type.
    pub fn element_type_arc(&self) -> &Arc<MetaType> {
        &self.element
    }

    /// Whether leaves are primitives (and so never null).
    pub fn is_primitive_array(&self) -> bool {
        self.primitive.is_some()
    }

    pub(crate) fn accepts_raw(&self, value: &Value) -> bool {
        self.accepts_level(value, self.dimension)
    }

    fn accepts_level(&self, value: &Value, depth: usize) -> bool {
        if depth == 0 {
            return match value {
                Value::Null => self.primitive.is_none(),
                leaf => self.element.is_value(leaf),
            };
        }
        match value {
            Value::List(items) => items.iter().all(|item| self.accepts_level(item, depth - 1)),
            _ => false,
        }
    }
}

fn check_dimension(dimension: usize) -> Result<(), TypeError> {
    if dimension == 0 || dimension > MAX_DIMENSION {
        return Err(TypeError::InvalidDimension(dimension));
    }
    Ok(())
}

impl PartialEq for ArrayMetaType {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension
            && self.primitive.is_some() == other.primitive.is_some()
            && self.element == other.element
    }
}

impl Eq for ArrayMetaType {}

impl Hash for ArrayMetaType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dimension.hash(state);
        self.primitive.is_some().hash(state);
        self.element.hash(state);
    }
}

impl fmt::Display for ArrayMetaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ArrayMetaType{{dimension={} elementType={}}}",
            self.dimension, self.element
        )
    }
}
