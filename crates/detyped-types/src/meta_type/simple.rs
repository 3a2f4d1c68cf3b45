//! Simple (scalar) descriptors.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::allow_list::AllowList;
use crate::encoding::PrimitiveCode;
use crate::error::TypeError;
use crate::value::Value;

use super::TypeHeader;

/// The scalar kinds the value model knows how to check structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SimpleKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    Date,
    Void,
}

impl SimpleKind {
    /// Every kind.
    pub const ALL: [SimpleKind; 11] = [
        Self::Boolean,
        Self::Byte,
        Self::Char,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::String,
        Self::Date,
        Self::Void,
    ];

    /// Resolve a class name: primitive name, boxed name, or primitive letter.
    pub fn from_class_name(name: &str) -> Option<Self> {
        let kind = match name {
            "boolean" | "Boolean" | "Z" => Self::Boolean,
            "byte" | "Byte" | "B" => Self::Byte,
            "char" | "Character" | "C" => Self::Char,
            "short" | "Short" | "S" => Self::Short,
            "int" | "Integer" | "I" => Self::Int,
            "long" | "Long" | "J" => Self::Long,
            "float" | "Float" | "F" => Self::Float,
            "double" | "Double" | "D" => Self::Double,
            "String" => Self::String,
            "Date" => Self::Date,
            "void" | "Void" | "V" => Self::Void,
            _ => return None,
        };
        Some(kind)
    }

    /// The boxed class name for this kind.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Byte => "Byte",
            Self::Char => "Character",
            Self::Short => "Short",
            Self::Int => "Integer",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::String => "String",
            Self::Date => "Date",
            Self::Void => "Void",
        }
    }

    /// The primitive code, for kinds that have one.
    pub const fn primitive_code(self) -> Option<PrimitiveCode> {
        match self {
            Self::Boolean => Some(PrimitiveCode::Boolean),
            Self::Byte => Some(PrimitiveCode::Byte),
            Self::Char => Some(PrimitiveCode::Char),
            Self::Short => Some(PrimitiveCode::Short),
            Self::Int => Some(PrimitiveCode::Int),
            Self::Long => Some(PrimitiveCode::Long),
            Self::Float => Some(PrimitiveCode::Float),
            Self::Double => Some(PrimitiveCode::Double),
            Self::Void => Some(PrimitiveCode::Void),
            Self::String | Self::Date => None,
        }
    }

    /// Whether a raw value is of this kind. Void has no instances.
    pub fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Boolean, Value::Bool(_))
                | (Self::Byte, Value::Byte(_))
                | (Self::Char, Value::Char(_))
                | (Self::Short, Value::Short(_))
                | (Self::Int, Value::Int(_))
                | (Self::Long, Value::Long(_))
                | (Self::Float, Value::Float(_))
                | (Self::Double, Value::Double(_))
                | (Self::String, Value::Text(_))
                | (Self::Date, Value::Date(_))
        )
    }
}

/// Descriptor of a scalar class.
///
/// Two simple descriptors are equal iff their class names are equal.
#[derive(Debug, Clone)]
pub struct SimpleMetaType {
    header: TypeHeader,
    kind: Option<SimpleKind>,
}

impl SimpleMetaType {
    /// A simple type named after its class, checked against the standard
    /// allow-list.
    pub fn new(class_name: impl Into<String>) -> Result<Self, TypeError> {
        let class_name = class_name.into();
        Self::with_names(
            class_name.clone(),
            class_name.clone(),
            class_name,
            AllowList::standard(),
        )
    }

    /// A simple type with an explicit description.
    pub fn with_description(
        class_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TypeError> {
        let class_name = class_name.into();
        Self::with_names(
            class_name.clone(),
            class_name,
            description,
            AllowList::standard(),
        )
    }

    /// The general constructor.
    ///
    /// # Errors
    ///
    /// Everything [`TypeHeader::checked`] rejects, plus
    /// [`TypeError::WrongShape`] for array class names.
    pub fn with_names(
        class_name: impl Into<String>,
        type_name: impl Into<String>,
        description: impl Into<String>,
        allow: &AllowList,
    ) -> Result<Self, TypeError> {
        let header = TypeHeader::checked(class_name, type_name, description, allow)?;
        if header.is_array() {
            return Err(TypeError::WrongShape {
                class_name: header.class_name().to_string(),
                expected: "simple",
            });
        }
        let kind = SimpleKind::from_class_name(header.class_name());
        Ok(Self { header, kind })
    }

    /// The standard descriptor for a kind, named by its boxed class.
    pub fn of_kind(kind: SimpleKind) -> Self {
        let name = kind.class_name();
        Self {
            header: TypeHeader::trusted(name, name, name),
            kind: Some(kind),
        }
    }

    /// The descriptor for a primitive code, named by its primitive class.
    pub fn of_code(code: PrimitiveCode) -> Self {
        let name = code.primitive_name();
        Self {
            header: TypeHeader::trusted(name, name, name),
            kind: Some(code.kind()),
        }
    }

    pub fn string() -> Self {
        Self::of_kind(SimpleKind::String)
    }

    pub fn integer() -> Self {
        Self::of_kind(SimpleKind::Int)
    }

    pub fn long() -> Self {
        Self::of_kind(SimpleKind::Long)
    }

    pub fn boolean() -> Self {
        Self::of_kind(SimpleKind::Boolean)
    }

    pub fn double() -> Self {
        Self::of_kind(SimpleKind::Double)
    }

    pub fn date() -> Self {
        Self::of_kind(SimpleKind::Date)
    }

    pub fn header(&self) -> &TypeHeader {
        &self.header
    }

    /// The scalar kind, if the class is one the value model knows.
    pub fn kind(&self) -> Option<SimpleKind> {
        self.kind
    }

    /// Unknown classes accept only tagged values, never raw ones.
    pub(crate) fn accepts_raw(&self, value: &Value) -> bool {
        self.kind.is_some_and(|kind| kind.matches(value))
    }
}

impl PartialEq for SimpleMetaType {
    fn eq(&self, other: &Self) -> bool {
        self.header.class_name() == other.header.class_name()
    }
}

impl Eq for SimpleMetaType {}

impl Hash for SimpleMetaType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.header.class_name().hash(state);
    }
}

impl fmt::Display for SimpleMetaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SimpleMetaType{{class={}}}", self.header.class_name())
    }
}
