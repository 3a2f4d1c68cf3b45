//! # Values
//!
//! [`Value`] is the candidate type for instance checks: the scalars the
//! model knows, lists, string-keyed maps, and values already tagged with
//! their descriptor ([`MetaValue`]).
//!
//! A [`MetaValue`] can only be built from content its descriptor accepts,
//! and deserialization re-runs that check, so a tagged value is always an
//! instance of its own descriptor.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::meta_type::{MetaType, MetaTypeRepr};

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Null,
    Bool(bool),
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Text(String),
    Date(DateTime<Utc>),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Typed(MetaValue),
}

impl Value {
    /// Name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Byte(_) => "byte",
            Self::Char(_) => "char",
            Self::Short(_) => "short",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::Text(_) => "text",
            Self::Date(_) => "date",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Typed(_) => "typed",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The content under any number of descriptor tags.
    pub fn untagged(&self) -> &Value {
        let mut current = self;
        while let Self::Typed(tagged) = current {
            current = tagged.value();
        }
        current
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Narrow to a concrete Rust shape.
    ///
    /// ```text
    /// let port: Option<i32> = value.narrow();
    /// ```
    pub fn narrow<'a, T: ValueShape<'a>>(&'a self) -> Option<T> {
        T::from_value(self)
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar!(
    bool => Bool,
    i8 => Byte,
    char => Char,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => Text,
    DateTime<Utc> => Date,
    Vec<Value> => List,
    BTreeMap<String, Value> => Map,
    MetaValue => Typed,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

// ─── Narrowing ───────────────────────────────────────────────────────

/// A Rust type a [`Value`] can be narrowed to.
///
/// Every shape except [`MetaValue`] reads through descriptor tags.
pub trait ValueShape<'a>: Sized {
    /// Name of the shape, for mismatch diagnostics.
    const SHAPE: &'static str;

    /// The value as this shape, if it is one.
    fn from_value(value: &'a Value) -> Option<Self>;
}

macro_rules! impl_value_shape {
    ($($ty:ty, $shape:literal => $variant:ident;)*) => {
        $(
            impl<'a> ValueShape<'a> for $ty {
                const SHAPE: &'static str = $shape;

                fn from_value(value: &'a Value) -> Option<Self> {
                    match value.untagged() {
                        Value::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_value_shape! {
    bool, "bool" => Bool;
    i8, "byte" => Byte;
    char, "char" => Char;
    i16, "short" => Short;
    i32, "int" => Int;
    i64, "long" => Long;
    f32, "float" => Float;
    f64, "double" => Double;
    DateTime<Utc>, "date" => Date;
}

impl<'a> ValueShape<'a> for &'a str {
    const SHAPE: &'static str = "text";

    fn from_value(value: &'a Value) -> Option<Self> {
        match value.untagged() {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl<'a> ValueShape<'a> for &'a [Value] {
    const SHAPE: &'static str = "list";

    fn from_value(value: &'a Value) -> Option<Self> {
        value.untagged().as_list()
    }
}

impl<'a> ValueShape<'a> for &'a BTreeMap<String, Value> {
    const SHAPE: &'static str = "map";

    fn from_value(value: &'a Value) -> Option<Self> {
        value.untagged().as_map()
    }
}

impl<'a> ValueShape<'a> for &'a MetaValue {
    const SHAPE: &'static str = "typed";

    fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Typed(tagged) => Some(tagged),
            _ => None,
        }
    }
}

// ─── Tagged values ───────────────────────────────────────────────────

/// A value paired with the descriptor it is an instance of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MetaValueRepr", into = "MetaValueRepr")]
pub struct MetaValue {
    meta_type: Arc<MetaType>,
    value: Box<Value>,
}

impl MetaValue {
    /// Tag `value` with `meta_type`.
    ///
    /// A value already tagged with an equal descriptor is re-tagged rather
    /// than nested.
    ///
    /// # Errors
    ///
    /// [`TypeError::NotAnInstance`] if the descriptor rejects the value.
    pub fn new(meta_type: impl Into<Arc<MetaType>>, value: Value) -> Result<Self, TypeError> {
        let meta_type = meta_type.into();
        if !meta_type.is_value(&value) {
            tracing::debug!(
                type_name = %meta_type.type_name(),
                value_kind = value.kind_name(),
                "value rejected by meta type"
            );
            return Err(TypeError::NotAnInstance {
                type_name: meta_type.type_name().to_string(),
            });
        }
        let value = match value {
            Value::Typed(tagged) => tagged.value,
            raw => Box::new(raw),
        };
        Ok(Self { meta_type, value })
    }

    /// The descriptor.
    pub fn meta_type(&self) -> &MetaType {
        &self.meta_type
    }

    /// Shared handle to the descriptor.
    pub fn meta_type_arc(&self) -> &Arc<MetaType> {
        &self.meta_type
    }

    /// The content, an instance of the descriptor.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        *self.value
    }
}

/// Persisted form of a [`MetaValue`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaValueRepr {
    pub meta_type: MetaTypeRepr,
    pub value: Value,
}

impl TryFrom<MetaValueRepr> for MetaValue {
    type Error = TypeError;

    fn try_from(repr: MetaValueRepr) -> Result<Self, Self::Error> {
        let meta_type = MetaType::try_from(repr.meta_type)?;
        let class_name = meta_type.class_name().to_string();
        Self::new(meta_type, repr.value).map_err(|err| {
            tracing::warn!(
                class_name = %class_name,
                error = %err,
                "meta value reconstruction failed"
            );
            TypeError::reconstruction(class_name, err)
        })
    }
}

impl From<MetaValue> for MetaValueRepr {
    fn from(v: MetaValue) -> Self {
        Self {
            meta_type: v.meta_type.to_repr(),
            value: *v.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta_type::{CollectionMetaType, EnumMetaType, SimpleMetaType};
    use detyped_core::{Classify, ErrorKind};

    fn int() -> MetaType {
        SimpleMetaType::integer().into()
    }

    #[test]
    fn test_tag_accepted_value() {
        let v = MetaValue::new(int(), Value::Int(7)).unwrap();
        assert_eq!(v.meta_type(), &int());
        assert_eq!(v.value(), &Value::Int(7));
    }

    #[test]
    fn test_tag_rejected_value() {
        let err = MetaValue::new(int(), Value::Text("7".into())).unwrap_err();
        assert_eq!(
            err,
            TypeError::NotAnInstance {
                type_name: "Integer".into()
            }
        );
        assert!(MetaValue::new(int(), Value::Null).is_err());
    }

    #[test]
    fn test_retagging_does_not_nest() {
        let inner = MetaValue::new(int(), Value::Int(7)).unwrap();
        let outer = MetaValue::new(int(), Value::Typed(inner.clone())).unwrap();
        assert_eq!(outer, inner);
    }

    #[test]
    fn test_tag_with_other_descriptor_rejected() {
        let inner = MetaValue::new(int(), Value::Int(7)).unwrap();
        assert!(MetaValue::new(SimpleMetaType::long(), Value::Typed(inner)).is_err());
    }

    #[test]
    fn test_narrowing() {
        assert_eq!(Value::Int(3).narrow::<i32>(), Some(3));
        assert_eq!(Value::Int(3).narrow::<i64>(), None);
        assert_eq!(Value::from("a").narrow::<&str>(), Some("a"));
        let list = Value::List(vec![Value::Int(1)]);
        assert_eq!(list.narrow::<&[Value]>().map(<[Value]>::len), Some(1));
    }

    #[test]
    fn test_narrowing_reads_through_tags() {
        let tagged = Value::Typed(MetaValue::new(int(), Value::Int(3)).unwrap());
        assert_eq!(tagged.narrow::<i32>(), Some(3));
        assert!(tagged.narrow::<&MetaValue>().is_some());
        assert!(Value::Int(3).narrow::<&MetaValue>().is_none());
    }

    #[test]
    fn test_untagged() {
        let tagged = Value::Typed(MetaValue::new(int(), Value::Int(3)).unwrap());
        assert_eq!(tagged.untagged(), &Value::Int(3));
        assert_eq!(tagged.kind_name(), "typed");
        assert_eq!(tagged.untagged().kind_name(), "int");
    }

    #[test]
    fn test_serde_reload() {
        let list = CollectionMetaType::new("List", SimpleMetaType::string()).unwrap();
        let v = MetaValue::new(list, Value::List(vec!["a".into(), "b".into()])).unwrap();
        let json = serde_json::to_string(&v).unwrap();
        let back: MetaValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_tampered_value_fails_reload() {
        let color = EnumMetaType::new("Color", "Colors", ["RED"]).unwrap();
        let v = MetaValue::new(color, Value::from("RED")).unwrap();
        let json = serde_json::to_string(&v).unwrap().replace("RED\"}", "BLUE\"}");
        assert!(json.contains("BLUE"));

        let repr: MetaValueRepr = serde_json::from_str(&json).unwrap();
        let err = MetaValue::try_from(repr).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reconstruction);
        assert!(serde_json::from_str::<MetaValue>(&json).is_err());
    }

    #[test]
    fn test_value_serde_shape() {
        let json = serde_json::to_value(Value::Int(1)).unwrap();
        assert_eq!(json, serde_json::json!({"int": 1}));
        let json = serde_json::to_value(Value::Null).unwrap();
        assert_eq!(json, serde_json::json!("null"));
    }
}
