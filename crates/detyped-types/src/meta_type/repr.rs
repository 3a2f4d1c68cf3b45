//! Persisted form of descriptors.
//!
//! [`MetaTypeRepr`] is plain data with no invariants. Turning it back into a
//! [`MetaType`] goes through the same checked constructors as fresh
//! construction; any failure is reported as [`TypeError::Reconstruction`].

use serde::{Deserialize, Serialize};

use crate::allow_list::{AllowList, COMPOSITE_CLASS, ENUM_CLASS, TABLE_CLASS};
use crate::encoding::{self, MAX_DIMENSION};
use crate::error::TypeError;

use super::{
    ArrayMetaType, CollectionMetaType, CompositeTypeBuilder, EnumMetaType, MetaType, SimpleKind,
    SimpleMetaType, TableMetaType,
};

/// Serialized descriptor, tagged by shape.
///
/// ```json
/// {"kind": "collection", "class_name": "List", "type_name": "List",
///  "description": "List", "element": {"kind": "simple", "class_name": "String"}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetaTypeRepr {
    Simple {
        class_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        type_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Array {
        dimension: usize,
        #[serde(default)]
        primitive: bool,
        element: Box<MetaTypeRepr>,
    },
    Collection {
        class_name: String,
        type_name: String,
        description: String,
        element: Box<MetaTypeRepr>,
    },
    Composite {
        type_name: String,
        description: String,
        items: Vec<CompositeItemRepr>,
    },
    Enum {
        type_name: String,
        description: String,
        values: Vec<String>,
    },
    Table {
        type_name: String,
        description: String,
        row_type: Box<MetaTypeRepr>,
        index_names: Vec<String>,
    },
}

/// Serialized composite item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeItemRepr {
    /// Item name.
    pub name: String,
    /// Declared description; absent means the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Item descriptor.
    pub meta_type: MetaTypeRepr,
}

impl MetaTypeRepr {
    /// The class name the persisted descriptor claims, for diagnostics.
    pub fn class_name(&self) -> String {
        match self {
            Self::Simple { class_name, .. } | Self::Collection { class_name, .. } => {
                class_name.clone()
            }
            Self::Array {
                dimension,
                primitive,
                element,
            } => {
                let base = element.class_name();
                if *dimension > MAX_DIMENSION {
                    return format!("{base} (dimension {dimension})");
                }
                let code = SimpleKind::from_class_name(&base).and_then(SimpleKind::primitive_code);
                let base = match code {
                    Some(code) if *primitive => code.letter().to_string(),
                    _ => base,
                };
                encoding::encode(&base, *dimension)
            }
            Self::Composite { .. } => COMPOSITE_CLASS.to_string(),
            Self::Enum { .. } => ENUM_CLASS.to_string(),
            Self::Table { .. } => TABLE_CLASS.to_string(),
        }
    }

    fn build(self, allow: &AllowList) -> Result<MetaType, TypeError> {
        let built = match self {
            Self::Simple {
                class_name,
                type_name,
                description,
            } => {
                let type_name = type_name.unwrap_or_else(|| class_name.clone());
                let description = description.unwrap_or_else(|| class_name.clone());
                SimpleMetaType::with_names(class_name, type_name, description, allow)?.into()
            }
            Self::Array {
                dimension,
                primitive: true,
                element,
            } => {
                let class_name = element.class_name();
                let code = SimpleKind::from_class_name(&class_name)
                    .and_then(SimpleKind::primitive_code)
                    .ok_or(TypeError::WrongShape {
                        class_name,
                        expected: "primitive array element",
                    })?;
                ArrayMetaType::primitive(dimension, code)?.into()
            }
            Self::Array {
                dimension,
                primitive: false,
                element,
            } => ArrayMetaType::with_allow_list(dimension, element.build(allow)?, allow)?.into(),
            Self::Collection {
                class_name,
                type_name,
                description,
                element,
            } => CollectionMetaType::with_names(
                class_name,
                type_name,
                description,
                element.build(allow)?,
            )?
            .into(),
            Self::Composite {
                type_name,
                description,
                items,
            } => {
                let mut builder =
                    CompositeTypeBuilder::with_allow_list(type_name, description, allow);
                for item in items {
                    let meta_type = item.meta_type.build(allow)?;
                    match item.description {
                        Some(d) => builder.add_item_with_description(item.name, d, meta_type)?,
                        None => builder.add_item(item.name, meta_type)?,
                    };
                }
                builder.create()?.into()
            }
            Self::Enum {
                type_name,
                description,
                values,
            } => EnumMetaType::with_allow_list(type_name, description, values, allow)?.into(),
            Self::Table {
                type_name,
                description,
                row_type,
                index_names,
            } => {
                let row_type = match row_type.build(allow)? {
                    MetaType::Composite(c) => c,
                    other => {
                        return Err(TypeError::WrongShape {
                            class_name: other.class_name().to_string(),
                            expected: "table row",
                        })
                    }
                };
                TableMetaType::with_allow_list(
                    type_name,
                    description,
                    row_type,
                    index_names,
                    allow,
                )?
                .into()
            }
        };
        Ok(built)
    }
}

impl MetaType {
    /// Rebuild a descriptor from its persisted form, re-checking every
    /// invariant against `allow`.
    ///
    /// # Errors
    ///
    /// [`TypeError::Reconstruction`] wrapping the first validation failure.
    pub fn from_repr(repr: MetaTypeRepr, allow: &AllowList) -> Result<Self, TypeError> {
        let class_name = repr.class_name();
        repr.build(allow).map_err(|err| {
            tracing::warn!(
                class_name = %class_name,
                error = %err,
                "meta type reconstruction failed"
            );
            TypeError::reconstruction(class_name, err)
        })
    }

    /// The persisted form of this descriptor.
    pub fn to_repr(&self) -> MetaTypeRepr {
        match self {
            Self::Simple(t) => {
                let h = t.header();
                let differs = |s: &str| (s != h.class_name()).then(|| s.to_string());
                MetaTypeRepr::Simple {
                    class_name: h.class_name().to_string(),
                    type_name: differs(h.type_name()),
                    description: differs(h.description()),
                }
            }
            Self::Array(t) => MetaTypeRepr::Array {
                dimension: t.dimension(),
                primitive: t.is_primitive_array(),
                element: Box::new(t.element_type().to_repr()),
            },
            Self::Collection(t) => MetaTypeRepr::Collection {
                class_name: t.header().class_name().to_string(),
                type_name: t.header().type_name().to_string(),
                description: t.header().description().to_string(),
                element: Box::new(t.element_type().to_repr()),
            },
            Self::Composite(t) => MetaTypeRepr::Composite {
                type_name: t.header().type_name().to_string(),
                description: t.header().description().to_string(),
                items: t
                    .items()
                    .iter()
                    .map(|item| CompositeItemRepr {
                        name: item.name().to_string(),
                        description: item.declared_description().map(str::to_string),
                        meta_type: item.meta_type().to_repr(),
                    })
                    .collect(),
            },
            Self::Enum(t) => MetaTypeRepr::Enum {
                type_name: t.header().type_name().to_string(),
                description: t.header().description().to_string(),
                values: t.values().to_vec(),
            },
            Self::Table(t) => MetaTypeRepr::Table {
                type_name: t.header().type_name().to_string(),
                description: t.header().description().to_string(),
                row_type: Box::new(MetaType::Composite(t.row_type().clone()).to_repr()),
                index_names: t.index_names().to_vec(),
            },
        }
    }
}

impl TryFrom<MetaTypeRepr> for MetaType {
    type Error = TypeError;

    /// Reload against the standard allow-list.
    fn try_from(repr: MetaTypeRepr) -> Result<Self, Self::Error> {
        Self::from_repr(repr, AllowList::standard())
    }
}

impl From<MetaType> for MetaTypeRepr {
    fn from(t: MetaType) -> Self {
        t.to_repr()
    }
}
