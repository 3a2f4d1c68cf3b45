//! Composite descriptors and their builder.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use detyped_core::error::is_blank;
use detyped_core::{Named, NamedComparator};

use crate::allow_list::{AllowList, COMPOSITE_CLASS};
use crate::error::TypeError;
use crate::value::Value;

use super::{MetaType, TypeHeader};

/// One named, typed item of a composite.
#[derive(Debug, Clone)]
pub struct CompositeItem {
    name: String,
    description: Option<String>,
    meta_type: Arc<MetaType>,
}

impl CompositeItem {
    /// The item name, unique within its composite.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The item description, falling back to the item name.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.name)
    }

    /// The explicitly declared description, if any.
    pub fn declared_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The descriptor the item's values must satisfy.
    pub fn meta_type(&self) -> &MetaType {
        &self.meta_type
    }
}

impl Named for CompositeItem {
    fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for CompositeItem {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.meta_type == other.meta_type
    }
}

impl Eq for CompositeItem {}

/// Descriptor of a fixed set of named, typed items.
///
/// Items are kept in name order. Built only through
/// [`CompositeTypeBuilder`], which guarantees at least one item and unique
/// item names.
#[derive(Debug, Clone)]
pub struct CompositeMetaType {
    header: TypeHeader,
    items: Vec<CompositeItem>,
}

impl CompositeMetaType {
    /// Start building a composite checked against the standard allow-list.
    pub fn builder(
        type_name: impl Into<String>,
        description: impl Into<String>,
    ) -> CompositeTypeBuilder<'static> {
        CompositeTypeBuilder::new(type_name, description)
    }

    pub fn header(&self) -> &TypeHeader {
        &self.header
    }

    /// Items in name order.
    pub fn items(&self) -> &[CompositeItem] {
        &self.items
    }

    /// Look up an item by name.
    pub fn item(&self, name: &str) -> Option<&CompositeItem> {
        self.items
            .binary_search_by(|item| NamedComparator::INSTANCE.compare(item, name))
            .ok()
            .map(|index| &self.items[index])
    }

    pub fn contains_item(&self, name: &str) -> bool {
        self.item(name).is_some()
    }

    /// Item names in name order.
    pub fn item_names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(CompositeItem::name)
    }

    pub fn item_type(&self, name: &str) -> Option<&MetaType> {
        self.item(name).map(CompositeItem::meta_type)
    }

    pub fn item_description(&self, name: &str) -> Option<&str> {
        self.item(name).map(CompositeItem::description)
    }

    /// A raw composite is a map with exactly the declared keys, whose
    /// non-null values are instances of their item types.
    pub(crate) fn accepts_raw(&self, value: &Value) -> bool {
        let Value::Map(entries) = value else {
            return false;
        };
        entries.len() == self.items.len()
            && self.items.iter().all(|item| match entries.get(&item.name) {
                Some(Value::Null) => true,
                Some(v) => item.meta_type.is_value(v),
                None => false,
            })
    }
}

impl PartialEq for CompositeMetaType {
    fn eq(&self, other: &Self) -> bool {
        self.header.type_name() == other.header.type_name() && self.items == other.items
    }
}

impl Eq for CompositeMetaType {}

impl Hash for CompositeMetaType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.header.type_name().hash(state);
        for item in &self.items {
            item.name.hash(state);
        }
    }
}

impl fmt::Display for CompositeMetaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeMetaType{{type={} items=[", self.header.type_name())?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", item.name, item.meta_type)?;
        }
        f.write_str("]}")
    }
}

// ─── Builder ─────────────────────────────────────────────────────────

/// Accumulates items and produces immutable composite snapshots.
///
/// ```text
/// let point = CompositeMetaType::builder("Point", "A 2D point")
///     .add_item("x", int.clone())?
///     .add_item("y", int)?
///     .create()?;
/// ```
#[derive(Debug, Clone)]
pub struct CompositeTypeBuilder<'a> {
    type_name: String,
    description: String,
    allow: &'a AllowList,
    items: Vec<CompositeItem>,
}

impl CompositeTypeBuilder<'static> {
    /// A builder checked against the standard allow-list.
    pub fn new(type_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_allow_list(type_name, description, AllowList::standard())
    }
}

impl<'a> CompositeTypeBuilder<'a> {
    /// A builder checked against `allow`.
    pub fn with_allow_list(
        type_name: impl Into<String>,
        description: impl Into<String>,
        allow: &'a AllowList,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            description: description.into(),
            allow,
            items: Vec::new(),
        }
    }

    /// Add an item whose description is its name.
    ///
    /// # Errors
    ///
    /// [`TypeError::BlankItemName`] for a blank name;
    /// [`TypeError::DuplicateItem`] if the name was already added.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        meta_type: impl Into<Arc<MetaType>>,
    ) -> Result<&mut Self, TypeError> {
        self.push(name.into(), None, meta_type.into())
    }

    /// Add an item with a description.
    pub fn add_item_with_description(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        meta_type: impl Into<Arc<MetaType>>,
    ) -> Result<&mut Self, TypeError> {
        let description = description.into();
        if is_blank(&description) {
            return Err(TypeError::BlankDescription);
        }
        self.push(name.into(), Some(description), meta_type.into())
    }

    fn push(
        &mut self,
        name: String,
        description: Option<String>,
        meta_type: Arc<MetaType>,
    ) -> Result<&mut Self, TypeError> {
        if is_blank(&name) {
            return Err(TypeError::BlankItemName);
        }
        if self.items.iter().any(|item| item.name == name) {
            tracing::debug!(type_name = %self.type_name, item = %name, "duplicate composite item");
            return Err(TypeError::DuplicateItem {
                type_name: self.type_name.clone(),
                item: name,
            });
        }
        self.items.push(CompositeItem {
            name,
            description,
            meta_type,
        });
        Ok(self)
    }

    /// Number of items added so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Produce a composite from the items added so far.
    ///
    /// The result is a snapshot: adding items afterwards does not change it,
    /// and `create` may be called again.
    ///
    /// # Errors
    ///
    /// Header validation failures, or [`TypeError::EmptyComposite`] if no
    /// item was added.
    pub fn create(&self) -> Result<CompositeMetaType, TypeError> {
        let header = TypeHeader::checked(
            COMPOSITE_CLASS,
            self.type_name.as_str(),
            self.description.as_str(),
            self.allow,
        )?;
        if self.items.is_empty() {
            return Err(TypeError::EmptyComposite(self.type_name.clone()));
        }
        let mut items = self.items.clone();
        NamedComparator::INSTANCE.sort(&mut items);
        Ok(CompositeMetaType { header, items })
    }
}
