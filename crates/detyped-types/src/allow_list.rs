//! # Class Allow-List
//!
//! The set of base class names a descriptor may be built on. The list is
//! policy owned by the surrounding value model, so it is injected rather
//! than hardcoded: every checked constructor has a variant that takes an
//! explicit [`AllowList`], and the short forms use [`AllowList::standard`].
//!
//! ## Configuration
//!
//! ```yaml
//! extends_standard: true   # start from the standard list (default)
//! classes:
//!   - Money
//!   - Percentage
//! ```

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use detyped_core::error::is_blank;

use crate::encoding::PrimitiveCode;
use crate::error::TypeError;

/// Base class names permitted by the standard value model.
pub const STANDARD_CLASSES: &[&str] = &[
    // primitives
    "boolean",
    "byte",
    "char",
    "short",
    "int",
    "long",
    "float",
    "double",
    "void",
    // boxed primitives
    "Boolean",
    "Byte",
    "Character",
    "Short",
    "Integer",
    "Long",
    "Float",
    "Double",
    "Void",
    // text and time
    "String",
    "Date",
    // value containers
    "SimpleValue",
    "CompositeValue",
    "TableValue",
    "EnumValue",
    "ArrayValue",
    "CollectionValue",
    "GenericValue",
];

/// Class name carried by composite descriptors.
pub const COMPOSITE_CLASS: &str = "CompositeValue";
/// Class name carried by table descriptors.
pub const TABLE_CLASS: &str = "TableValue";
/// Class name carried by enum descriptors.
pub const ENUM_CLASS: &str = "EnumValue";

static STANDARD: LazyLock<AllowList> = LazyLock::new(|| AllowList {
    classes: STANDARD_CLASSES.iter().map(|s| (*s).to_string()).collect(),
});

/// The permitted base class names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    classes: BTreeSet<String>,
}

/// On-disk form of an allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowListConfig {
    /// Start from [`STANDARD_CLASSES`] before adding `classes`.
    #[serde(default = "default_extends_standard")]
    pub extends_standard: bool,
    /// Additional permitted class names.
    #[serde(default)]
    pub classes: Vec<String>,
}

fn default_extends_standard() -> bool {
    true
}

impl AllowList {
    /// The process-wide standard list.
    pub fn standard() -> &'static AllowList {
        &STANDARD
    }

    /// Build a list from explicit class names.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::AllowList`] if any name is blank.
    pub fn new<I, S>(classes: I) -> Result<Self, TypeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self {
            classes: BTreeSet::new(),
        };
        for class in classes {
            list.insert(class.into())?;
        }
        Ok(list)
    }

    /// A copy of this list with `class` added.
    pub fn with_class(mut self, class: impl Into<String>) -> Result<Self, TypeError> {
        self.insert(class.into())?;
        Ok(self)
    }

    fn insert(&mut self, class: String) -> Result<(), TypeError> {
        if is_blank(&class) {
            return Err(TypeError::AllowList(
                "class names must be non-blank".to_string(),
            ));
        }
        self.classes.insert(class);
        Ok(())
    }

    /// Build a list from its configuration.
    pub fn from_config(config: AllowListConfig) -> Result<Self, TypeError> {
        let mut list = if config.extends_standard {
            Self::standard().clone()
        } else {
            Self::new(Vec::<String>::new())?
        };
        for class in config.classes {
            list.insert(class)?;
        }
        tracing::debug!(
            classes = list.classes.len(),
            extends_standard = config.extends_standard,
            "loaded class allow-list"
        );
        Ok(list)
    }

    /// Parse a YAML (or JSON) configuration document.
    pub fn from_yaml_str(s: &str) -> Result<Self, TypeError> {
        let config: AllowListConfig =
            serde_yaml::from_str(s).map_err(|e| TypeError::AllowList(e.to_string()))?;
        Self::from_config(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, TypeError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| TypeError::AllowList(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&text)
    }

    /// Whether `class` is listed.
    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Whether `base` may be the base class of a descriptor: either listed,
    /// or a primitive encoding letter that can hold values.
    pub fn accepts_base(&self, base: &str) -> bool {
        self.contains(base)
            || PrimitiveCode::from_base_name(base).is_some_and(PrimitiveCode::is_array_element)
    }

    /// The listed names, sorted.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Number of listed names.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
