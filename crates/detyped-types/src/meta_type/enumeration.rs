//! Enumerated descriptors.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use detyped_core::error::is_blank;

use crate::allow_list::{AllowList, ENUM_CLASS};
use crate::error::TypeError;
use crate::value::Value;

use super::TypeHeader;

/// Descriptor of a fixed set of legal string values.
///
/// Values keep their declaration order; instances are raw text values equal
/// to one of them.
#[derive(Debug, Clone)]
pub struct EnumMetaType {
    header: TypeHeader,
    values: Vec<String>,
}

impl EnumMetaType {
    /// An enum checked against the standard allow-list.
    pub fn new<I, S>(
        type_name: impl Into<String>,
        description: impl Into<String>,
        values: I,
    ) -> Result<Self, TypeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_allow_list(type_name, description, values, AllowList::standard())
    }

    /// An enum checked against `allow`.
    ///
    /// # Errors
    ///
    /// Header validation failures, [`TypeError::EmptyEnum`] for no values,
    /// or [`TypeError::InvalidEnumValue`] for a blank or repeated value.
    pub fn with_allow_list<I, S>(
        type_name: impl Into<String>,
        description: impl Into<String>,
        values: I,
        allow: &AllowList,
    ) -> Result<Self, TypeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header = TypeHeader::checked(ENUM_CLASS, type_name, description, allow)?;
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(TypeError::EmptyEnum(header.type_name().to_string()));
        }
        let mut seen = BTreeSet::new();
        for value in &values {
            if is_blank(value) || !seen.insert(value.as_str()) {
                return Err(TypeError::InvalidEnumValue {
                    type_name: header.type_name().to_string(),
                    value: value.clone(),
                });
            }
        }
        Ok(Self { header, values })
    }

    pub fn header(&self) -> &TypeHeader {
        &self.header
    }

    /// Legal values in declaration order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn is_legal(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub(crate) fn accepts_raw(&self, value: &Value) -> bool {
        matches!(value, Value::Text(s) if self.is_legal(s))
    }
}

impl PartialEq for EnumMetaType {
    fn eq(&self, other: &Self) -> bool {
        self.header.type_name() == other.header.type_name() && self.values == other.values
    }
}

impl Eq for EnumMetaType {}

impl Hash for EnumMetaType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.header.type_name().hash(state);
        self.values.hash(state);
    }
}

impl fmt::Display for EnumMetaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EnumMetaType{{type={} values=[{}]}}",
            self.header.type_name(),
            self.values.join(", ")
        )
    }
}
