//! Tabular descriptors.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::allow_list::{AllowList, TABLE_CLASS};
use crate::error::TypeError;
use crate::value::Value;

use super::{CompositeMetaType, MetaType, TypeHeader};

/// Descriptor of rows of one composite type, keyed by index columns.
///
/// An instance is a list of rows. Each row is an instance of the row type,
/// and no two rows share the same values in every index column.
#[derive(Debug, Clone)]
pub struct TableMetaType {
    header: TypeHeader,
    row_type: CompositeMetaType,
    index_names: Vec<String>,
}

impl TableMetaType {
    /// A table checked against the standard allow-list.
    pub fn new<I, S>(
        type_name: impl Into<String>,
        description: impl Into<String>,
        row_type: CompositeMetaType,
        index_names: I,
    ) -> Result<Self, TypeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_allow_list(
            type_name,
            description,
            row_type,
            index_names,
            AllowList::standard(),
        )
    }

    /// A table checked against `allow`.
    ///
    /// # Errors
    ///
    /// Header validation failures, [`TypeError::EmptyIndex`] for no index
    /// columns, or [`TypeError::UnknownIndexColumn`] for a column the row
    /// type does not declare.
    pub fn with_allow_list<I, S>(
        type_name: impl Into<String>,
        description: impl Into<String>,
        row_type: CompositeMetaType,
        index_names: I,
        allow: &AllowList,
    ) -> Result<Self, TypeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header = TypeHeader::checked(TABLE_CLASS, type_name, description, allow)?;
        let index_names: Vec<String> = index_names.into_iter().map(Into::into).collect();
        if index_names.is_empty() {
            return Err(TypeError::EmptyIndex(header.type_name().to_string()));
        }
        if let Some(column) = index_names.iter().find(|c| !row_type.contains_item(c)) {
            return Err(TypeError::UnknownIndexColumn {
                row_type: row_type.header().type_name().to_string(),
                column: column.clone(),
            });
        }
        Ok(Self {
            header,
            row_type,
            index_names,
        })
    }

    pub fn header(&self) -> &TypeHeader {
        &self.header
    }

    /// The type of every row.
    pub fn row_type(&self) -> &CompositeMetaType {
        &self.row_type
    }

    /// The index columns, in declaration order.
    pub fn index_names(&self) -> &[String] {
        &self.index_names
    }

    pub(crate) fn accepts_raw(&self, value: &Value) -> bool {
        let Value::List(rows) = value else {
            return false;
        };
        let mut keys: Vec<Vec<&Value>> = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(entries) = self.row_entries(row) else {
                return false;
            };
            let key: Vec<&Value> = self
                .index_names
                .iter()
                .map(|column| entries.get(column).unwrap_or(&Value::Null))
                .collect();
            if keys.contains(&key) {
                return false;
            }
            keys.push(key);
        }
        true
    }

    /// The map content of a row, if it is an instance of the row type.
    fn row_entries<'v>(&self, row: &'v Value) -> Option<&'v BTreeMap<String, Value>> {
        match row {
            Value::Typed(tagged) => match tagged.meta_type() {
                MetaType::Composite(c) if c == &self.row_type => tagged.value().as_map(),
                _ => None,
            },
            raw if self.row_type.accepts_raw(raw) => raw.as_map(),
            _ => None,
        }
    }
}

impl PartialEq for TableMetaType {
    fn eq(&self, other: &Self) -> bool {
        self.header.type_name() == other.header.type_name()
            && self.row_type == other.row_type
            && self.index_names == other.index_names
    }
}

impl Eq for TableMetaType {}

impl Hash for TableMetaType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.header.type_name().hash(state);
        self.index_names.hash(state);
    }
}

impl fmt::Display for TableMetaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TableMetaType{{type={} rowType={} index=[{}]}}",
            self.header.type_name(),
            self.row_type.header().type_name(),
            self.index_names.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta_type::SimpleMetaType;
    use crate::value::MetaValue;

    fn server() -> CompositeMetaType {
        CompositeMetaType::builder("Server", "A server row")
            .add_item("host", SimpleMetaType::string())
            .unwrap()
            .add_item("name", SimpleMetaType::string())
            .unwrap()
            .add_item("port", SimpleMetaType::integer())
            .unwrap()
            .create()
            .unwrap()
    }

    fn servers() -> TableMetaType {
        TableMetaType::new("Servers", "All servers", server(), ["host", "name"]).unwrap()
    }

    fn row(host: &str, name: &str, port: i32) -> Value {
        Value::Map(BTreeMap::from([
            ("host".to_string(), Value::Text(host.into())),
            ("name".to_string(), Value::Text(name.into())),
            ("port".to_string(), Value::Int(port)),
        ]))
    }

    #[test]
    fn test_accessors() {
        let t = servers();
        assert_eq!(t.header().class_name(), TABLE_CLASS);
        assert_eq!(t.index_names(), ["host", "name"]);
        assert_eq!(t.row_type(), &server());
    }

    #[test]
    fn test_unique_rows_are_value() {
        let rows = Value::List(vec![row("a", "one", 1), row("a", "two", 1), row("b", "one", 1)]);
        assert!(servers().accepts_raw(&rows));
        assert!(servers().accepts_raw(&Value::List(vec![])));
    }

    #[test]
    fn test_duplicate_index_is_not_value() {
        let rows = Value::List(vec![row("a", "one", 1), row("a", "one", 2)]);
        assert!(!servers().accepts_raw(&rows));
    }

    #[test]
    fn test_malformed_row_is_not_value() {
        let rows = Value::List(vec![row("a", "one", 1), Value::Text("a".into())]);
        assert!(!servers().accepts_raw(&rows));
    }

    #[test]
    fn test_tagged_rows_accepted() {
        let tagged = MetaValue::new(server(), row("a", "one", 1)).unwrap();
        let rows = Value::List(vec![Value::Typed(tagged), row("a", "one", 2)]);
        // Same index values as the tagged row.
        assert!(!servers().accepts_raw(&rows));

        let tagged = MetaValue::new(server(), row("b", "one", 1)).unwrap();
        let rows = Value::List(vec![Value::Typed(tagged), row("a", "one", 2)]);
        assert!(servers().accepts_raw(&rows));
    }

    #[test]
    fn test_empty_index_rejected() {
        let err = TableMetaType::new("Servers", "d", server(), Vec::<String>::new()).unwrap_err();
        assert_eq!(err, TypeError::EmptyIndex("Servers".into()));
    }

    #[test]
    fn test_unknown_index_column_rejected() {
        let err = TableMetaType::new("Servers", "d", server(), ["address"]).unwrap_err();
        assert_eq!(
            err,
            TypeError::UnknownIndexColumn {
                row_type: "Server".into(),
                column: "address".into()
            }
        );
    }

    #[test]
    fn test_is_table() {
        let t: MetaType = servers().into();
        assert!(t.is_table());
        assert!(!t.is_composite());
    }
}
