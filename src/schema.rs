//! Column declarations and the per-entity schema trait.
//!
//! A schema names a backend resource, the field used as its identifier and
//! the ordered columns a record table shows for it.

use serde::{Deserialize, Serialize};

/// Declared value kind of a column. The record table ignores it and always
/// edits plain text; the mock backend uses it to coerce submitted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Number,
    Decimal,
}

/// One displayed field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: Option<ValueKind>,
}

impl Column {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: None,
        }
    }

    pub const fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Runtime view of a schema, for code that picks the entity by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaInfo {
    pub resource: &'static str,
    pub title: &'static str,
    pub id_field: &'static str,
    pub columns: &'static [Column],
}

impl SchemaInfo {
    pub fn column(&self, key: &str) -> Option<&'static Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Columns an operator may edit: everything except the identifier.
    pub fn editable_columns(&self) -> impl Iterator<Item = &'static Column> + '_ {
        self.columns.iter().filter(|c| c.key != self.id_field)
    }
}

/// Statically declared field schema of one entity type.
pub trait Schema: Send + Sync + 'static {
    /// Backend collection name, used as the `/api/{resource}` path segment.
    const RESOURCE: &'static str;
    const TITLE: &'static str;
    const ID_FIELD: &'static str = "id";

    fn columns() -> &'static [Column];

    fn info() -> SchemaInfo {
        SchemaInfo {
            resource: Self::RESOURCE,
            title: Self::TITLE,
            id_field: Self::ID_FIELD,
            columns: Self::columns(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    impl Schema for Widget {
        const RESOURCE: &'static str = "widget";
        const TITLE: &'static str = "Widgets";
        const ID_FIELD: &'static str = "sku";

        fn columns() -> &'static [Column] {
            const COLUMNS: &[Column] = &[
                Column::new("sku", "SKU"),
                Column::new("name", "Name"),
                Column::new("price", "Price").kind(ValueKind::Decimal),
            ];
            COLUMNS
        }
    }

    #[test]
    fn test_editable_columns_skip_identifier() {
        let info = Widget::info();
        let keys: Vec<_> = info.editable_columns().map(|c| c.key).collect();
        assert_eq!(keys, vec!["name", "price"]);
    }

    #[test]
    fn test_column_lookup() {
        let info = Widget::info();
        assert_eq!(info.column("price").unwrap().kind, Some(ValueKind::Decimal));
        assert!(info.column("missing").is_none());
    }
}
