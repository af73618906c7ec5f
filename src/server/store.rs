//! In-memory record store behind the mock backend.
//!
//! Records always carry every declared column (null when unset) with the
//! identifier first. Identifiers are assigned per resource from 1 upwards.

use super::error::ServerError;
use crate::entities;
use crate::record::Fields;
use crate::schema::{Column, SchemaInfo, ValueKind};
use serde_json::{Number, Value};
use std::collections::{BTreeMap, HashMap};

struct Collection {
    info: SchemaInfo,
    rows: BTreeMap<i64, Fields>,
    next_id: i64,
}

pub struct MemoryStore {
    collections: HashMap<&'static str, Collection>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Column whose non-null values must be unique within a resource.
fn unique_key(resource: &str) -> Option<&'static str> {
    match resource {
        "employee" => Some("empNo"),
        "department" => Some("code"),
        _ => None,
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let collections = entities::all()
            .into_iter()
            .map(|info| {
                (
                    info.resource,
                    Collection {
                        info,
                        rows: BTreeMap::new(),
                        next_id: 1,
                    },
                )
            })
            .collect();
        Self { collections }
    }

    fn collection(&self, resource: &str) -> Result<&Collection, ServerError> {
        self.collections.get(resource).ok_or(ServerError::NotFound)
    }

    fn collection_mut(&mut self, resource: &str) -> Result<&mut Collection, ServerError> {
        self.collections.get_mut(resource).ok_or(ServerError::NotFound)
    }

    /// Rows in identifier order; an unknown resource yields nothing.
    pub fn rows(&self, resource: &str) -> impl Iterator<Item = &Fields> + '_ {
        self.collections
            .get(resource)
            .into_iter()
            .flat_map(|c| c.rows.values())
    }

    pub fn list(&self, resource: &str) -> Result<Vec<Fields>, ServerError> {
        Ok(self.collection(resource)?.rows.values().cloned().collect())
    }

    pub fn get(&self, resource: &str, id: i64) -> Result<Fields, ServerError> {
        self.collection(resource)?
            .rows
            .get(&id)
            .cloned()
            .ok_or(ServerError::NotFound)
    }

    /// Insert a record built from the payload's declared columns. A client
    /// supplied identifier is ignored.
    pub fn create(&mut self, resource: &str, payload: &Value) -> Result<Fields, ServerError> {
        let payload = as_object(payload)?;
        let collection = self.collection_mut(resource)?;
        let id = collection.next_id;

        let mut record = Fields::new();
        record.insert(collection.info.id_field.to_string(), Value::from(id));
        for column in collection.info.editable_columns() {
            let value = match payload.get(column.key) {
                Some(value) => coerce(column, value)?,
                None => Value::Null,
            };
            record.insert(column.key.to_string(), value);
        }

        collection.check_unique(&record, None)?;
        collection.rows.insert(id, record.clone());
        collection.next_id += 1;
        tracing::debug!("created {} {}", resource, id);
        Ok(record)
    }

    /// Merge the payload's declared columns onto the stored record.
    pub fn update(&mut self, resource: &str, id: i64, payload: &Value) -> Result<Fields, ServerError> {
        let payload = as_object(payload)?;
        let collection = self.collection_mut(resource)?;
        let mut record = collection.rows.get(&id).cloned().ok_or(ServerError::NotFound)?;

        for column in collection.info.editable_columns() {
            if let Some(value) = payload.get(column.key) {
                record.insert(column.key.to_string(), coerce(column, value)?);
            }
        }

        collection.check_unique(&record, Some(id))?;
        collection.rows.insert(id, record.clone());
        tracing::debug!("updated {} {}", resource, id);
        Ok(record)
    }

    pub fn delete(&mut self, resource: &str, id: i64) -> Result<(), ServerError> {
        match self.collection_mut(resource)?.rows.remove(&id) {
            Some(_) => {
                tracing::debug!("deleted {} {}", resource, id);
                Ok(())
            }
            None => Err(ServerError::NotFound),
        }
    }
}

impl Collection {
    fn check_unique(&self, record: &Fields, own_id: Option<i64>) -> Result<(), ServerError> {
        let Some(key) = unique_key(self.info.resource) else {
            return Ok(());
        };
        let Some(value) = record.get(key).filter(|v| !v.is_null()) else {
            return Ok(());
        };
        let clash = self
            .rows
            .iter()
            .any(|(id, row)| Some(*id) != own_id && row.get(key) == Some(value));
        if clash {
            return Err(ServerError::Integrity(format!(
                "duplicate key value violates unique constraint: {}={}",
                key, value
            )));
        }
        Ok(())
    }
}

fn as_object(payload: &Value) -> Result<&Fields, ServerError> {
    payload
        .as_object()
        .ok_or_else(|| ServerError::BadRequest("body must be a JSON object".into()))
}

/// Convert a submitted value to the column's declared kind. Text is what the
/// console always sends, so numeric columns parse it; blank text is null.
pub fn coerce(column: &Column, value: &Value) -> Result<Value, ServerError> {
    let invalid = || {
        ServerError::BadRequest(format!("invalid value for {}: {}", column.key, value))
    };
    let kind = column.kind.unwrap_or(ValueKind::String);

    match (kind, value) {
        (_, Value::Null) => Ok(Value::Null),
        (ValueKind::String, Value::String(s)) => Ok(Value::String(s.clone())),
        (ValueKind::String, Value::Number(n)) => Ok(Value::String(n.to_string())),
        (ValueKind::String, Value::Bool(b)) => Ok(Value::String(b.to_string())),
        (_, Value::String(s)) if s.trim().is_empty() => Ok(Value::Null),
        (ValueKind::Number, Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| invalid()),
        (ValueKind::Decimal, Value::String(s)) => s
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(invalid),
        (ValueKind::Number, Value::Number(n)) if n.is_i64() => Ok(value.clone()),
        (ValueKind::Decimal, Value::Number(_)) => Ok(value.clone()),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_assigns_ids_and_fills_columns() {
        let mut store = MemoryStore::new();
        let first = store
            .create("department", &json!({"id": 99, "code": "ENG", "name": "Engineering"}))
            .unwrap();
        let second = store.create("department", &json!({"code": "OPS"})).unwrap();

        assert_eq!(Value::Object(first), json!({"id": 1, "code": "ENG", "name": "Engineering"}));
        assert_eq!(Value::Object(second), json!({"id": 2, "code": "OPS", "name": null}));
        assert_eq!(store.list("department").unwrap().len(), 2);
    }

    #[test]
    fn test_update_merges_onto_stored_record() {
        let mut store = MemoryStore::new();
        store
            .create("employee", &json!({"empNo": "E1", "name": "Ada", "salary": "5000"}))
            .unwrap();
        let updated = store.update("employee", 1, &json!({"salary": "5250.50"})).unwrap();

        assert_eq!(updated.get("name"), Some(&json!("Ada")));
        assert_eq!(updated.get("salary"), Some(&json!(5250.5)));
        assert_eq!(store.get("employee", 1).unwrap(), updated);
    }

    #[test]
    fn test_unique_keys() {
        let mut store = MemoryStore::new();
        store.create("department", &json!({"code": "ENG"})).unwrap();
        let err = store.create("department", &json!({"code": "ENG"})).unwrap_err();
        assert!(matches!(err, ServerError::Integrity(_)));

        store.create("department", &json!({"code": "OPS"})).unwrap();
        assert!(store.update("department", 2, &json!({"code": "ENG"})).is_err());
        assert!(store.update("department", 1, &json!({"code": "ENG", "name": "Eng"})).is_ok());

        // locations have no unique key
        store.create("location", &json!({"code": "HQ"})).unwrap();
        store.create("location", &json!({"code": "HQ"})).unwrap();
    }

    #[test]
    fn test_missing_records_and_resources() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("tier", 1), Err(ServerError::NotFound));
        assert_eq!(store.delete("location", 5), Err(ServerError::NotFound));
        assert_eq!(store.list("payroll"), Err(ServerError::NotFound));
        assert!(store.update("tier", 3, &json!({})).is_err());
    }

    #[test]
    fn test_delete_removes_row() {
        let mut store = MemoryStore::new();
        store.create("tier", &json!({"code": "T1"})).unwrap();
        store.delete("tier", 1).unwrap();
        assert!(store.list("tier").unwrap().is_empty());
        let next = store.create("tier", &json!({"code": "T2"})).unwrap();
        assert_eq!(next.get("id"), Some(&json!(2)));
    }

    #[test]
    fn test_coerce_numeric_text() {
        let location_id = Column::new("locationId", "Location Id").kind(ValueKind::Number);
        let salary = Column::new("salary", "Salary").kind(ValueKind::Decimal);
        let name = Column::new("name", "Name");

        assert_eq!(coerce(&location_id, &json!(" 3 ")).unwrap(), json!(3));
        assert_eq!(coerce(&location_id, &json!("")).unwrap(), Value::Null);
        assert!(coerce(&location_id, &json!("3.5")).is_err());
        assert_eq!(coerce(&salary, &json!("1,250.75")).unwrap(), json!(1250.75));
        assert!(coerce(&salary, &json!("lots")).is_err());
        assert_eq!(coerce(&name, &json!(12)).unwrap(), json!("12"));
        assert_eq!(coerce(&name, &json!("")).unwrap(), json!(""));
        assert!(coerce(&name, &json!({"x": 1})).is_err());
    }

    #[test]
    fn test_non_object_payload() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.create("tier", &json!([1])),
            Err(ServerError::BadRequest(_))
        ));
    }
}
