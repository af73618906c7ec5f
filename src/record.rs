//! Schema-typed records.
//!
//! A record is an ordered field map as received from the backend. The
//! schema parameter only fixes which resource the record belongs to and
//! which field identifies it; no field structure is enforced.

use crate::schema::Schema;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

pub type Fields = serde_json::Map<String, Value>;

pub struct Record<S> {
    fields: Fields,
    _schema: PhantomData<fn() -> S>,
}

impl<S: Schema> Record<S> {
    pub fn from_fields(fields: Fields) -> Self {
        Self {
            fields,
            _schema: PhantomData,
        }
    }

    /// Wrap a JSON object; any other JSON value is not a record.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::from_fields(fields)),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Identifier value, if present and not null.
    pub fn id(&self) -> Option<&Value> {
        self.fields.get(S::ID_FIELD).filter(|v| !v.is_null())
    }

    /// Cell text for a field.
    pub fn display(&self, key: &str) -> String {
        display_value(self.fields.get(key))
    }

    /// Render identity: the identifier text, or the whole record as JSON.
    pub fn row_key(&self) -> String {
        match self.id() {
            Some(id) => id_segment(id),
            None => Value::Object(self.fields.clone()).to_string(),
        }
    }
}

/// Stringify a field for display. Null and absent fields are empty, strings
/// are shown without quotes, everything else as its JSON text.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Text of an identifier as used in a URL path segment or a prompt.
pub fn id_segment(id: &Value) -> String {
    display_value(Some(id))
}

impl<S> Clone for Record<S> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            _schema: PhantomData,
        }
    }
}

impl<S> PartialEq for Record<S> {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl<S> fmt::Debug for Record<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Record").field(&self.fields).finish()
    }
}
