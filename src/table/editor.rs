use crate::record::Fields;
use crate::schema::SchemaInfo;
use serde_json::Value;

/// What the editor is doing. Only one row is ever edited at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum EditMode {
    Idle,
    Creating,
    /// Editing an existing row; `id` is captured when editing starts.
    Editing { id: Option<Value> },
}

/// In-progress form for a create or an edit.
#[derive(Debug, Clone)]
pub struct Editor {
    mode: EditMode,
    form: Fields,
}

impl Default for Editor {
    fn default() -> Self {
        Self {
            mode: EditMode::Idle,
            form: Fields::new(),
        }
    }
}

impl Editor {
    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn form(&self) -> &Fields {
        &self.form
    }

    pub fn is_open(&self) -> bool {
        self.mode != EditMode::Idle
    }

    pub fn is_creating(&self) -> bool {
        self.mode == EditMode::Creating
    }

    pub fn title(&self) -> Option<&'static str> {
        match self.mode {
            EditMode::Idle => None,
            EditMode::Creating => Some("Create"),
            EditMode::Editing { .. } => Some("Edit"),
        }
    }

    /// Blank form: one empty text field per editable column.
    pub fn start_create(&mut self, schema: &SchemaInfo) {
        self.form = schema
            .editable_columns()
            .map(|c| (c.key.to_string(), Value::String(String::new())))
            .collect();
        self.mode = EditMode::Creating;
    }

    /// Form seeded with a shallow copy of the row.
    pub fn start_edit(&mut self, id: Option<Value>, fields: Fields) {
        self.form = fields;
        self.mode = EditMode::Editing { id };
    }

    pub fn cancel(&mut self) {
        self.mode = EditMode::Idle;
        self.form.clear();
    }

    /// Edited values are always kept as plain text.
    pub fn set(&mut self, key: &str, text: &str) {
        self.form
            .insert(key.to_string(), Value::String(text.to_string()));
    }

    /// Form text for a field, as shown in the form.
    pub fn value(&self, key: &str) -> String {
        crate::record::display_value(self.form.get(key))
    }
}
