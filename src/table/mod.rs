//! Schema-driven record table.
//!
//! One `RecordTable` backs every entity page: it lists the resource, pages
//! through the loaded rows, and runs the create / edit / delete flow. Every
//! backend failure is caught here and kept as inline error text.

pub mod editor;
pub mod pagination;
mod render;

pub use editor::{EditMode, Editor};
pub use pagination::{Pager, PAGE_SIZE};

use crate::api::Backend;
use crate::record::{id_segment, Record};
use crate::schema::Schema;
use crate::ui::Confirm;
use crate::{Error, Result};
use serde_json::Value;

/// Generation stamp of one list fetch. Only the newest ticket may apply its
/// result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

const NOTHING_OPEN: &str = "Nothing is being edited; use create or edit first";

pub struct RecordTable<S: Schema, B: Backend> {
    backend: B,
    items: Vec<Record<S>>,
    loading: bool,
    error: Option<String>,
    pager: Pager,
    editor: Editor,
    generation: u64,
}

impl<S: Schema, B: Backend> RecordTable<S, B> {
    /// An empty, not yet loaded table.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            items: Vec::new(),
            loading: false,
            error: None,
            pager: Pager::default(),
            editor: Editor::default(),
            generation: 0,
        }
    }

    /// Create the table and run its initial list fetch.
    pub async fn mount(backend: B) -> Self {
        let mut table = Self::new(backend);
        table.load().await;
        table
    }

    pub fn resource(&self) -> &'static str {
        S::RESOURCE
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn items(&self) -> &[Record<S>] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Re-fetch the list. Stale rows stay visible until the fetch settles.
    pub async fn load(&mut self) {
        let ticket = self.begin_load();
        let result = self.backend.list(S::RESOURCE).await;
        self.finish_load(ticket, result);
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        LoadTicket(self.generation)
    }

    /// Apply a list result. Returns false when the ticket was superseded and
    /// the result was dropped.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Option<Value>>) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(
                "dropping stale {} list (generation {} < {})",
                S::RESOURCE,
                ticket.0,
                self.generation
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(value) => self.items = records_from(value),
            Err(e) => self.error = Some(e.to_string()),
        }
        true
    }

    pub fn start_create(&mut self) {
        self.editor.start_create(&S::info());
    }

    pub fn start_edit(&mut self, record: &Record<S>) {
        self.editor
            .start_edit(record.id().cloned(), record.fields().clone());
    }

    pub fn cancel_edit(&mut self) {
        self.editor.cancel();
    }

    /// Put plain text into the open form. Only declared, non-identifier
    /// columns are editable.
    pub fn set_field(&mut self, key: &str, text: &str) -> Result<()> {
        let info = S::info();
        let rejection = if !self.editor.is_open() {
            Some(NOTHING_OPEN.to_string())
        } else if key == info.id_field {
            Some(format!("{} is the identifier and cannot be edited", key))
        } else if info.column(key).is_none() {
            Some(format!("{} has no field named {}", S::RESOURCE, key))
        } else {
            None
        };

        if let Some(message) = rejection {
            self.error = Some(message.clone());
            return Err(Error::Validation(message));
        }
        self.editor.set(key, text);
        Ok(())
    }

    /// Submit the form. Creating posts a new record; editing puts to the id
    /// captured when editing began. On success the list is re-fetched and
    /// the editor closes; on failure the form is kept.
    pub async fn save(&mut self) -> bool {
        let payload = Value::Object(self.editor.form().clone());
        let outcome = match self.editor.mode().clone() {
            EditMode::Idle => {
                self.error = Some(NOTHING_OPEN.to_string());
                return false;
            }
            EditMode::Creating => self.backend.create(S::RESOURCE, &payload).await,
            EditMode::Editing { id: Some(id) } => {
                self.backend
                    .update(S::RESOURCE, &id_segment(&id), &payload)
                    .await
            }
            EditMode::Editing { id: None } => {
                self.error = Some(format!(
                    "Cannot update {}: the row has no {} value",
                    S::RESOURCE,
                    S::ID_FIELD
                ));
                return false;
            }
        };

        match outcome {
            Ok(saved) => {
                tracing::debug!("saved {}: {:?}", S::RESOURCE, saved);
                self.load().await;
                self.editor.cancel();
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Delete a row after confirmation, then re-fetch. A row without an
    /// identifier is refused without touching the backend.
    pub async fn remove(&mut self, record: &Record<S>, confirm: &dyn Confirm) -> bool {
        let Some(id) = record.id() else {
            self.error = Some(format!(
                "Cannot delete {}: the row has no {} value",
                S::RESOURCE,
                S::ID_FIELD
            ));
            return false;
        };

        let id = id_segment(id);
        if !confirm.confirm(&format!("Delete {} {}?", S::RESOURCE, id)) {
            return false;
        }

        match self.backend.delete(S::RESOURCE, &id).await {
            Ok(()) => {
                self.load().await;
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages(self.items.len())
    }

    pub fn page_items(&self) -> &[Record<S>] {
        &self.items[self.pager.range(self.items.len())]
    }

    /// Row on the visible page by 1-based position.
    pub fn row(&self, position: usize) -> Option<&Record<S>> {
        position
            .checked_sub(1)
            .and_then(|i| self.page_items().get(i))
    }

    pub fn can_prev(&self) -> bool {
        self.pager.can_prev()
    }

    pub fn can_next(&self) -> bool {
        self.pager.can_next(self.items.len())
    }

    pub fn prev_page(&mut self) {
        self.pager.prev();
    }

    pub fn next_page(&mut self) {
        self.pager.next(self.items.len());
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.pager.go_to(page, self.items.len());
    }
}

fn records_from<S: Schema>(value: Option<Value>) -> Vec<Record<S>> {
    match value {
        Some(Value::Array(values)) => values
            .into_iter()
            .filter_map(|v| {
                let record = Record::from_value(v);
                if record.is_none() {
                    tracing::warn!("skipping non-object row in {} list", S::RESOURCE);
                }
                record
            })
            .collect(),
        Some(other) => {
            tracing::warn!("{} list is not an array: {}", S::RESOURCE, other);
            Vec::new()
        }
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeBackend;
    use crate::entities::{Department, Employee, Location};
    use serde_json::json;
    use std::sync::Arc;

    fn locations(ids: std::ops::RangeInclusive<u64>) -> Value {
        Value::Array(
            ids.map(|i| json!({"id": i, "code": format!("L{}", i), "name": format!("Site {}", i)}))
                .collect(),
        )
    }

    fn yes(_: &str) -> bool {
        true
    }

    #[tokio::test]
    async fn test_mount_lists_in_server_order() {
        let backend = Arc::new(FakeBackend::new());
        backend.reply("GET", "/api/location", json!([{"id": 9}, {"id": 2}, {"id": 5}]));

        let table: RecordTable<Location, _> = RecordTable::mount(backend.clone()).await;
        let ids: Vec<_> = table.items().iter().map(|r| r.display("id")).collect();
        assert_eq!(ids, vec!["9", "2", "5"]);
        assert!(!table.is_loading());
        assert!(table.error().is_none());
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_repeated_list_is_stable() {
        let backend = Arc::new(FakeBackend::new());
        backend
            .reply("GET", "/api/location", locations(1..=3))
            .reply("GET", "/api/location", locations(1..=3));

        let mut table: RecordTable<Location, _> = RecordTable::mount(backend.clone()).await;
        let first = table.items().to_vec();
        table.load().await;
        assert_eq!(table.items(), &first[..]);
    }

    #[tokio::test]
    async fn test_rows_stay_visible_while_loading() {
        let backend = Arc::new(FakeBackend::new());
        backend.reply(
            "GET",
            "/api/location",
            json!([{"id": 1, "code": "HQ", "name": "Headquarters"}]),
        );

        let mut table: RecordTable<Location, _> = RecordTable::mount(backend).await;
        let before = table.items().to_vec();
        let _ticket = table.begin_load();

        assert!(table.is_loading());
        assert_eq!(table.items(), &before[..]);
        let out = table.render();
        assert!(out.contains("Loading..."));
        assert!(out.contains("HQ"));
    }

    #[tokio::test]
    async fn test_save_without_open_form_is_inline_error() {
        let backend = Arc::new(FakeBackend::new());
        let mut table: RecordTable<Location, _> = RecordTable::new(backend.clone());

        assert!(!table.save().await);
        assert_eq!(table.error(), Some(NOTHING_OPEN));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_list_failure_keeps_previous_items() {
        let backend = Arc::new(FakeBackend::new());
        backend
            .reply("GET", "/api/location", locations(1..=2))
            .fail("GET", "/api/location", "Service Unavailable");

        let mut table: RecordTable<Location, _> = RecordTable::mount(backend).await;
        table.load().await;
        assert_eq!(table.items().len(), 2);
        assert_eq!(table.error(), Some("Service Unavailable"));
        assert!(!table.is_loading());
    }

    #[tokio::test]
    async fn test_empty_or_non_array_list_is_empty() {
        let backend = Arc::new(FakeBackend::new());
        backend
            .reply_empty("GET", "/api/tier")
            .reply("GET", "/api/tier", json!({"id": 1}));

        let mut table: RecordTable<crate::entities::Tier, _> = RecordTable::mount(backend).await;
        assert!(table.items().is_empty());
        table.load().await;
        assert!(table.items().is_empty());
        assert!(table.error().is_none());
    }

    #[tokio::test]
    async fn test_create_department_closes_editor() {
        let backend = Arc::new(FakeBackend::new());
        backend
            .reply("GET", "/api/department", json!([]))
            .reply(
                "POST",
                "/api/department",
                json!({"id": 1, "code": "ENG", "name": "Engineering"}),
            )
            .reply(
                "GET",
                "/api/department",
                json!([{"id": 1, "code": "ENG", "name": "Engineering"}]),
            );

        let mut table: RecordTable<Department, _> = RecordTable::mount(backend.clone()).await;
        table.start_create();
        table.set_field("code", "ENG").unwrap();
        table.set_field("name", "Engineering").unwrap();
        assert!(table.save().await);

        assert!(!table.editor().is_open());
        assert_eq!(table.items().len(), 1);
        assert_eq!(table.items()[0].display("code"), "ENG");

        let posts = backend.calls_to("POST");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].body, Some(json!({"code": "ENG", "name": "Engineering"})));
    }

    #[tokio::test]
    async fn test_update_uses_id_captured_at_edit_start() {
        let backend = Arc::new(FakeBackend::new());
        backend.reply(
            "GET",
            "/api/employee",
            json!([{"id": 12, "empNo": "E12", "name": "Lin", "salary": 4000}]),
        );

        let mut table: RecordTable<Employee, _> = RecordTable::mount(backend.clone()).await;
        let row = table.items()[0].clone();
        table.start_edit(&row);
        table.set_field("salary", "4500").unwrap();
        assert!(table.save().await);

        let puts = backend.calls_to("PUT");
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].path, "/api/employee/12");
        assert_eq!(
            puts[0].body,
            Some(json!({"id": 12, "empNo": "E12", "name": "Lin", "salary": "4500"}))
        );
    }

    #[tokio::test]
    async fn test_save_failure_keeps_form() {
        let backend = Arc::new(FakeBackend::new());
        backend.fail("POST", "/api/department", "duplicate key value");

        let mut table: RecordTable<Department, _> = RecordTable::new(backend.clone());
        table.start_create();
        table.set_field("code", "ENG").unwrap();
        assert!(!table.save().await);

        assert_eq!(table.error(), Some("duplicate key value"));
        assert!(table.editor().is_creating());
        assert_eq!(table.editor().value("code"), "ENG");
        assert!(backend.calls_to("GET").is_empty());
    }

    #[tokio::test]
    async fn test_edit_row_without_id_is_not_sent() {
        let backend = Arc::new(FakeBackend::new());
        backend.reply("GET", "/api/department", json!([{"code": "ENG"}]));

        let mut table: RecordTable<Department, _> = RecordTable::mount(backend.clone()).await;
        let row = table.items()[0].clone();
        table.start_edit(&row);
        assert!(!table.save().await);
        assert!(table.error().unwrap().contains("no id"));
        assert!(table.editor().is_open());
        assert!(backend.calls_to("PUT").is_empty());
        assert!(backend.calls_to("POST").is_empty());
    }

    #[tokio::test]
    async fn test_set_field_rejections() {
        let mut table: RecordTable<Department, _> = RecordTable::new(FakeBackend::new());
        assert!(table.set_field("code", "X").is_err());

        table.start_create();
        assert!(table.set_field("id", "3").is_err());
        assert!(table.set_field("budget", "3").is_err());
        assert_eq!(table.error(), Some("department has no field named budget"));
        assert!(table.editor().form().get("budget").is_none());
    }

    #[tokio::test]
    async fn test_delete_not_found_shows_body_and_keeps_row() {
        let backend = Arc::new(FakeBackend::new());
        backend
            .reply("GET", "/api/location", locations(1..=5))
            .fail("DELETE", "/api/location/5", "not found");

        let mut table: RecordTable<Location, _> = RecordTable::mount(backend.clone()).await;
        let row = table.items()[4].clone();
        let prompts = std::sync::Mutex::new(Vec::new());
        let confirm = |p: &str| {
            prompts.lock().unwrap().push(p.to_string());
            true
        };
        assert!(!table.remove(&row, &confirm).await);

        assert_eq!(*prompts.lock().unwrap(), vec!["Delete location 5?".to_string()]);
        assert_eq!(table.error(), Some("not found"));
        assert!(table.items().iter().any(|r| r.display("id") == "5"));
        assert_eq!(backend.calls_to("GET").len(), 1);
    }

    #[tokio::test]
    async fn test_delete_success_refreshes() {
        let backend = Arc::new(FakeBackend::new());
        backend
            .reply("GET", "/api/location", locations(1..=2))
            .reply_empty("DELETE", "/api/location/2")
            .reply("GET", "/api/location", locations(1..=1));

        let mut table: RecordTable<Location, _> = RecordTable::mount(backend.clone()).await;
        let row = table.items()[1].clone();
        assert!(table.remove(&row, &yes).await);
        assert_eq!(table.items().len(), 1);
        assert_eq!(backend.calls_to("DELETE")[0].path, "/api/location/2");
    }

    #[tokio::test]
    async fn test_delete_declined_or_without_id() {
        let backend = Arc::new(FakeBackend::new());
        backend.reply("GET", "/api/location", json!([{"id": 3}, {"code": "X"}]));

        let mut table: RecordTable<Location, _> = RecordTable::mount(backend.clone()).await;
        let with_id = table.items()[0].clone();
        let without_id = table.items()[1].clone();

        let no = |_: &str| false;
        assert!(!table.remove(&with_id, &no).await);
        assert!(table.error().is_none());

        assert!(!table.remove(&without_id, &yes).await);
        assert!(table.error().is_some());
        assert!(backend.calls_to("DELETE").is_empty());
    }

    #[tokio::test]
    async fn test_delete_already_removed_row_still_calls_backend() {
        let backend = Arc::new(FakeBackend::new());
        backend.fail("DELETE", "/api/location/77", "not found");

        let mut table: RecordTable<Location, _> = RecordTable::new(backend.clone());
        let ghost = Record::from_value(json!({"id": 77})).unwrap();
        assert!(!table.remove(&ghost, &yes).await);
        assert_eq!(backend.calls_to("DELETE").len(), 1);
        assert_eq!(table.error(), Some("not found"));
    }

    #[tokio::test]
    async fn test_stale_load_is_dropped() {
        let mut table: RecordTable<Location, _> = RecordTable::new(FakeBackend::new());
        let stale = table.begin_load();
        let fresh = table.begin_load();

        assert!(table.finish_load(fresh, Ok(Some(locations(1..=1)))));
        assert!(!table.finish_load(stale, Ok(Some(locations(1..=9)))));
        assert_eq!(table.items().len(), 1);
        assert!(!table.is_loading());
    }

    #[tokio::test]
    async fn test_pagination_over_loaded_items() {
        let backend = Arc::new(FakeBackend::new());
        backend
            .reply("GET", "/api/location", locations(1..=21))
            .reply_empty("DELETE", "/api/location/21")
            .reply("GET", "/api/location", locations(1..=20));

        let mut table: RecordTable<Location, _> = RecordTable::mount(backend).await;
        assert_eq!(table.total_pages(), 3);
        assert_eq!(table.page_items().len(), 10);
        assert_eq!(table.page_items()[0].display("id"), "1");
        assert!(!table.can_prev());

        table.go_to_page(3);
        assert!(!table.can_next());
        assert_eq!(table.row(1).unwrap().display("id"), "21");
        assert!(table.row(2).is_none());

        let last = table.row(1).unwrap().clone();
        assert!(table.remove(&last, &yes).await);
        assert_eq!(table.page(), 3);
        assert_eq!(table.total_pages(), 2);
        assert!(table.page_items().is_empty());
    }
}
