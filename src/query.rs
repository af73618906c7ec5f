//! Predefined report queries.
//!
//! Result shapes are opaque: columns are discovered from the keys of the
//! first returned row only, in that row's key order. Fields that only later
//! rows carry are not shown.

use crate::api::Backend;
use crate::record::display_value;
use crate::ui::output::{error_line, loading_line, title_line};
use crate::ui::TableBuilder;
use serde_json::Value;

/// The reports the console offers by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredefinedQuery {
    CumulativeSalary,
    DeptAnalysis,
    SalaryRanking,
}

impl PredefinedQuery {
    pub const ALL: [PredefinedQuery; 3] = [
        PredefinedQuery::CumulativeSalary,
        PredefinedQuery::DeptAnalysis,
        PredefinedQuery::SalaryRanking,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PredefinedQuery::CumulativeSalary => "q1",
            PredefinedQuery::DeptAnalysis => "q2",
            PredefinedQuery::SalaryRanking => "q3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PredefinedQuery::CumulativeSalary => "Cumulative Salary",
            PredefinedQuery::DeptAnalysis => "Dept Analysis",
            PredefinedQuery::SalaryRanking => "Salary Ranking",
        }
    }
}

pub struct QueryRunner<B: Backend> {
    backend: B,
    data: Vec<Value>,
    loading: bool,
    error: Option<String>,
    last: Option<String>,
}

impl<B: Backend> QueryRunner<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            data: Vec::new(),
            loading: false,
            error: None,
            last: None,
        }
    }

    pub fn data(&self) -> &[Value] {
        &self.data
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Run a named query. A single object result becomes a one-row result;
    /// on failure the previous rows are kept next to the error.
    pub async fn run(&mut self, name: &str) -> bool {
        self.loading = true;
        self.error = None;
        let result = self.backend.query(name).await;
        self.loading = false;

        match result {
            Ok(value) => {
                self.data = rows_from(value);
                self.last = Some(name.to_string());
                tracing::debug!("query {} returned {} rows", name, self.data.len());
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Column names taken from the first row.
    pub fn columns(&self) -> Vec<String> {
        match self.data.first() {
            Some(Value::Object(first)) => first.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = vec![title_line("Complex Queries")];
        out.push(
            PredefinedQuery::ALL
                .iter()
                .map(|q| format!("run {} ({})", q.name(), q.label()))
                .collect::<Vec<_>>()
                .join("  "),
        );

        if self.loading {
            out.push(loading_line());
        }
        if let Some(error) = &self.error {
            out.push(error_line(error));
        }
        if let Some(last) = &self.last {
            out.push(format!("{} row(s) from {}", self.data.len(), last));
        }

        if !self.data.is_empty() {
            let columns = self.columns();
            let mut grid = TableBuilder::new(columns.iter().cloned());
            for row in &self.data {
                grid.add_row(columns.iter().map(|k| display_value(row.get(k))).collect());
            }
            out.push(grid.build());
        }
        out.join("\n")
    }
}

fn rows_from(value: Option<Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(rows)) => rows,
        Some(single) => vec![single],
        None => Vec::new(),
    }
}
