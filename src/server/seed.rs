//! Startup import of sample data from a JSON file.
//!
//! The file holds one array per resource. Resources are imported in
//! dependency order so employees can refer to locations by code.

use super::store::MemoryStore;
use crate::record::Fields;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

const IMPORT_ORDER: [&str; 4] = ["location", "department", "tier", "employee"];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub imported: Vec<(&'static str, usize)>,
    pub skipped: usize,
}

impl SeedSummary {
    pub fn count(&self, resource: &str) -> usize {
        self.imported
            .iter()
            .find(|(r, _)| *r == resource)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Import finished:")?;
        for (resource, count) in &self.imported {
            write!(f, " {}={}", resource, count)?;
        }
        write!(f, " (skipped {})", self.skipped)
    }
}

pub fn load_seed_file(store: &mut MemoryStore, path: &Path) -> anyhow::Result<SeedSummary> {
    let contents = std::fs::read_to_string(path)?;
    let seed: Value = serde_json::from_str(&contents)?;
    import(store, &seed)
}

pub fn import(store: &mut MemoryStore, seed: &Value) -> anyhow::Result<SeedSummary> {
    let Some(seed) = seed.as_object() else {
        anyhow::bail!("seed data must be a JSON object keyed by resource");
    };

    let mut summary = SeedSummary::default();
    for resource in IMPORT_ORDER {
        let rows = match seed.get(resource) {
            Some(Value::Array(rows)) => rows.as_slice(),
            Some(_) => anyhow::bail!("seed entry '{}' must be an array", resource),
            None => &[][..],
        };

        let location_codes = location_codes(store);
        let mut imported = 0;
        for row in rows {
            let Some(mut fields) = row.as_object().map(normalize) else {
                summary.skipped += 1;
                continue;
            };
            if fields.values().all(Value::is_null) {
                continue;
            }
            if resource == "employee" {
                if fields.get("empNo").is_none_or(Value::is_null) {
                    summary.skipped += 1;
                    continue;
                }
                resolve_location(&mut fields, &location_codes);
            }

            match store.create(resource, &Value::Object(fields)) {
                Ok(_) => imported += 1,
                Err(e) => {
                    tracing::warn!("skipping {} seed row: {}", resource, e);
                    summary.skipped += 1;
                }
            }
        }
        summary.imported.push((resource, imported));
    }

    Ok(summary)
}

/// Trim text and turn blank text into null.
fn normalize(row: &Fields) -> Fields {
    row.iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) if s.trim().is_empty() => Value::Null,
                Value::String(s) => Value::String(s.trim().to_string()),
                other => other.clone(),
            };
            (key.clone(), value)
        })
        .collect()
}

fn location_codes(store: &MemoryStore) -> HashMap<String, i64> {
    store
        .rows("location")
        .filter_map(|l| {
            let code = l.get("code")?.as_str()?;
            let id = l.get("id")?.as_i64()?;
            Some((code.to_string(), id))
        })
        .collect()
}

/// `locationId` may be given as a number or as a location code.
fn resolve_location(fields: &mut Fields, codes: &HashMap<String, i64>) {
    let Some(Value::String(raw)) = fields.get("locationId") else {
        return;
    };
    let resolved = match raw.parse::<i64>() {
        Ok(id) => Value::from(id),
        Err(_) => codes.get(raw).map(|id| Value::from(*id)).unwrap_or(Value::Null),
    };
    fields.insert("locationId".to_string(), resolved);
}
