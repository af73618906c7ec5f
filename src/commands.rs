use opsconsole::api::Backend;
use opsconsole::entities::{self, Department, Employee, Location, Tier};
use opsconsole::record::{Fields, Record};
use opsconsole::ui::{success, warn, Confirm, TableBuilder};
use opsconsole::{Error, QueryRunner, RecordTable, Schema};
use serde_json::Value;

/// Run a schema-generic command against the entity named by `$resource`.
macro_rules! with_schema {
    ($resource:expr, $run:ident($($arg:expr),*)) => {
        match entities::lookup($resource).map(|info| info.resource) {
            Some("employee") => $run::<Employee, _>($($arg),*).await,
            Some("department") => $run::<Department, _>($($arg),*).await,
            Some("location") => $run::<Location, _>($($arg),*).await,
            Some("tier") => $run::<Tier, _>($($arg),*).await,
            _ => Err(unknown_resource($resource)),
        }
    };
}

fn unknown_resource(resource: &str) -> anyhow::Error {
    let known: Vec<_> = entities::all().iter().map(|info| info.resource).collect();
    Error::Validation(format!(
        "unknown resource '{}' (expected one of: {})",
        resource,
        known.join(", ")
    ))
    .into()
}

/// Split `key=value` arguments. The value may itself contain `=`.
pub fn parse_assignments(pairs: &[String]) -> opsconsole::Result<Vec<(String, String)>> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(Error::Validation(format!(
                "expected key=value, got '{}'",
                pair
            ))),
        })
        .collect()
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn table_error<S: Schema, B: Backend>(table: &RecordTable<S, B>) -> anyhow::Error {
    anyhow::anyhow!(
        "{}",
        table.error().unwrap_or("request failed").to_string()
    )
}

pub async fn run_list<S: Schema, B: Backend>(backend: B, page: usize, json: bool) -> anyhow::Result<()> {
    let mut table = RecordTable::<S, B>::mount(backend).await;
    if table.error().is_some() {
        return Err(table_error(&table));
    }
    table.go_to_page(page);

    if json {
        let rows: Vec<&Fields> = table.page_items().iter().map(Record::fields).collect();
        print_json(&rows)
    } else {
        println!("{}", table.render());
        Ok(())
    }
}

async fn fetch<S: Schema, B: Backend>(backend: &B, id: &str) -> anyhow::Result<Record<S>> {
    let value = backend.get(S::RESOURCE, id).await?;
    value
        .and_then(Record::from_value)
        .ok_or_else(|| anyhow::anyhow!("{} {} returned no record", S::RESOURCE, id))
}

pub async fn run_get<S: Schema, B: Backend>(backend: B, id: String, json: bool) -> anyhow::Result<()> {
    let record = fetch::<S, B>(&backend, &id).await?;
    if json {
        return print_json(record.fields());
    }

    let mut grid = TableBuilder::new(["Field", "Value"]);
    for column in S::columns() {
        grid.add_row(vec![column.label.to_string(), record.display(column.key)]);
    }
    println!("{}", grid.build());
    Ok(())
}

pub async fn run_create<S: Schema, B: Backend>(
    backend: B,
    assignments: Vec<(String, String)>,
) -> anyhow::Result<()> {
    let mut table = RecordTable::<S, B>::new(backend);
    table.start_create();
    for (key, value) in &assignments {
        table.set_field(key, value)?;
    }
    if !table.save().await {
        return Err(table_error(&table));
    }
    success(&format!("Created {}", S::RESOURCE));
    Ok(())
}

pub async fn run_update<S: Schema, B: Backend>(
    backend: B,
    id: String,
    assignments: Vec<(String, String)>,
) -> anyhow::Result<()> {
    let record = fetch::<S, B>(&backend, &id).await?;
    let mut table = RecordTable::<S, B>::new(backend);
    table.start_edit(&record);
    for (key, value) in &assignments {
        table.set_field(key, value)?;
    }
    if !table.save().await {
        return Err(table_error(&table));
    }
    success(&format!("Updated {} {}", S::RESOURCE, id));
    Ok(())
}

pub async fn run_delete<S: Schema, B: Backend>(
    backend: B,
    id: String,
    confirm: &dyn Confirm,
) -> anyhow::Result<()> {
    let mut fields = Fields::new();
    fields.insert(S::ID_FIELD.to_string(), Value::String(id.clone()));
    let record = Record::<S>::from_fields(fields);

    let mut table = RecordTable::<S, B>::new(backend);
    if table.remove(&record, confirm).await {
        success(&format!("Deleted {} {}", S::RESOURCE, id));
        return Ok(());
    }
    match table.error() {
        Some(_) => Err(table_error(&table)),
        None => {
            warn("Delete cancelled");
            Ok(())
        }
    }
}

pub async fn run_query<B: Backend>(backend: B, name: &str, json: bool) -> anyhow::Result<()> {
    let mut runner = QueryRunner::new(backend);
    if !runner.run(name).await {
        anyhow::bail!("{}", runner.error().unwrap_or("query failed").to_string());
    }

    if json {
        print_json(&Value::Array(runner.data().to_vec()))
    } else {
        println!("{}", runner.render());
        Ok(())
    }
}

pub async fn list<B: Backend>(backend: B, resource: &str, page: usize, json: bool) -> anyhow::Result<()> {
    with_schema!(resource, run_list(backend, page, json))
}

pub async fn get<B: Backend>(backend: B, resource: &str, id: String, json: bool) -> anyhow::Result<()> {
    with_schema!(resource, run_get(backend, id, json))
}

pub async fn create<B: Backend>(backend: B, resource: &str, pairs: &[String]) -> anyhow::Result<()> {
    let assignments = parse_assignments(pairs)?;
    with_schema!(resource, run_create(backend, assignments))
}

pub async fn update<B: Backend>(
    backend: B,
    resource: &str,
    id: String,
    pairs: &[String],
) -> anyhow::Result<()> {
    let assignments = parse_assignments(pairs)?;
    with_schema!(resource, run_update(backend, id, assignments))
}

pub async fn delete<B: Backend>(
    backend: B,
    resource: &str,
    id: String,
    confirm: &dyn Confirm,
) -> anyhow::Result<()> {
    with_schema!(resource, run_delete(backend, id, confirm))
}
