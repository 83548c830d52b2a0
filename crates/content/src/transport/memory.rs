use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::Transport;
use crate::error::{BackendError, BackendResult};
use crate::query::{render_value, Column, Direction, Embed, Filter, Query, Relation, Selection};

type Row = Map<String, Value>;

/// Demo snapshot bundled with the crate, used by `--fixtures` and the test suites.
pub const SAMPLE_SNAPSHOT: &str = include_str!("../../fixtures/snapshot.json");

/// Evaluates queries against in-process tables with the store's join semantics.
///
/// Used for tests and for serving a fixture snapshot without a hosted backend.
#[derive(Default)]
pub struct MemoryTransport {
    tables: RwLock<HashMap<String, Vec<Row>>>,
    failure: RwLock<Option<BackendError>>,
    executed: AtomicUsize,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load tables from a JSON object of `{ "<table>": [ {row}, ... ] }`.
    pub fn from_json(snapshot: Value) -> BackendResult<Self> {
        let Value::Object(tables) = snapshot else {
            return Err(BackendError::Decode(
                "fixture snapshot must be an object of tables".to_string(),
            ));
        };

        let mut parsed = HashMap::new();
        for (table, rows) in tables {
            parsed.insert(table.clone(), rows_from(&table, rows)?);
        }

        Ok(Self {
            tables: RwLock::new(parsed),
            ..Self::default()
        })
    }

    pub fn sample() -> BackendResult<Self> {
        Self::from_json(serde_json::from_str(SAMPLE_SNAPSHOT)?)
    }

    /// Load a snapshot written in the [`MemoryTransport::from_json`] layout.
    pub async fn from_file(path: impl AsRef<Path>) -> BackendResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|err| {
            BackendError::Transport(format!("cannot read fixtures {}: {err}", path.display()))
        })?;
        Self::from_json(serde_json::from_str(&raw)?)
    }

    pub fn with_table(mut self, table: &str, rows: Vec<Value>) -> BackendResult<Self> {
        let rows = rows_from(table, Value::Array(rows))?;
        self.tables.get_mut().insert(table.to_string(), rows);
        Ok(self)
    }

    /// Make every subsequent query fail with `error` until [`MemoryTransport::recover`].
    pub async fn fail_with(&self, error: BackendError) {
        *self.failure.write().await = Some(error);
    }

    pub async fn recover(&self) {
        *self.failure.write().await = None;
    }

    /// Number of queries executed so far, including failed ones.
    pub fn executed(&self) -> usize {
        self.executed.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    fn source(&self) -> String {
        "fixtures".to_string()
    }

    async fn execute(&self, query: &Query) -> BackendResult<Vec<Value>> {
        self.executed.fetch_add(1, AtomicOrdering::SeqCst);

        if let Some(error) = self.failure.read().await.clone() {
            return Err(error);
        }

        let tables = self.tables.read().await;
        evaluate(&tables, query)
    }
}

fn rows_from(table: &str, rows: Value) -> BackendResult<Vec<Row>> {
    let Value::Array(rows) = rows else {
        return Err(BackendError::Decode(format!(
            "table {table} must be an array of rows"
        )));
    };

    rows.into_iter()
        .map(|row| match row {
            Value::Object(row) => Ok(row),
            _ => Err(BackendError::Decode(format!(
                "rows for table {table} must be objects"
            ))),
        })
        .collect()
}

fn evaluate(tables: &HashMap<String, Vec<Row>>, query: &Query) -> BackendResult<Vec<Value>> {
    let rows = table(tables, &query.table)?;
    let top_level: Vec<&Filter> = query
        .filters
        .iter()
        .filter(|filter| filter.path.len() == 1)
        .collect();

    for filter in &query.filters {
        let embedding = filter.embedding();
        if !embedding.is_empty() && resolve_embed(&query.selection, embedding).is_none() {
            return Err(unknown_embedding(&query.table, &embedding.join(".")));
        }
    }

    let mut matched: Vec<(&Row, Row)> = Vec::new();
    for row in rows {
        if !top_level.iter().all(|filter| matches(row, filter)) {
            continue;
        }
        if let Some(projected) = project(tables, row, &query.selection, &query.filters, &[])? {
            matched.push((row, projected));
        }
    }

    if let Some(order) = &query.order {
        matched.sort_by(|(left, _), (right, _)| {
            compare(
                left.get(&order.column),
                right.get(&order.column),
                order.direction,
            )
        });
    }

    let limit = query.limit.unwrap_or(usize::MAX);
    Ok(matched
        .into_iter()
        .take(limit)
        .map(|(_, projected)| Value::Object(projected))
        .collect())
}

fn table<'a>(tables: &'a HashMap<String, Vec<Row>>, name: &str) -> BackendResult<&'a [Row]> {
    tables
        .get(name)
        .map(Vec::as_slice)
        .ok_or_else(|| BackendError::Rejected {
            status: 404,
            code: Some("42P01".to_string()),
            message: format!("relation \"public.{name}\" does not exist"),
        })
}

fn unknown_embedding(parent: &str, name: &str) -> BackendError {
    BackendError::Rejected {
        status: 400,
        code: Some("PGRST200".to_string()),
        message: format!("Could not find a relationship between '{parent}' and '{name}'"),
    }
}

fn resolve_embed<'a>(selection: &'a Selection, path: &[String]) -> Option<&'a Embed> {
    let (first, rest) = path.split_first()?;
    let embed = selection.embedding(first)?;
    if rest.is_empty() {
        Some(embed)
    } else {
        resolve_embed(&embed.selection, rest)
    }
}

/// Project `row` through `selection`. `None` means an inner embedding had no match
/// and the row must be dropped.
fn project(
    tables: &HashMap<String, Vec<Row>>,
    row: &Row,
    selection: &Selection,
    filters: &[Filter],
    prefix: &[String],
) -> BackendResult<Option<Row>> {
    let mut projected = Row::new();

    for column in &selection.columns {
        match column {
            Column::All => {
                for (key, value) in row {
                    projected.insert(key.clone(), value.clone());
                }
            }
            Column::Field(name) => {
                projected.insert(name.clone(), row.get(name).cloned().unwrap_or(Value::Null));
            }
            Column::Embed(embed) => {
                let mut path = prefix.to_vec();
                path.push(embed.name.clone());
                let local: Vec<&Filter> = filters
                    .iter()
                    .filter(|filter| filter.embedding() == path.as_slice())
                    .collect();
                let children = table(tables, &embed.table)
                    .map_err(|_| unknown_embedding(&embed.name, &embed.table))?;

                match &embed.relation {
                    Relation::ToOne { foreign_key } => {
                        let child = row
                            .get(foreign_key)
                            .filter(|value| !value.is_null())
                            .and_then(|key| {
                                children.iter().find(|candidate| same_key(candidate.get("id"), key))
                            })
                            .filter(|child| local.iter().all(|filter| matches(child, filter)));

                        let nested = match child {
                            Some(child) => project(tables, child, &embed.selection, filters, &path)?,
                            None => None,
                        };

                        if nested.is_none() && embed.inner {
                            return Ok(None);
                        }
                        projected.insert(
                            embed.name.clone(),
                            nested.map(Value::Object).unwrap_or(Value::Null),
                        );
                    }
                    Relation::ToMany { foreign_key } => {
                        let mut items = Vec::new();
                        if let Some(id) = row.get("id").filter(|value| !value.is_null()) {
                            for child in children {
                                if !same_key(child.get(foreign_key), id) {
                                    continue;
                                }
                                if !local.iter().all(|filter| matches(child, filter)) {
                                    continue;
                                }
                                if let Some(nested) =
                                    project(tables, child, &embed.selection, filters, &path)?
                                {
                                    items.push(Value::Object(nested));
                                }
                            }
                        }

                        if items.is_empty() && embed.inner {
                            return Ok(None);
                        }
                        projected.insert(embed.name.clone(), Value::Array(items));
                    }
                }
            }
        }
    }

    Ok(Some(projected))
}

fn same_key(candidate: Option<&Value>, key: &Value) -> bool {
    candidate.is_some_and(|value| !value.is_null() && render_value(value) == render_value(key))
}

fn matches(row: &Row, filter: &Filter) -> bool {
    row.get(filter.column())
        .is_some_and(|value| render_value(value) == render_value(&filter.value))
}

/// Postgres default ordering: nulls last ascending, first descending.
fn compare(left: Option<&Value>, right: Option<&Value>, direction: Direction) -> Ordering {
    let left = left.filter(|value| !value.is_null());
    let right = right.filter(|value| !value.is_null());

    let ascending = match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => compare_scalars(left, right),
    };

    match direction {
        Direction::Ascending => ascending,
        Direction::Descending => ascending.reverse(),
    }
}

fn compare_scalars(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => left
            .as_f64()
            .partial_cmp(&right.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(left), Value::String(right)) => left.cmp(right),
        (Value::Bool(left), Value::Bool(right)) => left.cmp(right),
        _ => render_value(left).cmp(&render_value(right)),
    }
}
