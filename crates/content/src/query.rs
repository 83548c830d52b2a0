//! Structured read queries against the content store.
//!
//! A [`Query`] names a table, a column selection with nested relation
//! expansion, equality filters, an optional sort key and a row limit. Transports
//! either encode it as request parameters ([`Query::to_params`]) or evaluate it
//! directly against fixture tables.

use std::fmt;

use serde_json::Value;

/// Sort direction for [`Order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    fn as_param(self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// Equality filter. `path` holds embedded resource names followed by the column,
/// so `["galery", "status"]` filters the `galery` embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub path: Vec<String>,
    pub value: Value,
}

impl Filter {
    pub fn column(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    /// Embedding names leading to the filtered column.
    pub fn embedding(&self) -> &[String] {
        &self.path[..self.path.len().saturating_sub(1)]
    }
}

/// How an embedded resource joins to its parent row.
#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    /// `parent.<foreign_key>` references `child.id`.
    ToOne { foreign_key: String },
    /// `child.<foreign_key>` references `parent.id`.
    ToMany { foreign_key: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    pub name: String,
    pub table: String,
    pub relation: Relation,
    pub inner: bool,
    pub selection: Selection,
}

impl Embed {
    /// Embed a single row referenced by `foreign_key` on the parent, exposed under `name`.
    pub fn to_one(name: &str, table: &str, foreign_key: &str) -> Self {
        Self {
            name: name.to_string(),
            table: table.to_string(),
            relation: Relation::ToOne {
                foreign_key: foreign_key.to_string(),
            },
            inner: false,
            selection: Selection::all(),
        }
    }

    /// Embed every row of `table` whose `foreign_key` references the parent.
    pub fn to_many(table: &str, foreign_key: &str) -> Self {
        Self {
            name: table.to_string(),
            table: table.to_string(),
            relation: Relation::ToMany {
                foreign_key: foreign_key.to_string(),
            },
            inner: false,
            selection: Selection::all(),
        }
    }

    /// Drop parent rows that have no matching embedded row.
    pub fn inner(mut self) -> Self {
        self.inner = true;
        self
    }

    pub fn select(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    All,
    Field(String),
    Embed(Embed),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    pub columns: Vec<Column>,
}

impl Selection {
    pub fn all() -> Self {
        Self {
            columns: vec![Column::All],
        }
    }

    pub fn fields<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            columns: names
                .into_iter()
                .map(|name| Column::Field(name.to_string()))
                .collect(),
        }
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.columns.push(Column::Embed(embed));
        self
    }

    /// Find an embedding by its exposed name.
    pub fn embedding(&self, name: &str) -> Option<&Embed> {
        self.columns.iter().find_map(|column| match column {
            Column::Embed(embed) if embed.name == name => Some(embed),
            _ => None,
        })
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for column in &self.columns {
            if !first {
                f.write_str(",")?;
            }
            first = false;

            match column {
                Column::All => f.write_str("*")?,
                Column::Field(name) => f.write_str(name)?,
                Column::Embed(embed) => {
                    match &embed.relation {
                        Relation::ToOne { foreign_key } => {
                            write!(f, "{}:{}", embed.name, foreign_key)?
                        }
                        Relation::ToMany { .. } if embed.name == embed.table => {
                            f.write_str(&embed.table)?
                        }
                        Relation::ToMany { .. } => write!(f, "{}:{}", embed.name, embed.table)?,
                    }
                    if embed.inner {
                        f.write_str("!inner")?;
                    }
                    write!(f, "({})", embed.selection)?;
                }
            }
        }
        Ok(())
    }
}

/// A read-only query against one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: String,
    pub selection: Selection,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn table(table: &str) -> Self {
        Self {
            table: table.to_string(),
            selection: Selection::all(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn select(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Add an equality filter. Dotted paths (`galery.status`) filter an embedding.
    pub fn eq(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            path: path.split('.').map(str::to_string).collect(),
            value: value.into(),
        });
        self
    }

    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Encode as query-string pairs for the store's REST interface.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.selection.to_string())];

        for filter in &self.filters {
            params.push((
                filter.path.join("."),
                format!("eq.{}", render_value(&filter.value)),
            ));
        }

        if let Some(order) = &self.order {
            params.push((
                "order".to_string(),
                format!("{}.{}", order.column, order.direction.as_param()),
            ));
        }

        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }
}

/// Text form of a scalar as the store compares it in filters.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
