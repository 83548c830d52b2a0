//! Query execution backends.

mod memory;
mod rest;

pub use memory::{MemoryTransport, SAMPLE_SNAPSHOT};
pub use rest::RestTransport;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::BackendResult;
use crate::query::Query;

/// Executes a [`Query`] and returns the matching rows as JSON objects.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, query: &Query) -> BackendResult<Vec<Value>>;

    /// Where rows come from, for health reporting. Never includes credentials.
    fn source(&self) -> String;
}
