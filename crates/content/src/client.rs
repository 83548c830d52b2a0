use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use portal_config::BackendConfig;

use crate::error::BackendResult;
use crate::query::Query;
use crate::transport::{RestTransport, Transport};

/// Shared handle to the content store.
///
/// Construct it once and clone it into every component that reads from the store;
/// clones share the same transport and connection pool.
#[derive(Clone)]
pub struct BackendClient {
    transport: Arc<dyn Transport>,
}

impl BackendClient {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Client for the hosted store's REST interface.
    pub fn rest(config: &BackendConfig) -> BackendResult<Self> {
        Ok(Self::new(RestTransport::new(config)?))
    }

    /// Description of the backing store, e.g. its base URL.
    pub fn source(&self) -> String {
        self.transport.source()
    }

    pub async fn rows(&self, query: &Query) -> BackendResult<Vec<Value>> {
        self.transport.execute(query).await
    }

    /// Execute `query` and decode each row as `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, query: &Query) -> BackendResult<Vec<T>> {
        let rows = self.rows(query).await?;
        debug!(table = %query.table, count = rows.len(), "content rows received");

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(Into::into))
            .collect()
    }
}
