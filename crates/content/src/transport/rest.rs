use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;
use tracing::debug;

use portal_config::BackendConfig;

use super::Transport;
use crate::error::{BackendError, BackendResult};
use crate::query::Query;

const REST_PREFIX: &str = "rest/v1";

/// Sends queries to the hosted store's REST interface.
#[derive(Clone)]
pub struct RestTransport {
    client: Client,
    base_url: String,
}

impl RestTransport {
    pub fn new(config: &BackendConfig) -> BackendResult<Self> {
        if !config.is_configured() {
            return Err(BackendError::NotConfigured);
        }

        let mut headers = header::HeaderMap::new();
        if let Some(key) = &config.anon_key {
            let apikey = header::HeaderValue::from_str(key)
                .map_err(|err| BackendError::Transport(format!("invalid api key: {err}")))?;
            let bearer = header::HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|err| BackendError::Transport(format!("invalid api key: {err}")))?;
            headers.insert("apikey", apikey);
            headers.insert(header::AUTHORIZATION, bearer);
        }
        if let Some(schema) = &config.schema {
            let profile = header::HeaderValue::from_str(schema)
                .map_err(|err| BackendError::Transport(format!("invalid schema name: {err}")))?;
            headers.insert("Accept-Profile", profile);
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.base_url, REST_PREFIX, table)
    }
}

#[async_trait]
impl Transport for RestTransport {
    fn source(&self) -> String {
        self.base_url.clone()
    }

    async fn execute(&self, query: &Query) -> BackendResult<Vec<Value>> {
        let url = self.table_url(&query.table);
        let params = query.to_params();
        debug!(table = %query.table, ?params, "querying content store");

        let response = self.client.get(url).query(&params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BackendError::from_response(status.as_u16(), &body));
        }

        match serde_json::from_str::<Value>(&body)? {
            Value::Array(rows) => Ok(rows),
            other => Err(BackendError::Decode(format!(
                "expected an array of rows, got {}",
                kind_of(&other)
            ))),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
