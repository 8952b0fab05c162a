// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Qdrant-backed [`VectorBackend`] over the REST API.
//!
//! Talks to a Qdrant instance configured via [`QdrantConfig`]. Collection
//! creation uses cosine distance; point ids are UUID strings, which Qdrant
//! accepts natively.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use luma_config::QdrantConfig;
use luma_core::{LumaError, VectorBackend, VectorHit, VectorPoint};

/// Remote vector backend speaking the Qdrant REST API.
#[derive(Debug, Clone)]
pub struct QdrantBackend {
    client: reqwest::Client,
    base_url: String,
}

impl QdrantBackend {
    /// Creates a client from configuration.
    ///
    /// Fails with [`LumaError::Config`] when no URL is configured; the
    /// optional API key is sent as Qdrant's `api-key` header.
    pub fn new(config: &QdrantConfig) -> Result<Self, LumaError> {
        let base_url = config
            .url
            .clone()
            .ok_or_else(|| LumaError::Config("qdrant.url is required for QdrantBackend".into()))?;

        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        if let Some(api_key) = &config.api_key {
            headers.insert(
                "api-key",
                HeaderValue::from_str(api_key)
                    .map_err(|e| LumaError::Config(format!("invalid qdrant api key: {e}")))?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| LumaError::VectorBackend {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, name: &str) -> String {
        format!("{}/collections/{name}", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    result: Vec<SearchResultEntry>,
}

#[derive(Debug, Deserialize)]
struct SearchResultEntry {
    id: serde_json::Value,
    score: f32,
    #[serde(default)]
    payload: serde_json::Value,
}

fn id_to_string(id: serde_json::Value) -> String {
    match id {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

fn request_error(context: &str, e: reqwest::Error) -> LumaError {
    LumaError::VectorBackend {
        message: format!("{context}: {e}"),
        source: Some(Box::new(e)),
    }
}

async fn status_error(context: &str, response: reqwest::Response) -> LumaError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    LumaError::backend(format!("{context}: status {status}, body: {body}"))
}

#[async_trait]
impl VectorBackend for QdrantBackend {
    async fn collection_exists(&self, name: &str) -> Result<bool, LumaError> {
        let response = self
            .client
            .get(self.collection_url(name))
            .send()
            .await
            .map_err(|e| request_error("collection lookup failed", e))?;
        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(status_error("collection lookup failed", response).await),
        }
    }

    async fn create_collection(&self, name: &str, dimension: usize) -> Result<(), LumaError> {
        debug!(collection = name, dimension, "creating qdrant collection");
        let response = self
            .client
            .put(self.collection_url(name))
            .json(&json!({
                "vectors": { "size": dimension, "distance": "Cosine" }
            }))
            .send()
            .await
            .map_err(|e| request_error("collection creation failed", e))?;
        if !response.status().is_success() {
            return Err(status_error("collection creation failed", response).await);
        }
        Ok(())
    }

    async fn upsert(&self, collection: &str, points: Vec<VectorPoint>) -> Result<(), LumaError> {
        let body = json!({
            "points": points
                .iter()
                .map(|p| json!({ "id": p.id, "vector": p.vector, "payload": p.payload }))
                .collect::<Vec<_>>()
        });
        let response = self
            .client
            .put(format!("{}/points?wait=true", self.collection_url(collection)))
            .json(&body)
            .send()
            .await
            .map_err(|e| request_error("point upsert failed", e))?;
        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(LumaError::CollectionNotFound {
                collection: collection.to_string(),
            }),
            _ => Err(status_error("point upsert failed", response).await),
        }
    }

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<VectorHit>, LumaError> {
        let response = self
            .client
            .post(format!(
                "{}/points/search",
                self.collection_url(collection)
            ))
            .json(&json!({
                "vector": vector,
                "limit": limit,
                "with_payload": true
            }))
            .send()
            .await
            .map_err(|e| request_error("point search failed", e))?;
        match response.status() {
            status if status.is_success() => {
                let parsed: SearchResponse =
                    response.json().await.map_err(|e| LumaError::VectorBackend {
                        message: format!("malformed search response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                Ok(parsed
                    .result
                    .into_iter()
                    .map(|entry| VectorHit {
                        id: id_to_string(entry.id),
                        score: entry.score,
                        payload: entry.payload,
                    })
                    .collect())
            }
            StatusCode::NOT_FOUND => Err(LumaError::CollectionNotFound {
                collection: collection.to_string(),
            }),
            _ => Err(status_error("point search failed", response).await),
        }
    }
}
