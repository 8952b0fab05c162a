// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory store: deduplicating storage and multi-collection search.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

use luma_config::MemoryConfig;
use luma_core::{EmbeddingProvider, LumaError, VectorBackend, VectorHit, VectorPoint};

use crate::types::{Memory, MemoryMetadata};

/// Long-term fact storage over an embedding provider and a vector backend.
///
/// Storage is idempotent up to near-duplicates: a text whose embedding is
/// within `similarity_threshold` of an existing point in the target
/// collection reuses that point's id, replacing its payload in place.
pub struct MemoryStore {
    embedder: Arc<dyn EmbeddingProvider>,
    backend: Arc<dyn VectorBackend>,
    config: MemoryConfig,
}

impl MemoryStore {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        backend: Arc<dyn VectorBackend>,
        config: MemoryConfig,
    ) -> Self {
        Self {
            embedder,
            backend,
            config,
        }
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Stores a fact into `collection`, creating the collection on first use.
    ///
    /// Returns the stored memory with its final id. When a near-duplicate
    /// already exists the duplicate's id is reused and its payload replaced;
    /// the check and the write are not atomic, so two racing writers may
    /// each insert a fresh point. Both remain near-duplicates of each other
    /// and search still surfaces the fact.
    pub async fn store(
        &self,
        text: &str,
        metadata: MemoryMetadata,
        collection: &str,
    ) -> Result<Memory, LumaError> {
        self.ensure_collection(collection).await?;

        let id = match self.find_similar(text, collection).await? {
            Some(existing) => {
                debug!(
                    collection,
                    id = %existing.id,
                    score = existing.score.unwrap_or_default(),
                    "near-duplicate found, reusing id"
                );
                existing.id
            }
            None => Uuid::new_v4().to_string(),
        };

        let vector = self.embedder.encode(text).await?;
        let payload = build_payload(text, &metadata)?;
        self.backend
            .upsert(
                collection,
                vec![VectorPoint {
                    id: id.clone(),
                    vector,
                    payload,
                }],
            )
            .await?;
        debug!(collection, %id, "memory stored");

        Ok(Memory {
            id,
            text: text.to_string(),
            metadata,
            score: None,
        })
    }

    /// Searches one or more collections for the memories most similar to
    /// `query`.
    ///
    /// The query is embedded once. Each collection contributes its own
    /// top-`k`; the merged hits are ranked by raw similarity and truncated
    /// to `k` overall, so one collection may dominate the final list.
    /// Absent collections are skipped rather than treated as failures.
    pub async fn search(
        &self,
        query: &str,
        k: usize,
        collections: Option<&[String]>,
    ) -> Result<Vec<Memory>, LumaError> {
        let defaults;
        let collections = match collections {
            Some(names) => names,
            None => {
                defaults = self.config.default_collections();
                &defaults
            }
        };

        let vector = self.embedder.encode(query).await?;
        let mut merged: Vec<Memory> = Vec::new();
        for name in collections {
            match self.backend.search(name, &vector, k).await {
                Ok(hits) => {
                    for hit in hits {
                        merged.push(memory_from_hit(hit, name));
                    }
                }
                Err(LumaError::CollectionNotFound { collection }) => {
                    debug!(collection, "skipping absent collection in search");
                }
                Err(err) => return Err(err),
            }
        }

        merged.sort_by(|a, b| {
            b.score
                .unwrap_or_default()
                .total_cmp(&a.score.unwrap_or_default())
        });
        merged.truncate(k);
        Ok(merged)
    }

    /// Finds the single closest memory to `text` in `collection`, if its
    /// similarity reaches the configured threshold.
    pub async fn find_similar(
        &self,
        text: &str,
        collection: &str,
    ) -> Result<Option<Memory>, LumaError> {
        let vector = self.embedder.encode(text).await?;
        let hits = match self.backend.search(collection, &vector, 1).await {
            Ok(hits) => hits,
            Err(LumaError::CollectionNotFound { .. }) => return Ok(None),
            Err(err) => return Err(err),
        };
        Ok(hits
            .into_iter()
            .next()
            .filter(|hit| hit.score >= self.config.similarity_threshold)
            .map(|hit| memory_from_hit(hit, collection)))
    }

    async fn ensure_collection(&self, name: &str) -> Result<(), LumaError> {
        if self.backend.collection_exists(name).await? {
            return Ok(());
        }
        let dimension = self.embedder.dimension();
        debug!(collection = name, dimension, "creating collection");
        self.backend.create_collection(name, dimension).await
    }
}

/// Renders memories as a bullet list for prompt injection.
///
/// Returns an empty string for an empty slice so callers can splice the
/// result into a prompt section unconditionally.
pub fn format_for_prompt(memories: &[Memory]) -> String {
    memories
        .iter()
        .map(|m| format!("- {}", m.text))
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_payload(text: &str, metadata: &MemoryMetadata) -> Result<serde_json::Value, LumaError> {
    let mut payload = serde_json::to_value(metadata)
        .map_err(|e| LumaError::Internal(format!("failed to serialize memory metadata: {e}")))?;
    let object = payload
        .as_object_mut()
        .ok_or_else(|| LumaError::Internal("memory metadata must serialize to an object".into()))?;
    // source_collection is a retrieval-time annotation, not stored state.
    object.remove("source_collection");
    object.insert("text".to_string(), json!(text));
    Ok(payload)
}

fn memory_from_hit(mut hit: VectorHit, collection: &str) -> Memory {
    let text = match hit.payload.as_object_mut().and_then(|o| o.remove("text")) {
        Some(serde_json::Value::String(text)) => text,
        _ => {
            warn!(id = %hit.id, collection, "hit payload has no text field");
            String::new()
        }
    };
    let mut metadata: MemoryMetadata = serde_json::from_value(hit.payload).unwrap_or_else(|e| {
        warn!(id = %hit.id, collection, error = %e, "unreadable hit metadata, dropping");
        MemoryMetadata::default()
    });
    metadata.source_collection = Some(collection.to_string());
    Memory {
        id: hit.id,
        text,
        metadata,
        score: Some(hit.score),
    }
}
