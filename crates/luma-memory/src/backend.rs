// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory vector backend.
//!
//! Brute-force cosine scan over a `HashMap` of collections. Suitable for
//! tests and single-process deployments; production setups point at
//! [`crate::qdrant::QdrantBackend`] instead.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use luma_core::{LumaError, VectorBackend, VectorHit, VectorPoint};

use crate::types::cosine_similarity;

#[derive(Debug)]
struct Collection {
    dimension: usize,
    points: HashMap<String, (Vec<f32>, serde_json::Value)>,
}

/// Process-local [`VectorBackend`] backed by a cosine scan.
#[derive(Debug, Default)]
pub struct InMemoryVectorBackend {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryVectorBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points currently stored in a collection, for tests and
    /// diagnostics. Zero when the collection does not exist.
    pub async fn point_count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|c| c.points.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl VectorBackend for InMemoryVectorBackend {
    async fn collection_exists(&self, name: &str) -> Result<bool, LumaError> {
        Ok(self.collections.read().await.contains_key(name))
    }

    async fn create_collection(&self, name: &str, dimension: usize) -> Result<(), LumaError> {
        if dimension == 0 {
            return Err(LumaError::backend("collection dimension must be non-zero"));
        }
        let mut collections = self.collections.write().await;
        match collections.get(name) {
            // Creation is idempotent as long as the dimension agrees.
            Some(existing) if existing.dimension == dimension => Ok(()),
            Some(existing) => Err(LumaError::backend(format!(
                "collection {name:?} already exists with dimension {}, requested {dimension}",
                existing.dimension
            ))),
            None => {
                collections.insert(
                    name.to_string(),
                    Collection {
                        dimension,
                        points: HashMap::new(),
                    },
                );
                Ok(())
            }
        }
    }

    async fn upsert(&self, collection: &str, points: Vec<VectorPoint>) -> Result<(), LumaError> {
        let mut collections = self.collections.write().await;
        let entry = collections
            .get_mut(collection)
            .ok_or_else(|| LumaError::CollectionNotFound {
                collection: collection.to_string(),
            })?;
        for point in &points {
            if point.vector.len() != entry.dimension {
                return Err(LumaError::backend(format!(
                    "vector length {} does not match collection {collection:?} dimension {}",
                    point.vector.len(),
                    entry.dimension
                )));
            }
        }
        for point in points {
            entry
                .points
                .insert(point.id, (point.vector, point.payload));
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<VectorHit>, LumaError> {
        let collections = self.collections.read().await;
        let entry = collections
            .get(collection)
            .ok_or_else(|| LumaError::CollectionNotFound {
                collection: collection.to_string(),
            })?;
        if vector.len() != entry.dimension {
            return Err(LumaError::backend(format!(
                "query vector length {} does not match collection {collection:?} dimension {}",
                vector.len(),
                entry.dimension
            )));
        }

        let mut hits: Vec<VectorHit> = entry
            .points
            .iter()
            .map(|(id, (stored, payload))| VectorHit {
                id: id.clone(),
                score: cosine_similarity(vector, stored),
                payload: payload.clone(),
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(limit);
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point(id: &str, vector: Vec<f32>) -> VectorPoint {
        VectorPoint {
            id: id.to_string(),
            vector,
            payload: json!({ "text": id }),
        }
    }

    #[tokio::test]
    async fn create_is_idempotent_for_same_dimension() {
        let backend = InMemoryVectorBackend::new();
        backend.create_collection("facts", 3).await.unwrap();
        backend.create_collection("facts", 3).await.unwrap();
        assert!(backend.collection_exists("facts").await.unwrap());
    }

    #[tokio::test]
    async fn create_with_conflicting_dimension_fails() {
        let backend = InMemoryVectorBackend::new();
        backend.create_collection("facts", 3).await.unwrap();
        let err = backend.create_collection("facts", 4).await.unwrap_err();
        assert!(matches!(err, LumaError::VectorBackend { .. }));
    }

    #[tokio::test]
    async fn upsert_into_missing_collection_is_not_found() {
        let backend = InMemoryVectorBackend::new();
        let err = backend
            .upsert("missing", vec![point("a", vec![1.0, 0.0])])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LumaError::CollectionNotFound { collection } if collection == "missing"
        ));
    }

    #[tokio::test]
    async fn search_missing_collection_is_not_found() {
        let backend = InMemoryVectorBackend::new();
        let err = backend.search("missing", &[1.0], 5).await.unwrap_err();
        assert!(matches!(err, LumaError::CollectionNotFound { .. }));
    }

    #[tokio::test]
    async fn search_ranks_by_descending_similarity() {
        let backend = InMemoryVectorBackend::new();
        backend.create_collection("facts", 2).await.unwrap();
        backend
            .upsert(
                "facts",
                vec![
                    point("far", vec![0.0, 1.0]),
                    point("near", vec![1.0, 0.1]),
                    point("exact", vec![1.0, 0.0]),
                ],
            )
            .await
            .unwrap();

        let hits = backend.search("facts", &[1.0, 0.0], 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "exact");
        assert_eq!(hits[1].id, "near");
        assert!(hits[0].score > hits[1].score);
    }

    #[tokio::test]
    async fn upsert_replaces_point_by_id() {
        let backend = InMemoryVectorBackend::new();
        backend.create_collection("facts", 2).await.unwrap();
        backend
            .upsert("facts", vec![point("a", vec![1.0, 0.0])])
            .await
            .unwrap();
        backend
            .upsert("facts", vec![point("a", vec![0.0, 1.0])])
            .await
            .unwrap();
        assert_eq!(backend.point_count("facts").await, 1);

        let hits = backend.search("facts", &[0.0, 1.0], 1).await.unwrap();
        assert!((hits[0].score - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn dimension_mismatch_on_upsert_is_rejected() {
        let backend = InMemoryVectorBackend::new();
        backend.create_collection("facts", 2).await.unwrap();
        let err = backend
            .upsert("facts", vec![point("a", vec![1.0, 0.0, 0.0])])
            .await
            .unwrap_err();
        assert!(matches!(err, LumaError::VectorBackend { .. }));
    }
}
