// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vector backend trait for per-collection point storage and similarity search.

use async_trait::async_trait;

use crate::error::LumaError;
use crate::types::{VectorHit, VectorPoint};

/// Storage backend holding named vector collections.
///
/// A collection's dimensionality is fixed at creation for its lifetime.
/// Operations on an absent collection fail with
/// [`LumaError::CollectionNotFound`], which callers must be able to tell
/// apart from a genuine backend error.
#[async_trait]
pub trait VectorBackend: Send + Sync {
    /// Whether the named collection exists.
    async fn collection_exists(&self, name: &str) -> Result<bool, LumaError>;

    /// Creates a collection with the given fixed vector dimensionality,
    /// using cosine distance.
    async fn create_collection(&self, name: &str, dimension: usize) -> Result<(), LumaError>;

    /// Inserts or replaces points by id.
    async fn upsert(&self, collection: &str, points: Vec<VectorPoint>) -> Result<(), LumaError>;

    /// Top-`limit` similarity search, ranked by descending cosine score.
    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<VectorHit>, LumaError>;
}
