// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding provider trait for text-to-vector encoding.

use async_trait::async_trait;

use crate::error::LumaError;

/// Encodes text into fixed-length vectors for similarity search.
///
/// A provider instance encodes to one fixed dimensionality for its lifetime;
/// collection vector sizes are derived from [`EmbeddingProvider::dimension`]
/// at collection creation. Encoding must be deterministic.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Encodes a single text into its embedding vector.
    async fn encode(&self, text: &str) -> Result<Vec<f32>, LumaError>;

    /// The fixed output vector length of this provider's model.
    fn dimension(&self) -> usize;
}
