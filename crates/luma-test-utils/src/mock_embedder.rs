// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic embedding provider for tests.
//!
//! `MockEmbedder` hashes each word into a vector bucket, so identical texts
//! embed identically (cosine 1.0), texts sharing words land close, and
//! disjoint texts land near-orthogonal. No model download, no network.

use std::hash::{DefaultHasher, Hash, Hasher};

use async_trait::async_trait;

use luma_core::{EmbeddingProvider, LumaError};

/// Word-bag embedding provider with a fixed dimensionality.
#[derive(Debug, Clone)]
pub struct MockEmbedder {
    dimension: usize,
}

impl MockEmbedder {
    /// Use at least a few dozen dimensions so unrelated words rarely share
    /// a bucket.
    pub fn new(dimension: usize) -> Self {
        assert!(dimension > 0, "dimension must be non-zero");
        Self { dimension }
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, LumaError> {
        let mut vector = vec![0.0f32; self.dimension];
        for word in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            vector[(hasher.finish() as usize) % self.dimension] += 1.0;
        }
        // Empty or punctuation-only text still gets a valid direction.
        if vector.iter().all(|&x| x == 0.0) {
            vector[0] = 1.0;
        }
        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        for x in &mut vector {
            *x /= norm;
        }
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
