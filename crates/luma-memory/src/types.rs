// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single stored fact.
///
/// `id` is stable for the lifetime of the logical fact: storing a
/// near-duplicate reuses the existing id and replaces the payload in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    pub id: String,
    /// The factual content, e.g. "Es Ana y fuma 15 cigarrillos al día."
    pub text: String,
    pub metadata: MemoryMetadata,
    /// Similarity score when this memory came from a search; `None` when
    /// constructed for storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

/// Metadata carried alongside a memory's text in the vector payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryMetadata {
    /// When the fact was stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Which collection a search hit came from. Assigned at retrieval time,
    /// never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_collection: Option<String>,

    /// Any further payload fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MemoryMetadata {
    /// Metadata stamped with the current time.
    pub fn now() -> Self {
        Self {
            timestamp: Some(Utc::now()),
            ..Self::default()
        }
    }
}

/// Cosine similarity between two vectors of equal length.
///
/// Full normalized form; callers cannot assume unit-length inputs.
/// Returns 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same length");
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
