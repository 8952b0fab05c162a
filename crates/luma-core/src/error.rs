// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Luma dialogue agent.

use thiserror::Error;

/// The primary error type used across all Luma boundary traits and core operations.
#[derive(Debug, Error)]
pub enum LumaError {
    /// Configuration errors (missing credentials, invalid TOML, out-of-range values).
    /// Fatal at the affected component's construction, not recoverable per-turn.
    #[error("configuration error: {0}")]
    Config(String),

    /// Embedding provider errors (model failure, dimension mismatch).
    #[error("embedding error: {message}")]
    Embedding {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Vector backend errors (connection failure, malformed response).
    #[error("vector backend error: {message}")]
    VectorBackend {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The requested collection does not exist in the vector backend.
    ///
    /// Kept separate from [`LumaError::VectorBackend`] so callers can treat
    /// an absent collection as an empty result set rather than a failure.
    #[error("collection not found: {collection}")]
    CollectionNotFound { collection: String },

    /// External model call errors (fact judge, generation strategy, summarizer).
    /// Surfaced to the turn's caller; the core performs no implicit retry.
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Session checkpoint store errors (load or persist failure).
    #[error("checkpoint error: {message}")]
    Checkpoint {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LumaError {
    /// Convenience constructor for provider errors without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        LumaError::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Convenience constructor for vector backend errors without an underlying source.
    pub fn backend(message: impl Into<String>) -> Self {
        LumaError::VectorBackend {
            message: message.into(),
            source: None,
        }
    }
}
