// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Long-term memory for the Luma dialogue agent.
//!
//! A [`MemoryStore`] over pluggable embedding and vector backends. Storage
//! deduplicates near-identical facts by reusing the existing point id;
//! search embeds the query once, fans out across collections, and merges
//! hits by raw similarity.
//!
//! Two backends ship here: [`InMemoryVectorBackend`] for tests and
//! single-process use, and [`QdrantBackend`] for a remote Qdrant instance.

pub mod backend;
pub mod qdrant;
pub mod store;
pub mod types;

pub use backend::InMemoryVectorBackend;
pub use qdrant::QdrantBackend;
pub use store::{format_for_prompt, MemoryStore};
pub use types::{cosine_similarity, Memory, MemoryMetadata};
