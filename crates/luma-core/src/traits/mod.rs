// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boundary trait definitions for the Luma dialogue agent.
//!
//! Every call that crosses the system boundary (embedding, vector search,
//! fact judging, generation, summarization, checkpointing) goes through one
//! of these traits, using `#[async_trait]` for dynamic dispatch. Components
//! receive trait objects by dependency injection; there are no singletons.

pub mod checkpoint;
pub mod embedding;
pub mod generation;
pub mod judge;
pub mod lead;
pub mod schedule;
pub mod vector;

pub use checkpoint::CheckpointStore;
pub use embedding::EmbeddingProvider;
pub use generation::{
    ConversationalGeneration, SummaryModel, VisualGeneration, VocalGeneration,
};
pub use judge::FactJudge;
pub use lead::LeadRegistrar;
pub use schedule::ScheduleProvider;
pub use vector::VectorBackend;
