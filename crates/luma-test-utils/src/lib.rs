// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Luma integration tests.
//!
//! Deterministic mock implementations of the boundary traits, enabling
//! fast, CI-runnable tests without embeddings models, vector databases,
//! or external model calls.
//!
//! # Components
//!
//! - [`MockEmbedder`] - word-bag embedding provider with stable vectors
//! - [`ScriptedJudge`] / [`AlwaysImportantJudge`] - canned fact verdicts
//! - [`ScriptedConversational`] / [`ScriptedVisual`] / [`ScriptedVocal`] -
//!   generation strategies with call recording
//! - [`ScriptedSummarizer`] - canned summaries, prompt capture
//! - [`InMemoryCheckpointStore`], [`FixedSchedule`], [`RecordingLeadRegistrar`]

pub mod mock_embedder;
pub mod mock_infra;
pub mod mock_models;

pub use mock_embedder::MockEmbedder;
pub use mock_infra::{FixedSchedule, InMemoryCheckpointStore, LeadRecord, RecordingLeadRegistrar};
pub use mock_models::{
    AlwaysImportantJudge, FailingModel, RecordedCall, ScriptedConversational, ScriptedJudge,
    ScriptedSummarizer, ScriptedVisual, ScriptedVocal,
};
