// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Luma persona-driven dialogue agent.
//!
//! This crate provides the foundational trait definitions, error taxonomy,
//! and domain types used throughout the Luma workspace. Every external
//! collaborator (embedding, vector backend, fact judge, schedule, generation
//! strategies, summarizer, checkpoint store, lead capability) implements a
//! trait defined here.

pub mod error;
pub mod traits;
pub mod types;

pub use error::LumaError;
pub use types::{
    Artifact, ConversationState, FactVerdict, GenerationContext, Message, Role, ScenePlan,
    VectorHit, VectorPoint, Workflow,
};

pub use traits::{
    CheckpointStore, ConversationalGeneration, EmbeddingProvider, FactJudge, LeadRegistrar,
    ScheduleProvider, SummaryModel, VectorBackend, VisualGeneration, VocalGeneration,
};
