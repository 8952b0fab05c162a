// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation strategy traits, one per response modality, plus the
//! summarization model used by history compaction.

use async_trait::async_trait;

use crate::error::LumaError;
use crate::types::{GenerationContext, Message, ScenePlan};

/// Produces the persona's plain text reply for a conversational turn.
///
/// Implementations own the persona prompt and any tool use (including the
/// optional lead/CRM capability); the orchestrator only guarantees a single
/// invocation per conversational turn.
#[async_trait]
pub trait ConversationalGeneration: Send + Sync {
    async fn respond(&self, ctx: GenerationContext<'_>) -> Result<String, LumaError>;
}

/// Produces an image plus a text reply reacting to it.
///
/// Called in two phases: [`VisualGeneration::plan_scene`] first, then --
/// after the orchestrator splices the synthetic "image attached" message
/// into history -- [`VisualGeneration::respond`] and
/// [`VisualGeneration::render`].
#[async_trait]
pub trait VisualGeneration: Send + Sync {
    /// Derives a scene description and image prompt from recent conversation.
    async fn plan_scene(&self, ctx: GenerationContext<'_>) -> Result<ScenePlan, LumaError>;

    /// Text reply, invoked after the scene message has been spliced into
    /// `ctx.messages` so the model can react to its own visual output.
    async fn respond(&self, ctx: GenerationContext<'_>) -> Result<String, LumaError>;

    /// Generates the image bytes for the planned prompt.
    async fn render(&self, image_prompt: &str) -> Result<Vec<u8>, LumaError>;
}

/// Produces a text reply and synthesizes it into a voice message.
#[async_trait]
pub trait VocalGeneration: Send + Sync {
    async fn respond(&self, ctx: GenerationContext<'_>) -> Result<String, LumaError>;

    /// Synthesizes the reply text into an audio buffer.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, LumaError>;
}

/// One-shot summarization call used by history compaction.
///
/// Receives the visible history plus a trailing instruction message built by
/// the compactor (create-vs-extend prompt) and returns the new summary text.
#[async_trait]
pub trait SummaryModel: Send + Sync {
    async fn summarize(&self, messages: &[Message]) -> Result<String, LumaError>;
}
