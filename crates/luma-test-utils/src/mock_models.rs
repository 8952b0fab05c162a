// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted model implementations.
//!
//! Each mock pops pre-configured outputs from a FIFO queue and falls back
//! to a fixed default when the queue runs dry, so tests never hang on an
//! unscripted call. Calls are recorded for assertion.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use luma_core::{
    ConversationalGeneration, FactJudge, FactVerdict, GenerationContext, LeadRegistrar, LumaError,
    Message, ScenePlan, SummaryModel, VisualGeneration, VocalGeneration,
};

/// What a generation mock saw for one invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub message_count: usize,
    pub last_message: Option<String>,
    pub memory_context: String,
    pub current_activity: String,
    pub summary: String,
    pub user_name: Option<String>,
}

impl RecordedCall {
    fn from_ctx(ctx: &GenerationContext<'_>) -> Self {
        Self {
            message_count: ctx.messages.len(),
            last_message: ctx.messages.last().map(|m| m.content.clone()),
            memory_context: ctx.memory_context.to_string(),
            current_activity: ctx.current_activity.to_string(),
            summary: ctx.summary.to_string(),
            user_name: ctx.user_name.map(str::to_string),
        }
    }
}

// --- Fact judge ---

/// Scripted [`FactJudge`]. Unscripted calls return "not important".
pub struct ScriptedJudge {
    verdicts: Mutex<VecDeque<FactVerdict>>,
}

impl ScriptedJudge {
    pub fn new() -> Self {
        Self::with_verdicts(Vec::new())
    }

    pub fn with_verdicts(verdicts: Vec<FactVerdict>) -> Self {
        Self {
            verdicts: Mutex::new(VecDeque::from(verdicts)),
        }
    }

    /// A judge that always extracts the message text verbatim.
    pub fn always_important() -> AlwaysImportantJudge {
        AlwaysImportantJudge
    }
}

impl Default for ScriptedJudge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FactJudge for ScriptedJudge {
    async fn judge(&self, _message_text: &str) -> Result<FactVerdict, LumaError> {
        Ok(self
            .verdicts
            .lock()
            .await
            .pop_front()
            .unwrap_or(FactVerdict {
                is_important: false,
                formatted_memory: None,
            }))
    }
}

/// Judge that treats every message as a memorable fact, echoing it back.
pub struct AlwaysImportantJudge;

#[async_trait]
impl FactJudge for AlwaysImportantJudge {
    async fn judge(&self, message_text: &str) -> Result<FactVerdict, LumaError> {
        Ok(FactVerdict {
            is_important: true,
            formatted_memory: Some(message_text.to_string()),
        })
    }
}

// --- Conversational generation ---

/// Scripted [`ConversationalGeneration`] with call recording.
///
/// Optionally wired to a [`LeadRegistrar`]: when the latest user message
/// contains the configured trigger phrase, the lead is registered before
/// the reply is produced, mirroring how a tool-using strategy behaves.
pub struct ScriptedConversational {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<RecordedCall>>,
    lead: Option<(Arc<dyn LeadRegistrar>, String)>,
}

impl ScriptedConversational {
    pub fn new() -> Self {
        Self::with_replies(Vec::new())
    }

    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from(replies)),
            calls: Mutex::new(Vec::new()),
            lead: None,
        }
    }

    /// Registers a lead whenever the latest user message contains
    /// `trigger_phrase` (case-insensitive).
    pub fn with_lead_registrar(
        mut self,
        registrar: Arc<dyn LeadRegistrar>,
        trigger_phrase: impl Into<String>,
    ) -> Self {
        self.lead = Some((registrar, trigger_phrase.into().to_lowercase()));
        self
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }
}

impl Default for ScriptedConversational {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationalGeneration for ScriptedConversational {
    async fn respond(&self, ctx: GenerationContext<'_>) -> Result<String, LumaError> {
        self.calls.lock().await.push(RecordedCall::from_ctx(&ctx));

        if let Some((registrar, trigger)) = &self.lead {
            let confirmed = ctx
                .messages
                .last()
                .is_some_and(|m| m.content.to_lowercase().contains(trigger));
            if confirmed {
                registrar
                    .register_lead(ctx.session_id, ctx.user_name, "confirmed interest")
                    .await?;
            }
        }

        Ok(self
            .replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock reply".to_string()))
    }
}

// --- Visual generation ---

/// Fixed-output [`VisualGeneration`] with call recording.
pub struct ScriptedVisual {
    scene: ScenePlan,
    reply: String,
    image: Vec<u8>,
    respond_calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedVisual {
    pub fn new(scene_description: &str, image_prompt: &str, reply: &str, image: Vec<u8>) -> Self {
        Self {
            scene: ScenePlan {
                scene_description: scene_description.to_string(),
                image_prompt: image_prompt.to_string(),
            },
            reply: reply.to_string(),
            image,
            respond_calls: Mutex::new(Vec::new()),
        }
    }

    /// Contexts seen by `respond`, after the scene message was spliced in.
    pub async fn respond_calls(&self) -> Vec<RecordedCall> {
        self.respond_calls.lock().await.clone()
    }
}

#[async_trait]
impl VisualGeneration for ScriptedVisual {
    async fn plan_scene(&self, _ctx: GenerationContext<'_>) -> Result<ScenePlan, LumaError> {
        Ok(self.scene.clone())
    }

    async fn respond(&self, ctx: GenerationContext<'_>) -> Result<String, LumaError> {
        self.respond_calls
            .lock()
            .await
            .push(RecordedCall::from_ctx(&ctx));
        Ok(self.reply.clone())
    }

    async fn render(&self, _image_prompt: &str) -> Result<Vec<u8>, LumaError> {
        Ok(self.image.clone())
    }
}

// --- Vocal generation ---

/// Fixed-output [`VocalGeneration`].
pub struct ScriptedVocal {
    reply: String,
    audio: Vec<u8>,
}

impl ScriptedVocal {
    pub fn new(reply: &str, audio: Vec<u8>) -> Self {
        Self {
            reply: reply.to_string(),
            audio,
        }
    }
}

#[async_trait]
impl VocalGeneration for ScriptedVocal {
    async fn respond(&self, _ctx: GenerationContext<'_>) -> Result<String, LumaError> {
        Ok(self.reply.clone())
    }

    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>, LumaError> {
        Ok(self.audio.clone())
    }
}

// --- Summarization ---

/// Scripted [`SummaryModel`] recording the prompts it receives.
pub struct ScriptedSummarizer {
    summaries: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedSummarizer {
    pub fn new() -> Self {
        Self::with_summaries(Vec::new())
    }

    pub fn with_summaries(summaries: Vec<String>) -> Self {
        Self {
            summaries: Mutex::new(VecDeque::from(summaries)),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// The full message lists handed to `summarize`, in call order.
    pub async fn prompts(&self) -> Vec<Vec<Message>> {
        self.prompts.lock().await.clone()
    }
}

impl Default for ScriptedSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SummaryModel for ScriptedSummarizer {
    async fn summarize(&self, messages: &[Message]) -> Result<String, LumaError> {
        self.prompts.lock().await.push(messages.to_vec());
        Ok(self
            .summaries
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock summary".to_string()))
    }
}

/// A model mock that always fails, for error-path tests.
pub struct FailingModel {
    message: String,
}

impl FailingModel {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl FactJudge for FailingModel {
    async fn judge(&self, _message_text: &str) -> Result<FactVerdict, LumaError> {
        Err(LumaError::provider(self.message.clone()))
    }
}

#[async_trait]
impl ConversationalGeneration for FailingModel {
    async fn respond(&self, _ctx: GenerationContext<'_>) -> Result<String, LumaError> {
        Err(LumaError::provider(self.message.clone()))
    }
}

#[async_trait]
impl SummaryModel for FailingModel {
    async fn summarize(&self, _messages: &[Message]) -> Result<String, LumaError> {
        Err(LumaError::provider(self.message.clone()))
    }
}
