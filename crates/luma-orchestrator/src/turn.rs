// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-turn state machine.
//!
//! A turn walks the fixed path ExtractMemory -> ClassifyRoute ->
//! InjectContext -> InjectMemory -> Generate -> MaybeCompact -> Terminal.
//! Each step produces a [`StateUpdate`] that is folded into the
//! conversation state before the next step runs. A step error aborts the
//! turn; state mutations already applied stay applied, which is safe
//! because the caller only checkpoints after a turn reaches Terminal.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use luma_core::{
    Artifact, ConversationalGeneration, ConversationState, GenerationContext, LumaError, Message,
    Role, ScheduleProvider, VisualGeneration, VocalGeneration, Workflow,
};
use luma_memory::{format_for_prompt, MemoryStore};
use luma_router::Router;

use crate::compact::SummaryCompactor;
use crate::extract::MemoryExtractor;
use crate::state::{StateUpdate, TurnState};

/// What a completed turn hands back to the caller.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The persona's text reply.
    pub reply: String,
    /// Modality the turn was generated in.
    pub workflow: Workflow,
    /// Image or audio produced alongside the reply, if any.
    pub artifact: Option<Artifact>,
}

/// Drives one conversation turn through the state machine.
pub struct TurnOrchestrator {
    extractor: MemoryExtractor,
    router: Router,
    schedule: Arc<dyn ScheduleProvider>,
    memory: Arc<MemoryStore>,
    conversational: Arc<dyn ConversationalGeneration>,
    visual: Arc<dyn VisualGeneration>,
    vocal: Arc<dyn VocalGeneration>,
    compactor: SummaryCompactor,
    agent_name: String,
}

impl TurnOrchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        extractor: MemoryExtractor,
        router: Router,
        schedule: Arc<dyn ScheduleProvider>,
        memory: Arc<MemoryStore>,
        conversational: Arc<dyn ConversationalGeneration>,
        visual: Arc<dyn VisualGeneration>,
        vocal: Arc<dyn VocalGeneration>,
        compactor: SummaryCompactor,
        agent_name: &str,
    ) -> Self {
        Self {
            extractor,
            router,
            schedule,
            memory,
            conversational,
            visual,
            vocal,
            compactor,
            agent_name: agent_name.to_string(),
        }
    }

    /// Runs a full turn over the given state.
    ///
    /// Expects the incoming user message to already be appended to
    /// `state.messages`. On success the state holds the assistant reply
    /// (and post-compaction history) and is ready to checkpoint.
    pub async fn run_turn(&self, state: &mut ConversationState) -> Result<TurnOutcome, LumaError> {
        let mut current = TurnState::ExtractMemory;
        while current != TurnState::Terminal {
            current = self.advance(current, state).await?;
        }

        let reply = state
            .messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.content.clone())
            .ok_or_else(|| LumaError::Internal("turn finished without a reply".into()))?;
        info!(session_id = %state.session_id, workflow = %state.workflow, "turn complete");

        Ok(TurnOutcome {
            reply,
            workflow: state.workflow,
            artifact: state.artifact.clone(),
        })
    }

    async fn advance(
        &self,
        at: TurnState,
        state: &mut ConversationState,
    ) -> Result<TurnState, LumaError> {
        debug!(session_id = %state.session_id, step = ?at, "turn step");
        match at {
            TurnState::ExtractMemory => {
                let update = self.extractor.extract(state).await?;
                update.apply(state);
                Ok(TurnState::ClassifyRoute)
            }
            TurnState::ClassifyRoute => {
                let workflow = self.router.route(&state.messages).await?;
                StateUpdate {
                    workflow: Some(workflow),
                    ..Default::default()
                }
                .apply(state);
                Ok(TurnState::InjectContext)
            }
            TurnState::InjectContext => {
                let activity = self.schedule.current_activity(Utc::now());
                let changed = state.current_activity.as_deref() != Some(activity.as_str());
                StateUpdate {
                    current_activity: Some(activity),
                    activity_changed: Some(changed),
                    ..Default::default()
                }
                .apply(state);
                Ok(TurnState::InjectMemory)
            }
            TurnState::InjectMemory => {
                let update = self.inject_memory(state).await?;
                update.apply(state);
                Ok(TurnState::Generate)
            }
            TurnState::Generate => {
                let update = self.generate(state).await?;
                update.apply(state);
                Ok(TurnState::MaybeCompact)
            }
            TurnState::MaybeCompact => {
                if self.compactor.should_compact(state) {
                    let update = self.compactor.compact(state).await?;
                    update.apply(state);
                }
                Ok(TurnState::Terminal)
            }
            TurnState::Terminal => Ok(TurnState::Terminal),
        }
    }

    /// Retrieves memories relevant to the latest user message.
    ///
    /// The query is the latest message alone, not the whole history; stale
    /// context would otherwise dominate retrieval. An empty result clears
    /// the previous turn's context.
    async fn inject_memory(&self, state: &ConversationState) -> Result<StateUpdate, LumaError> {
        let query = state
            .last_message()
            .filter(|m| m.role == Role::Human)
            .map(|m| m.content.clone());
        let Some(query) = query else {
            return Ok(StateUpdate::default());
        };

        let k = self.memory.config().search_k;
        let memories = self.memory.search(&query, k, None).await?;
        debug!(session_id = %state.session_id, hits = memories.len(), "memories retrieved");
        Ok(StateUpdate {
            memory_context: Some(format_for_prompt(&memories)),
            ..Default::default()
        })
    }

    async fn generate(&self, state: &ConversationState) -> Result<StateUpdate, LumaError> {
        let ctx = context_of(state);
        match state.workflow {
            Workflow::Conversational => {
                let reply = self.conversational.respond(ctx).await?;
                Ok(StateUpdate {
                    append: vec![Message::assistant(reply)],
                    ..Default::default()
                })
            }
            Workflow::Visual => {
                let plan = self.visual.plan_scene(ctx).await?;
                let bytes = self.visual.render(&plan.image_prompt).await?;

                // The scene note becomes permanent history so later turns can
                // refer back to what was sent.
                let scene_note = Message::human(format!(
                    "<image attached by {} generated from prompt: {}>",
                    self.agent_name, plan.image_prompt
                ));
                let mut spliced = state.messages.to_vec();
                spliced.push(scene_note.clone());
                let spliced_ctx = GenerationContext {
                    messages: &spliced,
                    ..ctx
                };
                let reply = self.visual.respond(spliced_ctx).await?;

                Ok(StateUpdate {
                    append: vec![scene_note, Message::assistant(reply)],
                    artifact: Some(Artifact::Image {
                        prompt: plan.image_prompt,
                        bytes,
                    }),
                    ..Default::default()
                })
            }
            Workflow::Vocal => {
                let reply = self.vocal.respond(ctx).await?;
                let bytes = self.vocal.synthesize(&reply).await?;
                Ok(StateUpdate {
                    append: vec![Message::assistant(reply)],
                    artifact: Some(Artifact::Audio { bytes }),
                    ..Default::default()
                })
            }
        }
    }
}

fn context_of(state: &ConversationState) -> GenerationContext<'_> {
    GenerationContext {
        messages: &state.messages,
        memory_context: &state.memory_context,
        current_activity: state.current_activity.as_deref().unwrap_or(""),
        summary: &state.summary,
        user_name: state.user_name.as_deref(),
        session_id: &state.session_id,
    }
}
