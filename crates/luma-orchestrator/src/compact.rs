// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History compaction.
//!
//! When visible history outgrows the trigger, the summarizer folds it
//! into the rolling summary and all but a retained tail of messages is
//! dropped. The instruction is appended as a trailing user message so
//! the summary model sees the history it is summarizing.

use std::sync::Arc;

use tracing::info;

use luma_config::CompactionConfig;
use luma_core::{ConversationState, LumaError, Message, SummaryModel};

use crate::state::StateUpdate;

/// Summarizes and trims conversation history.
pub struct SummaryCompactor {
    model: Arc<dyn SummaryModel>,
    config: CompactionConfig,
    agent_name: String,
}

impl SummaryCompactor {
    pub fn new(model: Arc<dyn SummaryModel>, config: CompactionConfig, agent_name: &str) -> Self {
        Self {
            model,
            config,
            agent_name: agent_name.to_string(),
        }
    }

    /// Whether history has grown past the compaction trigger.
    pub fn should_compact(&self, state: &ConversationState) -> bool {
        state.messages.len() > self.config.summary_trigger
    }

    /// Produces the new summary and the removal set.
    ///
    /// The first compaction creates a summary from scratch; later ones
    /// extend the existing summary with the messages that arrived since.
    /// Everything but the last `retained_tail` messages is removed.
    pub async fn compact(&self, state: &ConversationState) -> Result<StateUpdate, LumaError> {
        let instruction = if state.summary.is_empty() {
            format!(
                "Create a summary of the conversation above between {} and the user. \
                 The summary must be a short description of the conversation so far, \
                 but that captures all the relevant information shared between {} and the user:",
                self.agent_name, self.agent_name
            )
        } else {
            format!(
                "This is summary of the conversation to date between {} and the user: {}\n\n\
                 Extend the summary by taking into account the new messages above:",
                self.agent_name, state.summary
            )
        };

        let mut prompt = state.messages.clone();
        prompt.push(Message::human(instruction));
        let summary = self.model.summarize(&prompt).await?;

        let cut = state.messages.len().saturating_sub(self.config.retained_tail);
        let remove: Vec<String> = state.messages[..cut].iter().map(|m| m.id.clone()).collect();
        info!(
            session_id = %state.session_id,
            removed = remove.len(),
            retained = state.messages.len() - remove.len(),
            "history compacted"
        );

        Ok(StateUpdate {
            summary: Some(summary),
            remove,
            ..Default::default()
        })
    }
}
