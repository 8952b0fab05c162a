// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn state machine states and the state update reducer.

use luma_core::{Artifact, ConversationState, Message, Workflow};

/// States of the per-turn machine, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Judge the incoming message for memorable facts; detect the user name.
    ExtractMemory,
    /// Select the response modality for this turn.
    ClassifyRoute,
    /// Refresh the persona's scheduled activity.
    InjectContext,
    /// Retrieve and format relevant memories for the prompt.
    InjectMemory,
    /// Produce the reply in the selected modality.
    Generate,
    /// Summarize and trim history when it has grown past the trigger.
    MaybeCompact,
    /// Turn complete; the state snapshot is ready to checkpoint.
    Terminal,
}

/// A partial state delta produced by one turn step.
///
/// Applying an update is the only way steps mutate conversation state.
/// Scalars are last-write-wins per field; `None` means "leave unchanged".
/// Messages are append-only except for removal by id, which only the
/// compaction step emits.
#[derive(Debug, Default)]
pub struct StateUpdate {
    pub workflow: Option<Workflow>,
    pub user_name: Option<String>,
    pub current_activity: Option<String>,
    pub activity_changed: Option<bool>,
    pub memory_context: Option<String>,
    pub summary: Option<String>,
    pub artifact: Option<Artifact>,
    /// Messages appended to the end of history, in order.
    pub append: Vec<Message>,
    /// Ids of messages to drop from history. Removals apply before appends.
    pub remove: Vec<String>,
}

impl StateUpdate {
    /// Folds this delta into the conversation state.
    pub fn apply(self, state: &mut ConversationState) {
        if let Some(workflow) = self.workflow {
            state.workflow = workflow;
        }
        if let Some(user_name) = self.user_name {
            state.user_name = Some(user_name);
        }
        if let Some(activity) = self.current_activity {
            state.current_activity = Some(activity);
        }
        if let Some(changed) = self.activity_changed {
            state.activity_changed = changed;
        }
        if let Some(memory_context) = self.memory_context {
            state.memory_context = memory_context;
        }
        if let Some(summary) = self.summary {
            state.summary = summary;
        }
        if let Some(artifact) = self.artifact {
            state.artifact = Some(artifact);
        }
        if !self.remove.is_empty() {
            state.messages.retain(|m| !self.remove.contains(&m.id));
        }
        state.messages.extend(self.append);
    }
}
