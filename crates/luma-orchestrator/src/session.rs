// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session management over the turn orchestrator.
//!
//! One conversation state per session id, loaded from and persisted to
//! the checkpoint store around every turn. Turns for the same session are
//! strictly serialized; different sessions run concurrently.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use luma_core::{CheckpointStore, ConversationState, LumaError, Message};

use crate::turn::{TurnOrchestrator, TurnOutcome};

/// Entry point for incoming user messages.
pub struct SessionManager {
    orchestrator: Arc<TurnOrchestrator>,
    checkpoints: Arc<dyn CheckpointStore>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SessionManager {
    pub fn new(orchestrator: Arc<TurnOrchestrator>, checkpoints: Arc<dyn CheckpointStore>) -> Self {
        Self {
            orchestrator,
            checkpoints,
            locks: DashMap::new(),
        }
    }

    /// Handles one user message for a session.
    ///
    /// Loads the checkpoint (or starts fresh), appends the message, runs
    /// the turn, and checkpoints the result. Concurrent calls for the same
    /// session queue behind each other in arrival order; a failed turn
    /// leaves the previous checkpoint untouched.
    pub async fn handle_message(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<TurnOutcome, LumaError> {
        let lock = self
            .locks
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = lock.lock().await;
        let result = self.run_turn_locked(session_id, text).await;
        drop(guard);

        // Two strong refs means the map entry and our clone, nobody queued;
        // remove_if holds the shard lock, so a new caller either sees the
        // entry before removal (count > 2) or inserts a fresh one after.
        self.locks
            .remove_if(session_id, |_, entry| Arc::strong_count(entry) == 2);
        result
    }

    async fn run_turn_locked(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<TurnOutcome, LumaError> {
        let mut state = match self.checkpoints.get(session_id).await? {
            Some(state) => state,
            None => {
                debug!(session_id, "starting new session");
                ConversationState::new(session_id)
            }
        };
        state.messages.push(Message::human(text));

        let outcome = self.orchestrator.run_turn(&mut state).await?;
        self.checkpoints.put(session_id, &state).await?;
        Ok(outcome)
    }
}
