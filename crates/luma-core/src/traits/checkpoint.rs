// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session checkpoint store trait.

use async_trait::async_trait;

use crate::error::LumaError;
use crate::types::ConversationState;

/// Persists per-session conversation state between turns.
///
/// `put` is a full-state replace: the snapshot written at a turn's terminal
/// state is exactly what the next turn for that session resumes from.
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    async fn get(&self, session_id: &str) -> Result<Option<ConversationState>, LumaError>;

    async fn put(&self, session_id: &str, state: &ConversationState) -> Result<(), LumaError>;
}
