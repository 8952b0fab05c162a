// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock infrastructure: checkpoint store, schedule, lead recorder.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;

use luma_core::{CheckpointStore, ConversationState, LeadRegistrar, LumaError, ScheduleProvider};

/// Process-local [`CheckpointStore`] over a concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryCheckpointStore {
    states: DashMap<String, ConversationState>,
}

impl InMemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions currently checkpointed.
    pub fn session_count(&self) -> usize {
        self.states.len()
    }
}

#[async_trait]
impl CheckpointStore for InMemoryCheckpointStore {
    async fn get(&self, session_id: &str) -> Result<Option<ConversationState>, LumaError> {
        Ok(self.states.get(session_id).map(|entry| entry.clone()))
    }

    async fn put(&self, session_id: &str, state: &ConversationState) -> Result<(), LumaError> {
        self.states.insert(session_id.to_string(), state.clone());
        Ok(())
    }
}

/// Schedule provider pinned to one activity label, ignoring the clock.
#[derive(Debug, Clone)]
pub struct FixedSchedule {
    label: String,
}

impl FixedSchedule {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
        }
    }
}

impl ScheduleProvider for FixedSchedule {
    fn current_activity(&self, _now: DateTime<Utc>) -> String {
        self.label.clone()
    }
}

/// One captured lead registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadRecord {
    pub session_id: String,
    pub user_name: Option<String>,
    pub note: String,
}

/// [`LeadRegistrar`] that records every registration for assertion.
#[derive(Debug, Default)]
pub struct RecordingLeadRegistrar {
    records: Mutex<Vec<LeadRecord>>,
}

impl RecordingLeadRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<LeadRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl LeadRegistrar for RecordingLeadRegistrar {
    async fn register_lead(
        &self,
        session_id: &str,
        user_name: Option<&str>,
        note: &str,
    ) -> Result<(), LumaError> {
        self.records.lock().await.push(LeadRecord {
            session_id: session_id.to_string(),
            user_name: user_name.map(str::to_string),
            note: note.to_string(),
        });
        Ok(())
    }
}
