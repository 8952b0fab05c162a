// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory extraction step.
//!
//! Runs first in every turn: detects the user's name from introduction
//! phrasings, and asks the fact judge whether the incoming message carries
//! something worth remembering. Judged facts land in the personal
//! collection via the deduplicating store.

use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use luma_core::{ConversationState, FactJudge, LumaError, Role};
use luma_memory::{MemoryMetadata, MemoryStore};

use crate::state::StateUpdate;

/// Introduction phrasings, Spanish and English. Checked in order; the
/// first capture wins.
static NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)(?:me llamo|mi nombre es)\s+([a-záéíóúñü\s]+?)(?:[.,;!?]|$)").unwrap(),
        Regex::new(r"(?i)hola,\s*soy\s+([a-záéíóúñü\s]+?)(?:[.,;!?]|$)").unwrap(),
        Regex::new(r"(?i)my name is\s+([a-z\s]+?)(?:[.,;!?]|$)").unwrap(),
        Regex::new(r"(?i)hi,\s*i'?m\s+([a-z\s]+?)(?:[.,;!?]|$)").unwrap(),
    ]
});

/// Filler captures that look like names but are answers to other questions.
const NAME_BLACKLIST: &[&str] = &["nada", "no", "no sé", "gracias", "y fumo", "y fuma"];

/// Detects a user name in an introduction message.
///
/// Returns the title-cased name, or `None` when nothing matches or the
/// capture is a known filler.
pub fn detect_user_name(text: &str) -> Option<String> {
    for pattern in NAME_PATTERNS.iter() {
        let Some(captures) = pattern.captures(text) else {
            continue;
        };
        let raw = captures.get(1)?.as_str().trim();
        if raw.is_empty() || NAME_BLACKLIST.contains(&raw.to_lowercase().as_str()) {
            debug!(candidate = raw, "ignoring filler name candidate");
            continue;
        }
        return Some(title_case(raw));
    }
    None
}

fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// First step of every turn: name detection plus fact storage.
pub struct MemoryExtractor {
    judge: Arc<dyn FactJudge>,
    memory: Arc<MemoryStore>,
}

impl MemoryExtractor {
    pub fn new(judge: Arc<dyn FactJudge>, memory: Arc<MemoryStore>) -> Self {
        Self { judge, memory }
    }

    /// Analyzes the latest message.
    ///
    /// No-op when history is empty or the latest message is not the
    /// user's. The user name is sticky: once set in state it is never
    /// re-derived.
    pub async fn extract(&self, state: &ConversationState) -> Result<StateUpdate, LumaError> {
        let mut update = StateUpdate::default();
        let Some(last) = state.last_message() else {
            return Ok(update);
        };
        if last.role != Role::Human {
            return Ok(update);
        }

        if state.user_name.is_none() {
            if let Some(name) = detect_user_name(&last.content) {
                info!(session_id = %state.session_id, user_name = %name, "user name detected");
                update.user_name = Some(name);
            }
        }

        let verdict = self.judge.judge(&last.content).await?;
        if verdict.is_important {
            if let Some(fact) = verdict.formatted_memory {
                let collection = self.memory.config().personal_collection.clone();
                let stored = self
                    .memory
                    .store(&fact, MemoryMetadata::now(), &collection)
                    .await?;
                debug!(session_id = %state.session_id, id = %stored.id, "fact stored");
            }
        }

        Ok(update)
    }
}
