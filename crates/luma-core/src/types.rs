// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common domain types shared across the Luma workspace.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumString};
use tracing::warn;

/// Who authored a message in the conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The end user (already-decoded text: audio is transcribed and images
    /// captioned before it reaches the orchestrator).
    Human,
    /// The persona's reply.
    Assistant,
}

/// A single conversation turn.
///
/// Order is conversationally significant: messages are only ever appended,
/// or bulk-removed by id during compaction. Never reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier, used by compaction for removal by id.
    pub id: String,
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Creates a new human-authored message with a fresh id.
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: Role::Human,
            content: content.into(),
        }
    }

    /// Creates a new assistant-authored message with a fresh id.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The response modality selected for a turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Workflow {
    /// Plain text reply.
    #[default]
    Conversational,
    /// Image generation plus a text reply reacting to it.
    Visual,
    /// Voice message synthesized from the text reply.
    Vocal,
}

impl Workflow {
    /// Parses a modality label, mapping anything outside the three known
    /// values to `Conversational` with a diagnostic.
    pub fn parse_lossy(label: &str) -> Self {
        match label.trim().to_lowercase().parse() {
            Ok(w) => w,
            Err(_) => {
                warn!(label, "unrecognized workflow label, defaulting to conversational");
                Workflow::Conversational
            }
        }
    }
}

// Workflow serializes as its lowercase label and deserializes lossily so a
// checkpoint written by a newer version never fails to load.
impl Serialize for Workflow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Workflow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Workflow::parse_lossy(&label))
    }
}

/// A binary artifact produced by the visual or vocal generation branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Artifact {
    /// Generated image bytes together with the prompt that produced them.
    Image { prompt: String, bytes: Vec<u8> },
    /// Synthesized audio buffer.
    Audio { bytes: Vec<u8> },
}

/// The full per-session conversation state, persisted between turns.
///
/// Owned exclusively by its session; the next turn for the same session
/// identifier resumes from this exact snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    pub session_id: String,
    /// Ordered history. Append-only except for compaction removal.
    pub messages: Vec<Message>,
    /// Rolling summary of compacted-away history. Empty until first compaction.
    #[serde(default)]
    pub summary: String,
    /// Modality selected for the current turn.
    #[serde(default)]
    pub workflow: Workflow,
    /// Sticky once set; never re-derived.
    #[serde(default)]
    pub user_name: Option<String>,
    /// The persona's current scheduled activity label.
    #[serde(default)]
    pub current_activity: Option<String>,
    /// Whether the activity label changed this turn.
    #[serde(default)]
    pub activity_changed: bool,
    /// Formatted ranked memory hits injected for the current turn.
    #[serde(default)]
    pub memory_context: String,
    /// Binary artifact produced by the most recent visual or vocal turn.
    #[serde(default)]
    pub artifact: Option<Artifact>,
}

impl ConversationState {
    /// Creates an empty state for a new session.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            messages: Vec::new(),
            summary: String::new(),
            workflow: Workflow::Conversational,
            user_name: None,
            current_activity: None,
            activity_changed: false,
            memory_context: String::new(),
            artifact: None,
        }
    }

    /// The most recent message, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

// --- Vector backend wire types ---

/// A point to upsert into a vector collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorPoint {
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: serde_json::Value,
}

/// A ranked hit returned by a vector similarity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorHit {
    pub id: String,
    /// Cosine similarity to the query vector.
    pub score: f32,
    pub payload: serde_json::Value,
}

// --- Fact judge types ---

/// Verdict returned by the external fact judge for a user message.
///
/// Contract: `is_important == false` implies `formatted_memory == None`,
/// never the reverse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactVerdict {
    pub is_important: bool,
    pub formatted_memory: Option<String>,
}

// --- Generation types ---

/// Everything a generation strategy receives for one turn.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub messages: &'a [Message],
    pub memory_context: &'a str,
    pub current_activity: &'a str,
    pub summary: &'a str,
    pub user_name: Option<&'a str>,
    pub session_id: &'a str,
}

/// Scene planning output from the visual strategy's first call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenePlan {
    /// First-person narrative of the scene.
    pub scene_description: String,
    /// Prompt handed to the image generation backend.
    pub image_prompt: String,
}
