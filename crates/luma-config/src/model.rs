// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Luma dialogue agent.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Luma configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LumaConfig {
    /// Agent identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Long-term memory store settings.
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Qdrant vector backend settings.
    #[serde(default)]
    pub qdrant: QdrantConfig,

    /// Modality router settings.
    #[serde(default)]
    pub router: RouterConfig,

    /// History compaction settings.
    #[serde(default)]
    pub compaction: CompactionConfig,
}

/// Agent identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the persona.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "luma".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Long-term memory store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Minimum cosine similarity above which two memories are the same fact.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// Per-collection top-k used when searching memories for injection.
    #[serde(default = "default_search_k")]
    pub search_k: usize,

    /// Collection holding personal facts extracted from conversation.
    #[serde(default = "default_personal_collection")]
    pub personal_collection: String,

    /// Collection holding curated domain knowledge.
    #[serde(default = "default_knowledge_collection")]
    pub knowledge_collection: String,
}

impl MemoryConfig {
    /// The collection set searched when the caller does not name any.
    pub fn default_collections(&self) -> Vec<String> {
        vec![
            self.personal_collection.clone(),
            self.knowledge_collection.clone(),
        ]
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            search_k: default_search_k(),
            personal_collection: default_personal_collection(),
            knowledge_collection: default_knowledge_collection(),
        }
    }
}

fn default_similarity_threshold() -> f32 {
    0.9
}

fn default_search_k() -> usize {
    5
}

fn default_personal_collection() -> String {
    "personal_facts".to_string()
}

fn default_knowledge_collection() -> String {
    "domain_knowledge".to_string()
}

/// Qdrant vector backend configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QdrantConfig {
    /// Base URL of the Qdrant instance. `None` means the backend cannot be
    /// constructed; construction fails fast with a configuration error.
    #[serde(default)]
    pub url: Option<String>,

    /// API key sent as the `api-key` header. Optional for local instances.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Modality router configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// How many trailing messages the router analyzes.
    #[serde(default = "default_messages_to_analyze")]
    pub messages_to_analyze: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            messages_to_analyze: default_messages_to_analyze(),
        }
    }
}

fn default_messages_to_analyze() -> usize {
    3
}

/// History compaction configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CompactionConfig {
    /// Compaction runs once the history grows beyond this many messages.
    #[serde(default = "default_summary_trigger")]
    pub summary_trigger: usize,

    /// How many trailing messages survive compaction.
    #[serde(default = "default_retained_tail")]
    pub retained_tail: usize,
}

impl Default for CompactionConfig {
    fn default() -> Self {
        Self {
            summary_trigger: default_summary_trigger(),
            retained_tail: default_retained_tail(),
        }
    }
}

fn default_summary_trigger() -> usize {
    20
}

fn default_retained_tail() -> usize {
    5
}
