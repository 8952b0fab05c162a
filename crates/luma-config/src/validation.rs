// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic validation for loaded configuration.
//!
//! Figment catches type and unknown-key errors; this pass catches values
//! that parse fine but make no sense at runtime.

use luma_core::LumaError;

use crate::model::LumaConfig;

/// Validates cross-field and range constraints on a loaded config.
///
/// Returns the first violation as [`LumaError::Config`]; a config that
/// passes is safe to hand to component constructors.
pub fn validate(config: &LumaConfig) -> Result<(), LumaError> {
    let memory = &config.memory;
    if !(0.0..=1.0).contains(&memory.similarity_threshold) {
        return Err(LumaError::Config(format!(
            "memory.similarity_threshold must be within [0.0, 1.0], got {}",
            memory.similarity_threshold
        )));
    }
    if memory.search_k == 0 {
        return Err(LumaError::Config(
            "memory.search_k must be at least 1".to_string(),
        ));
    }
    if memory.personal_collection == memory.knowledge_collection {
        return Err(LumaError::Config(format!(
            "memory.personal_collection and memory.knowledge_collection must differ, both are {:?}",
            memory.personal_collection
        )));
    }

    if config.router.messages_to_analyze == 0 {
        return Err(LumaError::Config(
            "router.messages_to_analyze must be at least 1".to_string(),
        ));
    }

    let compaction = &config.compaction;
    if compaction.retained_tail >= compaction.summary_trigger {
        return Err(LumaError::Config(format!(
            "compaction.retained_tail ({}) must be smaller than compaction.summary_trigger ({})",
            compaction.retained_tail, compaction.summary_trigger
        )));
    }

    Ok(())
}
