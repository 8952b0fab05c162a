// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fact judge trait for deciding whether a user message carries a memorable fact.

use async_trait::async_trait;

use crate::error::LumaError;
use crate::types::FactVerdict;

/// Judges a single user message for long-term-memory-worthy content.
///
/// Implementations must honor the [`FactVerdict`] contract: an unimportant
/// message never carries a formatted memory.
#[async_trait]
pub trait FactJudge: Send + Sync {
    async fn judge(&self, message_text: &str) -> Result<FactVerdict, LumaError>;
}
