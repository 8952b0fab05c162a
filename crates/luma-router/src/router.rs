// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modality routing over the trailing conversation window.

use std::sync::Arc;

use tracing::debug;

use luma_config::RouterConfig;
use luma_core::{LumaError, Message, Workflow};

use crate::intent::{IntentModel, PatternIntent};

/// Selects the response modality for a turn.
///
/// Hands the last `messages_to_analyze` messages to the intent model and
/// parses the returned label lossily: an off-contract label routes to a
/// plain text reply rather than failing the turn.
pub struct Router {
    model: Arc<dyn IntentModel>,
    config: RouterConfig,
}

impl Router {
    pub fn new(model: Arc<dyn IntentModel>, config: RouterConfig) -> Self {
        Self { model, config }
    }

    /// Router backed by the zero-cost heuristic intent model.
    pub fn heuristic(config: RouterConfig) -> Self {
        Self::new(Arc::new(PatternIntent::new()), config)
    }

    /// Classifies the workflow for the current turn.
    ///
    /// `messages` is the full visible history; only the trailing window is
    /// analyzed. An empty history routes to a plain text reply.
    pub async fn route(&self, messages: &[Message]) -> Result<Workflow, LumaError> {
        let start = messages.len().saturating_sub(self.config.messages_to_analyze);
        let label = self.model.classify(&messages[start..]).await?;
        let workflow = Workflow::parse_lossy(&label);
        debug!(%label, %workflow, window = messages.len() - start, "routed turn");
        Ok(workflow)
    }
}
