// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optional lead/CRM registration capability.

use async_trait::async_trait;

use crate::error::LumaError;

/// Registers or updates a sales lead in an external CRM.
///
/// Handed to the conversational generation strategy, which invokes it only
/// under explicit user-confirmation wording. The core state machine never
/// branches on it; it only guarantees the capability is reachable from the
/// generate step. Idempotency across repeated confirmations is the external
/// capability's contract.
#[async_trait]
pub trait LeadRegistrar: Send + Sync {
    async fn register_lead(
        &self,
        session_id: &str,
        user_name: Option<&str>,
        note: &str,
    ) -> Result<(), LumaError>;
}
