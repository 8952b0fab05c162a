// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn orchestration for the Luma dialogue agent.
//!
//! The [`TurnOrchestrator`] runs each incoming user message through a
//! fixed state machine: extract memorable facts, pick a response
//! modality, refresh the persona's scheduled activity, inject relevant
//! memories, generate the reply, and compact history when it has grown
//! too long. The [`SessionManager`] wraps it with checkpointing and
//! per-session turn serialization.

pub mod compact;
pub mod extract;
pub mod schedule;
pub mod session;
pub mod state;
pub mod turn;

pub use compact::SummaryCompactor;
pub use extract::{detect_user_name, MemoryExtractor};
pub use schedule::WeekSchedule;
pub use session::SessionManager;
pub use state::{StateUpdate, TurnState};
pub use turn::{TurnOrchestrator, TurnOutcome};
