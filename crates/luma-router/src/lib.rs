// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response modality routing.
//!
//! Decides, per turn, whether the persona answers with plain text, an
//! image, or a voice message. The decision looks only at a trailing
//! window of the conversation and follows explicit-request rules: visual
//! and vocal replies happen only when the user asked for them.

pub mod intent;
pub mod router;

pub use intent::{IntentModel, PatternIntent};
pub use router::Router;
