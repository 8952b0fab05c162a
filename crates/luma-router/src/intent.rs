// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent models behind the router.
//!
//! [`IntentModel`] abstracts how a modality label is derived from the
//! routing window. [`PatternIntent`] is the shipped default: zero-cost
//! heuristic rules matching explicit requests only. No model pre-call,
//! no network, no latency. A hosted-model implementation plugs in behind
//! the same trait.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use luma_core::{LumaError, Message, Role, Workflow};

/// Derives a modality label from the trailing routing window.
///
/// The returned label is parsed lossily by the router; anything outside
/// the known modality labels falls back to a plain text reply, so an
/// implementation that drifts off-contract degrades instead of failing
/// the turn.
#[async_trait]
pub trait IntentModel: Send + Sync {
    async fn classify(&self, window: &[Message]) -> Result<String, LumaError>;
}

/// Explicit image request patterns, Spanish and English.
///
/// A mention of visual things is not a request; only imperative or
/// can-you phrasings aimed at receiving an image count.
static IMAGE_REQUEST: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(
            r"(?i)\b(env[ií]a|env[ií]ame|enviarme|manda|m[áa]ndame|mandarme|muestra|mu[ée]strame|mostrarme|ense[ñn]a|ens[ée][ñn]ame|ense[ñn]arme)\b.*\b(foto|fotos|imagen|im[áa]genes|selfie)\b",
        )
        .unwrap(),
        Regex::new(r"(?i)\bquiero ver\b.*\b(foto|fotos|imagen|selfie)\b").unwrap(),
        Regex::new(r"(?i)\b(send|show)\s+me\b.*\b(photo|picture|pic|image|selfie)\b").unwrap(),
        Regex::new(r"(?i)\bcan i see\b.*\b(photo|picture|pic|image|selfie)\b").unwrap(),
    ]
});

/// Explicit voice request patterns, Spanish and English.
static AUDIO_REQUEST: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(
            r"(?i)\b(env[ií]a|env[ií]ame|enviarme|manda|m[áa]ndame|mandarme|graba|gr[áa]bame|grabarme)\b.*\b(audio|audios|nota de voz|mensaje de voz)\b",
        )
        .unwrap(),
        Regex::new(r"(?i)\b(escuchar|o[ií]r)\s+tu\s+voz\b").unwrap(),
        Regex::new(r"(?i)\bsend me\b.*\b(audio|voice\s+(message|note))\b").unwrap(),
        Regex::new(r"(?i)\bhear your voice\b").unwrap(),
    ]
});

/// Heuristic intent model matching explicit modality requests.
///
/// Only the latest user message in the window is matched. Older requests
/// in the window were already served on their own turn; re-matching them
/// would turn a follow-up like "gracias" into another image or audio
/// reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternIntent;

impl PatternIntent {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IntentModel for PatternIntent {
    async fn classify(&self, window: &[Message]) -> Result<String, LumaError> {
        let Some(last) = window.iter().rev().find(|m| m.role == Role::Human) else {
            return Ok(Workflow::Conversational.to_string());
        };
        if IMAGE_REQUEST.iter().any(|p| p.is_match(&last.content)) {
            return Ok(Workflow::Visual.to_string());
        }
        if AUDIO_REQUEST.iter().any(|p| p.is_match(&last.content)) {
            return Ok(Workflow::Vocal.to_string());
        }
        Ok(Workflow::Conversational.to_string())
    }
}
