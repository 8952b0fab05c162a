// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./luma.toml` > `~/.config/luma/luma.toml` >
//! `/etc/luma/luma.toml` with environment variable overrides via the
//! `LUMA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LumaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/luma/luma.toml` (system-wide)
/// 3. `~/.config/luma/luma.toml` (user XDG config)
/// 4. `./luma.toml` (local directory)
/// 5. `LUMA_*` environment variables
pub fn load_config() -> Result<LumaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LumaConfig::default()))
        .merge(Toml::file("/etc/luma/luma.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("luma/luma.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("luma.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<LumaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LumaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LumaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LumaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `LUMA_MEMORY_SIMILARITY_THRESHOLD` must
/// map to `memory.similarity_threshold`, not `memory.similarity.threshold`.
fn env_provider() -> Env {
    Env::prefixed("LUMA_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("memory_", "memory.", 1)
            .replacen("qdrant_", "qdrant.", 1)
            .replacen("router_", "router.", 1)
            .replacen("compaction_", "compaction.", 1);
        mapped.into()
    })
}
