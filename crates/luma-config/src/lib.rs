// SPDX-FileCopyrightText: 2026 Luma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Luma dialogue agent.
//!
//! Typed model structs, a Figment-based layered loader (TOML files plus
//! `LUMA_`-prefixed environment variables), and a semantic validation pass.

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{
    AgentConfig, CompactionConfig, LumaConfig, MemoryConfig, QdrantConfig, RouterConfig,
};
pub use validation::validate;
