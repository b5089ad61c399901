//! # embedgate-core
//!
//! Configuration and shared types for the embed gate.
//!
//! This crate provides:
//! - `GateConfig`, the read-only configuration snapshot loaded once at
//!   process start (signing secret, token lifetime, embed allowlist)
//! - `ContentPayload`, the opaque content value handed back on a
//!   successful redemption

pub mod config;
pub mod content;

pub use config::{GateConfig, ServerConfig};
pub use content::ContentPayload;
