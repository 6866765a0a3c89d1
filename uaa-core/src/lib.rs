//! UAA Core - UAA identity server administration
//!
//! This crate provides an authenticated session against a UAA server, managers
//! for clients, groups, users and identity zones, and a resource layer that
//! maps declarative desired state onto those managers.

pub mod api;
pub mod config;
pub mod error;
pub mod resource;
pub mod telemetry;

// Re-export commonly used types
pub use api::Session;
pub use config::Config;
pub use error::{Result, UaaError};
