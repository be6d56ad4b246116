//! Core business logic for civicfix.
//!
//! The issue lifecycle and moderation consistency engine: status
//! transitions with an immutable audit trail, duplicate-safe moderation
//! flags, role-gated moderation actions, and distance-ranked proximity
//! queries.

pub mod services;

pub use services::*;
