//! Shared domain types for the rover position store.
//!
//! This crate contains the types used across the workspace: the rover
//! position, its direction and coordinates, the session identifier,
//! request validation rules, configuration, and error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod position;
pub mod validation;
