//! Infrastructure layer for the rover position store.
//!
//! Contains the implementations of the repository traits defined in
//! `rover-core` (SQLite storage) and the configuration loader.

pub mod config;
pub mod sqlite;
