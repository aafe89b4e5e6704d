//! Business logic and repository trait definitions for the rover position store.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements. It depends only on `rover-types` -- never on
//! `rover-infra` or any database/IO crate.

pub mod repository;
pub mod service;
