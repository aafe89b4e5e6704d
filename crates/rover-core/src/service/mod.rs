//! Service layer orchestrating repository calls.

pub mod position;
