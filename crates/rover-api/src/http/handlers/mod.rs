//! HTTP request handlers for the JSON API.

pub mod position;
