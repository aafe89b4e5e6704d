//! Observability for the rover position store: structured logging with
//! optional OpenTelemetry span export.

pub mod tracing_setup;
