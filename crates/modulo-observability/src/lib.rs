//! Observability for the modular-furniture cart.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with scope context
//! - `LogSink` - Stderr output or an in-memory capture buffer for tests

mod logging;

pub use logging::*;
