//! Shared utilities for the Agora governance engine.

pub mod logging;

pub use logging::init_tracing;
