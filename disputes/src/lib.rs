//! Dispute engine for the Agora governance system.
//!
//! A dispute targets a post or comment, samples its jury once at creation
//! from a crypto-strength randomness source, and resolves the moment juror
//! participation crosses the jury quorum. A `valid` verdict cascades into
//! content removal — applied by the caller, reported here as a
//! [`Resolution`].

pub mod dispute;
pub mod engine;
pub mod error;
pub mod sampler;

pub use dispute::{Decision, Dispute, DisputeStatus, JurorBallot, Subject};
pub use engine::{DisputeEngine, Resolution};
pub use error::DisputeError;
pub use sampler::{JurorSampler, SystemSampler};
