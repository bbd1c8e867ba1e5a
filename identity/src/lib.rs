//! User registry and identity gate for the Agora governance engine.
//!
//! Every mutating operation in the system is gated on a verification level:
//! an integer tier representing how strongly a user's identity has been
//! attested. The gate fails closed — an unregistered user never meets any
//! non-zero requirement.

pub mod error;
pub mod registry;

pub use error::IdentityError;
pub use registry::{IdentityRegistry, User};
