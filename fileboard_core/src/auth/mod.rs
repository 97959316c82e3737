//! Token verification and the admin authorization gate.

pub mod gate;
pub mod verifier;

pub use gate::{AdminGate, Authorizer, SingleAdmin};
pub use verifier::{IdentityVerifier, JwtIdentityVerifier, RejectAllVerifier, VerifiedIdentity};
