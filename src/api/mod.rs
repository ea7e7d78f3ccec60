//! HTTP boundary for LinkedIn's authentication service.
//!
//! This module provides the `AuthClient` for the two authentication
//! endpoints: the anonymous-session GET and the credential-exchange POST.
//! Interpretation of an exchange is expressed as the `AuthOutcome` enum
//! rather than errors, so callers match on the verdict explicitly.

pub mod client;
pub mod error;

pub use client::{AuthClient, AuthOutcome};
pub use error::AuthError;
