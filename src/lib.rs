//! Cookie-session authentication for LinkedIn.
//!
//! This crate handles the session-authentication lifecycle against
//! LinkedIn's cookie-based login endpoints: acquiring an anonymous session
//! token, exchanging it plus credentials for an authenticated session,
//! validating cached cookies before reuse, and persisting them across
//! process runs so repeated logins are avoided.
//!
//! The entry point is [`SessionManager`]:
//!
//! ```no_run
//! use linkedin_auth::{ClientConfig, SessionManager};
//!
//! # async fn run() -> Result<(), linkedin_auth::AuthError> {
//! let mut manager = SessionManager::new(ClientConfig::default())?;
//! let session = manager.authenticate("alice@example.com", "hunter2").await?;
//! let cookie_header = session.cookie_header();
//! let csrf_token = session.csrf_token();
//! # Ok(())
//! # }
//! ```
//!
//! Downstream Voyager data clients are out of scope here; they consume the
//! [`Session`]'s cookie header and CSRF token.
//!
//! This crate never installs a global `tracing` subscriber - binaries own
//! logging initialization.

pub mod api;
pub mod config;
pub mod cookies;
pub mod session;
pub mod store;

pub use api::{AuthClient, AuthError, AuthOutcome};
pub use config::ClientConfig;
pub use cookies::{Cookie, CookieJar, SESSION_COOKIE};
pub use session::{Session, SessionManager};
pub use store::{CredentialStore, StoreError};
