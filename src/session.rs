//! Authenticated session state and the orchestration around it.
//!
//! `SessionManager` owns the whole authenticate contract: try the cookie
//! cache first, fall back to the anonymous-session / credential-exchange
//! round trip, and persist the fresh jar on success. The resulting
//! `Session` is what downstream API collaborators consume - a cookie header
//! plus the CSRF token the service requires on every call.

use chrono::Utc;
use tracing::debug;

use crate::api::{AuthClient, AuthError, AuthOutcome};
use crate::config::ClientConfig;
use crate::cookies::CookieJar;
use crate::store::{CredentialStore, StoreError};

/// A live authenticated context.
///
/// The CSRF token is the session cookie's value stripped of its `"` quoting;
/// downstream requests send it as the `csrf-token` header.
#[derive(Debug, Clone)]
pub struct Session {
    jar: CookieJar,
    csrf_token: String,
}

impl Session {
    /// Derive a session from a jar.
    ///
    /// Fails with [`AuthError::MissingSessionToken`] when the jar has no
    /// session cookie - a jar without one cannot authenticate anything.
    pub fn from_jar(jar: CookieJar) -> Result<Self, AuthError> {
        let csrf_token = jar
            .session_token()
            .map(|cookie| cookie.value.trim_matches('"').to_string())
            .ok_or(AuthError::MissingSessionToken)?;

        Ok(Self { jar, csrf_token })
    }

    /// Anti-forgery token for the `csrf-token` request header.
    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    /// Value for the `Cookie` request header.
    pub fn cookie_header(&self) -> String {
        self.jar.cookie_header()
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.jar
    }
}

/// Orchestrates authentication: cache reuse, the network round trip, and
/// persistence. Holds at most one live session - the design targets one
/// credential identity per process at a time.
pub struct SessionManager {
    config: ClientConfig,
    client: AuthClient,
    store: CredentialStore,
    session: Option<Session>,
}

impl SessionManager {
    pub fn new(config: ClientConfig) -> Result<Self, AuthError> {
        let client = AuthClient::new(&config)?;
        let store = CredentialStore::new(config.storage_dir.clone());

        Ok(Self {
            config,
            client,
            store,
            session: None,
        })
    }

    /// Authenticate as `identity`, reusing cached cookies when possible.
    ///
    /// When cache reuse is enabled (the default) and the cached jar still
    /// holds a live session token, the session is rebuilt from disk and no
    /// network request is made. A cache miss, a dead token, or
    /// `refresh_credentials = true` all fall through to the full round trip:
    /// anonymous session, credential exchange, then persist the fresh jar.
    ///
    /// The secret is only ever sent to the service; it is never written to
    /// the cache.
    pub async fn authenticate(
        &mut self,
        identity: &str,
        secret: &str,
    ) -> Result<&Session, AuthError> {
        if !self.config.refresh_credentials {
            match self.store.load(identity) {
                Ok(jar) if jar.has_live_session_token(Utc::now()) => {
                    debug!(identity, "reusing cached session cookies");
                    return Ok(&*self.session.insert(Session::from_jar(jar)?));
                }
                Ok(_) => debug!(identity, "cached session token expired or unusable"),
                Err(StoreError::NotFound) => {
                    debug!(identity, "no cookie cache entry, requesting new cookies")
                }
                Err(err) => return Err(err.into()),
            }
        }

        let anonymous_jar = self.client.request_session_cookies().await?;
        match self
            .client
            .exchange_credentials(identity, secret, &anonymous_jar)
            .await?
        {
            AuthOutcome::Success(jar) => {
                let session = Session::from_jar(jar)?;
                self.store.save(identity, session.cookies())?;
                Ok(&*self.session.insert(session))
            }
            AuthOutcome::ChallengeRequired(verdict) => Err(AuthError::ChallengeRequired(verdict)),
            AuthOutcome::Unauthorized => Err(AuthError::Unauthorized),
            AuthOutcome::TransientFailure(status) => Err(AuthError::TransientFailure(status)),
        }
    }

    /// The current session, if an `authenticate` call has succeeded.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}

// ============================================================================
// Tests
// ============================================================================
