//! HTTP client for LinkedIn's cookie-session authentication endpoints.
//!
//! This module speaks the two-step protocol the service requires: an
//! unauthenticated GET to obtain an anonymous session cookie, then a
//! form-encoded POST that exchanges credentials plus that cookie for an
//! authenticated jar. Everything downstream of authentication (Voyager data
//! endpoints) is out of scope and consumes the resulting session instead.

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::cookies::{CookieJar, SESSION_COOKIE};

use super::AuthError;

// ============================================================================
// Constants
// ============================================================================

/// Both the anonymous-session GET and the credential-exchange POST go here.
const AUTH_ENDPOINT: &str = "/uas/authenticate";

/// Verdict value the endpoint returns when credentials were accepted
/// without further verification. Anything else is a challenge reason.
const LOGIN_PASS: &str = "PASS";

/// The auth endpoints expect the mobile client identity; requests without
/// these headers are served a web login page instead of the JSON verdict.
const AUTH_USER_AGENT: &str = "LinkedIn/8.8.1 CFNetwork/711.3.18 Darwin/14.0.0";
const AUTH_LI_USER_AGENT: &str = "LIAuthLibrary:3.2.4 com.linkedin.LinkedIn:8.8.1 iPhone:8.3";

/// Body of an authentication response.
/// Parsed leniently: a body without a verdict falls through to status checks.
#[derive(Debug, Deserialize)]
struct AuthVerdict {
    login_result: Option<String>,
}

/// Result of one credential-exchange attempt.
#[derive(Debug)]
pub enum AuthOutcome {
    /// Credentials accepted; carries the authenticated jar, which supersedes
    /// the anonymous one.
    Success(CookieJar),
    /// The service wants extra verification; carries its verdict string.
    ChallengeRequired(String),
    /// HTTP 401 - bad credentials.
    Unauthorized,
    /// Any other non-200 status.
    TransientFailure(StatusCode),
}

/// Client for the authentication endpoints.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(config: &ClientConfig) -> Result<Self, AuthError> {
        let mut builder =
            Client::builder().timeout(Duration::from_secs(config.request_timeout_secs));
        if let Some(ref proxy) = config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.auth_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn auth_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(AUTH_USER_AGENT));
        headers.insert(
            header::HeaderName::from_static("x-li-user-agent"),
            header::HeaderValue::from_static(AUTH_LI_USER_AGENT),
        );
        headers.insert(
            header::HeaderName::from_static("x-user-language"),
            header::HeaderValue::from_static("en"),
        );
        headers.insert(
            header::HeaderName::from_static("x-user-locale"),
            header::HeaderValue::from_static("en_US"),
        );
        headers.insert(header::ACCEPT_LANGUAGE, header::HeaderValue::from_static("en-us"));
        headers
    }

    /// Request a fresh set of anonymous session cookies.
    ///
    /// Returns whatever cookies the service sets; the caller upgrades them
    /// through [`AuthClient::exchange_credentials`]. Transport failures
    /// surface as [`AuthError::Network`] with no retry.
    pub async fn request_session_cookies(&self) -> Result<CookieJar, AuthError> {
        let url = format!("{}{}", self.base_url, AUTH_ENDPOINT);

        let response = self
            .client
            .get(&url)
            .headers(Self::auth_headers())
            .send()
            .await?;

        let jar = CookieJar::from_response_headers(response.headers());
        debug!(cookies = jar.len(), "received anonymous session cookies");
        Ok(jar)
    }

    /// Exchange credentials plus an anonymous jar for an authenticated one.
    ///
    /// The session-token value travels twice, exactly as the service
    /// expects: raw (quotes and all) in the form body, and alongside the
    /// rest of the anonymous jar in the `Cookie` header.
    ///
    /// The body-level verdict is checked before the HTTP status: the service
    /// returns 200 alongside challenge verdicts, so the order here is
    /// load-bearing.
    pub async fn exchange_credentials(
        &self,
        identity: &str,
        secret: &str,
        anonymous_jar: &CookieJar,
    ) -> Result<AuthOutcome, AuthError> {
        let token = anonymous_jar
            .session_token()
            .map(|cookie| cookie.value.clone())
            .ok_or(AuthError::MissingSessionToken)?;

        let url = format!("{}{}", self.base_url, AUTH_ENDPOINT);
        let payload = [
            ("session_key", identity),
            ("session_password", secret),
            (SESSION_COOKIE, token.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .headers(Self::auth_headers())
            .header(header::COOKIE, anonymous_jar.cookie_header())
            .form(&payload)
            .send()
            .await?;

        let status = response.status();
        let jar = CookieJar::from_response_headers(response.headers());
        // A transport failure while reading the body must surface: without
        // the body there is no verdict to interpret.
        let body = response.text().await?;

        if let Some(verdict) = login_verdict(&body) {
            if verdict != LOGIN_PASS {
                warn!(verdict = %verdict, "authentication challenged by service");
                return Ok(AuthOutcome::ChallengeRequired(verdict));
            }
        }

        if status == StatusCode::UNAUTHORIZED {
            return Ok(AuthOutcome::Unauthorized);
        }
        if status != StatusCode::OK {
            warn!(status = %status, "unexpected status from authentication endpoint");
            return Ok(AuthOutcome::TransientFailure(status));
        }

        debug!(cookies = jar.len(), "credentials accepted");
        Ok(AuthOutcome::Success(jar))
    }
}

/// Extract the `login_result` verdict from a response body, if any.
fn login_verdict(body: &str) -> Option<String> {
    serde_json::from_str::<AuthVerdict>(body)
        .ok()
        .and_then(|verdict| verdict.login_result)
}

// ============================================================================
// Tests
// ============================================================================
