//! Cookie jar model for session persistence.
//!
//! LinkedIn's authentication endpoints communicate entirely through cookies,
//! so the jar is modeled explicitly rather than hidden inside the HTTP
//! client: every attribute that matters for reuse (name, value, domain,
//! path, expiry) round-trips through the on-disk cache exactly.

use chrono::{DateTime, Duration, Utc};
use reqwest::header::{self, HeaderMap};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name of the cookie that carries the LinkedIn session token.
///
/// Present on both anonymous and authenticated sessions; its value doubles
/// as the CSRF token once the surrounding quotes are stripped.
pub const SESSION_COOKIE: &str = "JSESSIONID";

/// A single cookie as set by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

impl Cookie {
    /// Parse a `Set-Cookie` header value.
    ///
    /// Returns `None` if the leading `name=value` pair is missing or has an
    /// empty name. Unrecognized attributes (Secure, HttpOnly, SameSite, ...)
    /// are ignored; `Max-Age` takes precedence over `Expires` per RFC 6265.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::parse_at(raw, Utc::now())
    }

    fn parse_at(raw: &str, now: DateTime<Utc>) -> Option<Self> {
        let mut segments = raw.split(';');

        let (name, value) = segments.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut domain = None;
        let mut path = None;
        let mut expires = None;
        let mut max_age = None;

        for segment in segments {
            let (attr, attr_value) = match segment.split_once('=') {
                Some((a, v)) => (a.trim(), v.trim()),
                // Flag attributes like Secure carry no value
                None => continue,
            };
            match attr.to_ascii_lowercase().as_str() {
                "domain" => domain = Some(attr_value.to_string()),
                "path" => path = Some(attr_value.to_string()),
                "expires" => expires = parse_cookie_date(attr_value),
                "max-age" => max_age = attr_value.parse::<i64>().ok(),
                _ => {}
            }
        }

        // Max-Age wins over Expires; a value too large to represent yields
        // no expiry rather than aborting on overflow.
        let expires = match max_age {
            Some(secs) => Duration::try_seconds(secs).and_then(|d| now.checked_add_signed(d)),
            None => expires,
        };

        Some(Self {
            name: name.to_string(),
            value: value.trim().to_string(),
            domain,
            path,
            expires,
        })
    }
}

/// Cookie dates come in the RFC 1123 form and the older dash-separated
/// Netscape form; LinkedIn has been observed to use both.
fn parse_cookie_date(raw: &str) -> Option<DateTime<Utc>> {
    const FORMATS: [&str; 2] = ["%a, %d %b %Y %H:%M:%S GMT", "%a, %d-%b-%Y %H:%M:%S GMT"];

    FORMATS.iter().find_map(|format| {
        chrono::NaiveDateTime::parse_from_str(raw, format)
            .ok()
            .map(|naive| naive.and_utc())
    })
}

/// An ordered set of cookies for one session.
///
/// Order is preserved from the service's `Set-Cookie` headers; lookups
/// return the first occurrence of a name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CookieJar {
    pub cookies: Vec<Cookie>,
}

impl CookieJar {
    /// Collect every parseable `Set-Cookie` header from a response.
    pub fn from_response_headers(headers: &HeaderMap) -> Self {
        let mut jar = Self::default();
        for value in headers.get_all(header::SET_COOKIE) {
            let Ok(raw) = value.to_str() else {
                debug!("skipping set-cookie header with non-ASCII bytes");
                continue;
            };
            match Cookie::parse(raw) {
                Some(cookie) => jar.cookies.push(cookie),
                None => debug!("skipping malformed set-cookie header"),
            }
        }
        jar
    }

    /// First cookie with the given name, if any.
    pub fn get(&self, name: &str) -> Option<&Cookie> {
        self.cookies.iter().find(|cookie| cookie.name == name)
    }

    /// The session token cookie, if present.
    pub fn session_token(&self) -> Option<&Cookie> {
        self.get(SESSION_COOKIE)
    }

    /// Render the jar as a `Cookie` request header value, preserving order.
    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|cookie| format!("{}={}", cookie.name, cookie.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Whether the jar holds a session token that is still usable at `now`.
    ///
    /// Only the first session cookie is inspected. A token without an expiry
    /// is treated as unusable rather than "never expires": service-issued
    /// session tokens always carry one, so a missing expiry means the jar
    /// was not produced by a real authentication exchange.
    pub fn has_live_session_token(&self, now: DateTime<Utc>) -> bool {
        match self.session_token() {
            Some(cookie) if !cookie.value.is_empty() => {
                cookie.expires.map(|expires| expires > now).unwrap_or(false)
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
