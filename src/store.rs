//! On-disk cookie jar cache, one file per account identity.
//!
//! Jars are stored as versioned JSON records at
//! `<storage_dir>/<identity>.json` so the cache format stays readable and
//! independent of any one runtime's object model. Only cookies are ever
//! persisted here; passwords never touch the disk.

use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::cookies::{Cookie, CookieJar};

/// Bump when the on-disk record layout changes.
const JAR_FORMAT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum StoreError {
    /// No jar has been saved for this identity. Expected on first run;
    /// callers recover by performing a full authentication.
    #[error("no cached cookies for this identity")]
    NotFound,

    #[error("cookie cache I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("cookie cache is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("unsupported cookie cache version {0}")]
    UnsupportedVersion(u32),
}

/// Serialized form of a cached jar.
#[derive(Serialize, Deserialize)]
struct JarRecord {
    version: u32,
    cookies: Vec<Cookie>,
}

/// Persists cookie jars across process runs, keyed by account identity.
///
/// The identity is used verbatim as the file stem and must be stable and
/// filesystem-safe. Concurrent saves for the same identity from multiple
/// processes are a last-writer-wins race; this store does not guard against
/// them.
pub struct CredentialStore {
    storage_dir: PathBuf,
}

impl CredentialStore {
    pub fn new(storage_dir: PathBuf) -> Self {
        Self { storage_dir }
    }

    /// Load the cached jar for an identity.
    ///
    /// A missing file is `StoreError::NotFound`; any other failure (I/O,
    /// corrupt JSON, unknown format version) surfaces as its own variant.
    pub fn load(&self, identity: &str) -> Result<CookieJar, StoreError> {
        let path = self.jar_path(identity);
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound
            } else {
                StoreError::Io(e)
            }
        })?;

        let record: JarRecord = serde_json::from_str(&contents)?;
        if record.version != JAR_FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion(record.version));
        }

        debug!(identity, cookies = record.cookies.len(), "loaded cached cookie jar");
        Ok(CookieJar {
            cookies: record.cookies,
        })
    }

    /// Save a jar for an identity, overwriting any prior file.
    ///
    /// Creates the storage directory on first use.
    pub fn save(&self, identity: &str, jar: &CookieJar) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.storage_dir)?;

        let record = JarRecord {
            version: JAR_FORMAT_VERSION,
            cookies: jar.cookies.clone(),
        };
        let contents = serde_json::to_string_pretty(&record)?;
        std::fs::write(self.jar_path(identity), contents)?;

        debug!(identity, cookies = jar.len(), "saved cookie jar to cache");
        Ok(())
    }

    fn jar_path(&self, identity: &str) -> PathBuf {
        self.storage_dir.join(format!("{}.json", identity))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::cookies::SESSION_COOKIE;

    fn sample_jar() -> CookieJar {
        CookieJar {
            cookies: vec![
                Cookie {
                    name: SESSION_COOKIE.to_string(),
                    value: "\"ajax:123\"".to_string(),
                    domain: Some(".www.linkedin.com".to_string()),
                    path: Some("/".to_string()),
                    expires: Some(Utc::now() + Duration::hours(1)),
                },
                Cookie {
                    name: "li_at".to_string(),
                    value: "secret-token".to_string(),
                    domain: None,
                    path: None,
                    expires: None,
                },
            ],
        }
    }

    #[test]
    fn test_save_then_load_round_trips_all_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().to_path_buf());

        let jar = sample_jar();
        store.save("alice", &jar).unwrap();
        let loaded = store.load("alice").unwrap();

        assert_eq!(loaded, jar);
    }

    #[test]
    fn test_load_missing_identity_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().to_path_buf());

        assert!(matches!(store.load("nobody"), Err(StoreError::NotFound)));
    }

    #[test]
    fn test_save_creates_storage_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("jars");
        let store = CredentialStore::new(nested.clone());

        store.save("alice", &sample_jar()).unwrap();
        assert!(nested.join("alice.json").exists());
    }

    #[test]
    fn test_save_overwrites_prior_jar() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().to_path_buf());

        store.save("alice", &sample_jar()).unwrap();
        let replacement = CookieJar {
            cookies: vec![Cookie {
                name: SESSION_COOKIE.to_string(),
                value: "\"ajax:456\"".to_string(),
                domain: None,
                path: None,
                expires: None,
            }],
        };
        store.save("alice", &replacement).unwrap();

        assert_eq!(store.load("alice").unwrap(), replacement);
    }

    #[test]
    fn test_unknown_format_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().to_path_buf());

        std::fs::write(
            dir.path().join("alice.json"),
            r#"{"version": 99, "cookies": []}"#,
        )
        .unwrap();

        assert!(matches!(
            store.load("alice"),
            Err(StoreError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn test_corrupt_file_is_not_silently_treated_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().to_path_buf());

        std::fs::write(dir.path().join("alice.json"), "not json").unwrap();

        assert!(matches!(store.load("alice"), Err(StoreError::Corrupt(_))));
    }
}
