use reqwest::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The service demanded extra verification (CAPTCHA, two-step, ...).
    /// Carries the verdict string returned by the endpoint. Terminal for
    /// automated flows.
    #[error("additional verification required: {0}")]
    ChallengeRequired(String),

    /// Bad credentials. Callers must not retry with the same secret.
    #[error("invalid credentials")]
    Unauthorized,

    /// The endpoint answered with an unexpected HTTP status. No retry is
    /// performed at this layer.
    #[error("authentication endpoint returned status {0}")]
    TransientFailure(StatusCode),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("cookie cache error: {0}")]
    Storage(#[from] StoreError),

    /// The service's response did not set a session cookie, so no usable
    /// session can be derived from it.
    #[error("no session cookie in response")]
    MissingSessionToken,
}
