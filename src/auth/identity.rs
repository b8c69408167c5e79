//! Remote identity-provider client.
//!
//! Speaks the provider's password-auth REST surface (`accounts:signUp`
//! and `accounts:signInWithPassword`, JSON over TLS) and normalizes
//! responses into [`AuthResponseData`] / [`IdentityError`].

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::secret::SecretString;

/// Default identity-provider endpoint.
const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Fallback message for transport failures, malformed responses, and
/// provider codes outside the known set.
pub const GENERIC_AUTH_ERROR: &str = "An unknown error occurred!";

/// Errors from identity-provider calls.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider rejected the request with an error code string.
    #[error("identity provider rejected the request: {code}")]
    Provider { code: String },

    /// Transport-level failure (DNS, TLS, timeout, connection).
    #[error("identity request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider responded with a body we could not interpret.
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

impl IdentityError {
    /// User-visible message for this failure.
    ///
    /// Classified provider codes map to their specific message; anything
    /// else gets the generic one.
    pub fn user_message(&self) -> String {
        match self {
            IdentityError::Provider { code } => classify_error_code(code).to_string(),
            IdentityError::Transport(_) | IdentityError::Malformed(_) => {
                GENERIC_AUTH_ERROR.to_string()
            }
        }
    }
}

/// Provider error code → user-visible message.
///
/// The known set is exhaustive; anything else maps to the generic
/// message.
fn classify_error_code(code: &str) -> &'static str {
    match code {
        "EMAIL_EXISTS" => "The email address is already in use by another account.",
        "OPERATION_NOT_ALLOWED" => "Password sign-in is disabled for this project.",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => {
            "We have blocked all requests from this device due to unusual activity. Try again later."
        }
        "EMAIL_NOT_FOUND" => {
            "There is no user record corresponding to this identifier. The user may have been deleted."
        }
        "INVALID_PASSWORD" => "The password is invalid or the user does not have a password.",
        "USER_DISABLED" => "The user account has been disabled by an administrator.",
        _ => GENERIC_AUTH_ERROR,
    }
}

/// Successful provider response, normalized.
#[derive(Debug, Clone)]
pub struct AuthResponseData {
    pub email: String,
    pub user_id: String,
    pub token: String,
    /// Validity window granted by the provider.
    pub expires_in: Duration,
}

/// Remote identity service: account creation and password login.
///
/// The effect runner is generic over this trait so tests can substitute
/// a scripted fake without any HTTP.
pub trait IdentityProvider: Send + Sync + 'static {
    fn sign_up(
        &self,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<AuthResponseData, IdentityError>> + Send;

    fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<AuthResponseData, IdentityError>> + Send;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponseBody {
    id_token: String,
    email: String,
    /// Seconds, as a decimal string on the wire.
    expires_in: String,
    local_id: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// `reqwest`-backed identity provider.
pub struct IdentityClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl IdentityClient {
    /// Client against the default provider endpoint.
    pub fn new(api_key: SecretString) -> Result<Self, IdentityError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Client against a non-default endpoint (e.g. a local emulator).
    pub fn with_base_url(
        api_key: SecretString,
        base_url: impl Into<String>,
    ) -> Result<Self, IdentityError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
        })
    }

    async fn call(
        &self,
        operation: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthResponseData, IdentityError> {
        let url = format!(
            "{}/accounts:{}?key={}",
            self.base_url.trim_end_matches('/'),
            operation,
            self.api_key.expose()
        );

        tracing::debug!(operation, email = %email, "sending identity request");

        let response = self
            .client
            .post(&url)
            .json(&AuthRequest {
                email,
                password: password.expose(),
                return_secure_token: true,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Unreadable error bodies fall back to the generic message
            // downstream; readable ones carry the provider code.
            let body: ErrorBody = response
                .json()
                .await
                .map_err(|e| IdentityError::Malformed(e.to_string()))?;
            tracing::debug!(status = %status, code = %body.error.message, "identity request rejected");
            return Err(IdentityError::Provider {
                code: body.error.message,
            });
        }

        let body: AuthResponseBody = response
            .json()
            .await
            .map_err(|e| IdentityError::Malformed(e.to_string()))?;
        let seconds: u64 = body.expires_in.parse().map_err(|_| {
            IdentityError::Malformed(format!("non-numeric expiresIn: {:?}", body.expires_in))
        })?;

        Ok(AuthResponseData {
            email: body.email,
            user_id: body.local_id,
            token: body.id_token,
            expires_in: Duration::from_secs(seconds),
        })
    }
}

impl IdentityProvider for IdentityClient {
    async fn sign_up(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthResponseData, IdentityError> {
        self.call("signUp", email, password).await
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthResponseData, IdentityError> {
        self.call("signInWithPassword", email, password).await
    }
}
