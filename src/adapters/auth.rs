use crate::domain::ports::TokenProvider;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use yup_oauth2::{ServiceAccountAuthenticator, ServiceAccountKey};

pub const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

/// How requests to the Sheets API are authorized.
#[derive(Clone)]
pub enum GoogleAuth {
    /// A bearer token obtained elsewhere.
    AccessToken(String),
    /// Service-account JWT flow, exchanged for a read-only token.
    ServiceAccount(Box<ServiceAccountKey>),
}

impl GoogleAuth {
    pub fn kind(&self) -> &'static str {
        match self {
            GoogleAuth::AccessToken(_) => "access token",
            GoogleAuth::ServiceAccount(_) => "service account",
        }
    }
}

// 不輸出 token 或私鑰
impl std::fmt::Debug for GoogleAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoogleAuth::AccessToken(_) => f.write_str("GoogleAuth::AccessToken(<redacted>)"),
            GoogleAuth::ServiceAccount(key) => {
                write!(f, "GoogleAuth::ServiceAccount({})", key.client_email)
            }
        }
    }
}

#[async_trait]
impl TokenProvider for GoogleAuth {
    async fn access_token(&self) -> Result<String> {
        match self {
            GoogleAuth::AccessToken(token) => Ok(token.clone()),
            GoogleAuth::ServiceAccount(key) => {
                tracing::debug!("Requesting access token for {}", key.client_email);

                let auth = ServiceAccountAuthenticator::builder(key.as_ref().clone())
                    .build()
                    .await
                    .map_err(|e| EtlError::AuthError {
                        message: format!("could not create an authenticator: {}", e),
                    })?;

                let token = auth
                    .token(&[SHEETS_READONLY_SCOPE])
                    .await
                    .map_err(|e| EtlError::AuthError {
                        message: format!("token exchange failed: {}", e),
                    })?;

                token
                    .token()
                    .map(str::to_string)
                    .ok_or_else(|| EtlError::AuthError {
                        message: "token response did not include an access token".to_string(),
                    })
            }
        }
    }
}
