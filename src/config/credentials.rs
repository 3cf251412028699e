use crate::adapters::GoogleAuth;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::validate_required_field;
use yup_oauth2::ServiceAccountKey;

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Where Google credentials may come from, highest precedence first:
/// explicit access token, service-account key file, client email + private key.
#[derive(Clone, Default)]
pub struct CredentialSources {
    pub access_token: Option<String>,
    pub credentials_file: Option<String>,
    pub client_email: Option<String>,
    pub private_key: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl CredentialSources {
    pub async fn resolve(&self) -> Result<GoogleAuth> {
        if let Some(token) = present(&self.access_token) {
            return Ok(GoogleAuth::AccessToken(token.to_string()));
        }

        if let Some(path) = present(&self.credentials_file) {
            let key = yup_oauth2::read_service_account_key(path)
                .await
                .map_err(|e| EtlError::AuthError {
                    message: format!("could not read service account key at '{}': {}", path, e),
                })?;
            return Ok(GoogleAuth::ServiceAccount(Box::new(key)));
        }

        if present(&self.client_email).is_none() && present(&self.private_key).is_none() {
            return Err(EtlError::MissingConfigError {
                field: "GOOGLE_CLIENT_EMAIL and GOOGLE_PRIVATE_KEY (or GOOGLE_ACCESS_TOKEN / GOOGLE_APPLICATION_CREDENTIALS)"
                    .to_string(),
            });
        }

        let client_email =
            *validate_required_field("GOOGLE_CLIENT_EMAIL", &present(&self.client_email))?;
        let private_key =
            *validate_required_field("GOOGLE_PRIVATE_KEY", &present(&self.private_key))?;

        let key = service_account_key(client_email, private_key)?;
        Ok(GoogleAuth::ServiceAccount(Box::new(key)))
    }
}

// 私鑰不輸出
impl std::fmt::Debug for CredentialSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialSources")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("credentials_file", &self.credentials_file)
            .field("client_email", &self.client_email)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Env-provided keys often carry literal `\n` sequences instead of newlines.
pub fn unescape_private_key(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

pub fn service_account_key(client_email: &str, private_key: &str) -> Result<ServiceAccountKey> {
    if !client_email.contains('@') {
        return Err(EtlError::InvalidConfigValueError {
            field: "GOOGLE_CLIENT_EMAIL".to_string(),
            value: client_email.to_string(),
            reason: "Expected a service account email address".to_string(),
        });
    }

    let private_key = unescape_private_key(private_key);
    if !private_key.contains("PRIVATE KEY") {
        return Err(EtlError::InvalidConfigValueError {
            field: "GOOGLE_PRIVATE_KEY".to_string(),
            value: "<redacted>".to_string(),
            reason: "Expected a PEM encoded private key".to_string(),
        });
    }

    let key = serde_json::from_value(serde_json::json!({
        "type": "service_account",
        "client_email": client_email,
        "private_key": private_key,
        "token_uri": DEFAULT_TOKEN_URI,
    }))?;
    Ok(key)
}
