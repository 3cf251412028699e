use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Authentication error: {message}")]
    AuthError { message: String },

    #[error("Sheets API error for range '{range}' (HTTP {status}): {message}")]
    SheetsApiError {
        range: String,
        status: u16,
        message: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Authentication,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 可重試 (網路或暫時性 API 錯誤)
    Medium,
    /// 處理錯誤
    High,
    /// 系統錯誤
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) => ErrorCategory::Network,
            EtlError::SheetsApiError { status, .. } if *status == 401 || *status == 403 => {
                ErrorCategory::Authentication
            }
            EtlError::SheetsApiError { .. } => ErrorCategory::Network,
            EtlError::AuthError { .. } => ErrorCategory::Authentication,
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            EtlError::SerializationError(_) => ErrorCategory::Data,
            EtlError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::ApiError(_) => ErrorSeverity::Medium,
            EtlError::SheetsApiError { status, .. } if *status == 429 || *status >= 500 => {
                ErrorSeverity::Medium
            }
            EtlError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// 根據嚴重程度決定的程序退出碼，永遠不為 0
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::ApiError(_) => {
                "Check network connectivity to the Sheets API and try again".to_string()
            }
            EtlError::SheetsApiError { status: 401, .. } => {
                "The access token was rejected; refresh credentials and retry".to_string()
            }
            EtlError::SheetsApiError { status: 403, .. } => {
                "Share the spreadsheet with the service account's client email".to_string()
            }
            EtlError::SheetsApiError { status: 404, .. } => {
                "Check GOOGLE_SHEET_ID and that the spreadsheet still exists".to_string()
            }
            EtlError::SheetsApiError { status: 400, range, .. } => format!(
                "Make sure a tab or named range called '{}' exists in the spreadsheet",
                range
            ),
            EtlError::SheetsApiError { .. } => {
                "The Sheets API is unavailable or rate limited; retry later".to_string()
            }
            EtlError::AuthError { .. } => {
                "Verify GOOGLE_CLIENT_EMAIL and GOOGLE_PRIVATE_KEY (or the key file)".to_string()
            }
            EtlError::MissingConfigError { field } => {
                format!("Provide a value for '{}' via flag, env var or config file", field)
            }
            EtlError::InvalidConfigValueError { field, .. }
            | EtlError::ConfigValidationError { field, .. } => {
                format!("Fix the value of '{}' and run again", field)
            }
            EtlError::ConfigError { .. } => "Review the configuration and run again".to_string(),
            EtlError::SerializationError(_) => {
                "Inspect the spreadsheet contents for unexpected data".to_string()
            }
            EtlError::IoError(_) => {
                "Check that the output directory is writable and has free space".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not fetch spreadsheet data: {}", self),
            ErrorCategory::Authentication => format!("Google authentication failed: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Data => format!("Could not process spreadsheet data: {}", self),
            ErrorCategory::System => format!("Could not write output: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
