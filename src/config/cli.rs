use crate::config::credentials::CredentialSources;
use crate::config::{validate_provider, DEFAULT_API_BASE_URL};
use crate::core::{ConfigProvider, RangeNames};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::time::Duration;

#[derive(Clone, Parser)]
#[command(name = "deals-sheet-etl")]
#[command(about = "Fetch the Ranging, Deals and StoreLocations sheets and write data.json for the site build")]
pub struct CliConfig {
    /// Google spreadsheet ID
    #[arg(long, env = "GOOGLE_SHEET_ID", default_value = "")]
    pub spreadsheet_id: String,

    #[arg(long, env = "GOOGLE_SHEETS_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    #[arg(long, default_value = "Ranging")]
    pub ranging_range: String,

    #[arg(long, default_value = "Deals")]
    pub deals_range: String,

    #[arg(long, default_value = "StoreLocations")]
    pub locations_range: String,

    #[arg(long, default_value = "dist")]
    pub output_dir: String,

    #[arg(long, default_value = "data.json")]
    pub output_file: String,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    /// Pre-issued OAuth2 access token; skips the service account exchange
    #[arg(long, env = "GOOGLE_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Service account key JSON file
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    pub credentials_file: Option<String>,

    #[arg(long, env = "GOOGLE_CLIENT_EMAIL")]
    pub client_email: Option<String>,

    #[arg(long, env = "GOOGLE_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// TOML config file; replaces the spreadsheet, range and output options
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    /// Validate configuration and exit without fetching
    #[arg(long)]
    pub dry_run: bool,
}

impl CliConfig {
    pub fn credential_sources(&self) -> CredentialSources {
        CredentialSources {
            access_token: self.access_token.clone(),
            credentials_file: self.credentials_file.clone(),
            client_email: self.client_email.clone(),
            private_key: self.private_key.clone(),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn ranges(&self) -> RangeNames {
        RangeNames {
            ranging: self.ranging_range.clone(),
            deals: self.deals_range.clone(),
            store_locations: self.locations_range.clone(),
        }
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;

    #[test]
    fn test_defaults() {
        let config = CliConfig::try_parse_from(["deals-sheet-etl", "--spreadsheet-id", "abc123"])
            .unwrap();

        assert_eq!(config.spreadsheet_id(), "abc123");
        assert_eq!(config.ranges(), RangeNames::default());
        assert_eq!(config.output_dir(), "dist");
        assert_eq!(config.output_file(), "data.json");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_range_overrides() {
        let config = CliConfig::try_parse_from([
            "deals-sheet-etl",
            "--spreadsheet-id",
            "abc123",
            "--deals-range",
            "Deals!A1:H",
            "--output-dir",
            "public",
        ])
        .unwrap();

        assert_eq!(config.ranges().deals, "Deals!A1:H");
        assert_eq!(config.ranges().ranging, "Ranging");
        assert_eq!(config.output_dir(), "public");
    }

    #[test]
    fn test_validation_failures() {
        let mut config =
            CliConfig::try_parse_from(["deals-sheet-etl", "--spreadsheet-id", "abc123"]).unwrap();

        config.timeout_seconds = 0;
        assert!(config.validate().is_err());

        config.timeout_seconds = 30;
        config.api_base_url = "ftp://sheets".to_string();
        assert!(config.validate().is_err());

        config.api_base_url = DEFAULT_API_BASE_URL.to_string();
        config.locations_range = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credential_sources_copy_flags() {
        let config = CliConfig::try_parse_from([
            "deals-sheet-etl",
            "--spreadsheet-id",
            "abc123",
            "--access-token",
            "tok",
        ])
        .unwrap();

        let sources = config.credential_sources();
        assert_eq!(sources.access_token.as_deref(), Some("tok"));
        assert!(!format!("{:?}", sources).contains("\"tok\""));
    }

    #[test]
    fn test_missing_spreadsheet_id() {
        let mut config =
            CliConfig::try_parse_from(["deals-sheet-etl", "--spreadsheet-id", "abc123"]).unwrap();
        config.spreadsheet_id = String::new();

        assert!(matches!(
            config.validate(),
            Err(EtlError::MissingConfigError { .. })
        ));
    }
}
