#[cfg(feature = "cli")]
pub mod cli;
pub mod credentials;
pub mod storage;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_spreadsheet_id,
    validate_url,
};

pub const DEFAULT_API_BASE_URL: &str = "https://sheets.googleapis.com/v4";

/// Checks shared by every config source.
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_spreadsheet_id("spreadsheet_id", config.spreadsheet_id())?;
    validate_url("api_base_url", config.api_base_url())?;

    let ranges = config.ranges();
    validate_non_empty_string("ranges.ranging", &ranges.ranging)?;
    validate_non_empty_string("ranges.deals", &ranges.deals)?;
    validate_non_empty_string("ranges.store_locations", &ranges.store_locations)?;

    validate_path("output_dir", config.output_dir())?;
    validate_path("output_file", config.output_file())?;
    validate_range(
        "timeout_seconds",
        config.request_timeout().as_secs(),
        1,
        300,
    )?;

    tracing::debug!("✅ Configuration validation passed");
    Ok(())
}

/// Human readable summary for `--dry-run` and verbose logs. Never includes credentials.
pub fn config_summary<C: ConfigProvider>(config: &C) -> String {
    let ranges = config.ranges();
    format!(
        "spreadsheet: {}\napi: {}\nranges: {}, {}, {}\noutput: {}/{}\ntimeout: {}s",
        config.spreadsheet_id(),
        config.api_base_url(),
        ranges.ranging,
        ranges.deals,
        ranges.store_locations,
        config.output_dir(),
        config.output_file(),
        config.request_timeout().as_secs()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::TomlConfig;

    #[test]
    fn test_config_summary_lists_ranges_and_output() {
        let config = TomlConfig::from_toml_str("[spreadsheet]\nid = \"abc\"\n").unwrap();
        let summary = config_summary(&config);

        assert!(summary.contains("spreadsheet: abc"));
        assert!(summary.contains("ranges: Ranging, Deals, StoreLocations"));
        assert!(summary.contains("output: dist/data.json"));
    }

    #[test]
    fn test_validate_provider_rejects_bad_output_file() {
        let config = TomlConfig::from_toml_str(
            "[spreadsheet]\nid = \"abc\"\n\n[output]\nfile = \"\"\n",
        )
        .unwrap();
        assert!(validate_provider(&config).is_err());
    }
}
