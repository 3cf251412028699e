pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{GoogleAuth, SheetsClient};
pub use config::{credentials::CredentialSources, storage::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{etl::EtlEngine, pipeline::SheetsPipeline};
pub use domain::model::{Deal, RangeNames, SiteData, StoreLocation};
pub use utils::error::{EtlError, Result};
