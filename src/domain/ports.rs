use crate::domain::model::{RangeNames, SheetExtract, SiteData};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    /// Writes `data` to `path` and returns where it actually landed.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn spreadsheet_id(&self) -> &str;
    fn api_base_url(&self) -> &str;
    fn ranges(&self) -> RangeNames;
    fn output_dir(&self) -> &str;
    fn output_file(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}

/// Supplies an OAuth2 bearer token for the Sheets API.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SheetExtract>;
    async fn transform(&self, data: SheetExtract) -> Result<SiteData>;
    async fn load(&self, data: SiteData) -> Result<String>;
}
