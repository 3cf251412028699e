use crate::adapters::SheetsClient;
use crate::core::reshape::{rows_to_deals, rows_to_store_locations};
use crate::core::{ConfigProvider, Pipeline, SheetExtract, SiteData, Storage, TokenProvider};
use crate::utils::error::Result;

pub struct SheetsPipeline<S: Storage, C: ConfigProvider, A: TokenProvider> {
    storage: S,
    config: C,
    auth: A,
    client: SheetsClient,
}

impl<S: Storage, C: ConfigProvider, A: TokenProvider> SheetsPipeline<S, C, A> {
    pub fn new(storage: S, config: C, auth: A) -> Result<Self> {
        let client = SheetsClient::new(
            config.api_base_url(),
            config.spreadsheet_id(),
            config.request_timeout(),
        )?;

        Ok(Self {
            storage,
            config,
            auth,
            client,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, A: TokenProvider> Pipeline for SheetsPipeline<S, C, A> {
    async fn extract(&self) -> Result<SheetExtract> {
        let token = self.auth.access_token().await?;
        let ranges = self.config.ranges();

        tracing::debug!(
            "Fetching ranges '{}', '{}', '{}' in parallel",
            ranges.ranging,
            ranges.deals,
            ranges.store_locations
        );

        // 三個範圍互不相依，並行抓取；任一失敗即中止
        let (ranging, deals, store_locations) = tokio::try_join!(
            self.client.fetch_range(&token, &ranges.ranging),
            self.client.fetch_range(&token, &ranges.deals),
            self.client.fetch_range(&token, &ranges.store_locations),
        )?;

        Ok(SheetExtract {
            ranging,
            deals,
            store_locations,
        })
    }

    async fn transform(&self, data: SheetExtract) -> Result<SiteData> {
        if data.deals.is_empty() {
            tracing::warn!("Deals range is empty, no header row found");
        }

        let deals_data = rows_to_deals(&data.deals);
        let store_locations = rows_to_store_locations(&data.store_locations);

        Ok(SiteData {
            ranging_data: data.ranging,
            deals_data,
            store_locations,
        })
    }

    async fn load(&self, data: SiteData) -> Result<String> {
        let json = serde_json::to_string_pretty(&data)?;

        tracing::debug!("Serialized {} bytes of site data", json.len());
        self.storage
            .write_file(self.config.output_file(), json.as_bytes())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::GoogleAuth;
    use crate::domain::model::RangeNames;
    use crate::utils::error::EtlError;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(format!("memory://{}", path))
        }
    }

    struct MockConfig {
        api_base_url: String,
        ranges: RangeNames,
    }

    impl MockConfig {
        fn new(api_base_url: String) -> Self {
            Self {
                api_base_url,
                ranges: RangeNames::default(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn spreadsheet_id(&self) -> &str {
            "sheet123"
        }

        fn api_base_url(&self) -> &str {
            &self.api_base_url
        }

        fn ranges(&self) -> RangeNames {
            self.ranges.clone()
        }

        fn output_dir(&self) -> &str {
            "dist"
        }

        fn output_file(&self) -> &str {
            "data.json"
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(5)
        }
    }

    fn pipeline_for(
        server: &MockServer,
    ) -> (
        SheetsPipeline<MockStorage, MockConfig, GoogleAuth>,
        MockStorage,
    ) {
        let storage = MockStorage::new();
        let pipeline = SheetsPipeline::new(
            storage.clone(),
            MockConfig::new(server.base_url()),
            GoogleAuth::AccessToken("token".to_string()),
        )
        .unwrap();
        (pipeline, storage)
    }

    fn mock_range(server: &MockServer, range: &str, values: serde_json::Value) {
        let path = format!("/spreadsheets/sheet123/values/{}", range);
        server.mock(|when, then| {
            when.method(GET).path(path).header("authorization", "Bearer token");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({ "values": values }));
        });
    }

    #[tokio::test]
    async fn test_extract_fetches_all_three_ranges() {
        let server = MockServer::start();
        mock_range(&server, "Ranging", serde_json::json!([["a", "b"]]));
        mock_range(&server, "Deals", serde_json::json!([["Name"], ["x"]]));
        mock_range(&server, "StoreLocations", serde_json::json!([["Store"]]));

        let (pipeline, _) = pipeline_for(&server);
        let extract = pipeline.extract().await.unwrap();

        assert_eq!(extract.ranging, vec![vec!["a", "b"]]);
        assert_eq!(extract.deals.len(), 2);
        assert_eq!(extract.store_locations.len(), 1);
    }

    #[tokio::test]
    async fn test_extract_fails_when_any_range_fails() {
        let server = MockServer::start();
        mock_range(&server, "Ranging", serde_json::json!([]));
        mock_range(&server, "StoreLocations", serde_json::json!([]));
        server.mock(|when, then| {
            when.method(GET).path("/spreadsheets/sheet123/values/Deals");
            then.status(403).json_body(serde_json::json!({
                "error": {"code": 403, "message": "The caller does not have permission"}
            }));
        });

        let (pipeline, _) = pipeline_for(&server);
        let err = pipeline.extract().await.unwrap_err();

        assert!(matches!(
            err,
            EtlError::SheetsApiError { status: 403, ref range, .. } if range == "Deals"
        ));
    }

    #[tokio::test]
    async fn test_transform_reshapes_deals_and_locations() {
        let server = MockServer::start();
        let (pipeline, _) = pipeline_for(&server);

        let extract = SheetExtract {
            ranging: vec![vec!["R1".to_string()]],
            deals: vec![
                vec!["Product Name".to_string(), "Deal Price".to_string()],
                vec!["Widget".to_string(), "9.99".to_string()],
            ],
            store_locations: vec![
                vec!["Store".to_string(), "Lat".to_string(), "Lng".to_string()],
                vec!["North".to_string(), "1.0".to_string(), "2.0".to_string()],
            ],
        };

        let data = pipeline.transform(extract).await.unwrap();

        assert_eq!(data.ranging_data, vec![vec!["R1"]]);
        assert_eq!(data.deals_data.len(), 1);
        assert_eq!(data.deals_data[0].get("productname"), Some("Widget"));
        assert_eq!(data.deals_data[0].get("dealprice"), Some("9.99"));
        assert_eq!(data.store_locations[0].store.as_deref(), Some("North"));
    }

    #[tokio::test]
    async fn test_transform_empty_ranges() {
        let server = MockServer::start();
        let (pipeline, _) = pipeline_for(&server);

        let data = pipeline.transform(SheetExtract::default()).await.unwrap();
        assert_eq!(data, SiteData::default());
    }

    #[tokio::test]
    async fn test_load_writes_pretty_json() {
        let server = MockServer::start();
        let (pipeline, storage) = pipeline_for(&server);

        let data = SiteData {
            ranging_data: vec![vec!["x".to_string()]],
            ..Default::default()
        };

        let path = pipeline.load(data.clone()).await.unwrap();
        assert_eq!(path, "memory://data.json");

        let written = storage.get_file("data.json").await.unwrap();
        let text = String::from_utf8(written).unwrap();
        assert!(text.starts_with("{\n  \"rangingData\""));
        assert!(!text.ends_with('\n'));

        let parsed: SiteData = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, data);
    }
}
