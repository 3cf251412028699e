use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: RunMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: RunMonitor::new(monitor_enabled),
        }
    }

    /// Runs extract, transform and load in order and returns the output path.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Fetching data directly from Google Sheets API...");

        let raw = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} ranging rows, {} deals rows, {} store location rows",
            raw.ranging.len(),
            raw.deals.len(),
            raw.store_locations.len()
        );
        self.monitor.log_phase("Extract");

        let data = self.pipeline.transform(raw).await?;
        tracing::info!(
            "Transformed {} deals and {} store locations",
            data.deals_data.len(),
            data.store_locations.len()
        );
        self.monitor.log_phase("Transform");

        let output_path = self.pipeline.load(data).await?;
        tracing::info!("Data successfully fetched and saved to {}", output_path);
        self.monitor.log_phase("Load");
        self.monitor.log_final();

        Ok(output_path)
    }
}
