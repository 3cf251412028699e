use clap::Parser;
use deals_sheet_etl::config::config_summary;
use deals_sheet_etl::core::ConfigProvider;
use deals_sheet_etl::utils::{logger, validation::Validate};
use deals_sheet_etl::{CliConfig, EtlEngine, EtlError, LocalStorage, SheetsPipeline, TomlConfig};

#[tokio::main]
async fn main() {
    // .env 不存在時忽略
    dotenv::dotenv().ok();

    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting deals-sheet-etl");

    let result = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => {
                    let monitor = cli.monitor || config.monitoring_enabled();
                    run(config, &cli, monitor).await
                }
                Err(e) => Err(e),
            }
        }
        None => run(cli.clone(), &cli, cli.monitor).await,
    };

    if let Err(e) = result {
        exit_with(e);
    }
}

/// Validates the config, then runs the pipeline unless this is a dry run.
async fn run<C>(config: C, cli: &CliConfig, monitor: bool) -> Result<(), EtlError>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;
    tracing::debug!("Configuration:\n{}", config_summary(&config));

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be fetched or written");
        println!("{}", config_summary(&config));
        return Ok(());
    }

    let auth = cli.credential_sources().resolve().await?;
    tracing::info!("🔑 Authenticating with {}", auth.kind());

    if monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_dir());
    let pipeline = SheetsPipeline::new(storage, config, auth)?;
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor);

    engine.run().await?;
    Ok(())
}

fn exit_with(e: EtlError) -> ! {
    tracing::error!(
        "❌ Error fetching data from Google Sheets API: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
