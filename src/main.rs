use anyhow::Context;
use belt_sheets::domain::ports::ConfigProvider;
use belt_sheets::utils::{logger, validation::Validate};
use belt_sheets::{
    CliConfig, ExternalConverter, LocalStorage, QrencodeCli, RunSummary, SheetEngine, SheetError,
    TomlConfig,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, cli.log_json);

    tracing::info!("Starting belt-sheets");
    tracing::debug!("CLI config: {:?}", cli);

    let result = match cli.config.clone() {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let mut config = TomlConfig::from_file(&path)
                .with_context(|| format!("failed to load config file '{}'", path.display()))?;
            config.apply_flags(cli.full, cli.evergreen);
            generate(config).await
        }
        None => generate(cli).await,
    };

    match result {
        Ok(summary) => {
            tracing::info!(
                "Generated {} documents (revision {})",
                summary.documents.len(),
                summary.revision
            );
            println!("✅ Sheets generated");
            println!("📁 {}", summary.everything.display());
            println!("📁 {}", summary.everything_doublesided.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Generation failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

async fn generate<C>(config: C) -> Result<RunSummary, SheetError>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;

    let tools = config.tools().clone();
    let storage = LocalStorage::new(".");
    let converter = ExternalConverter::new(tools.clone());
    let qr_encoder = Box::new(QrencodeCli::new(tools.qrencode));

    let mut engine = SheetEngine::new(storage, config, converter, qr_encoder);
    engine.run().await
}
