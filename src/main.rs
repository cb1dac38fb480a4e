use clap::Parser;
use ship_fitter::app::report::{render_csv, render_json, render_text};
use ship_fitter::core::session::IntentOutcome;
use ship_fitter::domain::ports::CatalogConfig;
use ship_fitter::utils::error::{ErrorSeverity, FitterError};
use ship_fitter::utils::logger;
use ship_fitter::{CatalogLoader, CatalogSource, CliConfig, OutputFormat, Session, ShipReport};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting ship-fitter");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ ship-fitter failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig) -> Result<(), FitterError> {
    let config = cli.resolve()?;
    tracing::info!("📁 Catalog source: {}", config.source());

    let bays = config.bays();
    if bays.is_empty() {
        tracing::warn!("No bays configured; every module will stay in inventory");
    }

    let source = CatalogSource::from_config(&config)?;
    let loader = CatalogLoader::new(source, config.modules_resource(), config.stats_resource());
    let mut session = Session::load(&loader, bays).await;

    for intent in config.intents() {
        match session.apply(intent.clone()) {
            IntentOutcome::Ignored(reason) => {
                tracing::warn!("Skipped {:?}: {:?}", intent, reason)
            }
            outcome => tracing::info!("{:?}", outcome),
        }
    }

    let detail = match cli.show.as_deref() {
        Some(key) => {
            let detail = session
                .find_module(key)
                .and_then(|id| session.module_detail(id));
            if detail.is_none() {
                tracing::warn!("Module '{}' is not in the catalog", key);
            }
            detail
        }
        None => None,
    };
    let report = ShipReport::build(&session).with_detail(detail);

    let rendered = match cli.format {
        OutputFormat::Text => render_text(&report),
        OutputFormat::Json => render_json(&report)?,
        OutputFormat::Csv => render_csv(&report)?,
    };
    print!("{}", rendered);

    Ok(())
}
