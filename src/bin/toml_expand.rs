use clap::Parser;
use link_expander::config::toml_config::TomlConfig;
use link_expander::utils::{logger, validation::Validate};
use link_expander::{ExpandEngine, ExpandPipeline, LocalStorage};

#[derive(Parser)]
#[command(name = "toml-expand")]
#[command(about = "Expand shortened links using a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "expander.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Show the effective configuration without running
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based expand run");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(3);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(3);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    if args.dry_run {
        println!("🔍 DRY RUN - nothing will be expanded or written");
        println!("{}", config.summary());
        return Ok(());
    }

    let storage = LocalStorage::new(".".to_string());
    let pipeline = ExpandPipeline::new(storage, config);
    let engine = ExpandEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Expand run completed successfully!");
            println!("✅ Expand run completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Expand run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                link_expander::utils::error::ErrorSeverity::Low => 0,
                link_expander::utils::error::ErrorSeverity::Medium => 2,
                link_expander::utils::error::ErrorSeverity::High => 1,
                link_expander::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
