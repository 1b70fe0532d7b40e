use anyhow::Context;
use clap::Parser;
use schrodinger_model::cli::{Cli, Commands};
use schrodinger_model::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))
                .context("embedded default config is invalid")?
        }
    };

    // Initialize telemetry
    schrodinger_model::telemetry::init_telemetry(&config.telemetry)?;
    tracing::debug!(scenarios = %config.scenarios.path.display(), "Configuration loaded");

    match cli.command {
        Commands::Value(args) => args.execute(&config).await?,
        Commands::Scenarios(args) => args.execute(&config).await?,
        Commands::Price(args) => args.execute(&config).await?,
        Commands::Interactive(args) => {
            tracing::info!("Starting interactive session");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration ({}):", cli.config);
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
