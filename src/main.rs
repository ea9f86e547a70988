//! RepoFetch CLI entry point.
//!
//! This binary provides the command-line interface for RepoFetch.

use clap::Parser;
use repofetch::cli::{Cli, Commands, OutputFormat};
use repofetch::{Config, Fetcher, RepoFetchError, ResolveOverrides};
use std::error::Error;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    // Run the appropriate command
    match run(cli).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");

            // Print error with full chain
            eprintln!("Error: {e}");

            // Print error chain (cause chain)
            let mut source = e.source();
            if source.is_some() {
                eprintln!("\nCaused by:");
                let mut i = 0;
                while let Some(cause) = source {
                    eprintln!("  {i}: {cause}");
                    source = cause.source();
                    i += 1;
                }
            }

            let code = e
                .downcast_ref::<RepoFetchError>()
                .map_or(1, RepoFetchError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        // First try to use RUST_LOG from environment, otherwise use verbose flag
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let base_level = match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            // Filter string: repofetch at specified level, everything else at warn
            EnvFilter::new(format!("warn,repofetch={base_level}"))
        })
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    // Load configuration
    tracing::debug!("Loading configuration");
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Fetch(args) => {
            let mut config = config;
            config.merge_cli_args(&args);

            let overrides = ResolveOverrides {
                transport: args.transport,
                dist: args.dist.clone(),
                checkout: args.checkout.clone(),
                custom: args.custom.then_some(true),
            };

            let fetcher = Fetcher::new(config);
            let path = fetcher.fetch(&args.reference, &overrides).await?;
            println!("{}", path.display());

            Ok(ExitCode::from(0))
        }

        Commands::Resolve(args) => {
            let overrides = ResolveOverrides {
                transport: args.transport.or(Some(config.fetch.transport)),
                dist: args.dist.clone(),
                checkout: args.checkout.clone(),
                custom: args.custom.then_some(true),
            };

            let options = repofetch::resolve(&args.reference, &overrides)?;

            match args.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&options)?);
                }
                OutputFormat::Text => {
                    println!("repo:     {}", options.repo);
                    println!("checkout: {}", options.checkout);
                    println!("type:     {}", options.transport);
                    println!("dist:     {}", options.dist.display());
                    println!("custom:   {}", options.custom);
                }
            }

            Ok(ExitCode::from(0))
        }

        Commands::Init => {
            // Generate example configuration file
            let example_config = Config::example_yaml();
            let config_path = std::path::Path::new("repofetch.yaml");

            if config_path.exists() {
                anyhow::bail!("Configuration file already exists: {}", config_path.display());
            }

            std::fs::write(config_path, example_config)?;
            println!("Created example configuration: repofetch.yaml");
            Ok(ExitCode::from(0))
        }

        Commands::Validate(args) => {
            // Validate configuration file
            let config_content = std::fs::read_to_string(&args.config)?;
            match Config::from_yaml(&config_content) {
                Ok(_) => {
                    println!("Configuration is valid: {}", args.config.display());
                    Ok(ExitCode::from(0))
                }
                Err(e) => {
                    eprintln!("Configuration error: {e}");
                    Ok(ExitCode::from(1))
                }
            }
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    // Check for explicit config file
    if let Some(ref config_path) = cli.config {
        tracing::debug!(path = %config_path.display(), "Loading configuration from explicit path");
        let content = std::fs::read_to_string(config_path)?;
        return Ok(Config::from_yaml(&content)?);
    }

    // Look for default config files
    let default_paths = ["repofetch.yaml", "repofetch.yml", ".repofetch.yaml"];
    for path in &default_paths {
        if std::path::Path::new(path).exists() {
            tracing::debug!(path = %path, "Found configuration file");
            let content = std::fs::read_to_string(path)?;
            return Ok(Config::from_yaml(&content)?);
        }
    }

    tracing::debug!("No configuration file found, using default configuration");
    Ok(Config::default())
}
