use clap::Parser;
use tracing_subscriber::EnvFilter;

use repolens::cli;
use repolens::errors::RepolensError;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    let result = match cli.command {
        cli::Commands::Serve(args) => cli::serve::handle_serve(args).await,
        cli::Commands::Analyze(args) => cli::analyze::handle_analyze(args).await,
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                RepolensError::Config(_) => 2,
                RepolensError::Validation(_) => 3,
                RepolensError::Authentication(_) => 4,
                RepolensError::NotFound { .. } => 5,
                RepolensError::ExternalService { .. } => 6,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}
