use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "repolens", version, about = "GitHub repository registration and code-quality analysis service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP REST API server
    Serve(ServeArgs),
    /// Analyze one repository and print the summary as JSON
    Analyze(AnalyzeArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(long, default_value = "8000")]
    pub port: u16,

    /// Listen address
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// SQLite database path
    #[arg(long, default_value = "./data/repolens.db")]
    pub db: String,
}

#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// GitHub repository URL
    pub url: String,

    /// GitHub token (overrides GITHUB_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// SQLite database path
    #[arg(long, default_value = "./data/repolens.db")]
    pub db: String,
}
