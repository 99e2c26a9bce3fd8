use crate::analysis;
use crate::cli::commands::AnalyzeArgs;
use crate::config::Config;
use crate::db::Database;
use crate::errors::RepolensError;
use crate::github::GithubClient;

/// One-shot analysis from the command line; prints the summary as JSON.
pub async fn handle_analyze(args: AnalyzeArgs) -> Result<(), RepolensError> {
    let config = Config::from_env()?;
    let db = Database::new(&args.db)?;
    let github = GithubClient::new(&config)?;

    let summary = analysis::analyze(&db, &github, &args.url, args.token.as_deref()).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
