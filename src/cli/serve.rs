use tracing::info;

use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config::Config;
use crate::errors::RepolensError;

pub async fn handle_serve(args: ServeArgs) -> Result<(), RepolensError> {
    info!(host = %args.host, port = args.port, "Starting API server");

    let config = Config::from_env()?;
    let state = api::create_app_state(&args.db, &config)?;
    let app = api::build_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| RepolensError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
