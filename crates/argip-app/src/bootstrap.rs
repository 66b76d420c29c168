//! Boot sequence: settings, logging, database, API listener.

use std::sync::Arc;

use argip_api::{ApiServer, ApiState};
use argip_config::{AppSettings, LogFormatPreference};
use argip_data::PgStore;
use argip_telemetry::{GlobalContextGuard, LogFormat, LoggingConfig, Metrics};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

const BUILD_SHA: &str = match option_env!("ARGIP_BUILD_SHA") {
    Some(sha) => sha,
    None => "dev",
};

/// Dependencies required to bootstrap the Argip server.
pub(crate) struct BootstrapDependencies {
    settings: AppSettings,
}

impl BootstrapDependencies {
    /// Construct production dependencies from the environment for the binary entrypoint.
    pub(crate) fn from_env() -> AppResult<Self> {
        Ok(Self {
            settings: AppSettings::from_env()?,
        })
    }
}

/// Entry point for the Argip boot sequence.
///
/// # Errors
///
/// Returns an error if settings, logging, the database, or the listener fail.
pub async fn run_app() -> AppResult<()> {
    let dependencies = BootstrapDependencies::from_env()?;
    run_app_with(dependencies).await
}

/// Boot sequence that relies entirely on injected dependencies.
pub(crate) async fn run_app_with(dependencies: BootstrapDependencies) -> AppResult<()> {
    let BootstrapDependencies { settings } = dependencies;

    let logging = LoggingConfig {
        level: &settings.log_level,
        format: log_format(settings.log_format),
        build_sha: BUILD_SHA,
    };
    argip_telemetry::init_logging(&logging)
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;
    let _context = GlobalContextGuard::new("argip-app");

    info!("Argip bootstrap starting");

    let pool = PgPoolOptions::new()
        .max_connections(settings.db_max_connections)
        .connect(&settings.database_url)
        .await
        .map_err(|err| AppError::database("pool.connect", err))?;
    let store = PgStore::new(pool)
        .await
        .map_err(|err| AppError::data("store.new", err))?;

    let telemetry =
        Metrics::new().map_err(|err| AppError::telemetry("telemetry.metrics", err))?;
    let state = ApiState::new(
        Arc::new(store.clone()),
        Arc::new(store),
        telemetry,
        settings.token_ttl,
    );
    let api = ApiServer::new(state, &settings.cors_origins)
        .map_err(|err| AppError::api_server("api.new", err))?;

    info!(addr = %settings.bind_addr, "Launching API listener");
    api.serve(settings.bind_addr, shutdown_signal())
        .await
        .map_err(|err| AppError::api_server("api.serve", err))?;

    info!("Argip shut down cleanly");
    Ok(())
}

const fn log_format(preference: Option<LogFormatPreference>) -> LogFormat {
    match preference {
        Some(LogFormatPreference::Json) => LogFormat::Json,
        Some(LogFormatPreference::Pretty) => LogFormat::Pretty,
        None => LogFormat::infer(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_log_format_wins_over_inference() {
        assert_eq!(log_format(Some(LogFormatPreference::Json)), LogFormat::Json);
        assert_eq!(
            log_format(Some(LogFormatPreference::Pretty)),
            LogFormat::Pretty
        );
        assert_eq!(log_format(None), LogFormat::infer());
    }
}
