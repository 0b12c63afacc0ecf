//! Server initialization and startup logic for tabrelay.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tabrelay_api::{AppState, InterfaceConfig, InterfaceServer};
use tabrelay_config::{Config, ConfigError, ConfigLoader, ConfigValidator, LoggingConfig};

/// Initialize tracing with console and optional file output.
///
/// `RUST_LOG` takes precedence over the configured level. Log files rotate
/// daily under `logging.directory`.
pub(crate) fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&logging.level))?;

    let file_layer = if logging.file {
        std::fs::create_dir_all(&logging.directory)?;
        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("tabrelay")
            .filename_suffix("log")
            .max_log_files(14)
            .build(&logging.directory)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Keeps the background writer alive for the program duration
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(file_layer)
        .try_init()?;

    Ok(())
}

/// Load the configuration file and apply command line overrides.
pub(crate) fn load_config(
    path: &Path,
    host: Option<String>,
    port: Option<u16>,
) -> Result<Config, ConfigError> {
    let mut config = ConfigLoader::load_or_default(path)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    Ok(config)
}

/// Validate a configuration, logging warnings and failing on the first error set.
pub(crate) fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let result = ConfigValidator::validate(config);
    for warning in &result.warnings {
        warn!("Config warning: {}", warning);
    }
    if result.is_valid() {
        return Ok(());
    }

    let errors: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
    Err(ConfigError::Invalid(errors.join("; ")))
}

/// Run the relay server in foreground until Ctrl-C.
pub(crate) async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    validate_config(&config)?;

    info!("Starting tabrelay v{}", env!("CARGO_PKG_VERSION"));
    info!(
        mode = ?config.auth.mode,
        send_timeout_ms = config.relay.send_timeout_ms,
        queue = config.relay.outbound_queue_capacity,
        max_message_bytes = config.relay.max_message_bytes,
        "Relay configured"
    );

    let state = Arc::new(AppState::from_config(&config)?);
    let server = InterfaceServer::new(InterfaceConfig::from(&config.server), state.clone());

    info!("tabrelay ready:");
    info!("  GET  /ws      - WebSocket (Bearer or ?token=)");
    info!("  POST /notify  - Broadcast to own tabs");
    info!("  GET  /health  - Health check");
    info!("  GET  /stats   - Registry statistics");

    server.run_until(shutdown_signal()).await?;

    let stats = state.registry.stats();
    info!(
        connects = stats.total_connects,
        disconnects = stats.total_disconnects,
        delivered = stats.frames_delivered,
        failures = stats.send_failures,
        "Shutting down"
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
