//! # Structured Logging Module
//!
//! Environment-aware structured logging built on `tracing-subscriber`.
//! The dispatch core only emits events; installing a subscriber is left to
//! the embedding application, which may call [`init_structured_logging`] or
//! [`init_with_config`] once at startup.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{LogFormat, LoggingConfig};
use crate::config::loader::ConfigManager;
use crate::constants::{DispatchStage, MessageKind};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging from the global configuration
pub fn init_structured_logging() {
    let manager = ConfigManager::global();
    init_with_config(&manager.config().logging, manager.environment());
}

/// Initialize structured logging from an explicit logging configuration.
///
/// Only the first call has an effect. A filter in `RUST_LOG` takes
/// precedence over the configured level.
pub fn init_with_config(config: &LoggingConfig, environment: &str) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let level = config.effective_level(environment);
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

        let layer = match config.format {
            LogFormat::Pretty => fmt::layer()
                .with_target(config.with_target)
                .with_thread_ids(config.with_thread_ids)
                .with_level(true)
                .with_ansi(true)
                .with_filter(filter)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .with_target(config.with_target)
                .with_thread_ids(config.with_thread_ids)
                .with_level(true)
                .with_ansi(false)
                .json()
                .with_filter(filter)
                .boxed(),
        };

        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            environment = %environment,
            level = %level,
            format = ?config.format,
            "Structured logging initialized"
        );
    });
}

/// Log structured data for a dispatch operation
pub fn log_dispatch_operation(
    kind: MessageKind,
    message_type: &str,
    handler: Option<&str>,
    stage: DispatchStage,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        kind = kind.as_str(),
        message_type = %message_type,
        handler = handler,
        stage = %stage,
        status = %status,
        details = details,
        "DISPATCH_OPERATION"
    );
}
