//! hapticd - The vibration background service
//!
//! This is the main entry point for the hapticd service.
//! It wires together all the components:
//! - Configuration loading
//! - Device backend
//! - Effect gate and session manager
//! - Lifecycle event logging
//! - Signal-driven shutdown

use anyhow::{Context, Result};
use clap::Parser;
use haptic_config::{ServiceConfig, load_config};
use haptic_core::{AllowAll, VibrationEvent, VibrationManager};
use haptic_device::{MockVibrator, VibratorDevice};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal::unix::{SignalKind, signal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// hapticd - Vibration arbitration service
#[derive(Parser, Debug)]
#[command(name = "hapticd")]
#[command(about = "Vibration arbitration service", long_about = None)]
struct Args {
    /// Configuration file path; defaults apply when omitted
    #[arg(short, long, env = "HAPTICD_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Main service state
struct Service {
    manager: Arc<VibrationManager>,
}

impl Service {
    fn new(args: &Args) -> Result<Self> {
        let config = match &args.config {
            Some(path) => load_config(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            None => {
                info!("No config file given, using built-in defaults");
                ServiceConfig::default()
            }
        };

        let device = build_device(&config);
        info!(
            hd_haptic = device.capabilities().supports_hd_haptic,
            preset_mapping = device.capabilities().supports_preset_mapping,
            preset_count = config.device.presets.len(),
            "Device backend initialized"
        );

        let manager = Arc::new(VibrationManager::new(
            device,
            Arc::new(AllowAll),
            config.limits,
        ));

        Ok(Self { manager })
    }

    async fn run(self) -> Result<()> {
        // Log session lifecycle events as they happen
        let mut events = self.manager.subscribe();
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                match event {
                    VibrationEvent::Started {
                        session_id,
                        usage,
                        class,
                    } => {
                        info!(session_id = %session_id, ?usage, ?class, "Session started");
                    }
                    VibrationEvent::Ended { session_id, reason } => {
                        info!(session_id = %session_id, ?reason, "Session ended");
                    }
                }
            }
        });

        let mut sigterm =
            signal(SignalKind::terminate()).context("Failed to create SIGTERM handler")?;
        let mut sigint =
            signal(SignalKind::interrupt()).context("Failed to create SIGINT handler")?;

        info!("Service running");

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully");
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down gracefully");
            }
        }

        // Graceful shutdown: halt whatever is still playing
        if self.manager.is_active().await {
            info!("Stopping active vibration");
            if let Err(e) = self.manager.stop().await {
                warn!(error = %e, "Failed to stop active vibration");
            }
        }

        info!("Shutdown complete");
        Ok(())
    }
}

/// Build the device backend from the validated config.
///
/// Only the mock backend exists today; a HAL-backed device slots in behind
/// the same trait.
fn build_device(config: &ServiceConfig) -> Arc<dyn VibratorDevice> {
    Arc::new(
        MockVibrator::new()
            .with_capabilities(config.device.capabilities.clone())
            .with_supported_effects(config.device.presets.iter().cloned()),
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "hapticd starting");

    let service = Service::new(&args)?;
    service.run().await
}
