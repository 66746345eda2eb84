//! OTG Relay entry point.
//!
//! Turns this computer into a USB keyboard and mouse for an attached device.
//! Input typed into the relay window is forwarded as HID reports; the mouse
//! is forwarded only while captured (press and release a capture key alone,
//! or click into the window).
//!
//! # Usage
//!
//! ```text
//! otg-relay [OPTIONS]
//!
//! Options:
//!   -s, --serial <SERIAL>        USB serial of the device [env: OTG_SERIAL]
//!       --device-node <PATH>     Device node watched for unplug
//!       --window-title <TITLE>   Relay window title
//!       --always-on-top          Keep the relay window above others
//!       --window-borderless      Hide window decorations
//!       --window-x <X>           Initial window position
//!       --window-y <Y>
//!       --config <PATH>          Config file (default: platform config dir)
//!       --write-config           Save the effective configuration and exit
//! ```
//!
//! # Exit status
//!
//! | Code | Meaning                          |
//! |------|----------------------------------|
//! | 0    | the user quit                    |
//! | 1    | initialization failed            |
//! | 2    | the device was disconnected      |
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load config, apply CLI overrides, init tracing
//!  └─ Ctrl-C task            -- posts Quit into the event stream
//!  └─ spawn_blocking(run)    -- consumer thread
//!       ├─ DryRunTransport   (monitor thread → DisconnectBridge)
//!       ├─ HidKeyboard / HidMouse
//!       └─ HeadlessSurface   (script reader thread → event stream)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use otg_core::HostEvent;
use otg_relay::application::run_session::{run, SessionParams};
use otg_relay::infrastructure::backend::DryRunBackend;
use otg_relay::infrastructure::event_stream::channel;
use otg_relay::infrastructure::storage::config::{
    config_file_path, load_config, load_from, save_to, AppConfig,
};
use otg_relay::infrastructure::surface::WindowParams;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// USB keyboard and mouse relay for an attached device.
///
/// Command-line values override the configuration file.
#[derive(Debug, Parser)]
#[command(
    name = "otg-relay",
    about = "Relay this computer's keyboard and mouse to a USB device",
    version
)]
struct Cli {
    /// USB serial number of the device to relay to.
    #[arg(short, long, env = "OTG_SERIAL")]
    serial: Option<String>,

    /// Device node to watch; the session ends when it disappears.
    #[arg(long)]
    device_node: Option<PathBuf>,

    /// Title of the relay window.
    #[arg(long)]
    window_title: Option<String>,

    /// Keep the relay window above other windows.
    #[arg(long)]
    always_on_top: bool,

    /// Create the relay window without decorations.
    #[arg(long)]
    window_borderless: bool,

    /// Initial horizontal position of the relay window.
    #[arg(long, allow_hyphen_values = true)]
    window_x: Option<i16>,

    /// Initial vertical position of the relay window.
    #[arg(long, allow_hyphen_values = true)]
    window_y: Option<i16>,

    /// Configuration file to read instead of the platform default.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    /// Overlays the command-line values on `config`.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(serial) = &self.serial {
            config.device.serial = Some(serial.clone());
        }
        if let Some(node) = &self.device_node {
            config.device.device_node = Some(node.clone());
        }
        if let Some(title) = &self.window_title {
            config.window.title = title.clone();
        }
        config.window.always_on_top |= self.always_on_top;
        config.window.borderless |= self.window_borderless;
        if self.window_x.is_some() {
            config.window.x = self.window_x;
        }
        if self.window_y.is_some() {
            config.window.y = self.window_y;
        }
    }

    fn config_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => config_file_path().context("no --config given"),
        }
    }

    /// Loads the configuration file and overlays the command line on it.
    fn effective_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => load_from(path),
            None => load_config(),
        }
        .context("failed to load configuration")?;
        self.apply(&mut config);
        Ok(config)
    }

    /// Saves `config` where it was loaded from.  Returns the path written.
    fn save_config(&self, config: &AppConfig) -> anyhow::Result<PathBuf> {
        let path = self.config_path()?;
        save_to(config, &path).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = cli.effective_config()?;

    // `RUST_LOG` wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log.level))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if cli.write_config {
        let path = cli.save_config(&config)?;
        info!("configuration written to {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let serial = config
        .device
        .serial
        .clone()
        .context("no device serial: pass --serial or set [device] serial")?;

    info!("OTG Relay starting");

    let params = SessionParams {
        serial,
        window: WindowParams::from(&config.window),
        capture_keys: config.capture.keys.clone(),
    };
    let backend = DryRunBackend::new(config.device.device_node.clone());
    let (poster, events) = channel();

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let quit = poster.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, quitting");
                // The session may already be over.
                let _ = quit.post(HostEvent::Quit);
            }
            Err(e) => error!("failed to listen for Ctrl-C: {e}"),
        }
    });

    // ── Session (consumer thread) ─────────────────────────────────────────────
    let reason = tokio::task::spawn_blocking(move || run(&backend, &params, poster, events))
        .await
        .context("session thread panicked")?;

    Ok(ExitCode::from(reason.code()))
}
