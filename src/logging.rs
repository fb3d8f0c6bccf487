//! Logger initialization.
//!
//! The crate itself only talks to the `log` facade. Applications call
//! [`init_logging`] once early in `main`; native targets get `env_logger`,
//! wasm32 gets `console_log`.

use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "agent_ngin=debug"). When unset, `RUST_LOG` is consulted and the level
/// falls back to `info`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once. Subsequent calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut builder = env_logger::Builder::new();
            if let Some(filter) = config.env_filter {
                builder.parse_filters(&filter);
            } else if let Ok(filter) = std::env::var("RUST_LOG") {
                builder.parse_filters(&filter);
            } else {
                builder.filter_level(log::LevelFilter::Info);
            }
            builder.write_style(config.write_style);

            // Fails only if another logger was installed first (e.g. by a test harness).
            if let Err(e) = builder.try_init() {
                eprintln!("Warning: Could not initialize logger: {}", e);
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let _ = config;
            if console_log::init_with_level(log::Level::Info).is_err() {
                return;
            }
        }

        log::debug!("logging initialized");
    });
}
