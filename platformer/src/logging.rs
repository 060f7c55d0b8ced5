//! Logger setup for the game binary.

use std::sync::Once;

/// Filter applied when neither the config nor `RUST_LOG` sets one.
pub const DEFAULT_FILTER: &str = "info,wgpu=warn,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "debug" or
/// "platformer=debug,wgpu=warn").
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

/// Pick the filter string: explicit config, then `RUST_LOG`, then [`DEFAULT_FILTER`].
fn resolve_filter(config: Option<&str>, env: Option<&str>) -> String {
    let non_blank = |filter: &&str| !filter.trim().is_empty();
    config
        .filter(non_blank)
        .or(env.filter(non_blank))
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Initializes the global logger once. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let env = std::env::var("RUST_LOG").ok();
        let filter = resolve_filter(config.env_filter.as_deref(), env.as_deref());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized with filter '{}'", filter);
    });
}
