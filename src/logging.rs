// Logging setup
//
// `RUST_LOG` wins over the configured level.

use env_logger::Env;

/// Initialise the global logger; repeated calls are ignored
pub fn init_logging(level: &str) {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .try_init();
}
