use tracing_subscriber::{EnvFilter, fmt};

use crate::infrastructure::config::LogFormat;

const DEFAULT_FILTER: &str = "info,user_server=debug";

/// Installs the global subscriber; `RUST_LOG` overrides the default filter.
pub fn init_logging(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    let result = match format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.pretty().finish()),
    };

    if result.is_err() {
        eprintln!("global tracing subscriber already installed");
    }
}
