use std::io;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,sea_orm=warn,sqlx=warn";

/// Output format of the tracing subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    /// Parse a config value; anything other than `json` falls back to compact.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("json") { Self::Json } else { Self::Compact }
    }
}

/// Initialize tracing with the given format.
pub fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => init_logging_default(),
        LogFormat::Json => init_logging_json(),
    }
    tracing::debug!(?format, "logging initialised");
}

/// Initialize a compact human-readable subscriber on stdout.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info` with database chatter reduced to `warn`
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize a JSON subscriber on stdout for container log collection.
/// Respects `RUST_LOG`; `service=debug` is a useful override while tracing
/// record merges.
pub fn init_logging_json() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::LogFormat;

    #[test]
    fn parse_is_case_insensitive_and_defaults_to_compact() {
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" json "), LogFormat::Json);
        assert_eq!(LogFormat::parse("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::parse(""), LogFormat::Compact);
    }
}
