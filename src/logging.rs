//! Tracing setup for the `bracecheck` binary.
//!
//! Filtering follows `BRACECHECK_LOG`, falling back to `RUST_LOG`, with
//! the usual `EnvFilter` syntax:
//!
//! ```bash
//! BRACECHECK_LOG=debug bracecheck app.js
//! BRACECHECK_LOG=bracecheck::scanner=trace BRACECHECK_LOG_FORMAT=json bracecheck app.js
//! ```
//!
//! Nothing is installed when neither variable is set.

use tracing_subscriber::EnvFilter;

const LOG_VAR: &str = "BRACECHECK_LOG";
const FORMAT_VAR: &str = "BRACECHECK_LOG_FORMAT";

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Anything other than `json` (case-insensitive) is plain text.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(FORMAT_VAR).unwrap_or_default())
    }
}

fn build_filter() -> EnvFilter {
    std::env::var(LOG_VAR).map_or_else(
        |_| EnvFilter::from_default_env(),
        |val| EnvFilter::builder().parse_lossy(val),
    )
}

/// Install the global subscriber, writing to stderr.
///
/// Stdout is reserved for diagnostic lines. Call once, at startup.
pub fn init_tracing() {
    if std::env::var_os(LOG_VAR).is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr);

    match LogFormat::from_env() {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
