/*!
 * Debug Channel
 * Structured tracing to stderr, silent unless debugging is enabled
 */

use tracing::{debug, span, Level, Span};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "jobshell=debug"
    } else {
        "off"
    }
}

/// Initialize the debug channel
///
/// Environment variables:
/// - RUST_LOG: overrides the level chosen by `debug`
/// - JOBSHELL_TRACE_JSON: JSON output when set to 1/true
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(debug: bool, json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time()
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        debug!(json, "Debug channel initialized");
    }
}

/// Span covering the handling of one input line
pub fn span_command(line: &str) -> Span {
    span!(Level::DEBUG, "command", line = %line)
}
