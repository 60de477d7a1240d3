//! # Logging
//!
//! Thin helpers over `tracing-subscriber` so every binary in the toolkit
//! initializes logging the same way: compact timestamps, visible targets,
//! and `RUST_LOG`-style filtering.
//!
//! ```bash
//! RUST_LOG=debug bedrock watch .
//! RUST_LOG=bedrock_dir_watcher=trace bedrock watch .
//! ```

use std::sync::Once;

use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: Once = Once::new();

/// Filter applied when neither the caller nor `RUST_LOG` says otherwise.
/// The watch primitive is chatty at info level, so it is kept at warn.
const DEFAULT_FILTER: &str = "info,notify=warn";

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Install the global subscriber with the default filter.
///
/// Call once at startup; repeated calls are no-ops. The `RUST_LOG`
/// environment variable takes precedence over the default.
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Install the global subscriber with explicit filter directives.
///
/// `RUST_LOG` still takes precedence when set, so operators can raise
/// verbosity without touching the program's own configuration.
pub fn init_with_filter(directives: &str) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(directives)
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_timer(CompactTime)
            .with_level(true)
            .with_filter(filter);

        tracing_subscriber::registry().with(fmt_layer).init();
    });
}
