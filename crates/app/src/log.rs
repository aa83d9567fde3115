//! Logging setup for the probe.
//!
//! Logs go to stderr so stdout only carries the probe's report.
//!
//! ## Environment Variables
//!
//! 1. **`CONTENT_LOG`** (highest priority)
//! 2. **`RUST_LOG`**
//! 3. **Default** - `warn`

use tracing_subscriber::EnvFilter;

pub fn init() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(create_filter())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}

/// `CONTENT_LOG=debug` is shorthand for `warn,content_core=debug,content_probe=debug`.
/// Anything with directive syntax in it is used as-is.
fn create_filter() -> EnvFilter {
    if let Ok(content_log) = std::env::var("CONTENT_LOG") {
        return expand_content_log(&content_log);
    }

    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }

    EnvFilter::new("warn")
}

fn expand_content_log(content_log: &str) -> EnvFilter {
    EnvFilter::new(filter_directives(content_log))
}

fn filter_directives(content_log: &str) -> String {
    if content_log.contains('=') || content_log.contains(':') || content_log.contains(',') {
        return content_log.to_owned();
    }

    format!("warn,content_core={content_log},content_probe={content_log}")
}
