use std::path::Path;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber. Human-readable events go to stderr,
/// filtered by `RUST_LOG` (default `warn`). With the `trace` feature and a
/// log directory, JSON lines go to `<dir>/taigi-trace.jsonl` instead.
pub fn init_tracing(log_dir: Option<&Path>) {
    INIT.call_once(|| match log_dir {
        Some(dir) if cfg!(feature = "trace") => init_json(dir),
        Some(_) => {
            init_stderr();
            tracing::warn!("--log-dir needs the `trace` feature; logging to stderr");
        }
        None => init_stderr(),
    });
}

fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(env_filter("warn"))
        .try_init();
}

#[cfg(feature = "trace")]
fn init_json(log_dir: &Path) {
    // Written synchronously: the process exits right after converting.
    let file_appender = tracing_appender::rolling::never(log_dir, "taigi-trace.jsonl");
    let _ = tracing_subscriber::fmt()
        .json()
        .with_writer(file_appender)
        .with_target(true)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .with_env_filter(env_filter("taigi_core=debug,taigi_cli=debug"))
        .try_init();
}

#[cfg(not(feature = "trace"))]
fn init_json(_log_dir: &Path) {
    init_stderr();
}
