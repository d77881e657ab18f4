//! Subscriber setup for the `trace` feature.
//!
//! The library only emits `tracing` events; binaries pick where they go.
//! Both installers read `RUST_LOG` and fall back to `pinyin_transform=debug`.
//! Without the feature they are no-ops returning `false`.

use std::path::Path;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "pinyin_transform=debug";

/// Name of the JSON-lines file written by [`init_tracing`].
pub const TRACE_FILE_NAME: &str = "pinyin-trace.jsonl";

#[cfg(feature = "trace")]
fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER))
}

/// Send events as JSON lines to `log_dir/pinyin-trace.jsonl`.
///
/// Returns whether a subscriber was installed; a second call, or a call
/// after [`init_stderr_tracing`], leaves the existing one in place.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> bool {
    let file_appender = tracing_appender::rolling::never(log_dir, TRACE_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let installed = tracing_subscriber::fmt()
        .json()
        .with_writer(non_blocking)
        .with_target(true)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .with_env_filter(env_filter())
        .try_init()
        .is_ok();
    if installed {
        std::mem::forget(guard); // flushes for the rest of the process
    }
    installed
}

/// Send human-readable events to stderr.
#[cfg(feature = "trace")]
pub fn init_stderr_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter())
        .try_init()
        .is_ok()
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &Path) -> bool {
    false
}

#[cfg(not(feature = "trace"))]
pub fn init_stderr_tracing() -> bool {
    false
}
