//! Diagnostic logging on stderr. User-facing output stays on stdout.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. A second call keeps the first subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `verbosity` picks the level.
pub fn init(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
