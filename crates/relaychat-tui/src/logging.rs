//! Log setup.
//!
//! The terminal owns stdout, so logs go to a file. Without a log file no
//! subscriber is installed and events are discarded.

use std::{fs::File, io, path::Path, sync::Mutex};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a file-backed subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn init(path: &Path, level: &str) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let layer = fmt::layer().with_writer(Mutex::new(file)).with_ansi(false);

    // A subscriber may already be installed when embedded; keep that one.
    if tracing_subscriber::registry().with(layer).with(filter).try_init().is_err() {
        tracing::debug!("global subscriber already set");
    }

    Ok(())
}
