//! File logging for the CLI
//!
//! Everything goes to `{data_dir}/sitescore.log`. The engine crate logs at
//! `warn` unless a debug level is asked for.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file name inside the data directory
pub const LOG_FILE: &str = "sitescore.log";

/// Size limits applied to the log file before each run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLimits {
    /// Trim once the file is larger than this
    pub max_bytes: u64,
    /// Tail kept after a trim
    pub keep_bytes: u64,
}

impl Default for LogLimits {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            keep_bytes: 1024 * 1024,
        }
    }
}

impl LogLimits {
    /// Cut the log down to its last `keep_bytes`, starting at a line boundary.
    ///
    /// Returns the number of bytes dropped, or `None` when the file is missing
    /// or still within `max_bytes`.
    pub fn trim(&self, log_path: &Path) -> io::Result<Option<u64>> {
        let size = match fs::metadata(log_path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        if size <= self.max_bytes {
            return Ok(None);
        }

        let start = size.saturating_sub(self.keep_bytes);
        let mut tail = Vec::new();
        {
            let mut file = File::open(log_path)?;
            file.seek(SeekFrom::Start(start))?;
            file.read_to_end(&mut tail)?;
        }

        // a cut at offset 0 or right after a newline already starts a line
        let partial = if start == 0 {
            0
        } else {
            tail.iter().position(|&b| b == b'\n').map_or(tail.len(), |i| i + 1)
        };
        let kept = &tail[partial..];
        let dropped = size - kept.len() as u64;

        let mut file = File::create(log_path)?;
        writeln!(file, "[sitescore] dropped {dropped} bytes of older entries")?;
        file.write_all(kept)?;
        Ok(Some(dropped))
    }
}

/// `RUST_LOG` wins; otherwise the CLI logs at `level` and the engine at `warn`
/// unless `level` is `debug` or `trace`.
fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let core = match level.to_ascii_lowercase().as_str() {
            "debug" | "trace" => level,
            _ => "warn",
        };
        EnvFilter::new(format!("sitescore={level},sitescore_core={core}"))
    })
}

/// Initialize logging to `{data_dir}/sitescore.log` with the default limits.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
    fs::create_dir_all(data_dir)?;

    let log_path = data_dir.join(LOG_FILE);
    let trimmed = LogLimits::default().trim(&log_path);
    if let Err(e) = &trimmed {
        eprintln!("Warning: could not trim {}: {e}", log_path.display());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    tracing_subscriber::registry()
        .with(default_filter(level))
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    if let Ok(Some(dropped)) = trimmed {
        tracing::debug!(dropped, "trimmed log file");
    }
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_path = %log_path.display(),
        "sitescore started"
    );
    Ok(())
}
