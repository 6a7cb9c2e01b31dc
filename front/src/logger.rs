//! A logger that appends records to a file.
//!
//! The terminal frontend owns stdout and stderr while it runs, so log
//! output has to go elsewhere.

use std::{
    env,
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
    sync::Mutex,
    time::{SystemTime, UNIX_EPOCH},
};

use log::{LevelFilter, Log, Metadata, Record};

/// A [`Log`] implementation writing one line per record to a file.
#[derive(Debug)]
pub struct FileLogger {
    file: Mutex<File>,
    level: LevelFilter,
}

impl FileLogger {
    /// Opens `path` for appending, creating it if it does not exist.
    pub fn new(path: impl AsRef<Path>, level: LevelFilter) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file: Mutex::new(file), level })
    }
}

impl Log for FileLogger {
    fn enabled(&self, meta: &Metadata) -> bool {
        meta.level() <= self.level
    }

    fn log(&self, rec: &Record) {
        if !self.enabled(rec.metadata()) {
            return;
        }
        let t = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        if let Ok(mut f) = self.file.lock() {
            // Nowhere to report a failed write
            let _ = writeln!(
                f,
                "{}.{:03} {:5} {}: {}",
                t.as_secs(),
                t.subsec_millis(),
                rec.level(),
                rec.target(),
                rec.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut f) = self.file.lock() {
            let _ = f.flush();
        }
    }
}

/// Installs a [`FileLogger`] writing to `path` as the global logger.
///
/// # Errors
/// If the file cannot be opened, or if a global logger is already set.
pub fn init(path: impl AsRef<Path>, level: LevelFilter) -> anyhow::Result<()> {
    let logger = FileLogger::new(path, level)?;
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(())
}

/// Installs a [`FileLogger`] if the `GLYPHCAST_LOG` environment variable
/// names a file to log to.
///
/// The level is read from `GLYPHCAST_LOG_LEVEL`, defaulting to `info`.
/// Returns whether a logger was installed.
///
/// # Errors
/// If the level is not a valid level name, or if [`init`] fails.
pub fn init_from_env() -> anyhow::Result<bool> {
    let Some(path) = env::var_os(LOG_VAR) else {
        return Ok(false);
    };
    let level = match env::var(LEVEL_VAR) {
        Ok(s) => s
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid {LEVEL_VAR}: {s:?}"))?,
        Err(_) => LevelFilter::Info,
    };
    init(&path, level)?;
    log::info!("logging to {} at level {level}", Path::new(&path).display());
    Ok(true)
}

const LOG_VAR: &str = "GLYPHCAST_LOG";
const LEVEL_VAR: &str = "GLYPHCAST_LOG_LEVEL";
