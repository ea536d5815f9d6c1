//! Rolling Logger
//!
//! Console + file logging built on `tracing-subscriber`.
//!
//! Log files are named `<app>.<YYYY-MM-DD>.log` and roll over when the local
//! date changes. Only the newest `max_files` files are kept, so the log
//! directory works as a circular buffer of recent days.
//!
//! Records emitted through the `log` facade are forwarded into tracing by the
//! subscriber's `tracing-log` bridge.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Number of daily files kept when no option is given
pub const DEFAULT_MAX_FILES: usize = 7;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Failed to prepare log file in {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Logger already initialized: {0}")]
    Init(String),
}

/// Options for the file half of the logger
#[derive(Debug, Clone)]
pub struct LoggerOptions {
    /// How many daily files to keep (at least one)
    pub max_files: usize,
    /// Filter used when `RUST_LOG` is not set
    pub default_filter: String,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            default_filter: "info".to_string(),
        }
    }
}

struct RollingState {
    dir: PathBuf,
    prefix: String,
    max_files: usize,
    date: NaiveDate,
    file: File,
}

impl RollingState {
    fn path_for(&self, date: NaiveDate) -> PathBuf {
        file_path(&self.dir, &self.prefix, date)
    }

    /// Switch to the file for `date` and drop files that fell out of the window
    fn roll(&mut self, date: NaiveDate) -> io::Result<()> {
        self.file = open_append(&self.path_for(date))?;
        self.date = date;
        prune(&self.dir, &self.prefix, self.max_files)
    }
}

/// Cloneable writer handed to the `fmt` layer
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<RollingState>>,
}

impl RollingWriter {
    pub fn new(dir: impl AsRef<Path>, prefix: &str, max_files: usize) -> Result<Self, LoggerError> {
        let dir = dir.as_ref().to_path_buf();
        let io_err = |source| LoggerError::Io {
            path: dir.clone(),
            source,
        };

        fs::create_dir_all(&dir).map_err(io_err)?;

        let date = Local::now().date_naive();
        let file = open_append(&file_path(&dir, prefix, date)).map_err(io_err)?;
        let max_files = max_files.max(1);
        prune(&dir, prefix, max_files).map_err(io_err)?;

        Ok(Self {
            inner: Arc::new(Mutex::new(RollingState {
                dir: dir.clone(),
                prefix: prefix.to_string(),
                max_files,
                date,
                file,
            })),
        })
    }

    /// Path of the file currently written to
    pub fn current_path(&self) -> Option<PathBuf> {
        let state = self.inner.lock().ok()?;
        Some(state.path_for(state.date))
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer lock poisoned"))?;

        let today = Local::now().date_naive();
        if today != state.date {
            state.roll(today)?;
        }
        state.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer lock poisoned"))?;
        state.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Install the global subscriber with default options
pub fn init_logger(
    log_dir: impl AsRef<Path>,
    app_name: &str,
) -> Result<RollingWriter, LoggerError> {
    init_logger_with(log_dir, app_name, LoggerOptions::default())
}

/// Install the global subscriber: env filter, console layer and rolling file layer
pub fn init_logger_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    options: LoggerOptions,
) -> Result<RollingWriter, LoggerError> {
    let writer = RollingWriter::new(log_dir, app_name, options.max_files)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&options.default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(writer.clone()))
        .try_init()
        .map_err(|e| LoggerError::Init(e.to_string()))?;

    if let Some(path) = writer.current_path() {
        tracing::info!("Logging to {}", path.display());
    }

    Ok(writer)
}

fn file_path(dir: &Path, prefix: &str, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}.{}.log", prefix, date.format("%Y-%m-%d")))
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Remove the oldest `<prefix>.*.log` files so at most `max_files` remain
fn prune(dir: &Path, prefix: &str, max_files: usize) -> io::Result<()> {
    let head = format!("{}.", prefix);

    let mut logs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.starts_with(&head) && name.ends_with(".log"))
                .unwrap_or(false)
        })
        .collect();

    if logs.len() <= max_files {
        return Ok(());
    }

    // ISO dates sort chronologically
    logs.sort();
    let excess = logs.len() - max_files;
    for path in logs.into_iter().take(excess) {
        fs::remove_file(path)?;
    }
    Ok(())
}
