//! Rolling Logger
//!
//! Installs a `tracing` subscriber that writes every record to
//! `<log_dir>/<app_name>.log`, rotating by size, and keeps the most recent
//! lines in a circular buffer so the UI can show them without touching disk.
//! `log` records are bridged into the same sink.

mod rotation;

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

use thiserror::Error;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;

pub use rotation::RollingFile;

/// Sizing for the log sink
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Rotate once the live file would grow past this
    pub max_file_bytes: u64,
    /// Rotated files kept next to the live one
    pub max_files: usize,
    /// Lines held in memory for [`recent_lines`]
    pub buffer_lines: usize,
    /// Also echo records to stderr
    pub mirror_stderr: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 1024 * 1024,
            max_files: 3,
            buffer_lines: 500,
            mirror_stderr: cfg!(debug_assertions),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("log file error: {0}")]
    Io(#[from] io::Error),
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

/// Fixed-capacity line buffer; oldest lines fall off the front
#[derive(Debug)]
pub struct RingBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

struct Sink {
    file: RollingFile,
    recent: RingBuffer,
    mirror_stderr: bool,
}

/// Shared handle to the sink; the `MakeWriter` given to tracing-subscriber
#[derive(Clone)]
pub struct RollingWriter {
    sink: Arc<Mutex<Sink>>,
}

impl RollingWriter {
    pub fn new(log_dir: PathBuf, app_name: &str, config: &LoggerConfig) -> Result<Self, LoggerError> {
        let file = RollingFile::open(&log_dir, app_name, config.max_file_bytes, config.max_files)?;
        Ok(Self {
            sink: Arc::new(Mutex::new(Sink {
                file,
                recent: RingBuffer::new(config.buffer_lines),
                mirror_stderr: config.mirror_stderr,
            })),
        })
    }

    pub fn recent_lines(&self) -> Vec<String> {
        match self.sink.lock() {
            Ok(sink) => sink.recent.lines(),
            Err(poisoned) => poisoned.into_inner().recent.lines(),
        }
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.sink.lock().ok().map(|sink| sink.file.current_path())
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut sink = self
            .sink
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log sink poisoned"))?;

        if sink.mirror_stderr {
            let _ = io::stderr().write_all(buf);
        }
        sink.file.write_record(buf)?;
        for line in String::from_utf8_lossy(buf).lines() {
            if !line.trim().is_empty() {
                sink.recent.push(line.to_string());
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.sink.lock() {
            Ok(mut sink) => sink.file.flush(),
            Err(_) => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Local wall-clock timestamps
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

static WRITER: OnceLock<RollingWriter> = OnceLock::new();

/// Initialize with default sizing
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with(log_dir, app_name, LoggerConfig::default())
}

pub fn init_logger_with(log_dir: PathBuf, app_name: &str, config: LoggerConfig) -> Result<(), LoggerError> {
    if WRITER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let writer = RollingWriter::new(log_dir, app_name, &config)?;
    let builder = tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_ansi(false)
        .with_timer(LocalTime)
        .with_target(true)
        .with_max_level(tracing::Level::DEBUG);

    #[cfg(target_os = "android")]
    {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Info)
                .with_tag(app_name),
        );
        tracing::subscriber::set_global_default(builder.finish())
            .map_err(|e| LoggerError::Subscriber(e.to_string()))?;
    }

    #[cfg(not(target_os = "android"))]
    builder
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;

    WRITER
        .set(writer)
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    log::debug!("{} logger ready", app_name);
    Ok(())
}

fn ensure_initialized() -> Result<(), LoggerError> {
    if WRITER.get().is_some() {
        Ok(())
    } else {
        Err(LoggerError::NotInitialized)
    }
}

pub fn debug(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::debug!(target: "app", "{}", msg);
    Ok(())
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::info!(target: "app", "{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::warn!(target: "app", "{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::error!(target: "app", "{}", msg);
    Ok(())
}

/// Most recent lines, oldest first; empty before initialization
pub fn recent_lines() -> Vec<String> {
    WRITER.get().map(RollingWriter::recent_lines).unwrap_or_default()
}

/// Path of the live log file, once initialized
pub fn log_path() -> Option<PathBuf> {
    WRITER.get().and_then(RollingWriter::log_path)
}
