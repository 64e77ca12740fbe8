//! File sink: one truncated file, one writer thread, one FIFO queue.
//!
//! Lines are rendered on the logging thread and pushed onto an unbounded channel; the
//! writer thread owns the handle and drains the channel in order. Callers never wait on
//! disk I/O, and lines from concurrent callers land whole, in submission order.
//!
//! Dropping the sink closes the channel without waiting: the writer finishes the queue
//! and exits on its own. [`Destination::flush`] is the durability point.

use super::{Destination, LogRecord, SinkCore};
use crate::fmt::LineFormat;
use crate::internal;
use crate::level::Level;
use crossbeam_channel::{Receiver, Sender};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

enum Command {
    Write(String),
    /// Flush everything queued before this marker, then acknowledge.
    Flush(Sender<io::Result<()>>),
}

/// Appends rendered lines to a file through a private background writer.
#[derive(Debug)]
pub struct FileSink {
    core: Arc<SinkCore>,
    path: PathBuf,
    sender: Sender<Command>,
}

impl FileSink {
    /// Opens `target` (plain path, `~/...`, or `file://` URL), truncating it, and starts the
    /// writer thread. Missing parent directories are created.
    ///
    /// Threshold starts at `Debug`; colors start disabled.
    ///
    /// # Errors
    /// Returns an error if the target is not a local path, or the file cannot be created.
    pub fn open(identifier: impl Into<String>, target: &str) -> Result<Self, crate::Error> {
        let identifier = identifier.into();
        let path = resolve_target(target)?;

        let file = match create_truncated(&path) {
            Ok(file) => file,
            Err(e) => {
                internal::error(
                    "FILE",
                    &format!("{identifier}: cannot open {}: {e}", path.display()),
                );
                return Err(e.into());
            }
        };

        let format = LineFormat {
            colors_enabled: false,
            ..LineFormat::default()
        };
        let core = Arc::new(SinkCore::new(identifier, Level::Debug, format));
        let (sender, receiver) = crossbeam_channel::unbounded();

        let worker_core = Arc::clone(&core);
        let worker_path = path.clone();
        thread::Builder::new()
            .name(format!("fanlog-file:{}", core.identifier()))
            .spawn(move || run_writer(file, &receiver, &worker_core, &worker_path))?;

        internal::debug(
            "FILE",
            &format!("{}: writing to {}", core.identifier(), path.display()),
        );

        Ok(Self { core, path, sender })
    }

    #[must_use]
    pub fn level(self, level: Level) -> Self {
        self.core.set_level(level);
        self
    }

    #[must_use]
    pub fn line_format(self, format: LineFormat) -> Self {
        self.core.configure(|current| *current = format);
        self
    }

    #[must_use]
    pub fn colors(self, enabled: bool) -> Self {
        self.core.set_colors_enabled(enabled);
        self
    }

    /// Resolved location of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runtime access to threshold, layout and failure count.
    #[must_use]
    pub fn core(&self) -> &SinkCore {
        &self.core
    }

    /// Lines that were lost to write errors or a closed queue.
    #[must_use]
    pub fn write_failures(&self) -> u64 {
        self.core.write_failures()
    }

    fn closed(&self) -> crate::Error {
        crate::Error::QueueClosed(self.core.identifier().to_string())
    }
}

impl Destination for FileSink {
    fn identifier(&self) -> &str {
        self.core.identifier()
    }

    fn level(&self) -> Level {
        self.core.level()
    }

    fn set_level(&self, level: Level) {
        self.core.set_level(level);
    }

    fn process(&self, record: &LogRecord) {
        let mut line = self.core.render(record);
        line.push('\n');

        if self.sender.send(Command::Write(line)).is_err() {
            let count = self.core.record_failure();
            internal::error(
                "FILE",
                &format!(
                    "{}: writer gone, dropped line ({count} failures)",
                    self.core.identifier()
                ),
            );
        }
    }

    fn flush(&self) -> Result<(), crate::Error> {
        let (ack, done) = crossbeam_channel::bounded(1);
        self.sender
            .send(Command::Flush(ack))
            .map_err(|_| self.closed())?;
        done.recv().map_err(|_| self.closed())??;
        Ok(())
    }
}

fn run_writer(file: File, commands: &Receiver<Command>, core: &SinkCore, path: &Path) {
    let mut writer = BufWriter::new(file);

    for command in commands {
        match command {
            Command::Write(line) => {
                if let Err(e) = writer.write_all(line.as_bytes()) {
                    report_failure(core, path, &e);
                }
                // Keep the file current whenever the queue runs dry.
                if commands.is_empty()
                    && let Err(e) = writer.flush()
                {
                    report_failure(core, path, &e);
                }
            }
            Command::Flush(ack) => {
                let result = writer.flush();
                if let Err(e) = &result {
                    report_failure(core, path, e);
                }
                let _ = ack.send(result);
            }
        }
    }

    if let Err(e) = writer.flush() {
        report_failure(core, path, &e);
    }
}

fn report_failure(core: &SinkCore, path: &Path, e: &io::Error) {
    let count = core.record_failure();
    internal::error(
        "FILE",
        &format!(
            "{}: write to {} failed ({count} failures): {e}",
            core.identifier(),
            path.display()
        ),
    );
}

fn create_truncated(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }

    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}

/// Accepts plain paths, `~`-prefixed paths and `file://` URLs.
fn resolve_target(target: &str) -> Result<PathBuf, crate::Error> {
    let target = target.trim();

    let local = if let Some(rest) = target.strip_prefix("file://") {
        rest.strip_prefix("localhost").unwrap_or(rest)
    } else if target.contains("://") {
        return Err(crate::Error::InvalidPath(format!(
            "{target} is not a local file"
        )));
    } else {
        target
    };

    if local.is_empty() {
        return Err(crate::Error::InvalidPath("empty file target".to_string()));
    }

    Ok(PathBuf::from(shellexpand::tilde(local).as_ref()))
}
