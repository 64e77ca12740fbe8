//! Tests for the background-writer file sink.

use fanlog::{
    ConsoleSink, ConsoleStream, Destination, Dispatcher, Error, FileSink, Level, LineFormat,
};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn memory_console(level: Level) -> (Arc<ConsoleSink>, Buffer) {
    let buffer = Buffer::default();
    let sink = ConsoleSink::new("memory")
        .stream(ConsoleStream::writer(buffer.clone()))
        .level(level)
        .line_format(LineFormat::minimal());
    (Arc::new(sink), buffer)
}

/// Polls until `path` holds `expected` lines or the deadline passes.
fn wait_for_lines(path: &Path, expected: usize) -> usize {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let count = fs::read_to_string(path).map_or(0, |c| c.lines().count());
        if count >= expected || Instant::now() > deadline {
            return count;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}

fn minimal_file(dir: &TempDir, name: &str) -> (Arc<FileSink>, std::path::PathBuf) {
    let path = dir.path().join(name);
    let sink = FileSink::open("file", path.to_str().unwrap())
        .unwrap()
        .line_format(LineFormat::minimal())
        .level(Level::Verbose);
    (Arc::new(sink), path)
}

#[test]
fn lines_arrive_in_order_after_flush() {
    let dir = TempDir::new().unwrap();
    let (sink, path) = minimal_file(&dir, "ordered.log");
    let dispatcher = Dispatcher::new("app");
    dispatcher.add_destination(sink);

    dispatcher.info(|| "one");
    dispatcher.warning(|| "two");
    dispatcher.error(|| "three");
    dispatcher.flush().unwrap();

    let content = fs::read_to_string(path).unwrap();
    assert_eq!(content, "[Info] one\n[Warning] two\n[Error] three\n");
}

#[test]
fn open_truncates_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("old.log");
    fs::write(&path, "stale content\n").unwrap();

    let sink = FileSink::open("file", path.to_str().unwrap()).unwrap();
    sink.flush().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn open_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("app.log");

    let sink = FileSink::open("file", path.to_str().unwrap()).unwrap();

    assert!(path.exists());
    assert_eq!(sink.path(), path.as_path());
}

#[test]
fn file_url_target() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("url.log");
    let url = format!("file://{}", path.display());

    let sink = FileSink::open("file", &url).unwrap();

    assert_eq!(sink.path(), path.as_path());
}

#[test]
fn non_file_url_is_rejected() {
    let result = FileSink::open("file", "https://example.com/app.log");
    assert!(matches!(result, Err(Error::InvalidPath(_))));
}

#[test]
fn unopenable_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    // A directory cannot be opened as a log file.
    let result = FileSink::open("file", dir.path().to_str().unwrap());
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn concurrent_writers_produce_whole_lines() {
    let dir = TempDir::new().unwrap();
    let (sink, path) = minimal_file(&dir, "threads.log");
    let dispatcher = Arc::new(Dispatcher::new("app"));
    dispatcher.add_destination(sink);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let dispatcher = Arc::clone(&dispatcher);
            std::thread::spawn(move || {
                for i in 0..100 {
                    dispatcher.info(move || format!("thread {t} line {i}"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    dispatcher.flush().unwrap();

    let content = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 800);
    assert!(lines.iter().all(|l| l.starts_with("[Info] thread ")));

    // Per-thread order is preserved.
    for t in 0..8 {
        let prefix = format!("[Info] thread {t} line ");
        let seen: Vec<usize> = lines
            .iter()
            .filter_map(|l| l.strip_prefix(&prefix))
            .map(|n| n.parse().unwrap())
            .collect();
        assert_eq!(seen, (0..100).collect::<Vec<_>>());
    }
}

#[test]
fn file_lines_carry_no_color_escapes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plain.log");
    let dispatcher = Dispatcher::builder()
        .colors(true)
        .file(path.to_str().unwrap())
        .line_format(LineFormat::minimal())
        .done()
        .build()
        .unwrap();

    dispatcher.severe(|| "plain");
    dispatcher.flush().unwrap();

    assert_eq!(fs::read_to_string(path).unwrap(), "[Severe] plain\n");
}

#[test]
fn drop_drains_queue() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("drop.log");
    {
        let (sink, _) = minimal_file(&dir, "drop.log");
        let dispatcher = Dispatcher::new("app");
        dispatcher.add_destination(sink);
        for i in 0..20 {
            dispatcher.debug(move || format!("{i}"));
        }
    }

    // The writer finishes on its own after the sink is gone.
    assert_eq!(wait_for_lines(&path, 20), 20);
}

#[test]
fn removed_sink_drains_after_removal() {
    let dir = TempDir::new().unwrap();
    let (sink, path) = minimal_file(&dir, "removed.log");
    let dispatcher = Dispatcher::new("app");
    dispatcher.add_destination(sink);

    for i in 0..50 {
        dispatcher.info(move || format!("{i}"));
    }
    dispatcher.remove_destination("file");
    dispatcher.info(|| "after removal");

    assert_eq!(wait_for_lines(&path, 50), 50);
    assert!(!fs::read_to_string(&path).unwrap().contains("after removal"));
}

#[cfg(target_os = "linux")]
#[test]
fn removing_a_stalled_file_sink_does_not_block_logging() {
    use std::io::Read;
    use std::sync::mpsc;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stalled.fifo");
    let status = std::process::Command::new("mkfifo")
        .arg(&path)
        .status()
        .unwrap();
    assert!(status.success());

    // The reader holds the pipe open but does not read until released.
    let (release, released) = mpsc::channel::<()>();
    let reader_path = path.clone();
    let reader = std::thread::spawn(move || {
        let mut pipe = fs::File::open(reader_path).unwrap();
        released.recv().unwrap();
        let mut content = String::new();
        pipe.read_to_string(&mut content).unwrap();
        content
    });

    let file = FileSink::open("fifo", path.to_str().unwrap())
        .unwrap()
        .line_format(LineFormat::minimal())
        .level(Level::Verbose);
    let (console, buffer) = memory_console(Level::Error);
    let dispatcher = Arc::new(Dispatcher::new("app"));
    dispatcher.add_destination(Arc::new(file));
    dispatcher.add_destination(console);

    // Far more than a pipe buffer holds, so the writer stalls mid-queue.
    let payload = "x".repeat(1024);
    for _ in 0..400 {
        let line = payload.clone();
        dispatcher.info(move || line);
    }

    let (removed, removal_done) = mpsc::channel();
    let remover = {
        let dispatcher = Arc::clone(&dispatcher);
        std::thread::spawn(move || {
            dispatcher.remove_destination("fifo");
            removed.send(()).unwrap();
        })
    };
    let removal = removal_done.recv_timeout(Duration::from_secs(2));

    let started = Instant::now();
    dispatcher.error(|| "still flowing");
    let elapsed = started.elapsed();

    release.send(()).unwrap();
    remover.join().unwrap();
    let drained = reader.join().unwrap();

    assert!(removal.is_ok(), "remove_destination waited on the stalled writer");
    assert!(elapsed < Duration::from_secs(1), "log call took {elapsed:?}");
    assert_eq!(buffer.contents(), "[Error] still flowing\n");
    assert_eq!(drained.lines().count(), 400);
}

#[cfg(target_os = "linux")]
#[test]
fn write_failures_are_counted_and_other_sinks_still_receive() {
    let file = Arc::new(
        FileSink::open("full", "/dev/full")
            .unwrap()
            .level(Level::Verbose),
    );
    let (console, buffer) = memory_console(Level::Verbose);
    let dispatcher = Dispatcher::new("app");
    dispatcher.add_destination(Arc::clone(&file) as Arc<dyn Destination>);
    dispatcher.add_destination(console);

    dispatcher.info(|| "one");
    dispatcher.info(|| "two");
    dispatcher.info(|| "three");
    let flushed = dispatcher.flush();

    assert!(matches!(flushed, Err(Error::Io(_))));
    assert!(file.write_failures() > 0);
    assert_eq!(buffer.contents(), "[Info] one\n[Info] two\n[Info] three\n");
}

#[test]
fn duplicate_file_identifier_leaves_target_untouched() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.log");
    let second = dir.path().join("second.log");
    fs::write(&second, "keep me\n").unwrap();

    let result = Dispatcher::builder()
        .identifier("app")
        .file(first.to_str().unwrap())
        .done()
        .file(second.to_str().unwrap())
        .done()
        .build();

    assert!(matches!(result, Err(Error::DuplicateDestination(ref id)) if id == "app.file"));
    assert_eq!(fs::read_to_string(&second).unwrap(), "keep me\n");
}
