use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::Level;

/// Where log lines end up. The terminal UI owns stdout/stderr while it runs,
/// so logs either go to a file or nowhere.
#[derive(Clone, Debug)]
pub enum LogTarget {
    File(Arc<Mutex<File>>),
    Discard,
}

impl LogTarget {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(LogTarget::File(Arc::new(Mutex::new(file))))
    }
}

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<Mutex<File>>),
    Sink(io::Sink),
}

impl DelegatingWriter {
    fn new(target: &LogTarget) -> Self {
        match target {
            LogTarget::File(file) => DelegatingWriter {
                inner: DelegatingInner::File(Arc::clone(file)),
            },
            LogTarget::Discard => DelegatingWriter {
                inner: DelegatingInner::Sink(io::sink()),
            },
        }
    }
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(f) => f
                .lock()
                .map_err(|_| io::Error::other("log file lock poisoned"))?
                .write(buf),
            DelegatingInner::Sink(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(f) => f
                .lock()
                .map_err(|_| io::Error::other("log file lock poisoned"))?
                .flush(),
            DelegatingInner::Sink(s) => s.flush(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SubscriberMakeWriter {
    target: LogTarget,
}

impl SubscriberMakeWriter {
    pub fn new(target: LogTarget) -> Self {
        Self { target }
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DelegatingWriter::new(&self.target)
    }
}

/// Install the global subscriber. Safe to call multiple times; subsequent
/// calls are no-ops for the global subscriber.
pub fn init(target: LogTarget, verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(SubscriberMakeWriter::new(target))
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}

/// Install a subscriber that drops everything at INFO.
pub fn init_default() {
    init(LogTarget::Discard, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn file_target_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bubble.log");
        let target = LogTarget::open(&path).unwrap();
        let mut w = DelegatingWriter::new(&target);
        w.write_all(b"snap edge=Right\n").unwrap();
        w.flush().unwrap();
        let mut w2 = DelegatingWriter::new(&LogTarget::open(&path).unwrap());
        w2.write_all(b"tap\n").unwrap();
        w2.flush().unwrap();

        let mut contents = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "snap edge=Right\ntap\n");
    }

    #[test]
    fn discard_target_swallows_output() {
        let mut w = DelegatingWriter::new(&LogTarget::Discard);
        assert_eq!(w.write(b"ignored").unwrap(), 7);
        w.flush().unwrap();
    }

    #[test]
    fn init_is_idempotent() {
        init_default();
        init_default();
        tracing::info!("still alive");
    }
}
