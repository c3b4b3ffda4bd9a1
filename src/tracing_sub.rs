use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::Level;

/// Where log lines go. The desktop owns the terminal, so logs never go to
/// stdout or stderr while it runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogTarget {
    File(PathBuf),
    #[default]
    Discard,
}

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<Mutex<File>>),
    Sink(io::Sink),
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(file) => file
                .lock()
                .map_err(|_| io::Error::other("log file lock poisoned"))?
                .write(buf),
            DelegatingInner::Sink(sink) => sink.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(file) => file
                .lock()
                .map_err(|_| io::Error::other("log file lock poisoned"))?
                .flush(),
            DelegatingInner::Sink(sink) => sink.flush(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SubscriberMakeWriter {
    file: Option<Arc<Mutex<File>>>,
}

impl SubscriberMakeWriter {
    /// Open (appending) the file for `target`.
    pub fn for_target(target: &LogTarget) -> io::Result<Self> {
        let file = match target {
            LogTarget::File(path) => Some(Arc::new(Mutex::new(open_log(path)?))),
            LogTarget::Discard => None,
        };
        Ok(Self { file })
    }
}

fn open_log(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        let inner = match &self.file {
            Some(file) => DelegatingInner::File(file.clone()),
            None => DelegatingInner::Sink(io::sink()),
        };
        DelegatingWriter { inner }
    }
}

/// Install the global subscriber. Calling it again is a no-op for the
/// subscriber, though the log file is still opened so path errors surface.
pub fn init(target: &LogTarget, level: Level) -> io::Result<()> {
    let writer = SubscriberMakeWriter::for_target(target)?;
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn file_target_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desk.log");
        let make = SubscriberMakeWriter::for_target(&LogTarget::File(path.clone())).unwrap();
        make.make_writer().write_all(b"first\n").unwrap();
        let mut w = make.make_writer();
        w.write_all(b"second\n").unwrap();
        w.flush().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn discard_target_swallows_output() {
        let make = SubscriberMakeWriter::for_target(&LogTarget::Discard).unwrap();
        let mut w = make.make_writer();
        assert_eq!(w.write(b"dropped").unwrap(), 7);
    }

    #[test]
    fn unopenable_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("desk.log");
        assert!(init(&LogTarget::File(path), Level::DEBUG).is_err());
    }
}
