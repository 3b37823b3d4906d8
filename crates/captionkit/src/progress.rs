//! # Progress Reporting
//!
//! Dataset construction emits a handful of progress/summary lines.
//! Where they go is an explicit option on the builder rather than
//! a process-wide output policy.

use std::io::Write;

use parking_lot::Mutex;

/// A destination for progress lines.
pub trait ProgressSink: Send + Sync {
    /// Emit one line.
    fn report(
        &self,
        line: &str,
    );
}

/// Sends progress lines to the [`log`] facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn report(
        &self,
        line: &str,
    ) {
        log::info!("{line}");
    }
}

/// Writes progress lines to a [`Write`], flushing after every line.
#[derive(Debug)]
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Release the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> ProgressSink for WriterSink<W> {
    fn report(
        &self,
        line: &str,
    ) {
        let mut writer = self.writer.lock();
        // Progress output is best-effort.
        if let Err(e) = writeln!(writer, "{line}").and_then(|_| writer.flush()) {
            log::warn!("progress write failed: {e}");
        }
    }
}
