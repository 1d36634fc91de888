//! Shared utilities for integration testing.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use pi_shutdown::power::{CommandError, CommandRunner, PowerAction};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

/// Command runner that records every issued action.
#[derive(Default)]
pub struct RecordingRunner {
    issued: Mutex<Vec<PowerAction>>,
}

impl RecordingRunner {
    pub fn issued(&self) -> Vec<PowerAction> {
        self.issued.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn count(&self, action: PowerAction) -> usize {
        self.issued().iter().filter(|a| **a == action).count()
    }
}

impl CommandRunner for RecordingRunner {
    fn issue(&self, action: PowerAction) -> Result<(), CommandError> {
        self.issued.lock().unwrap().push(action);
        Ok(())
    }
}

/// In-memory sink for formatted log output.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    #[allow(dead_code)]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }

    /// Number of times `needle` appears in the captured output.
    #[allow(dead_code)]
    pub fn occurrences(&self, needle: &str) -> usize {
        self.contents().matches(needle).count()
    }
}

impl Write for LogCapture {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Route this thread's tracing events into a [`LogCapture`] until the guard drops.
#[allow(dead_code)]
pub fn capture_logs() -> (LogCapture, DefaultGuard) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}

/// Like [`capture_logs`], but behind `filter` as the daemon installs it.
#[allow(dead_code)]
pub fn capture_logs_filtered(filter: EnvFilter) -> (LogCapture, DefaultGuard) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(capture.clone())
            .with_ansi(false),
    );
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}
