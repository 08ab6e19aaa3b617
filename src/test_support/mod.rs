//! Test doubles for the configure pipeline.
//!
//! # Example
//!
//! ```rust,ignore
//! use pwconfigure::test_support::{FakeProbe, RecordingReporter};
//!
//! let probe = FakeProbe::all_succeed().failing("make omp_test");
//! let mut reporter = RecordingReporter::default();
//! let report = configure(&opts, &env, &probe, &mut reporter)?;
//! assert!(!report.config.omp);
//! ```

use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::ops::configure::Reporter;
use crate::util::process::Probe;

/// Scripted probe that records every command it is asked to run.
#[derive(Debug, Default)]
pub struct FakeProbe {
    default_success: bool,
    failing: HashSet<String>,
    succeeding: HashSet<String>,
    calls: RefCell<Vec<String>>,
}

impl FakeProbe {
    /// Every command succeeds unless marked with [`FakeProbe::failing`].
    pub fn all_succeed() -> Self {
        FakeProbe {
            default_success: true,
            ..Default::default()
        }
    }

    /// Every command fails unless marked with [`FakeProbe::succeeding`].
    pub fn all_fail() -> Self {
        FakeProbe::default()
    }

    /// Make an exact command fail.
    pub fn failing(mut self, command: &str) -> Self {
        self.failing.insert(command.to_string());
        self
    }

    /// Make an exact command succeed.
    pub fn succeeding(mut self, command: &str) -> Self {
        self.succeeding.insert(command.to_string());
        self
    }

    /// Commands probed so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn was_run(&self, command: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == command)
    }
}

impl Probe for FakeProbe {
    fn probe(&self, command: &str) -> bool {
        self.calls.borrow_mut().push(command.to_string());

        if self.failing.contains(command) {
            false
        } else if self.succeeding.contains(command) {
            true
        } else {
            self.default_success
        }
    }
}

/// Reporter that keeps everything it is told.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub settings: Vec<(String, String)>,
    pub warnings: Vec<String>,
    /// One entry per write; `true` for the speculative write.
    pub writes: Vec<bool>,
}

impl RecordingReporter {
    pub fn has_setting(&self, label: &str, value: &str) -> bool {
        self.settings.iter().any(|(l, v)| l == label && v == value)
    }
}

impl Reporter for RecordingReporter {
    fn setting(&mut self, label: &str, value: &str) {
        self.settings.push((label.to_string(), value.to_string()));
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn wrote(&mut self, _path: &Path, speculative: bool) {
        self.writes.push(speculative);
    }
}

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a debug-level subscriber installed and return its logs.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let sink = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || sink.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let value = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (value, logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_logs() {
        let (value, logs) = capture_logs(|| {
            tracing::warn!("disk on fire");
            7
        });
        assert_eq!(value, 7);
        assert!(logs.contains("WARN"));
        assert!(logs.contains("disk on fire"));
    }

    #[test]
    fn test_fake_probe_overrides() {
        let probe = FakeProbe::all_fail().succeeding("which bash");
        assert!(probe.probe("which bash"));
        assert!(!probe.probe("which g++"));

        let probe = FakeProbe::all_succeed().failing("make clean");
        assert!(!probe.probe("make clean"));
        assert!(probe.probe("make omp_test"));
        assert_eq!(probe.commands(), vec!["make clean", "make omp_test"]);
    }
}
