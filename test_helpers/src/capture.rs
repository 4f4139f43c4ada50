//! Thread-safe recording of reported messages.
//!
//! Library code reports warnings through injectable callbacks; tests install
//! a callback that forwards into a [`Recorder`] and assert on what arrived.
//!
//! # Examples
//!
//! ```
//! use cliflag_test_helpers::capture::Recorder;
//!
//! let recorder = Recorder::new();
//! let sink = recorder.clone();
//! std::thread::spawn(move || sink.record("from a worker"))
//!     .join()
//!     .expect("worker finished");
//! assert_eq!(recorder.lines(), ["from a worker"]);
//! ```

use std::fmt::Display;
use std::sync::Arc;

use parking_lot::Mutex;

/// Cloneable handle to a shared list of recorded messages.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the display form of `message`.
    pub fn record(&self, message: impl Display) {
        self.lines.lock().push(message.to_string());
    }

    /// Copies every message recorded so far, oldest first.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Number of recorded messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Discards every recorded message.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}
