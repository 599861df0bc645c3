//! Mock transport for testing

use super::Transport;
use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock transport for unit testing.
///
/// Clonable: a test keeps one handle for inspection while the driver owns
/// another. Lines queued with `push_line` are served one per `read_line`;
/// all written bytes are captured.
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    open: bool,
    open_allowed: bool,
    open_calls: u32,
    close_when_drained: bool,
    lines: VecDeque<Vec<u8>>,
    written: Vec<u8>,
}

impl MockTransport {
    /// Create a mock whose `open()` succeeds
    pub fn new() -> Self {
        MockTransport {
            inner: Arc::new(Mutex::new(Inner {
                open: false,
                open_allowed: true,
                open_calls: 0,
                close_when_drained: false,
                lines: VecDeque::new(),
                written: Vec::new(),
            })),
        }
    }

    /// Allow or refuse subsequent `open()` calls
    pub fn set_open_allowed(&self, allowed: bool) {
        self.inner.lock().unwrap().open_allowed = allowed;
    }

    /// Simulate a mid-stream disconnect once every queued line has been
    /// served: the transport closes and further opens fail until the test
    /// plugs the device back in with `set_open_allowed(true)`
    pub fn close_when_drained(&self) {
        self.inner.lock().unwrap().close_when_drained = true;
    }

    /// Queue a line to be served by `read_line`
    pub fn push_line(&self, line: &[u8]) {
        self.inner.lock().unwrap().lines.push_back(line.to_vec());
    }

    /// Number of times `open()` has been called
    pub fn open_calls(&self) -> u32 {
        self.inner.lock().unwrap().open_calls
    }

    /// All bytes written so far
    pub fn written(&self) -> Vec<u8> {
        self.inner.lock().unwrap().written.clone()
    }

    /// Clear captured writes
    pub fn clear_written(&self) {
        self.inner.lock().unwrap().written.clear();
    }
}

impl Transport for MockTransport {
    fn open(&mut self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.open_calls += 1;
        if inner.open_allowed {
            inner.open = true;
            Ok(())
        } else {
            Err(Error::Serial(serialport::Error::new(
                serialport::ErrorKind::NoDevice,
                "mock port unavailable",
            )))
        }
    }

    fn close(&mut self) {
        self.inner.lock().unwrap().open = false;
    }

    fn is_open(&mut self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.open && inner.close_when_drained && inner.lines.is_empty() {
            // One-shot: the device vanishes and stays gone until replugged
            inner.open = false;
            inner.open_allowed = false;
            inner.close_when_drained = false;
        }
        inner.open
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.open {
            return Err(Error::NotOpen);
        }
        inner.written.extend_from_slice(data);
        Ok(data.len())
    }

    fn read_line(&mut self) -> Result<Vec<u8>> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.open {
            return Err(Error::NotOpen);
        }
        Ok(inner.lines.pop_front().unwrap_or_default())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}
