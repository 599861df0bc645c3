//! Session loop: connect, initialize, stream, reconnect
//!
//! States: disconnected → connecting → initializing → streaming, and back
//! to connecting on any loss. The loop has no terminal state of its own;
//! it runs until the shutdown flag flips, then closes the transport.

use crate::driver::IsotrakDriver;
use crate::pose::Pose;
use crate::transport::Transport;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Granularity of the retry countdown; each tick prints one dot on stderr
/// and re-checks the shutdown flag
const BACKOFF_TICK: Duration = Duration::from_millis(500);

/// Drives one tracker driver through the connection lifecycle, publishing
/// every successfully decoded pose through a callback.
///
/// The loop is synchronous and single-threaded; a hosting application that
/// wants concurrent consumers wraps `run` in its own thread and hands
/// poses off from the publish callback.
pub struct Session<T: Transport, F: FnMut(&Pose)> {
    driver: IsotrakDriver<T>,
    retry_interval: Duration,
    publish: F,
}

impl<T: Transport, F: FnMut(&Pose)> Session<T, F> {
    /// Create a session with a fixed backoff between failed connection
    /// attempts
    pub fn new(driver: IsotrakDriver<T>, retry_interval: Duration, publish: F) -> Self {
        Session {
            driver,
            retry_interval,
            publish,
        }
    }

    /// Run until `shutdown` flips, then close the transport.
    ///
    /// There is no retry limit: a long-running acquisition process keeps
    /// polling for the device forever.
    pub fn run(&mut self, shutdown: &AtomicBool) {
        'lifecycle: while !shutdown.load(Ordering::Relaxed) {
            // Connecting: poll until the transport opens
            while !self.driver.connect() {
                log::warn!(
                    "Could not connect; retrying in {}s",
                    self.retry_interval.as_secs()
                );
                Self::backoff(self.retry_interval, shutdown);
                if shutdown.load(Ordering::Relaxed) {
                    break 'lifecycle;
                }
            }
            log::info!("Connected");

            // Initializing: reconfigure the device on every connection;
            // its mode state does not survive a disconnect
            log::info!("Sending initialization commands to tracker");
            if let Err(e) = self.driver.initialize() {
                log::error!("Initialization failed: {}", e);
                self.driver.disconnect();
                continue;
            }
            log::info!("Tracker initialized; streaming data");

            // Streaming: one record per cycle. The pre-cycle connect()
            // check is the sole disconnect detector; a bad frame only
            // skips that cycle's publish.
            while !shutdown.load(Ordering::Relaxed) && self.driver.connect() {
                match self.driver.update() {
                    Ok(()) => {
                        let Session {
                            driver, publish, ..
                        } = self;
                        publish(driver.pose());
                    }
                    Err(e) => log::debug!("Skipping record: {}", e),
                }
            }

            if !shutdown.load(Ordering::Relaxed) {
                log::warn!("Connection lost; attempting to reestablish");
            }
        }

        self.driver.disconnect();
        log::info!("Session stopped");
    }

    /// Wait out the retry interval, a tick at a time, with a visible
    /// countdown on stderr
    fn backoff(interval: Duration, shutdown: &AtomicBool) {
        let mut remaining = interval;
        while remaining > Duration::ZERO {
            if shutdown.load(Ordering::Relaxed) {
                return;
            }
            let tick = remaining.min(BACKOFF_TICK);
            thread::sleep(tick);
            eprint!(".");
            let _ = std::io::stderr().flush();
            remaining = remaining.saturating_sub(tick);
        }
        eprintln!();
    }
}
