//! Isotrak tracker driver
//!
//! Owns the transport and the station's last-known pose. Connection
//! management here only answers "is the link open" / "try to make it
//! open"; reconnection policy lives in the session loop.

use crate::error::Result;
use crate::pose::Pose;
use crate::protocol::{self, record};
use crate::transport::Transport;

/// Driver for one Isotrak station over a serial transport
pub struct IsotrakDriver<T: Transport> {
    transport: T,
    pose: Pose,
}

impl<T: Transport> IsotrakDriver<T> {
    /// Create a driver for one tracked station over `transport`.
    ///
    /// The transport arrives configured but closed; `connect` opens it.
    pub fn new(transport: T, station: impl Into<String>) -> Self {
        IsotrakDriver {
            transport,
            pose: Pose::new(station),
        }
    }

    /// Try to make the transport open; returns the resulting state.
    ///
    /// Idempotent: an already-open transport is left untouched, with no
    /// reconfiguration. An open failure is logged and reported as `false`
    /// rather than raised, so callers poll instead of unwinding.
    pub fn connect(&mut self) -> bool {
        if self.transport.is_open() {
            return true;
        }
        if let Err(e) = self.transport.open() {
            log::error!("Failed to open transport: {}", e);
        }
        self.transport.is_open()
    }

    /// Close the transport if it is open; no-op otherwise
    pub fn disconnect(&mut self) {
        if self.transport.is_open() {
            self.transport.close();
        }
    }

    /// Send the initialization command.
    ///
    /// Must be re-sent after every reconnect: device mode state does not
    /// survive a physical disconnect.
    pub fn initialize(&mut self) -> Result<()> {
        let cmd = protocol::initialize_command();
        log::debug!("TX init: {:02X?}", cmd);
        self.transport.write(&cmd)?;
        self.transport.flush()?;
        Ok(())
    }

    /// Request and decode one data record, updating the pose on success.
    ///
    /// On any failure (timeout, wrong length, malformed field) the pose
    /// keeps its last good value.
    pub fn update(&mut self) -> Result<()> {
        self.transport.write(&protocol::single_record_query())?;
        let line = self.transport.read_line()?;
        let fields = record::decode_record(&line)?;
        self.pose.update(fields);
        Ok(())
    }

    /// Last-known pose for the tracked station
    pub fn pose(&self) -> &Pose {
        &self.pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    /// Build a well-formed 54-byte record for the given field values
    fn record(fields: [f64; 7]) -> Vec<u8> {
        let mut data = b"01 ".to_vec();
        for (i, value) in fields.iter().enumerate() {
            let text = if i < 3 {
                format!("{:7.2}", value)
            } else {
                format!("{:7.4}", value)
            };
            data.extend_from_slice(text.as_bytes());
        }
        data.extend_from_slice(b"\r\n");
        data
    }

    fn driver_with_mock() -> (IsotrakDriver<MockTransport>, MockTransport) {
        let mock = MockTransport::new();
        let driver = IsotrakDriver::new(mock.clone(), "Tracker1");
        (driver, mock)
    }

    #[test]
    fn test_connect_is_idempotent() {
        let (mut driver, mock) = driver_with_mock();

        assert!(driver.connect());
        assert!(driver.connect());
        // Second connect saw an open transport and did not touch it
        assert_eq!(mock.open_calls(), 1);
    }

    #[test]
    fn test_connect_reports_failure_without_raising() {
        let (mut driver, mock) = driver_with_mock();
        mock.set_open_allowed(false);

        assert!(!driver.connect());
        assert!(!driver.connect());
        assert_eq!(mock.open_calls(), 2);
    }

    #[test]
    fn test_disconnect_then_connect_reopens() {
        let (mut driver, mock) = driver_with_mock();

        assert!(driver.connect());
        driver.disconnect();
        driver.disconnect(); // no-op when already closed
        assert!(driver.connect());
        assert_eq!(mock.open_calls(), 2);
    }

    #[test]
    fn test_initialize_writes_exact_command() {
        let (mut driver, mock) = driver_with_mock();
        driver.connect();

        driver.initialize().unwrap();
        assert_eq!(mock.written(), b"CuO2,11,1\r\n");
    }

    #[test]
    fn test_update_applies_decoded_fields() {
        let (mut driver, mock) = driver_with_mock();
        driver.connect();
        mock.push_line(&record([12.34, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0]));

        driver.update().unwrap();

        let pose = driver.pose();
        assert_eq!((pose.px, pose.py, pose.pz), (12.34, -1.0, 0.0));
        assert_eq!((pose.qx, pose.qy, pose.qz, pose.qw), (0.0, 0.0, 0.0, 1.0));
        // One bare `P` query went out
        assert_eq!(mock.written(), b"P");
    }

    #[test]
    fn test_update_failure_leaves_pose_unchanged() {
        let (mut driver, mock) = driver_with_mock();
        driver.connect();

        // Establish a known-good pose first
        mock.push_line(&record([1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 1.0]));
        driver.update().unwrap();

        // Truncated record: decode fails, pose stays at last good value
        let mut truncated = record([9.0, 9.0, 9.0, 0.0, 0.0, 0.0, 1.0]);
        truncated.truncate(40);
        mock.push_line(&truncated);
        assert!(driver.update().is_err());

        let pose = driver.pose();
        assert_eq!((pose.px, pose.py, pose.pz), (1.0, 2.0, 3.0));
    }

    #[test]
    fn test_update_with_no_data_is_an_error() {
        let (mut driver, _mock) = driver_with_mock();
        driver.connect();
        // Empty line queue: read_line yields an empty buffer (timeout)
        assert!(driver.update().is_err());
    }

    #[test]
    fn test_stream_with_one_truncated_record() {
        let (mut driver, mock) = driver_with_mock();
        driver.connect();

        for i in 0..10 {
            let mut data = record([i as f64, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
            if i == 4 {
                data.truncate(40);
            }
            mock.push_line(&data);
        }

        let successes = (0..10).filter(|_| driver.update().is_ok()).count();
        assert_eq!(successes, 9);
        // The last good record still landed
        assert_eq!(driver.pose().px, 9.0);
    }
}
