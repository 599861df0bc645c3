//! Serial transport implementation

use super::Transport;
use crate::error::{Error, Result};
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::io::{Read, Write};
use std::time::Duration;

/// Per-read timeout. Line reads keep accumulating across reads; a read
/// that returns nothing before this elapses ends the attempt.
const READ_TIMEOUT: Duration = Duration::from_secs(2);

/// Serial transport for UART communication with the tracker.
///
/// Constructed closed; `open` applies the configured parameters (8 data
/// bits, no parity, 1 stop bit, no flow control). A receive accumulator
/// carries partial lines across `read_line` calls so a slow stream is not
/// dropped at timeout boundaries.
pub struct SerialTransport {
    path: String,
    baud_rate: u32,
    port: Option<Box<dyn SerialPort>>,
    rx: Vec<u8>,
}

impl SerialTransport {
    /// Create a transport for `path` at `baud_rate`, initially closed
    ///
    /// # Arguments
    /// * `path` - Serial port path (e.g., "/dev/ttyUSB0")
    /// * `baud_rate` - Baud rate (e.g., 115200)
    pub fn new(path: impl Into<String>, baud_rate: u32) -> Self {
        SerialTransport {
            path: path.into(),
            baud_rate,
            port: None,
            rx: Vec::new(),
        }
    }
}

impl Transport for SerialTransport {
    fn open(&mut self) -> Result<()> {
        if self.port.is_some() {
            return Ok(());
        }

        let port = serialport::new(&self.path, self.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(READ_TIMEOUT)
            .open()?;

        log::info!(
            "Opened serial port: {} at {} baud",
            self.path,
            self.baud_rate
        );

        self.rx.clear();
        self.port = Some(port);
        Ok(())
    }

    fn close(&mut self) {
        if self.port.take().is_some() {
            log::info!("Closed serial port: {}", self.path);
        }
    }

    fn is_open(&mut self) -> bool {
        match self.port.as_mut() {
            Some(port) => match port.bytes_to_read() {
                Ok(_) => true,
                Err(e) => {
                    // Probe failure means the device vanished; drop the
                    // handle so the next open starts clean
                    log::warn!("Serial port {} lost: {}", self.path, e);
                    self.port = None;
                    false
                }
            },
            None => false,
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        let port = self.port.as_mut().ok_or(Error::NotOpen)?;
        Ok(port.write(data)?)
    }

    fn read_line(&mut self) -> Result<Vec<u8>> {
        let port = self.port.as_mut().ok_or(Error::NotOpen)?;
        let mut buf = [0u8; 256];

        loop {
            if let Some(pos) = self.rx.iter().position(|&b| b == b'\n') {
                return Ok(self.rx.drain(..=pos).collect());
            }

            match port.read(&mut buf) {
                Ok(0) => return Ok(Vec::new()),
                Ok(n) => self.rx.extend_from_slice(&buf[..n]),
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => return Ok(Vec::new()),
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn flush(&mut self) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotOpen)?;
        port.flush()?;
        Ok(())
    }
}
