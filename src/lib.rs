//! IsotrakIO - serial driver library for Polhemus Isotrak motion trackers
//!
//! Connects to an Isotrak-family tracker over a serial link, configures
//! continuous metric position + quaternion output, and decodes the
//! fixed-width ASCII records it streams back into the station's last-known
//! pose.
//!
//! ## Core pieces
//!
//! - [`protocol`] - the Isotrak ASCII command set and record codec
//! - [`transport`] - serial transport abstraction, plus a mock for tests
//! - [`driver`] - connection management and single-record updates
//! - [`session`] - the connect → initialize → stream → reconnect loop

pub mod config;
pub mod driver;
pub mod error;
pub mod pose;
pub mod protocol;
pub mod session;
pub mod transport;

// Re-export commonly used types
pub use config::AppConfig;
pub use driver::IsotrakDriver;
pub use error::{Error, Result};
pub use pose::Pose;
pub use session::Session;
