//! Async receiver that turns a Modbus RTU byte stream into decoded reports.

#![forbid(unsafe_code)]

use thiserror::Error;

pub mod monitor;
pub mod receiver;
pub mod sink;
#[cfg(feature = "rtu")]
pub mod serial;

pub use monitor::Monitor;
pub use receiver::{FrameReceiver, ReceiverConfig};
pub use sink::{ReportSink, TracingSink};
#[cfg(feature = "rtu")]
pub use serial::{SerialConfig, open_serial};

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
