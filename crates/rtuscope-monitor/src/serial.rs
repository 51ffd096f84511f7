use crate::MonitorError;
use tokio_serial::SerialPortBuilderExt;
pub use tokio_serial::{DataBits, FlowControl, Parity, SerialStream, StopBits};

const DEFAULT_BAUD_RATE: u32 = 115_200;

#[derive(Debug, Clone)]
pub struct SerialConfig {
    pub baud_rate: u32,
    pub parity: Parity,
    pub data_bits: DataBits,
    pub stop_bits: StopBits,
    pub flow_control: FlowControl,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            parity: Parity::None,
            data_bits: DataBits::Eight,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
        }
    }
}

impl SerialConfig {
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_parity(mut self, parity: Parity) -> Self {
        self.parity = parity;
        self
    }

    pub fn with_stop_bits(mut self, stop_bits: StopBits) -> Self {
        self.stop_bits = stop_bits;
        self
    }
}

pub fn open_serial(path: &str, config: &SerialConfig) -> Result<SerialStream, MonitorError> {
    tokio_serial::new(path, config.baud_rate)
        .parity(config.parity)
        .data_bits(config.data_bits)
        .stop_bits(config.stop_bits)
        .flow_control(config.flow_control)
        .open_native_async()
        .map_err(|err| {
            MonitorError::Io(std::io::Error::other(format!(
                "failed to open serial port '{path}': {err}"
            )))
        })
}
