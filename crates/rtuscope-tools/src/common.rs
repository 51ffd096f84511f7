use clap::Args;
use rtuscope_core::DeviceAddressing;
use rtuscope_core::address::{BROADCAST_ADDRESS, DEFAULT_LOCAL_ADDRESS};
use rtuscope_monitor::serial::{Parity, StopBits};
use rtuscope_monitor::{ReceiverConfig, SerialConfig};
use std::time::Duration;

#[derive(Debug, Clone, Args)]
pub struct AddressingArgs {
    /// Slave id of this device (decimal or 0x-prefixed hex).
    #[arg(long, default_value_t = DEFAULT_LOCAL_ADDRESS, value_parser = parse_u8)]
    pub local_address: u8,
    #[arg(long, default_value_t = BROADCAST_ADDRESS, value_parser = parse_u8)]
    pub broadcast_address: u8,
}

impl AddressingArgs {
    pub fn addressing(&self) -> DeviceAddressing {
        DeviceAddressing::default()
            .with_local_address(self.local_address)
            .with_broadcast_address(self.broadcast_address)
    }
}

#[derive(Debug, Clone, Args)]
pub struct SerialArgs {
    #[arg(long)]
    pub port: String,
    #[arg(long, default_value_t = 115_200)]
    pub baud: u32,
    /// none, even or odd.
    #[arg(long, default_value = "none", value_parser = parse_parity)]
    pub parity: Parity,
    /// 1 or 2.
    #[arg(long, default_value = "1", value_parser = parse_stop_bits)]
    pub stop_bits: StopBits,
    /// Inter-frame silence in milliseconds.
    #[arg(long, default_value_t = 200)]
    pub silence_ms: u64,
    #[arg(long, default_value_t = 1024)]
    pub max_frame_len: usize,
}

impl SerialArgs {
    pub fn serial_config(&self) -> SerialConfig {
        SerialConfig::default()
            .with_baud_rate(self.baud)
            .with_parity(self.parity)
            .with_stop_bits(self.stop_bits)
    }

    pub fn receiver_config(&self) -> ReceiverConfig {
        ReceiverConfig::default()
            .with_silence(Duration::from_millis(self.silence_ms))
            .with_max_frame_len(self.max_frame_len)
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}

pub fn parse_parity(input: &str) -> Result<Parity, String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "none" | "n" => Ok(Parity::None),
        "even" | "e" => Ok(Parity::Even),
        "odd" | "o" => Ok(Parity::Odd),
        _ => Err(format!("invalid parity: {input}")),
    }
}

pub fn parse_stop_bits(input: &str) -> Result<StopBits, String> {
    match input.trim() {
        "1" => Ok(StopBits::One),
        "2" => Ok(StopBits::Two),
        _ => Err(format!("invalid stop bits: {input}")),
    }
}

pub fn parse_u8(input: &str) -> Result<u8, String> {
    let trimmed = input.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => trimmed.parse(),
    };
    parsed.map_err(|_| format!("invalid byte value: {input}"))
}

/// Parses hex such as `01 06 00 10` or `0106001000`; spaces, `:` and `-` are ignored.
pub fn parse_hex_frame(input: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<u8> = input
        .bytes()
        .filter(|b| !matches!(b, b' ' | b'\t' | b':' | b'-'))
        .collect();
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits in '{input}'"));
    }

    digits
        .chunks(2)
        .map(|pair| {
            if !pair.iter().all(u8::is_ascii_hexdigit) {
                return Err(format!("invalid hex byte in '{input}'"));
            }
            std::str::from_utf8(pair)
                .ok()
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| format!("invalid hex byte in '{input}'"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{SerialArgs, parse_hex_frame, parse_parity, parse_stop_bits, parse_u8};
    use clap::Parser;
    use rtuscope_monitor::serial::{Parity, StopBits};

    #[derive(Debug, Parser)]
    struct SerialCli {
        #[command(flatten)]
        serial: SerialArgs,
    }

    #[test]
    fn serial_flags_reach_the_port_config() {
        let cli = SerialCli::parse_from([
            "rtumonitor",
            "--port",
            "/dev/ttyUSB0",
            "--baud",
            "9600",
            "--parity",
            "even",
            "--stop-bits",
            "2",
        ]);
        let config = cli.serial.serial_config();
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.parity, Parity::Even);
        assert_eq!(config.stop_bits, StopBits::Two);
    }

    #[test]
    fn serial_defaults_are_8n1() {
        let cli = SerialCli::parse_from(["rtumonitor", "--port", "/dev/ttyUSB0"]);
        let config = cli.serial.serial_config();
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
    }

    #[test]
    fn parses_line_settings() {
        assert_eq!(parse_parity("ODD"), Ok(Parity::Odd));
        assert_eq!(parse_parity("n"), Ok(Parity::None));
        assert!(parse_parity("mark").is_err());
        assert_eq!(parse_stop_bits("1"), Ok(StopBits::One));
        assert!(parse_stop_bits("1.5").is_err());
    }

    #[test]
    fn parses_hex_frames() {
        assert_eq!(
            parse_hex_frame("01 06 00 10 00 01 49 CF").unwrap(),
            vec![0x01, 0x06, 0x00, 0x10, 0x00, 0x01, 0x49, 0xCF]
        );
        assert_eq!(parse_hex_frame("0106:ff-00").unwrap(), vec![0x01, 0x06, 0xFF, 0x00]);
        assert_eq!(parse_hex_frame("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(parse_hex_frame("010").is_err());
        assert!(parse_hex_frame("0g").is_err());
        assert!(parse_hex_frame("+1").is_err());
    }

    #[test]
    fn parses_addresses() {
        assert_eq!(parse_u8("17"), Ok(17));
        assert_eq!(parse_u8("0x11"), Ok(0x11));
        assert_eq!(parse_u8("0XF7"), Ok(0xF7));
        assert!(parse_u8("256").is_err());
    }
}
