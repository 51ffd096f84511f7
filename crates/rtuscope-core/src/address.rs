/// Slave id this device answers to unless configured otherwise.
pub const DEFAULT_LOCAL_ADDRESS: u8 = 0x01;
/// Reserved slave id that every device processes without replying.
pub const BROADCAST_ADDRESS: u8 = 0x00;

/// Outcome of comparing a frame's slave id with the local configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AddressClass {
    SelfAddressed,
    Broadcast,
    OtherAddressed(u8),
}

impl AddressClass {
    /// Whether the frame continues on to function decoding.
    pub const fn is_for_us(self) -> bool {
        matches!(self, Self::SelfAddressed | Self::Broadcast)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceAddressing {
    pub local_address: u8,
    pub broadcast_address: u8,
}

impl Default for DeviceAddressing {
    fn default() -> Self {
        Self {
            local_address: DEFAULT_LOCAL_ADDRESS,
            broadcast_address: BROADCAST_ADDRESS,
        }
    }
}

impl DeviceAddressing {
    pub fn with_local_address(mut self, local_address: u8) -> Self {
        self.local_address = local_address;
        self
    }

    pub fn with_broadcast_address(mut self, broadcast_address: u8) -> Self {
        self.broadcast_address = broadcast_address;
        self
    }

    pub fn classify(&self, slave_id: u8) -> AddressClass {
        if slave_id == self.local_address {
            AddressClass::SelfAddressed
        } else if slave_id == self.broadcast_address {
            AddressClass::Broadcast
        } else {
            AddressClass::OtherAddressed(slave_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AddressClass, DeviceAddressing};

    #[test]
    fn default_addressing() {
        let addressing = DeviceAddressing::default();
        assert_eq!(addressing.classify(0x01), AddressClass::SelfAddressed);
        assert_eq!(addressing.classify(0x00), AddressClass::Broadcast);
        assert_eq!(addressing.classify(0x02), AddressClass::OtherAddressed(0x02));
        assert_eq!(addressing.classify(0xF7), AddressClass::OtherAddressed(0xF7));
    }

    #[test]
    fn only_other_addresses_are_filtered() {
        let addressing = DeviceAddressing::default();
        assert!(addressing.classify(0x01).is_for_us());
        assert!(addressing.classify(0x00).is_for_us());
        assert!(!addressing.classify(0x99).is_for_us());
    }

    #[test]
    fn configured_local_address() {
        let addressing = DeviceAddressing::default().with_local_address(0x11);
        assert_eq!(addressing.classify(0x11), AddressClass::SelfAddressed);
        assert_eq!(addressing.classify(0x01), AddressClass::OtherAddressed(0x01));
        assert_eq!(addressing.classify(0x00), AddressClass::Broadcast);
    }
}
