//! Chip address and pin/port targeting.

use core::fmt;

use crate::error::ValidationError;

/// 7-bit I2C address of an MCP23017, always within `0x20..=0x27`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Address(u8);

impl Address {
    pub const MIN: u8 = 0x20;
    pub const MAX: u8 = 0x27;

    pub fn new(raw: u32) -> Result<Self, ValidationError> {
        match u8::try_from(raw) {
            Ok(addr @ Self::MIN..=Self::MAX) => Ok(Self(addr)),
            _ => Err(ValidationError::AddressOutOfRange(raw)),
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Address {
    fn default() -> Self {
        Self(crate::registers::ADDR)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// One 8-bit half of the GPIO space.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Port {
    /// Port 0, pins 1-8.
    Low,
    /// Port 1, pins 9-16.
    High,
}

impl Port {
    pub fn new(raw: u32) -> Result<Self, ValidationError> {
        match raw {
            0 => Ok(Port::Low),
            1 => Ok(Port::High),
            _ => Err(ValidationError::PortOutOfRange(raw)),
        }
    }

    pub const fn index(self) -> u8 {
        match self {
            Port::Low => 0,
            Port::High => 1,
        }
    }
}

/// A single GPIO line, numbered 1 to 16.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Pin(u8);

impl Pin {
    pub fn new(raw: u32) -> Result<Self, ValidationError> {
        match raw {
            1..=16 => Ok(Self(raw as u8)),
            _ => Err(ValidationError::PinOutOfRange(raw)),
        }
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    pub const fn port(self) -> Port {
        if self.0 <= 8 {
            Port::Low
        } else {
            Port::High
        }
    }

    /// Bit offset of this pin within its port register.
    pub const fn bit(self) -> u8 {
        (self.0 - 1) % 8
    }
}

/// What a single invocation operates on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Target {
    Port(Port),
    Pin(Pin),
}

impl Target {
    pub const fn port(self) -> Port {
        match self {
            Target::Port(port) => port,
            Target::Pin(pin) => pin.port(),
        }
    }

    /// Largest value an operation on this target accepts.
    pub const fn max_value(self) -> u32 {
        match self {
            Target::Port(_) => u8::MAX as u32,
            Target::Pin(_) => 1,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Port(port) => write!(f, "port {}", port.index()),
            Target::Pin(pin) => write!(f, "pin {}", pin.number()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_resolution() {
        for n in 1..=8u32 {
            let pin = Pin::new(n).unwrap();
            assert_eq!(pin.port(), Port::Low);
            assert_eq!(pin.bit() as u32, n - 1);
        }
        for n in 9..=16u32 {
            let pin = Pin::new(n).unwrap();
            assert_eq!(pin.port(), Port::High);
            assert_eq!(pin.bit() as u32, n - 9);
        }
    }

    #[test]
    fn pin_range() {
        assert_eq!(Pin::new(0), Err(ValidationError::PinOutOfRange(0)));
        assert_eq!(Pin::new(17), Err(ValidationError::PinOutOfRange(17)));
    }

    #[test]
    fn port_range() {
        assert_eq!(Port::new(0), Ok(Port::Low));
        assert_eq!(Port::new(1), Ok(Port::High));
        assert_eq!(Port::new(2), Err(ValidationError::PortOutOfRange(2)));
    }

    #[test]
    fn address_range() {
        assert_eq!(Address::new(0x20).map(Address::get), Ok(0x20));
        assert_eq!(Address::new(0x27).map(Address::get), Ok(0x27));
        assert_eq!(Address::new(0x1F), Err(ValidationError::AddressOutOfRange(0x1F)));
        assert_eq!(Address::new(0x28), Err(ValidationError::AddressOutOfRange(0x28)));
        assert_eq!(Address::new(0x120), Err(ValidationError::AddressOutOfRange(0x120)));
        assert_eq!(Address::default().get(), 0x20);
    }

    #[test]
    fn target_max_value() {
        assert_eq!(Target::Port(Port::Low).max_value(), 255);
        assert_eq!(Target::Pin(Pin::new(3).unwrap()).max_value(), 1);
    }
}
