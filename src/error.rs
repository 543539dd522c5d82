use core::fmt::Debug;

/// Request rejected before any bus traffic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select a port or pin number.")]
    NoTarget,
    #[error("You cannot select both port and pin.")]
    BothTargets,
    #[error("Pin outside of range: 1 to 16. {0}")]
    PinOutOfRange(u32),
    #[error("Port out of range: 0 or 1. {0}")]
    PortOutOfRange(u32),
    #[error("Address out of range - 0x20 to 0x27. {0:#x}")]
    AddressOutOfRange(u32),
    #[error("{0} requires an argument.")]
    MissingArgument(&'static str),
    #[error("Error parsing number: {0}")]
    BadNumber(String),
    #[error("{option} argument outside of range: {value} (max {max}).")]
    ValueOutOfRange { option: &'static str, value: u32, max: u32 },
}

/// Error type for device and dispatch operations, generic over the bus error.
#[derive(Debug, thiserror::Error)]
pub enum Error<E: Debug> {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("I2C bus error: {0:?}")]
    Bus(E),
}

impl<E: Debug> Error<E> {
    /// Process exit status for this error class.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Validation(_) => 2,
            Error::Bus(_) => 1,
        }
    }
}
