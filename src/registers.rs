//! MCP23017 register map, `IOCON.BANK = 0` layout.
//!
//! Every chip function owns a pair of registers: one for port 0 (pins 1-8) and
//! one for port 1 (pins 9-16).

use crate::target::Port;

/// Default chip address with A0-A2 tied low.
pub const ADDR: u8 = 0x20;

/// Configuration written to `IOCON` every time a device is opened:
/// `MIRROR` set, `INTPOL` set (active-high).
pub const IOCON_DEFAULT: u8 = 0x22;

/// `IOCON` bit connecting the INTA and INTB outputs.
pub const IOCON_MIRROR: u8 = 6;

/// `IOCON` bit selecting the polarity of the INT outputs.
pub const IOCON_INTPOL: u8 = 1;

macro_rules! mcpregs {
    ($($func:ident => $low:ident : $lowval:expr, $high:ident : $highval:expr;)*) => {
        $(
            pub const $low: u8 = $lowval;
            pub const $high: u8 = $highval;
        )*

        /// Logical chip function, each backed by a low/high register pair.
        #[derive(Debug, Copy, Clone, PartialEq, Eq)]
        pub enum Function {
            $($func,)*
        }

        impl Function {
            /// The `(port 0, port 1)` register addresses of this function.
            pub const fn registers(self) -> (u8, u8) {
                match self {
                    $(Function::$func => ($low, $high),)*
                }
            }
        }

        /// Datasheet mnemonic of a register address, for logging.
        pub fn regname(reg: u8) -> &'static str {
            match reg {
                $(
                    $low => stringify!($low),
                    $high => stringify!($high),
                )*
                _ => "UNKNOWN",
            }
        }
    }
}

mcpregs! {
    Direction => IODIRA: 0x00, IODIRB: 0x01;
    Polarity => IPOLA: 0x02, IPOLB: 0x03;
    InterruptEnable => GPINTENA: 0x04, GPINTENB: 0x05;
    InterruptDefault => DEFVALA: 0x06, DEFVALB: 0x07;
    InterruptControl => INTCONA: 0x08, INTCONB: 0x09;
    Config => IOCON: 0x0A, IOCONB: 0x0B;
    PullUp => GPPUA: 0x0C, GPPUB: 0x0D;
    InterruptFlag => INTFA: 0x0E, INTFB: 0x0F;
    InterruptCapture => INTCAPA: 0x10, INTCAPB: 0x11;
    Data => GPIOA: 0x12, GPIOB: 0x13;
    OutputLatch => OLATA: 0x14, OLATB: 0x15;
}

impl Function {
    /// The register of this function that serves `port`.
    pub const fn register(self, port: Port) -> u8 {
        let (low, high) = self.registers();
        match port {
            Port::Low => low,
            Port::High => high,
        }
    }
}
