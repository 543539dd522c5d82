//! Driver for the MCP23017 16-bit I2C GPIO expander, as used on the IO Pi
//! boards.
//!
//! The chip is split into two 8-bit ports: port 0 controls pins 1 to 8 and
//! port 1 controls pins 9 to 16. When a whole port is written or read, the
//! least significant bit is the lowest numbered pin of that port.
//!
//! A command line is turned into a [`plan::RequestPlan`], which
//! [`dispatch::dispatch`] runs against a [`device::Mcp23017`] on any blocking
//! `embedded-hal` I2C bus.

pub mod bitfield;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod host;
#[cfg(target_os = "linux")]
pub mod linux;
pub mod output;
pub mod plan;
pub mod registers;
pub mod target;

pub use device::Mcp23017;
pub use dispatch::{dispatch, Report};
pub use error::{Error, ValidationError};
pub use plan::{OpKind, Operation, Request, RequestPlan};
pub use target::{Address, Pin, Port, Target};
