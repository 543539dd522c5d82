//! Validated, immutable description of everything one invocation asks for.
//!
//! A [`RequestPlan`] is built from raw command-line text in one pass. Every
//! check happens here, so a plan that exists can be dispatched without any
//! further validation and nothing touches the bus for a rejected request.

use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::target::{Address, Pin, Port, Target};

/// Kind of a requested operation. Declaration order is dispatch order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OpKind {
    Direction,
    Invert,
    Pullup,
    Write,
    Read,
    EnableInterrupts,
    MirrorInterrupts,
    InterruptPolarity,
    InterruptType,
    InterruptDefaults,
    InterruptStatus,
    InterruptCapture,
    ResetInterrupts,
}

impl OpKind {
    /// Long command-line option naming this operation.
    pub const fn option(self) -> &'static str {
        match self {
            OpKind::Direction => "direction",
            OpKind::Invert => "invert",
            OpKind::Pullup => "pullup",
            OpKind::Write => "write",
            OpKind::Read => "read",
            OpKind::EnableInterrupts => "enableinterrupts",
            OpKind::MirrorInterrupts => "mirrorinterrupts",
            OpKind::InterruptPolarity => "interruptpolarity",
            OpKind::InterruptType => "interrupttype",
            OpKind::InterruptDefaults => "int_defaults",
            OpKind::InterruptStatus => "int_status",
            OpKind::InterruptCapture => "int_capture",
            OpKind::ResetInterrupts => "resetinterrupts",
        }
    }

    pub const fn takes_value(self) -> bool {
        !matches!(
            self,
            OpKind::Read | OpKind::InterruptStatus | OpKind::InterruptCapture | OpKind::ResetInterrupts
        )
    }

    /// Largest argument accepted for this operation on `target`.
    pub const fn max_value(self, target: Target) -> u32 {
        match self {
            // single IOCON bits regardless of targeting mode
            OpKind::MirrorInterrupts | OpKind::InterruptPolarity => 1,
            _ => target.max_value(),
        }
    }
}

/// A requested operation together with its validated argument.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operation {
    Direction(u8),
    Invert(u8),
    Pullup(u8),
    Write(u8),
    Read,
    EnableInterrupts(u8),
    MirrorInterrupts(bool),
    InterruptPolarity(bool),
    InterruptType(u8),
    InterruptDefaults(u8),
    InterruptStatus,
    InterruptCapture,
    ResetInterrupts,
}

impl Operation {
    fn new(kind: OpKind, value: u8) -> Self {
        match kind {
            OpKind::Direction => Operation::Direction(value),
            OpKind::Invert => Operation::Invert(value),
            OpKind::Pullup => Operation::Pullup(value),
            OpKind::Write => Operation::Write(value),
            OpKind::Read => Operation::Read,
            OpKind::EnableInterrupts => Operation::EnableInterrupts(value),
            OpKind::MirrorInterrupts => Operation::MirrorInterrupts(value != 0),
            OpKind::InterruptPolarity => Operation::InterruptPolarity(value != 0),
            OpKind::InterruptType => Operation::InterruptType(value),
            OpKind::InterruptDefaults => Operation::InterruptDefaults(value),
            OpKind::InterruptStatus => Operation::InterruptStatus,
            OpKind::InterruptCapture => Operation::InterruptCapture,
            OpKind::ResetInterrupts => Operation::ResetInterrupts,
        }
    }

    pub const fn kind(&self) -> OpKind {
        match self {
            Operation::Direction(_) => OpKind::Direction,
            Operation::Invert(_) => OpKind::Invert,
            Operation::Pullup(_) => OpKind::Pullup,
            Operation::Write(_) => OpKind::Write,
            Operation::Read => OpKind::Read,
            Operation::EnableInterrupts(_) => OpKind::EnableInterrupts,
            Operation::MirrorInterrupts(_) => OpKind::MirrorInterrupts,
            Operation::InterruptPolarity(_) => OpKind::InterruptPolarity,
            Operation::InterruptType(_) => OpKind::InterruptType,
            Operation::InterruptDefaults(_) => OpKind::InterruptDefaults,
            Operation::InterruptStatus => OpKind::InterruptStatus,
            Operation::InterruptCapture => OpKind::InterruptCapture,
            Operation::ResetInterrupts => OpKind::ResetInterrupts,
        }
    }
}

/// Unvalidated request text as collected from the command line.
#[derive(Debug, Default, Clone)]
pub struct Request<'a> {
    pub address: Option<&'a str>,
    pub port: Option<&'a str>,
    pub pin: Option<&'a str>,
    /// Requested operations with their raw argument, if the operation takes one.
    pub operations: Vec<(OpKind, Option<&'a str>)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPlan {
    address: Address,
    target: Target,
    operations: Vec<Operation>,
}

impl RequestPlan {
    pub fn build(request: &Request<'_>) -> Result<Self, ValidationError> {
        let address = match request.address {
            Some(raw) => Address::new(parse_number(raw)?)?,
            None => Address::default(),
        };

        let target = match (request.port, request.pin) {
            (Some(_), Some(_)) => return Err(ValidationError::BothTargets),
            (None, None) => return Err(ValidationError::NoTarget),
            (Some(port), None) => Target::Port(Port::new(parse_number(port)?)?),
            (None, Some(pin)) => Target::Pin(Pin::new(parse_number(pin)?)?),
        };

        let mut operations = BTreeMap::new();
        for &(kind, raw) in &request.operations {
            let value = match (kind.takes_value(), raw) {
                (true, Some(raw)) => {
                    let value = parse_number(raw)?;
                    let max = kind.max_value(target);
                    if value > max {
                        return Err(ValidationError::ValueOutOfRange {
                            option: kind.option(),
                            value,
                            max,
                        });
                    }
                    value as u8
                }
                (true, None) => return Err(ValidationError::MissingArgument(kind.option())),
                (false, _) => 0,
            };
            operations.insert(kind, Operation::new(kind, value));
        }

        Ok(Self {
            address,
            target,
            operations: operations.into_values().collect(),
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Requested operations, in dispatch order, at most one per kind.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }
}

/// Parses a decimal, `0x` hexadecimal or `0b` binary literal.
///
/// The prefix must start the literal; `"10x"` is not hexadecimal.
pub fn parse_number(raw: &str) -> Result<u32, ValidationError> {
    let s = raw.trim();
    let (digits, radix) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (hex, 16)
    } else if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        (bin, 2)
    } else {
        (s, 10)
    };
    // from_str_radix would accept a leading '+'
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(ValidationError::BadNumber(raw.to_string()));
    }
    u32::from_str_radix(digits, radix).map_err(|_| ValidationError::BadNumber(raw.to_string()))
}
