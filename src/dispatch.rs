//! Runs a [`RequestPlan`] against a device.
//!
//! Plan operations are already in dispatch order: configuration first, then the
//! data write, the data read, interrupt configuration, the interrupt reads and
//! finally the interrupt reset. Nothing is rolled back; if a step fails, the
//! writes of every earlier step stay applied on the chip.

use embedded_hal_1::i2c::I2c;
use log::debug;

use crate::device::Mcp23017;
use crate::error::Error;
use crate::plan::{Operation, RequestPlan};

/// Values produced by the read-type operations of a plan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub read: Option<u8>,
    pub int_status: Option<u8>,
    pub int_capture: Option<u8>,
}

impl Report {
    /// Present entries as `(key, value)`, in output order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, u8)> {
        [
            ("read", self.read),
            ("int_status", self.int_status),
            ("int_capture", self.int_capture),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

pub fn dispatch<I2C: I2c>(device: &mut Mcp23017<I2C>, plan: &RequestPlan) -> Result<Report, Error<I2C::Error>> {
    let target = plan.target();
    let mut report = Report::default();

    for op in plan.operations() {
        debug!("{:?} on {}", op, target);
        match *op {
            Operation::Direction(value) => device.set_direction(target, value)?,
            Operation::Invert(value) => device.invert(target, value)?,
            Operation::Pullup(value) => device.set_pullup(target, value)?,
            Operation::Write(value) => device.write(target, value)?,
            Operation::Read => report.read = Some(device.read(target)?),
            Operation::EnableInterrupts(value) => device.set_interrupt(target, value)?,
            Operation::MirrorInterrupts(value) => device.mirror_interrupts(value)?,
            Operation::InterruptPolarity(value) => device.set_interrupt_polarity(value)?,
            Operation::InterruptType(value) => device.set_interrupt_type(target, value)?,
            Operation::InterruptDefaults(value) => device.set_interrupt_defaults(target, value)?,
            Operation::InterruptStatus => report.int_status = Some(device.read_interrupt_status(target)?),
            Operation::InterruptCapture => report.int_capture = Some(device.read_interrupt_capture(target)?),
            Operation::ResetInterrupts => device.reset_interrupts()?,
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use embedded_hal_1::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    use super::*;
    use crate::plan::{OpKind, Request};
    use crate::registers;

    const ADDR: u8 = 0x20;

    fn run(request: Request<'_>, bus: &[I2cTransaction]) -> Result<Report, Error<ErrorKind>> {
        let _ = env_logger::builder().is_test(true).try_init();

        let plan = RequestPlan::build(&request).unwrap();
        let mut expectations = vec![I2cTransaction::write(
            ADDR,
            vec![registers::IOCON, registers::IOCON_DEFAULT],
        )];
        expectations.extend_from_slice(bus);

        let mut i2c = I2cMock::new(&expectations);
        let mut device = Mcp23017::new(i2c.clone(), plan.address()).unwrap();
        let result = dispatch(&mut device, &plan);
        i2c.done();
        result
    }

    #[test]
    fn pin_direction_then_read() {
        let request = Request {
            pin: Some("12"),
            operations: vec![(OpKind::Read, None), (OpKind::Direction, Some("1"))],
            ..Default::default()
        };
        let report = run(
            request,
            &[
                I2cTransaction::write_read(ADDR, vec![registers::IODIRB], vec![0x00]),
                I2cTransaction::write(ADDR, vec![registers::IODIRB, 0b0000_1000]),
                I2cTransaction::write_read(ADDR, vec![registers::GPIOB], vec![0b1111_0111]),
            ],
        )
        .unwrap();
        assert_eq!(
            report,
            Report {
                read: Some(0),
                ..Default::default()
            }
        );
    }

    #[test]
    fn port_write_is_direct() {
        let request = Request {
            port: Some("0"),
            operations: vec![(OpKind::Write, Some("0xFF"))],
            ..Default::default()
        };
        let report = run(request, &[I2cTransaction::write(ADDR, vec![registers::GPIOA, 0xFF])]).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn enable_interrupt_precedes_status_read() {
        let request = Request {
            pin: Some("5"),
            operations: vec![(OpKind::InterruptStatus, None), (OpKind::EnableInterrupts, Some("1"))],
            ..Default::default()
        };
        let report = run(
            request,
            &[
                I2cTransaction::write_read(ADDR, vec![registers::GPINTENA], vec![0x00]),
                I2cTransaction::write(ADDR, vec![registers::GPINTENA, 0b0001_0000]),
                I2cTransaction::write_read(ADDR, vec![registers::INTFA], vec![0b0001_0000]),
            ],
        )
        .unwrap();
        assert_eq!(report.int_status, Some(1));
        assert_eq!(report.read, None);
        assert_eq!(report.int_capture, None);
    }

    #[test]
    fn full_port_sequence() {
        let request = Request {
            port: Some("1"),
            operations: vec![
                (OpKind::ResetInterrupts, None),
                (OpKind::InterruptCapture, None),
                (OpKind::InterruptStatus, None),
                (OpKind::InterruptDefaults, Some("0x0F")),
                (OpKind::InterruptType, Some("0b11")),
                (OpKind::InterruptPolarity, Some("0")),
                (OpKind::MirrorInterrupts, Some("1")),
                (OpKind::EnableInterrupts, Some("0xF0")),
                (OpKind::Read, None),
                (OpKind::Write, Some("0x55")),
                (OpKind::Pullup, Some("0xFF")),
                (OpKind::Invert, Some("0")),
                (OpKind::Direction, Some("0xF0")),
            ],
            ..Default::default()
        };
        let report = run(
            request,
            &[
                I2cTransaction::write(ADDR, vec![registers::IODIRB, 0xF0]),
                I2cTransaction::write(ADDR, vec![registers::IPOLB, 0x00]),
                I2cTransaction::write(ADDR, vec![registers::GPPUB, 0xFF]),
                I2cTransaction::write(ADDR, vec![registers::GPIOB, 0x55]),
                I2cTransaction::write_read(ADDR, vec![registers::GPIOB], vec![0xA5]),
                I2cTransaction::write(ADDR, vec![registers::GPINTENB, 0xF0]),
                I2cTransaction::write_read(ADDR, vec![registers::IOCON], vec![0x22]),
                I2cTransaction::write(ADDR, vec![registers::IOCON, 0x62]),
                I2cTransaction::write_read(ADDR, vec![registers::IOCON], vec![0x62]),
                I2cTransaction::write(ADDR, vec![registers::IOCON, 0x60]),
                I2cTransaction::write(ADDR, vec![registers::INTCONB, 0x03]),
                I2cTransaction::write(ADDR, vec![registers::DEFVALB, 0x0F]),
                I2cTransaction::write_read(ADDR, vec![registers::INTFB], vec![0x10]),
                I2cTransaction::write_read(ADDR, vec![registers::INTCAPB], vec![0x20]),
                I2cTransaction::write_read(ADDR, vec![registers::INTCAPA], vec![0x00]),
                I2cTransaction::write_read(ADDR, vec![registers::INTCAPB], vec![0x20]),
            ],
        )
        .unwrap();
        assert_eq!(
            report,
            Report {
                read: Some(0xA5),
                int_status: Some(0x10),
                int_capture: Some(0x20),
            }
        );
    }

    #[test]
    fn transport_failure_stops_after_applied_writes() {
        let request = Request {
            port: Some("0"),
            operations: vec![
                (OpKind::Direction, Some("0")),
                (OpKind::Write, Some("1")),
                (OpKind::Read, None),
            ],
            ..Default::default()
        };
        let result = run(
            request,
            &[
                I2cTransaction::write(ADDR, vec![registers::IODIRA, 0x00]),
                I2cTransaction::write(ADDR, vec![registers::GPIOA, 0x01]).with_error(ErrorKind::Other),
            ],
        );
        assert!(matches!(result, Err(Error::Bus(ErrorKind::Other))));
    }

    #[test]
    fn report_entries_skip_absent() {
        let report = Report {
            read: None,
            int_status: Some(3),
            int_capture: Some(4),
        };
        assert_eq!(report.entries().collect::<Vec<_>>(), vec![("int_status", 3), ("int_capture", 4)]);
        assert!(Report::default().is_empty());
    }
}
