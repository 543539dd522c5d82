//! `/dev/i2c-N` bus handle implementing the blocking `embedded-hal` I2C trait.
//!
//! Each `transaction` is issued as a single `I2C_RDWR` ioctl, so the
//! operations of a transaction are separated by repeated starts.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::io::AsRawFd;

use embedded_hal_1::i2c::{self, ErrorKind, NoAcknowledgeSource, Operation, SevenBitAddress};
use log::debug;

const I2C_RDWR: u32 = 0x0707;
const I2C_M_RD: u16 = 0x0001;

#[repr(C)]
struct I2cMsg {
    addr: u16,
    flags: u16,
    len: u16,
    buf: *mut u8,
}

#[repr(C)]
struct I2cRdwrIoctlData {
    msgs: *mut I2cMsg,
    nmsgs: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("could not open {path}: {source}")]
    Open { path: String, source: io::Error },
    #[error("transfer failed: {0}")]
    Transfer(io::Error),
    #[error("buffer of {0} bytes exceeds a single I2C message")]
    Oversized(usize),
}

impl i2c::Error for BusError {
    fn kind(&self) -> ErrorKind {
        match self {
            BusError::Transfer(err) => match err.raw_os_error() {
                Some(libc::ENXIO) | Some(libc::EREMOTEIO) => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown),
                _ => ErrorKind::Other,
            },
            _ => ErrorKind::Other,
        }
    }
}

pub struct I2cDev {
    file: File,
    bus: u8,
}

impl I2cDev {
    pub fn open(bus: u8) -> Result<Self, BusError> {
        let path = format!("/dev/i2c-{}", bus);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| BusError::Open { path, source })?;
        debug!("opened /dev/i2c-{}", bus);
        Ok(Self { file, bus })
    }

    pub fn bus(&self) -> u8 {
        self.bus
    }
}

impl i2c::ErrorType for I2cDev {
    type Error = BusError;
}

impl i2c::I2c<SevenBitAddress> for I2cDev {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        if operations.is_empty() {
            return Ok(());
        }

        let mut msgs = operations
            .iter_mut()
            .map(|op| -> Result<I2cMsg, BusError> {
                let (flags, len, buf) = match op {
                    Operation::Read(buf) => (I2C_M_RD, buf.len(), buf.as_mut_ptr()),
                    // the kernel does not write to buffers without I2C_M_RD
                    Operation::Write(buf) => (0, buf.len(), buf.as_ptr() as *mut u8),
                };
                let len = u16::try_from(len).map_err(|_| BusError::Oversized(len))?;
                Ok(I2cMsg {
                    addr: address.into(),
                    flags,
                    len,
                    buf,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut data = I2cRdwrIoctlData {
            msgs: msgs.as_mut_ptr(),
            nmsgs: msgs.len() as u32,
        };

        // SAFETY: every message points into a buffer borrowed from `operations`,
        // which outlives the call, with its exact length.
        let ret = unsafe { libc::ioctl(self.file.as_raw_fd(), I2C_RDWR as _, &mut data as *mut I2cRdwrIoctlData) };
        if ret < 0 {
            return Err(BusError::Transfer(io::Error::last_os_error()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal_1::i2c::Error as _;

    use super::*;

    #[test]
    fn error_kinds() {
        let nack = BusError::Transfer(io::Error::from_raw_os_error(libc::ENXIO));
        assert_eq!(nack.kind(), ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown));

        let remote = BusError::Transfer(io::Error::from_raw_os_error(libc::EREMOTEIO));
        assert_eq!(remote.kind(), ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown));

        let other = BusError::Transfer(io::Error::from_raw_os_error(libc::EIO));
        assert_eq!(other.kind(), ErrorKind::Other);
    }

    #[test]
    fn open_missing_bus() {
        match I2cDev::open(250) {
            Err(BusError::Open { path, .. }) => assert_eq!(path, "/dev/i2c-250"),
            Err(e) => panic!("unexpected error {}", e),
            Ok(_) => {}
        }
    }
}
