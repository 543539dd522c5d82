//! MCP23017 register access over a blocking `embedded-hal` I2C bus.
//!
//! Read-modify-write sequences are not atomic against other bus masters; the
//! device assumes it is the only one talking to the chip for its lifetime.

use embedded_hal_1::i2c::I2c;
use log::{debug, info};

use crate::bitfield;
use crate::error::Error;
use crate::registers::{self, regname, Function};
use crate::target::{Address, Pin, Port, Target};

/// One MCP23017 on an exclusively owned bus.
pub struct Mcp23017<I2C> {
    i2c: I2C,
    address: Address,
}

impl<I2C: I2c> Mcp23017<I2C> {
    /// Takes ownership of the bus and writes the default `IOCON` configuration,
    /// replacing whatever the chip had latched.
    pub fn new(i2c: I2C, address: Address) -> Result<Self, Error<I2C::Error>> {
        let mut this = Self { i2c, address };
        info!("init MCP23017 at {}, IOCON={:#04x}", address, registers::IOCON_DEFAULT);
        this.write_register(registers::IOCON, registers::IOCON_DEFAULT)?;
        Ok(this)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Gives the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0; 1];
        self.i2c
            .write_read(self.address.get(), &[reg], &mut buf)
            .map_err(Error::Bus)?;
        debug!("read {} ({:#04x}) = {:#04x}", regname(reg), reg, buf[0]);
        Ok(buf[0])
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        debug!("write {} ({:#04x}) = {:#04x}", regname(reg), reg, value);
        self.i2c.write(self.address.get(), &[reg, value]).map_err(Error::Bus)
    }

    fn update_register_bit(&mut self, reg: u8, bit: u8, value: bool) -> Result<(), Error<I2C::Error>> {
        let current = self.read_register(reg)?;
        self.write_register(reg, bitfield::set(current, bit, value))
    }

    /// Sets the bit of `pin` in the register of `function`, leaving the other
    /// seven pins of the port untouched.
    pub fn write_bit(&mut self, function: Function, pin: Pin, value: bool) -> Result<(), Error<I2C::Error>> {
        self.update_register_bit(function.register(pin.port()), pin.bit(), value)
    }

    /// Replaces the whole register of `function` for `port`.
    pub fn write_byte(&mut self, function: Function, port: Port, value: u8) -> Result<(), Error<I2C::Error>> {
        self.write_register(function.register(port), value)
    }

    pub fn read_bit(&mut self, function: Function, pin: Pin) -> Result<bool, Error<I2C::Error>> {
        let value = self.read_register(function.register(pin.port()))?;
        Ok(bitfield::test(value, pin.bit()))
    }

    pub fn read_byte(&mut self, function: Function, port: Port) -> Result<u8, Error<I2C::Error>> {
        self.read_register(function.register(port))
    }

    /// Writes `value` to `target`: a single bit (any non-zero value sets it)
    /// for a pin, the full byte for a port.
    pub fn write_target(&mut self, function: Function, target: Target, value: u8) -> Result<(), Error<I2C::Error>> {
        match target {
            Target::Pin(pin) => self.write_bit(function, pin, value != 0),
            Target::Port(port) => self.write_byte(function, port, value),
        }
    }

    /// Reads `target`: 0 or 1 for a pin, the full byte for a port.
    pub fn read_target(&mut self, function: Function, target: Target) -> Result<u8, Error<I2C::Error>> {
        match target {
            Target::Pin(pin) => self.read_bit(function, pin).map(u8::from),
            Target::Port(port) => self.read_byte(function, port),
        }
    }

    /// 1 = input, 0 = output.
    pub fn set_direction(&mut self, target: Target, value: u8) -> Result<(), Error<I2C::Error>> {
        self.write_target(Function::Direction, target, value)
    }

    /// 1 = the data register reflects the inverted pin level.
    pub fn invert(&mut self, target: Target, value: u8) -> Result<(), Error<I2C::Error>> {
        self.write_target(Function::Polarity, target, value)
    }

    /// 1 = internal 100k pull-up enabled.
    pub fn set_pullup(&mut self, target: Target, value: u8) -> Result<(), Error<I2C::Error>> {
        self.write_target(Function::PullUp, target, value)
    }

    pub fn write(&mut self, target: Target, value: u8) -> Result<(), Error<I2C::Error>> {
        self.write_target(Function::Data, target, value)
    }

    pub fn read(&mut self, target: Target) -> Result<u8, Error<I2C::Error>> {
        self.read_target(Function::Data, target)
    }

    /// Enables interrupt-on-change.
    pub fn set_interrupt(&mut self, target: Target, value: u8) -> Result<(), Error<I2C::Error>> {
        self.write_target(Function::InterruptEnable, target, value)
    }

    /// 1 = interrupt when the pin matches `DEFVAL`, 0 = interrupt on any change.
    pub fn set_interrupt_type(&mut self, target: Target, value: u8) -> Result<(), Error<I2C::Error>> {
        self.write_target(Function::InterruptControl, target, value)
    }

    /// Compare value for pins whose interrupt type is "match default".
    pub fn set_interrupt_defaults(&mut self, target: Target, value: u8) -> Result<(), Error<I2C::Error>> {
        self.write_target(Function::InterruptDefault, target, value)
    }

    pub fn read_interrupt_status(&mut self, target: Target) -> Result<u8, Error<I2C::Error>> {
        self.read_target(Function::InterruptFlag, target)
    }

    /// Port value latched at the time of the last interrupt.
    pub fn read_interrupt_capture(&mut self, target: Target) -> Result<u8, Error<I2C::Error>> {
        self.read_target(Function::InterruptCapture, target)
    }

    /// `true` ties INTA and INTB together.
    pub fn mirror_interrupts(&mut self, value: bool) -> Result<(), Error<I2C::Error>> {
        self.update_register_bit(registers::IOCON, registers::IOCON_MIRROR, value)
    }

    /// `true` = active-high INT outputs, `false` = active-low.
    pub fn set_interrupt_polarity(&mut self, value: bool) -> Result<(), Error<I2C::Error>> {
        self.update_register_bit(registers::IOCON, registers::IOCON_INTPOL, value)
    }

    /// Clears pending interrupts by reading both capture registers.
    pub fn reset_interrupts(&mut self) -> Result<(), Error<I2C::Error>> {
        self.read_byte(Function::InterruptCapture, Port::Low)?;
        self.read_byte(Function::InterruptCapture, Port::High)?;
        Ok(())
    }
}
