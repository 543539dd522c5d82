use std::process;

use clap::Parser;
use iopi::output::{self, Radix};
use iopi::{Error, OpKind, Report, Request};

/// Command line interface for the IO Pi (MCP23017) port expander.
///
/// Port 0 controls pins 1 to 8 while port 1 controls pins 9 to 16. When
/// writing to or reading from a port the least significant bit is the lowest
/// numbered pin on the selected port. Numbers may be decimal, 0x hex or 0b binary.
#[derive(Parser, Debug)]
#[clap(version, about)]
struct Opts {
    /// I2C address of the chip, 0x20 to 0x27
    #[clap(short = 'a', long)]
    address: Option<String>,
    /// Port to operate on, 0 or 1
    #[clap(short = 'p', long)]
    port: Option<String>,
    /// Pin to operate on, 1 to 16
    #[clap(short = 'n', long)]
    pin: Option<String>,
    /// Read the pin or port
    #[clap(short = 'r', long)]
    read: bool,
    /// Write a value to the pin or port
    #[clap(short = 'w', long)]
    write: Option<String>,
    /// Set direction, 1 = input, 0 = output
    #[clap(short = 'd', long)]
    direction: Option<String>,
    /// Invert input polarity, 1 = inverted
    #[clap(short = 'i', long)]
    invert: Option<String>,
    /// Enable internal 100k pull-ups, 1 = enabled
    #[clap(short = 'u', long)]
    pullup: Option<String>,
    /// Connect the INTA and INTB pins, 1 = mirrored
    #[clap(short = 'm', long)]
    mirrorinterrupts: Option<String>,
    /// Polarity of the INT pins, 1 = active-high, 0 = active-low
    #[clap(short = 'l', long)]
    interruptpolarity: Option<String>,
    /// Interrupt type, 1 = match default value, 0 = on change
    #[clap(short = 't', long)]
    interrupttype: Option<String>,
    /// Compare value for interrupt-on-default pins
    #[clap(short = 'f', long = "int_defaults")]
    int_defaults: Option<String>,
    /// Enable interrupt-on-change
    #[clap(short = 'e', long)]
    enableinterrupts: Option<String>,
    /// Read the interrupt status
    #[clap(short = 's', long = "int_status")]
    int_status: bool,
    /// Read the value captured at the last interrupt
    #[clap(short = 'c', long = "int_capture")]
    int_capture: bool,
    /// Reset pending interrupts
    #[clap(short = 'z', long)]
    resetinterrupts: bool,
    /// Print values in binary, unless --hex is also given
    #[clap(short = 'b', long)]
    binary: bool,
    /// Print values in hexadecimal
    #[clap(short = 'x', long)]
    hex: bool,
    /// I2C bus number, detected from the host when omitted
    #[clap(long, env = "IOPI_I2C_BUS")]
    bus: Option<u8>,
}

impl Opts {
    fn request(&self) -> Request<'_> {
        let values = [
            (OpKind::Direction, &self.direction),
            (OpKind::Invert, &self.invert),
            (OpKind::Pullup, &self.pullup),
            (OpKind::Write, &self.write),
            (OpKind::EnableInterrupts, &self.enableinterrupts),
            (OpKind::MirrorInterrupts, &self.mirrorinterrupts),
            (OpKind::InterruptPolarity, &self.interruptpolarity),
            (OpKind::InterruptType, &self.interrupttype),
            (OpKind::InterruptDefaults, &self.int_defaults),
        ];
        let flags = [
            (OpKind::Read, self.read),
            (OpKind::InterruptStatus, self.int_status),
            (OpKind::InterruptCapture, self.int_capture),
            (OpKind::ResetInterrupts, self.resetinterrupts),
        ];

        let operations = values
            .into_iter()
            .filter_map(|(kind, raw)| raw.as_deref().map(|raw| (kind, Some(raw))))
            .chain(flags.into_iter().filter(|&(_, set)| set).map(|(kind, _)| (kind, None)))
            .collect();

        Request {
            address: self.address.as_deref(),
            port: self.port.as_deref(),
            pin: self.pin.as_deref(),
            operations,
        }
    }

    fn radix(&self) -> Radix {
        if self.hex {
            Radix::Hex
        } else if self.binary {
            Radix::Binary
        } else {
            Radix::Decimal
        }
    }
}

#[cfg(target_os = "linux")]
fn run(opts: &Opts) -> Result<Report, Error<iopi::linux::BusError>> {
    use iopi::linux::I2cDev;
    use iopi::{dispatch, host, Mcp23017, RequestPlan};

    let plan = RequestPlan::build(&opts.request())?;

    let bus = opts.bus.unwrap_or_else(host::detect_bus);
    let i2c = I2cDev::open(bus).map_err(Error::Bus)?;
    log::info!("using i2c bus {}", i2c.bus());

    let mut device = Mcp23017::new(i2c, plan.address())?;
    dispatch(&mut device, &plan)
}

#[cfg(not(target_os = "linux"))]
fn run(opts: &Opts) -> Result<Report, Error<&'static str>> {
    iopi::RequestPlan::build(&opts.request())?;
    Err(Error::Bus("no i2c-dev transport on this platform"))
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .format_timestamp_nanos()
        .parse_default_env()
        .init();

    let opts = Opts::parse();
    log::debug!("{:?}", opts);

    match run(&opts) {
        Ok(report) => {
            if !report.is_empty() {
                println!("{}", output::render(&report, opts.radix()));
            }
        }
        Err(e) => {
            match &e {
                Error::Validation(err) => eprintln!("{}", err),
                Error::Bus(err) => eprintln!("I2C bus error: {}", err),
            }
            process::exit(e.exit_code());
        }
    }
}
