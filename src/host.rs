//! I2C bus number selection for the boards the IO Pi is used with.

/// Bus used when the host is not recognised.
pub const DEFAULT_BUS: u8 = 1;

/// Bus number for a board identified by its hostname. On a Raspberry Pi the
/// `/proc/cpuinfo` text tells the original revision 1 boards (bus 0) apart.
pub fn bus_for_host(hostname: &str, cpuinfo: Option<&str>) -> u8 {
    match hostname {
        "orangepione" | "orangepiplus" => 0,
        "linaro-alip" => 1,
        "raspberrypi" => match cpuinfo.and_then(revision) {
            Some(rev) if rev.ends_with("0002") || rev.ends_with("0003") => 0,
            _ => 1,
        },
        _ => DEFAULT_BUS,
    }
}

fn revision(cpuinfo: &str) -> Option<&str> {
    cpuinfo.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        (name.trim() == "Revision").then(|| value.trim())
    })
}

/// Picks the bus for the running host.
#[cfg(target_os = "linux")]
pub fn detect_bus() -> u8 {
    let hostname = match nix::unistd::gethostname() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(e) => {
            log::warn!("gethostname failed: {}, using bus {}", e, DEFAULT_BUS);
            return DEFAULT_BUS;
        }
    };
    let cpuinfo = if hostname == "raspberrypi" {
        std::fs::read_to_string("/proc/cpuinfo").ok()
    } else {
        None
    };
    let bus = bus_for_host(&hostname, cpuinfo.as_deref());
    log::debug!("host {:?} uses i2c bus {}", hostname, bus);
    bus
}
