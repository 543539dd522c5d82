//! Text rendering of a [`Report`].

use crate::dispatch::Report;

/// Number base used for printed values.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Radix {
    #[default]
    Decimal,
    Hex,
    Binary,
}

impl Radix {
    pub fn format(self, value: u8) -> String {
        match self {
            Radix::Decimal => value.to_string(),
            Radix::Hex => format!("0x{:02x}", value),
            Radix::Binary => format!("0b{:08b}", value),
        }
    }
}

/// A single value prints bare; several print as `"key":"value"` pairs joined
/// by commas. An empty report renders as an empty string.
pub fn render(report: &Report, radix: Radix) -> String {
    let entries: Vec<_> = report.entries().collect();
    match entries.as_slice() {
        [(_, value)] => radix.format(*value),
        entries => entries
            .iter()
            .map(|(key, value)| format!("\"{}\":\"{}\"", key, radix.format(*value)))
            .collect::<Vec<_>>()
            .join(","),
    }
}
