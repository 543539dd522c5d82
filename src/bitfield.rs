//! Single-bit helpers on register bytes.
//!
//! Bit 0 is the least significant bit and maps to the lowest numbered pin of a
//! port.

/// Returns `true` if bit `bit` of `byte` is set.
pub const fn test(byte: u8, bit: u8) -> bool {
    byte & (1 << bit) != 0
}

/// Returns `byte` with bit `bit` forced to `value`. Other bits are unchanged.
///
/// `bit` must be in `0..8`.
pub const fn set(byte: u8, bit: u8, value: bool) -> u8 {
    if value {
        byte | (1 << bit)
    } else {
        byte & !(1 << bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_test_every_bit_of_every_byte() {
        for byte in 0..=u8::MAX {
            for bit in 0..8 {
                let high = set(byte, bit, true);
                assert!(test(high, bit));
                assert_eq!((high ^ byte) & !(1 << bit), 0);

                let low = set(byte, bit, false);
                assert!(!test(low, bit));
                assert_eq!((low ^ byte) & !(1 << bit), 0);
            }
        }
    }

    #[test]
    fn test_reads_lsb_as_bit_zero() {
        assert!(test(0b0000_0001, 0));
        assert!(!test(0b0000_0001, 1));
        assert!(test(0b1000_0000, 7));
    }

    #[test]
    fn set_is_idempotent() {
        assert_eq!(set(0x22, 1, true), 0x22);
        assert_eq!(set(0x22, 6, true), 0x62);
        assert_eq!(set(0x62, 6, false), 0x22);
    }
}
