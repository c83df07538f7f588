//! Row multiplexer address bus
//!
//! A binary multiplexer selects a row from `A` address lines. While the
//! lines change, every intermediate combination is itself a row, so a bus
//! that switches one line at a time briefly selects rows it was never asked
//! for. Chips that expose a whole GPIO bank as one register can switch all
//! lines in a single write; [`AddressBus::is_atomic`] tells the two apart.

/// Address lines of a row multiplexer
pub trait AddressBus {
    /// Number of distinct addresses the wired lines can express
    fn capacity(&self) -> usize;

    /// Drive the lines to `address`
    ///
    /// Bits beyond the wired lines are dropped, so the multiplexer sees
    /// `address % capacity()`.
    fn write(&mut self, address: u8);

    /// Check whether [`write`](AddressBus::write) changes every line at
    /// the same instant
    fn is_atomic(&self) -> bool;
}

impl<B: AddressBus + ?Sized> AddressBus for &mut B {
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn write(&mut self, address: u8) {
        (**self).write(address);
    }

    fn is_atomic(&self) -> bool {
        (**self).is_atomic()
    }
}

/// Number of addresses `lines` binary address lines can express
pub const fn line_capacity(lines: usize) -> usize {
    if lines >= usize::BITS as usize {
        usize::MAX
    } else {
        1 << lines
    }
}

/// Register mask of the lines asserted for `address`
///
/// `pins[i]` is the register bit that carries address bit `i`. Address bits
/// without a pin are dropped.
pub fn line_mask(pins: &[u8], address: u8) -> u32 {
    pins.iter()
        .take(8)
        .enumerate()
        .filter(|&(bit, _)| address & (1 << bit) != 0)
        .fold(0, |mask, (_, &pin)| mask | (1u32 << (pin & 31)))
}

/// Register mask of every line in `pins`
pub fn bus_mask(pins: &[u8]) -> u32 {
    pins.iter().fold(0, |mask, &pin| mask | (1u32 << (pin & 31)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_capacity() {
        assert_eq!(line_capacity(0), 1);
        assert_eq!(line_capacity(3), 8);
        assert_eq!(line_capacity(8), 256);
        assert_eq!(line_capacity(usize::BITS as usize), usize::MAX);
    }

    #[test]
    fn test_line_mask_on_scattered_pins() {
        // A0..A2 on GPIO2..4
        let pins = [2, 3, 4];
        assert_eq!(line_mask(&pins, 0), 0);
        assert_eq!(line_mask(&pins, 7), 0b1_1100);
        assert_eq!(line_mask(&pins, 2), 0b0_1000);

        // Bits without a pin never reach the register
        assert_eq!(line_mask(&pins, 0xFA), line_mask(&pins, 2));

        let pins = [7, 0];
        assert_eq!(line_mask(&pins, 1), 1 << 7);
        assert_eq!(line_mask(&pins, 2), 1);
    }

    #[test]
    fn test_bus_mask() {
        assert_eq!(bus_mask(&[2, 3, 4]), 0b1_1100);
        assert_eq!(bus_mask(&[]), 0);
    }

    /// One-register bus: the whole pattern lands in a single store
    struct RegisterBus {
        pins: [u8; 3],
        register: u32,
        stores: usize,
    }

    impl AddressBus for RegisterBus {
        fn capacity(&self) -> usize {
            line_capacity(self.pins.len())
        }

        fn write(&mut self, address: u8) {
            let mask = bus_mask(&self.pins);
            self.register = (self.register & !mask) | line_mask(&self.pins, address);
            self.stores += 1;
        }

        fn is_atomic(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_bus_through_reference() {
        let mut bus = RegisterBus {
            pins: [0, 1, 2],
            register: 1 << 9,
            stores: 0,
        };
        fn select<B: AddressBus>(mut bus: B, address: u8) -> (usize, bool) {
            bus.write(address);
            (bus.capacity(), bus.is_atomic())
        }

        assert_eq!(select(&mut bus, 0xFF), (8, true));
        assert_eq!(bus.register, (1 << 9) | 0b111);
        assert_eq!(bus.stores, 1);
    }
}
