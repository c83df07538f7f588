//! Scan output port
//!
//! Everything the row scanner does to the panel goes through this trait.

/// Output lines of a row-multiplexed panel
///
/// One column shift register chain shares a clock with its data line; the
/// row multiplexer takes a binary address. Whether "blank" is a reserved
/// address or a separate enable line is decided by the scanner's
/// [`RowActivation`](crate::scanner::RowActivation), not by the port.
///
/// All methods are called from the scan tick and must complete in bounded
/// time without blocking.
pub trait ScanPort {
    /// Present one column bit and pulse the shift clock once
    fn shift_bit(&mut self, lit: bool);

    /// Transfer the shifted bits to the column outputs
    ///
    /// Only needed for registers with a separate storage latch; continuously
    /// driven registers leave this as a no-op.
    fn latch(&mut self) {}

    /// Drive the row multiplexer address lines
    ///
    /// Implementations should change all address lines together where the
    /// hardware allows it, and report it through
    /// [`address_is_atomic`](ScanPort::address_is_atomic).
    fn set_row_address(&mut self, address: u8);

    /// Number of distinct addresses the wired lines can select
    ///
    /// Addresses are reduced modulo this on the wire. `None` means the full
    /// 8-bit address reaches the multiplexer.
    fn address_capacity(&self) -> Option<usize> {
        None
    }

    /// Check whether [`set_row_address`](ScanPort::set_row_address) moves
    /// straight to the new address without passing through others
    fn address_is_atomic(&self) -> bool {
        true
    }

    /// Drive the row output-enable line, if the panel has one
    fn set_output_enable(&mut self, enabled: bool);
}

impl<P: ScanPort + ?Sized> ScanPort for &mut P {
    fn shift_bit(&mut self, lit: bool) {
        (**self).shift_bit(lit);
    }

    fn latch(&mut self) {
        (**self).latch();
    }

    fn set_row_address(&mut self, address: u8) {
        (**self).set_row_address(address);
    }

    fn address_capacity(&self) -> Option<usize> {
        (**self).address_capacity()
    }

    fn address_is_atomic(&self) -> bool {
        (**self).address_is_atomic()
    }

    fn set_output_enable(&mut self, enabled: bool) {
        (**self).set_output_enable(enabled);
    }
}
