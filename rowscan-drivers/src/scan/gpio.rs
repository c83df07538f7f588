//! Bit-banged scan port
//!
//! Drives a column shift register from plain output lines and the row
//! multiplexer through an [`AddressBus`]:
//!
//! ```text
//!  DATA  ──────┐                    ┌── A0 ┐
//!  SCLK  ──────┤ shift register     ├── A1 ├─ row multiplexer (address bus)
//!  LATCH ──────┘ (W columns)        └── A2 ┘
//!  EN    ─────────────────────────────────── row driver enable (optional)
//! ```
//!
//! The shift register takes data on the rising clock edge. Boards without
//! a separate latch (outputs follow the register directly) leave it out,
//! which is safe because the scanner only shifts while the panel is blank.
//!
//! Blanking by a sentinel address needs a bus that switches every address
//! line at once; a [`PinBus`](super::PinBus) only suits boards with an
//! enable line, and the driver refuses the other combination.

use rowscan_core::ScanPort;
use rowscan_hal::{AddressBus, OutputPin, Polarity};

/// Line polarities of a scan port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanPolarity {
    /// Level of a data bit that lights its LED
    pub data: Polarity,
    /// Level of the enable line that lets the row drivers conduct
    pub enable: Polarity,
}

/// Scan port on GPIO lines with a row address bus `B`
///
/// All single lines share one pin type; on most HALs that is the
/// type-erased output.
pub struct GpioScanPort<P, B> {
    data: P,
    clock: P,
    latch: Option<P>,
    address: B,
    enable: Option<P>,
    polarity: ScanPolarity,
}

impl<P: OutputPin, B: AddressBus> GpioScanPort<P, B> {
    /// Create a port and drive every line to its idle level
    ///
    /// Idle means clock and latch low, data released and the enable line
    /// (if any) deasserted. The address bus is left as it was handed over.
    pub fn new(
        data: P,
        clock: P,
        latch: Option<P>,
        address: B,
        enable: Option<P>,
        polarity: ScanPolarity,
    ) -> Self {
        let mut port = Self {
            data,
            clock,
            latch,
            address,
            enable,
            polarity,
        };
        port.data.assert(polarity.data, false);
        port.clock.set_low();
        if let Some(latch) = port.latch.as_mut() {
            latch.set_low();
        }
        if let Some(enable) = port.enable.as_mut() {
            enable.assert(polarity.enable, false);
        }
        port
    }

    /// Shift register and multiplexer only, active-high data
    pub fn with_address_bus(data: P, clock: P, address: B) -> Self {
        Self::new(data, clock, None, address, None, ScanPolarity::default())
    }

    /// Row address bus
    pub fn address_bus(&self) -> &B {
        &self.address
    }

    /// Check whether a dedicated enable line is wired
    pub fn has_enable_line(&self) -> bool {
        self.enable.is_some()
    }

    /// Line polarities
    pub fn polarity(&self) -> ScanPolarity {
        self.polarity
    }

    /// Hand back all lines
    pub fn release(self) -> (P, P, Option<P>, B, Option<P>) {
        (self.data, self.clock, self.latch, self.address, self.enable)
    }
}

impl<P: OutputPin, B: AddressBus> ScanPort for GpioScanPort<P, B> {
    fn shift_bit(&mut self, lit: bool) {
        self.clock.set_low();
        self.data.assert(self.polarity.data, lit);
        self.clock.set_high();
    }

    fn latch(&mut self) {
        if let Some(latch) = self.latch.as_mut() {
            latch.set_high();
            latch.set_low();
        }
    }

    fn set_row_address(&mut self, address: u8) {
        self.address.write(address);
    }

    fn address_capacity(&self) -> Option<usize> {
        Some(self.address.capacity())
    }

    fn address_is_atomic(&self) -> bool {
        self.address.is_atomic()
    }

    fn set_output_enable(&mut self, enabled: bool) {
        if let Some(enable) = self.enable.as_mut() {
            enable.assert(self.polarity.enable, enabled);
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::scan::PinBus;
    use rowscan_core::{
        Binary, ConfigError, DriverConfig, FrameStore, LedDriver, NoVsync, RowActivation,
        ScanConfig,
    };
    use rowscan_hal::bus::line_capacity;
    use rowscan_hal::{Level, PeriodicTimer, TickPeriod};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    /// Shared log of (line, level) writes
    type Trace = Rc<RefCell<Vec<(&'static str, bool)>>>;

    /// Mock GPIO pin for testing
    struct MockPin {
        name: &'static str,
        high: bool,
        trace: Trace,
    }

    impl MockPin {
        fn new(name: &'static str, trace: &Trace) -> Self {
            Self {
                name,
                high: false,
                trace: trace.clone(),
            }
        }
    }

    impl OutputPin for MockPin {
        fn set_level(&mut self, level: Level) {
            self.high = level.into();
            self.trace.borrow_mut().push((self.name, self.high));
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    /// Address bus that lands each address in one store, like a GPIO
    /// output register
    struct RegisterBus<const A: usize> {
        /// Every value the multiplexer has seen, in order
        seen: Vec<usize>,
    }

    impl<const A: usize> RegisterBus<A> {
        fn new() -> Self {
            Self {
                seen: std::vec![0],
            }
        }

        fn address(&self) -> usize {
            self.seen.last().copied().unwrap_or(0)
        }
    }

    impl<const A: usize> AddressBus for RegisterBus<A> {
        fn capacity(&self) -> usize {
            line_capacity(A)
        }

        fn write(&mut self, address: u8) {
            let wired = address as usize % self.capacity();
            self.seen.push(wired);
        }

        fn is_atomic(&self) -> bool {
            true
        }
    }

    #[derive(Default)]
    struct NullTimer(bool);

    impl PeriodicTimer for NullTimer {
        fn arm(&mut self, _period: TickPeriod) {
            self.0 = true;
        }

        fn detach(&mut self) {
            self.0 = false;
        }

        fn is_armed(&self) -> bool {
            self.0
        }
    }

    type PinPort = GpioScanPort<MockPin, PinBus<MockPin, 3>>;

    fn port(trace: &Trace, polarity: ScanPolarity) -> PinPort {
        GpioScanPort::new(
            MockPin::new("data", trace),
            MockPin::new("clk", trace),
            Some(MockPin::new("lat", trace)),
            PinBus::new([
                MockPin::new("a0", trace),
                MockPin::new("a1", trace),
                MockPin::new("a2", trace),
            ]),
            Some(MockPin::new("en", trace)),
            polarity,
        )
    }

    fn register_port(trace: &Trace) -> GpioScanPort<MockPin, RegisterBus<3>> {
        GpioScanPort::with_address_bus(
            MockPin::new("data", trace),
            MockPin::new("clk", trace),
            RegisterBus::new(),
        )
    }

    fn direct_enable() -> DriverConfig {
        DriverConfig {
            scan: ScanConfig {
                activation: RowActivation::DirectEnableLine,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn blank_on(blank_address: u8) -> DriverConfig {
        DriverConfig {
            scan: ScanConfig {
                activation: RowActivation::BlankThenSelect { blank_address },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_levels() {
        let trace = Trace::default();
        let port = port(
            &trace,
            ScanPolarity {
                data: Polarity::ActiveLow,
                enable: Polarity::ActiveLow,
            },
        );

        // Released active-low lines sit high
        assert!(port.data.is_set_high());
        assert!(port.enable.as_ref().unwrap().is_set_high());
        assert!(!port.clock.is_set_high());
        assert_eq!(port.address_bus().address(), 0);
        assert_eq!(port.address_capacity(), Some(8));
        assert!(!port.address_is_atomic());
    }

    #[test]
    fn test_shift_bit_clocks_on_rising_edge() {
        let trace = Trace::default();
        let mut port = port(&trace, ScanPolarity::default());
        trace.borrow_mut().clear();

        port.shift_bit(true);
        port.shift_bit(false);
        assert_eq!(
            *trace.borrow(),
            [
                ("clk", false),
                ("data", true),
                ("clk", true),
                ("clk", false),
                ("data", false),
                ("clk", true),
            ]
        );
    }

    #[test]
    fn test_active_low_data() {
        let trace = Trace::default();
        let mut port = port(
            &trace,
            ScanPolarity {
                data: Polarity::ActiveLow,
                ..Default::default()
            },
        );

        port.shift_bit(true);
        assert!(!port.data.is_set_high());
        port.shift_bit(false);
        assert!(port.data.is_set_high());
    }

    #[test]
    fn test_latch_pulse() {
        let trace = Trace::default();
        let mut port = port(&trace, ScanPolarity::default());
        trace.borrow_mut().clear();

        port.latch();
        assert_eq!(*trace.borrow(), [("lat", true), ("lat", false)]);
    }

    #[test]
    fn test_row_address_goes_to_bus() {
        let trace = Trace::default();
        let mut port = port(&trace, ScanPolarity::default());

        for address in 0..8 {
            port.set_row_address(address);
            assert_eq!(port.address_bus().address(), address as usize);
        }
        port.set_row_address(0xFD);
        assert_eq!(port.address_bus().address(), 0b101);
    }

    #[test]
    fn test_enable_polarity() {
        let trace = Trace::default();
        let mut port = port(
            &trace,
            ScanPolarity {
                enable: Polarity::ActiveLow,
                ..Default::default()
            },
        );

        port.set_output_enable(true);
        assert!(!port.enable.as_ref().unwrap().is_set_high());
        port.set_output_enable(false);
        assert!(port.enable.as_ref().unwrap().is_set_high());
    }

    #[test]
    fn test_without_optional_lines() {
        let trace = Trace::default();
        let mut port = GpioScanPort::with_address_bus(
            MockPin::new("data", &trace),
            MockPin::new("clk", &trace),
            PinBus::new([MockPin::new("a0", &trace), MockPin::new("a1", &trace)]),
        );
        assert!(!port.has_enable_line());
        assert_eq!(port.address_capacity(), Some(4));
        trace.borrow_mut().clear();

        port.latch();
        port.set_output_enable(true);
        assert!(trace.borrow().is_empty());
    }

    #[test]
    fn test_default_sentinel_rejected_on_eight_rows() {
        // 0xFF reaches three lines as 7, which is the last row
        let trace = Trace::default();
        let store = FrameStore::<1, 8>::new();
        let result = LedDriver::<_, _, _, _, _, 1, 8>::init(
            &store,
            Binary,
            register_port(&trace),
            NullTimer::default(),
            NoVsync,
            DriverConfig::default(),
        );
        assert!(matches!(result, Err(ConfigError::BlankAddressCollides)));
    }

    #[test]
    fn test_line_by_line_bus_needs_enable_line() {
        let trace = Trace::default();
        let store = FrameStore::<3, 7>::new();
        let result = LedDriver::<_, _, _, _, _, 3, 7>::init(
            &store,
            Binary,
            port(&trace, ScanPolarity::default()),
            NullTimer::default(),
            NoVsync,
            blank_on(7),
        );
        assert!(matches!(result, Err(ConfigError::AddressNotAtomic)));

        let mut driver = LedDriver::<_, _, _, _, _, 3, 7>::init(
            &store,
            Binary,
            port(&trace, ScanPolarity::default()),
            NullTimer::default(),
            NoVsync,
            direct_enable(),
        )
        .unwrap();
        driver.enable();
        driver.on_tick();
        driver.on_tick();

        // Address lines only move while the enable line is off
        let mut enabled = false;
        for &(name, level) in trace.borrow().iter() {
            match name {
                "en" => enabled = level,
                "a0" | "a1" | "a2" => assert!(!enabled),
                _ => {}
            }
        }
        assert_eq!(driver.port().address_bus().address(), 1);
    }

    #[test]
    fn test_sentinel_to_row_never_selects_other_rows() {
        let trace = Trace::default();
        let store = FrameStore::<3, 7>::new();
        let mut driver = LedDriver::<_, _, _, _, _, 3, 7>::init(
            &store,
            Binary,
            register_port(&trace),
            NullTimer::default(),
            NoVsync,
            blank_on(7),
        )
        .unwrap();
        driver.enable();
        for _ in 0..8 {
            driver.on_tick();
        }

        // Init and enable blank, then each row sits between two blanks
        let seen = &driver.port().address_bus().seen;
        assert_eq!(
            seen[..],
            [0, 7, 7, 7, 0, 7, 1, 7, 2, 7, 3, 7, 4, 7, 5, 7, 6, 7]
        );
    }

    #[test]
    fn test_driver_scans_through_gpio() {
        let trace = Trace::default();
        let store = FrameStore::<3, 7>::new();
        let mut driver = LedDriver::<_, _, _, _, _, 3, 7>::init(
            &store,
            Binary,
            register_port(&trace),
            NullTimer::default(),
            NoVsync,
            blank_on(7),
        )
        .unwrap();
        assert_eq!(driver.port().address_bus().address(), 7);

        let mut frame = [0u8; 21];
        frame[2 * 3 + 1] = 200;
        driver.write_framebuffer(&frame).unwrap();
        driver.enable();

        driver.on_tick();
        driver.on_tick();
        trace.borrow_mut().clear();
        driver.on_tick();

        let data: Vec<bool> = trace
            .borrow()
            .iter()
            .filter(|(name, _)| *name == "data")
            .map(|&(_, level)| level)
            .collect();
        assert_eq!(data, [false, true, false]);
        assert_eq!(driver.port().address_bus().address(), 2);

        driver.disable();
        assert_eq!(driver.port().address_bus().address(), 7);
    }
}
