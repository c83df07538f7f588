//! embedded-hal output adapter
//!
//! Lets any HAL with embedded-hal 1.0 pins drive a [`GpioScanPort`]. Only
//! infallible pins are accepted: the scan tick has nowhere to report a
//! failed line write.
//!
//! [`GpioScanPort`]: crate::GpioScanPort

use core::convert::Infallible;

use embedded_hal::digital::{OutputPin as EhOutputPin, PinState};
use rowscan_hal::{Level, OutputPin};

/// embedded-hal pin wrapper
///
/// Tracks the driven level itself, since reading it back through
/// embedded-hal needs `&mut` access.
pub struct EhPin<P> {
    pin: P,
    high: bool,
}

impl<P> EhPin<P>
where
    P: EhOutputPin<Error = Infallible>,
{
    /// Wrap `pin` and drive it to `initial`
    pub fn new(pin: P, initial: Level) -> Self {
        let mut wrapped = Self { pin, high: false };
        wrapped.set_level(initial);
        wrapped
    }

    /// Hand back the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> OutputPin for EhPin<P>
where
    P: EhOutputPin<Error = Infallible>,
{
    fn set_level(&mut self, level: Level) {
        self.high = level.into();
        match self.pin.set_state(PinState::from(self.high)) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}
