//! Vsync notification
//!
//! After the last row the scanner spends one tick dark. During that slot
//! the host is told which frame just finished, which is the natural (not
//! mandatory) moment to hand over the next frame.

/// Host logic run from the blank slot
///
/// Runs inside the scan tick: keep it short and non-blocking. Either write
/// the next frame right away or just flag that one is wanted.
pub trait VsyncHandler {
    /// Called once per scan cycle with the number of the finished frame
    fn on_vsync(&mut self, frame: u32);
}

impl<F: FnMut(u32)> VsyncHandler for F {
    fn on_vsync(&mut self, frame: u32) {
        self(frame)
    }
}

/// Handler that ignores vsync
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVsync;

impl VsyncHandler for NoVsync {
    fn on_vsync(&mut self, _frame: u32) {}
}

/// Frame counter plus the host's vsync handler
#[derive(Debug)]
pub struct VsyncNotifier<V> {
    handler: V,
    frame_counter: u32,
}

impl<V: VsyncHandler> VsyncNotifier<V> {
    /// Create a notifier starting at frame 0
    pub const fn new(handler: V) -> Self {
        Self::starting_at(handler, 0)
    }

    /// Create a notifier starting at an arbitrary frame number
    pub const fn starting_at(handler: V, frame_counter: u32) -> Self {
        Self {
            handler,
            frame_counter,
        }
    }

    /// Pass the current frame number to the handler, then advance it
    pub fn notify(&mut self) {
        self.handler.on_vsync(self.frame_counter);
        self.frame_counter = self.frame_counter.wrapping_add(1);
    }

    /// Number the next notification will carry
    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    /// Access the handler
    pub fn handler(&self) -> &V {
        &self.handler
    }

    /// Mutable access to the handler
    pub fn handler_mut(&mut self) -> &mut V {
        &mut self.handler
    }
}
