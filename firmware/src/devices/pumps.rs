use embedded_hal::digital::{OutputPin, PinState};

/// Bank of pump outputs, switched from the pump bitmask.
///
/// Bit `i` of the bitmask drives pin `i`.
///
/// # Type Parameters
///
/// - `P`: output pin
/// - `N`: number of pumps
pub struct PumpBank<P, const N: usize> {
    pins: [P; N],
    /// Bitmask currently on the pins.
    applied: Option<u16>,
}
impl<P: OutputPin, const N: usize> PumpBank<P, N> {
    /// Creates a new `PumpBank`.
    ///
    /// The pins are not driven until the first call to [PumpBank::apply].
    pub fn new(pins: [P; N]) -> Self {
        Self {
            pins,
            applied: None,
        }
    }

    /// Drives the pins from a bitmask; bits beyond `N` are ignored.
    ///
    /// The pins are only written when the bitmask changes.
    pub fn apply(&mut self, bitmask: u16) -> Result<(), P::Error> {
        if self.applied == Some(bitmask) {
            return Ok(());
        }
        for (i, pin) in self.pins.iter_mut().enumerate() {
            pin.set_state(PinState::from(bitmask & (1 << i) != 0))?;
        }
        self.applied = Some(bitmask);
        Ok(())
    }
}
