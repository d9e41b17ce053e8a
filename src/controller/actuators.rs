/// Capacity of a motor selection; the motor count is a 4-bit value.
pub const MAX_MOTORS: usize = 16;

/// Mutable actuator state, updated by orders from the host.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ActuatorState {
    /// The scanning sensor is stopped.
    pub lidar_stopped: bool,
    /// Tracking samples are streamed for motor-value orders.
    pub tracking: bool,
    /// Target of the latest move or rotate, in ticks.
    pub tick_target: i16,
    /// Motor addressed by the latest motor-value or motor-time order.
    pub motor_id: i8,
    /// Value of the latest motor-value order.
    pub motor_value: i16,
    /// Duration of the latest motor-time order.
    pub motor_time: u16,
    /// One bit per pump.
    pub pump_bitmask: u16,
    /// Motors chosen by the latest motors order.
    pub motor_selection: MotorSelection,
}

/// Motor ids gathered over one motors order and its motors-arg orders.
///
/// Ids are filled from the end of the list towards the front: the first
/// accepted id lands in the last position.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct MotorSelection {
    ids: heapless::Vec<i8, MAX_MOTORS>,
    remaining: usize,
}
impl MotorSelection {
    /// Opens a new selection of `count` motors.
    ///
    /// Any previous selection is released.
    ///
    /// # Parameters
    ///
    /// - `count`: Number of motor ids expected. Clamped to [MAX_MOTORS].
    pub fn begin(&mut self, count: u8) {
        let count = (count as usize).min(MAX_MOTORS);
        self.ids.clear();
        // Cannot fail: `count` is within capacity.
        let _ = self.ids.resize_default(count);
        self.remaining = count;
    }

    /// Accepts the next motor id.
    ///
    /// # Parameters
    ///
    /// - `id`: Motor id.
    ///
    /// # Returns
    ///
    /// - `Some(true)`: if this id completed the selection.
    /// - `Some(false)`: if more ids are still expected.
    /// - `None`: if no selection is open; the id is ignored.
    pub fn accept(&mut self, id: i8) -> Option<bool> {
        if self.remaining == 0 {
            return None;
        }
        self.ids[self.remaining - 1] = id;
        self.remaining -= 1;
        Some(self.remaining == 0)
    }

    /// Returns the number of ids still expected.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Returns the motor ids of the selection.
    pub fn ids(&self) -> &[i8] {
        &self.ids
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_reverse_fill() {
        let mut selection = MotorSelection::default();
        selection.begin(3);
        assert_eq!(&[0, 0, 0], selection.ids());
        assert_eq!(Some(false), selection.accept(5));
        assert_eq!(Some(false), selection.accept(6));
        assert_eq!(Some(true), selection.accept(7));
        assert_eq!(&[7, 6, 5], selection.ids());
        assert_eq!(0, selection.remaining());
    }

    #[test]
    fn test_accept_without_selection() {
        let mut selection = MotorSelection::default();
        assert_eq!(None, selection.accept(1));

        selection.begin(1);
        assert_eq!(Some(true), selection.accept(2));
        assert_eq!(None, selection.accept(3));
        assert_eq!(&[2], selection.ids());
    }

    #[test]
    fn test_begin_releases_previous() {
        let mut selection = MotorSelection::default();
        selection.begin(4);
        selection.accept(9);
        selection.begin(2);
        assert_eq!(&[0, 0], selection.ids());
        assert_eq!(2, selection.remaining());
    }

    #[test]
    fn test_begin_clamps() {
        let mut selection = MotorSelection::default();
        selection.begin(200);
        assert_eq!(MAX_MOTORS, selection.remaining());
        assert_eq!(MAX_MOTORS, selection.ids().len());
    }
}
