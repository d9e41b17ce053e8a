/// Number of completion slots; one per order id.
pub const SLOT_COUNT: usize = 16;

/// Condition observed by a pending continuation.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Condition {
    /// The scanning sensor is not stopped.
    SensorRunning,
    /// No tracking samples are waiting to be sent.
    TrackingDrained,
}

/// Deferred completion of an order, installed in a completion slot.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum Continuation {
    /// Nothing is pending.
    #[default]
    Idle,
    /// Terminate `target` on the first poll tick where `condition` holds.
    AwaitingCondition { condition: Condition, target: u8 },
    /// Terminate `target` on the next poll tick.
    FireNextTick { target: u8 },
}
impl Continuation {
    /// Returns the order id to terminate if the continuation fires now.
    ///
    /// # Parameters
    ///
    /// - `holds`: Evaluates a [Condition] against the current state.
    fn fires<F: Fn(Condition) -> bool>(&self, holds: &F) -> Option<u8> {
        match *self {
            Continuation::Idle => None,
            Continuation::AwaitingCondition { condition, target } => {
                holds(condition).then_some(target)
            }
            Continuation::FireNextTick { target } => Some(target),
        }
    }
}

/// One completion slot per order id, polled on every tick of the main loop.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct CompletionSlots {
    slots: [Continuation; SLOT_COUNT],
}
impl CompletionSlots {
    /// Creates a new set of idle slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a continuation, replacing whatever the slot held.
    ///
    /// Only the low nibble of `slot` is used.
    pub fn install(&mut self, slot: u8, continuation: Continuation) {
        self.slots[Self::index(slot)] = continuation;
    }

    /// Retires a slot to [Continuation::Idle].
    ///
    /// Only the low nibble of `slot` is used.
    pub fn retire(&mut self, slot: u8) {
        self.install(slot, Continuation::Idle);
    }

    /// Returns the continuation held in a slot.
    ///
    /// Only the low nibble of `slot` is used.
    pub fn get(&self, slot: u8) -> Continuation {
        self.slots[Self::index(slot)]
    }

    /// Checks if every slot is idle.
    pub fn is_idle(&self) -> bool {
        self.slots.iter().all(|c| *c == Continuation::Idle)
    }

    /// Runs one poll tick over all slots, in id order.
    ///
    /// Every slot is evaluated, idle or not. Each continuation that fires is
    /// retired, so it fires at most once per installation.
    ///
    /// # Parameters
    ///
    /// - `holds`: Evaluates a [Condition] against the current state.
    ///
    /// # Returns
    ///
    /// The order ids to terminate, in slot order.
    pub fn poll<F: Fn(Condition) -> bool>(
        &mut self,
        holds: F,
    ) -> heapless::Vec<u8, SLOT_COUNT> {
        let mut fired = heapless::Vec::new();
        for slot in self.slots.iter_mut() {
            if let Some(target) = slot.fires(&holds) {
                *slot = Continuation::Idle;
                // Cannot fail: at most one target per slot.
                let _ = fired.push(target);
            }
        }
        fired
    }

    fn index(slot: u8) -> usize {
        (slot & 0x0F) as usize
    }
}
