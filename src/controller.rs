mod actuators;
mod completion;
mod tracking;
mod vars;

pub use actuators::ActuatorState;
pub use actuators::MotorSelection;
pub use actuators::MAX_MOTORS;
pub use completion::CompletionSlots;
pub use completion::Condition;
pub use completion::Continuation;
pub use completion::SLOT_COUNT;
pub use tracking::TrackingRamp;
pub use vars::VariableStore;

use log::{debug, info, warn};

use crate::{
    Config, Feedback, Frame, FrameAssembler, Order, OrderKind, Receive,
    TrackingEmission, Transmit,
};

/// Owns all of the state driven by host orders.
///
/// Bytes from the host are fed in with [Controller::receive_byte] (or
/// drained from a queue with [Controller::service]). Each completed frame is
/// acknowledged and dispatched immediately. Orders that complete later
/// install a [Continuation] which [Controller::poll] evaluates on every tick
/// of the main loop.
///
/// # Type Parameters
///
/// - `T`: type of the transmitting half of the link.
pub struct Controller<T> {
    config: Config,
    assembler: FrameAssembler,
    vars: VariableStore,
    actuators: ActuatorState,
    slots: CompletionSlots,
    tracking: Option<TrackingRamp>,
    link: T,
}
impl<T: Transmit> Controller<T> {
    /// Creates a new `Controller`.
    ///
    /// # Parameters
    ///
    /// - `link`: Transmitting half of the link; all feedback goes here.
    /// - `config`: Configuration.
    pub fn new(link: T, config: Config) -> Self {
        Self {
            assembler: FrameAssembler::new(config.noise_bytes),
            vars: VariableStore::new(config.initial_var),
            actuators: ActuatorState::default(),
            slots: CompletionSlots::new(),
            tracking: None,
            link,
            config,
        }
    }

    /// Runs one iteration of the main loop.
    ///
    /// Bytes are taken from `rx` until a frame completes or `rx` is empty,
    /// then the completion slots are polled once. At most one order is
    /// handled per tick; the rest stay queued for the following ticks.
    ///
    /// # Parameters
    ///
    /// - `rx`: Receiving half of the link.
    pub fn service<R: Receive + ?Sized>(&mut self, rx: &mut R) {
        while let Some(byte) = rx.read_byte() {
            if self.receive_byte(byte).is_some() {
                break;
            }
        }
        self.poll();
    }

    /// Processes one byte received from the host.
    ///
    /// # Returns
    ///
    /// - `Some(order)`: if the byte completed a frame; the order has already
    ///   been acknowledged and dispatched.
    /// - `None`: otherwise.
    pub fn receive_byte(&mut self, byte: u8) -> Option<Order> {
        if self.assembler.push(byte) {
            let frame = self.assembler.frame();
            Some(self.handle_frame(&frame))
        } else {
            None
        }
    }

    /// Decodes, acknowledges and dispatches a complete frame.
    ///
    /// The acknowledgement is sent before the order has any effect.
    pub fn handle_frame(&mut self, frame: &Frame) -> Order {
        let order = Order::decode(frame);
        self.send(Feedback::Acknowledge(order.id));
        self.dispatch(&order);
        order
    }

    /// Runs the handler of an order.
    pub fn dispatch(&mut self, order: &Order) {
        let kind = order.kind();
        debug!(
            "order {:?}: complement={} arg0={:#06x} arg1={:#06x}",
            kind, order.complement, order.arg0, order.arg1
        );
        match kind {
            OrderKind::LidarToggle => self.lidar_toggle(order),
            OrderKind::Move | OrderKind::Rotate => self.motion(kind, order),
            OrderKind::CancelMove => self.cancel_move(),
            OrderKind::MotorValue => self.motor_value(order),
            OrderKind::MotorTime => self.motor_time(order),
            OrderKind::Pumps => self.pumps(order),
            OrderKind::Motors => self.motors(order),
            OrderKind::MotorsArg => self.motors_arg(order),
            OrderKind::SetVar => self.set_var(order),
            OrderKind::GetVar => self.get_var(order),
            OrderKind::Track => self.track(order),
            OrderKind::Reserved(id) => warn!("reserved order {} ignored", id),
        }
    }

    /// Runs one poll tick.
    ///
    /// Pending tracking samples are sent first, then every completion slot
    /// is evaluated in id order and a TERMINATE is sent for each that fires.
    pub fn poll(&mut self) {
        self.drain_tracking();

        let sensor_running = !self.actuators.lidar_stopped;
        let tracking_drained = self.tracking.is_none();
        let fired = self.slots.poll(|condition| match condition {
            Condition::SensorRunning => sensor_running,
            Condition::TrackingDrained => tracking_drained,
        });
        for target in fired {
            debug!("order {} completed", target);
            self.send(Feedback::Terminate(target));
        }
    }

    /// Returns the configuration the controller was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the variable registers.
    pub fn vars(&self) -> &VariableStore {
        &self.vars
    }

    /// Returns the actuator state set by orders.
    pub fn actuators(&self) -> &ActuatorState {
        &self.actuators
    }

    /// Returns the completion slots.
    pub fn slots(&self) -> &CompletionSlots {
        &self.slots
    }

    /// Returns the transmitting half of the link.
    pub fn link(&self) -> &T {
        &self.link
    }

    /// Returns the transmitting half of the link, mutably.
    ///
    /// Bytes written here are interleaved with feedback frames, so callers
    /// must only write whole frames.
    pub fn link_mut(&mut self) -> &mut T {
        &mut self.link
    }

    /// Returns the number of tracking samples waiting to be sent.
    pub fn tracking_pending(&self) -> u16 {
        self.tracking.map_or(0, |ramp| ramp.remaining())
    }

    fn lidar_toggle(&mut self, order: &Order) {
        self.actuators.lidar_stopped = order.complement != 0;
        info!("sensor stopped: {}", self.actuators.lidar_stopped);
        self.terminate(OrderKind::LidarToggle);
    }

    /// Move and rotate complete once the sensor is running.
    fn motion(&mut self, kind: OrderKind, order: &Order) {
        self.actuators.tick_target = order.arg1 as i16;
        self.install(
            kind,
            Continuation::AwaitingCondition {
                condition: Condition::SensorRunning,
                target: kind.id(),
            },
        );
    }

    fn cancel_move(&mut self) {
        self.slots.retire(OrderKind::Move.id());
        self.slots.retire(OrderKind::Rotate.id());
        self.terminate(OrderKind::CancelMove);
    }

    fn motor_value(&mut self, order: &Order) {
        self.finish_motor_value();
        if self.actuators.tracking {
            self.start_tracking();
        }
        self.actuators.motor_id = order.complement as i8;
        self.actuators.motor_value = order.arg1 as i16;

        let target = OrderKind::MotorValue.id();
        let continuation = if self.tracking.is_some() {
            Continuation::AwaitingCondition {
                condition: Condition::TrackingDrained,
                target,
            }
        } else {
            Continuation::FireNextTick { target }
        };
        self.install(OrderKind::MotorValue, continuation);
    }

    fn motor_time(&mut self, order: &Order) {
        self.actuators.motor_id = order.complement as i8;
        self.actuators.motor_time = order.arg1;
        self.install_next_tick(OrderKind::MotorTime);
    }

    fn pumps(&mut self, order: &Order) {
        self.actuators.pump_bitmask = order.arg1;
        info!("pumps: {:#018b}", order.arg1);
        self.terminate(OrderKind::Pumps);
    }

    /// Opens a motor selection; it completes through motors-arg orders.
    fn motors(&mut self, order: &Order) {
        self.actuators.motor_selection.begin(order.complement);
        if order.complement == 0 {
            self.install_next_tick(OrderKind::Motors);
        }
    }

    fn motors_arg(&mut self, order: &Order) {
        let id = order.complement as i8;
        match self.actuators.motor_selection.accept(id) {
            Some(true) => self.install_next_tick(OrderKind::Motors),
            Some(false) => {}
            None => warn!("motor {} ignored: no selection open", id),
        }
    }

    fn set_var(&mut self, order: &Order) {
        self.vars.set(order.complement, order.float_arg);
        self.terminate(OrderKind::SetVar);
    }

    fn get_var(&mut self, order: &Order) {
        let value = self.vars.get(order.complement);
        self.send(Feedback::Variable {
            var_id: order.complement,
            value,
        });
        self.terminate(OrderKind::GetVar);
    }

    fn track(&mut self, order: &Order) {
        self.actuators.tracking = order.complement != 0;
        info!("tracking: {}", self.actuators.tracking);
        self.terminate(OrderKind::Track);
    }

    /// Completes a motor-value still pending from an earlier order.
    ///
    /// The rest of its tracking ramp is sent, followed by its TERMINATE.
    fn finish_motor_value(&mut self) {
        let slot = OrderKind::MotorValue.id();
        if self.slots.get(slot) == Continuation::Idle {
            return;
        }
        if let Some(ramp) = self.tracking.take() {
            for sample in ramp {
                self.send(Feedback::Tracking(sample));
            }
        }
        self.slots.retire(slot);
        debug!("order {} completed early", slot);
        self.terminate(OrderKind::MotorValue);
    }

    /// Starts a new tracking ramp.
    ///
    /// Any earlier ramp must already have been sent.
    fn start_tracking(&mut self) {
        let ramp = TrackingRamp::new(
            self.config.tracking_samples,
            self.config.tracking_rate,
        );
        match self.config.tracking_emission {
            TrackingEmission::Inline => {
                self.tracking = None;
                for sample in ramp {
                    self.send(Feedback::Tracking(sample));
                }
            }
            TrackingEmission::Background { .. } => {
                self.tracking = (!ramp.is_drained()).then_some(ramp);
            }
        }
    }

    /// Sends up to one tick's worth of queued tracking samples.
    fn drain_tracking(&mut self) {
        let per_tick = match self.config.tracking_emission {
            TrackingEmission::Background { per_tick } => per_tick.max(1),
            TrackingEmission::Inline => u16::MAX,
        };
        let drained = match self.tracking.as_mut() {
            None => return,
            Some(ramp) => {
                for sample in ramp.by_ref().take(per_tick as usize) {
                    Feedback::Tracking(sample).send(&mut self.link);
                }
                ramp.is_drained()
            }
        };
        if drained {
            self.tracking = None;
        }
    }

    fn install_next_tick(&mut self, kind: OrderKind) {
        self.install(kind, Continuation::FireNextTick { target: kind.id() });
    }

    fn install(&mut self, kind: OrderKind, continuation: Continuation) {
        self.slots.install(kind.id(), continuation);
    }

    fn terminate(&mut self, kind: OrderKind) {
        self.send(Feedback::Terminate(kind.id()));
    }

    fn send(&mut self, feedback: Feedback) {
        feedback.send(&mut self.link);
    }
}
