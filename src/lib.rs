#![cfg_attr(not(test), no_std)]

mod config;
mod controller;
mod link;
mod protocol;

pub use config::Config;
pub use config::TrackingEmission;
pub use controller::ActuatorState;
pub use controller::CompletionSlots;
pub use controller::Condition;
pub use controller::Continuation;
pub use controller::Controller;
pub use controller::MotorSelection;
pub use controller::TrackingRamp;
pub use controller::VariableStore;
pub use controller::MAX_MOTORS;
pub use controller::SLOT_COUNT;
pub use link::Receive;
pub use link::RxQueue;
pub use link::Transmit;
pub use link::RX_QUEUE_LEN;
pub use protocol::parse_feedback;
pub use protocol::parse_feedbacks;
pub use protocol::Feedback;
pub use protocol::FeedbackKind;
pub use protocol::Frame;
pub use protocol::FrameAssembler;
pub use protocol::Order;
pub use protocol::OrderKind;
pub use protocol::FRAME_LEN;

#[cfg(test)]
pub use link::TestLink;
