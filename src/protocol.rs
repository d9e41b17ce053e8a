mod feedback;
mod frame;
mod order;

pub use feedback::parse_feedback;
pub use feedback::parse_feedbacks;
pub use feedback::Feedback;
pub use feedback::FeedbackKind;
pub use frame::Frame;
pub use frame::FrameAssembler;
pub use frame::FRAME_LEN;
pub use order::Order;
pub use order::OrderKind;
