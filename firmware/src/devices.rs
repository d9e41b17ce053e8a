mod pumps;
pub mod serial;

pub use pumps::PumpBank;
pub use serial::UartLink;
