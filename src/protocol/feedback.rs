use crate::Transmit;

use super::frame::FRAME_LEN;

use winnow::combinator::fail;
use winnow::token::{any, literal};
use winnow::{binary::be_u32, Parser, Result};

/// Padding that follows the header of payload-free feedback.
const PADDING: &[u8] = &[0; FRAME_LEN - 1];

/// Kind of feedback, stored in the high nibble of the first byte.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[repr(u8)]
pub enum FeedbackKind {
    Acknowledge = 0,
    Terminate = 1,
    Variable = 2,
    Tracking = 3,
}
impl FeedbackKind {
    /// Returns the kind for a header nibble, if there is one.
    pub fn from_nibble(nibble: u8) -> Option<Self> {
        use FeedbackKind::*;
        match nibble {
            0 => Some(Acknowledge),
            1 => Some(Terminate),
            2 => Some(Variable),
            3 => Some(Tracking),
            _ => None,
        }
    }
}

/// Feedback sent from the controller to the host.
///
/// Every feedback is encoded as one frame: a header byte followed by either
/// four bytes of zero padding or a big-endian IEEE-754 float.
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Feedback {
    /// An order with this id was received.
    Acknowledge(u8),
    /// The order with this id has completed.
    Terminate(u8),
    /// The value of a variable register.
    Variable { var_id: u8, value: f32 },
    /// One sample of a tracking ramp.
    Tracking(f32),
}
impl Feedback {
    /// Returns the kind of this feedback.
    pub fn kind(&self) -> FeedbackKind {
        match self {
            Feedback::Acknowledge(_) => FeedbackKind::Acknowledge,
            Feedback::Terminate(_) => FeedbackKind::Terminate,
            Feedback::Variable { .. } => FeedbackKind::Variable,
            Feedback::Tracking(_) => FeedbackKind::Tracking,
        }
    }

    /// Encodes the feedback into a frame.
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let (low, payload) = match *self {
            Feedback::Acknowledge(id) | Feedback::Terminate(id) => (id, None),
            Feedback::Variable { var_id, value } => (var_id, Some(value)),
            Feedback::Tracking(value) => (0, Some(value)),
        };

        let mut frame = [0; FRAME_LEN];
        frame[0] = ((self.kind() as u8) << 4) | (low & 0x0F);
        if let Some(value) = payload {
            frame[1..].copy_from_slice(&value.to_bits().to_be_bytes());
        }
        frame
    }

    /// Writes the encoded feedback to a link.
    ///
    /// # Parameters
    ///
    /// - `link`: Link to transmit on.
    pub fn send<T: Transmit + ?Sized>(&self, link: &mut T) {
        for byte in self.encode() {
            link.write_byte(byte);
        }
    }
}

/// Parse multiple feedback frames, storing them in a buffer.
///
/// This is the host side of the link. It parses as many [Feedback]s as will
/// fit in the `buffer` before returning. It will return when either the
/// input is empty, or when the buffer is full. The function does not empty
/// the buffer before accumulating into it.
///
/// If the buffer fills up before the input has been read, the input will be
/// set to the next feedback frame.
///
/// # Parameters
///
/// - `input`: The input to parse.
/// - `buffer`: Buffer in which to accumulate values.
///
/// # Returns
///
/// - `Ok(completed)` if parsing was successful. `completed` indicates whether
///   all of the input was parsed without filling up the buffer.
/// - `Err(_)` if the parsing failed.
pub fn parse_feedbacks<'s, const N: usize>(
    input: &mut &'s [u8],
    buffer: &mut heapless::Vec<Feedback, N>,
) -> Result<bool> {
    while !input.is_empty() {
        let prev_input = *input;
        let feedback = parse_feedback.parse_next(input)?;
        if buffer.push(feedback).is_err() {
            *input = prev_input;
            break;
        }
    }
    Ok(input.is_empty())
}

/// Parse a single feedback frame.
pub fn parse_feedback<'s>(input: &mut &'s [u8]) -> Result<Feedback> {
    let header = any.parse_next(input)?;
    let low = header & 0x0F;
    match FeedbackKind::from_nibble(header >> 4) {
        Some(FeedbackKind::Acknowledge) => {
            parse_padding.parse_next(input)?;
            Ok(Feedback::Acknowledge(low))
        }
        Some(FeedbackKind::Terminate) => {
            parse_padding.parse_next(input)?;
            Ok(Feedback::Terminate(low))
        }
        Some(FeedbackKind::Variable) => {
            let value = parse_f32.parse_next(input)?;
            Ok(Feedback::Variable { var_id: low, value })
        }
        Some(FeedbackKind::Tracking) => {
            parse_f32.parse_next(input).map(Feedback::Tracking)
        }
        None => fail(input),
    }
}

/// Parse the zero padding of a payload-free feedback.
fn parse_padding<'s>(input: &mut &'s [u8]) -> Result<()> {
    literal(PADDING).void().parse_next(input)
}

/// Parse a big-endian IEEE-754 single.
fn parse_f32<'s>(input: &mut &'s [u8]) -> Result<f32> {
    be_u32.map(f32::from_bits).parse_next(input)
}
