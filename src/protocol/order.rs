use super::frame::{Frame, FRAME_LEN};

/// Kind of an order, selected by the 4-bit order id.
///
/// Every 4-bit id maps to a kind, so there is no invalid order id.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum OrderKind {
    /// 0: Stop (complement 1) or resume (complement 0) the scanning sensor.
    LidarToggle,
    /// 1: Drive to a tick target.
    Move,
    /// 2: Rotate to a tick target.
    Rotate,
    /// 3: Abandon any pending move or rotate.
    CancelMove,
    /// 4: Set a motor to a value.
    MotorValue,
    /// 5: Run a motor for a time.
    MotorTime,
    /// 6: Set the pump outputs from a bitmask.
    Pumps,
    /// 7: Open a selection of motors; the complement is the motor count.
    Motors,
    /// 8: Add one motor id to the open selection.
    MotorsArg,
    /// 9: Write a variable register.
    SetVar,
    /// 10: Read a variable register.
    GetVar,
    /// 11: Enable (complement 1) or disable (complement 0) tracking.
    Track,
    /// 12-15: Reserved; these orders do nothing.
    Reserved(u8),
}
impl OrderKind {
    /// Returns the kind of order for an id.
    ///
    /// Only the low nibble of `id` is used.
    pub fn from_id(id: u8) -> Self {
        use OrderKind::*;
        match id & 0x0F {
            0 => LidarToggle,
            1 => Move,
            2 => Rotate,
            3 => CancelMove,
            4 => MotorValue,
            5 => MotorTime,
            6 => Pumps,
            7 => Motors,
            8 => MotorsArg,
            9 => SetVar,
            10 => GetVar,
            11 => Track,
            reserved => Reserved(reserved),
        }
    }

    /// Returns the 4-bit order id.
    pub fn id(&self) -> u8 {
        use OrderKind::*;
        match self {
            LidarToggle => 0,
            Move => 1,
            Rotate => 2,
            CancelMove => 3,
            MotorValue => 4,
            MotorTime => 5,
            Pumps => 6,
            Motors => 7,
            MotorsArg => 8,
            SetVar => 9,
            GetVar => 10,
            Track => 11,
            Reserved(id) => *id & 0x0F,
        }
    }
}

/// One decoded order from the host.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Order {
    /// Order id (0-15).
    pub id: u8,
    /// Complement nibble (0-15); a per-order parameter.
    pub complement: u8,
    /// First argument, from frame bytes 1-2.
    pub arg0: u16,
    /// Second argument, from frame bytes 3-4.
    pub arg1: u16,
    /// `arg0:arg1` reinterpreted as an IEEE-754 single.
    pub float_arg: f32,
}
impl Order {
    /// Creates a new `Order`.
    ///
    /// # Parameters
    ///
    /// - `kind`: Kind of the order.
    /// - `complement`: Complement nibble. Only the low nibble is used.
    /// - `arg0`: First argument.
    /// - `arg1`: Second argument.
    pub fn new(kind: OrderKind, complement: u8, arg0: u16, arg1: u16) -> Self {
        Self {
            id: kind.id(),
            complement: complement & 0x0F,
            arg0,
            arg1,
            float_arg: float_from_args(arg0, arg1),
        }
    }

    /// Creates a new `Order` whose arguments carry a float.
    ///
    /// # Parameters
    ///
    /// - `kind`: Kind of the order.
    /// - `complement`: Complement nibble. Only the low nibble is used.
    /// - `value`: Float value; `arg0` receives the high half of its bits and
    ///   `arg1` the low half.
    pub fn with_float(kind: OrderKind, complement: u8, value: f32) -> Self {
        let bits = value.to_bits();
        Self::new(kind, complement, (bits >> 16) as u16, bits as u16)
    }

    /// Decodes a frame into an `Order`.
    ///
    /// Decoding never fails: every frame is a valid order.
    ///
    /// # Parameters
    ///
    /// - `frame`: The frame to decode.
    pub fn decode(frame: &Frame) -> Self {
        let arg0 = u16::from_be_bytes([frame[1], frame[2]]);
        let arg1 = u16::from_be_bytes([frame[3], frame[4]]);
        Self {
            id: frame[0] >> 4,
            complement: frame[0] & 0x0F,
            arg0,
            arg1,
            float_arg: float_from_args(arg0, arg1),
        }
    }

    /// Encodes the order into a frame, as sent by the host.
    pub fn encode(&self) -> Frame {
        let mut frame = [0; FRAME_LEN];
        frame[0] = (self.id << 4) | (self.complement & 0x0F);
        frame[1..3].copy_from_slice(&self.arg0.to_be_bytes());
        frame[3..5].copy_from_slice(&self.arg1.to_be_bytes());
        frame
    }

    /// Returns the kind of the order.
    pub fn kind(&self) -> OrderKind {
        OrderKind::from_id(self.id)
    }
}

/// Reinterprets the bits of `arg0:arg1` as a float.
fn float_from_args(arg0: u16, arg1: u16) -> f32 {
    f32::from_bits(((arg0 as u32) << 16) | arg1 as u32)
}

#[cfg(test)]
mod test {
    use super::super::frame::test::frame;
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_float_one() {
        let order = Order::decode(&[0x93, 0x3F, 0x80, 0x00, 0x00]);
        assert_eq!(OrderKind::SetVar, order.kind());
        assert_eq!(3, order.complement);
        assert_eq!(0x3F80, order.arg0);
        assert_eq!(0x0000, order.arg1);
        assert_eq!(1.0, order.float_arg);
    }

    #[test]
    fn test_decode_known_floats() {
        let cases: [([u8; 4], f32); 4] = [
            ([0x40, 0x20, 0x00, 0x00], 2.5),
            ([0xC1, 0x70, 0x00, 0x00], -15.0),
            ([0x3E, 0xE6, 0x66, 0x66], 0.45),
            ([0x00, 0x00, 0x00, 0x00], 0.0),
        ];
        for (args, expected) in cases {
            let frame = [0x90, args[0], args[1], args[2], args[3]];
            assert_eq!(expected, Order::decode(&frame).float_arg);
        }
    }

    #[test]
    fn test_decode_big_endian_args() {
        let order = Order::decode(&[0x1F, 0x12, 0x34, 0xAB, 0xCD]);
        assert_eq!(OrderKind::Move, order.kind());
        assert_eq!(15, order.complement);
        assert_eq!(0x1234, order.arg0);
        assert_eq!(0xABCD, order.arg1);
    }

    #[test]
    fn test_reserved_kinds() {
        for id in 12..16 {
            assert_eq!(OrderKind::Reserved(id), OrderKind::from_id(id));
            assert_eq!(id, OrderKind::from_id(id).id());
        }
    }

    #[test]
    fn test_with_float() {
        let order = Order::with_float(OrderKind::SetVar, 3, 2.5);
        assert_eq!(0x4020, order.arg0);
        assert_eq!(0x0000, order.arg1);
        assert_eq!([0x93, 0x40, 0x20, 0x00, 0x00], order.encode());
    }

    proptest! {
        #[test]
        fn test_decode_nibbles(frame in frame()) {
            let order = Order::decode(&frame);
            prop_assert_eq!(frame[0] >> 4, order.id);
            prop_assert_eq!(frame[0] & 0x0F, order.complement);
            prop_assert_eq!(order.id, order.kind().id());
        }
    }

    proptest! {
        #[test]
        fn test_decode_float_is_bit_cast(frame in frame()) {
            let order = Order::decode(&frame);
            let bits = ((order.arg0 as u32) << 16) | order.arg1 as u32;
            prop_assert_eq!(bits, order.float_arg.to_bits());
            prop_assert_eq!(
                u32::from_be_bytes([frame[1], frame[2], frame[3], frame[4]]),
                order.float_arg.to_bits()
            );
        }
    }

    proptest! {
        #[test]
        fn test_encode_restores_frame(frame in frame()) {
            prop_assert_eq!(frame, Order::decode(&frame).encode());
        }
    }
}
