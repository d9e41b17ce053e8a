/// Number of bytes in a frame, in both directions of the link.
pub const FRAME_LEN: usize = 5;

/// Fixed-size unit of transport on the serial link.
pub type Frame = [u8; FRAME_LEN];

/// Accumulates bytes from the serial link into frames.
///
/// The assembler is stateful: a partial frame persists across calls to
/// [FrameAssembler::push], so bytes can be delivered one at a time as they
/// arrive.
pub struct FrameAssembler {
    buffer: Frame,
    head: usize,
    noise_remaining: u8,
}
impl FrameAssembler {
    /// Creates a new `FrameAssembler`.
    ///
    /// # Parameters
    ///
    /// - `noise_bytes`: Number of bytes to discard before assembly begins.
    pub fn new(noise_bytes: u8) -> Self {
        Self {
            buffer: [0; FRAME_LEN],
            head: 0,
            noise_remaining: noise_bytes,
        }
    }

    /// Pushes a single byte.
    ///
    /// # Parameters
    ///
    /// - `byte`: The byte received from the link.
    ///
    /// # Returns
    ///
    /// - `true`: if this byte completed a frame. The frame can be read with
    ///   [FrameAssembler::frame] until the next frame completes.
    /// - `false`: otherwise, including when the byte was discarded as
    ///   startup noise.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.noise_remaining > 0 {
            self.noise_remaining -= 1;
            return false;
        }

        self.buffer[self.head] = byte;
        self.head += 1;
        if self.head == FRAME_LEN {
            self.head = 0;
            true
        } else {
            false
        }
    }

    /// Returns the most recently completed frame.
    pub fn frame(&self) -> Frame {
        self.buffer
    }

    /// Returns the number of bytes accumulated towards the next frame.
    pub fn position(&self) -> usize {
        self.head
    }

    /// Checks if the assembler is still discarding startup noise.
    pub fn is_discarding(&self) -> bool {
        self.noise_remaining > 0
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use proptest::collection;
    use proptest::prelude::*;

    /// Strategy for generating a [Frame].
    pub fn frame() -> impl Strategy<Value = Frame> {
        any::<Frame>()
    }

    #[test]
    fn test_discards_noise() {
        let mut assembler = FrameAssembler::new(3);
        assert!(assembler.is_discarding());
        for byte in [0xFF, 0xFE, 0xFD] {
            assert!(!assembler.push(byte));
            assert_eq!(0, assembler.position());
        }
        assert!(!assembler.is_discarding());

        for byte in [0x10, 0x00, 0x01, 0x00] {
            assert!(!assembler.push(byte));
        }
        assert!(assembler.push(0x02));
        assert_eq!([0x10, 0x00, 0x01, 0x00, 0x02], assembler.frame());
    }

    #[test]
    fn test_partial_frame_persists() {
        let mut assembler = FrameAssembler::new(0);
        assert!(!assembler.push(1));
        assert!(!assembler.push(2));
        assert_eq!(2, assembler.position());
        assert!(!assembler.push(3));
        assert!(!assembler.push(4));
        assert!(assembler.push(5));
        assert_eq!(0, assembler.position());
        assert_eq!([1, 2, 3, 4, 5], assembler.frame());
    }

    proptest! {
        #[test]
        fn test_completes_every_fifth_byte(
            noise in 0u8..8,
            bytes in collection::vec(any::<u8>(), 0..64)
        ) {
            let mut assembler = FrameAssembler::new(noise);
            let mut counted = 0usize;
            for (i, byte) in bytes.iter().enumerate() {
                let completed = assembler.push(*byte);
                if i >= noise as usize {
                    counted += 1;
                }
                prop_assert_eq!(counted > 0 && counted % FRAME_LEN == 0, completed);
                if completed {
                    let start = i + 1 - FRAME_LEN;
                    prop_assert_eq!(&bytes[start..=i], &assembler.frame()[..]);
                }
            }
            prop_assert_eq!(counted % FRAME_LEN, assembler.position());
        }
    }
}
