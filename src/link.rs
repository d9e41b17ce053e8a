/// Default number of slots in the receive queue.
pub const RX_QUEUE_LEN: usize = 64;

/// Bounded queue carrying received bytes from the interrupt context to the
/// poll loop.
///
/// The queue holds at most `N - 1` bytes.
pub type RxQueue<const N: usize> = heapless::spsc::Queue<u8, N>;

/// Transmitting half of the serial link.
pub trait Transmit {
    /// Writes a single byte, blocking until it can be queued.
    fn write_byte(&mut self, byte: u8);
}

/// Receiving half of the serial link.
pub trait Receive {
    /// Reads a byte if one is available, without blocking.
    fn read_byte(&mut self) -> Option<u8>;
}

impl<const N: usize> Receive for heapless::spsc::Consumer<'_, u8, N> {
    fn read_byte(&mut self) -> Option<u8> {
        self.dequeue()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Link to use for testing purposes.
    ///
    /// Written bytes are recorded. If the `TestLink` is cloned then the
    /// record is shared, so a clone can inspect what the original wrote
    /// after the original was moved into a controller.
    #[derive(Clone, Default)]
    pub struct TestLink {
        written: Arc<Mutex<Vec<u8>>>,
    }
    impl TestLink {
        /// Creates a new test link.
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns a copy of every byte written so far.
        pub fn get_written(&self) -> Vec<u8> {
            self.written.lock().unwrap().clone()
        }

        /// Returns and forgets every byte written so far.
        pub fn take_written(&mut self) -> Vec<u8> {
            std::mem::take(&mut *self.written.lock().unwrap())
        }
    }
    impl Transmit for TestLink {
        fn write_byte(&mut self, byte: u8) {
            self.written.lock().unwrap().push(byte);
        }
    }

    #[test]
    fn test_shared_record() {
        let mut link = TestLink::new();
        let observer = link.clone();
        link.write_byte(0x12);
        link.write_byte(0x34);
        assert_eq!(vec![0x12, 0x34], observer.get_written());
        assert_eq!(vec![0x12, 0x34], link.take_written());
        assert!(observer.get_written().is_empty());
    }

    #[test]
    fn test_queue_receive() {
        let mut queue: RxQueue<4> = RxQueue::new();
        let (mut producer, mut consumer) = queue.split();
        assert_eq!(None, consumer.read_byte());

        assert!(producer.enqueue(1).is_ok());
        assert!(producer.enqueue(2).is_ok());
        assert!(producer.enqueue(3).is_ok());
        assert_eq!(Err(4), producer.enqueue(4));

        assert_eq!(Some(1), consumer.read_byte());
        assert_eq!(Some(2), consumer.read_byte());
        assert_eq!(Some(3), consumer.read_byte());
        assert_eq!(None, consumer.read_byte());
    }
}

#[cfg(test)]
pub use tests::TestLink;
