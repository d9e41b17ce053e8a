use arduino_hal::{
    hal::port::{PD0, PD1},
    pac::USART0,
    port::{
        mode::{Input, Output},
        Pin,
    },
    prelude::*,
    usart::{UsartReader, UsartWriter},
};
use avr_device::interrupt::{self, Mutex};
use core::cell::RefCell;
use heapless::spsc::{Consumer, Producer};
use orderbus::{RxQueue, Transmit, RX_QUEUE_LEN};

type Reader = UsartReader<USART0, Pin<Input, PD0>, Pin<Output, PD1>>;
type Writer = UsartWriter<USART0, Pin<Input, PD0>, Pin<Output, PD1>>;

/// Queue consumer drained by the main loop.
pub type RxConsumer = Consumer<'static, u8, RX_QUEUE_LEN>;

/// State owned by the receive interrupt.
struct RxContext {
    reader: Reader,
    producer: Producer<'static, u8, RX_QUEUE_LEN>,
}

static RX_CONTEXT: Mutex<RefCell<Option<RxContext>>> =
    Mutex::new(RefCell::new(None));

static mut RX_QUEUE: RxQueue<RX_QUEUE_LEN> = RxQueue::new();

/// Hands the receiving half of the UART to the receive interrupt.
///
/// Received bytes are queued for the main loop. Bytes that arrive while the
/// queue is full are dropped.
///
/// NOTE: This must be called at most once, since it splits the static
///       receive queue.
///
/// # Parameters
///
/// - `reader`: Receiving half of the UART, with the RX-complete interrupt
///   already enabled.
///
/// # Returns
///
/// The consumer end of the receive queue.
pub fn listen(reader: Reader) -> RxConsumer {
    // SAFETY: the queue is split once, before interrupts are enabled.
    let queue = unsafe { &mut *core::ptr::addr_of_mut!(RX_QUEUE) };
    let (producer, consumer) = queue.split();

    interrupt::free(|cs| {
        RX_CONTEXT
            .borrow(cs)
            .replace(Some(RxContext { reader, producer }));
    });

    consumer
}

#[avr_device::interrupt(atmega328p)]
fn USART_RX() {
    interrupt::free(|cs| {
        if let Some(context) = RX_CONTEXT.borrow(cs).borrow_mut().as_mut() {
            if let Ok(byte) = context.reader.read() {
                let _ = context.producer.enqueue(byte);
            }
        }
    });
}

/// Transmitting half of the UART.
pub struct UartLink {
    writer: Writer,
}
impl UartLink {
    /// Creates a new `UartLink`.
    pub fn new(writer: Writer) -> Self {
        Self { writer }
    }
}

impl Transmit for UartLink {
    fn write_byte(&mut self, byte: u8) {
        nb::block!(self.writer.write(byte)).unwrap_infallible();
    }
}
