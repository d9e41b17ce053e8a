use crate::devices::{serial, serial::RxConsumer, PumpBank, UartLink};
use arduino_hal::{
    default_serial,
    hal::usart::Event,
    pins,
    port::{mode::Output, Pin},
    prelude::_unwrap_infallible_UnwrapInfallible,
    Peripherals, Pins,
};
use orderbus::{Config, Controller};

pub struct Machine {
    controller: Controller<UartLink>,
    rx: RxConsumer,
    pumps: PumpBank<Pin<Output>, 4>,
}

impl Machine {
    const BAUD_RATE: u32 = 115_200;

    pub fn new() -> Self {
        let peripherals: Peripherals = unsafe { Peripherals::steal() };
        let pins: Pins = pins!(peripherals);

        // UART; bytes arrive through the RX interrupt.
        let mut serial = default_serial!(peripherals, pins, Self::BAUD_RATE);
        serial.listen(Event::RxComplete);
        let (reader, writer) = serial.split();
        let rx = serial::listen(reader);

        // Pumps on D2..D5.
        let pumps = PumpBank::new([
            pins.d2.into_output().downgrade(),
            pins.d3.into_output().downgrade(),
            pins.d4.into_output().downgrade(),
            pins.d5.into_output().downgrade(),
        ]);

        let controller = Controller::new(UartLink::new(writer), Config::default());

        // SAFETY: all interrupt state is in place.
        unsafe { avr_device::interrupt::enable() };

        Self {
            controller,
            rx,
            pumps,
        }
    }

    /// Runs one iteration of the main loop.
    pub fn step(&mut self) {
        self.controller.service(&mut self.rx);
        self.pumps
            .apply(self.controller.actuators().pump_bitmask)
            .unwrap_infallible();
    }
}
