//! GPIO sampling for the physical buttons.
//!
//! Three tactile switches (active-low with internal pull-up):
//!   - UP     - pin 0
//!   - DOWN   - pin 1
//!   - SELECT - pin 2
//!
//! The scan task samples all of them once per tick through
//! [`PinSampler`]; debouncing happens in the scanner, not here.

use embassy_nrf::gpio::{AnyPin, Input, Pull};
use keyscan::config::PHYSICAL_KEY_COUNT;
use keyscan::PinSampler;

pub struct KeyPins {
    pins: [Input<'static>; PHYSICAL_KEY_COUNT],
}

impl KeyPins {
    /// Configure the button pins as pulled-up inputs, in key map order.
    pub fn new(up: AnyPin, down: AnyPin, select: AnyPin) -> Self {
        Self {
            pins: [up, down, select].map(|pin| Input::new(pin, Pull::Up)),
        }
    }
}

impl PinSampler for KeyPins {
    fn is_pin_active(&self, pin: u8) -> bool {
        self.pins
            .get(pin as usize)
            .is_some_and(|input| input.is_low())
    }
}
