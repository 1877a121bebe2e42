use core::convert::Infallible;

use embedded_hal::digital::OutputPin;

/// Red LED that stays lit from a calculator fault until the user
/// acknowledges it with the clear button.
pub struct FaultLed<P> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin<Error = Infallible>> FaultLed<P> {
    pub fn new(mut pin: P) -> Self {
        let Ok(()) = pin.set_low();
        Self { pin, lit: false }
    }

    pub fn raise(&mut self) {
        let Ok(()) = self.pin.set_high();
        self.lit = true;
    }

    pub fn acknowledge(&mut self) {
        let Ok(()) = self.pin.set_low();
        self.lit = false;
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}
