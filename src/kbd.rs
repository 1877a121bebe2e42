use bitvec::prelude::*;
use calc_core::keypad::{self, Key, KeyCode};
use defmt::{Format, debug, info, trace, warn};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    pubsub::{DynSubscriber, PubSubChannel},
};
use embassy_time::Timer;
use esp_hal::gpio::{AnyPin, Input, InputConfig, Pull};

use crate::error::AppError;

pub const DATA_LINES: usize = 4;

/// Time between the encoder strobing "data available" and the data lines
/// being safe to read.
const SETTLE_MICROS: u64 = 2;
const BUTTON_DEBOUNCE_MILLIS: u64 = 50;

type Sample = BitArr!(for DATA_LINES, in u8);

#[derive(Clone, Copy, Debug, Format)]
pub enum KeyEvent {
    /// A keypad key was pressed.
    Key(KeyCode),
    /// The clear button was pressed.
    Acknowledge,
}

/// Every input goes through this one queue, so the UI sees events one at a
/// time and in the order they happened.
static CHANNEL: PubSubChannel<CriticalSectionRawMutex, KeyEvent, 16, 1, 1> = PubSubChannel::new();

pub fn subscriber() -> Result<DynSubscriber<'static, KeyEvent>, AppError> {
    CHANNEL.dyn_subscriber().map_err(<_>::into)
}

/// Number pad behind a 16-key encoder: four data lines holding the code of
/// the last key, and a strobe that rises when a new key is latched.
pub struct KeypadEncoder<'p> {
    data: [Input<'p>; DATA_LINES],
    available: Input<'p>,
}

impl<'p> KeypadEncoder<'p> {
    pub fn new(data: [AnyPin<'p>; DATA_LINES], available: AnyPin<'p>) -> Self {
        Self {
            data: data.map(|pin| Input::new(pin, InputConfig::default())),
            available: Input::new(available, InputConfig::default().with_pull(Pull::Up)),
        }
    }

    async fn wait_for_key(&mut self) {
        self.available.wait_for_rising_edge().await;
        Timer::after_micros(SETTLE_MICROS).await;
    }

    fn read(&self) -> u8 {
        let mut sample = Sample::ZERO;
        for (bit, line) in self.data.iter().enumerate() {
            sample.set(bit, line.is_high());
        }
        sample.into_inner()[0]
    }
}

#[embassy_executor::task]
pub async fn task(mut keypad: KeypadEncoder<'static>) {
    info!("starting keypad task");

    let publisher = CHANNEL.immediate_publisher();

    loop {
        keypad.wait_for_key().await;
        let raw = keypad.read();

        trace!("keypad sample: {=u8:#b}", raw);

        match keypad::decode_port(raw) {
            Some(code) => {
                debug!("key {} pressed", Key::from(code).legend());
                publisher.publish_immediate(KeyEvent::Key(code));
            }
            None => warn!("undecodable keypad sample {=u8:#x}", raw),
        }
    }
}

#[embassy_executor::task]
pub async fn clear_button_task(pin: AnyPin<'static>) {
    info!("starting clear button task");

    let mut button = Input::new(pin, InputConfig::default().with_pull(Pull::Up));
    let publisher = CHANNEL.immediate_publisher();

    loop {
        button.wait_for_falling_edge().await;
        debug!("clear button pressed");
        publisher.publish_immediate(KeyEvent::Acknowledge);

        // Ignore bounce, then wait for release before arming again.
        Timer::after_millis(BUTTON_DEBOUNCE_MILLIS).await;
        button.wait_for_high().await;
        Timer::after_millis(BUTTON_DEBOUNCE_MILLIS).await;
    }
}
