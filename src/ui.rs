use calc_core::{CalculatorState, Key, KeyCode, render::DISPLAY_PRECISION, screen, selftest};
use core::fmt::Display;
use defmt::{debug, error, info, warn};
use embassy_sync::pubsub::{DynSubscriber, WaitResult};
use embassy_time::{Duration, Timer};
use esp_hal::gpio::Output;

use crate::{console::Console, error::AppError, indicator::FaultLed, kbd::KeyEvent};

const GLYPH_TABLE_DURATION: Duration = Duration::from_secs(1);
const FAULT_MESSAGE_DURATION: Duration = Duration::from_secs(2);

struct Ui {
    console: Console,
    fault_led: FaultLed<Output<'static>>,
    state: CalculatorState,
}

impl Ui {
    async fn boot(&mut self) -> Result<(), AppError> {
        screen::show_glyph_table(&mut self.console)?;
        self.console.flush().await?;
        Timer::after(GLYPH_TABLE_DURATION).await;

        match selftest::run() {
            Ok(()) => info!("self test passed"),
            Err(failure) => {
                error!("self test failed: {}", failure);
                self.report_fault(failure).await?;
            }
        }

        self.refresh().await
    }

    async fn handle(&mut self, event: KeyEvent) -> Result<(), AppError> {
        match event {
            KeyEvent::Key(code) => self.press(code).await,
            KeyEvent::Acknowledge => {
                if self.fault_led.is_lit() {
                    info!("fault acknowledged");
                }
                self.fault_led.acknowledge();
                Ok(())
            }
        }
    }

    async fn press(&mut self, code: KeyCode) -> Result<(), AppError> {
        let key = Key::from(code);

        match self.state.press(key) {
            Ok(outcome) => debug!("{} -> {}: {}", key.legend(), outcome, self.state),
            Err(fault) => {
                warn!("{} -> {}", key.legend(), fault);
                self.report_fault(fault).await?;
            }
        }

        self.refresh().await
    }

    /// Show `fault` for a while and light the fault LED. The calculator
    /// state is not touched.
    async fn report_fault(&mut self, fault: impl Display) -> Result<(), AppError> {
        screen::show_fault(&mut self.console, fault)?;
        self.console.flush().await?;
        Timer::after(FAULT_MESSAGE_DURATION).await;
        self.fault_led.raise();
        Ok(())
    }

    async fn refresh(&mut self) -> Result<(), AppError> {
        screen::show_state(&mut self.console, &self.state, DISPLAY_PRECISION)?;
        self.console.flush().await
    }
}

#[embassy_executor::task]
pub async fn task(
    console: Console,
    fault_led: FaultLed<Output<'static>>,
    mut events: DynSubscriber<'static, KeyEvent>,
) {
    info!("starting ui task");

    let mut ui = Ui {
        console,
        fault_led,
        state: CalculatorState::new(),
    };

    if let Err(err) = ui.boot().await {
        error!("boot screen failed: {}", err);
    }

    loop {
        let event = match events.next_message().await {
            WaitResult::Message(event) => event,
            WaitResult::Lagged(missed) => {
                warn!("ui fell behind, {} key events lost", missed);
                continue;
            }
        };

        if let Err(err) = ui.handle(event).await {
            error!("couldn't update display: {}", err);
        }
    }
}

