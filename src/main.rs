#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Level, Output};
use esp_hal::timer::timg::TimerGroup;
use numpad_calc::{
    console::Console,
    display::{Panel, PanelPeripherals},
    indicator::FaultLed,
    kbd::{self, KeypadEncoder},
    ui,
};
use {esp_backtrace as _, esp_println as _};

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(spawner: Spawner) {
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    let panel = Panel::init(PanelPeripherals {
        scl: peripherals.GPIO19.into(),
        sda: peripherals.GPIO20.into(),
        rst: peripherals.GPIO21.into(),
        dc: peripherals.GPIO22.into(),
        cs: peripherals.GPIO23.into(),
        bl: peripherals.GPIO15.into(),
        ledc: peripherals.LEDC,
        spi: peripherals.SPI2,
        dma_ch: peripherals.DMA_CH0,
    })
    .await
    .expect("couldn't initialize display");

    let fault_led = FaultLed::new(Output::new(
        peripherals.GPIO3,
        Level::Low,
        Default::default(),
    ));

    // Subscribe before any input task can publish.
    let events = kbd::subscriber().expect("couldn't subscribe to key events");
    spawner.must_spawn(ui::task(Console::new(panel), fault_led, events));

    let keypad = KeypadEncoder::new(
        [
            peripherals.GPIO11.into(),
            peripherals.GPIO10.into(),
            peripherals.GPIO1.into(),
            peripherals.GPIO0.into(),
        ],
        peripherals.GPIO18.into(),
    );

    spawner.must_spawn(kbd::task(keypad));
    spawner.must_spawn(kbd::clear_button_task(peripherals.GPIO9.into()));
}
