use core::convert::Infallible;

use embassy_embedded_hal::shared_bus::SpiDeviceError;
use esp_hal::dma::DmaBufError;

/// Everything that can go wrong bringing up or driving the hardware.
///
/// Calculator faults are not in here: they are part of normal operation and
/// are shown to the user instead of propagated.
#[derive(Debug, defmt::Format, derive_more::From)]
pub enum AppError {
    DisplayInit(#[defmt(Debug2Format)] PanelInitError),
    DisplayTransfer(#[defmt(Debug2Format)] PanelSpiError),
    DmaBuffer(DmaBufError),
    SpiConfig(esp_hal::spi::master::ConfigError),
    BacklightTimer(esp_hal::ledc::timer::Error),
    BacklightChannel(esp_hal::ledc::channel::Error),
    KeyChannel(embassy_sync::pubsub::Error),
    Glyph(#[defmt(Debug2Format)] GlyphDrawError),
}

type PanelSpiError =
    lcd_async::interface::SpiError<SpiDeviceError<esp_hal::spi::Error, Infallible>, Infallible>;

type PanelInitError = lcd_async::InitError<PanelSpiError, Infallible>;

/// The framebuffer never fails to draw, so only a missing glyph is left.
type GlyphDrawError = u8g2_fonts::Error<Infallible>;
