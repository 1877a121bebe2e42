//! ST7789 panel bring-up: SPI bus, controller init, framebuffer and
//! backlight.

use embassy_embedded_hal::shared_bus::asynch::spi::SpiDevice;
use embassy_sync::{blocking_mutex::raw::NoopRawMutex, mutex::Mutex};
use embedded_graphics::pixelcolor::Rgb565;
use esp_hal::{
    dma::{DmaRxBuf, DmaTxBuf},
    gpio::{AnyPin, Level, Output},
    ledc::{
        self, LSGlobalClkSource, Ledc,
        channel::ChannelIFace as _,
        timer::{LSClockSource, TimerIFace as _, config::Duty},
    },
    peripherals::{DMA_CH0, LEDC, SPI2},
    spi::{self, master::Spi},
    time::Rate,
};
use lcd_async::{
    Builder, Display,
    interface::SpiInterface,
    models::ST7789,
    options::{ColorInversion, Orientation, Rotation},
    raw_framebuf::RawFrameBuf,
};
use static_cell::{ConstStaticCell, StaticCell};

use crate::error::AppError;

pub const WIDTH: u16 = 240;
pub const HEIGHT: u16 = 240;
const PIXEL_SIZE: usize = 2; // RGB565
const FRAME_SIZE: usize = (WIDTH as usize) * (HEIGHT as usize) * PIXEL_SIZE;

const SPI_FREQUENCY_MHZ: u32 = 20;
const BACKLIGHT_PCT: u8 = 40;

type PanelInterface =
    SpiInterface<SpiDevice<'static, NoopRawMutex, SpiBus, Output<'static>>, Output<'static>>;

pub type Framebuffer = RawFrameBuf<Rgb565, &'static mut [u8]>;

pub struct Panel {
    display: Display<PanelInterface, ST7789, Output<'static>>,
    fb: Framebuffer,
    _backlight: Backlight,
}

pub struct PanelPeripherals {
    pub scl: AnyPin<'static>,
    pub sda: AnyPin<'static>,
    pub rst: AnyPin<'static>,
    pub dc: AnyPin<'static>,
    pub cs: AnyPin<'static>,
    pub bl: AnyPin<'static>,
    pub ledc: LEDC<'static>,
    pub spi: SPI2<'static>,
    pub dma_ch: DMA_CH0<'static>,
}

impl Panel {
    pub async fn init(peripherals: PanelPeripherals) -> Result<Self, AppError> {
        let backlight = Backlight::init(peripherals.ledc, peripherals.bl)?;

        let rst = Output::new(peripherals.rst, Level::Low, Default::default());
        let dc = Output::new(peripherals.dc, Level::Low, Default::default());
        let cs = Output::new(peripherals.cs, Level::High, Default::default());

        let spi_bus = init_spi_bus(
            peripherals.spi,
            peripherals.scl,
            peripherals.sda,
            peripherals.dma_ch,
        )?;
        let interface = SpiInterface::new(SpiDevice::new(spi_bus, cs), dc);

        let display = Builder::new(ST7789, interface)
            .reset_pin(rst)
            .display_size(WIDTH, HEIGHT)
            .orientation(Orientation {
                rotation: Rotation::Deg0,
                mirrored: false,
            })
            .invert_colors(ColorInversion::Inverted)
            .init(&mut embassy_time::Delay)
            .await?;

        static FRAME_BUFFER: ConstStaticCell<[u8; FRAME_SIZE]> =
            ConstStaticCell::new([0; FRAME_SIZE]);
        let fb = RawFrameBuf::new(
            FRAME_BUFFER.take().as_mut_slice(),
            WIDTH.into(),
            HEIGHT.into(),
        );

        defmt::info!("panel ready, {}x{}", WIDTH, HEIGHT);

        Ok(Self {
            display,
            fb,
            _backlight: backlight,
        })
    }

    pub fn framebuffer(&mut self) -> &mut Framebuffer {
        &mut self.fb
    }

    /// Push the whole framebuffer to the panel.
    pub async fn flush(&mut self) -> Result<(), AppError> {
        self.display
            .show_raw_data(0, 0, WIDTH, HEIGHT, self.fb.as_bytes())
            .await
            .map_err(From::from)
    }
}

type SpiBus = spi::master::SpiDmaBus<'static, esp_hal::Async>;
type SpiBusMutex = Mutex<NoopRawMutex, SpiBus>;

fn init_spi_bus(
    spi: SPI2<'static>,
    scl: AnyPin<'static>,
    sda: AnyPin<'static>,
    dma_ch: DMA_CH0<'static>,
) -> Result<&'static SpiBusMutex, AppError> {
    // Large enough for one full frame per transfer.
    let (rx_buffer, rx_descriptors, tx_buffer, tx_descriptors) = esp_hal::dma_buffers!(4, 32_000);
    let dma_rx_buf = DmaRxBuf::new(rx_descriptors, rx_buffer)?;
    let dma_tx_buf = DmaTxBuf::new(tx_descriptors, tx_buffer)?;

    static SPI_BUS: StaticCell<SpiBusMutex> = StaticCell::new();

    let bus = Spi::new(
        spi,
        spi::master::Config::default()
            .with_frequency(Rate::from_mhz(SPI_FREQUENCY_MHZ))
            .with_mode(spi::Mode::_0),
    )?
    .with_sck(scl)
    .with_mosi(sda)
    .with_dma(dma_ch)
    .with_buffers(dma_rx_buf, dma_tx_buf)
    .into_async();

    Ok(SPI_BUS.init(Mutex::new(bus)))
}

/// Fixed-level PWM backlight.
struct Backlight {
    _channel: ledc::channel::Channel<'static, ledc::LowSpeed>,
}

impl Backlight {
    fn init(ledc: LEDC<'static>, bl: AnyPin<'static>) -> Result<Self, AppError> {
        let mut ledc = Ledc::new(ledc);
        ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

        static PWM_TIMER: StaticCell<ledc::timer::Timer<'static, ledc::LowSpeed>> =
            StaticCell::new();

        let timer = PWM_TIMER.init(ledc.timer(ledc::timer::Number::Timer0));
        timer.configure(ledc::timer::config::Config {
            duty: Duty::Duty5Bit,
            clock_source: LSClockSource::APBClk,
            frequency: Rate::from_khz(24),
        })?;
        let timer: &'static ledc::timer::Timer<'static, ledc::LowSpeed> = timer;

        let mut channel = ledc.channel(ledc::channel::Number::Channel0, bl);
        channel.configure(ledc::channel::config::Config {
            timer,
            duty_pct: BACKLIGHT_PCT,
            drive_mode: esp_hal::gpio::DriveMode::PushPull,
        })?;

        Ok(Self { _channel: channel })
    }
}
