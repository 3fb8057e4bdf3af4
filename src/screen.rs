use std::sync::Arc;
use std::time::SystemTime;

use anyhow::anyhow;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_hal::spi::MODE_3;
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::gpio::*;
use esp_idf_hal::spi::{Dma, SpiDeviceDriver, SpiDriver, SpiDriverConfig, SPI2};
use esp_idf_hal::units::FromValueType;
use meter_demo_graphics::{InputState, RotatableSurface, RotationState, Screen};
use mipidsi::interface::SpiInterface;
use mipidsi::models::ST7789;
use mipidsi::options::{ColorInversion, Orientation, Rotation};

use crate::threads::debug_dump_stack_info;

const PANEL_WIDTH: u16 = 240;
const PANEL_HEIGHT: u16 = 240;

type Panel<'b> = mipidsi::Display<
    SpiInterface<'b, SpiDeviceDriver<'static, SpiDriver<'static>>, PinDriver<'static, Gpio2, Output>>,
    ST7789,
    PinDriver<'static, Gpio4, Output>,
>;

pub struct PanelBuilder {
    pub spi: SPI2,
    pub rst: Gpio4,
    pub dc: Gpio2,
    pub sclk: Gpio18,
    pub sda: Gpio23,
}

impl PanelBuilder {
    pub fn build(self) -> anyhow::Result<PanelBus> {
        let Self {
            spi,
            rst,
            dc,
            sclk,
            sda,
        } = self;
        // ST7789 wiring:
        // * GPIO18 SCL(K), GPIO23 SDA, so the panel sits on SPI2
        // * GPIO4 RES, GPIO2 DC
        // * CS tied low, BLK not connected
        let rst = PinDriver::output(rst)?;
        let dc = PinDriver::output(dc)?;

        // the ST7789 only works with data_mode MODE_3
        let config = esp_idf_hal::spi::config::Config::new()
            .baudrate(60.MHz().into()) // Absolute max before the display won't be driven anymore
            .data_mode(MODE_3)
            .write_only(true);
        let driver_config = SpiDriverConfig::new().dma(Dma::Channel1(1024 * 32));

        let device = SpiDeviceDriver::new_single(
            spi,
            sclk,
            sda,
            None::<Gpio12>, // Explicitly specify the pin type for SDI/MISO
            None::<Gpio5>,  // Explicitly specify the pin type for CS
            &driver_config,
            &config,
        )?;

        Ok(PanelBus { device, dc, rst })
    }
}

/// SPI device and control pins, before the panel has been initialized.
pub struct PanelBus {
    device: SpiDeviceDriver<'static, SpiDriver<'static>>,
    dc: PinDriver<'static, Gpio2, Output>,
    rst: PinDriver<'static, Gpio4, Output>,
}

/// Hardware rotation through the ST7789's memory access control.
struct PanelRotation<'p, 'b>(&'p mut Panel<'b>);

impl RotatableSurface for PanelRotation<'_, '_> {
    type Error = anyhow::Error;

    fn set_rotation(&mut self, rotation: RotationState) -> Result<(), Self::Error> {
        let rotation = match rotation {
            RotationState::None => Rotation::Deg0,
            RotationState::Deg90 => Rotation::Deg90,
            RotationState::Deg180 => Rotation::Deg180,
            RotationState::Deg270 => Rotation::Deg270,
        };
        self.0
            .set_orientation(Orientation::default().rotate(rotation))
            .map_err(|e| anyhow!("Failed to set panel orientation: {e:?}"))
    }
}

/// Frame times, summarized to the log every `capacity` frames.
struct FrameTimings {
    samples: Vec<u128>,
    capacity: usize,
}

impl FrameTimings {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
        }
    }

    fn record(&mut self, elapsed_ms: u128) {
        self.samples.push(elapsed_ms);
        if self.samples.len() < self.capacity {
            return;
        }
        let timings = &mut self.samples;
        timings.sort();
        let sum: u128 = timings.iter().sum();
        let avg = sum / timings.len() as u128;
        let min = timings[0];
        let max = timings[timings.len() - 1];
        let p50 = timings[timings.len() / 2];
        let p90 = timings[(timings.len() as f32 * 0.9) as usize];
        let p99 = timings[(timings.len() as f32 * 0.99) as usize];
        log::info!("Average render timings:\n * min: {min}ms\n * max: {max}ms\n * avg: {avg}ms\n * p50: {p50}ms\n * p90: {p90}ms\n * p99: {p99}ms");
        timings.clear();
    }
}

pub fn render_loop(bus: PanelBus, inputs: Arc<InputState>) -> anyhow::Result<()> {
    debug_dump_stack_info();

    let PanelBus { device, dc, rst } = bus;

    log::info!("Creating screen buffer");
    let mut buffer = [0_u8; 2048];

    log::info!("Initializing display SPI");
    let di = SpiInterface::new(device, dc, &mut buffer);

    log::info!("Initializing mipidsi display");
    let mut display: Panel<'_> = mipidsi::Builder::new(ST7789, di)
        .reset_pin(rst)
        .display_size(PANEL_WIDTH, PANEL_HEIGHT)
        .invert_colors(ColorInversion::Inverted)
        .init(&mut Ets)
        .map_err(|e| anyhow!("Failed to initialize display: {e:?}"))?;

    #[cfg(not(feature = "test-screen"))]
    let mut screen = meter_demo_graphics::DemoScreen::build(&display)?;
    #[cfg(feature = "test-screen")]
    let mut screen = meter_demo_graphics::TestScreen::build(&display);

    let mut timings = FrameTimings::with_capacity(100);

    log::info!("Clearing display and starting render loop");
    display
        .clear(Rgb565::BLACK)
        .map_err(|e| anyhow!("Failed to clear display: {e:?}"))?;
    let start = SystemTime::now();
    loop {
        for _ in 0..inputs.take_activations() {
            if let Err(e) = screen.on_activate(&mut PanelRotation(&mut display)) {
                log::error!("Activation failed: {:?}", e);
            }
        }

        let before = SystemTime::now();
        let clock_ms = start.elapsed().unwrap_or_default().as_millis() as u32;
        if let Err(e) = screen.render(&mut display, clock_ms) {
            log::error!("Render failed: {:?}", e);
        }
        timings.record(before.elapsed().unwrap_or_default().as_millis());

        FreeRtos::delay_ms(10);
    }
}
