use std::sync::Arc;

use esp_idf_hal::peripherals::Peripherals;
use meter_demo_graphics::InputState;

mod button;
mod screen;
mod threads;

fn main() -> anyhow::Result<()> {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    log::info!("Starting meter demo");

    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    let panel = screen::PanelBuilder {
        spi: peripherals.spi2,
        rst: pins.gpio4,
        dc: pins.gpio2,
        sclk: pins.gpio18,
        sda: pins.gpio23,
    }
    .build()?;

    let inputs = Arc::new(InputState::default());

    let button_inputs = inputs.clone();
    let button_pin = pins.gpio0;
    threads::Worker::new("rotate_button")
        .with_stack_size(4)
        .spawn(move || {
            if let Err(e) = button::button_loop(button_pin, button_inputs) {
                log::error!("Rotate button loop failed: {:?}", e);
            }
        })?;

    // The render loop owns the panel and the screen, activations are handed over through `inputs`
    screen::render_loop(panel, inputs)
}
