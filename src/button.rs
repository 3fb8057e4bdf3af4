use std::sync::Arc;
use std::time::SystemTime;

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{Gpio0, PinDriver, Pull};
use meter_demo_graphics::input::{Polarity, PushButton};
use meter_demo_graphics::InputState;

use crate::threads::debug_dump_stack_info;

const POLL_PERIOD_MS: u32 = 5;
const DEBOUNCE_MS: u32 = 30;

/// Polls the rotate button (the BOOT button on GPIO0, pressed = low) and
/// records one activation per click. The render loop picks them up.
pub fn button_loop(pin: Gpio0, inputs: Arc<InputState>) -> anyhow::Result<()> {
    debug_dump_stack_info();

    let mut driver = PinDriver::input(pin)?;
    driver.set_pull(Pull::Up)?;
    let mut button = PushButton::new(driver, Polarity::ActiveLow, DEBOUNCE_MS);

    let start = SystemTime::now();
    loop {
        let clock_ms = start.elapsed().unwrap_or_default().as_millis() as u32;
        match button.poll(clock_ms) {
            Ok(true) => {
                log::debug!("Rotate button clicked");
                inputs.record_activation();
            }
            Ok(false) => {}
            Err(e) => {
                log::error!("Failed to read rotate button: {:?}", e);
                FreeRtos::delay_ms(1000);
            }
        }
        FreeRtos::delay_ms(POLL_PERIOD_MS);
    }
}
