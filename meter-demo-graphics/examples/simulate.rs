//! Runs the meter demo in a desktop window.
//!
//! Click the ROTATE button or press `R` to cycle the rotation. Pass `--test-screen` to
//! show the bring-up screen instead.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::{DrawTarget, Point, RgbColor, Size},
};
use embedded_graphics_simulator::{
    sdl2::Keycode, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use meter_demo_graphics::{DemoScreen, Screen, SoftwareRotation, TestScreen};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut display = SoftwareRotation::new(SimulatorDisplay::<Rgb565>::new(Size::new(240, 240)));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Meter demo", &output_settings);
    display.clear(Rgb565::BLACK)?;
    window.update(display.inner());

    if std::env::args().any(|arg| arg == "--test-screen") {
        let mut screen = TestScreen::build(&display);
        return run(&mut window, &mut display, &mut screen, |_, _| false);
    }

    let mut screen = DemoScreen::build(&display)?;
    run(&mut window, &mut display, &mut screen, |screen, point| {
        screen.button_hit(point)
    })
}

fn run<S>(
    window: &mut Window,
    display: &mut SoftwareRotation<SimulatorDisplay<Rgb565>>,
    screen: &mut S,
    hits_button: impl Fn(&S, Point) -> bool,
) -> anyhow::Result<()>
where
    S: Screen,
{
    let start = std::time::Instant::now();
    loop {
        let before = std::time::Instant::now();
        let clock_ms = start.elapsed().as_millis() as u32;
        screen.render(display, clock_ms)?;
        window.update(display.inner());

        for event in window.events() {
            let hit = |point: Point| hits_button(screen, display.physical_to_logical(point));
            match action_for(event, hit) {
                Action::Quit => return Ok(()),
                Action::Activate => screen.on_activate(display)?,
                Action::Ignore => {}
            }
        }

        let elapsed = before.elapsed().as_millis() as u64;
        let delay = 16u64.saturating_sub(elapsed).max(1);
        std::thread::sleep(std::time::Duration::from_millis(delay));
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Quit,
    Activate,
    Ignore,
}

fn action_for(event: SimulatorEvent, hits_button: impl Fn(Point) -> bool) -> Action {
    match event {
        SimulatorEvent::Quit => Action::Quit,
        SimulatorEvent::MouseButtonUp { point, .. } if hits_button(point) => Action::Activate,
        SimulatorEvent::KeyDown {
            keycode: Keycode::R,
            repeat: false,
            ..
        } => Action::Activate,
        _ => Action::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::sdl2::{Mod, MouseButton};

    use super::*;

    fn key(keycode: Keycode, repeat: bool) -> SimulatorEvent {
        SimulatorEvent::KeyDown {
            keycode,
            keymod: Mod::NOMOD,
            repeat,
        }
    }

    #[test]
    fn r_key_activates() {
        assert_eq!(action_for(key(Keycode::R, false), |_| false), Action::Activate);
        assert_eq!(action_for(key(Keycode::R, true), |_| false), Action::Ignore);
        assert_eq!(action_for(key(Keycode::Q, false), |_| false), Action::Ignore);
    }

    #[test]
    fn click_activates_only_on_button() {
        let click = |x| SimulatorEvent::MouseButtonUp {
            mouse_btn: MouseButton::Left,
            point: Point::new(x, 10),
        };
        let on_button = |point: Point| point.x < 50;
        assert_eq!(action_for(click(20), on_button), Action::Activate);
        assert_eq!(action_for(click(80), on_button), Action::Ignore);
    }
}
