use embedded_graphics::{pixelcolor::Rgb565, prelude::DrawTarget};

pub mod animations;
pub mod button;
pub mod color;
pub mod demo;
pub mod input;
pub mod layout;
pub mod meter;
pub mod rotation;
pub mod test_screen;

pub use demo::{DemoConfig, DemoScreen};
pub use input::InputState;
pub use rotation::{RotatableSurface, RotationState, SoftwareRotation};
pub use test_screen::TestScreen;

pub trait Screen {
    fn render<D>(&mut self, target: &mut D, clock_ms: u32) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;

    fn on_activate<S>(&mut self, surface: &mut S) -> Result<(), S::Error>
    where
        S: RotatableSurface;
}
