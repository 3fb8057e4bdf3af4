use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::{DrawTarget, OriginDimensions, Point, Size},
};

use crate::{button::Button, color::rgb888_to_rgb565, rotation::RotatableSurface, Screen};

pub struct TestScreen {
    background: Rgb565,
    button: Button,
    drawn: bool,
}

impl TestScreen {
    pub fn build<D>(_display: &D) -> Self
    where
        D: OriginDimensions,
    {
        let mut button = Button::new(Size::new(40, 80));
        button.set_position(Point::zero());
        Self {
            background: rgb888_to_rgb565(255, 0, 255),
            button,
            drawn: false,
        }
    }

    pub fn button(&self) -> &Button {
        &self.button
    }
}

impl Screen for TestScreen {
    fn render<D>(&mut self, target: &mut D, _clock_ms: u32) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.drawn {
            return Ok(());
        }
        target.clear(self.background)?;
        self.button.draw(target)?;
        self.drawn = true;
        Ok(())
    }

    fn on_activate<S>(&mut self, _surface: &mut S) -> Result<(), S::Error>
    where
        S: RotatableSurface,
    {
        log::debug!("Activation ignored on test screen");
        Ok(())
    }
}
