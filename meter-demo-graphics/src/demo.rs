use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::{DrawTarget, OriginDimensions, Point, RgbColor, Size},
};

use crate::{
    animations::{AnimationConfig, AnimationError, ValueAnimation},
    button::{Button, Symbol},
    color::Palette,
    layout::Align,
    meter::{IndicatorId, Meter},
    rotation::{RotatableSurface, RotationCycler, RotationState},
    Screen,
};

#[derive(Debug, Clone, Copy)]
pub struct DemoConfig {
    pub background: Rgb565,
    pub meter_size: Size,
    pub button_align: Align,
    pub button_offset: Point,
    pub needle: AnimationConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            background: Rgb565::WHITE,
            meter_size: Size::new(200, 200),
            button_align: Align::BottomLeft,
            button_offset: Point::new(30, -30),
            needle: AnimationConfig::needle_sweep(),
        }
    }
}

pub struct DemoScreen {
    config: DemoConfig,
    meter: Meter,
    needle: IndicatorId,
    button: Button,
    rotation: RotationCycler,
    animation: ValueAnimation,
    layout_size: Size,
    needs_full_redraw: bool,
    drawn_value: Option<i32>,
}

impl DemoScreen {
    pub fn build<D>(display: &D) -> Result<Self, AnimationError>
    where
        D: OriginDimensions,
    {
        Self::build_with(display, DemoConfig::default())
    }

    pub fn build_with<D>(display: &D, config: DemoConfig) -> Result<Self, AnimationError>
    where
        D: OriginDimensions,
    {
        let animation = ValueAnimation::start(config.needle, 0)?;

        let mut meter = Meter::new(config.meter_size);
        meter.set_scale_ticks(41, 2, 10, Palette::Grey.main());
        meter.set_scale_major_ticks(8, 4, 15, Rgb565::BLACK, 10);

        let blue = Palette::Blue.main();
        let red = Palette::Red.main();
        let low_arc = meter.add_arc(3, blue, 0);
        meter.set_indicator_start_value(low_arc, 0);
        meter.set_indicator_end_value(low_arc, 20);
        let low_lines = meter.add_scale_lines(blue, blue, false, 0);
        meter.set_indicator_start_value(low_lines, 0);
        meter.set_indicator_end_value(low_lines, 20);

        let high_arc = meter.add_arc(3, red, 0);
        meter.set_indicator_start_value(high_arc, 80);
        meter.set_indicator_end_value(high_arc, 100);
        let high_lines = meter.add_scale_lines(red, red, false, 0);
        meter.set_indicator_start_value(high_lines, 80);
        meter.set_indicator_end_value(high_lines, 100);

        let needle = meter.add_needle_line(4, Palette::Grey.main(), -10);
        meter.set_indicator_end_value(needle, config.needle.start);

        let button = Button::with_label(Some(Symbol::Refresh), "ROTATE");

        let mut screen = Self {
            config,
            meter,
            needle,
            button,
            rotation: RotationCycler::new(),
            animation,
            layout_size: Size::zero(),
            needs_full_redraw: true,
            drawn_value: None,
        };
        screen.layout(display.size());
        Ok(screen)
    }

    fn layout(&mut self, size: Size) {
        let meter_pos = Align::Center.position(size, self.config.meter_size, Point::zero());
        self.meter.set_position(meter_pos);
        self.button
            .align(size, self.config.button_align, self.config.button_offset);
        self.layout_size = size;
        self.needs_full_redraw = true;
        log::debug!("Demo laid out for {}x{}", size.width, size.height);
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation.state()
    }

    pub fn meter(&self) -> &Meter {
        &self.meter
    }

    pub fn needle_value(&self) -> i32 {
        self.meter
            .indicator(self.needle)
            .map(|needle| needle.end_value)
            .unwrap_or(self.config.needle.start)
    }

    pub fn button(&self) -> &Button {
        &self.button
    }

    pub fn set_value(&mut self, value: i32) {
        self.meter.set_indicator_end_value(self.needle, value);
    }

    pub fn button_hit(&self, point: Point) -> bool {
        self.button.contains(point)
    }
}

impl Screen for DemoScreen {
    fn render<D>(&mut self, target: &mut D, clock_ms: u32) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let size = target.bounding_box().size;
        if size != self.layout_size {
            self.layout(size);
        }

        self.set_value(self.animation.value_at(clock_ms));

        let value = self.needle_value();
        if self.needs_full_redraw {
            target.clear(self.config.background)?;
            self.meter.draw(target)?;
            self.button.draw(target)?;
            self.needs_full_redraw = false;
            self.drawn_value = Some(value);
            return Ok(());
        }

        if self.drawn_value != Some(value) {
            self.meter.draw(target)?;
            // the button stays on top where the two overlap
            if !self.meter.bounds().intersection(&self.button.bounds()).is_zero_sized() {
                self.button.draw(target)?;
            }
            self.drawn_value = Some(value);
        }
        Ok(())
    }

    fn on_activate<S>(&mut self, surface: &mut S) -> Result<(), S::Error>
    where
        S: RotatableSurface,
    {
        self.rotation.on_activate(surface)?;
        self.needs_full_redraw = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::rotation::SoftwareRotation;

    fn surface() -> SoftwareRotation<SimulatorDisplay<Rgb565>> {
        SoftwareRotation::new(SimulatorDisplay::new(Size::new(240, 320)))
    }

    #[test]
    fn activations_cycle_rotation() {
        let mut surface = surface();
        let mut screen = DemoScreen::build(&surface).unwrap();
        assert_eq!(screen.rotation(), RotationState::None);

        screen.on_activate(&mut surface).unwrap();
        assert_eq!(screen.rotation(), RotationState::Deg90);
        assert_eq!(surface.rotation(), RotationState::Deg90);

        for _ in 0..3 {
            screen.on_activate(&mut surface).unwrap();
        }
        assert_eq!(screen.rotation(), RotationState::None);
        assert_eq!(surface.rotation(), RotationState::None);
    }

    #[test]
    fn labels_every_eighth_tick() {
        let screen = DemoScreen::build(&surface()).unwrap();
        let scale = screen.meter().scale();
        assert_eq!(scale.tick_count, 41);
        assert_eq!(
            scale.major_values().collect::<Vec<_>>(),
            vec![0, 20, 40, 60, 80, 100]
        );
    }

    #[test]
    fn needle_follows_clock() {
        let mut surface = surface();
        let mut screen = DemoScreen::build(&surface).unwrap();

        screen.render(&mut surface, 0).unwrap();
        assert_eq!(screen.needle_value(), 0);
        screen.render(&mut surface, 500).unwrap();
        assert_eq!(screen.needle_value(), 100);
        screen.render(&mut surface, 850).unwrap();
        assert_eq!(screen.needle_value(), 50);
        screen.render(&mut surface, 1200).unwrap();
        assert_eq!(screen.needle_value(), 0);
    }

    #[test]
    fn layout_follows_rotation() {
        let mut surface = surface();
        let mut screen = DemoScreen::build(&surface).unwrap();
        screen.render(&mut surface, 0).unwrap();
        assert_eq!(screen.meter().bounds().top_left, Point::new(20, 60));
        assert_eq!(screen.button().bounds().top_left.x, 30);

        screen.on_activate(&mut surface).unwrap();
        screen.render(&mut surface, 16).unwrap();
        assert_eq!(screen.meter().bounds().top_left, Point::new(60, 20));
        let button = screen.button().bounds();
        assert_eq!(
            button.top_left.y + button.size.height as i32,
            240 - 30,
        );
    }

    #[test]
    fn draws_background_button_and_moving_needle() {
        let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(240, 240));
        let mut screen = DemoScreen::build(&display).unwrap();
        screen.render(&mut display, 500).unwrap();

        assert_eq!(display.get_pixel(Point::new(1, 1)), Rgb565::WHITE);
        let button = screen.button().bounds();
        assert_eq!(
            display.get_pixel(button.top_left + Point::new(2, button.size.height as i32 / 2)),
            Palette::Blue.main()
        );
        // value 100 points down-right from the meter centre at (119, 119)
        assert_eq!(display.get_pixel(Point::new(155, 155)), Palette::Grey.main());

        // a full cycle later the needle is back at 0 and the old one is erased
        screen.render(&mut display, 1200).unwrap();
        assert_eq!(display.get_pixel(Point::new(155, 155)), Rgb565::WHITE);
        assert_eq!(display.get_pixel(Point::new(83, 155)), Palette::Grey.main());
    }

    #[test]
    fn rejects_inverted_needle_range() {
        let display = SimulatorDisplay::<Rgb565>::new(Size::new(240, 240));
        let config = DemoConfig {
            needle: AnimationConfig {
                start: 100,
                end: 0,
                ..AnimationConfig::needle_sweep()
            },
            ..DemoConfig::default()
        };
        assert!(matches!(
            DemoScreen::build_with(&display, config),
            Err(AnimationError::InvalidRange { .. })
        ));
    }
}
