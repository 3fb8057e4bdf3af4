use core::convert::Infallible;

use embedded_graphics::{
    prelude::{DrawTarget, OriginDimensions, Point, Size},
    Pixel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationState {
    #[default]
    None,
    Deg90,
    Deg180,
    Deg270,
}

impl RotationState {
    pub fn next(self) -> Self {
        match self {
            RotationState::None => RotationState::Deg90,
            RotationState::Deg90 => RotationState::Deg180,
            RotationState::Deg180 => RotationState::Deg270,
            RotationState::Deg270 => RotationState::None,
        }
    }

    pub fn from_quarter_turns(turns: u32) -> Self {
        match turns % 4 {
            0 => RotationState::None,
            1 => RotationState::Deg90,
            2 => RotationState::Deg180,
            _ => RotationState::Deg270,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            RotationState::None => 0,
            RotationState::Deg90 => 90,
            RotationState::Deg180 => 180,
            RotationState::Deg270 => 270,
        }
    }

    pub fn swaps_axes(self) -> bool {
        matches!(self, RotationState::Deg90 | RotationState::Deg270)
    }
}

pub trait RotatableSurface {
    type Error;

    fn set_rotation(&mut self, rotation: RotationState) -> Result<(), Self::Error>;
}

#[derive(Debug, Default)]
pub struct RotationCycler {
    state: RotationState,
}

impl RotationCycler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn on_activate<S>(&mut self, surface: &mut S) -> Result<RotationState, S::Error>
    where
        S: RotatableSurface,
    {
        let next = self.state.next();
        surface.set_rotation(next)?;
        self.state = next;
        log::info!("Display rotated to {} degrees", next.degrees());
        Ok(next)
    }
}

/// Rotates everything drawn through it by remapping pixel coordinates.
///
/// Drawing happens in logical coordinates; the wrapped target receives
/// physical ones. Pixels outside the logical area are dropped.
pub struct SoftwareRotation<D> {
    target: D,
    rotation: RotationState,
}

impl<D> SoftwareRotation<D>
where
    D: DrawTarget + OriginDimensions,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            rotation: RotationState::None,
        }
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn inner(&self) -> &D {
        &self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    pub fn physical_to_logical(&self, point: Point) -> Point {
        let physical = self.target.size();
        let (w, h) = (physical.width as i32, physical.height as i32);
        match self.rotation {
            RotationState::None => point,
            RotationState::Deg90 => Point::new(point.y, w - 1 - point.x),
            RotationState::Deg180 => Point::new(w - 1 - point.x, h - 1 - point.y),
            RotationState::Deg270 => Point::new(h - 1 - point.y, point.x),
        }
    }
}

fn logical_to_physical(rotation: RotationState, physical: Size, point: Point) -> Point {
    let (w, h) = (physical.width as i32, physical.height as i32);
    match rotation {
        RotationState::None => point,
        RotationState::Deg90 => Point::new(w - 1 - point.y, point.x),
        RotationState::Deg180 => Point::new(w - 1 - point.x, h - 1 - point.y),
        RotationState::Deg270 => Point::new(point.y, h - 1 - point.x),
    }
}

impl<D> OriginDimensions for SoftwareRotation<D>
where
    D: DrawTarget + OriginDimensions,
{
    fn size(&self) -> Size {
        let physical = self.target.size();
        if self.rotation.swaps_axes() {
            Size::new(physical.height, physical.width)
        } else {
            physical
        }
    }
}

impl<D> DrawTarget for SoftwareRotation<D>
where
    D: DrawTarget + OriginDimensions,
{
    type Color = D::Color;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let rotation = self.rotation;
        let physical = self.target.size();
        let logical = self.size();
        let (lw, lh) = (logical.width as i32, logical.height as i32);

        self.target.draw_iter(
            pixels
                .into_iter()
                .filter(|Pixel(p, _)| p.x >= 0 && p.y >= 0 && p.x < lw && p.y < lh)
                .map(|Pixel(p, color)| Pixel(logical_to_physical(rotation, physical, p), color)),
        )
    }
}

impl<D> RotatableSurface for SoftwareRotation<D>
where
    D: DrawTarget + OriginDimensions,
{
    type Error = Infallible;

    fn set_rotation(&mut self, rotation: RotationState) -> Result<(), Self::Error> {
        self.rotation = rotation;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{pixelcolor::Rgb565, prelude::RgbColor};
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;

    #[derive(Default)]
    struct RecordingSurface {
        applied: Vec<RotationState>,
    }

    impl RotatableSurface for RecordingSurface {
        type Error = Infallible;

        fn set_rotation(&mut self, rotation: RotationState) -> Result<(), Self::Error> {
            self.applied.push(rotation);
            Ok(())
        }
    }

    struct RejectingSurface;

    impl RotatableSurface for RejectingSurface {
        type Error = &'static str;

        fn set_rotation(&mut self, _rotation: RotationState) -> Result<(), Self::Error> {
            Err("bus error")
        }
    }

    #[test]
    fn state_after_n_activations_is_n_mod_4() {
        for n in 0..=17u32 {
            let mut cycler = RotationCycler::new();
            let mut surface = RecordingSurface::default();
            for _ in 0..n {
                cycler.on_activate(&mut surface).unwrap();
            }
            assert_eq!(cycler.state(), RotationState::from_quarter_turns(n));
            assert_eq!(surface.applied.len(), n as usize);
        }
    }

    #[test]
    fn four_activations_return_to_none() {
        let mut cycler = RotationCycler::new();
        let mut surface = RecordingSurface::default();
        for _ in 0..4 {
            cycler.on_activate(&mut surface).unwrap();
        }
        assert_eq!(cycler.state(), RotationState::None);
        assert_eq!(
            surface.applied,
            vec![
                RotationState::Deg90,
                RotationState::Deg180,
                RotationState::Deg270,
                RotationState::None,
            ]
        );
    }

    #[test]
    fn failed_surface_keeps_previous_state() {
        let mut cycler = RotationCycler::new();
        assert_eq!(cycler.on_activate(&mut RejectingSurface), Err("bus error"));
        assert_eq!(cycler.state(), RotationState::None);
    }

    #[test]
    fn logical_size_swaps_for_quarter_turns() {
        let mut surface = SoftwareRotation::new(SimulatorDisplay::<Rgb565>::new(Size::new(240, 320)));
        assert_eq!(surface.size(), Size::new(240, 320));
        surface.set_rotation(RotationState::Deg90).unwrap();
        assert_eq!(surface.size(), Size::new(320, 240));
        surface.set_rotation(RotationState::Deg180).unwrap();
        assert_eq!(surface.size(), Size::new(240, 320));
        surface.set_rotation(RotationState::Deg270).unwrap();
        assert_eq!(surface.size(), Size::new(320, 240));
    }

    #[test]
    fn logical_origin_lands_on_expected_corner() {
        let cases = [
            (RotationState::None, Point::new(0, 0)),
            (RotationState::Deg90, Point::new(39, 0)),
            (RotationState::Deg180, Point::new(39, 29)),
            (RotationState::Deg270, Point::new(0, 29)),
        ];
        for (rotation, expected) in cases {
            let mut surface =
                SoftwareRotation::new(SimulatorDisplay::<Rgb565>::new(Size::new(40, 30)));
            surface.set_rotation(rotation).unwrap();
            surface
                .draw_iter([Pixel(Point::zero(), Rgb565::RED)])
                .unwrap();
            assert_eq!(surface.inner().get_pixel(expected), Rgb565::RED, "{rotation:?}");
            assert_eq!(surface.physical_to_logical(expected), Point::zero());
        }
    }

    #[test]
    fn drops_pixels_outside_logical_area() {
        let mut surface = SoftwareRotation::new(SimulatorDisplay::<Rgb565>::new(Size::new(40, 30)));
        surface.set_rotation(RotationState::Deg90).unwrap();
        // x = 35 is inside the physical width but outside the rotated logical width of 30
        surface
            .draw_iter([Pixel(Point::new(35, 0), Rgb565::RED)])
            .unwrap();
        let display = surface.into_inner();
        for y in 0..30 {
            for x in 0..40 {
                assert_ne!(display.get_pixel(Point::new(x, y)), Rgb565::RED);
            }
        }
    }
}
