use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{
        Arc, ContainsPoint, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle,
    },
    text::{Baseline, Text},
};
use profont::PROFONT_14_POINT;

use crate::{color::Palette, layout::Align};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Refresh,
}

#[derive(Clone, Copy)]
pub struct ButtonStyle {
    pub background: Rgb565,
    pub text_color: Rgb565,
    pub radius: u32,
    pub pad_horizontal: u32,
    pub pad_vertical: u32,
    pub symbol_gap: u32,
    pub font: &'static MonoFont<'static>,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            background: Palette::Blue.main(),
            text_color: Rgb565::WHITE,
            radius: 8,
            pad_horizontal: 12,
            pad_vertical: 8,
            symbol_gap: 6,
            font: &PROFONT_14_POINT,
        }
    }
}

#[derive(Clone)]
pub struct Button {
    bounds: Rectangle,
    symbol: Option<Symbol>,
    label: Option<&'static str>,
    style: ButtonStyle,
}

impl Button {
    pub fn new(size: Size) -> Self {
        Self {
            bounds: Rectangle::new(Point::zero(), size),
            symbol: None,
            label: None,
            style: ButtonStyle::default(),
        }
    }

    pub fn with_label(symbol: Option<Symbol>, label: &'static str) -> Self {
        let mut button = Self {
            bounds: Rectangle::zero(),
            symbol,
            label: Some(label),
            style: ButtonStyle::default(),
        };
        button.bounds.size = button.content_size();
        button
    }

    fn text_width(&self, text: &str) -> u32 {
        let font = self.style.font;
        let chars = text.chars().count() as u32;
        if chars == 0 {
            return 0;
        }
        chars * font.character_size.width + (chars - 1) * font.character_spacing
    }

    fn symbol_side(&self) -> u32 {
        self.style.font.character_size.height
    }

    fn content_size(&self) -> Size {
        let style = &self.style;
        let mut width = 0;
        if self.symbol.is_some() {
            width += self.symbol_side();
        }
        if let Some(label) = self.label {
            if self.symbol.is_some() {
                width += style.symbol_gap;
            }
            width += self.text_width(label);
        }
        Size::new(
            width + 2 * style.pad_horizontal,
            style.font.character_size.height + 2 * style.pad_vertical,
        )
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn style_mut(&mut self) -> &mut ButtonStyle {
        &mut self.style
    }

    pub fn set_position(&mut self, top_left: Point) {
        self.bounds.top_left = top_left;
    }

    pub fn align(&mut self, parent: Size, align: Align, offset: Point) {
        self.bounds.top_left = align.position(parent, self.bounds.size, offset);
    }

    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let style = &self.style;
        let radius = style
            .radius
            .min(self.bounds.size.width / 2)
            .min(self.bounds.size.height / 2);
        RoundedRectangle::with_equal_corners(self.bounds, Size::new(radius, radius))
            .into_styled(PrimitiveStyle::with_fill(style.background))
            .draw(target)?;

        if self.symbol.is_none() && self.label.is_none() {
            return Ok(());
        }

        let content = self.content_size() - Size::new(2 * style.pad_horizontal, 2 * style.pad_vertical);
        let mut cursor = Align::Center.position(self.bounds.size, content, self.bounds.top_left);
        let middle_y = cursor.y + content.height as i32 / 2;

        if let Some(Symbol::Refresh) = self.symbol {
            let side = self.symbol_side();
            draw_refresh(target, cursor + Size::new(side / 2, side / 2), side, style.text_color)?;
            cursor.x += (side + style.symbol_gap) as i32;
        }

        if let Some(label) = self.label {
            let text_style = MonoTextStyle::new(style.font, style.text_color);
            Text::with_baseline(label, Point::new(cursor.x, middle_y), text_style, Baseline::Middle)
                .draw(target)?;
        }

        Ok(())
    }
}

fn draw_refresh<D>(target: &mut D, center: Point, side: u32, color: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let diameter = side.saturating_sub(4).max(4);
    let stroke = 2;
    Arc::with_center(center, diameter, 330.0_f32.deg(), 270.0_f32.deg())
        .into_styled(PrimitiveStyle::with_stroke(color, stroke))
        .draw(target)?;

    // head sits where the arc ends, at 240 degrees
    let end = 240.0_f32.to_radians();
    let r = diameter as f32 / 2.0;
    let (cos, sin) = (end.cos(), end.sin());
    let at = |radial: f32, tangent: f32| {
        Point::new(
            center.x + (cos * (r + radial) - sin * tangent).round() as i32,
            center.y + (sin * (r + radial) + cos * tangent).round() as i32,
        )
    };
    Triangle::new(at(-3.0, 0.0), at(3.0, 0.0), at(0.0, 3.0))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(target)?;

    Ok(())
}
