use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Arc, Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use profont::PROFONT_10_POINT;

use crate::color::{mix, Palette};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorId(usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub min: i32,
    pub max: i32,
    pub angle_range: u32,
    /// Angle of `min`, clockwise from 3 o'clock.
    pub rotation: i32,
    pub tick_count: u32,
    pub tick_width: u32,
    pub tick_length: u32,
    pub tick_color: Rgb565,
    /// Every `major_nth` tick is a major one, 0 disables major ticks.
    pub major_nth: u32,
    pub major_width: u32,
    pub major_length: u32,
    pub major_color: Rgb565,
    pub label_gap: i32,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            min: 0,
            max: 100,
            angle_range: 270,
            rotation: 135,
            tick_count: 0,
            tick_width: 1,
            tick_length: 8,
            tick_color: Palette::Grey.main(),
            major_nth: 0,
            major_width: 2,
            major_length: 12,
            major_color: Rgb565::BLACK,
            label_gap: 8,
        }
    }
}

impl Scale {
    pub fn angle_of(&self, value: i32) -> f32 {
        let span = self.max - self.min;
        if span == 0 {
            return self.rotation as f32;
        }
        let value = self.clamp(value);
        self.rotation as f32
            + (value - self.min) as f32 * self.angle_range as f32 / span as f32
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min.min(self.max), self.min.max(self.max))
    }

    fn is_major(&self, index: u32) -> bool {
        self.major_nth > 0 && index % self.major_nth == 0
    }

    pub fn major_values(&self) -> impl Iterator<Item = i32> + '_ {
        (0..self.tick_count)
            .filter(|&index| self.is_major(index))
            .map(|index| self.tick_value(index))
    }

    fn tick_value(&self, index: u32) -> i32 {
        if self.tick_count < 2 {
            return self.min;
        }
        self.min + (self.max - self.min) * index as i32 / (self.tick_count - 1) as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorKind {
    Arc {
        width: u32,
        color: Rgb565,
        r_mod: i32,
    },
    ScaleLines {
        color_start: Rgb565,
        color_end: Rgb565,
        local: bool,
        width_mod: i32,
    },
    NeedleLine {
        width: u32,
        color: Rgb565,
        r_mod: i32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    pub kind: IndicatorKind,
    pub start_value: i32,
    pub end_value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterStyle {
    pub background: Rgb565,
    pub border: Rgb565,
    pub border_width: u32,
    pub padding: u32,
    pub pivot_diameter: u32,
    pub pivot_color: Rgb565,
}

impl Default for MeterStyle {
    fn default() -> Self {
        Self {
            background: Rgb565::WHITE,
            border: Palette::Grey.lighten(),
            border_width: 2,
            padding: 8,
            pivot_diameter: 15,
            pivot_color: Rgb565::BLACK,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Meter {
    bounds: Rectangle,
    scale: Scale,
    style: MeterStyle,
    indicators: Vec<Indicator>,
}

impl Meter {
    pub fn new(size: Size) -> Self {
        Self {
            bounds: Rectangle::new(Point::zero(), size),
            scale: Scale::default(),
            style: MeterStyle::default(),
            indicators: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn set_position(&mut self, top_left: Point) {
        self.bounds.top_left = top_left;
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn set_scale_ticks(&mut self, count: u32, width: u32, length: u32, color: Rgb565) {
        self.scale.tick_count = count;
        self.scale.tick_width = width;
        self.scale.tick_length = length;
        self.scale.tick_color = color;
    }

    pub fn set_scale_major_ticks(
        &mut self,
        nth: u32,
        width: u32,
        length: u32,
        color: Rgb565,
        label_gap: i32,
    ) {
        self.scale.major_nth = nth;
        self.scale.major_width = width;
        self.scale.major_length = length;
        self.scale.major_color = color;
        self.scale.label_gap = label_gap;
    }

    fn add_indicator(&mut self, kind: IndicatorKind) -> IndicatorId {
        self.indicators.push(Indicator {
            kind,
            start_value: self.scale.min,
            end_value: self.scale.max,
        });
        IndicatorId(self.indicators.len() - 1)
    }

    pub fn add_arc(&mut self, width: u32, color: Rgb565, r_mod: i32) -> IndicatorId {
        self.add_indicator(IndicatorKind::Arc {
            width,
            color,
            r_mod,
        })
    }

    pub fn add_scale_lines(
        &mut self,
        color_start: Rgb565,
        color_end: Rgb565,
        local: bool,
        width_mod: i32,
    ) -> IndicatorId {
        self.add_indicator(IndicatorKind::ScaleLines {
            color_start,
            color_end,
            local,
            width_mod,
        })
    }

    pub fn add_needle_line(&mut self, width: u32, color: Rgb565, r_mod: i32) -> IndicatorId {
        self.add_indicator(IndicatorKind::NeedleLine {
            width,
            color,
            r_mod,
        })
    }

    pub fn indicator(&self, id: IndicatorId) -> Option<&Indicator> {
        self.indicators.get(id.0)
    }

    pub fn set_indicator_start_value(&mut self, id: IndicatorId, value: i32) {
        let value = self.scale.clamp(value);
        if let Some(indicator) = self.indicators.get_mut(id.0) {
            indicator.start_value = value;
        }
    }

    pub fn set_indicator_end_value(&mut self, id: IndicatorId, value: i32) {
        let value = self.scale.clamp(value);
        if let Some(indicator) = self.indicators.get_mut(id.0) {
            indicator.end_value = value;
        }
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    fn diameter(&self) -> u32 {
        self.bounds.size.width.min(self.bounds.size.height)
    }

    pub fn scale_radius(&self) -> i32 {
        (self.diameter() / 2) as i32 - self.style.padding as i32
    }

    fn polar(&self, angle_deg: f32, radius: i32) -> Point {
        let rad = angle_deg.to_radians();
        let center = self.center();
        Point::new(
            center.x + (radius as f32 * rad.cos()).round() as i32,
            center.y + (radius as f32 * rad.sin()).round() as i32,
        )
    }

    pub fn needle_tip(&self, id: IndicatorId) -> Option<Point> {
        match self.indicator(id)? {
            Indicator {
                kind: IndicatorKind::NeedleLine { r_mod, .. },
                end_value,
                ..
            } => Some(self.polar(
                self.scale.angle_of(*end_value),
                self.scale_radius() + r_mod,
            )),
            _ => None,
        }
    }

    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let center = self.center();
        let face = PrimitiveStyleBuilder::new()
            .fill_color(self.style.background)
            .stroke_color(self.style.border)
            .stroke_width(self.style.border_width)
            .build();
        Circle::with_center(center, self.diameter())
            .into_styled(face)
            .draw(target)?;

        self.draw_arcs(target)?;
        self.draw_ticks(target)?;
        self.draw_needles(target)?;

        Ok(())
    }

    fn draw_arcs<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let radius = self.scale_radius();
        for indicator in &self.indicators {
            let IndicatorKind::Arc {
                width,
                color,
                r_mod,
            } = indicator.kind
            else {
                continue;
            };
            let start = self.scale.angle_of(indicator.start_value);
            let sweep = self.scale.angle_of(indicator.end_value) - start;
            // stroke is centred on the path, keep its outer edge on the scale radius
            let diameter = 2 * (radius + r_mod) - width as i32;
            if sweep <= 0.0 || diameter <= 0 {
                continue;
            }
            Arc::with_center(self.center(), diameter as u32, start.deg(), sweep.deg())
                .into_styled(PrimitiveStyle::with_stroke(color, width))
                .draw(target)?;
        }
        Ok(())
    }

    fn tick_look(&self, value: i32, major: bool) -> (Rgb565, u32) {
        let scale = &self.scale;
        let (mut color, mut width) = if major {
            (scale.major_color, scale.major_width)
        } else {
            (scale.tick_color, scale.tick_width)
        };

        for indicator in &self.indicators {
            let IndicatorKind::ScaleLines {
                color_start,
                color_end,
                local,
                width_mod,
            } = indicator.kind
            else {
                continue;
            };
            if value < indicator.start_value || value > indicator.end_value {
                continue;
            }
            let (from, to) = if local {
                (indicator.start_value, indicator.end_value)
            } else {
                (scale.min, scale.max)
            };
            let ratio = if to > from {
                ((value - from) * 255 / (to - from)) as u8
            } else {
                0
            };
            color = mix(color_start, color_end, ratio);
            width = (width as i32 + width_mod).max(1) as u32;
        }

        (color, width)
    }

    fn draw_ticks<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let scale = &self.scale;
        let radius = self.scale_radius();
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        for index in 0..scale.tick_count {
            let value = scale.tick_value(index);
            let major = scale.is_major(index);
            let length = if major {
                scale.major_length
            } else {
                scale.tick_length
            };
            let (color, width) = self.tick_look(value, major);
            let angle = scale.angle_of(value);

            Line::new(
                self.polar(angle, radius - length as i32),
                self.polar(angle, radius),
            )
            .into_styled(PrimitiveStyle::with_stroke(color, width))
            .draw(target)?;

            if major {
                let label = format!("{value}");
                let position = self.polar(angle, radius - length as i32 - scale.label_gap);
                let char_style = MonoTextStyle::new(&PROFONT_10_POINT, scale.major_color);
                Text::with_text_style(&label, position, char_style, text_style).draw(target)?;
            }
        }
        Ok(())
    }

    fn draw_needles<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut has_needle = false;
        for (index, indicator) in self.indicators.iter().enumerate() {
            let IndicatorKind::NeedleLine { width, color, .. } = indicator.kind else {
                continue;
            };
            if let Some(tip) = self.needle_tip(IndicatorId(index)) {
                Line::new(self.center(), tip)
                    .into_styled(PrimitiveStyle::with_stroke(color, width))
                    .draw(target)?;
                has_needle = true;
            }
        }

        if has_needle {
            Circle::with_center(self.center(), self.style.pivot_diameter)
                .into_styled(PrimitiveStyle::with_fill(self.style.pivot_color))
                .draw(target)?;
        }
        Ok(())
    }
}
