use embedded_graphics::{pixelcolor::Rgb565, prelude::RgbColor};

pub fn rgb888_to_rgb565(r: u8, g: u8, b: u8) -> Rgb565 {
    // Linear rescaling to maximize color accuracy
    let r5 = ((r as u16 * 31) / 255) as u8; // 8 bits -> 5 bits (0-31)
    let g6 = ((g as u16 * 63) / 255) as u8; // 8 bits -> 6 bits (0-63)
    let b5 = ((b as u16 * 31) / 255) as u8; // 8 bits -> 5 bits (0-31)

    Rgb565::new(r5, g6, b5)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Grey,
    Blue,
    Red,
}

impl Palette {
    pub fn main(self) -> Rgb565 {
        match self {
            Palette::Grey => rgb888_to_rgb565(0x9E, 0x9E, 0x9E),
            Palette::Blue => rgb888_to_rgb565(0x21, 0x96, 0xF3),
            Palette::Red => rgb888_to_rgb565(0xF4, 0x43, 0x36),
        }
    }

    pub fn lighten(self) -> Rgb565 {
        match self {
            Palette::Grey => rgb888_to_rgb565(0xE0, 0xE0, 0xE0),
            Palette::Blue => rgb888_to_rgb565(0x90, 0xCA, 0xF9),
            Palette::Red => rgb888_to_rgb565(0xEF, 0x9A, 0x9A),
        }
    }
}

pub fn mix(from: Rgb565, to: Rgb565, mix: u8) -> Rgb565 {
    let blend = |a: u8, b: u8| -> u8 {
        let (a, b, m) = (a as u16, b as u16, mix as u16);
        ((a * (255 - m) + b * m) / 255) as u8
    };
    Rgb565::new(
        blend(from.r(), to.r()),
        blend(from.g(), to.g()),
        blend(from.b(), to.b()),
    )
}
