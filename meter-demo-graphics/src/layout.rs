use embedded_graphics::prelude::{Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    TopLeft,
    TopMid,
    TopRight,
    LeftMid,
    Center,
    RightMid,
    BottomLeft,
    BottomMid,
    BottomRight,
}

impl Align {
    pub fn position(self, parent: Size, child: Size, offset: Point) -> Point {
        let (pw, ph) = (parent.width as i32, parent.height as i32);
        let (cw, ch) = (child.width as i32, child.height as i32);

        let x = match self {
            Align::TopLeft | Align::LeftMid | Align::BottomLeft => 0,
            Align::TopMid | Align::Center | Align::BottomMid => (pw - cw) / 2,
            Align::TopRight | Align::RightMid | Align::BottomRight => pw - cw,
        };
        let y = match self {
            Align::TopLeft | Align::TopMid | Align::TopRight => 0,
            Align::LeftMid | Align::Center | Align::RightMid => (ph - ch) / 2,
            Align::BottomLeft | Align::BottomMid | Align::BottomRight => ph - ch,
        };

        Point::new(x, y) + offset
    }
}
