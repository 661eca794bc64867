//! Colours and alpha compositing.

/// Straight (non-premultiplied) 8-bit RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::gray(0);
    pub const WHITE: Rgba = Rgba::gray(255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 255 }
    }

    pub const fn gray(v: u8) -> Self {
        Rgba { r: v, g: v, b: v, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Rgba { a, ..self }
    }

    /// Packed opaque `0xFFRRGGBB`.
    pub const fn to_argb(self) -> u32 {
        0xFF00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Composite this colour over an opaque packed pixel.  Each channel moves
    /// from `dst` toward this colour by `a / 255`.
    pub fn over(self, dst: u32) -> u32 {
        let k = match self.a {
            255 => return self.to_argb(),
            0 => return dst,
            a => a as f32 / 255.0,
        };
        let channel = |shift: u32, src: u8| {
            let d = ((dst >> shift) & 0xFF) as f32;
            ((d + (src as f32 - d) * k).round() as u32) << shift
        };
        0xFF00_0000 | channel(16, self.r) | channel(8, self.g) | channel(0, self.b)
    }
}

impl From<sketch_core::Rgb> for Rgba {
    fn from(c: sketch_core::Rgb) -> Self {
        Rgba::rgb(c.r, c.g, c.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_replaces_transparent_keeps() {
        let dst = 0xFF102030;
        assert_eq!(Rgba::rgb(1, 2, 3).over(dst), 0xFF010203);
        assert_eq!(Rgba::new(1, 2, 3, 0).over(dst), dst);
    }

    #[test]
    fn half_alpha_lands_in_between() {
        let out = Rgba::new(255, 255, 255, 128).over(0xFF000000);
        let r = (out >> 16) & 0xFF;
        assert!((127..=129).contains(&r), "r = {}", r);
        assert_eq!(out >> 24, 0xFF);
    }

    #[test]
    fn translucent_channels_move_independently() {
        // a quarter of the way: red 0x40 toward 0xC0, green 0x80 toward 0x00
        let out = Rgba::new(0xC0, 0x00, 0x40, 64).over(0xFF40_8040);
        assert_eq!(out, 0xFF60_6040);
    }
}
