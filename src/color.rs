//! Pixel colors and their two-plane encoding.
//!
//! The panel shows three colors. Every pixel is one bit in each plane:
//!
//! | color   | plane 0 (black) | plane 1 (chromatic) |
//! |---------|-----------------|---------------------|
//! | white   | 1               | 1                   |
//! | colored | 1               | 0                   |
//! | black   | 0               | 1                   |
//!
//! Both bits clear is never written.

use epd_waveshare::color::TriColor;

/// One of the three colors the panel can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Background, also what a cleared buffer holds
    #[default]
    White,
    /// Red or yellow, depending on the panel
    Colored,
    /// Black
    Black,
}

impl Color {
    /// Classify an RGBA value.
    ///
    /// Pure red (any non-zero red, no green, no blue) is the chromatic color,
    /// anything with green or blue is black and all-zero is white.
    /// The alpha channel is ignored.
    pub fn classify(rgba: Rgba) -> Self {
        if rgba.r != 0 && rgba.g == 0 && rgba.b == 0 {
            Color::Colored
        } else if rgba.g != 0 || rgba.b != 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Bit values for plane 0 and plane 1.
    pub fn plane_bits(self) -> (bool, bool) {
        match self {
            Color::White => (true, true),
            Color::Colored => (true, false),
            Color::Black => (false, true),
        }
    }

    /// Decode a pixel from its plane bits, `None` for the unused state.
    pub fn from_plane_bits(black: bool, chromatic: bool) -> Option<Self> {
        match (black, chromatic) {
            (true, true) => Some(Color::White),
            (true, false) => Some(Color::Colored),
            (false, true) => Some(Color::Black),
            (false, false) => None,
        }
    }
}

impl From<Rgba> for Color {
    fn from(rgba: Rgba) -> Self {
        Color::classify(rgba)
    }
}

impl From<TriColor> for Color {
    fn from(color: TriColor) -> Self {
        match color {
            TriColor::White => Color::White,
            TriColor::Chromatic => Color::Colored,
            TriColor::Black => Color::Black,
        }
    }
}

/// 8-bit RGBA color, the input format of [`crate::Epd2in9bwr::set_pixel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel, not used for classification
    pub a: u8,
}

impl Rgba {
    /// Create a color from its four channels
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<(u8, u8, u8, u8)> for Rgba {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self { r, g, b, a }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classification() {
        assert_eq!(Color::classify(Rgba::new(0, 0, 0, 255)), Color::White);
        assert_eq!(Color::classify(Rgba::new(0, 0, 0, 0)), Color::White);
        assert_eq!(Color::classify(Rgba::new(255, 0, 0, 255)), Color::Colored);
        assert_eq!(Color::classify(Rgba::new(1, 0, 0, 0)), Color::Colored);
        assert_eq!(Color::classify(Rgba::new(1, 1, 1, 255)), Color::Black);
        assert_eq!(Color::classify(Rgba::new(0, 0, 1, 255)), Color::Black);
        assert_eq!(Color::classify(Rgba::new(255, 255, 255, 255)), Color::Black);
    }

    #[test]
    fn test_tricolor() {
        assert_eq!(Color::from(TriColor::White), Color::White);
        assert_eq!(Color::from(TriColor::Chromatic), Color::Colored);
        assert_eq!(Color::from(TriColor::Black), Color::Black);
    }

    #[test]
    fn test_plane_bits_decode() {
        for color in [Color::White, Color::Colored, Color::Black] {
            let (black, chromatic) = color.plane_bits();
            assert_eq!(Color::from_plane_bits(black, chromatic), Some(color));
        }
        assert_eq!(Color::from_plane_bits(false, false), None);
    }

    proptest! {
        #[test]
        fn classification_is_total(r: u8, g: u8, b: u8, a: u8) {
            let color = Color::classify(Rgba::new(r, g, b, a));
            prop_assert_eq!(color, Color::classify(Rgba::new(r, g, b, 0)));
            prop_assert_ne!(color.plane_bits(), (false, false));
            if g != 0 || b != 0 {
                prop_assert_eq!(color, Color::Black);
            } else if r != 0 {
                prop_assert_eq!(color, Color::Colored);
            } else {
                prop_assert_eq!(color, Color::White);
            }
        }
    }
}
