//! embedded-graphics support
//!
//! The driver draws RGB colors through the same classification as
//! [`crate::Epd2in9bwr::set_pixel`]; the bare [`Framebuffer`] takes the
//! `TriColor` used by the epd-waveshare displays.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::{OriginDimensions, Size};
use embedded_graphics::{draw_target::DrawTarget, Pixel};
use epd_waveshare::color::TriColor;

use crate::buffer::Framebuffer;
use crate::color::{Color, Rgba};
use crate::driver::Epd2in9bwr;

impl<SPI, CS, DC, RST, BSY, DELAY> DrawTarget for Epd2in9bwr<SPI, CS, DC, RST, BSY, DELAY> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(
                point.x,
                point.y,
                Rgba::new(color.r(), color.g(), color.b(), 0xFF),
            );
        }
        Ok(())
    }
}

impl<SPI, CS, DC, RST, BSY, DELAY> OriginDimensions for Epd2in9bwr<SPI, CS, DC, RST, BSY, DELAY> {
    /// Logical size, width and height swap at 90 and 270 degrees
    fn size(&self) -> Size {
        let (width, height) = Epd2in9bwr::size(self);
        let (width, height) = self.rotation().dimensions(width, height);
        Size::new(u32::from(width), u32::from(height))
    }
}

impl DrawTarget for Framebuffer {
    type Color = TriColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, Color::from(color));
        }
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        let (width, height) = self.rotation().dimensions(self.width(), self.height());
        Size::new(u32::from(width), u32::from(height))
    }
}
