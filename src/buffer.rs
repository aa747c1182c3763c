//! Two-plane framebuffer for the tri-color panel.
//!
//! Each plane holds one bit per pixel, MSB first, rows of `logical_width` bits.
//! Rotation is applied on write only.

use crate::color::Color;
use crate::rotation::Rotation;
use crate::{Error, Result};

/// One of the two bit planes sent to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    /// Plane 0, sent after data start transmission 1. A cleared bit is black.
    Black = 0,
    /// Plane 1, sent after data start transmission 2. A cleared bit is red/yellow.
    Chromatic = 1,
}

/// Black and chromatic bit planes plus the rotation used for writes.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    planes: [Vec<u8>; 2],
    width: u16,
    height: u16,
    logical_width: u16,
    rotation: Rotation,
}

impl Framebuffer {
    /// Creates a white framebuffer.
    ///
    /// `logical_width` must be a multiple of 8 and at least `width`.
    pub fn new(width: u16, height: u16, logical_width: u16) -> Result<Self> {
        if logical_width % 8 != 0 || logical_width < width {
            return Err(Error::InvalidLogicalWidth {
                logical_width,
                width,
            });
        }
        let len = buffer_len(logical_width, height);
        Ok(Self {
            planes: [vec![0xFF; len], vec![0xFF; len]],
            width,
            height,
            logical_width,
            rotation: Rotation::default(),
        })
    }

    /// Visible width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Visible height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Row width in pixels.
    pub fn logical_width(&self) -> u16 {
        self.logical_width
    }

    /// Size of each plane in bytes.
    pub fn len(&self) -> usize {
        self.planes[0].len()
    }

    /// Returns true for a zero-sized buffer.
    pub fn is_empty(&self) -> bool {
        self.planes[0].is_empty()
    }

    /// Current write rotation.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Changes the rotation used by later writes.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Raw bytes of one plane.
    pub fn plane(&self, plane: Plane) -> &[u8] {
        &self.planes[plane as usize]
    }

    /// Sets every pixel to white.
    pub fn clear(&mut self) {
        for plane in self.planes.iter_mut() {
            plane.fill(0xFF);
        }
    }

    /// Writes a pixel in logical (rotated) coordinates.
    ///
    /// Pixels outside the buffer or the visible area are dropped.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some((x, y)) = self.rotation.apply(
            x,
            y,
            i32::from(self.width),
            i32::from(self.height),
        ) else {
            return;
        };
        self.set_panel_pixel(x, y, color);
    }

    /// Writes a pixel in panel coordinates, ignoring rotation.
    pub fn set_panel_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some((index, mask)) = self.address(x, y) else {
            return;
        };
        let [black, chromatic] = &mut self.planes;
        let (black_bit, chromatic_bit) = color.plane_bits();
        set_bit(&mut black[index], mask, black_bit);
        set_bit(&mut chromatic[index], mask, chromatic_bit);
    }

    /// Reads a pixel in panel coordinates.
    ///
    /// Returns `None` outside the visible area or for a pixel with both bits clear.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let (index, mask) = self.address(x, y)?;
        Color::from_plane_bits(
            self.planes[0][index] & mask != 0,
            self.planes[1][index] & mask != 0,
        )
    }

    /// Byte index and bit mask of a panel coordinate, shared by both planes.
    ///
    /// Rows are `logical_width` pixels apart, so with `width < logical_width`
    /// the padding at the end of each row is never written.
    fn address(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || x >= i32::from(self.logical_width) || y < 0 || y >= i32::from(self.height) {
            return None;
        }
        if x >= i32::from(self.width) {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        let index = (x + y * usize::from(self.logical_width)) / 8;
        Some((index, 0x80 >> (x % 8)))
    }
}

/// Bytes per plane for a buffer of `logical_width` x `height` pixels.
pub const fn buffer_len(logical_width: u16, height: u16) -> usize {
    logical_width as usize * height as usize / 8
}

fn set_bit(byte: &mut u8, mask: u8, on: bool) {
    if on {
        *byte |= mask;
    } else {
        *byte &= !mask;
    }
}
