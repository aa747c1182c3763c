//! Display rotation support.
//!
//! The panel itself has no rotation setting. Rotation is a coordinate transform
//! applied to every pixel write; already written buffer contents never move.

/// Clock-wise display rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// Native orientation, 128 wide and 296 tall.
    #[default]
    Rotate0,
    /// 90 degrees clock-wise.
    Rotate90,
    /// 180 degrees.
    Rotate180,
    /// 270 degrees clock-wise.
    Rotate270,
}

impl Rotation {
    /// Maps a logical coordinate to panel coordinates.
    ///
    /// `width` and `height` are the panel's visible dimensions. Returns `None`
    /// when the mirrored coordinate does not fit in an `i32`.
    pub fn apply(self, x: i32, y: i32, width: i32, height: i32) -> Option<(i32, i32)> {
        let mirror = |extent: i32, v: i32| extent.checked_sub(v)?.checked_sub(1);
        match self {
            Rotation::Rotate0 => Some((x, y)),
            Rotation::Rotate90 => Some((mirror(width, y)?, x)),
            Rotation::Rotate180 => Some((mirror(width, x)?, mirror(height, y)?)),
            Rotation::Rotate270 => Some((y, mirror(height, x)?)),
        }
    }

    /// The rotation that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Rotation::Rotate0 => Rotation::Rotate0,
            Rotation::Rotate90 => Rotation::Rotate270,
            Rotation::Rotate180 => Rotation::Rotate180,
            Rotation::Rotate270 => Rotation::Rotate90,
        }
    }

    /// Returns true if logical width and height are swapped relative to the panel.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Rotate90 | Rotation::Rotate270)
    }

    /// Logical drawing dimensions for a panel of `width` x `height`.
    pub fn dimensions(self, width: u16, height: u16) -> (u16, u16) {
        if self.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Rotation angle in degrees.
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Rotate0 => 0,
            Rotation::Rotate90 => 90,
            Rotation::Rotate180 => 180,
            Rotation::Rotate270 => 270,
        }
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}
