//! Panel configuration.

use crate::rotation::Rotation;
use crate::{Error, Result, HEIGHT, LOGICAL_WIDTH, WIDTH};

/// Level of the busy line that means the panel is idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusyLevel {
    /// Busy line high when idle. UC8151/IL0373 drive BUSY_N low while working.
    #[default]
    High,
    /// Busy line low when idle.
    Low,
}

/// How long to keep polling the busy line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusyWait {
    /// Poll until the panel is idle, however long it takes.
    #[default]
    Unbounded,
    /// Give up with [`Error::BusyTimeout`] after this many polls, 10 ms apart.
    ///
    /// At least one poll is always made, so `MaxPolls(0)` acts like `MaxPolls(1)`.
    MaxPolls(u32),
}

/// Driver configuration, passed to [`crate::Epd2in9bwr::configure`].
///
/// Zero dimensions fall back to the 128x296 panel defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// Visible width in pixels
    pub width: u16,
    /// Visible height in pixels
    pub height: u16,
    /// Buffer row width in pixels, multiple of 8 and not less than `width`
    pub logical_width: u16,
    /// Clock-wise rotation applied to pixel writes
    pub rotation: Rotation,
    /// Idle level of the busy line
    pub busy_idle: BusyLevel,
    /// Busy polling limit
    pub busy_wait: BusyWait,
}

impl Config {
    /// Set the visible size
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the buffer row width
    pub fn with_logical_width(mut self, logical_width: u16) -> Self {
        self.logical_width = logical_width;
        self
    }

    /// Set the rotation
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the idle level of the busy line
    pub fn with_busy_idle(mut self, level: BusyLevel) -> Self {
        self.busy_idle = level;
        self
    }

    /// Set the busy polling limit
    pub fn with_busy_wait(mut self, wait: BusyWait) -> Self {
        self.busy_wait = wait;
        self
    }

    /// Fills in defaults for zero values and validates the row width.
    pub fn resolve(self) -> Result<Self> {
        let or_default = |value: u16, default: u16| if value == 0 { default } else { value };
        let resolved = Self {
            width: or_default(self.width, WIDTH),
            height: or_default(self.height, HEIGHT),
            logical_width: or_default(self.logical_width, LOGICAL_WIDTH),
            ..self
        };

        if resolved.logical_width % 8 != 0 || resolved.logical_width < resolved.width {
            return Err(Error::InvalidLogicalWidth {
                logical_width: resolved.logical_width,
                width: resolved.width,
            });
        }
        Ok(resolved)
    }
}
