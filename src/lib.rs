//! Waveshare 2.9" B/W/R ePaper Display Driver
//!
//! Used with the 128x296 tri-color panels (black/white plus red or yellow) built on the
//! UC8151 / IL0373 command set, connected over 4-wire SPI with separate chip select,
//! data/command, reset and busy lines.
//!
//! This driver is loosely modeled after the
//! [epd-waveshare](https://github.com/caemor/epd-waveshare) drivers but keeps its own
//! two-plane buffer so pixels can be written one at a time.
//!
//!
//! ### Usage
//! The driver owns both bit planes. To display something you:
//!
//! 1. create the driver with [`driver::Epd2in9bwr::new`] and call
//!    [`driver::Epd2in9bwr::configure`] once
//! 1. draw with [`driver::Epd2in9bwr::set_pixel`], preferably through
//!    [`embedded_graphics`](https://github.com/embedded-graphics/embedded-graphics)
//! 1. push both planes to the panel with [`driver::Epd2in9bwr::display`]
//! 1. put the panel to rest with [`driver::Epd2in9bwr::deep_sleep`]
//!
//!
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod buffer;
pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod interface;
pub mod rotation;

mod cmd;
mod flag;
mod graphics;

pub use buffer::{Framebuffer, Plane};
pub use cmd::Cmd;
pub use color::{Color, Rgba};
pub use config::{BusyLevel, BusyWait, Config};
pub use driver::{Epd2in9bwr, State};
pub use error::{Error, Result};
pub use rotation::Rotation;

/// Default display height, pixels vertically
pub const HEIGHT: u16 = 296;

/// Default display width, pixels horizontally
pub const WIDTH: u16 = 128;

/// Default buffer row width in pixels
pub const LOGICAL_WIDTH: u16 = 128;
