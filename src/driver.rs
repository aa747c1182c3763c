//! Waveshare 2.9" B/W/R Display Driver Implementation
//!
//! This module contains the driver for the tri-color panel. It owns the two bit
//! planes and runs the command sequences for initialization, refresh and sleep.
//!
//! ## Architecture
//!
//! ### Initialization Functions
//! - `new()` - Bind the driver to its hardware, no bus traffic
//! - `configure()` - Allocate the planes, reset and initialize the panel
//! - `wake_up()` - Reset and initialize again after deep sleep
//!
//! ### Buffer Functions (no bus traffic)
//! - `set_pixel()` / `set_color_pixel()` - Write one pixel, rotation applied
//! - `clear_buffer()` - Set both planes to white
//! - `set_rotation()` - Change the rotation for later writes
//!
//! ### Display Update Functions
//! - `display()` - Send both planes and refresh
//! - `clear_display()` - Send white planes and refresh, buffer untouched
//! - `turn_on_display()` - Refresh from panel SRAM
//!
//! ### Power Management
//! - `deep_sleep()` - Power off and enter deep sleep
//!
//! ## Critical Implementation Details
//!
//! ### BUSY Pin Wait
//!
//! Every poll sends `GET_STATUS` (0x71) before reading the busy line, 10 ms
//! apart. A full refresh of this panel takes about 15 seconds.
//!
//! ### Lifecycle
//!
//! `Uninitialized` -> `Configured` -> `DeepSleep`. Refreshes are refused outside
//! `Configured`. Dropping the driver does not touch the hardware.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiBus;

use crate::buffer::{buffer_len, Framebuffer, Plane};
use crate::cmd::Cmd;
use crate::color::{Color, Rgba};
use crate::config::Config;
use crate::flag::Flag;
use crate::interface::DisplayInterface;
use crate::rotation::Rotation;
use crate::{Error, Result};

/// Deep sleep settle time before the reset line is pulled low
const DEEP_SLEEP_SETTLE_MS: u32 = 2_000;

/// Lifecycle state of the panel as seen by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Created, `configure` not called yet
    Uninitialized,
    /// Initialized and accepting refreshes
    Configured,
    /// Deep sleep, needs `wake_up` or `configure`
    DeepSleep,
}

/// Waveshare 2.9" B/W/R E-Paper Display Driver
///
/// ## Type Parameters
///
/// - `SPI` - SPI bus, chip select is handled by the driver
/// - `CS` - Chip select output pin
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin
/// - `BSY` - BUSY input pin
/// - `DELAY` - Delay provider for timing
pub struct Epd2in9bwr<SPI, CS, DC, RST, BSY, DELAY> {
    interface: DisplayInterface<SPI, CS, DC, RST, BSY, DELAY>,
    buffer: Option<Framebuffer>,
    config: Config,
    state: State,
}

impl<SPI, CS, DC, RST, BSY, DELAY> Epd2in9bwr<SPI, CS, DC, RST, BSY, DELAY> {
    /// Create the driver. Nothing is sent until [`Self::configure`].
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST, busy: BSY, delay: DELAY) -> Self {
        Epd2in9bwr {
            interface: DisplayInterface::new(spi, cs, dc, rst, busy, delay),
            buffer: None,
            config: Config::default(),
            state: State::Uninitialized,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> State {
        self.state
    }

    /// Visible width and height as configured, unrotated
    pub fn size(&self) -> (u16, u16) {
        (self.config.width, self.config.height)
    }

    /// Bytes per plane, 0 before configuration
    pub fn buffer_len(&self) -> usize {
        self.buffer.as_ref().map_or(0, Framebuffer::len)
    }

    /// Current write rotation
    pub fn rotation(&self) -> Rotation {
        self.config.rotation
    }

    /// Change the rotation used by later pixel writes
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.config.rotation = rotation;
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.set_rotation(rotation);
        }
    }

    /// Set a pixel from an RGBA color, see [`Color::classify`]
    ///
    /// Coordinates are logical (rotated). Pixels outside the panel are dropped.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        self.set_color_pixel(x, y, Color::classify(color));
    }

    /// Set a pixel to one of the three panel colors
    pub fn set_color_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.set_pixel(x, y, color);
        }
    }

    /// Read a pixel back in panel (unrotated) coordinates
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.buffer.as_ref()?.pixel(x, y)
    }

    /// Set the whole buffer to white. Does not touch the panel.
    pub fn clear_buffer(&mut self) {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.clear();
        }
    }

    /// The framebuffer, once configured
    pub fn buffer(&self) -> Option<&Framebuffer> {
        self.buffer.as_ref()
    }

    /// Give the hardware back
    pub fn release(self) -> (SPI, CS, DC, RST, BSY, DELAY) {
        self.interface.release()
    }
}

impl<SPI, CS, DC, RST, BSY, DELAY> Epd2in9bwr<SPI, CS, DC, RST, BSY, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    BSY: InputPin,
    DELAY: DelayNs,
{
    /// Allocate the planes, reset the panel and send the init sequence
    ///
    /// Zero values in `config` fall back to the 128x296 defaults. An invalid
    /// logical width is rejected before anything is sent.
    pub fn configure(&mut self, config: Config) -> Result<()> {
        let config = config.resolve().map_err(|e| {
            log::warn!("Rejected configuration {:?}: {}", config, e);
            e
        })?;
        if self.state != State::Uninitialized {
            log::warn!("Reconfiguring panel, buffer contents are discarded");
        }

        let mut buffer = Framebuffer::new(config.width, config.height, config.logical_width)?;
        buffer.set_rotation(config.rotation);
        log::info!(
            "Configured {}x{} panel, {} byte planes, rotation {}",
            config.width,
            config.height,
            buffer.len(),
            config.rotation
        );
        self.buffer = Some(buffer);
        self.config = config;

        self.init()
    }

    /// Reset and initialize the panel after deep sleep, keeping the buffer
    pub fn wake_up(&mut self) -> Result<()> {
        if self.buffer.is_none() {
            return Err(Error::NotReady(self.state));
        }
        log::info!("Waking up the panel");
        self.init()
    }

    /// Panel init sequence
    ///
    /// The state stays `Uninitialized` unless every step succeeds.
    fn init(&mut self) -> Result<()> {
        log::info!("Initializing e-paper panel");
        self.state = State::Uninitialized;

        self.reset()?;

        self.interface.cmd(Cmd::PowerOn)?;
        self.wait_until_idle()?;

        log::debug!("Panel setting");
        self.interface
            .cmd_with_data(Cmd::PanelSetting, &Flag::PANEL_SETTING)?;

        log::debug!("Resolution setting");
        self.interface
            .cmd_with_data(Cmd::ResolutionSetting, &Flag::RESOLUTION_SETTING)?;

        log::debug!("VCOM setting");
        self.interface.cmd_with_data(
            Cmd::VcomAndDataIntervalSetting,
            &[Flag::VCOM_AND_DATA_INTERVAL],
        )?;

        self.state = State::Configured;
        Ok(())
    }

    /// Hardware reset pulse on the reset line
    pub fn reset(&mut self) -> Result<()> {
        self.interface.reset()?;
        Ok(())
    }

    /// Send a command byte
    pub fn send_command(&mut self, command: u8) -> Result<()> {
        self.interface.cmd(command)?;
        Ok(())
    }

    /// Send a data byte
    pub fn send_data(&mut self, data: u8) -> Result<()> {
        self.interface.data(data)?;
        Ok(())
    }

    /// Send a command followed by its parameter bytes
    pub fn send_command_with_data(&mut self, command: u8, data: &[u8]) -> Result<()> {
        self.interface.cmd_with_data(command, data)?;
        Ok(())
    }

    /// Returns true while the panel is busy. Sends nothing.
    pub fn is_busy(&mut self) -> Result<bool> {
        self.interface.is_busy(self.config.busy_idle)
    }

    /// Block until the panel is idle, polling every 10 ms
    ///
    /// Waits forever unless the configuration sets [`crate::BusyWait::MaxPolls`].
    pub fn wait_until_idle(&mut self) -> Result<()> {
        self.interface
            .wait_until_idle(self.config.busy_idle, self.config.busy_wait)
    }

    /// Send both planes to the panel and refresh
    pub fn display(&mut self) -> Result<()> {
        self.ensure_configured()?;
        let Some(buffer) = self.buffer.as_ref() else {
            return Err(Error::NotReady(self.state));
        };
        log::info!("Sending buffer to panel");

        self.interface
            .transmit(Cmd::DataStartTransmission1, buffer.plane(Plane::Black))?;
        self.interface
            .transmit(Cmd::DataStartTransmission2, buffer.plane(Plane::Chromatic))?;

        self.turn_on_display()
    }

    /// Clear the panel SRAM to white and refresh. The buffer is left alone.
    pub fn clear_display(&mut self) -> Result<()> {
        self.ensure_configured()?;
        log::info!("Clearing panel to white");

        let len = buffer_len(self.config.logical_width, self.config.height);
        self.interface
            .transmit_repeated(Cmd::DataStartTransmission1, Flag::RAM_ALL_WHITE, len)?;
        self.interface
            .transmit_repeated(Cmd::DataStartTransmission2, Flag::RAM_ALL_WHITE, len)?;

        self.turn_on_display()
    }

    /// Refresh the panel from its SRAM and wait for it to finish
    pub fn turn_on_display(&mut self) -> Result<()> {
        self.ensure_configured()?;
        self.interface.cmd(Cmd::DisplayRefresh)?;
        self.wait_until_idle()?;
        log::info!("Panel refresh completed");
        Ok(())
    }

    /// Power off and enter deep sleep
    ///
    /// The reset line is left low; [`Self::wake_up`] or [`Self::configure`] is
    /// needed before the next refresh.
    pub fn deep_sleep(&mut self) -> Result<()> {
        log::info!("Putting panel into deep sleep mode");
        self.interface.cmd(Cmd::PowerOff)?;
        self.wait_until_idle()?;
        self.interface
            .cmd_with_data(Cmd::DeepSleep, &[Flag::DEEP_SLEEP_CHECK_CODE])?;

        self.interface.delay.delay_ms(DEEP_SLEEP_SETTLE_MS);
        self.interface.hold_reset()?;

        self.state = State::DeepSleep;
        log::info!("Panel now in deep sleep mode");
        Ok(())
    }

    fn ensure_configured(&self) -> Result<()> {
        match self.state {
            State::Configured => Ok(()),
            state => Err(Error::NotReady(state)),
        }
    }
}
