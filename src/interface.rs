//! Display interface using SPI
use crate::cmd::Cmd;
use crate::config::{BusyLevel, BusyWait};
use crate::{Error, Result};
use display_interface::DisplayError;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

/// Reset pulse timing: high, low, high
const RESET_HIGH_MS: u32 = 50;
const RESET_LOW_MS: u32 = 2;

/// Pause between busy line polls
pub const BUSY_POLL_INTERVAL_MS: u32 = 10;

/// Settle time around each plane transmission
const TRANSMISSION_SETTLE_MS: u32 = 2;

/// The 4-wire connection to the panel
///
/// Chip select is driven by the interface for every byte, so the bus is a raw
/// [`SpiBus`] rather than an `SpiDevice`.
pub struct DisplayInterface<SPI, CS, DC, RST, BSY, DELAY> {
    /// SPI bus, clock and data only
    spi: SPI,
    /// Chip select, low while a byte is on the bus
    cs: CS,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting
    rst: RST,
    /// Busy line, see [`BusyLevel`] for its polarity
    busy: BSY,
    /// Delay provider for reset timing and busy polling
    pub(crate) delay: DELAY,
}

impl<SPI, CS, DC, RST, BSY, DELAY> DisplayInterface<SPI, CS, DC, RST, BSY, DELAY> {
    /// Bind the interface to its lines. Pin directions are fixed by the pin types.
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST, busy: BSY, delay: DELAY) -> Self {
        DisplayInterface {
            spi,
            cs,
            dc,
            rst,
            busy,
            delay,
        }
    }

    /// Give the hardware back
    pub fn release(self) -> (SPI, CS, DC, RST, BSY, DELAY) {
        (self.spi, self.cs, self.dc, self.rst, self.busy, self.delay)
    }
}

impl<SPI, CS, DC, RST, BSY, DELAY> DisplayInterface<SPI, CS, DC, RST, BSY, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    BSY: InputPin,
    DELAY: DelayNs,
{
    /// Basic function for sending commands
    pub(crate) fn cmd(&mut self, command: impl Into<u8>) -> core::result::Result<(), DisplayError> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;
        self.write_byte(command.into())
    }

    /// Basic function for sending one data byte
    pub(crate) fn data(&mut self, data: u8) -> core::result::Result<(), DisplayError> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.write_byte(data)
    }

    /// Basic function for sending a command and the data belonging to it.
    pub(crate) fn cmd_with_data(
        &mut self,
        command: impl Into<u8>,
        data: &[u8],
    ) -> core::result::Result<(), DisplayError> {
        self.cmd(command)?;
        for &byte in data {
            self.data(byte)?;
        }
        Ok(())
    }

    /// One byte framed by chip select
    fn write_byte(&mut self, byte: u8) -> core::result::Result<(), DisplayError> {
        self.cs.set_low().map_err(|_| DisplayError::CSError)?;

        if let Err(e) = self.spi.write(&[byte]).and_then(|()| self.spi.flush()) {
            log::error!("SPI write error for byte 0x{:02X}: {:?}", byte, e);
            // leave the bus deselected even on failure
            let _ = self.cs.set_high();
            return Err(DisplayError::BusWriteError);
        }

        self.cs.set_high().map_err(|_| DisplayError::CSError)
    }

    /// Send a plane start command followed by the plane, with the settle delays
    /// the controller needs on either side of the data.
    pub(crate) fn transmit(
        &mut self,
        command: Cmd,
        data: &[u8],
    ) -> core::result::Result<(), DisplayError> {
        log::debug!("Transmitting {} bytes after {:?}", data.len(), command);
        self.cmd(command)?;
        self.delay.delay_ms(TRANSMISSION_SETTLE_MS);
        for &byte in data {
            self.data(byte)?;
        }
        self.delay.delay_ms(TRANSMISSION_SETTLE_MS);
        Ok(())
    }

    /// Same as [`Self::transmit`] with one byte value repeated
    /// Used for setting one color for the whole frame
    pub(crate) fn transmit_repeated(
        &mut self,
        command: Cmd,
        val: u8,
        repetitions: usize,
    ) -> core::result::Result<(), DisplayError> {
        log::debug!(
            "Transmitting 0x{:02X} x {} after {:?}",
            val,
            repetitions,
            command
        );
        self.cmd(command)?;
        self.delay.delay_ms(TRANSMISSION_SETTLE_MS);
        for _ in 0..repetitions {
            self.data(val)?;
        }
        self.delay.delay_ms(TRANSMISSION_SETTLE_MS);
        Ok(())
    }

    /// Resets the device: high 50 ms, low 2 ms, high 50 ms
    pub(crate) fn reset(&mut self) -> core::result::Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_HIGH_MS);
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_LOW_MS);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_HIGH_MS);
        Ok(())
    }

    /// Hold the reset line low, used as the last step of deep sleep
    pub(crate) fn hold_reset(&mut self) -> core::result::Result<(), DisplayError> {
        self.rst.set_low().map_err(|_| DisplayError::RSError)
    }

    /// Read the busy line once, true unless it shows the idle level
    pub(crate) fn is_busy(&mut self, idle: BusyLevel) -> Result<bool> {
        let high = self.busy.is_high().map_err(|_| Error::BusyLine)?;
        Ok(match idle {
            BusyLevel::High => !high,
            BusyLevel::Low => high,
        })
    }

    /// Poll the panel status until the busy line shows the idle level
    ///
    /// Every poll issues a get status command first; the controller only
    /// updates the busy line after it.
    pub(crate) fn wait_until_idle(&mut self, idle: BusyLevel, wait: BusyWait) -> Result<()> {
        log::debug!("Waiting for panel to be idle");
        let mut polls: u32 = 0;

        loop {
            self.cmd(Cmd::GetStatus)?;
            polls = polls.saturating_add(1);

            if !self.is_busy(idle)? {
                log::debug!("Panel idle after {} polls", polls);
                return Ok(());
            }

            if let BusyWait::MaxPolls(max) = wait {
                if polls >= max {
                    log::error!("Panel still busy after {} polls", polls);
                    return Err(Error::BusyTimeout { polls });
                }
            }

            self.delay.delay_ms(BUSY_POLL_INTERVAL_MS);
        }
    }
}
