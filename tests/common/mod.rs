//! Recording fakes for the embedded-hal traits the driver is generic over.
//!
//! All fakes share one event log so tests can assert on the exact order of
//! line changes, bus bytes and delays.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::spi::{self, SpiBus};
use epd2in9bwr::Epd2in9bwr;

/// Output lines driven by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Cs,
    Dc,
    Rst,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Output line set high (true) or low (false)
    Set(Line, bool),
    /// One byte written to the bus
    Byte(u8),
    /// Bus flushed
    Flush,
    /// Busy line read
    BusyRead(bool),
    /// Delay in milliseconds
    DelayMs(u32),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub struct MockPin {
    line: Line,
    log: Log,
}

impl digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Set(self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Set(self.line, true));
        Ok(())
    }
}

/// Busy line playing back scripted levels, then staying at `rest`
pub struct MockBusy {
    script: Rc<RefCell<VecDeque<bool>>>,
    rest: Rc<RefCell<bool>>,
    log: Log,
}

impl digital::ErrorType for MockBusy {
    type Error = Infallible;
}

impl InputPin for MockBusy {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let level = self
            .script
            .borrow_mut()
            .pop_front()
            .unwrap_or(*self.rest.borrow());
        self.log.borrow_mut().push(Event::BusyRead(level));
        Ok(level)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

pub struct MockSpi {
    log: Log,
}

impl spi::ErrorType for MockSpi {
    type Error = Infallible;
}

impl SpiBus for MockSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        let mut log = self.log.borrow_mut();
        log.extend(words.iter().map(|&b| Event::Byte(b)));
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        read.fill(0);
        self.write(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let written = words.to_vec();
        words.fill(0);
        self.write(&written)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Flush);
        Ok(())
    }
}

pub struct MockDelay {
    log: Log,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ns / 1_000_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(Event::DelayMs(us / 1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ms));
    }
}

pub type MockEpd = Epd2in9bwr<MockSpi, MockPin, MockPin, MockPin, MockBusy, MockDelay>;

/// Handles kept by the test to inspect and steer the fakes
pub struct Harness {
    pub log: Log,
    busy_script: Rc<RefCell<VecDeque<bool>>>,
    busy_rest: Rc<RefCell<bool>>,
}

impl Harness {
    /// Queue busy line levels returned before the resting level
    pub fn script_busy(&self, levels: &[bool]) {
        self.busy_script.borrow_mut().extend(levels.iter().copied());
    }

    /// Level returned once the script is used up
    pub fn set_busy_rest(&self, level: bool) {
        *self.busy_rest.borrow_mut() = level;
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    /// Bytes on the bus tagged with the D/C level they were sent with,
    /// `true` for commands
    pub fn frames(&self) -> Vec<(bool, u8)> {
        let mut command = false;
        let mut frames = Vec::new();
        for event in self.log.borrow().iter() {
            match *event {
                Event::Set(Line::Dc, high) => command = !high,
                Event::Byte(b) => frames.push((command, b)),
                _ => {}
            }
        }
        frames
    }

    /// Command opcodes in order
    pub fn commands(&self) -> Vec<u8> {
        self.frames()
            .into_iter()
            .filter_map(|(command, b)| command.then_some(b))
            .collect()
    }

    /// Data bytes sent after the first occurrence of `command`,
    /// up to the next command
    pub fn data_after(&self, command: u8) -> Vec<u8> {
        self.frames()
            .into_iter()
            .skip_while(|&frame| frame != (true, command))
            .skip(1)
            .take_while(|&(is_command, _)| !is_command)
            .map(|(_, b)| b)
            .collect()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.log
            .borrow()
            .iter()
            .filter_map(|event| match *event {
                Event::DelayMs(ms) => Some(ms),
                _ => None,
            })
            .collect()
    }
}

/// Driver wired to fakes, busy line resting at the idle (high) level
pub fn mock_epd() -> (MockEpd, Harness) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let busy_script = Rc::new(RefCell::new(VecDeque::new()));
    let busy_rest = Rc::new(RefCell::new(true));

    let pin = |line| MockPin {
        line,
        log: log.clone(),
    };
    let epd = Epd2in9bwr::new(
        MockSpi { log: log.clone() },
        pin(Line::Cs),
        pin(Line::Dc),
        pin(Line::Rst),
        MockBusy {
            script: busy_script.clone(),
            rest: busy_rest.clone(),
            log: log.clone(),
        },
        MockDelay { log: log.clone() },
    );

    (
        epd,
        Harness {
            log,
            busy_script,
            busy_rest,
        },
    )
}
