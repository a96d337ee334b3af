//! Recording pins, ports and buses for the driver tests

use core::convert::Infallible;
use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal::spi::{self, Operation, SpiDevice};
use tetrachrome_hal::DataPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Reset,
    ChipSelect,
    Command,
    Write,
    Read,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Level(Line, bool),
    Data(u8),
    DelayMs(u32),
}

/// Shared, ordered record of everything the driver did
pub type Log = Rc<RefCell<Vec<Signal>>>;

pub fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub struct MockPin {
    line: Line,
    log: Log,
}

impl MockPin {
    pub fn new(line: Line, log: &Log) -> Self {
        Self {
            line,
            log: log.clone(),
        }
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Signal::Level(self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Signal::Level(self.line, true));
        Ok(())
    }
}

pub struct MockPort {
    log: Log,
}

impl MockPort {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl DataPort for MockPort {
    type Error = Infallible;

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Signal::Data(byte));
        Ok(())
    }
}

pub struct MockDelay {
    log: Log,
}

impl MockDelay {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Signal::DelayMs(ms));
    }
}

/// Byte latched on every completed write strobe, with whether the
/// command line was active at the time
pub fn strobes(log: &[Signal]) -> Vec<(bool, u8)> {
    let mut command = false;
    let mut writing = false;
    let mut data = 0;
    let mut latched = Vec::new();

    for signal in log {
        match *signal {
            Signal::Level(Line::Command, high) => command = !high,
            Signal::Level(Line::Write, false) => writing = true,
            Signal::Level(Line::Write, true) => {
                if writing {
                    latched.push((command, data));
                }
                writing = false;
            }
            Signal::Data(byte) => data = byte,
            _ => {}
        }
    }
    latched
}

/// Group strobes into commands: (opcode, data bytes that followed)
pub fn commands(log: &[Signal]) -> Vec<(u8, Vec<u8>)> {
    let mut grouped: Vec<(u8, Vec<u8>)> = Vec::new();
    for (command, byte) in strobes(log) {
        if command {
            grouped.push((byte, Vec::new()));
        } else if let Some((_, args)) = grouped.last_mut() {
            args.push(byte);
        }
    }
    grouped
}

/// SPI device that records one frame per transaction
#[derive(Default)]
pub struct MockSpi {
    pub frames: Vec<Vec<u8>>,
    /// Byte clocked back on every read
    pub status: u8,
}

impl spi::ErrorType for MockSpi {
    type Error = Infallible;
}

impl SpiDevice for MockSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        let mut frame = Vec::new();
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => frame.extend_from_slice(&bytes[..]),
                Operation::Read(buf) => buf.fill(self.status),
                Operation::Transfer(read, write) => {
                    frame.extend_from_slice(&write[..]);
                    read.fill(self.status);
                }
                Operation::TransferInPlace(buf) => {
                    frame.extend_from_slice(&buf[..]);
                    buf.fill(self.status);
                }
                Operation::DelayNs(_) => {}
            }
        }
        self.frames.push(frame);
        Ok(())
    }
}
