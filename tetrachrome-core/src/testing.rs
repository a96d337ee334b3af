//! Mock adapters shared by the unit tests

use std::collections::HashMap;

use embedded_graphics_core::pixelcolor::Rgb565;

use crate::gfx::{colour, Region};
use crate::traits::{DisplayBus, DisplayError, Radio, RadioError};
use crate::wireless::registers::{cmd, reg, status};

/// One call on the display bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusOp {
    Command(u8, Vec<u8>),
    Region(Region),
    Word(u16),
    /// Repeat with the count already expanded (0 -> 256)
    Repeat(u16, u16),
    Idle,
}

/// Display bus that records every call
#[derive(Default)]
pub struct RecordingBus {
    pub ops: Vec<BusOp>,
    /// Fail every streaming call after this many have succeeded
    fail_after: Option<usize>,
    calls: usize,
    idle: bool,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self {
            idle: true,
            ..Default::default()
        }
    }

    pub fn failing_after(calls: usize) -> Self {
        Self {
            fail_after: Some(calls),
            ..Self::new()
        }
    }

    pub fn is_idle(&self) -> bool {
        self.idle
    }

    pub fn idle_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == BusOp::Idle).count()
    }

    pub fn regions(&self) -> Vec<Region> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                BusOp::Region(region) => Some(*region),
                _ => None,
            })
            .collect()
    }

    /// Total data words streamed into regions
    pub fn streamed_words(&self) -> u32 {
        self.ops
            .iter()
            .map(|op| match op {
                BusOp::Word(_) => 1,
                BusOp::Repeat(_, count) => u32::from(*count),
                _ => 0,
            })
            .sum()
    }

    fn record(&mut self, op: BusOp) -> Result<(), DisplayError> {
        if let Some(limit) = self.fail_after {
            if self.calls >= limit {
                return Err(DisplayError::Bus);
            }
        }
        self.calls += 1;
        self.idle = false;
        self.ops.push(op);
        Ok(())
    }
}

impl DisplayBus for RecordingBus {
    fn send_command(&mut self, opcode: u8, args: &[u8]) -> Result<(), DisplayError> {
        self.record(BusOp::Command(opcode, args.to_vec()))?;
        self.idle = true;
        Ok(())
    }

    fn begin_region(&mut self, region: Region) -> Result<(), DisplayError> {
        self.record(BusOp::Region(region))
    }

    fn write_data_word(&mut self, word: u16) -> Result<(), DisplayError> {
        self.record(BusOp::Word(word))
    }

    fn repeat_data_word(&mut self, word: u16, count: u8) -> Result<(), DisplayError> {
        let count = if count == 0 { 256 } else { u16::from(count) };
        self.record(BusOp::Repeat(word, count))
    }

    fn idle(&mut self) -> Result<(), DisplayError> {
        self.ops.push(BusOp::Idle);
        self.idle = true;
        Ok(())
    }
}

/// Display bus that emulates the controller's frame memory
///
/// Words land row by row inside the open region. Writing with no open
/// region, or past its end, panics.
#[derive(Default)]
pub struct FrameBus {
    pixels: HashMap<(u16, u16), u16>,
    window: Option<Region>,
    cursor: u32,
    words: u32,
}

impl FrameBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb565> {
        self.pixels.get(&(x, y)).copied().map(colour)
    }

    pub fn words_written(&self) -> u32 {
        self.words
    }

    pub fn is_idle(&self) -> bool {
        self.window.is_none()
    }

    fn push(&mut self, word: u16) {
        let window = self.window.expect("data word outside a region");
        assert!(self.cursor < window.area(), "region overrun");
        let width = u32::from(window.x1 - window.x0) + 1;
        let x = window.x0 + (self.cursor % width) as u16;
        let y = window.y0 + (self.cursor / width) as u16;
        self.pixels.insert((x, y), word);
        self.cursor += 1;
        self.words += 1;
    }
}

impl DisplayBus for FrameBus {
    fn send_command(&mut self, _opcode: u8, _args: &[u8]) -> Result<(), DisplayError> {
        self.window = None;
        Ok(())
    }

    fn begin_region(&mut self, region: Region) -> Result<(), DisplayError> {
        self.window = Some(region);
        self.cursor = 0;
        Ok(())
    }

    fn write_data_word(&mut self, word: u16) -> Result<(), DisplayError> {
        self.push(word);
        Ok(())
    }

    fn repeat_data_word(&mut self, word: u16, count: u8) -> Result<(), DisplayError> {
        let count = if count == 0 { 256 } else { u16::from(count) };
        for _ in 0..count {
            self.push(word);
        }
        Ok(())
    }

    fn idle(&mut self) -> Result<(), DisplayError> {
        self.window = None;
        Ok(())
    }
}

/// Radio that acknowledges (or exhausts retries on) every payload
///
/// A loaded payload stays in flight for `airtime` status reads, then
/// reports `outcome` until the IRQ flags are cleared.
pub struct MockRadio {
    pub registers: HashMap<u8, u8>,
    pub addresses: HashMap<u8, [u8; 5]>,
    /// (TX address, payload) for every transmission started
    pub sent: Vec<([u8; 5], Vec<u8>)>,
    pub commands: Vec<u8>,
    pub outcome: u8,
    pub airtime: u32,
    pub fail_writes: bool,
    in_air: Option<u32>,
    flags: u8,
}

impl MockRadio {
    pub fn new() -> Self {
        Self {
            registers: HashMap::new(),
            addresses: HashMap::new(),
            sent: Vec::new(),
            commands: Vec::new(),
            outcome: status::TX_DS,
            airtime: 0,
            fail_writes: false,
            in_air: None,
            flags: 0,
        }
    }

    /// Radio whose every transmission runs out of retries
    pub fn unreachable() -> Self {
        Self {
            outcome: status::MAX_RT,
            ..Self::new()
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_air.is_some() || self.flags != 0
    }

    fn check(&self) -> Result<(), RadioError> {
        if self.fail_writes {
            Err(RadioError::Bus)
        } else {
            Ok(())
        }
    }
}

impl Radio for MockRadio {
    fn write_command(&mut self, opcode: u8) -> Result<(), RadioError> {
        self.check()?;
        self.commands.push(opcode);
        if opcode == cmd::FLUSH_TX {
            self.in_air = None;
        }
        Ok(())
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), RadioError> {
        self.check()?;
        if register == reg::STATUS {
            // Write-one-to-clear
            self.flags &= !value;
        } else {
            self.registers.insert(register, value);
        }
        Ok(())
    }

    fn write_address(&mut self, register: u8, address: &[u8; 5]) -> Result<(), RadioError> {
        self.check()?;
        self.addresses.insert(register, *address);
        Ok(())
    }

    fn read_status(&mut self) -> Result<u8, RadioError> {
        if let Some(remaining) = self.in_air {
            if remaining == 0 {
                self.in_air = None;
                self.flags |= self.outcome;
            } else {
                self.in_air = Some(remaining - 1);
            }
        }
        Ok(0x0E | self.flags)
    }

    fn write_tx_payload(&mut self, payload: &[u8]) -> Result<(), RadioError> {
        self.check()?;
        let address = self.addresses.get(&reg::TX_ADDR).copied().unwrap_or_default();
        self.sent.push((address, payload.to_vec()));
        self.in_air = Some(self.airtime);
        Ok(())
    }
}
