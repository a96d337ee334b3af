//! ILI9481 TFT controller (8080-style 8-bit parallel)
//!
//! # Bus Protocol
//!
//! Five active-low control lines frame every transfer:
//! - RESET: hardware reset, only pulsed during [`Ili9481::init`]
//! - CS: chip select, held for a whole command or region
//! - C/D: low while the opcode byte is strobed, high for arguments and pixels
//! - WR: the controller latches the data port on the rising edge
//! - RD: unused, held inactive
//!
//! Pixels are 16-bit 5/6/5 words sent high byte first.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use tetrachrome_core::gfx::Region;
use tetrachrome_core::traits::{DisplayBus, DisplayError};
use tetrachrome_hal::DataPort;

/// ILI9481 command opcodes
pub mod cmd {
    pub const SOFT_RESET: u8 = 0x01;
    pub const EXIT_SLEEP: u8 = 0x11;
    pub const EXIT_INVERT: u8 = 0x20;
    pub const DISPLAY_OFF: u8 = 0x28;
    pub const DISPLAY_ON: u8 = 0x29;
    /// Column address window
    pub const COLUMN_ADDRESS: u8 = 0x2A;
    /// Page (row) address window
    pub const PAGE_ADDRESS: u8 = 0x2B;
    pub const MEMORY_WRITE: u8 = 0x2C;
    pub const ADDRESS_MODE: u8 = 0x36;
    pub const PIXEL_FORMAT: u8 = 0x3A;
    /// Manufacturer command access protect
    pub const COMMAND_ACCESS: u8 = 0xB0;
    pub const FRAME_MEMORY: u8 = 0xB3;
    pub const FRAME_MODE: u8 = 0xB4;
    pub const PANEL_DRIVING: u8 = 0xC0;
    pub const DISPLAY_TIMING: u8 = 0xC1;
    pub const FRAME_RATE: u8 = 0xC5;
    pub const INTERFACE_CONTROL: u8 = 0xC6;
    pub const POWER: u8 = 0xD0;
    pub const VCOM: u8 = 0xD1;
    pub const POWER_NORMAL: u8 = 0xD2;
    pub const POWER_PARTIAL: u8 = 0xD3;
    pub const POWER_IDLE: u8 = 0xD4;
}

/// Registers written between soft reset and sleep-out
const PANEL_SETUP: &[(u8, &[u8])] = &[
    (cmd::DISPLAY_OFF, &[]),
    // 16 bits per pixel for reads and writes
    (cmd::PIXEL_FORMAT, &[0x55]),
    (cmd::COMMAND_ACCESS, &[0x00]),
    (cmd::FRAME_MEMORY, &[0x02, 0x00, 0x00, 0x00]),
    (cmd::FRAME_MODE, &[0x00]),
    (cmd::POWER, &[0x07, 0x42, 0x18]),
    (cmd::VCOM, &[0x00, 0x07, 0x10]),
    (cmd::POWER_NORMAL, &[0x01, 0x02]),
    (cmd::POWER_PARTIAL, &[0x01, 0x02]),
    (cmd::POWER_IDLE, &[0x01, 0x02]),
    (cmd::PANEL_DRIVING, &[0x10, 0x3B, 0x00, 0x02, 0x11]),
    (cmd::DISPLAY_TIMING, &[0x10, 0x10, 0x88]),
    (cmd::FRAME_RATE, &[0x03]),
    (cmd::INTERFACE_CONTROL, &[0x02]),
];

/// BGR order with horizontal flip
const ADDRESS_MODE_BGR_FLIP: u8 = 0x0A;

/// The five control outputs, all active low
pub struct ControlLines<O> {
    pub reset: O,
    pub chip_select: O,
    pub command: O,
    pub write: O,
    pub read: O,
}

/// ILI9481 on a parallel data port
pub struct Ili9481<P, O> {
    data: P,
    lines: ControlLines<O>,
}

fn drive<O: OutputPin>(pin: &mut O, active: bool) -> Result<(), DisplayError> {
    let result = if active { pin.set_low() } else { pin.set_high() };
    result.map_err(|_| DisplayError::Bus)
}

impl<P: DataPort, O: OutputPin> Ili9481<P, O> {
    pub fn new(data: P, lines: ControlLines<O>) -> Self {
        Self { data, lines }
    }

    pub fn release(self) -> (P, ControlLines<O>) {
        (self.data, self.lines)
    }

    /// Reset the controller and configure it for 5/6/5 pixel writes
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), DisplayError> {
        drive(&mut self.lines.reset, false)?;
        self.idle()?;
        delay.delay_ms(50);

        drive(&mut self.lines.reset, true)?;
        delay.delay_ms(2);
        drive(&mut self.lines.reset, false)?;
        delay.delay_ms(50);

        // More than ten frame times
        self.send_command(cmd::SOFT_RESET, &[])?;
        delay.delay_ms(20);

        for &(opcode, args) in PANEL_SETUP {
            self.send_command(opcode, args)?;
        }

        self.send_command(cmd::EXIT_SLEEP, &[])?;
        delay.delay_ms(150);

        self.send_command(cmd::DISPLAY_ON, &[])?;
        self.send_command(cmd::EXIT_INVERT, &[])?;
        self.send_command(cmd::ADDRESS_MODE, &[ADDRESS_MODE_BGR_FLIP])
    }

    /// Pulse WR with `byte` on the data port
    fn strobe(&mut self, byte: u8) -> Result<(), DisplayError> {
        drive(&mut self.lines.write, true)?;
        self.data.write(byte).map_err(|_| DisplayError::Bus)?;
        drive(&mut self.lines.write, false)
    }

    /// Select the chip and send an opcode; leaves C/D in data mode
    fn opcode(&mut self, opcode: u8) -> Result<(), DisplayError> {
        drive(&mut self.lines.chip_select, true)?;
        drive(&mut self.lines.command, true)?;
        self.strobe(opcode)?;
        drive(&mut self.lines.command, false)
    }

    fn data_word(&mut self, word: u16) -> Result<(), DisplayError> {
        let [hi, lo] = word.to_be_bytes();
        self.strobe(hi)?;
        self.strobe(lo)
    }

    fn window(&mut self, opcode: u8, start: u16, end: u16) -> Result<(), DisplayError> {
        self.opcode(opcode)?;
        self.data_word(start)?;
        self.data_word(end)
    }
}

impl<P: DataPort, O: OutputPin> DisplayBus for Ili9481<P, O> {
    fn send_command(&mut self, opcode: u8, args: &[u8]) -> Result<(), DisplayError> {
        self.opcode(opcode)?;
        for &arg in args {
            self.strobe(arg)?;
        }
        self.idle()
    }

    fn begin_region(&mut self, region: Region) -> Result<(), DisplayError> {
        self.window(cmd::COLUMN_ADDRESS, region.x0, region.x1)?;
        self.window(cmd::PAGE_ADDRESS, region.y0, region.y1)?;
        self.opcode(cmd::MEMORY_WRITE)
    }

    fn write_data_word(&mut self, word: u16) -> Result<(), DisplayError> {
        self.data_word(word)
    }

    fn repeat_data_word(&mut self, word: u16, count: u8) -> Result<(), DisplayError> {
        let count = if count == 0 { 256 } else { u16::from(count) };
        let [hi, lo] = word.to_be_bytes();

        if hi == lo {
            // Both bytes are already on the port, so only WR needs to move
            self.data.write(hi).map_err(|_| DisplayError::Bus)?;
            for _ in 0..count * 2 {
                drive(&mut self.lines.write, true)?;
                drive(&mut self.lines.write, false)?;
            }
            return Ok(());
        }

        for _ in 0..count {
            self.data_word(word)?;
        }
        Ok(())
    }

    fn idle(&mut self) -> Result<(), DisplayError> {
        drive(&mut self.lines.chip_select, false)?;
        drive(&mut self.lines.command, false)?;
        drive(&mut self.lines.write, false)?;
        drive(&mut self.lines.read, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{commands, log, strobes, Line, Log, MockDelay, MockPin, MockPort, Signal};

    fn display(log: &Log) -> Ili9481<MockPort, MockPin> {
        Ili9481::new(
            MockPort::new(log),
            ControlLines {
                reset: MockPin::new(Line::Reset, log),
                chip_select: MockPin::new(Line::ChipSelect, log),
                command: MockPin::new(Line::Command, log),
                write: MockPin::new(Line::Write, log),
                read: MockPin::new(Line::Read, log),
            },
        )
    }

    fn ends_idle(log: &[Signal]) -> bool {
        log.ends_with(&[
            Signal::Level(Line::ChipSelect, true),
            Signal::Level(Line::Command, true),
            Signal::Level(Line::Write, true),
            Signal::Level(Line::Read, true),
        ])
    }

    #[test]
    fn test_send_command_frames_opcode_and_args() {
        let log = log();
        let mut lcd = display(&log);
        lcd.send_command(cmd::PIXEL_FORMAT, &[0x55]).unwrap();

        let signals = log.borrow();
        assert_eq!(strobes(&signals), vec![(true, 0x3A), (false, 0x55)]);
        assert_eq!(signals[0], Signal::Level(Line::ChipSelect, false));
        assert!(ends_idle(&signals));
    }

    #[test]
    fn test_begin_region_leaves_bus_selected() {
        let log = log();
        let mut lcd = display(&log);
        lcd.begin_region(Region::new(0x0102, 10, 0x013F, 0x01DF)).unwrap();

        let signals = log.borrow();
        assert_eq!(
            commands(&signals),
            vec![
                (0x2A, vec![0x01, 0x02, 0x01, 0x3F]),
                (0x2B, vec![0x00, 0x0A, 0x01, 0xDF]),
                (0x2C, vec![]),
            ]
        );
        assert!(!signals.contains(&Signal::Level(Line::ChipSelect, true)));
        assert_eq!(signals.last(), Some(&Signal::Level(Line::Command, true)));
    }

    #[test]
    fn test_data_word_high_byte_first() {
        let log = log();
        let mut lcd = display(&log);
        lcd.write_data_word(0xFA20).unwrap();
        assert_eq!(strobes(&log.borrow()), vec![(false, 0xFA), (false, 0x20)]);
    }

    #[test]
    fn test_repeat_fast_path_latches_once() {
        let log = log();
        let mut lcd = display(&log);
        lcd.repeat_data_word(0x0000, 0).unwrap();

        let signals = log.borrow();
        let latches = signals.iter().filter(|s| matches!(s, Signal::Data(_))).count();
        assert_eq!(latches, 1);
        assert_eq!(strobes(&signals).len(), 512);
        assert!(strobes(&signals).iter().all(|&(c, b)| !c && b == 0));
    }

    #[test]
    fn test_repeat_mixed_bytes() {
        let log = log();
        let mut lcd = display(&log);
        lcd.repeat_data_word(0xFFE0, 3).unwrap();
        assert_eq!(
            strobes(&log.borrow()),
            vec![
                (false, 0xFF),
                (false, 0xE0),
                (false, 0xFF),
                (false, 0xE0),
                (false, 0xFF),
                (false, 0xE0),
            ]
        );
    }

    #[test]
    fn test_init_sequence() {
        let log = log();
        let mut lcd = display(&log);
        lcd.init(&mut MockDelay::new(&log)).unwrap();

        let signals = log.borrow();
        let sent = commands(&signals);
        let opcodes: Vec<u8> = sent.iter().map(|(op, _)| *op).collect();
        assert_eq!(
            opcodes,
            vec![
                0x01, 0x28, 0x3A, 0xB0, 0xB3, 0xB4, 0xD0, 0xD1, 0xD2, 0xD3, 0xD4, 0xC0, 0xC1,
                0xC5, 0xC6, 0x11, 0x29, 0x20, 0x36,
            ]
        );
        assert_eq!(sent[2].1, vec![0x55]);
        assert_eq!(sent.last().map(|(_, args)| args.clone()), Some(vec![0x0A]));

        let delays: Vec<u32> = signals
            .iter()
            .filter_map(|s| match s {
                Signal::DelayMs(ms) => Some(*ms),
                _ => None,
            })
            .collect();
        assert_eq!(delays, vec![50, 2, 50, 20, 150]);

        // Reset pulses low between the first two delays
        let reset: Vec<bool> = signals
            .iter()
            .filter_map(|s| match s {
                Signal::Level(Line::Reset, high) => Some(*high),
                _ => None,
            })
            .collect();
        assert_eq!(reset, vec![true, false, true]);
        assert!(ends_idle(&signals));
    }
}
