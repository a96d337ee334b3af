//! Tetrachrome - Four-Channel LED Strip Mixing Console Firmware
//!
//! Main firmware binary for RP2040-based consoles. An ILI9481 panel shows
//! one dial per colour channel, a push-button rotary encoder adjusts the
//! selected channel and an nRF24L01+ sends each new mix to the strips.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::{self, Spi};
use embassy_time::{Delay, Duration};
use embedded_hal_bus::spi::ExclusiveDevice;
use {defmt_rtt as _, panic_probe as _};

use tetrachrome_core::config::ConsoleConfig;
use tetrachrome_core::scheduler::{Console, TickError, TickReport};
use tetrachrome_core::wireless::DispatchEvent;
use tetrachrome_drivers::{ControlLines, Ili9481, Nrf24};
use tetrachrome_hal::PinPort;

mod channels;
mod tasks;

use crate::channels::INPUT_QUEUE;

/// SPI clock for the radio; the nRF24L01+ tops out at 10 MHz
const RADIO_SPI_HZ: u32 = 4_000_000;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tetrachrome firmware starting...");

    let p = embassy_rp::init(Default::default());
    let config = ConsoleConfig::default();
    let mut delay = Delay;
    info!("Peripherals initialized");

    // LCD data bus D0..D7 on GPIO0..7, control lines on GPIO8..12
    let data = PinPort::new([
        Output::new(p.PIN_0, Level::Low),
        Output::new(p.PIN_1, Level::Low),
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_5, Level::Low),
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
    ]);
    let lines = ControlLines {
        reset: Output::new(p.PIN_8, Level::High),
        chip_select: Output::new(p.PIN_9, Level::High),
        command: Output::new(p.PIN_10, Level::High),
        write: Output::new(p.PIN_11, Level::High),
        read: Output::new(p.PIN_12, Level::High),
    };
    let mut display = Ili9481::new(data, lines);
    unwrap!(display.init(&mut delay));
    info!("Display initialized");

    // Radio on SPI0: SCK 18, MOSI 19, MISO 16, CSN 17; CE tied high
    let mut spi_config = spi::Config::default();
    spi_config.frequency = RADIO_SPI_HZ;
    let bus = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, spi_config);
    let csn = Output::new(p.PIN_17, Level::High);
    let _ce = Output::new(p.PIN_20, Level::High);
    let mut radio = Nrf24::new(unwrap!(ExclusiveDevice::new_no_delay(bus, csn)));
    unwrap!(radio.init(&config.radio, &mut delay));
    info!("Radio initialized on channel {}", config.radio.channel);

    // Encoder phases and the push-button, all pulled up
    let encoder_a = Input::new(p.PIN_13, Pull::Up);
    let encoder_b = Input::new(p.PIN_14, Pull::Up);
    let button = Input::new(p.PIN_15, Pull::Up);

    let release_window = Duration::from_millis(config.release_debounce_ms);
    unwrap!(spawner.spawn(tasks::input_task(encoder_a, encoder_b, button)));
    unwrap!(spawner.spawn(tasks::release_task(release_window)));

    let mut console = Console::new(display, radio, config);
    match console.start() {
        Ok(()) => info!("Start-up screen drawn"),
        Err(e) => error!("Start-up screen failed: {:?}", e),
    }

    info!("All tasks spawned, console running");

    let mut selected = console.selected();
    loop {
        match console.poll(&INPUT_QUEUE) {
            Ok(report) => log_report(&report),
            Err(TickError { error, report }) => {
                warn!("Console cycle error: {:?}", error);
                log_report(&report);
            }
        }

        if console.selected() != selected {
            selected = console.selected();
            info!("Channel {} selected", selected);
        }

        let overruns = INPUT_QUEUE.take_overruns();
        if overruns > 0 {
            warn!("Input queue full, {} events dropped", overruns);
        }

        yield_now().await;
    }
}

fn log_report(report: &TickReport) {
    if report.events > 0 {
        debug!("Applied {} input events", report.events);
    }

    match report.dispatch {
        Some(DispatchEvent::Started { strip }) => trace!("Strip {} sending", strip),
        Some(DispatchEvent::Delivered { strip }) => debug!("Strip {} updated", strip),
        Some(DispatchEvent::Dropped { strip }) => warn!("Strip {} unreachable, update dropped", strip),
        None => {}
    }

    for (dial, _) in report.redrawn.iter().enumerate().filter(|(_, &r)| r) {
        trace!("Dial {} redrawn", dial);
    }
}
