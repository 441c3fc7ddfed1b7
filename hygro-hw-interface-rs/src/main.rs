//! hygro-hw-interface
//!
//! DHT22 → OLED reading monitor firmware for the Raspberry Pi Pico 2.
//! Wires the two library crates into a single blocking poll loop:
//!
//! 1. The OLED is brought up on I2C0. If it does not answer, the firmware
//!    logs `OLED not found` and halts: without the panel there is nothing
//!    to monitor on, so this is never retried.
//! 2. A startup banner is shown while the DHT22 settles.
//! 3. [`ReadingMonitor::run()`] takes over: read, classify, repaint the
//!    panel, log over RTT, sleep 2 s, forever.
//!
//! Nothing is spawned. The loop runs inside the `main` task and blocks it
//! for good: the 2 s pause goes through `DelayNs` on `embassy_time::Delay`,
//! which busy-waits and never hands control back to the executor.

#![no_std]
#![no_main]

mod dht;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Level, OutputOpenDrain};
use embassy_rp::i2c::{self, I2c};
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use hygro::monitor::{MonitorConfig, OutputSink, ReadingMonitor};
use hygro_oled_display_rs::{DisplayConfig, OledDriver, OledSink, DEFAULT_ADDRESS};

use crate::dht::Dht22Source;

// ---------------------------------------------------------------------------
// Boot block
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Shown on the panel between display bring-up and the first reading.
const BANNER: [&str; 3] = ["RP2350 Pico 2", "OLED with I2C", "Hello I2C"];

/// DHT22 needs about a second after power-up before it answers reliably.
const SENSOR_WARMUP_MS: u64 = 1000;

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("hygro-hw-interface starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // I2C_SDA  → GP20  (p.PIN_20)
    // I2C_SCL  → GP21  (p.PIN_21)
    // DHT_DATA → GP15  (p.PIN_15)  open-drain, external 10k pull-up to 3V3
    // ———————————————————————————————————————————————————————————————————————

    let i2c = I2c::new_blocking(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        i2c::Config::default(),
    );

    // Released (high) so the sensor sees an idle line before the first read.
    let dht_pin = OutputOpenDrain::new(p.PIN_15, Level::High);

    // —— Display initialisation —————————————————————————————————————————————

    let mut oled = OledDriver::new(i2c, DEFAULT_ADDRESS);
    if let Err(e) = oled.init() {
        error!("OLED not found: {}", e);
        halt();
    }
    info!("OLED initialised");

    let mut sink = OledSink::new(oled, DisplayConfig::default());
    sink.render(&BANNER);
    sink.log("DHT22 init");

    Timer::after_millis(SENSOR_WARMUP_MS).await;

    // —— Poll loop ——————————————————————————————————————————————————————————

    let config = MonitorConfig { data_pin: "GP15" };
    let mut monitor = ReadingMonitor::with_config(Dht22Source::new(dht_pin), sink, Delay, config);
    monitor.run();
}

/// Park the core forever. Used only when startup cannot continue.
fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
