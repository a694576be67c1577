//! keyscan firmware for the nRF52840.
//!
//! Task layout:
//!   - `scan_task`  - 1 ms ticker; edge scan every period, debounced scan
//!                    every tenth period. Sole producer of the key FIFO.
//!   - `trace_task` - drains the FIFO's secondary reader into the log.
//!   - `main`       - drains the primary reader, keeps the display awake on
//!                    key activity and renders the last event.
//!
//! The scanner is shared between `scan_task` and `main` (which only
//! touches the idle timer) through a critical-section mutex. The FIFO
//! needs no lock.

#![no_std]
#![no_main]

mod ui;

use core::cell::RefCell;

use defmt::{debug, info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin;
use embassy_nrf::{bind_interrupts, peripherals, twim};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Ticker, Timer};
use keyscan::config::{
    BOARD_KEY_MAP, FAST_SCAN_PERIOD_MS, FAST_TICKS_PER_SCAN, KEY_COUNT, KEY_DOWN,
    KEY_DOWN_SELECT, KEY_LONG_TICKS, KEY_UP, KEY_UP_DOWN, SCAN_PERIOD_MS,
};
use keyscan::{KeyScanner, ScanConfig, KEY_FIFO};
use ui::pins::KeyPins;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

type SharedScanner = Mutex<CriticalSectionRawMutex, RefCell<KeyScanner<KEY_COUNT>>>;

static SCANNER: SharedScanner = Mutex::new(RefCell::new(KeyScanner::new(ScanConfig::DEFAULT)));

/// UP/DOWN auto-repeat once long-pressed: every 100 ms.
const NAV_REPEAT_TICKS: u16 = 10;

/// How often the diagnostics reader catches up.
const TRACE_PERIOD_MS: u64 = 100;

#[embassy_executor::task]
async fn scan_task(pins: KeyPins) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(FAST_SCAN_PERIOD_MS));
    let mut phase: u8 = 0;

    loop {
        ticker.next().await;

        let probe = BOARD_KEY_MAP.probe(&pins);
        SCANNER.lock(|scanner| {
            let mut scanner = scanner.borrow_mut();
            scanner.fast_tick(&probe, &KEY_FIFO);
            if phase == 0 {
                scanner.tick(&probe, &KEY_FIFO);
            }
        });

        phase += 1;
        if phase >= FAST_TICKS_PER_SCAN {
            phase = 0;
        }
    }
}

#[embassy_executor::task]
async fn trace_task() -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(TRACE_PERIOD_MS));

    loop {
        ticker.next().await;
        while let Some(event) = KEY_FIFO.pop_secondary().event() {
            debug!("trace: {} (code {})", event, event.code().raw());
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("keyscan: starting");

    unwrap!(SCANNER.lock(|scanner| scanner.borrow().config().validate()));
    SCANNER.lock(|scanner| {
        let mut scanner = scanner.borrow_mut();
        scanner.reset_all();
        scanner.configure(KEY_UP, KEY_LONG_TICKS, NAV_REPEAT_TICKS);
        scanner.configure(KEY_DOWN, KEY_LONG_TICKS, NAV_REPEAT_TICKS);
        // Chords are plain press/release.
        scanner.configure(KEY_UP_DOWN, 0, 0);
        scanner.configure(KEY_DOWN_SELECT, 0, 0);
    });

    let pins = KeyPins::new(p.P0_11.degrade(), p.P0_12.degrade(), p.P0_24.degrade());
    unwrap!(spawner.spawn(scan_task(pins)));
    unwrap!(spawner.spawn(trace_task()));

    let i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut display = ui::display::init(i2c);
    ui::display::draw_idle(&mut display);

    let mut display_on = true;
    let mut count: u32 = 0;

    loop {
        while let Some(event) = KEY_FIFO.pop_primary().event() {
            count = count.wrapping_add(1);
            info!("key: {}", event);
            SCANNER.lock(|scanner| scanner.borrow_mut().wake_display());
            ui::display::draw_event(&mut display, event, count);
        }

        let on = SCANNER.lock(|scanner| scanner.borrow().display_on());
        if on != display_on {
            info!("display: {}", if on { "on" } else { "off" });
            ui::display::set_power(&mut display, on);
            display_on = on;
        }

        Timer::after(Duration::from_millis(SCAN_PERIOD_MS)).await;
    }
}
