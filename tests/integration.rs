//! Integration tests: board key map → scanner → key FIFO.

use std::cell::Cell;

use keyscan::config::{
    BOARD_KEY_MAP, KEY_COUNT, KEY_DOWN, KEY_DOWN_SELECT, KEY_SELECT, KEY_UP, KEY_UP_DOWN,
};
use keyscan::{EventFifo, EventKind, KeyEvent, KeyScanner, PinSampler, ScanConfig, Settled};

/// Three buttons the test presses by hand.
#[derive(Default)]
struct Buttons([Cell<bool>; 3]);

impl Buttons {
    fn hold(&self, pins: &[u8]) {
        for (pin, cell) in self.0.iter().enumerate() {
            cell.set(pins.contains(&(pin as u8)));
        }
    }
}

impl PinSampler for Buttons {
    fn is_pin_active(&self, pin: u8) -> bool {
        self.0[pin as usize].get()
    }
}

struct Board {
    buttons: Buttons,
    scanner: KeyScanner<KEY_COUNT>,
    fifo: EventFifo<16>,
}

impl Board {
    fn new() -> Self {
        let mut scanner = KeyScanner::new(ScanConfig {
            filter_ticks: 5,
            ..ScanConfig::DEFAULT
        });
        // No long-press, so releases are plain Up with or without double-click.
        for id in [KEY_UP, KEY_DOWN, KEY_SELECT, KEY_UP_DOWN, KEY_DOWN_SELECT] {
            scanner.configure(id, 0, 0);
        }
        Self {
            buttons: Buttons::default(),
            scanner,
            fifo: EventFifo::new(),
        }
    }

    fn run(&mut self, ticks: u32) {
        for _ in 0..ticks {
            let probe = BOARD_KEY_MAP.probe(&self.buttons);
            self.scanner.tick(&probe, &self.fifo);
        }
    }

    fn events(&self) -> Vec<KeyEvent> {
        std::iter::from_fn(|| {
            let code = self.fifo.pop_primary();
            (!code.is_none()).then(|| code.event().expect("valid code"))
        })
        .collect()
    }
}

#[test]
fn single_button_press_and_release() {
    let mut board = Board::new();
    board.buttons.hold(&[2]);
    board.run(10);
    board.buttons.hold(&[]);
    board.run(10);

    assert_eq!(
        board.events(),
        vec![
            KeyEvent::new(KEY_SELECT, EventKind::Down),
            KeyEvent::new(KEY_SELECT, EventKind::Up),
        ]
    );
}

#[test]
fn chord_entered_through_a_single_button_reports_only_the_chord() {
    let mut board = Board::new();
    // UP lands a couple of ticks before DOWN, well inside the filter.
    board.buttons.hold(&[0]);
    board.run(2);
    board.buttons.hold(&[0, 1]);
    board.run(20);
    assert_eq!(board.scanner.state(KEY_UP), Settled::Released);
    assert_eq!(board.scanner.state(KEY_UP_DOWN), Settled::Pressed);

    board.buttons.hold(&[]);
    board.run(20);

    assert_eq!(
        board.events(),
        vec![
            KeyEvent::new(KEY_UP_DOWN, EventKind::Down),
            KeyEvent::new(KEY_UP_DOWN, EventKind::Up),
        ]
    );
}

#[test]
fn all_three_buttons_press_both_chords() {
    let mut board = Board::new();
    board.buttons.hold(&[0, 1, 2]);
    board.run(10);

    assert_eq!(
        board.events(),
        vec![
            KeyEvent::new(KEY_UP_DOWN, EventKind::Down),
            KeyEvent::new(KEY_DOWN_SELECT, EventKind::Down),
        ]
    );
    assert_eq!(board.scanner.state(KEY_DOWN), Settled::Released);
}

#[test]
fn secondary_reader_replays_what_primary_consumed() {
    let mut board = Board::new();
    board.buttons.hold(&[1]);
    board.run(10);
    board.buttons.hold(&[]);
    board.run(10);

    let primary = board.events();
    let secondary: Vec<KeyEvent> = std::iter::from_fn(|| board.fifo.pop_secondary().event()).collect();
    assert_eq!(primary.len(), 2);
    assert_eq!(primary, secondary);
}
