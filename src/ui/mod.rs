//! Local user interface - button pins and the status OLED.
//!
//! ## Components
//!
//! - **Pins**: 3 tactile switches sampled by the scan task (UP, DOWN, SELECT)
//! - **Display**: SSD1306 128×64 OLED via I²C, put to sleep by the idle timer

pub mod display;
pub mod pins;
