//! SSD1306 OLED status display.
//!
//! Shows the most recent key event. The panel is switched off while the
//! scanner's idle timer says the display should sleep.

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use keyscan::config::{KEY_DOWN, KEY_DOWN_SELECT, KEY_SELECT, KEY_UP, KEY_UP_DOWN};
use keyscan::{EventKind, KeyEvent, KeyId};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    let _ = display.init();
    display.clear_buffer();
    let _ = display.flush();
    display
}

fn text_style() -> embedded_graphics::mono_font::MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

fn key_name(id: KeyId) -> &'static str {
    match id {
        KEY_UP => "UP",
        KEY_DOWN => "DOWN",
        KEY_SELECT => "SELECT",
        KEY_UP_DOWN => "UP+DOWN",
        KEY_DOWN_SELECT => "DOWN+SELECT",
        _ => "?",
    }
}

fn kind_name(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Down => "down",
        EventKind::Up => "up",
        EventKind::LongDown => "long down",
        EventKind::LongUp => "long up",
        #[cfg(feature = "double-click")]
        EventKind::DoubleUp => "double click",
    }
}

/// Render the start-up screen.
pub fn draw_idle<I2C>(display: &mut Display<I2C>)
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();

    let _ = Text::new("keyscan", Point::new(0, 10), text_style()).draw(display);
    let _ = Text::new("Press a key", Point::new(0, 30), text_style()).draw(display);

    let _ = display.flush();
}

/// Render the last event and the running event count.
pub fn draw_event<I2C>(display: &mut Display<I2C>, event: KeyEvent, count: u32)
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();

    let _ = Text::new("keyscan", Point::new(0, 10), text_style()).draw(display);
    let _ = Text::new(key_name(event.id), Point::new(0, 26), text_style()).draw(display);
    let _ = Text::new(kind_name(event.kind), Point::new(0, 38), text_style()).draw(display);

    let mut line: heapless::String<24> = heapless::String::new();
    let _ = write!(line, "code {} #{}", event.code().raw(), count);
    let _ = Text::new(line.as_str(), Point::new(0, 54), text_style()).draw(display);

    let _ = display.flush();
}

/// Switch the panel on or off without touching its buffer.
pub fn set_power<I2C>(display: &mut Display<I2C>, on: bool)
where
    I2C: embedded_hal::i2c::I2c,
{
    let _ = display.set_display_on(on);
}
