//! SSD1306 OLED display wrapper and scene drawing.
//!
//! The four big digits are seven-segment blocks clipped to the time band,
//! so a digit parked one band lower is off screen.  Text uses the Latin-1
//! 6x10 font to cover the accented month and weekday names.

use embedded_graphics::mono_font::iso_8859_1::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Text};
use heapless::String;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use slideface::clock::Meridiem;
use slideface::config::{SCREEN_WIDTH, STATUS_ROW_Y, TIME_BAND_HEIGHT, WEATHER_ROW_Y};
use slideface::face::Glyph;
use slideface::status::battery::BatteryIcon;
use slideface::status::connection::LinkIcon;
use slideface::sync::Weather;
use slideface::Error;

use crate::stage::Stage;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Status glyphs drawn on the date row.
#[derive(Clone, Copy)]
pub struct StatusBar {
    pub battery: Option<BatteryIcon>,
    pub link: LinkIcon,
}

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

fn text_style(color: BinaryColor) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(color)
        .build()
}

/// Render the whole face and push it to the panel.
pub fn draw_face<I2C>(
    display: &mut Display<I2C>,
    stage: &Stage,
    status: &StatusBar,
    weather: &Weather,
    invert: bool,
) -> Result<(), Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    let (fg, bg) = if invert {
        (BinaryColor::Off, BinaryColor::On)
    } else {
        (BinaryColor::On, BinaryColor::Off)
    };
    let _ = display.clear(bg);

    let band = Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, TIME_BAND_HEIGHT));
    {
        let mut clipped = display.clipped(&band);
        for sprite in stage.sprites() {
            if let Glyph::Digit(d) = sprite.glyph {
                draw_digit(&mut clipped, d, sprite.frame, fg);
            }
        }
        if let Some(badge) = stage.meridiem() {
            let label = match badge {
                Meridiem::Am => "AM",
                Meridiem::Pm => "PM",
            };
            let _ = Text::new(label, Point::new(6, 22), text_style(fg)).draw(&mut clipped);
        }
    }

    let style = text_style(fg);
    let _ = Text::new(stage.date(), Point::new(0, STATUS_ROW_Y), style).draw(display);
    draw_status(display, status, fg);

    let mut line: String<40> = String::new();
    let _ = line.push_str(weather.icon.label());
    if !weather.temperature.is_empty() {
        let _ = line.push(' ');
        let _ = line.push_str(&weather.temperature);
    }
    let _ = Text::new(&line, Point::new(0, WEATHER_ROW_Y), style).draw(display);
    let _ = Text::with_alignment(
        &weather.city,
        Point::new(SCREEN_WIDTH as i32 - 1, WEATHER_ROW_Y),
        style,
        Alignment::Right,
    )
    .draw(display);

    display.flush().map_err(|_| Error::Display)
}

/// Segments lit per digit, bit 0 = a (top) through bit 6 = g (middle).
const SEGMENTS: [u8; 10] = [
    0b011_1111, // 0
    0b000_0110, // 1
    0b101_1011, // 2
    0b100_1111, // 3
    0b110_0110, // 4
    0b110_1101, // 5
    0b111_1101, // 6
    0b000_0111, // 7
    0b111_1111, // 8
    0b110_1111, // 9
];

/// Segment thickness in pixels.
const STROKE: u32 = 4;

fn draw_digit<D>(target: &mut D, digit: u8, frame: Rectangle, color: BinaryColor)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let Some(&mask) = SEGMENTS.get(usize::from(digit)) else {
        return;
    };

    let w = frame.size.width;
    let h = frame.size.height;
    let half = h / 2;
    let bar_w = w - 2 * STROKE;
    let post_h = half - STROKE;
    let s = STROKE as i32;

    // (x, y, width, height) relative to the frame, in segment order a..g.
    let segments = [
        (s, 0, bar_w, STROKE),
        (w as i32 - s, s, STROKE, post_h),
        (w as i32 - s, half as i32, STROKE, post_h),
        (s, h as i32 - s, bar_w, STROKE),
        (0, half as i32, STROKE, post_h),
        (0, s, STROKE, post_h),
        (s, half as i32 - s / 2, bar_w, STROKE),
    ];

    let fill = PrimitiveStyle::with_fill(color);
    for (bit, (x, y, sw, sh)) in segments.into_iter().enumerate() {
        if mask & (1 << bit) != 0 {
            let _ = Rectangle::new(frame.top_left + Point::new(x, y), Size::new(sw, sh))
                .into_styled(fill)
                .draw(target);
        }
    }
}

fn draw_status<D>(target: &mut D, status: &StatusBar, color: BinaryColor)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let right = SCREEN_WIDTH as i32;
    let top = STATUS_ROW_Y - 7;

    // Battery: 12x7 outline with a nub, filled in tenths.
    if let Some(icon) = status.battery {
        let body = Rectangle::new(Point::new(right - 14, top), Size::new(12, 7));
        let _ = body
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(target);
        let _ = Rectangle::new(Point::new(right - 2, top + 2), Size::new(2, 3))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(target);

        let fill = u32::from(icon.bars());
        if fill > 0 {
            let _ = Rectangle::new(Point::new(right - 13, top + 1), Size::new(fill, 5))
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(target);
        }
        if icon == BatteryIcon::Charging {
            let _ = Text::new("+", Point::new(right - 22, STATUS_ROW_Y), text_style(color))
                .draw(target);
        }
    }

    let link = match status.link {
        LinkIcon::Connected => "BT",
        LinkIcon::Disconnected => "--",
    };
    let _ = Text::new(link, Point::new(right - 36, STATUS_ROW_Y), text_style(color)).draw(target);
}
