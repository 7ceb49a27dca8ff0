//! Chrome colours that sit outside the deck theme (loading screen,
//! progress track, status messages).

use ratatui::style::Color;

pub const CHROME_BORDER: Color = Color::Rgb(0x40, 0x40, 0x40);
pub const CHROME_TEXT: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
pub const CHROME_SEPARATOR: Color = Color::Rgb(0x6b, 0x72, 0x80);
pub const PROGRESS_TRACK: Color = Color::Rgb(0x26, 0x26, 0x26);
pub const STATUS_ERROR: Color = Color::Rgb(0xef, 0x44, 0x44);
