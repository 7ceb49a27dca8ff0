//! Theme specification and resolution.
//!
//! A [`ThemeSpec`] is the abstract palette/typography declared by a deck
//! (or the built-in default). [`resolve`] turns it into [`ThemeTokens`]
//! once at startup; the tokens are then shared read-only by every render.

mod color;
mod resolver;
mod spec;

pub use color::Rgb;
pub use resolver::{resolve, ThemeError, ThemeTokens};
pub use spec::{Fallbacks, ThemeSpec, REQUIRED_COLOR_ROLES, REQUIRED_FONT_ROLES};
