//! Deck model: slides and content blocks stored in an arena, the reveal
//! tracker, and the TOML deck-file loader.

mod loader;
mod model;
pub mod reveal;

pub use loader::{DeckError, DeckFile};
pub use model::{
    BlockDef, BlockId, BlockKind, ContentBlock, Deck, Slide, SlideDef, SlideStyle,
};
pub use reveal::{visible_blocks, visible_prefix, VisibleBlock};
