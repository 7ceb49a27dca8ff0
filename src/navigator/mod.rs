//! Deck navigation state machine.
//!
//! [`step`] is the pure transition function over `(slide_index,
//! reveal_cursor)`; [`Navigator`] owns the current state. Transition
//! timing lives outside the pure function in [`TransitionScheduler`].

mod state;
mod transition;

pub use state::{step, DeckShape, NavCommand, NavError, NavigationState, Navigator, SlideShape, Step};
pub use transition::{Transition, TransitionKind, TransitionScheduler, TransitionSpec};
