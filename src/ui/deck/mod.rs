//! Deck lifecycle feature module.
//!
//! Gates navigation on asset readiness: commands that arrive while the
//! deck is still loading are held and replayed once it is ready.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Lifecycle state enum (Loading → Ready)
//! - `intent.rs` - Events (QueueCommand, AssetsReady)
//! - `reducer.rs` - State transitions (pure, no side effects)

mod intent;
mod reducer;
mod state;

pub use intent::DeckIntent;
pub use reducer::DeckReducer;
pub use state::DeckLifecycleState;
