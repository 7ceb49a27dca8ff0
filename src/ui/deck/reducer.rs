//! Reducer for the deck lifecycle.

use crate::ui::mvi::Reducer;

use super::intent::DeckIntent;
use super::state::DeckLifecycleState;

/// Pure lifecycle transitions. Replaying the queue is the caller's job:
/// take it out of `Loading` before dispatching `AssetsReady`.
pub struct DeckReducer;

impl Reducer for DeckReducer {
    type State = DeckLifecycleState;
    type Intent = DeckIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            DeckIntent::QueueCommand { command } => match state {
                DeckLifecycleState::Loading { mut queued } => {
                    queued.push_back(command);
                    DeckLifecycleState::Loading { queued }
                }
                DeckLifecycleState::Ready => DeckLifecycleState::Ready,
            },

            DeckIntent::AssetsReady => DeckLifecycleState::Ready,
        }
    }
}
