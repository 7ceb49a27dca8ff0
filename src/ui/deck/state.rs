//! State for the deck lifecycle.

use crate::navigator::NavCommand;
use crate::ui::mvi::UiState;
use std::collections::VecDeque;

/// Loading placeholder until the asset barrier opens, then Ready.
#[derive(Debug, Clone, PartialEq)]
pub enum DeckLifecycleState {
    /// Assets still pending; navigation is held in arrival order.
    Loading { queued: VecDeque<NavCommand> },

    /// Navigator accepts commands directly.
    Ready,
}

impl Default for DeckLifecycleState {
    fn default() -> Self {
        DeckLifecycleState::Loading {
            queued: VecDeque::new(),
        }
    }
}

impl UiState for DeckLifecycleState {}

impl DeckLifecycleState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn queued_len(&self) -> usize {
        match self {
            Self::Loading { queued } => queued.len(),
            Self::Ready => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_loading_with_empty_queue() {
        let state = DeckLifecycleState::default();
        assert!(matches!(state, DeckLifecycleState::Loading { ref queued } if queued.is_empty()));
        assert!(!state.is_ready());
    }

    #[test]
    fn ready_has_nothing_queued() {
        assert_eq!(DeckLifecycleState::Ready.queued_len(), 0);
    }
}
