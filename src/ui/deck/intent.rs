//! Intents for the deck lifecycle.

use crate::navigator::NavCommand;
use crate::ui::mvi::Intent;

#[derive(Debug)]
pub enum DeckIntent {
    /// Hold a command until the deck is ready.
    /// In Ready this is a no-op (caller applies commands directly).
    QueueCommand { command: NavCommand },

    /// Every asset has resolved (loaded or failed).
    AssetsReady,
}

impl Intent for DeckIntent {}
