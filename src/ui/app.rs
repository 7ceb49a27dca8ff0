use crate::assets::AssetRegistry;
use crate::config::{EarlyCommandPolicy, PresentationConfig, ProgressStyle};
use crate::deck::Deck;
use crate::navigator::{NavCommand, NavError, NavigationState, Navigator, TransitionScheduler};
use crate::notes::{NotesEntry, NotesPublisher};
use crate::render::{project, SlideView};
use crate::session::Session;
use crate::theme::ThemeTokens;
use crate::ui::deck::{DeckIntent, DeckLifecycleState, DeckReducer};
use crate::ui::mvi::Reducer;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;

/// How long a status message stays in the footer.
const STATUS_TTL: Duration = Duration::from_secs(3);

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub expires_at: Instant,
}

pub struct App {
    should_quit: bool,
    size: Option<(u16, u16)>,
    deck: Arc<Deck>,
    tokens: Arc<ThemeTokens>,
    assets: AssetRegistry,
    navigator: Navigator,
    /// Loading → Ready gate (MVI pattern).
    lifecycle: DeckLifecycleState,
    scheduler: TransitionScheduler,
    notes: NotesPublisher,
    early_commands: EarlyCommandPolicy,
    progress: ProgressStyle,
    status: Option<StatusMessage>,
    /// Digits typed so far for a jump-to-slide.
    jump_input: String,
    /// Opening slide, applied when the gate opens whatever the early
    /// command policy.
    start: Option<usize>,
}

impl App {
    pub fn new(session: Session, config: &PresentationConfig) -> Self {
        Self {
            should_quit: false,
            size: None,
            deck: session.deck,
            tokens: session.tokens,
            assets: session.assets,
            navigator: Navigator::new(session.shape),
            lifecycle: DeckLifecycleState::default(),
            scheduler: TransitionScheduler::new(),
            notes: NotesPublisher::new(),
            early_commands: config.early_commands,
            progress: config.progress,
            status: None,
            jump_input: String::new(),
            start: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn tokens(&self) -> &ThemeTokens {
        &self.tokens
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    pub fn navigation(&self) -> NavigationState {
        self.navigator.state()
    }

    pub fn progress_style(&self) -> ProgressStyle {
        self.progress
    }

    pub fn size(&self) -> Option<(u16, u16)> {
        self.size
    }

    pub fn queued_commands(&self) -> usize {
        self.lifecycle.queued_len()
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    pub fn jump_input(&self) -> &str {
        &self.jump_input
    }

    /// New receiver for presenter notes.
    pub fn subscribe_notes(&mut self) -> UnboundedReceiver<NotesEntry> {
        self.notes.subscribe()
    }

    /// Audience view of the active slide, or `None` while loading.
    pub fn view(&self) -> Option<SlideView> {
        if !self.is_ready() {
            return None;
        }
        Some(project(
            &self.deck,
            self.navigator.state(),
            self.navigator.transition(),
            &self.tokens,
            &self.assets,
        ))
    }

    /// Feed one navigation command. Commands are handled strictly in the
    /// order they arrive.
    pub fn command(&mut self, command: NavCommand) {
        if self.is_ready() {
            self.apply(command, Instant::now());
            return;
        }
        match self.early_commands {
            EarlyCommandPolicy::Queue => {
                tracing::debug!(?command, "Deck loading, command queued");
                self.dispatch_deck(DeckIntent::QueueCommand { command });
            }
            EarlyCommandPolicy::Drop => {
                tracing::debug!(?command, "Deck loading, command dropped");
            }
        }
    }

    /// Open the deck on `index` instead of the first slide.
    pub fn start_at(&mut self, index: usize) {
        if self.is_ready() {
            self.apply(NavCommand::Jump(index), Instant::now());
        } else {
            self.start = Some(index);
        }
    }

    /// Called once the asset barrier opens. Replays queued commands.
    pub fn on_assets_ready(&mut self) {
        if self.is_ready() {
            return;
        }

        // Extract queue before state transition.
        let queued = match &mut self.lifecycle {
            DeckLifecycleState::Loading { queued } => std::mem::take(queued),
            DeckLifecycleState::Ready => VecDeque::new(),
        };
        self.dispatch_deck(DeckIntent::AssetsReady);

        let (resolved, total) = self.assets.progress();
        tracing::info!(resolved, total, replayed = queued.len(), "Deck ready");

        let now = Instant::now();
        let first = self.navigator.state().slide_index;
        if let Some(index) = self.start.take() {
            self.apply(NavCommand::Jump(index), now);
        }
        // A jump that moved publishes its own notes.
        if self.navigator.state().slide_index == first {
            self.publish_notes();
        }
        for command in queued {
            self.apply(command, now);
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        // The runtime also posts an event, but polling keeps the gate
        // correct if that event is lost.
        if !self.is_ready() && self.assets.ready() {
            self.on_assets_ready();
        }
        if self.scheduler.poll(now) {
            self.navigator.finish_transition();
        }
        if self
            .status
            .as_ref()
            .is_some_and(|status| now >= status.expires_at)
        {
            self.status = None;
        }
    }

    pub fn on_resize(&mut self, cols: u16, rows: u16) {
        self.size = Some((cols, rows));
    }

    pub fn push_jump_digit(&mut self, digit: char) {
        if digit.is_ascii_digit() && self.jump_input.len() < 6 {
            self.jump_input.push(digit);
        }
    }

    pub fn clear_jump_input(&mut self) {
        self.jump_input.clear();
    }

    /// Consume typed digits as a 1-based slide number. Returns false when
    /// nothing was typed.
    pub fn submit_jump(&mut self) -> bool {
        let input = std::mem::take(&mut self.jump_input);
        let Ok(number) = input.parse::<usize>() else {
            return false;
        };
        match number.checked_sub(1) {
            Some(index) => self.command(NavCommand::Jump(index)),
            None => self.set_status("Slides are numbered from 1".to_string(), Instant::now()),
        }
        true
    }

    fn apply(&mut self, command: NavCommand, now: Instant) {
        match self.navigator.apply(command) {
            Ok(step) => {
                if step.slide_changed {
                    self.publish_notes();
                    if step.state.in_transition {
                        self.scheduler
                            .schedule(now, self.navigator.transition().duration);
                    }
                }
            }
            Err(NavError::OutOfRange { index, len }) => {
                tracing::warn!(index, len, "Jump rejected");
                self.set_status(format!("No slide {} (deck has {len})", index + 1), now);
            }
        }
    }

    fn publish_notes(&mut self) {
        let entry = NotesEntry::for_slide(&self.deck, self.navigator.state().slide_index);
        self.notes.publish(entry);
    }

    fn set_status(&mut self, text: String, now: Instant) {
        self.status = Some(StatusMessage {
            text,
            expires_at: now + STATUS_TTL,
        });
    }

    /// Dispatch an intent to the deck lifecycle reducer.
    fn dispatch_deck(&mut self, intent: DeckIntent) {
        dispatch_mvi!(self, lifecycle, DeckReducer, intent);
    }
}
