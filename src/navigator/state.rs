use std::time::Duration;
use thiserror::Error;

use super::transition::Transition;
use crate::deck::Deck;

/// Abstract navigation command, already decoupled from keys and clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Prev,
    Jump(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("Slide {index} is out of range (deck has {len} slides)")]
    OutOfRange { index: usize, len: usize },
}

/// Position within the deck.
///
/// Always satisfies `slide_index < len` and
/// `reveal_cursor <= reveal_len(slide_index)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub slide_index: usize,
    pub reveal_cursor: usize,
    pub in_transition: bool,
}

impl NavigationState {
    pub fn position(&self) -> (usize, usize) {
        (self.slide_index, self.reveal_cursor)
    }
}

/// What the navigator needs to know about one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideShape {
    pub reveal_len: usize,
    pub transition: Transition,
}

/// Per-slide reveal lengths and transitions. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckShape {
    slides: Vec<SlideShape>,
}

impl DeckShape {
    /// Returns `None` for an empty slide list.
    pub fn new(slides: Vec<SlideShape>) -> Option<Self> {
        if slides.is_empty() {
            None
        } else {
            Some(Self { slides })
        }
    }

    /// Shape of `deck`, with `default` as the transition for slides that
    /// don't override it.
    pub fn from_deck(deck: &Deck, default: Transition) -> Self {
        let deck_default = default.overridden_by(deck.transition());
        let slides = deck
            .slides()
            .iter()
            .map(|slide| SlideShape {
                reveal_len: slide.reveal_set().len(),
                transition: deck_default.overridden_by(slide.transition.as_ref()),
            })
            .collect();
        Self { slides }
    }

    /// Uniform shape used in tests and previews: given reveal lengths, a
    /// single transition for every slide.
    pub fn with_reveal_lens(lens: &[usize], transition: Transition) -> Option<Self> {
        Self::new(
            lens.iter()
                .map(|&reveal_len| SlideShape {
                    reveal_len,
                    transition,
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn reveal_len(&self, slide: usize) -> usize {
        self.slides.get(slide).map(|s| s.reveal_len).unwrap_or(0)
    }

    pub fn transition(&self, slide: usize) -> Transition {
        self.slides
            .get(slide)
            .map(|s| s.transition)
            .unwrap_or(Transition::new(super::TransitionKind::None, Duration::ZERO))
    }

    /// Number of `Next` commands from the first state to the last one.
    pub fn total_steps(&self) -> usize {
        let reveals: usize = self.slides.iter().map(|s| s.reveal_len).sum();
        reveals + self.slides.len() - 1
    }
}

/// Result of applying one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub state: NavigationState,
    /// True when the command entered a different slide.
    pub slide_changed: bool,
}

/// Pure transition function of the navigation state machine.
///
/// Boundary commands return the input state unchanged. Only `Jump` can
/// fail, and then the caller keeps its current state.
pub fn step(
    shape: &DeckShape,
    state: NavigationState,
    command: NavCommand,
) -> Result<Step, NavError> {
    let (slide, cursor) = state.position();
    let (next_slide, next_cursor) = match command {
        NavCommand::Next => {
            if cursor < shape.reveal_len(slide) {
                (slide, cursor + 1)
            } else if slide + 1 < shape.len() {
                (slide + 1, 0)
            } else {
                (slide, cursor)
            }
        }
        NavCommand::Prev => {
            if cursor > 0 {
                (slide, cursor - 1)
            } else if slide > 0 {
                // Previous slide is entered fully revealed.
                (slide - 1, shape.reveal_len(slide - 1))
            } else {
                (slide, cursor)
            }
        }
        NavCommand::Jump(index) => {
            if index >= shape.len() {
                return Err(NavError::OutOfRange {
                    index,
                    len: shape.len(),
                });
            }
            (index, 0)
        }
    };

    let slide_changed = next_slide != slide;
    let in_transition = if slide_changed {
        shape.transition(next_slide).is_animated()
    } else {
        state.in_transition
    };

    Ok(Step {
        state: NavigationState {
            slide_index: next_slide,
            reveal_cursor: next_cursor,
            in_transition,
        },
        slide_changed,
    })
}

/// Owns the current navigation state and applies commands one at a time.
#[derive(Debug, Clone)]
pub struct Navigator {
    shape: DeckShape,
    state: NavigationState,
}

impl Navigator {
    pub fn new(shape: DeckShape) -> Self {
        Self {
            shape,
            state: NavigationState::default(),
        }
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn shape(&self) -> &DeckShape {
        &self.shape
    }

    /// Transition of the active slide.
    pub fn transition(&self) -> Transition {
        self.shape.transition(self.state.slide_index)
    }

    pub fn apply(&mut self, command: NavCommand) -> Result<Step, NavError> {
        let step = step(&self.shape, self.state, command)?;
        if step.state != self.state {
            tracing::debug!(
                ?command,
                slide = step.state.slide_index,
                cursor = step.state.reveal_cursor,
                "Navigation"
            );
        }
        self.state = step.state;
        Ok(step)
    }

    /// Clear the transition flag once the scheduler reports the duration elapsed.
    pub fn finish_transition(&mut self) {
        self.state.in_transition = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::TransitionKind;

    fn shape(lens: &[usize]) -> DeckShape {
        DeckShape::with_reveal_lens(
            lens,
            Transition::new(TransitionKind::Slide, Duration::from_millis(250)),
        )
        .unwrap()
    }

    #[test]
    fn empty_shape_is_rejected() {
        assert!(DeckShape::with_reveal_lens(&[], Transition::new(TransitionKind::None, Duration::ZERO)).is_none());
    }

    #[test]
    fn reveal_step_keeps_transition_flag() {
        let shape = shape(&[0, 2]);
        let entered = step(&shape, NavigationState::default(), NavCommand::Next).unwrap();
        assert!(entered.state.in_transition);
        let revealed = step(&shape, entered.state, NavCommand::Next).unwrap();
        assert!(!revealed.slide_changed);
        assert!(revealed.state.in_transition);

        let settled = NavigationState {
            in_transition: false,
            ..entered.state
        };
        let revealed = step(&shape, settled, NavCommand::Next).unwrap();
        assert!(!revealed.state.in_transition);
    }

    #[test]
    fn jump_to_current_slide_resets_cursor_without_transition() {
        let shape = shape(&[3]);
        let state = NavigationState {
            slide_index: 0,
            reveal_cursor: 2,
            in_transition: false,
        };
        let jumped = step(&shape, state, NavCommand::Jump(0)).unwrap();
        assert_eq!(jumped.state.position(), (0, 0));
        assert!(!jumped.slide_changed);
        assert!(!jumped.state.in_transition);
    }

    #[test]
    fn unanimated_slide_never_raises_flag() {
        let shape = DeckShape::with_reveal_lens(
            &[0, 0],
            Transition::new(TransitionKind::None, Duration::from_millis(250)),
        )
        .unwrap();
        let entered = step(&shape, NavigationState::default(), NavCommand::Next).unwrap();
        assert!(entered.slide_changed);
        assert!(!entered.state.in_transition);
    }
}
