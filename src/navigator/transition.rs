//! Slide transition settings and the timer that clears the transition flag.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Visual effect used when entering a new slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    #[default]
    Slide,
    Fade,
    None,
}

/// Transition override declared on a deck or a single slide.
///
/// Unset fields inherit from the enclosing level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSpec {
    #[serde(default)]
    pub kind: Option<TransitionKind>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

/// Fully resolved transition for one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub duration: Duration,
}

impl Transition {
    pub fn new(kind: TransitionKind, duration: Duration) -> Self {
        Self { kind, duration }
    }

    /// Layer `spec` over `self`.
    pub fn overridden_by(self, spec: Option<&TransitionSpec>) -> Self {
        let Some(spec) = spec else {
            return self;
        };
        Self {
            kind: spec.kind.unwrap_or(self.kind),
            duration: spec
                .duration_ms
                .map(Duration::from_millis)
                .unwrap_or(self.duration),
        }
    }

    /// Whether entering a slide with this transition raises the flag at all.
    pub fn is_animated(&self) -> bool {
        self.kind != TransitionKind::None && !self.duration.is_zero()
    }
}

/// Deadline-based scheduler driven by the UI tick.
///
/// The navigator only raises `in_transition`; this scheduler decides when
/// the configured duration has passed so the caller can clear it.
#[derive(Debug, Default)]
pub struct TransitionScheduler {
    deadline: Option<Instant>,
}

impl TransitionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the countdown.
    pub fn schedule(&mut self, now: Instant, duration: Duration) {
        self.deadline = Some(now + duration);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once, on the first poll at or past the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_layers_only_set_fields() {
        let base = Transition::new(TransitionKind::Slide, Duration::from_millis(250));
        let spec = TransitionSpec {
            kind: Some(TransitionKind::Fade),
            duration_ms: None,
        };
        let resolved = base.overridden_by(Some(&spec));
        assert_eq!(resolved.kind, TransitionKind::Fade);
        assert_eq!(resolved.duration, Duration::from_millis(250));
    }

    #[test]
    fn none_or_zero_is_not_animated() {
        assert!(!Transition::new(TransitionKind::None, Duration::from_millis(250)).is_animated());
        assert!(!Transition::new(TransitionKind::Slide, Duration::ZERO).is_animated());
        assert!(Transition::new(TransitionKind::Fade, Duration::from_millis(1)).is_animated());
    }

    #[test]
    fn scheduler_fires_once_after_deadline() {
        let mut scheduler = TransitionScheduler::new();
        let start = Instant::now();
        scheduler.schedule(start, Duration::from_millis(250));

        assert!(!scheduler.poll(start + Duration::from_millis(100)));
        assert!(scheduler.poll(start + Duration::from_millis(250)));
        assert!(!scheduler.poll(start + Duration::from_millis(400)));
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn reschedule_pushes_deadline_out() {
        let mut scheduler = TransitionScheduler::new();
        let start = Instant::now();
        scheduler.schedule(start, Duration::from_millis(250));
        scheduler.schedule(start + Duration::from_millis(200), Duration::from_millis(250));

        assert!(!scheduler.poll(start + Duration::from_millis(300)));
        assert!(scheduler.poll(start + Duration::from_millis(450)));
    }
}
