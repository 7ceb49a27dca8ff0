//! Shared test utilities: deck builders and a scripted asset loader.

#![allow(dead_code, unused_imports)]

use async_trait::async_trait;
use parking_lot::Mutex;
use podium::assets::{AssetHandle, AssetLoadError, AssetLoader};
use podium::config::Config;
use podium::deck::{BlockDef, Deck, DeckFile, SlideDef};
use podium::navigator::{DeckShape, Transition, TransitionKind};
use podium::session::Session;
use podium::theme::ThemeSpec;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Deck whose slide `i` holds `reveals[i]` revealable text blocks after a
/// fixed heading.
pub fn deck_with_reveals(reveals: &[usize]) -> Deck {
    let slides = reveals
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let mut blocks = vec![BlockDef::heading(format!("Slide {i}"))];
            blocks.extend((0..count).map(|n| BlockDef::text(format!("point {n}")).revealed()));
            SlideDef {
                title: Some(format!("Slide {i}")),
                notes: Some(format!("notes for {i}")),
                blocks,
                ..SlideDef::default()
            }
        })
        .collect();
    Deck::from_slides(slides).expect("non-empty deck")
}

/// Navigator shape with instant transitions.
pub fn shape(reveals: &[usize]) -> DeckShape {
    DeckShape::with_reveal_lens(reveals, instant()).expect("non-empty shape")
}

pub fn instant() -> Transition {
    Transition::new(TransitionKind::None, Duration::ZERO)
}

/// Wrap a deck in a `DeckFile` with the default theme.
pub fn deck_file(deck: Deck, assets: &[&str]) -> DeckFile {
    DeckFile {
        deck,
        theme: ThemeSpec::default(),
        assets: assets
            .iter()
            .map(|id| (id.to_string(), PathBuf::from(format!("{id}.bin"))))
            .collect::<BTreeMap<_, _>>(),
        base_dir: PathBuf::from("."),
    }
}

/// Session over `deck` with the scripted loader.
pub fn session(deck: Deck, loader: Arc<ScriptedLoader>) -> Session {
    let ids = loader.ids();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    Session::with_loader(deck_file(deck, &refs), &Config::default(), loader)
        .expect("valid session")
}

/// Write `content` to `deck.toml` in a fresh temp dir.
pub fn write_deck(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("deck.toml");
    std::fs::write(&path, content).expect("Failed to write deck");
    (dir, path)
}

#[derive(Debug, Clone)]
pub enum Script {
    Load(AssetHandle),
    Fail(String),
    /// Never completes.
    Hang,
    /// Completes after a delay.
    Delay(Duration, AssetHandle),
}

/// Loader that answers from a fixed script and records what was asked.
#[derive(Default)]
pub struct ScriptedLoader {
    script: HashMap<String, Script>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: &str, script: Script) -> Self {
        self.script.insert(id.to_string(), script);
        self
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.script.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn calls(&self) -> Vec<String> {
        let mut calls = self.calls.lock().clone();
        calls.sort();
        calls
    }
}

#[async_trait]
impl AssetLoader for ScriptedLoader {
    async fn load(&self, id: &str) -> Result<AssetHandle, AssetLoadError> {
        self.calls.lock().push(id.to_string());
        match self.script.get(id).cloned() {
            Some(Script::Load(handle)) => Ok(handle),
            Some(Script::Fail(reason)) => Err(AssetLoadError::Io {
                path: PathBuf::from(id),
                source: std::io::Error::other(reason),
            }),
            Some(Script::Hang) => std::future::pending().await,
            Some(Script::Delay(delay, handle)) => {
                tokio::time::sleep(delay).await;
                Ok(handle)
            }
            None => Err(AssetLoadError::Unknown { id: id.to_string() }),
        }
    }
}
