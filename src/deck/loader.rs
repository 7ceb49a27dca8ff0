use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::model::{Deck, SlideDef};
use crate::navigator::TransitionSpec;
use crate::theme::{ThemeError, ThemeSpec};

/// Errors that can occur when loading a deck file.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("Failed to read deck file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse deck file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Deck has no slides")]
    Empty,

    #[error("Invalid block on slide {number}: {reason}", number = .slide + 1)]
    InvalidBlock { slide: usize, reason: String },

    #[error("Slide {number} uses undeclared asset '{asset}'", number = .slide + 1)]
    UnknownAsset { slide: usize, asset: String },

    #[error(transparent)]
    Theme(#[from] ThemeError),
}

#[derive(Debug, Default, Deserialize)]
struct DeckDocument {
    #[serde(default)]
    deck: DeckMeta,
    #[serde(default)]
    theme: Option<ThemeSpec>,
    #[serde(default)]
    assets: BTreeMap<String, PathBuf>,
    #[serde(default)]
    slides: Vec<SlideDef>,
}

#[derive(Debug, Default, Deserialize)]
struct DeckMeta {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    transition: Option<TransitionSpec>,
}

/// A parsed deck file: the deck, its theme and its asset manifest.
#[derive(Debug, Clone)]
pub struct DeckFile {
    pub deck: Deck,
    /// Declared theme, or the built-in default when the file has none.
    pub theme: ThemeSpec,
    /// Asset id → path relative to `base_dir`.
    pub assets: BTreeMap<String, PathBuf>,
    pub base_dir: PathBuf,
}

impl DeckFile {
    /// Read and parse a deck file. Asset paths resolve against its directory.
    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let content = fs::read_to_string(path).map_err(|e| DeckError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, path)
    }

    /// Parse deck TOML; `path` is used for error messages and the base dir.
    pub fn parse(content: &str, path: &Path) -> Result<Self, DeckError> {
        let document: DeckDocument = toml::from_str(content).map_err(|e| DeckError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        let deck = Deck::new(document.deck.title, document.deck.transition, document.slides)?;
        for (slide, asset) in deck.asset_refs() {
            if !document.assets.contains_key(asset) {
                return Err(DeckError::UnknownAsset {
                    slide,
                    asset: asset.to_string(),
                });
            }
        }

        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        tracing::debug!(
            path = %path.display(),
            slides = deck.len(),
            assets = document.assets.len(),
            "Deck parsed"
        );

        Ok(Self {
            deck,
            theme: document.theme.unwrap_or_default(),
            assets: document.assets,
            base_dir,
        })
    }
}
