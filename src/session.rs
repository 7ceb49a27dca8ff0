//! Startup assembly: deck file → resolved theme, asset registry, loader
//! and navigator shape. Every startup-fatal error surfaces here.

use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::assets::{AssetLoader, AssetRegistry, FsAssetLoader};
use crate::config::Config;
use crate::deck::{Deck, DeckError, DeckFile};
use crate::navigator::DeckShape;
use crate::theme::{self, ThemeTokens};

/// Everything the presenter needs, produced once before the first frame.
pub struct Session {
    pub deck: Arc<Deck>,
    pub tokens: Arc<ThemeTokens>,
    pub assets: AssetRegistry,
    pub shape: DeckShape,
    loader: Arc<dyn AssetLoader>,
}

impl Session {
    pub fn open(path: &Path, config: &Config) -> Result<Self, DeckError> {
        let file = DeckFile::load(path)?;
        Self::from_file(file, config)
    }

    pub fn from_file(file: DeckFile, config: &Config) -> Result<Self, DeckError> {
        let loader = Arc::new(FsAssetLoader::new(file.base_dir.clone(), file.assets.clone()));
        Self::with_loader(file, config, loader)
    }

    /// Like [`Session::from_file`] with a caller-supplied loader.
    pub fn with_loader(
        file: DeckFile,
        config: &Config,
        loader: Arc<dyn AssetLoader>,
    ) -> Result<Self, DeckError> {
        let tokens = theme::resolve(&file.theme)?;
        tokens.check_roles(file.deck.color_roles())?;

        let assets = AssetRegistry::new();
        assets.register(file.assets.keys().cloned());

        let shape = DeckShape::from_deck(&file.deck, config.presentation.default_transition());

        tracing::info!(
            title = file.deck.title().unwrap_or("untitled"),
            slides = file.deck.len(),
            assets = file.assets.len(),
            "Session ready"
        );

        Ok(Self {
            deck: Arc::new(file.deck),
            tokens: Arc::new(tokens),
            assets,
            shape,
            loader,
        })
    }

    /// Kick off asset loading on the current tokio runtime.
    pub fn start_loading(&self, config: &Config) -> Vec<JoinHandle<()>> {
        self.assets
            .load(Arc::clone(&self.loader), config.assets.load_timeout())
    }
}
