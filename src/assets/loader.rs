use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::registry::{AssetHandle, AssetId};

/// Why an asset could not be materialised. Recorded per asset, never fatal.
#[derive(Debug, Error)]
pub enum AssetLoadError {
    #[error("Asset '{id}' is not declared")]
    Unknown { id: String },

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Timed out after {0:?}")]
    TimedOut(Duration),
}

/// Materialises a single asset. Implementations only load; status
/// bookkeeping belongs to the registry.
#[async_trait]
pub trait AssetLoader: Send + Sync {
    async fn load(&self, id: &str) -> Result<AssetHandle, AssetLoadError>;
}

/// Loads assets from files next to the deck.
pub struct FsAssetLoader {
    base_dir: PathBuf,
    manifest: BTreeMap<AssetId, PathBuf>,
}

impl FsAssetLoader {
    pub fn new(base_dir: impl Into<PathBuf>, manifest: BTreeMap<AssetId, PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            manifest,
        }
    }

    fn path_for(&self, id: &str) -> Option<PathBuf> {
        self.manifest.get(id).map(|rel| self.base_dir.join(rel))
    }
}

#[async_trait]
impl AssetLoader for FsAssetLoader {
    async fn load(&self, id: &str) -> Result<AssetHandle, AssetLoadError> {
        let path = self.path_for(id).ok_or_else(|| AssetLoadError::Unknown {
            id: id.to_string(),
        })?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| AssetLoadError::Io {
                path: path.clone(),
                source: e,
            })?;

        match kind_of(&path) {
            FileKind::Raster => {
                let decode_path = path.clone();
                tokio::task::spawn_blocking(move || image_dimensions(&decode_path, bytes))
                    .await
                    .map_err(|e| AssetLoadError::Io {
                        path,
                        source: std::io::Error::other(e),
                    })?
            }
            FileKind::Opaque => Ok(AssetHandle::Binary { len: bytes.len() }),
            FileKind::Textual => match String::from_utf8(bytes) {
                Ok(text) => Ok(AssetHandle::Text(Arc::from(text))),
                Err(err) => Ok(AssetHandle::Binary {
                    len: err.into_bytes().len(),
                }),
            },
        }
    }
}

enum FileKind {
    Raster,
    Opaque,
    Textual,
}

fn kind_of(path: &Path) -> FileKind {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" | "jpg" | "jpeg" => FileKind::Raster,
        "svg" | "gif" | "webp" | "mp4" | "webm" => FileKind::Opaque,
        _ => FileKind::Textual,
    }
}

fn image_dimensions(path: &Path, bytes: Vec<u8>) -> Result<AssetHandle, AssetLoadError> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| AssetLoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
    let (width, height) = reader.into_dimensions().map_err(|e| AssetLoadError::Decode {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(AssetHandle::Image { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn reads_text_assets() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("length.elm"), "length = List.length").unwrap();
        let mut manifest = BTreeMap::new();
        manifest.insert("length".to_string(), PathBuf::from("length.elm"));
        let loader = FsAssetLoader::new(dir.path(), manifest);

        let handle = loader.load("length").await.unwrap();
        assert_eq!(handle, AssetHandle::Text(Arc::from("length = List.length")));
    }

    #[tokio::test]
    async fn svg_is_kept_opaque() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("logo.svg"), "<svg/>").unwrap();
        let mut manifest = BTreeMap::new();
        manifest.insert("logo".to_string(), PathBuf::from("logo.svg"));
        let loader = FsAssetLoader::new(dir.path(), manifest);

        assert_eq!(loader.load("logo").await.unwrap(), AssetHandle::Binary { len: 6 });
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut manifest = BTreeMap::new();
        manifest.insert("tweet".to_string(), PathBuf::from("tweet.png"));
        let loader = FsAssetLoader::new(dir.path(), manifest);

        assert!(matches!(
            loader.load("tweet").await,
            Err(AssetLoadError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn corrupt_png_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("tweet.png"), b"not really a png").unwrap();
        let mut manifest = BTreeMap::new();
        manifest.insert("tweet".to_string(), PathBuf::from("tweet.png"));
        let loader = FsAssetLoader::new(dir.path(), manifest);

        assert!(matches!(
            loader.load("tweet").await,
            Err(AssetLoadError::Decode { .. }) | Err(AssetLoadError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn undeclared_id_is_unknown() {
        let loader = FsAssetLoader::new(".", BTreeMap::new());
        assert!(matches!(
            loader.load("nope").await,
            Err(AssetLoadError::Unknown { .. })
        ));
    }
}
