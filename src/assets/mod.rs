//! Asset preloading.
//!
//! The [`AssetRegistry`] tracks every declared asset from `Pending` to
//! `Loaded` or `Failed` and acts as the readiness barrier for the first
//! render. Loading itself is delegated to an [`AssetLoader`].

mod loader;
mod registry;

pub use loader::{AssetLoadError, AssetLoader, FsAssetLoader};
pub use registry::{AssetHandle, AssetId, AssetRegistry, AssetStatus};
