pub mod assets;
pub mod config;
pub mod deck;
pub mod logging;
pub mod navigator;
pub mod notes;
pub mod render;
pub mod session;
pub mod theme;
pub mod ui;
