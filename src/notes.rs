//! Presenter notes channel.
//!
//! Notes never enter the audience view. Each time the active slide changes
//! the app publishes a [`NotesEntry`] to every subscriber; a subscriber can
//! be drained into a JSON-lines file that a second terminal can follow.

use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::deck::Deck;

/// Notes for the slide that just became active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotesEntry {
    /// Zero-based slide index.
    pub slide: usize,
    pub total: usize,
    pub title: Option<String>,
    pub notes: Option<String>,
}

impl NotesEntry {
    pub fn for_slide(deck: &Deck, index: usize) -> Self {
        let slide = deck.slide(index);
        Self {
            slide: index,
            total: deck.len(),
            title: slide.and_then(|s| s.title.clone()),
            notes: slide.and_then(|s| s.notes.as_deref()).map(clean_notes),
        }
    }
}

/// Trim indentation and the `<br>` line breaks decks often carry.
fn clean_notes(raw: &str) -> String {
    raw.lines()
        .map(|line| line.trim().trim_end_matches("<br>").trim_end())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fan-out publisher. Every subscriber sees every entry, in order.
#[derive(Default)]
pub struct NotesPublisher {
    subscribers: Vec<UnboundedSender<NotesEntry>>,
    current: Option<NotesEntry>,
}

impl NotesPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<NotesEntry> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn publish(&mut self, entry: NotesEntry) {
        self.subscribers.retain(|tx| tx.send(entry.clone()).is_ok());
        self.current = Some(entry);
    }

    /// Last published entry.
    pub fn current(&self) -> Option<&NotesEntry> {
        self.current.as_ref()
    }
}

/// Append one JSON object per entry to `path` until the publisher goes away.
pub async fn write_json_lines(
    mut rx: UnboundedReceiver<NotesEntry>,
    path: PathBuf,
) -> io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await?;
    while let Some(entry) = rx.recv().await {
        let mut line = serde_json::to_string(&entry).map_err(io::Error::other)?;
        line.push('\n');
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
    }
    Ok(())
}
