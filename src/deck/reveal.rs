//! Progressive disclosure over a slide's blocks.
//!
//! A slide's reveal set is the pre-order sequence of its revealable
//! blocks; a cursor says how many of them are shown. Everything else is
//! always shown, in declaration order, unless it sits inside a revealable
//! block that is still hidden.

use super::model::{BlockId, Deck, Slide};

/// Revealable blocks of `slide`, in declaration order.
pub fn reveal_set(slide: &Slide) -> &[BlockId] {
    slide.reveal_set()
}

/// The first `min(cursor, len)` revealable blocks. Cursors past the end
/// clamp to "everything revealed".
pub fn visible_prefix(slide: &Slide, cursor: usize) -> &[BlockId] {
    let set = slide.reveal_set();
    &set[..cursor.min(set.len())]
}

/// One block that should be drawn, with its nesting depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleBlock {
    pub id: BlockId,
    pub depth: usize,
}

/// All blocks visible at `cursor`, revealed and static interleaved in
/// declaration order.
pub fn visible_blocks(deck: &Deck, slide: &Slide, cursor: usize) -> Vec<VisibleBlock> {
    let shown = visible_prefix(slide, cursor);
    let mut out = Vec::new();
    let mut stack: Vec<VisibleBlock> = slide
        .roots()
        .iter()
        .rev()
        .map(|&id| VisibleBlock { id, depth: 0 })
        .collect();

    while let Some(entry) = stack.pop() {
        let block = deck.block(entry.id);
        if block.revealable && !shown.contains(&entry.id) {
            continue;
        }
        out.push(entry);
        stack.extend(block.children.iter().rev().map(|&id| VisibleBlock {
            id,
            depth: entry.depth + 1,
        }));
    }
    out
}
