mod common;

use common::deck_with_reveals;
use podium::deck::reveal::reveal_set;
use podium::deck::{visible_blocks, visible_prefix, BlockDef, BlockKind, Deck, SlideDef};

fn texts(deck: &Deck, slide: usize, cursor: usize) -> Vec<String> {
    let slide_ref = deck.slide(slide).unwrap();
    visible_blocks(deck, slide_ref, cursor)
        .into_iter()
        .map(|visible| match &deck.block(visible.id).kind {
            BlockKind::Heading { text, .. }
            | BlockKind::Text { text }
            | BlockKind::ListItem { text } => text.clone(),
            BlockKind::Link { text, .. } => format!("link:{text}"),
            other => other.name().to_string(),
        })
        .collect()
}

#[test]
fn prefix_is_monotone_in_cursor() {
    let deck = deck_with_reveals(&[4]);
    let slide = deck.slide(0).unwrap();
    for cursor in 0..6 {
        let shorter = visible_prefix(slide, cursor);
        let longer = visible_prefix(slide, cursor + 1);
        assert!(longer.starts_with(shorter));
        assert_eq!(shorter.len(), cursor.min(4));
    }
}

#[test]
fn reveal_set_is_declaration_order() {
    let deck = Deck::from_slides(vec![SlideDef::with_blocks(vec![
        BlockDef::text("a").revealed(),
        BlockDef::list(vec![
            BlockDef::list_item("b").revealed(),
            BlockDef::list_item("c"),
            BlockDef::list_item("d").revealed(),
        ]),
        BlockDef::text("e").revealed(),
    ])])
    .unwrap();
    let slide = deck.slide(0).unwrap();
    let order: Vec<String> = reveal_set(slide)
        .iter()
        .map(|&id| match &deck.block(id).kind {
            BlockKind::Text { text } | BlockKind::ListItem { text } => text.clone(),
            other => other.name().to_string(),
        })
        .collect();
    assert_eq!(order, vec!["a", "b", "d", "e"]);
}

#[test]
fn static_blocks_interleave_with_revealed() {
    let deck = Deck::from_slides(vec![SlideDef::with_blocks(vec![
        BlockDef::heading("title"),
        BlockDef::text("first").revealed(),
        BlockDef::text("always"),
        BlockDef::text("second").revealed(),
        BlockDef::text("footer"),
    ])])
    .unwrap();

    assert_eq!(texts(&deck, 0, 0), vec!["title", "always", "footer"]);
    assert_eq!(texts(&deck, 0, 1), vec!["title", "first", "always", "footer"]);
    assert_eq!(
        texts(&deck, 0, 2),
        vec!["title", "first", "always", "second", "footer"]
    );
}

#[test]
fn hidden_item_hides_its_children() {
    let deck = Deck::from_slides(vec![SlideDef::with_blocks(vec![BlockDef::list(vec![
        BlockDef::list_item("").revealed().with_children(vec![BlockDef::link(
            "Elm guide",
            "https://guide.elm-lang.org",
        )]),
        BlockDef::list_item("static item"),
    ])])])
    .unwrap();

    assert_eq!(texts(&deck, 0, 0), vec!["list", "static item"]);
    assert_eq!(
        texts(&deck, 0, 1),
        vec!["list", "", "link:Elm guide", "static item"]
    );
}

#[test]
fn depth_tracks_nesting() {
    let deck = Deck::from_slides(vec![SlideDef::with_blocks(vec![BlockDef::list(vec![
        BlockDef::list_item("").with_children(vec![BlockDef::link("x", "https://x.dev")]),
    ])])])
    .unwrap();
    let slide = deck.slide(0).unwrap();
    let depths: Vec<usize> = visible_blocks(&deck, slide, 0)
        .iter()
        .map(|v| v.depth)
        .collect();
    assert_eq!(depths, vec![0, 1, 2]);
}
