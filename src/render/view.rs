use std::sync::Arc;

use crate::assets::{AssetHandle, AssetRegistry, AssetStatus};
use crate::deck::{visible_blocks, BlockId, BlockKind, Deck, Slide};
use crate::navigator::{NavigationState, Transition, TransitionKind};
use crate::theme::{Rgb, ThemeTokens};

/// What the audience sees for the active slide.
///
/// Presenter notes are deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideView {
    pub index: usize,
    pub total: usize,
    pub title: Option<String>,
    pub background: Rgb,
    pub foreground: Rgb,
    /// Set while the slide's entry transition is running.
    pub transition: Option<TransitionKind>,
    /// Visible blocks in pre-order; `depth` gives the nesting.
    pub nodes: Vec<ViewNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewNode {
    pub block: BlockId,
    pub depth: usize,
    pub color: Rgb,
    pub content: NodeContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeContent {
    Heading { text: String, level: u8 },
    Paragraph(String),
    Code { lang: Option<String>, source: Arc<str> },
    Image { label: String, size: Option<(u32, u32)> },
    ListItem { marker: String, text: String },
    Table { header: Vec<String>, rows: Vec<Vec<String>> },
    Quote { quote: String, cite: Option<String> },
    Link { text: String, href: String },
    Media { url: String, title: Option<String> },
    /// Stand-in for an asset that failed or never loaded.
    Placeholder { asset: String, reason: String },
}

/// Build the audience view of the active slide.
///
/// Stateless: the output depends only on the arguments.
pub fn project(
    deck: &Deck,
    state: NavigationState,
    transition: Transition,
    tokens: &ThemeTokens,
    assets: &AssetRegistry,
) -> SlideView {
    let index = state.slide_index.min(deck.len().saturating_sub(1));
    let Some(slide) = deck.slide(index) else {
        return SlideView {
            index,
            total: deck.len(),
            title: None,
            background: tokens.background(),
            foreground: tokens.foreground(),
            transition: None,
            nodes: Vec::new(),
        };
    };

    let background = role_color(tokens, slide.style.bg.as_deref()).unwrap_or(tokens.background());
    let foreground = role_color(tokens, slide.style.fg.as_deref()).unwrap_or(tokens.foreground());

    let nodes = visible_blocks(deck, slide, state.reveal_cursor)
        .into_iter()
        .filter_map(|visible| {
            let block = deck.block(visible.id);
            let content = node_content(deck, visible.id, &block.kind, assets)?;
            let color = role_color(tokens, block.color.as_deref())
                .unwrap_or_else(|| default_color(&content, slide, tokens, foreground));
            Some(ViewNode {
                block: visible.id,
                depth: visible.depth,
                color,
                content,
            })
        })
        .collect();

    SlideView {
        index,
        total: deck.len(),
        title: slide.title.clone(),
        background,
        foreground,
        transition: state.in_transition.then_some(transition.kind),
        nodes,
    }
}

fn role_color(tokens: &ThemeTokens, role: Option<&str>) -> Option<Rgb> {
    role.and_then(|r| tokens.color(r))
}

fn default_color(content: &NodeContent, slide: &Slide, tokens: &ThemeTokens, fg: Rgb) -> Rgb {
    match content {
        NodeContent::Heading { .. } if slide.style.fg.is_none() => tokens.emphasis(),
        NodeContent::Placeholder { .. } | NodeContent::Media { .. } => tokens.muted(),
        _ => fg,
    }
}

fn node_content(
    deck: &Deck,
    id: BlockId,
    kind: &BlockKind,
    assets: &AssetRegistry,
) -> Option<NodeContent> {
    let content = match kind {
        BlockKind::Heading { text, level } => NodeContent::Heading {
            text: text.clone(),
            level: *level,
        },
        BlockKind::Text { text } => NodeContent::Paragraph(text.clone()),
        BlockKind::CodePane {
            lang,
            source,
            source_asset,
        } => match (source, source_asset) {
            (Some(source), _) => NodeContent::Code {
                lang: lang.clone(),
                source: Arc::from(source.as_str()),
            },
            (None, Some(asset)) => match assets.status(asset) {
                Some(AssetStatus::Loaded(AssetHandle::Text(source))) => NodeContent::Code {
                    lang: lang.clone(),
                    source,
                },
                status => placeholder(asset, status),
            },
            (None, None) => return None,
        },
        BlockKind::Image { asset, alt } => match assets.status(asset) {
            Some(AssetStatus::Loaded(handle)) => NodeContent::Image {
                label: alt.clone().unwrap_or_else(|| asset.clone()),
                size: match handle {
                    AssetHandle::Image { width, height } => Some((width, height)),
                    _ => None,
                },
            },
            status => placeholder(asset, status),
        },
        // Lists are containers; their items carry the content.
        BlockKind::List { .. } => return None,
        BlockKind::ListItem { text } => NodeContent::ListItem {
            marker: list_marker(deck, id),
            text: text.clone(),
        },
        BlockKind::Table { header, rows } => NodeContent::Table {
            header: header.clone(),
            rows: rows.clone(),
        },
        BlockKind::BlockQuote { quote, cite } => NodeContent::Quote {
            quote: quote.clone(),
            cite: cite.clone(),
        },
        BlockKind::Link { text, href } => NodeContent::Link {
            text: text.clone(),
            href: href.clone(),
        },
        BlockKind::EmbeddedMedia { url, title } => NodeContent::Media {
            url: url.clone(),
            title: title.clone(),
        },
    };
    Some(content)
}

fn placeholder(asset: &str, status: Option<AssetStatus>) -> NodeContent {
    let reason = match status {
        Some(AssetStatus::Failed { reason }) => reason,
        Some(AssetStatus::Pending) => "still loading".to_string(),
        Some(AssetStatus::Loaded(_)) => "unsupported asset type".to_string(),
        None => "not registered".to_string(),
    };
    NodeContent::Placeholder {
        asset: asset.to_string(),
        reason,
    }
}

fn list_marker(deck: &Deck, id: BlockId) -> String {
    let block = deck.block(id);
    let Some(parent) = block.parent else {
        return "•".to_string();
    };
    match deck.block(parent).kind {
        BlockKind::List { ordered: true } => {
            let position = deck
                .block(parent)
                .children
                .iter()
                .position(|&child| child == id)
                .unwrap_or(0);
            format!("{}.", position + 1)
        }
        _ => "•".to_string(),
    }
}
