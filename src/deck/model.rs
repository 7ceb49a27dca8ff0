use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::loader::DeckError;
use crate::navigator::TransitionSpec;

/// Stable index of a block in the deck's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(usize);

impl BlockId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Content variant plus its opaque payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockKind {
    Heading {
        text: String,
        #[serde(default = "default_heading_level")]
        level: u8,
    },
    Text {
        text: String,
    },
    CodePane {
        #[serde(default)]
        lang: Option<String>,
        #[serde(default)]
        source: Option<String>,
        #[serde(default)]
        source_asset: Option<String>,
    },
    Image {
        asset: String,
        #[serde(default)]
        alt: Option<String>,
    },
    List {
        #[serde(default)]
        ordered: bool,
    },
    ListItem {
        #[serde(default)]
        text: String,
    },
    Table {
        #[serde(default)]
        header: Vec<String>,
        #[serde(default)]
        rows: Vec<Vec<String>>,
    },
    BlockQuote {
        quote: String,
        #[serde(default)]
        cite: Option<String>,
    },
    Link {
        text: String,
        href: String,
    },
    EmbeddedMedia {
        url: String,
        #[serde(default)]
        title: Option<String>,
    },
}

fn default_heading_level() -> u8 {
    1
}

impl BlockKind {
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Heading { .. } => "heading",
            BlockKind::Text { .. } => "text",
            BlockKind::CodePane { .. } => "code_pane",
            BlockKind::Image { .. } => "image",
            BlockKind::List { .. } => "list",
            BlockKind::ListItem { .. } => "list_item",
            BlockKind::Table { .. } => "table",
            BlockKind::BlockQuote { .. } => "block_quote",
            BlockKind::Link { .. } => "link",
            BlockKind::EmbeddedMedia { .. } => "embedded_media",
        }
    }

    fn accepts_children(&self) -> bool {
        matches!(
            self,
            BlockKind::List { .. } | BlockKind::ListItem { .. } | BlockKind::BlockQuote { .. }
        )
    }

    /// Asset ids this block depends on.
    pub fn asset(&self) -> Option<&str> {
        match self {
            BlockKind::Image { asset, .. } => Some(asset),
            BlockKind::CodePane {
                source_asset: Some(asset),
                ..
            } => Some(asset),
            _ => None,
        }
    }
}

/// Declarative form of a block, as written in a deck file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDef {
    #[serde(flatten)]
    pub kind: BlockKind,
    /// Participates in progressive disclosure.
    #[serde(default)]
    pub reveal: bool,
    /// Colour role override.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockDef>,
}

impl BlockDef {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            reveal: false,
            color: None,
            children: Vec::new(),
        }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Heading {
            text: text.into(),
            level: 1,
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Text { text: text.into() })
    }

    pub fn code(lang: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(BlockKind::CodePane {
            lang: Some(lang.into()),
            source: Some(source.into()),
            source_asset: None,
        })
    }

    pub fn code_asset(lang: impl Into<String>, asset: impl Into<String>) -> Self {
        Self::new(BlockKind::CodePane {
            lang: Some(lang.into()),
            source: None,
            source_asset: Some(asset.into()),
        })
    }

    pub fn image(asset: impl Into<String>) -> Self {
        Self::new(BlockKind::Image {
            asset: asset.into(),
            alt: None,
        })
    }

    pub fn list(items: Vec<BlockDef>) -> Self {
        Self::new(BlockKind::List { ordered: false }).with_children(items)
    }

    pub fn list_item(text: impl Into<String>) -> Self {
        Self::new(BlockKind::ListItem { text: text.into() })
    }

    pub fn quote(quote: impl Into<String>, cite: Option<&str>) -> Self {
        Self::new(BlockKind::BlockQuote {
            quote: quote.into(),
            cite: cite.map(str::to_string),
        })
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self::new(BlockKind::Link {
            text: text.into(),
            href: href.into(),
        })
    }

    pub fn revealed(mut self) -> Self {
        self.reveal = true;
        self
    }

    pub fn colored(mut self, role: impl Into<String>) -> Self {
        self.color = Some(role.into());
        self
    }

    pub fn with_children(mut self, children: Vec<BlockDef>) -> Self {
        self.children = children;
        self
    }
}

/// Declarative form of a slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDef {
    #[serde(default)]
    pub title: Option<String>,
    /// Background colour role.
    #[serde(default)]
    pub bg: Option<String>,
    /// Foreground colour role.
    #[serde(default)]
    pub fg: Option<String>,
    #[serde(default)]
    pub transition: Option<TransitionSpec>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

impl SlideDef {
    pub fn with_blocks(blocks: Vec<BlockDef>) -> Self {
        Self {
            blocks,
            ..Self::default()
        }
    }
}

/// Arena node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub kind: BlockKind,
    pub revealable: bool,
    pub color: Option<String>,
    pub parent: Option<BlockId>,
    pub children: Vec<BlockId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideStyle {
    pub bg: Option<String>,
    pub fg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub title: Option<String>,
    pub style: SlideStyle,
    pub transition: Option<TransitionSpec>,
    /// Presenter-only text.
    pub notes: Option<String>,
    roots: Vec<BlockId>,
    reveal_set: Vec<BlockId>,
}

impl Slide {
    /// Top-level blocks in declaration order.
    pub fn roots(&self) -> &[BlockId] {
        &self.roots
    }

    /// Revealable blocks in declaration (pre-order) order.
    pub fn reveal_set(&self) -> &[BlockId] {
        &self.reveal_set
    }
}

/// Ordered, non-empty, immutable slide deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    title: Option<String>,
    transition: Option<TransitionSpec>,
    slides: Vec<Slide>,
    blocks: Vec<ContentBlock>,
}

impl Deck {
    pub fn new(
        title: Option<String>,
        transition: Option<TransitionSpec>,
        slides: Vec<SlideDef>,
    ) -> Result<Self, DeckError> {
        if slides.is_empty() {
            return Err(DeckError::Empty);
        }

        let mut blocks = Vec::new();
        let mut built = Vec::with_capacity(slides.len());
        for (index, def) in slides.into_iter().enumerate() {
            let mut roots = Vec::with_capacity(def.blocks.len());
            let mut reveal_set = Vec::new();
            for block in def.blocks {
                roots.push(push_block(&mut blocks, block, None, index, &mut reveal_set)?);
            }
            built.push(Slide {
                title: def.title,
                style: SlideStyle {
                    bg: def.bg,
                    fg: def.fg,
                },
                transition: def.transition,
                notes: def.notes,
                roots,
                reveal_set,
            });
        }

        Ok(Self {
            title,
            transition,
            slides: built,
            blocks,
        })
    }

    /// Untitled deck with no deck-level transition.
    pub fn from_slides(slides: Vec<SlideDef>) -> Result<Self, DeckError> {
        Self::new(None, None, slides)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn transition(&self) -> Option<&TransitionSpec> {
        self.transition.as_ref()
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn block(&self, id: BlockId) -> &ContentBlock {
        &self.blocks[id.0]
    }

    /// Every colour role referenced by slides or blocks.
    pub fn color_roles(&self) -> BTreeSet<&str> {
        let slide_roles = self
            .slides
            .iter()
            .flat_map(|s| [s.style.bg.as_deref(), s.style.fg.as_deref()])
            .flatten();
        let block_roles = self.blocks.iter().filter_map(|b| b.color.as_deref());
        slide_roles.chain(block_roles).collect()
    }

    /// Every asset id referenced by a block, with the slide that first uses it.
    pub fn asset_refs(&self) -> Vec<(usize, &str)> {
        let mut seen = BTreeSet::new();
        let mut refs = Vec::new();
        for (index, slide) in self.slides.iter().enumerate() {
            let mut stack: Vec<BlockId> = slide.roots.iter().rev().copied().collect();
            while let Some(id) = stack.pop() {
                let block = self.block(id);
                if let Some(asset) = block.kind.asset() {
                    if seen.insert(asset) {
                        refs.push((index, asset));
                    }
                }
                stack.extend(block.children.iter().rev().copied());
            }
        }
        refs
    }
}

fn push_block(
    blocks: &mut Vec<ContentBlock>,
    def: BlockDef,
    parent: Option<BlockId>,
    slide: usize,
    reveal_set: &mut Vec<BlockId>,
) -> Result<BlockId, DeckError> {
    if !def.children.is_empty() && !def.kind.accepts_children() {
        return Err(DeckError::InvalidBlock {
            slide,
            reason: format!("'{}' blocks cannot contain other blocks", def.kind.name()),
        });
    }
    if let BlockKind::CodePane {
        source,
        source_asset,
        ..
    } = &def.kind
    {
        if source.is_some() == source_asset.is_some() {
            return Err(DeckError::InvalidBlock {
                slide,
                reason: "code_pane needs exactly one of 'source' or 'source_asset'".to_string(),
            });
        }
    }

    let id = BlockId(blocks.len());
    blocks.push(ContentBlock {
        kind: def.kind,
        revealable: def.reveal,
        color: def.color,
        parent,
        children: Vec::new(),
    });
    if def.reveal {
        reveal_set.push(id);
    }

    let mut children = Vec::with_capacity(def.children.len());
    for child in def.children {
        children.push(push_block(blocks, child, Some(id), slide, reveal_set)?);
    }
    blocks[id.0].children = children;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_deck_is_rejected() {
        assert!(matches!(Deck::from_slides(vec![]), Err(DeckError::Empty)));
    }

    #[test]
    fn reveal_set_follows_preorder() {
        let deck = Deck::from_slides(vec![SlideDef::with_blocks(vec![
            BlockDef::text("intro").revealed(),
            BlockDef::list(vec![
                BlockDef::list_item("a").revealed(),
                BlockDef::list_item("b"),
                BlockDef::list_item("c").revealed(),
            ]),
            BlockDef::text("outro").revealed(),
        ])])
        .unwrap();

        let slide = deck.slide(0).unwrap();
        let texts: Vec<_> = slide
            .reveal_set()
            .iter()
            .map(|id| match &deck.block(*id).kind {
                BlockKind::Text { text } | BlockKind::ListItem { text } => text.as_str(),
                other => panic!("unexpected block {other:?}"),
            })
            .collect();
        assert_eq!(texts, vec!["intro", "a", "c", "outro"]);
    }

    #[test]
    fn children_on_leaf_blocks_are_rejected() {
        let result = Deck::from_slides(vec![SlideDef::with_blocks(vec![
            BlockDef::text("leaf").with_children(vec![BlockDef::text("nope")]),
        ])]);
        assert!(matches!(result, Err(DeckError::InvalidBlock { slide: 0, .. })));
    }

    #[test]
    fn code_pane_needs_one_source() {
        let result = Deck::from_slides(vec![SlideDef::with_blocks(vec![BlockDef::new(
            BlockKind::CodePane {
                lang: None,
                source: None,
                source_asset: None,
            },
        )])]);
        assert!(matches!(result, Err(DeckError::InvalidBlock { .. })));
    }

    #[test]
    fn collects_roles_and_assets() {
        let deck = Deck::from_slides(vec![
            SlideDef {
                bg: Some("js".to_string()),
                blocks: vec![BlockDef::image("logo"), BlockDef::text("x").colored("quartenary")],
                ..SlideDef::default()
            },
            SlideDef::with_blocks(vec![BlockDef::image("logo"), BlockDef::code_asset("elm", "maybe")]),
        ])
        .unwrap();

        let roles: Vec<_> = deck.color_roles().into_iter().collect();
        assert_eq!(roles, vec!["js", "quartenary"]);
        assert_eq!(deck.asset_refs(), vec![(0, "logo"), (1, "maybe")]);
    }
}
