//! Block taxonomy consumed by the cascade.
//!
//! Blocks arrive as JSON objects tagged by `type`. The cascade itself only
//! ever reads the three common fields exposed through [`CascadeTarget`].

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::error::StyleError;
use crate::style::{BlockStyle, Style};

/// Block discriminant, as written in the `type` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Appeal,
    Audio,
    Blockquote,
    Checklist,
    ChecklistItem,
    Collapse,
    Excerpt,
    ExcerptItem,
    Heading,
    Hr,
    Image,
    List,
    ListItem,
    MultipleChoice,
    MultipleChoiceItem,
    Paragraph,
    Poll,
    PollItem,
    Question,
    Reference,
    Story,
    StorySlide,
    Video,
    #[serde(other)]
    Unknown,
}

/// Read-only view of the fields the cascade consults.
pub trait CascadeTarget {
    /// Block discriminant used for per-type lookups.
    fn block_type(&self) -> BlockType;

    /// Instance-level style override.
    fn instance_style(&self) -> Option<&BlockStyle>;

    /// Whether the block sits inside another container block.
    fn is_nested(&self) -> bool;
}

/// Borrowed cascade target for callers without a full [`AnyBlock`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockRef<'a> {
    pub block_type: BlockType,
    pub style: Option<&'a BlockStyle>,
    pub nested: bool,
}

impl<'a> BlockRef<'a> {
    /// Top-level block of `block_type` without an instance style.
    pub fn new(block_type: BlockType) -> Self {
        Self {
            block_type,
            style: None,
            nested: false,
        }
    }

    /// Attach an instance style.
    pub fn with_style(mut self, style: &'a BlockStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Mark as nested.
    pub fn nested(mut self) -> Self {
        self.nested = true;
        self
    }
}

impl CascadeTarget for BlockRef<'_> {
    fn block_type(&self) -> BlockType {
        self.block_type
    }

    fn instance_style(&self) -> Option<&BlockStyle> {
        self.style
    }

    fn is_nested(&self) -> bool {
        self.nested
    }
}

/// A block of any variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnyBlock {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<BlockStyle>,
    #[serde(default)]
    pub nested: bool,
    #[serde(flatten)]
    pub kind: BlockKind,
}

/// Variant payloads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum BlockKind {
    Appeal {
        markdown: String,
    },
    Audio {
        src: String,
        #[serde(default)]
        caption: Option<String>,
    },
    Blockquote {
        #[serde(default)]
        caption: Option<String>,
        #[serde(default)]
        items: Vec<AnyBlock>,
    },
    Checklist {
        #[serde(default)]
        items: Vec<AnyBlock>,
    },
    ChecklistItem {
        markdown: String,
    },
    Collapse {
        caption: String,
        #[serde(default)]
        items: Vec<AnyBlock>,
    },
    Excerpt {
        #[serde(default)]
        options: Vec<String>,
        #[serde(default)]
        items: Vec<AnyBlock>,
    },
    ExcerptItem {
        option: String,
        #[serde(default)]
        items: Vec<AnyBlock>,
    },
    Heading {
        #[serde(default = "default_heading_depth")]
        depth: u8,
        markdown: String,
    },
    Hr,
    Image {
        src: String,
        #[serde(default)]
        caption: Option<String>,
    },
    List {
        #[serde(default)]
        ordered: bool,
        #[serde(default)]
        items: Vec<AnyBlock>,
    },
    ListItem {
        markdown: String,
    },
    MultipleChoice {
        #[serde(default)]
        answer: Option<usize>,
        #[serde(default)]
        items: Vec<AnyBlock>,
    },
    MultipleChoiceItem {
        markdown: String,
    },
    Paragraph {
        markdown: String,
    },
    Poll {
        caption: String,
        #[serde(default)]
        items: Vec<AnyBlock>,
    },
    PollItem {
        markdown: String,
    },
    Question {
        markdown: String,
    },
    Reference {
        target: String,
        title: String,
    },
    Story {
        #[serde(default)]
        items: Vec<AnyBlock>,
    },
    StorySlide {
        markdown: String,
        #[serde(default)]
        image: Option<String>,
    },
    Video {
        src: String,
        #[serde(default)]
        caption: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

fn default_heading_depth() -> u8 {
    1
}

impl AnyBlock {
    /// Top-level block with no id or instance style.
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: String::new(),
            style: None,
            nested: false,
            kind,
        }
    }

    /// Attach an instance style.
    pub fn with_style(mut self, style: BlockStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Discriminant of this block.
    pub fn block_type(&self) -> BlockType {
        match &self.kind {
            BlockKind::Appeal { .. } => BlockType::Appeal,
            BlockKind::Audio { .. } => BlockType::Audio,
            BlockKind::Blockquote { .. } => BlockType::Blockquote,
            BlockKind::Checklist { .. } => BlockType::Checklist,
            BlockKind::ChecklistItem { .. } => BlockType::ChecklistItem,
            BlockKind::Collapse { .. } => BlockType::Collapse,
            BlockKind::Excerpt { .. } => BlockType::Excerpt,
            BlockKind::ExcerptItem { .. } => BlockType::ExcerptItem,
            BlockKind::Heading { .. } => BlockType::Heading,
            BlockKind::Hr => BlockType::Hr,
            BlockKind::Image { .. } => BlockType::Image,
            BlockKind::List { .. } => BlockType::List,
            BlockKind::ListItem { .. } => BlockType::ListItem,
            BlockKind::MultipleChoice { .. } => BlockType::MultipleChoice,
            BlockKind::MultipleChoiceItem { .. } => BlockType::MultipleChoiceItem,
            BlockKind::Paragraph { .. } => BlockType::Paragraph,
            BlockKind::Poll { .. } => BlockType::Poll,
            BlockKind::PollItem { .. } => BlockType::PollItem,
            BlockKind::Question { .. } => BlockType::Question,
            BlockKind::Reference { .. } => BlockType::Reference,
            BlockKind::Story { .. } => BlockType::Story,
            BlockKind::StorySlide { .. } => BlockType::StorySlide,
            BlockKind::Video { .. } => BlockType::Video,
            BlockKind::Unknown => BlockType::Unknown,
        }
    }

    /// Markdown body for text-bearing blocks.
    pub fn markdown(&self) -> Option<&str> {
        match &self.kind {
            BlockKind::Appeal { markdown }
            | BlockKind::ChecklistItem { markdown }
            | BlockKind::Heading { markdown, .. }
            | BlockKind::ListItem { markdown }
            | BlockKind::MultipleChoiceItem { markdown }
            | BlockKind::Paragraph { markdown }
            | BlockKind::PollItem { markdown }
            | BlockKind::Question { markdown }
            | BlockKind::StorySlide { markdown, .. } => Some(markdown.as_str()),
            _ => None,
        }
    }

    /// Child blocks of container variants.
    pub fn children(&self) -> &[AnyBlock] {
        match &self.kind {
            BlockKind::Blockquote { items, .. }
            | BlockKind::Checklist { items }
            | BlockKind::Collapse { items, .. }
            | BlockKind::Excerpt { items, .. }
            | BlockKind::ExcerptItem { items, .. }
            | BlockKind::List { items, .. }
            | BlockKind::MultipleChoice { items, .. }
            | BlockKind::Poll { items, .. }
            | BlockKind::Story { items } => items.as_slice(),
            _ => &[],
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<AnyBlock>> {
        match &mut self.kind {
            BlockKind::Blockquote { items, .. }
            | BlockKind::Checklist { items }
            | BlockKind::Collapse { items, .. }
            | BlockKind::Excerpt { items, .. }
            | BlockKind::ExcerptItem { items, .. }
            | BlockKind::List { items, .. }
            | BlockKind::MultipleChoice { items, .. }
            | BlockKind::Poll { items, .. }
            | BlockKind::Story { items } => Some(items),
            _ => None,
        }
    }

    /// Flag every descendant as nested. The block itself keeps its flag.
    pub fn mark_nested(&mut self) {
        if let Some(items) = self.children_mut() {
            for child in items.iter_mut() {
                child.nested = true;
                child.mark_nested();
            }
        }
    }
}

impl CascadeTarget for AnyBlock {
    fn block_type(&self) -> BlockType {
        AnyBlock::block_type(self)
    }

    fn instance_style(&self) -> Option<&BlockStyle> {
        self.style.as_ref()
    }

    fn is_nested(&self) -> bool {
        self.nested
    }
}

/// A lesson segment: ordered blocks plus its style tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub blocks: Vec<AnyBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl Segment {
    /// Decode a segment and mark container children as nested.
    pub fn from_json_str(json: &str) -> Result<Self, StyleError> {
        let mut segment: Self =
            serde_json::from_str(json).map_err(|e| StyleError::decode("segment", &e))?;
        for block in &mut segment.blocks {
            block.mark_nested();
        }
        Ok(segment)
    }
}
