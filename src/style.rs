//! Document-supplied style tree.
//!
//! Every node is optional. A node that exists but leaves an attribute unset
//! behaves exactly like a missing node; the accessors on [`TextStyle`] and
//! [`BoxStyle`] fold empty strings and unknown enum values into `None` so the
//! cascade never has to special-case them.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::block::BlockType;
use crate::error::StyleError;

/// Root of a document style tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    /// Resource-level (cover, intro) styles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<ScopeStyle>,
    /// Segment-level (lesson day header) styles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<ScopeStyle>,
    /// Block styles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<BlocksStyle>,
}

impl Style {
    /// Decode a style tree from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, StyleError> {
        serde_json::from_str(json).map_err(|e| StyleError::decode("style", &e))
    }

    /// Decode a style tree from JSON bytes.
    pub fn from_json_slice(json: &[u8]) -> Result<Self, StyleError> {
        serde_json::from_slice(json).map_err(|e| StyleError::decode("style", &e))
    }

    /// `blocks.inline`, if present.
    pub fn inline(&self) -> Option<&DefaultBlockStyles> {
        self.blocks.as_ref()?.inline.as_ref()
    }

    /// `blocks.nested`, if present.
    pub fn nested(&self) -> Option<&DefaultBlockStyles> {
        self.blocks.as_ref()?.nested.as_ref()
    }
}

/// Title/subtitle/description/date styles for a resource or segment header.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScopeStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<BlockStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<BlockStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<BlockStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<BlockStyle>,
}

/// Inline and nested block defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlocksStyle {
    /// Applies to top-level blocks, and to nested ones before `nested`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<DefaultBlockStyles>,
    /// Applies only to blocks inside another container block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<DefaultBlockStyles>,
}

/// `all` style plus ordered per-type overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DefaultBlockStyles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<BlockStyle>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<BlockTypeStyle>,
}

impl DefaultBlockStyles {
    /// First per-type entry matching `block_type`. Unrecognised types never
    /// match, since distinct unknown type strings share one variant.
    pub fn for_type(&self, block_type: BlockType) -> Option<&BlockStyle> {
        if block_type == BlockType::Unknown {
            return None;
        }
        self.blocks
            .iter()
            .find(|entry| entry.block_type == block_type)
            .map(|entry| &entry.style)
    }
}

/// One per-type override entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTypeStyle {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default)]
    pub style: BlockStyle,
}

/// Style for one block: outer wrapper, inner block, and text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<BoxStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapper: Option<BoxStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextStyle>,
}

impl BlockStyle {
    /// Box style for the requested part.
    pub fn part(&self, part: BoxPart) -> Option<&BoxStyle> {
        match part {
            BoxPart::Block => self.block.as_ref(),
            BoxPart::Wrapper => self.wrapper.as_ref(),
        }
    }

    /// Text style, if any.
    pub fn text(&self) -> Option<&TextStyle> {
        self.text.as_ref()
    }
}

/// Which box of a block a layout attribute targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoxPart {
    /// Inner content box.
    Block,
    /// Outer container.
    Wrapper,
}

/// Layout attributes of a block or wrapper box.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoxStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<PaddingStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounded: Option<bool>,
}

impl BoxStyle {
    /// Background color, with empty strings treated as unset.
    pub fn background_color(&self) -> Option<&str> {
        non_empty(self.background_color.as_deref())
    }

    /// Background image URL, with empty strings treated as unset.
    pub fn background_image(&self) -> Option<&str> {
        non_empty(self.background_image.as_deref())
    }

    /// Padding for one side.
    pub fn padding(&self, side: PaddingSide) -> Option<SpacingSize> {
        self.padding.as_ref()?.side(side)
    }

    /// Rounded-corner flag.
    pub fn rounded(&self) -> Option<bool> {
        self.rounded
    }
}

/// Per-side spacing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaddingStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<SpacingSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<SpacingSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<SpacingSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<SpacingSize>,
}

impl PaddingStyle {
    /// Spacing for `side`; unknown values read as unset.
    pub fn side(&self, side: PaddingSide) -> Option<SpacingSize> {
        let value = match side {
            PaddingSide::Top => self.top,
            PaddingSide::Bottom => self.bottom,
            PaddingSide::Leading => self.start,
            PaddingSide::Trailing => self.end,
        };
        value.filter(|v| *v != SpacingSize::Unknown)
    }
}

/// Padding side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaddingSide {
    Top,
    Bottom,
    Leading,
    Trailing,
}

impl PaddingSide {
    /// All sides in `top, leading, bottom, trailing` order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Leading, Self::Bottom, Self::Trailing];
}

/// Text attributes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<TextSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typeface: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<TextOffset>,
}

impl TextStyle {
    /// Text color, with empty strings treated as unset.
    pub fn color(&self) -> Option<&str> {
        non_empty(self.color.as_deref())
    }

    /// Abstract text size.
    pub fn size(&self) -> Option<TextSize> {
        self.size.filter(|v| *v != TextSize::Unknown)
    }

    /// Typeface name, with empty strings treated as unset.
    pub fn typeface(&self) -> Option<&str> {
        non_empty(self.typeface.as_deref())
    }

    /// Alignment.
    pub fn align(&self) -> Option<TextAlign> {
        self.align.filter(|v| *v != TextAlign::Unknown)
    }

    /// Baseline offset.
    pub fn offset(&self) -> Option<TextOffset> {
        self.offset.filter(|v| *v != TextOffset::Unknown)
    }

    /// True when no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.color().is_none()
            && self.size().is_none()
            && self.typeface().is_none()
            && self.align().is_none()
            && self.offset().is_none()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Abstract spacing step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpacingSize {
    None,
    Xs,
    Sm,
    Base,
    Lg,
    Xl,
    #[serde(other)]
    Unknown,
}

/// Abstract text size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextSize {
    Xs,
    Sm,
    Base,
    Lg,
    Xl,
    #[serde(other)]
    Unknown,
}

/// Abstract text alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    Start,
    Center,
    End,
    #[serde(other)]
    Unknown,
}

/// Baseline offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextOffset {
    #[serde(alias = "superscript")]
    Sup,
    #[serde(alias = "subscript")]
    Sub,
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_nested_tree_and_finds_per_type_entry() {
        let style = Style::from_json_str(
            r##"{
              "blocks": {
                "inline": {
                  "all": {"text": {"color": "#111111"}},
                  "blocks": [
                    {"type": "heading", "style": {"text": {"color": "#ff0000"}}},
                    {"type": "heading", "style": {"text": {"color": "#00ff00"}}}
                  ]
                },
                "nested": {"all": {"wrapper": {"rounded": true}}}
              }
            }"##,
        )
        .expect("style should decode");
        let inline = style.inline().expect("inline present");
        let heading = inline.for_type(BlockType::Heading).expect("heading entry");
        assert_eq!(heading.text().and_then(TextStyle::color), Some("#ff0000"));
        assert!(inline.for_type(BlockType::Paragraph).is_none());
        let nested_all = style.nested().and_then(|n| n.all.as_ref()).expect("nested all");
        assert_eq!(
            nested_all.part(BoxPart::Wrapper).and_then(BoxStyle::rounded),
            Some(true)
        );
    }

    #[test]
    fn unknown_type_entries_never_match() {
        let inline: DefaultBlockStyles = serde_json::from_str(
            r##"{"blocks": [{"type": "callout", "style": {"text": {"color": "#ff0000"}}}]}"##,
        )
        .expect("block styles should decode");
        assert_eq!(inline.blocks[0].block_type, BlockType::Unknown);
        assert!(inline.for_type(BlockType::Unknown).is_none());
    }

    #[test]
    fn unknown_enum_values_read_as_unset() {
        let text: TextStyle =
            serde_json::from_str(r#"{"align": "justify", "size": "huge", "offset": "sup"}"#)
                .expect("text style should decode");
        assert_eq!(text.align, Some(TextAlign::Unknown));
        assert_eq!(text.align(), None);
        assert_eq!(text.size(), None);
        assert_eq!(text.offset(), Some(TextOffset::Sup));
    }

    #[test]
    fn empty_strings_read_as_unset() {
        let boxed = BoxStyle {
            background_color: Some(String::new()),
            background_image: Some("  ".into()),
            ..BoxStyle::default()
        };
        assert_eq!(boxed.background_color(), None);
        assert_eq!(boxed.background_image(), None);
        let text = TextStyle {
            color: Some(String::new()),
            ..TextStyle::default()
        };
        assert!(text.is_empty());
    }

    #[test]
    fn padding_maps_start_end_to_leading_trailing() {
        let padding: PaddingStyle =
            serde_json::from_str(r#"{"start": "sm", "end": "xl", "top": "bogus"}"#)
                .expect("padding should decode");
        assert_eq!(padding.side(PaddingSide::Leading), Some(SpacingSize::Sm));
        assert_eq!(padding.side(PaddingSide::Trailing), Some(SpacingSize::Xl));
        assert_eq!(padding.side(PaddingSide::Top), None);
        assert_eq!(padding.side(PaddingSide::Bottom), None);
    }

    #[test]
    fn malformed_json_reports_decode_error() {
        let err = Style::from_json_str("{\"blocks\": [}").expect_err("should fail");
        assert_eq!(err.code, "STYLE_DECODE_ERROR");
    }

    #[test]
    fn serialization_skips_unset_nodes() {
        let style = Style::default();
        assert_eq!(serde_json::to_string(&style).expect("serialize"), "{}");
    }
}
