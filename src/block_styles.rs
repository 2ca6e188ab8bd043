//! Template-free resolution against a document's block defaults.
//!
//! [`BlockStyler`] walks the same layers as [`Styler`](crate::Styler) with
//! `blocks.inline.all` as the base, but has no enabled gates and no theme
//! gate. It returns document values (or the caller's default) and leaves
//! theme policy to the caller.

use crate::block::CascadeTarget;
use crate::cascade::LayerChain;
use crate::color::Color;
use crate::style::{BlockStyle, BlocksStyle, BoxPart, PaddingSide, PaddingStyle, TextAlign, TextSize};

/// Reduced cascade over `blocks.inline` / `blocks.nested`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockStyler<'a> {
    blocks: Option<&'a BlocksStyle>,
    neutral: Option<Color>,
}

impl<'a> BlockStyler<'a> {
    pub fn new(blocks: Option<&'a BlocksStyle>) -> Self {
        Self {
            blocks,
            neutral: None,
        }
    }

    /// Color returned for malformed hex strings. Defaults to [`Color::NEUTRAL`].
    pub fn with_neutral_color(mut self, color: Color) -> Self {
        self.neutral = Some(color);
        self
    }

    /// Layers for `block`, lowest precedence first.
    pub fn layers<'r>(&'r self, block: &'r dyn CascadeTarget) -> LayerChain<'r> {
        let base = self
            .blocks
            .and_then(|blocks| blocks.inline.as_ref())
            .and_then(|inline| inline.all.as_ref());
        LayerChain::collect(base, self.blocks, Some(block))
    }

    pub fn alignment(&self, block: &dyn CascadeTarget, default: TextAlign) -> TextAlign {
        self.layers(block)
            .resolve(|layer| layer.text()?.align())
            .unwrap_or(default)
    }

    pub fn typeface<'r>(&'r self, block: &'r dyn CascadeTarget) -> Option<&'r str> {
        self.layers(block).resolve(|layer| layer.text()?.typeface())
    }

    pub fn text_size(&self, block: &dyn CascadeTarget, default: TextSize) -> TextSize {
        self.layers(block)
            .resolve(|layer| layer.text()?.size())
            .unwrap_or(default)
    }

    /// Whether any layer rounds `part`, matching [`Styler::corner_radius`](crate::Styler::corner_radius).
    pub fn rounded(&self, block: &dyn CascadeTarget, part: BoxPart) -> bool {
        self.layers(block)
            .iter()
            .any(|layer| layer.part(part).and_then(|b| b.rounded()) == Some(true))
    }

    /// Document text color, if any layer sets one.
    pub fn text_color(&self, block: &dyn CascadeTarget) -> Option<Color> {
        self.layers(block)
            .resolve(|layer| layer.text()?.color())
            .map(|raw| self.parse(raw))
    }

    /// Document background color of `part`, if any layer sets one.
    pub fn background_color(&self, block: &dyn CascadeTarget, part: BoxPart) -> Option<Color> {
        self.layers(block)
            .resolve(|layer| layer.part(part)?.background_color())
            .map(|raw| self.parse(raw))
    }

    /// Padding of `part`, each side resolved on its own. Unset sides stay `None`.
    pub fn padding(&self, block: &dyn CascadeTarget, part: BoxPart) -> PaddingStyle {
        let layers = self.layers(block);
        let side = |side: PaddingSide| layers.resolve(|layer| layer.part(part)?.padding(side));
        PaddingStyle {
            top: side(PaddingSide::Top),
            bottom: side(PaddingSide::Bottom),
            start: side(PaddingSide::Leading),
            end: side(PaddingSide::Trailing),
        }
    }

    /// Instance-free view of the per-type layers, for callers styling a type
    /// rather than a block.
    pub fn type_style(&self, block: &dyn CascadeTarget) -> Option<&'a BlockStyle> {
        self.blocks?.inline.as_ref()?.for_type(block.block_type())
    }

    fn parse(&self, raw: &str) -> Color {
        Color::from_hex_or(raw, self.neutral.unwrap_or(Color::NEUTRAL))
    }
}
