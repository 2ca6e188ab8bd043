use lesson_style::{
    AnyBlock, BlockKind, BlockType, BoxPart, CascadeTarget, Color, EdgeInsets, HorizontalAlignment,
    Query, StyleTemplate, Styler, TemplateKind,
};
use serde::{Deserialize, Serialize};

use crate::annotate::{RunAnnotator, RunDefaults};
use crate::font::{FontResolver, ResolvedFont};
use crate::runs::{AnnotatedRun, TextRun};

/// Layout attributes of one box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxAppearance {
    pub padding: EdgeInsets,
    pub background_color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    pub corner_radius: f32,
}

impl BoxAppearance {
    fn resolve(styler: &Styler<'_>, query: &Query<'_>) -> Self {
        Self {
            padding: styler.padding(query),
            background_color: styler.background_color(query),
            background_image: styler.background_image(query).map(str::to_owned),
            corner_radius: styler.corner_radius(query),
        }
    }
}

/// Block-level text defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAppearance {
    pub font: ResolvedFont,
    pub color: Color,
    pub alignment: HorizontalAlignment,
    pub baseline_offset: f32,
    pub links_enabled: bool,
}

/// Everything a view needs to draw one block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockAppearance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_type: Option<BlockType>,
    pub wrapper: BoxAppearance,
    pub block: BoxAppearance,
    pub text: TextAppearance,
}

impl BlockAppearance {
    /// Resolve all attributes for `block` (or template defaults when `None`).
    pub fn resolve(
        styler: &Styler<'_>,
        fonts: &FontResolver,
        block: Option<&dyn CascadeTarget>,
    ) -> Self {
        let query = match block {
            Some(block) => Query::block(block),
            None => Query::new(),
        };
        let default_font = styler
            .template()
            .text_typeface
            .default
            .font_name(styler.theme());
        let font = fonts.resolve(
            styler.requested_typeface(&query),
            default_font,
            styler.text_size(&query),
        );
        Self {
            block_type: block.map(|b| b.block_type()),
            wrapper: BoxAppearance::resolve(styler, &query.on(BoxPart::Wrapper)),
            block: BoxAppearance::resolve(styler, &query.on(BoxPart::Block)),
            text: TextAppearance {
                font,
                color: styler.text_color(&query),
                alignment: styler.text_alignment(&query),
                baseline_offset: styler.text_offset(&query),
                links_enabled: styler.text_links_enabled(),
            },
        }
    }

    /// Starting point for run annotation.
    pub fn run_defaults(&self, link_color: Option<Color>) -> RunDefaults {
        RunDefaults {
            font: self.text.font.name.clone(),
            size: self.text.font.size,
            color: self.text.color,
            link_color,
        }
    }
}

/// A block's appearance plus its annotated runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedBlock {
    pub appearance: BlockAppearance,
    pub runs: Vec<AnnotatedRun>,
}

/// Resolve `block` and annotate its parsed runs. Links take the theme's
/// secondary text color unless `link_color` is given.
pub fn render_block_text(
    styler: &Styler<'_>,
    fonts: &FontResolver,
    block: &dyn CascadeTarget,
    runs: &[TextRun],
    link_color: Option<Color>,
) -> RenderedBlock {
    let appearance = BlockAppearance::resolve(styler, fonts, Some(block));
    let link_color = link_color.or(Some(styler.theme().secondary_text_color()));
    let annotator = RunAnnotator::new(styler, fonts, appearance.run_defaults(link_color));
    let runs = annotator.annotate_all(runs);
    RenderedBlock { appearance, runs }
}

/// Template kind used for a block's own text.
pub fn template_kind_for(block: &AnyBlock) -> TemplateKind {
    match &block.kind {
        BlockKind::Heading { depth, .. } => TemplateKind::Heading(*depth),
        BlockKind::Appeal { .. } => TemplateKind::Appeal,
        BlockKind::Blockquote { .. } => TemplateKind::Blockquote,
        BlockKind::Story { .. } | BlockKind::StorySlide { .. } => TemplateKind::Story,
        _ => TemplateKind::Body,
    }
}

/// Template for a block's own text.
pub fn template_for(block: &AnyBlock) -> StyleTemplate {
    StyleTemplate::for_kind(template_kind_for(block))
}
