//! Layered style resolution.
//!
//! Every attribute resolves through the same ordered chain of style layers,
//! lowest precedence first:
//!
//! 1. the base layer (the template's tree location, or a caller-supplied
//!    location or filter),
//! 2. the inline per-type entry matching the block type,
//! 3. for nested blocks, `blocks.nested.all` then the nested per-type entry,
//! 4. the block's own instance style.
//!
//! A layer that exists but leaves an attribute unset is skipped for that
//! attribute. The last layer that sets it wins; when none does, the template
//! default applies. Resolution never fails.

use core::fmt;

use smallvec::SmallVec;

use crate::block::CascadeTarget;
use crate::color::{Color, ColorValue};
use crate::options::EngineOptions;
use crate::style::{BlockStyle, BlocksStyle, BoxPart, PaddingSide, Style, TextOffset};
use crate::template::{EdgeInsets, HorizontalAlignment, StyleLocation, StyleTemplate};
use crate::theme::ThemeSnapshot;

/// Caller-supplied base-layer selector.
pub type LayerFilter<'q> = &'q dyn Fn(&Style) -> Option<&BlockStyle>;

/// Ordered style layers for one block, lowest precedence first.
#[derive(Clone, Debug, Default)]
pub struct LayerChain<'r> {
    layers: SmallVec<[&'r BlockStyle; 5]>,
}

impl<'r> LayerChain<'r> {
    /// Collect the layers for `target` on top of `base`.
    pub fn collect(
        base: Option<&'r BlockStyle>,
        blocks: Option<&'r BlocksStyle>,
        target: Option<&'r dyn CascadeTarget>,
    ) -> Self {
        let mut layers = SmallVec::new();
        layers.extend(base);
        if let Some(target) = target {
            let block_type = target.block_type();
            let inline = blocks.and_then(|b| b.inline.as_ref());
            layers.extend(inline.and_then(|d| d.for_type(block_type)));
            if target.is_nested() {
                let nested = blocks.and_then(|b| b.nested.as_ref());
                layers.extend(nested.and_then(|d| d.all.as_ref()));
                layers.extend(nested.and_then(|d| d.for_type(block_type)));
            }
            layers.extend(target.instance_style());
        }
        Self { layers }
    }

    /// Highest-precedence value `pick` finds.
    pub fn resolve<T>(&self, mut pick: impl FnMut(&'r BlockStyle) -> Option<T>) -> Option<T> {
        self.layers.iter().rev().find_map(|layer| pick(*layer))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers, lowest precedence first.
    pub fn iter(&self) -> impl Iterator<Item = &'r BlockStyle> + '_ {
        self.layers.iter().copied()
    }
}

/// Where a query reads its base layer.
#[derive(Clone, Copy, Default)]
pub enum BaseLayer<'q> {
    /// The template's own location.
    #[default]
    Template,
    /// An explicit tree location.
    Location(StyleLocation),
    /// A caller-supplied selector.
    Filter(LayerFilter<'q>),
}

impl fmt::Debug for BaseLayer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template => f.write_str("Template"),
            Self::Location(location) => f.debug_tuple("Location").field(location).finish(),
            Self::Filter(_) => f.write_str("Filter(..)"),
        }
    }
}

/// What to resolve against: an optional block plus per-call overrides.
#[derive(Clone, Copy, Default)]
pub struct Query<'q> {
    block: Option<&'q dyn CascadeTarget>,
    base: BaseLayer<'q>,
    default_color: Option<ColorValue>,
    part: Option<BoxPart>,
}

impl fmt::Debug for Query<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("block", &self.block.map(|b| b.block_type()))
            .field("base", &self.base)
            .field("default_color", &self.default_color)
            .field("part", &self.part)
            .finish()
    }
}

impl<'q> Query<'q> {
    /// Template defaults and base layer only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve for `block`.
    pub fn block(block: &'q dyn CascadeTarget) -> Self {
        Self {
            block: Some(block),
            ..Self::default()
        }
    }

    /// Read the base layer from `location` instead of the template's.
    pub fn at(mut self, location: StyleLocation) -> Self {
        self.base = BaseLayer::Location(location);
        self
    }

    /// Select the base layer with `filter`.
    pub fn filtered(mut self, filter: LayerFilter<'q>) -> Self {
        self.base = BaseLayer::Filter(filter);
        self
    }

    /// Replace the template's text color default.
    pub fn with_default_color(mut self, color: ColorValue) -> Self {
        self.default_color = Some(color);
        self
    }

    /// Read box attributes from `part` instead of the template's box.
    pub fn on(mut self, part: BoxPart) -> Self {
        self.part = Some(part);
        self
    }

    pub fn target(&self) -> Option<&'q dyn CascadeTarget> {
        self.block
    }
}

/// Resolves concrete style values for one template under one theme snapshot.
#[derive(Clone, Copy, Debug)]
pub struct Styler<'a> {
    style: Option<&'a Style>,
    template: StyleTemplate,
    theme: ThemeSnapshot,
    options: EngineOptions,
}

impl<'a> Styler<'a> {
    pub fn new(style: Option<&'a Style>, template: StyleTemplate, theme: ThemeSnapshot) -> Self {
        Self {
            style,
            template,
            theme,
            options: EngineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn style(&self) -> Option<&'a Style> {
        self.style
    }

    pub fn template(&self) -> &StyleTemplate {
        &self.template
    }

    pub fn theme(&self) -> &ThemeSnapshot {
        &self.theme
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Layer chain for `query`.
    pub fn layers<'r>(&'r self, query: &Query<'r>) -> LayerChain<'r> {
        let base = self.style.and_then(|style| match query.base {
            BaseLayer::Template => self.template.location.lookup(style),
            BaseLayer::Location(location) => location.lookup(style),
            BaseLayer::Filter(filter) => filter(style),
        });
        let blocks = self.style.and_then(|style| style.blocks.as_ref());
        LayerChain::collect(base, blocks, query.block)
    }

    /// Font size in points.
    pub fn text_size(&self, query: &Query<'_>) -> f32 {
        let reader = self.theme.size;
        if !self.template.text_size.enabled {
            return self.template.size_points(reader, None);
        }
        let requested = self.layers(query).resolve(|layer| layer.text()?.size());
        self.template.size_points(reader, requested)
    }

    /// Text color after the theme gate.
    pub fn text_color(&self, query: &Query<'_>) -> Color {
        let default = query
            .default_color
            .unwrap_or(self.template.text_color.default);
        if !self.template.text_color.enabled {
            return self.theme.resolve(default);
        }
        if !self.document_text_colors_allowed() {
            return match default {
                ColorValue::Theme(_) => self.theme.resolve(default),
                ColorValue::Fixed(_) => self.theme.text_color(),
            };
        }
        match self.layers(query).resolve(|layer| layer.text()?.color()) {
            Some(raw) => Color::from_hex_or(raw, self.options.neutral_color),
            None => self.theme.resolve(default),
        }
    }

    /// True when document text colors pass the theme gate.
    pub fn document_text_colors_allowed(&self) -> bool {
        !self.template.text_color_theme_override || self.theme.is_light()
    }

    /// Installed font name.
    pub fn text_typeface<'r>(&'r self, query: &Query<'r>) -> &'r str {
        let default = self.template.text_typeface.default.font_name(&self.theme);
        if !self.template.text_typeface.enabled {
            return default;
        }
        self.layers(query)
            .resolve(|layer| layer.text()?.typeface())
            .unwrap_or(default)
    }

    /// Document-named typeface, if any layer sets one.
    pub fn requested_typeface<'r>(&'r self, query: &Query<'r>) -> Option<&'r str> {
        if !self.template.text_typeface.enabled {
            return None;
        }
        self.layers(query).resolve(|layer| layer.text()?.typeface())
    }

    pub fn text_alignment(&self, query: &Query<'_>) -> HorizontalAlignment {
        let align = if self.template.text_alignment.enabled {
            self.layers(query)
                .resolve(|layer| layer.text()?.align())
                .unwrap_or(self.template.text_alignment.default)
        } else {
            self.template.text_alignment.default
        };
        self.template.alignment_of(align)
    }

    /// Abstract offset, if any.
    pub fn text_offset_kind(&self, query: &Query<'_>) -> Option<TextOffset> {
        if !self.template.text_offset.enabled {
            return self.template.text_offset.default;
        }
        self.layers(query)
            .resolve(|layer| layer.text()?.offset())
            .or(self.template.text_offset.default)
    }

    /// Baseline offset in points.
    pub fn text_offset(&self, query: &Query<'_>) -> f32 {
        match self.text_offset_kind(query) {
            Some(offset) => self.template.offset_of(offset),
            None => self.template.offset_table.fallback,
        }
    }

    /// Padding, each side resolved on its own.
    pub fn padding(&self, query: &Query<'_>) -> EdgeInsets {
        let default = self.template.padding.default;
        if !self.template.padding.enabled {
            return default;
        }
        let part = self.part(query);
        let layers = self.layers(query);
        let side = |side: PaddingSide, fallback: f32| {
            layers
                .resolve(|layer| layer.part(part)?.padding(side))
                .map_or(fallback, |spacing| self.template.padding_of(spacing))
        };
        EdgeInsets {
            top: side(PaddingSide::Top, default.top),
            leading: side(PaddingSide::Leading, default.leading),
            bottom: side(PaddingSide::Bottom, default.bottom),
            trailing: side(PaddingSide::Trailing, default.trailing),
        }
    }

    /// Background color after the dimming gate.
    pub fn background_color(&self, query: &Query<'_>) -> Color {
        let default = self.theme.resolve(self.template.background_color.default);
        if !self.template.background_color.enabled {
            return default;
        }
        let part = self.part(query);
        let Some(raw) = self
            .layers(query)
            .resolve(|layer| layer.part(part)?.background_color())
        else {
            return default;
        };
        let color = Color::from_hex_or(raw, self.options.neutral_color);
        if color == default || !self.template.background_color_theme_override || self.theme.is_light()
        {
            return color;
        }
        log::debug!(
            "Dimming document background {} under {:?} theme",
            color,
            self.theme.effective_theme()
        );
        self.theme
            .background_color()
            .with_opacity(self.options.background_dim_opacity)
    }

    /// Background image reference.
    pub fn background_image<'r>(&'r self, query: &Query<'r>) -> Option<&'r str> {
        if !self.template.background_image.enabled {
            return self.template.background_image.default;
        }
        let part = self.part(query);
        self.layers(query)
            .resolve(|layer| layer.part(part)?.background_image())
            .or(self.template.background_image.default)
    }

    /// Corner radius in points.
    pub fn corner_radius(&self, query: &Query<'_>) -> f32 {
        let default = self.template.rounded_corners.default;
        if !self.template.rounded_corners.enabled {
            return default;
        }
        let part = self.part(query);
        let rounded = self
            .layers(query)
            .iter()
            .any(|layer| layer.part(part).and_then(|b| b.rounded()) == Some(true));
        if rounded {
            self.template.rounded_radius
        } else {
            default
        }
    }

    pub fn text_links_enabled(&self) -> bool {
        self.template.text_links_enabled
    }

    fn part(&self, query: &Query<'_>) -> BoxPart {
        query.part.unwrap_or(self.template.box_part)
    }
}
