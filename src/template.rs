//! Per-component style templates.
//!
//! A [`StyleTemplate`] carries, for every stylable attribute, an enabled flag
//! and a component default, plus the lookup tables that turn abstract style
//! values into concrete ones. Specialized templates are the base template
//! with a [`TemplatePatch`] applied; building one never reads the document
//! style tree.

use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorValue};
use crate::style::{BlockStyle, BoxPart, SpacingSize, Style, TextAlign, TextOffset, TextSize};
use crate::theme::{FaceVariant, ReaderSize, ThemeSnapshot};

/// Concrete horizontal alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HorizontalAlignment {
    #[default]
    Leading,
    Center,
    Trailing,
}

/// Per-side spacing in points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeInsets {
    pub top: f32,
    pub leading: f32,
    pub bottom: f32,
    pub trailing: f32,
}

impl EdgeInsets {
    pub const ZERO: Self = Self::uniform(0.0);

    /// Same value on every side.
    pub const fn uniform(value: f32) -> Self {
        Self {
            top: value,
            leading: value,
            bottom: value,
            trailing: value,
        }
    }
}

/// Enabled flag plus component default for one attribute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attr<T> {
    /// When false, resolution returns `default` without reading the style tree.
    pub enabled: bool,
    pub default: T,
}

impl<T> Attr<T> {
    pub const fn enabled(default: T) -> Self {
        Self {
            enabled: true,
            default,
        }
    }

    pub const fn disabled(default: T) -> Self {
        Self {
            enabled: false,
            default,
        }
    }
}

/// Component default typeface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypefaceDefault {
    /// A variant of the reader's chosen typeface.
    Reader(FaceVariant),
    /// A fixed installed font name.
    Named(&'static str),
}

impl TypefaceDefault {
    /// Installed font name under `theme`.
    pub fn font_name(self, theme: &ThemeSnapshot) -> &'static str {
        match self {
            Self::Reader(variant) => theme.typeface.font_name(variant),
            Self::Named(name) => name,
        }
    }
}

/// `(reader size, abstract size, points)`.
pub type AbstractSizeEntry = (ReaderSize, TextSize, f32);
/// `(reader size, heading depth, points)`.
pub type DepthSizeEntry = (ReaderSize, u8, f32);

/// Size mapping from abstract size to points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SizeTable {
    /// Keyed by reader size and abstract size.
    Abstract {
        entries: &'static [AbstractSizeEntry],
        fallback: f32,
    },
    /// Keyed by reader size and heading depth. Sizes set by the document go
    /// through [`BASE_SIZE_TABLE`] instead.
    Depth {
        depth: u8,
        entries: &'static [DepthSizeEntry],
        fallback: f32,
    },
    /// Ignores both keys.
    Fixed(f32),
}

impl SizeTable {
    /// Points for `requested` (document value) or `default` when unset.
    pub fn points(&self, reader: ReaderSize, requested: Option<TextSize>, default: TextSize) -> f32 {
        match *self {
            Self::Abstract { entries, fallback } => {
                abstract_points(entries, fallback, reader, requested.unwrap_or(default))
            }
            Self::Depth {
                depth,
                entries,
                fallback,
            } => match requested {
                Some(size) => BASE_SIZE_TABLE.points(reader, Some(size), default),
                None => entries
                    .iter()
                    .find(|(r, d, _)| *r == reader && *d == depth)
                    .map_or(fallback, |(_, _, points)| *points),
            },
            Self::Fixed(points) => points,
        }
    }
}

fn abstract_points(
    entries: &[AbstractSizeEntry],
    fallback: f32,
    reader: ReaderSize,
    size: TextSize,
) -> f32 {
    entries
        .iter()
        .find(|(r, s, _)| *r == reader && *s == size)
        .map_or(fallback, |(_, _, points)| *points)
}

/// Small enum-to-value table with a fallback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LookupTable<K: 'static, V: 'static> {
    pub entries: &'static [(K, V)],
    pub fallback: V,
}

impl<K: PartialEq + Copy, V: Copy> LookupTable<K, V> {
    /// Value for `key`, or the fallback on a miss.
    pub fn get(&self, key: K) -> V {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(self.fallback, |(_, v)| *v)
    }
}

/// Alignment table.
pub type AlignmentTable = LookupTable<TextAlign, HorizontalAlignment>;
/// Baseline offset table, in points.
pub type OffsetTable = LookupTable<TextOffset, f32>;
/// Spacing table, in points.
pub type SpacingTable = LookupTable<SpacingSize, f32>;

#[rustfmt::skip]
const BASE_SIZES: &[AbstractSizeEntry] = &[
    (ReaderSize::Tiny, TextSize::Xs, 12.0),   (ReaderSize::Tiny, TextSize::Sm, 13.0),
    (ReaderSize::Tiny, TextSize::Base, 15.0), (ReaderSize::Tiny, TextSize::Lg, 17.0),
    (ReaderSize::Tiny, TextSize::Xl, 20.0),
    (ReaderSize::Small, TextSize::Xs, 13.0),   (ReaderSize::Small, TextSize::Sm, 15.0),
    (ReaderSize::Small, TextSize::Base, 17.0), (ReaderSize::Small, TextSize::Lg, 19.0),
    (ReaderSize::Small, TextSize::Xl, 22.0),
    (ReaderSize::Medium, TextSize::Xs, 14.0),   (ReaderSize::Medium, TextSize::Sm, 16.0),
    (ReaderSize::Medium, TextSize::Base, 19.0), (ReaderSize::Medium, TextSize::Lg, 21.0),
    (ReaderSize::Medium, TextSize::Xl, 24.0),
    (ReaderSize::Large, TextSize::Xs, 16.0),   (ReaderSize::Large, TextSize::Sm, 18.0),
    (ReaderSize::Large, TextSize::Base, 21.0), (ReaderSize::Large, TextSize::Lg, 23.0),
    (ReaderSize::Large, TextSize::Xl, 27.0),
    (ReaderSize::Huge, TextSize::Xs, 18.0),   (ReaderSize::Huge, TextSize::Sm, 20.0),
    (ReaderSize::Huge, TextSize::Base, 24.0), (ReaderSize::Huge, TextSize::Lg, 26.0),
    (ReaderSize::Huge, TextSize::Xl, 30.0),
];

#[rustfmt::skip]
const HEADING_SIZES: &[DepthSizeEntry] = &[
    (ReaderSize::Tiny, 1, 24.0), (ReaderSize::Tiny, 2, 21.0), (ReaderSize::Tiny, 3, 19.0),
    (ReaderSize::Tiny, 4, 17.0), (ReaderSize::Tiny, 5, 16.0), (ReaderSize::Tiny, 6, 15.0),
    (ReaderSize::Small, 1, 26.0), (ReaderSize::Small, 2, 23.0), (ReaderSize::Small, 3, 21.0),
    (ReaderSize::Small, 4, 19.0), (ReaderSize::Small, 5, 18.0), (ReaderSize::Small, 6, 17.0),
    (ReaderSize::Medium, 1, 28.0), (ReaderSize::Medium, 2, 25.0), (ReaderSize::Medium, 3, 23.0),
    (ReaderSize::Medium, 4, 21.0), (ReaderSize::Medium, 5, 20.0), (ReaderSize::Medium, 6, 19.0),
    (ReaderSize::Large, 1, 31.0), (ReaderSize::Large, 2, 28.0), (ReaderSize::Large, 3, 25.0),
    (ReaderSize::Large, 4, 23.0), (ReaderSize::Large, 5, 22.0), (ReaderSize::Large, 6, 21.0),
    (ReaderSize::Huge, 1, 34.0), (ReaderSize::Huge, 2, 31.0), (ReaderSize::Huge, 3, 28.0),
    (ReaderSize::Huge, 4, 26.0), (ReaderSize::Huge, 5, 25.0), (ReaderSize::Huge, 6, 24.0),
];

/// Body text sizes; 19pt when a pairing is missing.
pub const BASE_SIZE_TABLE: SizeTable = SizeTable::Abstract {
    entries: BASE_SIZES,
    fallback: 19.0,
};

/// Heading fallback for depths outside 1..=6.
pub const HEADING_FALLBACK_POINTS: f32 = 21.0;

/// Story slides render at a constant size.
pub const STORY_POINTS: f32 = 28.0;

pub const ALIGNMENT_TABLE: AlignmentTable = LookupTable {
    entries: &[
        (TextAlign::Start, HorizontalAlignment::Leading),
        (TextAlign::Center, HorizontalAlignment::Center),
        (TextAlign::End, HorizontalAlignment::Trailing),
    ],
    fallback: HorizontalAlignment::Leading,
};

pub const OFFSET_TABLE: OffsetTable = LookupTable {
    entries: &[(TextOffset::Sup, 6.0), (TextOffset::Sub, -3.0)],
    fallback: 0.0,
};

pub const SPACING_TABLE: SpacingTable = LookupTable {
    entries: &[
        (SpacingSize::None, 0.0),
        (SpacingSize::Xs, 4.0),
        (SpacingSize::Sm, 8.0),
        (SpacingSize::Base, 16.0),
        (SpacingSize::Lg, 24.0),
        (SpacingSize::Xl, 32.0),
    ],
    fallback: 0.0,
};

/// Radius applied when a box resolves to rounded.
pub const ROUNDED_RADIUS: f32 = 6.0;

/// Where in the style tree a template reads its base layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleLocation {
    /// No base layer; only the template default and block layers apply.
    None,
    /// `blocks.inline.all`
    InlineAll,
    /// `blocks.nested.all`
    NestedAll,
    /// `resource.title`
    ResourceTitle,
    /// `resource.subtitle`
    ResourceSubtitle,
    /// `resource.description`
    ResourceDescription,
    /// `resource.date`
    ResourceDate,
    /// `segment.title`
    SegmentTitle,
    /// `segment.subtitle`
    SegmentSubtitle,
    /// `segment.description`
    SegmentDescription,
    /// `segment.date`
    SegmentDate,
}

impl StyleLocation {
    /// Block style at this location, if the tree has one.
    pub fn lookup(self, style: &Style) -> Option<&BlockStyle> {
        match self {
            Self::None => None,
            Self::InlineAll => style.inline()?.all.as_ref(),
            Self::NestedAll => style.nested()?.all.as_ref(),
            Self::ResourceTitle => style.resource.as_ref()?.title.as_ref(),
            Self::ResourceSubtitle => style.resource.as_ref()?.subtitle.as_ref(),
            Self::ResourceDescription => style.resource.as_ref()?.description.as_ref(),
            Self::ResourceDate => style.resource.as_ref()?.date.as_ref(),
            Self::SegmentTitle => style.segment.as_ref()?.title.as_ref(),
            Self::SegmentSubtitle => style.segment.as_ref()?.subtitle.as_ref(),
            Self::SegmentDescription => style.segment.as_ref()?.description.as_ref(),
            Self::SegmentDate => style.segment.as_ref()?.date.as_ref(),
        }
    }
}

/// UI component kinds with their own template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Body,
    Heading(u8),
    Story,
    Appeal,
    Blockquote,
    Caption,
    ResourceTitle,
    ResourceSubtitle,
    ResourceDescription,
    SegmentTitle,
    SegmentSubtitle,
    SegmentDate,
}

/// Resolution configuration for one component kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleTemplate {
    pub kind: TemplateKind,
    /// Base layer location in the style tree.
    pub location: StyleLocation,
    /// Box that padding/background/rounding read from unless a query says otherwise.
    pub box_part: BoxPart,
    pub text_size: Attr<TextSize>,
    pub size_table: SizeTable,
    pub text_color: Attr<ColorValue>,
    /// Document text colors only apply under a light theme.
    pub text_color_theme_override: bool,
    pub text_typeface: Attr<TypefaceDefault>,
    pub text_alignment: Attr<TextAlign>,
    pub alignment_table: AlignmentTable,
    pub text_offset: Attr<Option<TextOffset>>,
    pub offset_table: OffsetTable,
    /// Links get their own styling in run annotation.
    pub text_links_enabled: bool,
    pub padding: Attr<EdgeInsets>,
    pub spacing_table: SpacingTable,
    pub background_color: Attr<ColorValue>,
    /// Document backgrounds are dimmed under non-light themes.
    pub background_color_theme_override: bool,
    pub background_image: Attr<Option<&'static str>>,
    /// Default radius; `rounded_radius` applies when a layer sets `rounded`.
    pub rounded_corners: Attr<f32>,
    pub rounded_radius: f32,
}

impl Default for StyleTemplate {
    fn default() -> Self {
        Self::base()
    }
}

/// Fields a specialized template replaces on top of [`StyleTemplate::base`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TemplatePatch {
    pub location: Option<StyleLocation>,
    pub box_part: Option<BoxPart>,
    pub text_size: Option<Attr<TextSize>>,
    pub size_table: Option<SizeTable>,
    pub text_color: Option<Attr<ColorValue>>,
    pub text_color_theme_override: Option<bool>,
    pub text_typeface: Option<Attr<TypefaceDefault>>,
    pub text_alignment: Option<Attr<TextAlign>>,
    pub text_offset: Option<Attr<Option<TextOffset>>>,
    pub text_links_enabled: Option<bool>,
    pub padding: Option<Attr<EdgeInsets>>,
    pub background_color: Option<Attr<ColorValue>>,
    pub background_color_theme_override: Option<bool>,
    pub background_image: Option<Attr<Option<&'static str>>>,
    pub rounded_corners: Option<Attr<f32>>,
    pub rounded_radius: Option<f32>,
}

impl StyleTemplate {
    /// Body text template; every other template patches this one.
    pub const fn base() -> Self {
        Self {
            kind: TemplateKind::Body,
            location: StyleLocation::InlineAll,
            box_part: BoxPart::Block,
            text_size: Attr::enabled(TextSize::Base),
            size_table: BASE_SIZE_TABLE,
            text_color: Attr::enabled(ColorValue::TEXT),
            text_color_theme_override: true,
            text_typeface: Attr::enabled(TypefaceDefault::Reader(FaceVariant::Regular)),
            text_alignment: Attr::enabled(TextAlign::Start),
            alignment_table: ALIGNMENT_TABLE,
            text_offset: Attr::enabled(None),
            offset_table: OFFSET_TABLE,
            text_links_enabled: true,
            padding: Attr::enabled(EdgeInsets::ZERO),
            spacing_table: SPACING_TABLE,
            background_color: Attr::enabled(ColorValue::CLEAR),
            background_color_theme_override: true,
            background_image: Attr::enabled(None),
            rounded_corners: Attr::enabled(0.0),
            rounded_radius: ROUNDED_RADIUS,
        }
    }

    /// Apply `patch` over this template.
    pub fn patched(mut self, kind: TemplateKind, patch: TemplatePatch) -> Self {
        self.kind = kind;
        if let Some(v) = patch.location {
            self.location = v;
        }
        if let Some(v) = patch.box_part {
            self.box_part = v;
        }
        if let Some(v) = patch.text_size {
            self.text_size = v;
        }
        if let Some(v) = patch.size_table {
            self.size_table = v;
        }
        if let Some(v) = patch.text_color {
            self.text_color = v;
        }
        if let Some(v) = patch.text_color_theme_override {
            self.text_color_theme_override = v;
        }
        if let Some(v) = patch.text_typeface {
            self.text_typeface = v;
        }
        if let Some(v) = patch.text_alignment {
            self.text_alignment = v;
        }
        if let Some(v) = patch.text_offset {
            self.text_offset = v;
        }
        if let Some(v) = patch.text_links_enabled {
            self.text_links_enabled = v;
        }
        if let Some(v) = patch.padding {
            self.padding = v;
        }
        if let Some(v) = patch.background_color {
            self.background_color = v;
        }
        if let Some(v) = patch.background_color_theme_override {
            self.background_color_theme_override = v;
        }
        if let Some(v) = patch.background_image {
            self.background_image = v;
        }
        if let Some(v) = patch.rounded_corners {
            self.rounded_corners = v;
        }
        if let Some(v) = patch.rounded_radius {
            self.rounded_radius = v;
        }
        self
    }

    /// Template for a component kind.
    pub fn for_kind(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::Body => Self::base(),
            TemplateKind::Heading(depth) => Self::heading(depth),
            TemplateKind::Story => Self::story(),
            TemplateKind::Appeal => Self::appeal(),
            TemplateKind::Blockquote => Self::blockquote(),
            TemplateKind::Caption => Self::caption(),
            TemplateKind::ResourceTitle => Self::resource_header(
                kind,
                StyleLocation::ResourceTitle,
                TextSize::Xl,
                FaceVariant::Bold,
            ),
            TemplateKind::ResourceSubtitle => Self::resource_header(
                kind,
                StyleLocation::ResourceSubtitle,
                TextSize::Base,
                FaceVariant::Regular,
            ),
            TemplateKind::ResourceDescription => Self::resource_header(
                kind,
                StyleLocation::ResourceDescription,
                TextSize::Sm,
                FaceVariant::Regular,
            ),
            TemplateKind::SegmentTitle => Self::base().patched(
                kind,
                TemplatePatch {
                    location: Some(StyleLocation::SegmentTitle),
                    text_size: Some(Attr::enabled(TextSize::Xl)),
                    text_typeface: Some(Attr::enabled(TypefaceDefault::Reader(
                        FaceVariant::Bold,
                    ))),
                    ..TemplatePatch::default()
                },
            ),
            TemplateKind::SegmentSubtitle => Self::base().patched(
                kind,
                TemplatePatch {
                    location: Some(StyleLocation::SegmentSubtitle),
                    text_color: Some(Attr::enabled(ColorValue::SECONDARY_TEXT)),
                    ..TemplatePatch::default()
                },
            ),
            TemplateKind::SegmentDate => Self::base().patched(
                kind,
                TemplatePatch {
                    location: Some(StyleLocation::SegmentDate),
                    text_size: Some(Attr::enabled(TextSize::Sm)),
                    text_color: Some(Attr::enabled(ColorValue::SECONDARY_TEXT)),
                    text_links_enabled: Some(false),
                    ..TemplatePatch::default()
                },
            ),
        }
    }

    /// Heading at `depth`: bold reader face and a depth-keyed size table.
    pub fn heading(depth: u8) -> Self {
        Self::base().patched(
            TemplateKind::Heading(depth),
            TemplatePatch {
                size_table: Some(SizeTable::Depth {
                    depth,
                    entries: HEADING_SIZES,
                    fallback: HEADING_FALLBACK_POINTS,
                }),
                text_typeface: Some(Attr::enabled(TypefaceDefault::Reader(FaceVariant::Bold))),
                ..TemplatePatch::default()
            },
        )
    }

    /// Story slide text drawn over artwork.
    pub fn story() -> Self {
        Self::base().patched(
            TemplateKind::Story,
            TemplatePatch {
                text_size: Some(Attr::disabled(TextSize::Base)),
                size_table: Some(SizeTable::Fixed(STORY_POINTS)),
                text_color: Some(Attr::enabled(ColorValue::Fixed(Color::WHITE))),
                text_color_theme_override: Some(false),
                ..TemplatePatch::default()
            },
        )
    }

    /// Closing appeal.
    pub fn appeal() -> Self {
        Self::base().patched(
            TemplateKind::Appeal,
            TemplatePatch {
                text_alignment: Some(Attr::enabled(TextAlign::Center)),
                text_typeface: Some(Attr::enabled(TypefaceDefault::Reader(FaceVariant::Italic))),
                ..TemplatePatch::default()
            },
        )
    }

    /// Quoted passage with a leading inset.
    pub fn blockquote() -> Self {
        Self::base().patched(
            TemplateKind::Blockquote,
            TemplatePatch {
                text_typeface: Some(Attr::enabled(TypefaceDefault::Reader(FaceVariant::Italic))),
                padding: Some(Attr::enabled(EdgeInsets {
                    leading: 16.0,
                    ..EdgeInsets::ZERO
                })),
                ..TemplatePatch::default()
            },
        )
    }

    /// Media caption.
    pub fn caption() -> Self {
        Self::base().patched(
            TemplateKind::Caption,
            TemplatePatch {
                text_size: Some(Attr::enabled(TextSize::Sm)),
                text_color: Some(Attr::enabled(ColorValue::SECONDARY_TEXT)),
                text_alignment: Some(Attr::enabled(TextAlign::Center)),
                ..TemplatePatch::default()
            },
        )
    }

    fn resource_header(
        kind: TemplateKind,
        location: StyleLocation,
        size: TextSize,
        variant: FaceVariant,
    ) -> Self {
        // Resource headers sit on cover artwork, so author colors always win.
        Self::base().patched(
            kind,
            TemplatePatch {
                location: Some(location),
                text_size: Some(Attr::enabled(size)),
                text_color: Some(Attr::enabled(ColorValue::Fixed(Color::WHITE))),
                text_color_theme_override: Some(false),
                text_typeface: Some(Attr::enabled(TypefaceDefault::Reader(variant))),
                ..TemplatePatch::default()
            },
        )
    }

    /// Points for an abstract size under `reader`.
    pub fn size_points(&self, reader: ReaderSize, requested: Option<TextSize>) -> f32 {
        self.size_table
            .points(reader, requested, self.text_size.default)
    }

    pub fn alignment_of(&self, align: TextAlign) -> HorizontalAlignment {
        self.alignment_table.get(align)
    }

    pub fn offset_of(&self, offset: TextOffset) -> f32 {
        self.offset_table.get(offset)
    }

    pub fn padding_of(&self, spacing: SpacingSize) -> f32 {
        self.spacing_table.get(spacing)
    }
}
