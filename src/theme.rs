//! Reader theme, size tier and typeface.
//!
//! [`ThemeContext`] owns the mutable, persisted reader settings. The cascade
//! never sees it directly: it reads a [`ThemeSnapshot`], a `Copy` value taken
//! once per render pass.

use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorValue, ThemeColorRole};
use crate::settings::SettingsStore;

/// Reader color theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReaderTheme {
    #[default]
    Light,
    Sepia,
    Dark,
    /// Follows the platform light/dark signal.
    Auto,
}

/// Reader text-size tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReaderSize {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Huge,
}

impl ReaderSize {
    /// Ordinal 1 (tiny) through 5 (huge).
    pub fn rank(self) -> u8 {
        match self {
            Self::Tiny => 1,
            Self::Small => 2,
            Self::Medium => 3,
            Self::Large => 4,
            Self::Huge => 5,
        }
    }
}

/// Weight/slant variant inside a reader typeface family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FaceVariant {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FaceVariant {
    /// Variant with the given weight and slant.
    pub fn from_parts(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => Self::Regular,
            (true, false) => Self::Bold,
            (false, true) => Self::Italic,
            (true, true) => Self::BoldItalic,
        }
    }

    /// Whether the variant is bold.
    pub fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    /// Whether the variant is italic.
    pub fn is_italic(self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }
}

/// Bundled reader typeface family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReaderTypeface {
    Andada,
    #[default]
    Lato,
    PtSerif,
    PtSans,
}

impl ReaderTypeface {
    /// Every bundled typeface.
    pub const ALL: [Self; 4] = [Self::Andada, Self::Lato, Self::PtSerif, Self::PtSans];

    /// Family name as installed.
    pub fn family(self) -> &'static str {
        match self {
            Self::Andada => "AndadaPro",
            Self::Lato => "Lato",
            Self::PtSerif => "PTSerif",
            Self::PtSans => "PTSans",
        }
    }

    /// Installed font name for a variant of this family.
    pub fn font_name(self, variant: FaceVariant) -> &'static str {
        match (self, variant) {
            (Self::Andada, FaceVariant::Regular) => "AndadaPro-Regular",
            (Self::Andada, FaceVariant::Bold) => "AndadaPro-Bold",
            (Self::Andada, FaceVariant::Italic) => "AndadaPro-Italic",
            (Self::Andada, FaceVariant::BoldItalic) => "AndadaPro-BoldItalic",
            (Self::Lato, FaceVariant::Regular) => "Lato-Regular",
            (Self::Lato, FaceVariant::Bold) => "Lato-Bold",
            (Self::Lato, FaceVariant::Italic) => "Lato-Italic",
            (Self::Lato, FaceVariant::BoldItalic) => "Lato-BoldItalic",
            (Self::PtSerif, FaceVariant::Regular) => "PTSerif-Regular",
            (Self::PtSerif, FaceVariant::Bold) => "PTSerif-Bold",
            (Self::PtSerif, FaceVariant::Italic) => "PTSerif-Italic",
            (Self::PtSerif, FaceVariant::BoldItalic) => "PTSerif-BoldItalic",
            (Self::PtSans, FaceVariant::Regular) => "PTSans-Regular",
            (Self::PtSans, FaceVariant::Bold) => "PTSans-Bold",
            (Self::PtSans, FaceVariant::Italic) => "PTSans-Italic",
            (Self::PtSans, FaceVariant::BoldItalic) => "PTSans-BoldItalic",
        }
    }
}

/// Four-slot color palette for one concrete theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub secondary_text: Color,
    pub secondary_background: Color,
}

impl Palette {
    pub const LIGHT: Self = Self {
        background: Color::rgb(0xFF, 0xFF, 0xFF),
        text: Color::rgb(0x2C, 0x2C, 0x2E),
        secondary_text: Color::rgb(0x8E, 0x8E, 0x93),
        secondary_background: Color::rgb(0xF2, 0xF2, 0xF7),
    };

    pub const SEPIA: Self = Self {
        background: Color::rgb(0xFB, 0xF0, 0xD9),
        text: Color::rgb(0x5B, 0x46, 0x36),
        secondary_text: Color::rgb(0x8B, 0x73, 0x55),
        secondary_background: Color::rgb(0xF2, 0xE3, 0xC6),
    };

    pub const DARK: Self = Self {
        background: Color::rgb(0x00, 0x00, 0x00),
        text: Color::rgb(0xE5, 0xE5, 0xEA),
        secondary_text: Color::rgb(0x8E, 0x8E, 0x93),
        secondary_background: Color::rgb(0x1C, 0x1C, 0x1E),
    };

    /// Color for a palette slot.
    pub fn get(&self, role: ThemeColorRole) -> Color {
        match role {
            ThemeColorRole::Text => self.text,
            ThemeColorRole::SecondaryText => self.secondary_text,
            ThemeColorRole::Background => self.background,
            ThemeColorRole::SecondaryBackground => self.secondary_background,
        }
    }
}

/// Persisted reader settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeSettings {
    pub theme: ReaderTheme,
    pub size: ReaderSize,
    pub typeface: ReaderTypeface,
}

/// Immutable view of reader settings for one render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThemeSnapshot {
    pub theme: ReaderTheme,
    pub size: ReaderSize,
    pub typeface: ReaderTypeface,
    /// Host platform reports a dark appearance.
    pub platform_dark: bool,
}

impl ThemeSnapshot {
    /// Snapshot with the given theme and default size/typeface.
    pub fn with_theme(theme: ReaderTheme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// Theme after resolving `Auto` against the platform signal.
    pub fn effective_theme(&self) -> ReaderTheme {
        match self.theme {
            ReaderTheme::Auto if self.platform_dark => ReaderTheme::Dark,
            ReaderTheme::Auto => ReaderTheme::Light,
            theme => theme,
        }
    }

    /// True when the effective theme is light.
    pub fn is_light(&self) -> bool {
        self.effective_theme() == ReaderTheme::Light
    }

    /// Palette of the effective theme.
    pub fn palette(&self) -> Palette {
        match self.effective_theme() {
            ReaderTheme::Sepia => Palette::SEPIA,
            ReaderTheme::Dark => Palette::DARK,
            ReaderTheme::Light | ReaderTheme::Auto => Palette::LIGHT,
        }
    }

    pub fn background_color(&self) -> Color {
        self.palette().background
    }

    pub fn text_color(&self) -> Color {
        self.palette().text
    }

    pub fn secondary_text_color(&self) -> Color {
        self.palette().secondary_text
    }

    pub fn secondary_background_color(&self) -> Color {
        self.palette().secondary_background
    }

    /// Resolve a template color default against this theme.
    pub fn resolve(&self, value: ColorValue) -> Color {
        match value {
            ColorValue::Theme(role) => self.palette().get(role),
            ColorValue::Fixed(color) => color,
        }
    }

    /// Size tier ordinal, 1 through 5.
    pub fn size_rank(&self) -> u8 {
        self.size.rank()
    }
}

/// Mutable reader settings with optional persistence.
pub struct ThemeContext<'s> {
    settings: ThemeSettings,
    platform_dark: bool,
    store: Option<&'s dyn SettingsStore>,
}

impl core::fmt::Debug for ThemeContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ThemeContext")
            .field("settings", &self.settings)
            .field("platform_dark", &self.platform_dark)
            .field("persistent", &self.store.is_some())
            .finish()
    }
}

impl Default for ThemeContext<'_> {
    fn default() -> Self {
        Self::new(ThemeSettings::default())
    }
}

impl<'s> ThemeContext<'s> {
    /// In-memory context; setters do not persist.
    pub fn new(settings: ThemeSettings) -> Self {
        Self {
            settings,
            platform_dark: false,
            store: None,
        }
    }

    /// Restore settings from `store`, falling back to defaults.
    pub fn load(store: &'s dyn SettingsStore) -> Self {
        let settings = store.load_theme_settings().unwrap_or_default();
        Self {
            settings,
            platform_dark: false,
            store: Some(store),
        }
    }

    pub fn theme(&self) -> ReaderTheme {
        self.settings.theme
    }

    pub fn size(&self) -> ReaderSize {
        self.settings.size
    }

    pub fn typeface(&self) -> ReaderTypeface {
        self.settings.typeface
    }

    /// Current settings.
    pub fn settings(&self) -> ThemeSettings {
        self.settings
    }

    pub fn set_theme(&mut self, theme: ReaderTheme) {
        self.settings.theme = theme;
        self.persist();
    }

    pub fn set_size(&mut self, size: ReaderSize) {
        self.settings.size = size;
        self.persist();
    }

    pub fn set_typeface(&mut self, typeface: ReaderTypeface) {
        self.settings.typeface = typeface;
        self.persist();
    }

    /// Update the injected platform appearance signal. Not persisted.
    pub fn set_platform_dark(&mut self, dark: bool) {
        self.platform_dark = dark;
    }

    fn persist(&self) {
        if let Some(store) = self.store {
            store.store_theme_settings(&self.settings);
        }
    }

    /// Copy of the current state for a render pass.
    pub fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            theme: self.settings.theme,
            size: self.settings.size,
            typeface: self.settings.typeface,
            platform_dark: self.platform_dark,
        }
    }

    pub fn resolved_background_color(&self) -> Color {
        self.snapshot().background_color()
    }

    pub fn resolved_text_color(&self) -> Color {
        self.snapshot().text_color()
    }

    pub fn resolved_secondary_text_color(&self) -> Color {
        self.snapshot().secondary_text_color()
    }

    pub fn resolved_secondary_background_color(&self) -> Color {
        self.snapshot().secondary_background_color()
    }

    pub fn size_rank(&self) -> u8 {
        self.settings.size.rank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemorySettingsStore;

    #[test]
    fn auto_theme_follows_platform_signal() {
        let mut ctx = ThemeContext::new(ThemeSettings {
            theme: ReaderTheme::Auto,
            ..ThemeSettings::default()
        });
        assert_eq!(ctx.resolved_text_color(), Palette::LIGHT.text);
        ctx.set_platform_dark(true);
        assert_eq!(ctx.resolved_text_color(), Palette::DARK.text);
        assert_eq!(ctx.resolved_background_color(), Palette::DARK.background);
        assert!(!ctx.snapshot().is_light());
    }

    #[test]
    fn sepia_uses_its_own_palette() {
        let snapshot = ThemeSnapshot::with_theme(ReaderTheme::Sepia);
        assert_eq!(snapshot.text_color(), Palette::SEPIA.text);
        assert_eq!(
            snapshot.secondary_background_color(),
            Palette::SEPIA.secondary_background
        );
        assert_eq!(
            snapshot.resolve(ColorValue::SECONDARY_TEXT),
            Palette::SEPIA.secondary_text
        );
    }

    #[test]
    fn size_rank_is_one_through_five() {
        let ranks: Vec<u8> = [
            ReaderSize::Tiny,
            ReaderSize::Small,
            ReaderSize::Medium,
            ReaderSize::Large,
            ReaderSize::Huge,
        ]
        .iter()
        .map(|s| s.rank())
        .collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn setters_persist_through_store() {
        let store = MemorySettingsStore::default();
        {
            let mut ctx = ThemeContext::load(&store);
            assert_eq!(ctx.settings(), ThemeSettings::default());
            ctx.set_theme(ReaderTheme::Dark);
            ctx.set_size(ReaderSize::Huge);
            ctx.set_typeface(ReaderTypeface::PtSerif);
        }
        let restored = ThemeContext::load(&store);
        assert_eq!(restored.theme(), ReaderTheme::Dark);
        assert_eq!(restored.size(), ReaderSize::Huge);
        assert_eq!(restored.typeface(), ReaderTypeface::PtSerif);
        assert_eq!(restored.size_rank(), 5);
    }

    #[test]
    fn font_names_follow_family_and_variant() {
        assert_eq!(
            ReaderTypeface::PtSans.font_name(FaceVariant::from_parts(true, true)),
            "PTSans-BoldItalic"
        );
        assert_eq!(ReaderTypeface::Lato.family(), "Lato");
        assert!(FaceVariant::BoldItalic.is_bold());
        assert!(!FaceVariant::Bold.is_italic());
    }

    #[test]
    fn settings_serialize_in_camel_case() {
        let json = serde_json::to_string(&ThemeSettings {
            theme: ReaderTheme::Sepia,
            size: ReaderSize::Small,
            typeface: ReaderTypeface::PtSerif,
        })
        .expect("serialize");
        assert_eq!(
            json,
            r#"{"theme":"sepia","size":"small","typeface":"ptSerif"}"#
        );
    }
}
