//! Style cascade resolution for lesson documents.
//!
//! `lesson-style` turns a document-supplied [`Style`] tree, a per-component
//! [`StyleTemplate`], an optional target block, and a [`ThemeSnapshot`] into
//! concrete, platform-neutral style values: colors, point sizes, font names,
//! alignment, baseline offsets, per-side padding, corner radii, and
//! background references.
//!
//! Resolution is pure and never fails. Missing nodes, unknown enum values
//! and malformed colors all fall back to documented defaults.
//!
//! ```
//! use lesson_style::{BlockRef, BlockType, Query, ReaderTheme, Style, StyleTemplate, Styler, ThemeSnapshot};
//!
//! let style = Style::from_json_str(
//!     r##"{"blocks": {"inline": {"all": {"text": {"color": "#111111"}}}}}"##,
//! )?;
//! let styler = Styler::new(
//!     Some(&style),
//!     StyleTemplate::base(),
//!     ThemeSnapshot::with_theme(ReaderTheme::Light),
//! );
//! let paragraph = BlockRef::new(BlockType::Paragraph);
//! assert_eq!(styler.text_color(&Query::block(&paragraph)).to_hex(), "#111111");
//! # Ok::<(), lesson_style::StyleError>(())
//! ```

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

extern crate alloc;

pub mod block;
pub mod block_styles;
pub mod cascade;
pub mod color;
pub mod error;
pub mod options;
pub mod settings;
pub mod style;
pub mod template;
pub mod theme;

pub use block::{AnyBlock, BlockKind, BlockRef, BlockType, CascadeTarget, Segment};
pub use block_styles::BlockStyler;
pub use cascade::{BaseLayer, LayerChain, LayerFilter, Query, Styler};
pub use color::{Color, ColorValue, ThemeColorRole};
pub use error::{ErrorPhase, StyleError, StyleErrorContext};
pub use options::EngineOptions;
pub use settings::{FileSettingsStore, MemorySettingsStore, SettingsStore};
pub use style::{
    BlockStyle, BlockTypeStyle, BlocksStyle, BoxPart, BoxStyle, DefaultBlockStyles, PaddingSide,
    PaddingStyle, ScopeStyle, SpacingSize, Style, TextAlign, TextOffset, TextSize, TextStyle,
};
pub use template::{
    Attr, EdgeInsets, HorizontalAlignment, SizeTable, StyleLocation, StyleTemplate, TemplateKind,
    TemplatePatch, TypefaceDefault,
};
pub use theme::{
    FaceVariant, Palette, ReaderSize, ReaderTheme, ReaderTypeface, ThemeContext, ThemeSettings,
    ThemeSnapshot,
};
