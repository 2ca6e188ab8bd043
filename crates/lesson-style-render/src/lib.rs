//! Font resolution, run annotation, and block appearance for `lesson-style`.

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

mod annotate;
mod appearance;
mod font;
mod runs;

pub use annotate::{RunAnnotator, RunDefaults};
pub use appearance::{
    render_block_text, template_for, template_kind_for, BlockAppearance, BoxAppearance,
    RenderedBlock, TextAppearance,
};
pub use font::{
    FontCatalog, FontFace, FontPolicy, FontResolutionTrace, FontResolver, FontSource,
    ResolvedFont,
};
pub use runs::{AnnotatedRun, TextRun};
