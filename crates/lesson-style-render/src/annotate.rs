//! Per-run styling.
//!
//! Runs are styled in a fixed order: link styling (which ends the pass for
//! that run), emphasis weight, then inline overrides. Inline overrides are
//! always the last assignment touching a run.

use lesson_style::{Color, FaceVariant, Styler};

use crate::font::FontResolver;
use crate::runs::{AnnotatedRun, TextRun};

/// Resolved block-level text defaults the runs start from.
#[derive(Clone, Debug, PartialEq)]
pub struct RunDefaults {
    pub font: String,
    pub size: f32,
    pub color: Color,
    /// Color applied to links instead of `color`.
    pub link_color: Option<Color>,
}

/// Applies block defaults and per-run overrides to parsed runs.
#[derive(Clone, Debug)]
pub struct RunAnnotator<'a> {
    styler: &'a Styler<'a>,
    fonts: &'a FontResolver,
    defaults: RunDefaults,
}

impl<'a> RunAnnotator<'a> {
    pub fn new(styler: &'a Styler<'a>, fonts: &'a FontResolver, defaults: RunDefaults) -> Self {
        Self {
            styler,
            fonts,
            defaults,
        }
    }

    pub fn defaults(&self) -> &RunDefaults {
        &self.defaults
    }

    pub fn annotate_all(&self, runs: &[TextRun]) -> Vec<AnnotatedRun> {
        runs.iter().map(|run| self.annotate(run)).collect()
    }

    pub fn annotate(&self, run: &TextRun) -> AnnotatedRun {
        let defaults = &self.defaults;
        let template = self.styler.template();
        let mut out = AnnotatedRun {
            text: run.text.clone(),
            font: defaults.font.clone(),
            size: defaults.size,
            color: defaults.color,
            underline: false,
            link: run.link.clone(),
            baseline_offset: 0.0,
        };

        if run.link.is_some() && template.text_links_enabled {
            out.font = self.fonts.resolve(None, &defaults.font, defaults.size).name;
            out.underline = true;
            if let Some(color) = defaults.link_color {
                out.color = color;
            }
            return out;
        }

        let variant = FaceVariant::from_parts(run.strong, run.emphasis);
        if variant != FaceVariant::Regular {
            out.font = self.fonts.emphasized(&out.font, variant, out.size).name;
        }

        if let Some(inline) = run.inline_style() {
            let reader = self.styler.theme().size;
            let mut size = out.size;
            let mut size_changed = false;

            if template.text_offset.enabled {
                if let Some(offset) = inline.offset() {
                    out.baseline_offset = template.offset_of(offset);
                    size = self.styler.options().offset_run_points(size);
                    size_changed = true;
                }
            }
            if template.text_size.enabled {
                if let Some(requested) = inline.size() {
                    size = template.size_points(reader, Some(requested));
                    size_changed = true;
                }
            }
            match inline.typeface().filter(|_| template.text_typeface.enabled) {
                Some(name) => {
                    let font = self.fonts.resolve(Some(name), &defaults.font, size);
                    out.font = font.name;
                    out.size = font.size;
                }
                None if size_changed => out.size = size,
                None => {}
            }
            if template.text_color.enabled && self.styler.document_text_colors_allowed() {
                if let Some(raw) = inline.color() {
                    out.color = Color::from_hex_or(raw, self.styler.options().neutral_color);
                }
            }
        }
        out
    }
}
