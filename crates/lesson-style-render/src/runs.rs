use lesson_style::{Color, TextStyle};
use serde::{Deserialize, Serialize};

/// Parsed rich-text run, as produced by the markdown collaborator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextRun {
    pub text: String,
    /// Link target, when the run is a link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub strong: bool,
    pub emphasis: bool,
    /// Per-run style override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn link(text: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(target.into()),
            ..Self::default()
        }
    }

    pub fn strong(mut self) -> Self {
        self.strong = true;
        self
    }

    pub fn emphasized(mut self) -> Self {
        self.emphasis = true;
        self
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Inline override with at least one attribute set.
    pub fn inline_style(&self) -> Option<&TextStyle> {
        self.style.as_ref().filter(|style| !style.is_empty())
    }
}

/// Run ready for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedRun {
    pub text: String,
    pub font: String,
    pub size: f32,
    pub color: Color,
    pub underline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Baseline shift in points; positive raises the run.
    pub baseline_offset: f32,
}
