//! Engine tuning knobs.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Constants the cascade applies on top of template values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineOptions {
    /// Opacity of the theme background substituted for document backgrounds
    /// under non-light themes.
    pub background_dim_opacity: f32,
    /// Divisor applied to the font size of superscript/subscript runs.
    pub offset_size_divisor: f32,
    /// Color used when a document color string does not parse.
    pub neutral_color: Color,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            background_dim_opacity: 0.5,
            offset_size_divisor: 1.5,
            neutral_color: Color::NEUTRAL,
        }
    }
}

impl EngineOptions {
    pub fn with_background_dim_opacity(mut self, opacity: f32) -> Self {
        self.background_dim_opacity = opacity;
        self
    }

    /// Non-positive or non-finite divisors leave run sizes untouched.
    pub fn with_offset_size_divisor(mut self, divisor: f32) -> Self {
        self.offset_size_divisor = divisor;
        self
    }

    pub fn with_neutral_color(mut self, color: Color) -> Self {
        self.neutral_color = color;
        self
    }

    /// Font size for an offset run whose block size is `points`.
    pub fn offset_run_points(&self, points: f32) -> f32 {
        if self.offset_size_divisor.is_finite() && self.offset_size_divisor > 0.0 {
            points / self.offset_size_divisor
        } else {
            points
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_other_defaults() {
        let options: EngineOptions =
            serde_json::from_str(r#"{"backgroundDimOpacity": 0.25}"#).expect("decode options");
        assert_eq!(options.background_dim_opacity, 0.25);
        assert_eq!(options.offset_size_divisor, 1.5);
        assert_eq!(options.neutral_color, Color::NEUTRAL);
    }

    #[test]
    fn offset_points_ignore_bad_divisors() {
        let options = EngineOptions::default();
        assert_eq!(options.offset_run_points(21.0), 14.0);
        assert_eq!(
            options.with_offset_size_divisor(0.0).offset_run_points(21.0),
            21.0
        );
        assert_eq!(
            options
                .with_offset_size_divisor(f32::NAN)
                .offset_run_points(21.0),
            21.0
        );
    }
}
