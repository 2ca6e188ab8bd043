//! Structured errors for the fallible edges around the cascade.
//!
//! Resolution itself never fails. Errors only surface where documents are
//! decoded or reader settings touch durable storage.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

/// Stage that produced a [`StyleError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorPhase {
    /// Decoding a style tree or segment payload.
    Decode,
    /// Reading or writing persisted reader settings.
    Settings,
}

impl fmt::Display for ErrorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode => f.write_str("decode"),
            Self::Settings => f.write_str("settings"),
        }
    }
}

/// Structured error for decoding and settings persistence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleError {
    /// Processing phase where this error originated.
    pub phase: ErrorPhase,
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: Box<str>,
    /// Optional file path context.
    pub path: Option<Box<str>>,
    /// Optional additional context.
    pub context: Option<Box<StyleErrorContext>>,
}

/// Extended optional context for style errors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleErrorContext {
    /// Payload description (`style`, `segment`, `settings envelope`).
    pub source: Option<Box<str>>,
    /// 1-based line reported by the JSON decoder.
    pub line: Option<usize>,
    /// 1-based column reported by the JSON decoder.
    pub column: Option<usize>,
}

impl StyleError {
    pub(crate) fn new(phase: ErrorPhase, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            phase,
            code,
            message: message.into().into_boxed_str(),
            path: None,
            context: None,
        }
    }

    pub(crate) fn decode(source: &str, err: &serde_json::Error) -> Self {
        Self::new(
            ErrorPhase::Decode,
            "STYLE_DECODE_ERROR",
            alloc::format!("Failed to decode {}: {}", source, err),
        )
        .with_source(source)
        .with_position(err.line(), err.column())
    }

    pub(crate) fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into().into_boxed_str());
        self
    }

    pub(crate) fn with_source(mut self, source: impl Into<String>) -> Self {
        let ctx = self
            .context
            .get_or_insert_with(|| Box::new(StyleErrorContext::default()));
        ctx.source = Some(source.into().into_boxed_str());
        self
    }

    fn with_position(mut self, line: usize, column: usize) -> Self {
        if line == 0 {
            return self;
        }
        let ctx = self
            .context
            .get_or_insert_with(|| Box::new(StyleErrorContext::default()));
        ctx.line = Some(line);
        ctx.column = Some(column);
        self
    }
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.phase, self.code, self.message)?;
        if let Some(path) = self.path.as_deref() {
            write!(f, " [path={}]", path)?;
        }
        if let Some(ctx) = &self.context {
            if let Some(source) = ctx.source.as_deref() {
                write!(f, " [source={}]", source)?;
            }
            if let (Some(line), Some(column)) = (ctx.line, ctx.column) {
                write!(f, " [line={} column={}]", line, column)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for StyleError {}
