use lesson_style::{FaceVariant, ReaderTypeface};
use serde::{Deserialize, Serialize};

/// One installed font face.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFace {
    /// Name used to request the face, e.g. `Lato-Bold`.
    pub name: String,
    /// Family shared by sibling faces.
    pub family: String,
    pub variant: FaceVariant,
}

impl FontFace {
    pub fn new(name: impl Into<String>, family: impl Into<String>, variant: FaceVariant) -> Self {
        Self {
            name: name.into(),
            family: family.into(),
            variant,
        }
    }
}

/// Set of installed faces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontCatalog {
    faces: Vec<FontFace>,
}

impl FontCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every variant of every reader typeface.
    pub fn bundled() -> Self {
        let mut catalog = Self {
            faces: Vec::with_capacity(ReaderTypeface::ALL.len() * 4),
        };
        for typeface in ReaderTypeface::ALL {
            for variant in [
                FaceVariant::Regular,
                FaceVariant::Bold,
                FaceVariant::Italic,
                FaceVariant::BoldItalic,
            ] {
                catalog.register(FontFace::new(
                    typeface.font_name(variant),
                    typeface.family(),
                    variant,
                ));
            }
        }
        catalog
    }

    pub fn with_face(mut self, face: FontFace) -> Self {
        self.register(face);
        self
    }

    /// Add a face. A face whose name is already registered is ignored.
    pub fn register(&mut self, face: FontFace) {
        if self.face(&face.name).is_none() {
            self.faces.push(face);
        }
    }

    /// Face by name, case-insensitive.
    pub fn face(&self, name: &str) -> Option<&FontFace> {
        let name = name.trim();
        self.faces
            .iter()
            .find(|face| face.name.eq_ignore_ascii_case(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.face(name).is_some()
    }

    /// Face in the same family as `name` with the requested variant.
    pub fn sibling(&self, name: &str, variant: FaceVariant) -> Option<&FontFace> {
        let base = self.face(name)?;
        self.faces
            .iter()
            .find(|face| face.family.eq_ignore_ascii_case(&base.family) && face.variant == variant)
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FontFace> {
        self.faces.iter()
    }
}

/// Fallback policy for font matching.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FontPolicy {
    /// Final fallback when neither the requested nor the default face is installed.
    pub system_font: String,
    /// Whether document-named fonts are honored at all.
    pub allow_document_fonts: bool,
}

impl FontPolicy {
    pub fn with_system_font(mut self, name: impl Into<String>) -> Self {
        self.system_font = name.into();
        self
    }

    pub fn with_document_fonts(mut self, allow: bool) -> Self {
        self.allow_document_fonts = allow;
        self
    }
}

impl Default for FontPolicy {
    fn default() -> Self {
        Self {
            system_font: "System".to_string(),
            allow_document_fonts: true,
        }
    }
}

/// Which step of the fallback chain produced a font.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontSource {
    Requested,
    TemplateDefault,
    System,
}

/// Concrete font reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFont {
    pub name: String,
    pub size: f32,
    pub source: FontSource,
}

/// Resolution result with its fallback reasoning.
#[derive(Clone, Debug, PartialEq)]
pub struct FontResolutionTrace {
    pub font: ResolvedFont,
    pub reason_chain: Vec<String>,
}

/// Font resolution engine.
#[derive(Clone, Debug)]
pub struct FontResolver {
    policy: FontPolicy,
    catalog: FontCatalog,
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::new(FontCatalog::bundled())
    }
}

impl FontResolver {
    pub fn new(catalog: FontCatalog) -> Self {
        Self {
            policy: FontPolicy::default(),
            catalog,
        }
    }

    pub fn with_policy(mut self, policy: FontPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &FontPolicy {
        &self.policy
    }

    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    /// Resolve `requested`, falling back to `default` and then the system font.
    pub fn resolve(&self, requested: Option<&str>, default: &str, size: f32) -> ResolvedFont {
        self.resolve_with_trace(requested, default, size).font
    }

    /// Resolve with full fallback reasoning.
    pub fn resolve_with_trace(
        &self,
        requested: Option<&str>,
        default: &str,
        size: f32,
    ) -> FontResolutionTrace {
        let mut reasons = Vec::with_capacity(4);
        if let Some(requested) = requested {
            if !self.policy.allow_document_fonts {
                reasons.push("document fonts disabled by policy".to_string());
            } else if let Some(face) = self.catalog.face(requested) {
                reasons.push(format!("matched requested font '{}'", requested));
                return trace(face.name.clone(), size, FontSource::Requested, reasons);
            } else {
                log::debug!("font '{}' is not installed; using '{}'", requested, default);
                reasons.push(format!("requested font '{}' not installed", requested));
            }
        }
        if let Some(face) = self.catalog.face(default) {
            reasons.push(format!("using template default '{}'", face.name));
            return trace(face.name.clone(), size, FontSource::TemplateDefault, reasons);
        }
        reasons.push(format!("template default '{}' not installed", default));
        reasons.push(format!(
            "fallback to policy system font '{}'",
            self.policy.system_font
        ));
        trace(
            self.policy.system_font.clone(),
            size,
            FontSource::System,
            reasons,
        )
    }

    /// Sibling of `name` in the requested variant, or `name` itself when the
    /// family has no such face.
    pub fn emphasized(&self, name: &str, variant: FaceVariant, size: f32) -> ResolvedFont {
        match self.catalog.sibling(name, variant) {
            Some(face) => ResolvedFont {
                name: face.name.clone(),
                size,
                source: FontSource::Requested,
            },
            None => {
                log::debug!("no {:?} sibling for '{}'", variant, name);
                self.resolve(None, name, size)
            }
        }
    }
}

fn trace(name: String, size: f32, source: FontSource, reasons: Vec<String>) -> FontResolutionTrace {
    FontResolutionTrace {
        font: ResolvedFont { name, size, source },
        reason_chain: reasons,
    }
}
