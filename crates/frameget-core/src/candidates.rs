//! Candidate locations: turning a key into an ordered list of URLs to try.
//!
//! The acquirer only depends on [`CandidateSource`]; the archive layout lives
//! in URL templates so mirrors can be reordered or replaced from config (or
//! pointed at a local server in tests).

use crate::key::ObservationKey;

/// Archive path conventions known to host DR7 `fpC` frames, in priority order.
pub const DEFAULT_TEMPLATES: [&str; 4] = [
    "https://data.sdss.org/sas/dr7/boss/photoObj/frames/{rerun}/{run}/{camcol}/{filename_gz}",
    "http://das.sdss.org/imaging/{run}/{rerun}/corr/{camcol}/{filename_gz}",
    "https://dr7.sdss.org/sas/dr7/boss/photoObj/frames/{rerun}/{run}/{camcol}/{filename_gz}",
    "http://data.sdss3.org/sas/dr7/boss/photoObj/frames/{rerun}/{run}/{camcol}/{filename_gz}",
];

/// Produces the URLs to try for a key. First element is tried first.
pub trait CandidateSource {
    fn candidates(&self, key: &ObservationKey) -> Vec<String>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("no URL templates configured")]
    Empty,
    #[error("template {template:?}: unknown placeholder {{{name}}}")]
    UnknownPlaceholder { template: String, name: String },
    #[error("template {template:?}: unbalanced brace at byte {at}")]
    UnbalancedBrace { template: String, at: usize },
    #[error("template {template:?} does not render to an http(s) URL: {reason}")]
    InvalidUrl { template: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Run,
    Rerun,
    Camcol,
    Field,
    Run6,
    Field4,
    FilenameGz,
}

impl Placeholder {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "run" => Self::Run,
            "rerun" => Self::Rerun,
            "camcol" => Self::Camcol,
            "field" => Self::Field,
            "run6" => Self::Run6,
            "field4" => Self::Field4,
            "filename_gz" => Self::FilenameGz,
            _ => return None,
        })
    }

    fn render(self, key: &ObservationKey, out: &mut String) {
        use std::fmt::Write;
        // Writing to a String cannot fail.
        let _ = match self {
            Self::Run => write!(out, "{}", key.run),
            Self::Rerun => write!(out, "{}", key.rerun),
            Self::Camcol => write!(out, "{}", key.camcol),
            Self::Field => write!(out, "{}", key.field),
            Self::Run6 => write!(out, "{:06}", key.run),
            Self::Field4 => write!(out, "{:04}", key.field),
            Self::FilenameGz => write!(out, "{}", key.intermediate_filename()),
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Hole(Placeholder),
}

/// One parsed template.
#[derive(Debug, Clone)]
struct Template {
    pieces: Vec<Piece>,
}

impl Template {
    fn parse(src: &str) -> Result<Self, TemplateError> {
        let mut pieces = Vec::new();
        let mut lit = String::new();
        let mut rest = src;
        let mut offset = 0usize;
        while let Some(pos) = rest.find(['{', '}']) {
            if rest.as_bytes()[pos] == b'}' {
                return Err(TemplateError::UnbalancedBrace {
                    template: src.to_string(),
                    at: offset + pos,
                });
            }
            lit.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            let close = after.find('}').ok_or_else(|| TemplateError::UnbalancedBrace {
                template: src.to_string(),
                at: offset + pos,
            })?;
            let name = &after[..close];
            let hole = Placeholder::parse(name).ok_or_else(|| {
                TemplateError::UnknownPlaceholder {
                    template: src.to_string(),
                    name: name.to_string(),
                }
            })?;
            if !lit.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut lit)));
            }
            pieces.push(Piece::Hole(hole));
            let consumed = pos + 1 + close + 1;
            offset += consumed;
            rest = &rest[consumed..];
        }
        lit.push_str(rest);
        if !lit.is_empty() {
            pieces.push(Piece::Literal(lit));
        }
        Ok(Template { pieces })
    }

    fn render(&self, key: &ObservationKey) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(s) => out.push_str(s),
                Piece::Hole(p) => p.render(key, &mut out),
            }
        }
        out
    }
}

/// Candidate source backed by URL templates with `{placeholder}` holes.
///
/// Placeholders: `{run}`, `{rerun}`, `{camcol}`, `{field}` (unpadded),
/// `{run6}`, `{field4}` (zero-padded) and `{filename_gz}`.
#[derive(Debug, Clone)]
pub struct UrlTemplates {
    templates: Vec<Template>,
}

impl UrlTemplates {
    /// Parses and validates all templates; any bad template rejects the set.
    pub fn new<I, S>(templates: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sample = ObservationKey::new(94, 301, 2, 12);
        let mut parsed = Vec::new();
        for src in templates {
            let src = src.as_ref();
            let t = Template::parse(src)?;
            check_url(src, &t.render(&sample))?;
            parsed.push(t);
        }
        if parsed.is_empty() {
            return Err(TemplateError::Empty);
        }
        Ok(Self { templates: parsed })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for UrlTemplates {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATES).expect("built-in templates are valid")
    }
}

impl CandidateSource for UrlTemplates {
    fn candidates(&self, key: &ObservationKey) -> Vec<String> {
        self.templates.iter().map(|t| t.render(key)).collect()
    }
}

fn check_url(template: &str, rendered: &str) -> Result<(), TemplateError> {
    let invalid = |reason: String| TemplateError::InvalidUrl {
        template: template.to_string(),
        reason,
    };
    let parsed = url::Url::parse(rendered).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme `{other}`"))),
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(())
}
