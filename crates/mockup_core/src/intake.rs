use thiserror::Error;

use crate::state::ImageHandle;

/// Default per-file size cap, matching the upload panels' UI hint.
pub const DEFAULT_MAX_FILE_SIZE_MIB: u64 = 10;

/// One accepted MIME type and the extensions shown to the user for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeExtensions {
    pub mime: String,
    pub extensions: Vec<String>,
}

impl MimeExtensions {
    pub fn new(mime: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            mime: mime.into(),
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

/// Accept set for an intake: either a wildcard pattern such as `image/*`
/// or an explicit MIME -> extensions mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptedTypes {
    Pattern(String),
    Extensions(Vec<MimeExtensions>),
}

impl AcceptedTypes {
    pub fn matches(&self, mime: &str) -> bool {
        match self {
            AcceptedTypes::Pattern(pattern) => match pattern.strip_suffix("/*") {
                Some(prefix) => mime
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/')),
                None => pattern == mime,
            },
            AcceptedTypes::Extensions(entries) => entries.iter().any(|entry| entry.mime == mime),
        }
    }

    /// Short human-readable list for the drop-target hint, e.g. "png, jpeg".
    pub fn summary(&self) -> String {
        match self {
            AcceptedTypes::Pattern(pattern) => match pattern.as_str() {
                "image/*" => "all image formats".to_string(),
                other => other.to_string(),
            },
            AcceptedTypes::Extensions(entries) => entries
                .iter()
                .map(|entry| entry.mime.trim_start_matches("image/"))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Intake configuration fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeConfig {
    pub accepted: AcceptedTypes,
    pub max_file_size_mib: u64,
    pub allow_multiple: bool,
}

impl IntakeConfig {
    /// Single design file: PNG, JPEG or SVG.
    pub fn design() -> Self {
        Self {
            accepted: AcceptedTypes::Extensions(vec![
                MimeExtensions::new("image/png", &[".png"]),
                MimeExtensions::new("image/jpeg", &[".jpg", ".jpeg"]),
                MimeExtensions::new("image/svg+xml", &[".svg"]),
            ]),
            max_file_size_mib: DEFAULT_MAX_FILE_SIZE_MIB,
            allow_multiple: false,
        }
    }

    /// Any number of blank T-shirt photos: PNG or JPEG.
    pub fn mockups() -> Self {
        Self {
            accepted: AcceptedTypes::Extensions(vec![
                MimeExtensions::new("image/png", &[".png"]),
                MimeExtensions::new("image/jpeg", &[".jpg", ".jpeg"]),
            ]),
            max_file_size_mib: DEFAULT_MAX_FILE_SIZE_MIB,
            allow_multiple: true,
        }
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            accepted: AcceptedTypes::Pattern("image/*".to_string()),
            max_file_size_mib: DEFAULT_MAX_FILE_SIZE_MIB,
            allow_multiple: false,
        }
    }
}

/// Per-candidate rejection reason; the latest one is the intake's visible error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("file type not supported: {name}")]
    UnsupportedFileType { name: String },
    #[error("file too large: {name} (max {max_mib} MiB)")]
    FileTooLarge { name: String, max_mib: u64 },
}

/// A user-picked file before validation. The shell has already registered
/// the bytes and owns nothing afterwards; the handle's lifecycle belongs to
/// the intake from here on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub display_name: String,
    pub byte_size: u64,
    pub mime_type: String,
    pub image: ImageHandle,
}

/// A validated, staged file held for generation and preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub display_name: String,
    pub byte_size: u64,
    pub mime_type: String,
    pub preview: ImageHandle,
}

impl From<CandidateFile> for StagedFile {
    fn from(candidate: CandidateFile) -> Self {
        Self {
            display_name: candidate.display_name,
            byte_size: candidate.byte_size,
            mime_type: candidate.mime_type,
            preview: candidate.image,
        }
    }
}

/// Ordered staged files plus the latest rejection message for one intake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeState {
    config: IntakeConfig,
    staged: Vec<StagedFile>,
    error: Option<IntakeError>,
}

impl IntakeState {
    pub fn new(config: IntakeConfig) -> Self {
        Self {
            config,
            staged: Vec::new(),
            error: None,
        }
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    pub fn staged(&self) -> &[StagedFile] {
        &self.staged
    }

    pub fn error(&self) -> Option<&IntakeError> {
        self.error.as_ref()
    }

    /// Validates and stages candidates. Returns every handle whose ownership
    /// ended here: rejected candidates, replaced files in single mode, and
    /// surplus valid candidates beyond the first in single mode.
    pub(crate) fn submit(&mut self, candidates: Vec<CandidateFile>) -> Vec<ImageHandle> {
        self.error = None;
        let mut released = Vec::new();
        let mut accepted = Vec::new();

        for candidate in candidates {
            match self.validate(&candidate) {
                Ok(()) => accepted.push(candidate),
                Err(err) => {
                    released.push(candidate.image);
                    self.error = Some(err);
                }
            }
        }

        if accepted.is_empty() {
            return released;
        }

        if self.config.allow_multiple {
            self.staged.extend(accepted.into_iter().map(StagedFile::from));
        } else {
            released.extend(self.staged.drain(..).map(|file| file.preview));
            let mut accepted = accepted.into_iter();
            if let Some(first) = accepted.next() {
                self.staged.push(StagedFile::from(first));
            }
            released.extend(accepted.map(|candidate| candidate.image));
        }

        released
    }

    /// Removes the staged file at `index`, returning its preview handle.
    /// Out-of-bounds indices are a silent no-op.
    pub(crate) fn remove(&mut self, index: usize) -> Option<ImageHandle> {
        if index < self.staged.len() {
            Some(self.staged.remove(index).preview)
        } else {
            None
        }
    }

    /// Drops every staged file, returning all preview handles for release.
    pub(crate) fn clear(&mut self) -> Vec<ImageHandle> {
        self.error = None;
        self.staged.drain(..).map(|file| file.preview).collect()
    }

    fn validate(&self, candidate: &CandidateFile) -> Result<(), IntakeError> {
        if !self.config.accepted.matches(&candidate.mime_type) {
            return Err(IntakeError::UnsupportedFileType {
                name: candidate.display_name.clone(),
            });
        }
        let max_bytes = self.config.max_file_size_mib * 1024 * 1024;
        if candidate.byte_size > max_bytes {
            return Err(IntakeError::FileTooLarge {
                name: candidate.display_name.clone(),
                max_mib: self.config.max_file_size_mib,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::AcceptedTypes;

    #[test]
    fn wildcard_pattern_matches_subtype() {
        let accepted = AcceptedTypes::Pattern("image/*".to_string());
        assert!(accepted.matches("image/png"));
        assert!(accepted.matches("image/svg+xml"));
        assert!(!accepted.matches("text/html"));
        assert!(!accepted.matches("imagepng"));
    }

    #[test]
    fn exact_pattern_requires_equality() {
        let accepted = AcceptedTypes::Pattern("image/png".to_string());
        assert!(accepted.matches("image/png"));
        assert!(!accepted.matches("image/jpeg"));
    }

    #[test]
    fn extension_summary_strips_image_prefix() {
        let accepted = super::IntakeConfig::design().accepted;
        assert_eq!(accepted.summary(), "png, jpeg, svg+xml");
    }
}
