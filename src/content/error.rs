//! Per-file content errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a source file into a [`Post`](super::Post)
#[derive(Debug, Error)]
pub enum ContentError {
    /// The file has no valid `---` delimited header
    #[error("malformed front-matter: {reason}")]
    MalformedFrontmatter { reason: String },

    /// `title` or `date` is absent or empty
    #[error("missing required field `{0}`")]
    MissingRequiredField(&'static str),

    /// The `date` value could not be parsed
    #[error("invalid date `{value}`")]
    InvalidDate { value: String },

    /// Two published posts resolve to the same output path
    #[error("duplicate output path {url}: {first} and {second}")]
    DuplicateUrl {
        url: String,
        first: String,
        second: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ContentError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedFrontmatter {
            reason: reason.into(),
        }
    }

    /// Whether this error keeps the post out of the chronological listing
    /// without the file itself being unreadable
    pub fn is_date_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDate { .. } | Self::MissingRequiredField("date")
        )
    }
}

/// A non-fatal finding reported during a batch run
#[derive(Debug)]
pub struct Diagnostic {
    /// Source path relative to the source directory
    pub source: PathBuf,
    pub error: ContentError,
}

impl Diagnostic {
    pub fn new(source: impl Into<PathBuf>, error: ContentError) -> Self {
        Self {
            source: source.into(),
            error,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.source.display(), self.error)
    }
}
