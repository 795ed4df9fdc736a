//! Error types for blogwright.
//!
//! Data-quality problems (malformed HTML, failed placements, low-confidence
//! plans) are reported through result structures, not through this type.
//! `Error` covers collaborator failures, template rendering and file I/O.

/// Error type for composition and orchestration operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The text-generation collaborator failed after all retries.
    #[error("text generation failed: {0}")]
    GenerationError(String),

    /// The generated draft was unusable (empty or missing required elements).
    #[error("unusable draft: {0}")]
    DraftError(String),

    /// Page template could not be parsed or rendered.
    #[error("template rendering failed: {0}")]
    TemplateError(String),

    /// Writing an article to disk failed.
    #[error("article persistence failed: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for composition operations.
pub type Result<T> = std::result::Result<T, Error>;
