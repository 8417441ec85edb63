//! Error type for the crate's outer surface.
//!
//! Field evaluation, integration and synthesis are total and never return
//! errors. Only encoding and persistence can fail: WAV headers, JSON export
//! and file writes.

/// Errors raised while encoding or writing artifacts.
#[derive(Debug, thiserror::Error)]
pub enum PsiError {
    /// Underlying reader/writer failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Structured export could not be serialized.
    #[error("export serialization failed: {0}")]
    Json(String),
    /// Audio buffer cannot be represented as a RIFF/WAVE file.
    #[error("invalid audio buffer: {reason}")]
    InvalidAudio {
        /// What was wrong with the buffer.
        reason: &'static str,
    },
}

#[cfg(feature = "cli")]
impl From<serde_json::Error> for PsiError {
    fn from(e: serde_json::Error) -> Self {
        PsiError::Json(e.to_string())
    }
}

/// Crate result alias.
pub type Result<T> = core::result::Result<T, PsiError>;
