use thiserror::Error;

/// Failures reported by the strict parse and render paths.
///
/// The lenient paths never produce these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// `{{` with no later `}}`.
    #[error("unterminated '{{{{' at byte {offset}")]
    Unterminated { offset: usize },

    #[error("no value for '{key}'")]
    MissingKey { key: String },
}
