use thiserror::Error;

/// Errors that can occur while assembling a GNRE document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GnreError {
    /// A precondition on the input data failed. Raised before any XML is
    /// written; no partial document is ever produced.
    #[error("validation failed: {0}")]
    Validation(String),

    /// XML serialization error.
    #[error("XML error: {0}")]
    Xml(String),
}

impl GnreError {
    /// Shorthand used by the builders to fail on the first violated rule.
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
