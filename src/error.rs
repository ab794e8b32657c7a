use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MapError {
    /// The one failure class of the map format: a structural rule was broken in
    /// a map file, a merge input, or an operation-list string. `context` names
    /// the section or phase, `detail` carries the offending line or key.
    #[error("malformed input in {context}: {detail}")]
    MalformedInput { context: String, detail: String },
}

impl MapError {
    pub fn malformed(context: impl Into<String>, detail: impl Into<String>) -> Self {
        MapError::MalformedInput {
            context: context.into(),
            detail: detail.into(),
        }
    }
}
