use thiserror::Error;

/// Failures raised by the class synthesizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpacingError {
    /// The property name is not one of the recognized spacing properties.
    /// Callers are expected to filter with [`crate::is_spacing_property`] first.
    #[error("unknown spacing property `{0}`")]
    UnknownProperty(String),
}

pub type Result<T, E = SpacingError> = std::result::Result<T, E>;
