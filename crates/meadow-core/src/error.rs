use thiserror::Error;

/// Failures raised while building scene data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("unknown palette id {0}")]
    UnknownPalette(u16),

    #[error("attribute `{name}` holds {actual} floats, expected {expected}")]
    AttributeLength {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("viewport must be non-empty, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, SceneError>;
