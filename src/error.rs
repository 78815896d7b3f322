use thiserror::Error;

/// Errors raised before or while generating a walk.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalkError {
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },
    #[error("cannot sample uniformly from [{min}, {max}]")]
    DegenerateRange { min: f64, max: f64 },
}

impl WalkError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors from reading or writing a preset file.
#[derive(Error, Debug)]
pub enum PresetError {
    #[error("preset i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse preset: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize preset: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("unknown color `{value}` for `{key}`")]
    Color { key: &'static str, value: String },
    #[error("unknown {key} `{value}`")]
    Mode { key: &'static str, value: String },
    #[error(transparent)]
    Walk(#[from] WalkError),
}

/// Errors from the interactive viewer.
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
