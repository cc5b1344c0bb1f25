/// Crate-wide result alias.
pub type RenderctlResult<T> = Result<T, RenderctlError>;

/// Errors surfaced by controllers, the script bridge, and the job driver.
#[derive(thiserror::Error, Debug)]
pub enum RenderctlError {
    /// Invalid configuration or a contract violation caught up front.
    #[error("validation error: {0}")]
    Validation(String),

    /// Script compilation, binding, or initialization failure.
    #[error("script error: {0}")]
    Script(String),

    /// Frame production failure reported by the renderer side.
    #[error("render error: {0}")]
    Render(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RenderctlError {
    /// Build a [`RenderctlError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RenderctlError::Script`].
    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }

    /// Build a [`RenderctlError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`RenderctlError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
