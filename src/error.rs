pub type SceneResult<T> = Result<T, SceneError>;

#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("content error: {0}")]
    Content(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn content(msg: impl Into<String>) -> Self {
        Self::Content(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
