pub type PanoResult<T> = Result<T, PanoError>;

#[derive(thiserror::Error, Debug)]
pub enum PanoError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("missing asset: {0}")]
    MissingAsset(String),

    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PanoError {
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub fn missing_asset(msg: impl Into<String>) -> Self {
        Self::MissingAsset(msg.into())
    }

    pub fn dimension_mismatch(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }
}
