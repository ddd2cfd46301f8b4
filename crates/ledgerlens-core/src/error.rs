#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("confirmation threshold must be greater than zero, got {0}")]
    InvalidThreshold(u32),

    #[error("invalid value `{value}` for coin setting `{setting}`")]
    InvalidSetting { setting: String, value: String },

    #[error("snapshot parse error: {0}")]
    SnapshotParse(String),

    #[error("presenter task has stopped")]
    PresenterClosed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
