use thiserror::Error;

#[derive(Error, Debug)]
pub enum InteractionError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("Playback rejected: {0}")]
    PlaybackRejected(String),
}
