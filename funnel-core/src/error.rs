use thiserror::Error;

#[derive(Error, Debug)]
pub enum FunnelError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FunnelError>;
