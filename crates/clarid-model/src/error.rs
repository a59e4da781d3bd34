use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid mapping document: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
