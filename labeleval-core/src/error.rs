use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Undefined metric: {0}")]
    UndefinedMetric(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parser error: {0}")]
    ParserError(String),
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::ParserError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
