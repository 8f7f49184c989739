use thiserror::Error;

use crate::transport::ApiError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("api error: {0}")]
    Api(#[from] ApiError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}
