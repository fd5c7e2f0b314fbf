use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlacerError {
    #[error("The pixel war is not active")]
    Inactive,

    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Service unavailable: {endpoint} answered with status {status}")]
    ServiceUnavailable { endpoint: String, status: u16 },

    #[error("Unexpected response from {endpoint}: {body:?}")]
    MalformedResponse { endpoint: String, body: String },

    #[error("No image found in {}", .0.display())]
    NoImageFound(PathBuf),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Too many invalid inputs")]
    TooManyInvalidInputs,

    #[error("Cancelled by user")]
    Cancelled,
}

pub type PlacerResult<T> = Result<T, PlacerError>;
