pub mod api;
pub mod colors;
pub mod config;
pub mod display;
pub mod error;
pub mod fetcher;
pub mod image_loader;
pub mod models;
pub mod pacing;
pub mod progress;
pub mod prompt;
pub mod quantize;
pub mod region;
pub mod session;
pub mod submitter;

pub use error::{PlacerError, PlacerResult};
