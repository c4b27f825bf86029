/// Error types for the viewer
///
/// Each concern gets its own enum so callers can decide what is a
/// user-facing notice and what is only worth a log line.
use std::path::PathBuf;
use thiserror::Error;

/// Failures while listing a folder for images
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Folder does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Not a folder: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Could not read folder {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Building an image sequence
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("No images available to display.")]
    Empty,
}

/// Failures while turning an image file into displayable pixels
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Image file does not exist: {0}")]
    NotFound(String),

    #[error("Error loading image: {path}; Error: {reason}")]
    Image { path: String, reason: String },

    #[error("Decode task failed for {path}: {reason}")]
    Task { path: String, reason: String },
}

/// Reasons a slot could not be drawn
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// Decoding has not finished yet
    #[error("Image not decoded yet: {0}")]
    Pending(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Invalid command-line configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid argument: {0}")]
    Args(#[from] pico_args::Error),

    #[error("{flag} must be greater than zero")]
    Zero { flag: &'static str },

    #[error("Unexpected argument: {0}")]
    Unexpected(String),
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
