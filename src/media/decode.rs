/// Image decoding
///
/// Turns an image file into RGBA pixels the renderer can upload. Decoding is
/// CPU-bound, so the async entry point runs it on tokio's blocking pool.
use std::path::Path;

use iced::widget::image::Handle;
use image::imageops::FilterType;
use tokio::task;

use crate::error::DecodeError;

/// Decoded pixels ready for display
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

/// Decode an image file, shrinking it so neither side exceeds `max_dimension`
pub fn decode_image(path: &str, max_dimension: u32) -> Result<DecodedImage, DecodeError> {
    let file = Path::new(path);

    // Verify file exists
    if !file.exists() {
        return Err(DecodeError::NotFound(path.to_string()));
    }

    let mut img = image::open(file).map_err(|e| DecodeError::Image {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    if img.width() > max_dimension || img.height() > max_dimension {
        tracing::debug!(
            "Downscaling {} from {}x{} to fit {}px",
            path,
            img.width(),
            img.height(),
            max_dimension
        );
        img = img.resize(max_dimension, max_dimension, FilterType::Triangle);
    }

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(DecodedImage {
        handle: Handle::from_rgba(width, height, rgba.into_raw()),
        width,
        height,
    })
}

/// Decode on the blocking pool. The path is returned alongside the outcome
/// so results can be matched up when they arrive out of order.
pub async fn load_image(
    path: String,
    max_dimension: u32,
) -> (String, Result<DecodedImage, DecodeError>) {
    let key = path.clone();
    let result = task::spawn_blocking(move || decode_image(&path, max_dimension))
        .await
        .unwrap_or_else(|e| {
            Err(DecodeError::Task {
                path: key.clone(),
                reason: e.to_string(),
            })
        });

    (key, result)
}
