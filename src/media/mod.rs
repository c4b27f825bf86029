/// Filesystem-facing media handling
///
/// This module handles:
/// - Listing a folder for image files
/// - Decoding image files into displayable pixels

pub mod decode;
pub mod scanner;
