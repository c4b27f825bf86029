//! Filmstrip image viewer
//!
//! Pick a folder, then drag the strip left or right to move between its
//! images. Releasing snaps onto the image that is more than half visible;
//! both ends wrap around.
//!
//! The pan, snap and slot arithmetic lives in [`state`] and has no GUI
//! dependency. [`ui`] and [`app`] adapt it to an iced canvas.

pub mod app;
pub mod config;
pub mod error;
pub mod media;
pub mod state;
pub mod ui;

pub use error::{Error, Result};
