/// State management module
///
/// This module holds everything the filmstrip needs to know, independent of
/// any window:
/// - The cyclic image list and its cursor (sequence.rs)
/// - Drag accumulation and release snapping (pan.rs)
/// - Visible slots and draw dispatch (viewport.rs)
/// - The opened folder tying them together (viewer.rs)

pub mod pan;
pub mod sequence;
pub mod viewer;
pub mod viewport;
