/// Cyclic image sequence
///
/// An immutable list of image identifiers (absolute paths) with a cursor.
/// Moving the cursor returns a new value; the list itself is shared.
use std::sync::Arc;

use crate::error::SequenceError;

/// Position in a scanned folder
#[derive(Debug, Clone)]
pub struct ImageSequence {
    images: Arc<[String]>,
    index: usize,
}

impl ImageSequence {
    /// Create a sequence focused on the first image.
    /// An empty list cannot be displayed and is rejected.
    pub fn new(images: Vec<String>) -> Result<Self, SequenceError> {
        if images.is_empty() {
            return Err(SequenceError::Empty);
        }

        Ok(Self {
            images: images.into(),
            index: 0,
        })
    }

    /// Identifier under the cursor
    pub fn current(&self) -> &str {
        &self.images[self.index]
    }

    /// Cursor position
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Never true for a constructed sequence
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Identifier at `index`, wrapping around the ends
    pub fn identifier(&self, index: usize) -> &str {
        &self.images[index % self.images.len()]
    }

    /// The next image, wrapping to the first after the last
    pub fn next(&self) -> Self {
        self.at(self.index + 1)
    }

    /// The previous image, wrapping to the last before the first
    pub fn prev(&self) -> Self {
        let index = if self.index > 0 {
            self.index - 1
        } else {
            self.images.len() - 1
        };
        self.at(index)
    }

    /// Same list, cursor moved to `index` (taken modulo the length)
    pub fn at(&self, index: usize) -> Self {
        Self {
            images: Arc::clone(&self.images),
            index: index % self.images.len(),
        }
    }

    /// Index of an identifier in this sequence
    pub fn position_of(&self, identifier: &str) -> Option<usize> {
        self.images.iter().position(|image| image == identifier)
    }

    /// Whether `identifier` belongs to this scan
    pub fn contains(&self, identifier: &str) -> bool {
        self.position_of(identifier).is_some()
    }
}

/// Two positions are equal when they show the same image,
/// regardless of which scan or cursor produced them.
impl PartialEq for ImageSequence {
    fn eq(&self, other: &Self) -> bool {
        self.current() == other.current()
    }
}

impl Eq for ImageSequence {}
