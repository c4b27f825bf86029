/// Viewer state: one opened folder
///
/// Ties the image sequence to the pan controller and keeps track of which
/// images have been decoded. The sequence cursor always follows the page the
/// strip is snapped on.
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::config::ScanOptions;
use crate::error::{DecodeError, DrawError, SequenceError};
use crate::media::decode::DecodedImage;
use crate::media::scanner::{self, display_name};
use crate::state::pan::PanController;
use crate::state::sequence::ImageSequence;
use crate::state::viewport::{self, PaintOrders};

/// Decode outcome for one image
#[derive(Debug, Clone)]
pub enum Decoded {
    Ready(DecodedImage),
    Failed(DecodeError),
}

/// State of the filmstrip for one folder
#[derive(Debug)]
pub struct Viewer {
    sequence: ImageSequence,
    pan: PanController,
    orders: PaintOrders,
    decoded: HashMap<String, Decoded>,
    in_flight: HashSet<String>,
    preload_radius: usize,
}

impl Viewer {
    /// Open a scanned folder, focused on its first image
    pub fn open(
        images: Vec<String>,
        viewport_width: i32,
        preload_radius: usize,
    ) -> Result<Self, SequenceError> {
        let sequence = ImageSequence::new(images)?;
        let mut pan = PanController::new(viewport_width, sequence.len());
        pan.focus_on_image(0);

        let mut orders = PaintOrders::default();
        orders.paint(sequence.current(), pan.offset());

        Ok(Self {
            sequence,
            pan,
            orders,
            decoded: HashMap::new(),
            in_flight: HashSet::new(),
            preload_radius,
        })
    }

    /// Scan `folder` and open it
    pub fn from_folder(
        folder: &Path,
        options: &ScanOptions,
        viewport_width: i32,
        preload_radius: usize,
    ) -> crate::Result<Self> {
        let images = scanner::scan(folder, options)?;
        Ok(Self::open(images, viewport_width, preload_radius)?)
    }

    pub fn sequence(&self) -> &ImageSequence {
        &self.sequence
    }

    pub fn offset(&self) -> i32 {
        self.pan.offset()
    }

    pub fn viewport_width(&self) -> i32 {
        self.pan.viewport_width()
    }

    pub fn is_dragging(&self) -> bool {
        self.pan.is_dragging()
    }

    pub fn press(&mut self, x: i32) {
        self.pan.press(x);
    }

    /// Returns true when the strip moved and needs a repaint
    pub fn drag(&mut self, x: i32) -> bool {
        self.pan.drag(x)
    }

    /// Finish a drag and move the cursor to the snapped image
    pub fn release(&mut self, x: i32) {
        if let Some(index) = self.pan.release(x) {
            self.focus(index);
        }
    }

    pub fn resize(&mut self, viewport_width: i32) {
        self.pan.resize(viewport_width);
    }

    pub fn next(&mut self) {
        let next = self.sequence.next().index();
        self.pan.focus_on_image(next);
        self.focus(next);
    }

    pub fn previous(&mut self) {
        let prev = self.sequence.prev().index();
        self.pan.focus_on_image(prev);
        self.focus(prev);
    }

    fn focus(&mut self, index: usize) {
        self.sequence = self.sequence.at(index);
        // Only the latest focus matters for preloading
        self.orders.clear();
        self.orders.paint(self.sequence.current(), self.pan.offset());
        self.evict_far_images();
    }

    /// Images that should be decoded now: every visible slot plus the
    /// preload window around each newly focused image, minus anything
    /// already decoded or requested.
    pub fn wanted_images(&mut self) -> Vec<String> {
        let len = self.sequence.len();
        let mut indices: Vec<usize> =
            viewport::visible_slots(self.pan.offset(), self.pan.viewport_width(), len)
                .into_iter()
                .map(|slot| slot.image_index)
                .collect();

        for order in self.orders.drain() {
            if let Some(center) = self.sequence.position_of(&order.image) {
                indices.push(center);
                for step in 1..=self.preload_radius.min(len) {
                    indices.push((center + step) % len);
                    indices.push((center + len - step % len) % len);
                }
            }
        }

        let mut wanted = Vec::new();
        for index in indices {
            let path = self.sequence.identifier(index);
            if self.decoded.contains_key(path)
                || self.in_flight.contains(path)
                || wanted.iter().any(|w: &String| w == path)
            {
                continue;
            }
            wanted.push(path.to_string());
        }
        wanted
    }

    /// Record that decodes for `paths` have been started
    pub fn mark_requested(&mut self, paths: &[String]) {
        self.in_flight.extend(paths.iter().cloned());
    }

    /// Store a finished decode. Results for images outside this folder are dropped.
    pub fn store_decoded(&mut self, path: String, result: Result<DecodedImage, DecodeError>) {
        self.in_flight.remove(&path);
        if !self.sequence.contains(&path) {
            tracing::debug!("Dropping decode result for stale image {}", path);
            return;
        }

        let entry = match result {
            Ok(image) => {
                tracing::debug!("Decoded {} ({}x{})", path, image.width, image.height);
                Decoded::Ready(image)
            }
            Err(err) => {
                tracing::warn!("{}", err);
                Decoded::Failed(err)
            }
        };
        self.decoded.insert(path, entry);
    }

    /// Decoded pixels for `path`, or why they cannot be drawn
    pub fn image(&self, path: &str) -> Result<&DecodedImage, DrawError> {
        match self.decoded.get(path) {
            Some(Decoded::Ready(image)) => Ok(image),
            Some(Decoded::Failed(err)) => Err(DrawError::Decode(err.clone())),
            None => Err(DrawError::Pending(path.to_string())),
        }
    }

    pub fn decoded_count(&self) -> usize {
        self.decoded.len()
    }

    /// Drop decoded images that are far from the focused one.
    /// The window is wide enough to cover every visible slot.
    fn evict_far_images(&mut self) {
        let len = self.sequence.len();
        let keep = self.preload_radius + 2;
        if 2 * keep + 1 >= len {
            return;
        }

        let center = self.sequence.index();
        let before = self.decoded.len();
        let sequence = &self.sequence;
        self.decoded.retain(|path, _| {
            sequence.position_of(path).is_some_and(|index| {
                let ahead = (index + len - center) % len;
                let behind = (center + len - index) % len;
                ahead.min(behind) <= keep
            })
        });

        let evicted = before - self.decoded.len();
        if evicted > 0 {
            tracing::debug!("Evicted {} decoded images", evicted);
        }
    }

    /// "name.png (2 / 5)"
    pub fn caption(&self) -> String {
        format!(
            "{} ({} / {})",
            display_name(self.sequence.current()),
            self.sequence.index() + 1,
            self.sequence.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::widget::image::Handle;

    fn paths(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("/photos/{i}.png")).collect()
    }

    fn ready() -> Result<DecodedImage, DecodeError> {
        Ok(DecodedImage {
            handle: Handle::from_rgba(1, 1, vec![0u8, 0, 0, 255]),
            width: 1,
            height: 1,
        })
    }

    #[test]
    fn test_empty_folder_is_rejected() {
        assert_eq!(Viewer::open(Vec::new(), 800, 2).unwrap_err(), SequenceError::Empty);
    }

    #[test]
    fn test_from_folder_errors() {
        let dir = tempfile::tempdir().unwrap();
        let options = ScanOptions::default();

        let empty = Viewer::from_folder(dir.path(), &options, 100, 1).unwrap_err();
        assert!(matches!(empty, crate::Error::Sequence(SequenceError::Empty)));

        let missing = Viewer::from_folder(&dir.path().join("nope"), &options, 100, 1).unwrap_err();
        assert!(matches!(missing, crate::Error::Scan(_)));
    }

    #[test]
    fn test_release_moves_cursor_to_snapped_image() {
        let mut viewer = Viewer::open(paths(3), 100, 1).unwrap();
        viewer.press(300);
        viewer.drag(200);
        viewer.release(160);

        assert_eq!(viewer.sequence().index(), 1);
        assert_eq!(viewer.offset(), -100);
        assert_eq!(viewer.caption(), "1.png (2 / 3)");
    }

    #[test]
    fn test_minimise_and_restore_keeps_strip_on_cursor() {
        let mut viewer = Viewer::open(paths(4), 100, 1).unwrap();
        viewer.next();
        viewer.next();

        viewer.resize(0);
        viewer.resize(100);

        assert_eq!(viewer.sequence().index(), 2);
        assert_eq!(viewer.offset(), -200);
        assert_eq!(viewer.caption(), "2.png (3 / 4)");
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let mut viewer = Viewer::open(paths(3), 100, 1).unwrap();
        viewer.previous();
        assert_eq!(viewer.sequence().index(), 2);
        assert_eq!(viewer.offset(), -200);

        viewer.next();
        assert_eq!(viewer.sequence().index(), 0);
        assert_eq!(viewer.offset(), 0);
    }

    #[test]
    fn test_wanted_images_cover_visible_and_preload() {
        let mut viewer = Viewer::open(paths(10), 100, 2).unwrap();

        let mut wanted = viewer.wanted_images();
        wanted.sort();

        let mut expected: Vec<String> = [8, 9, 0, 1, 2]
            .iter()
            .map(|i| format!("/photos/{i}.png"))
            .collect();
        expected.sort();
        assert_eq!(wanted, expected);

        viewer.mark_requested(&wanted);
        assert!(viewer.wanted_images().is_empty());
    }

    #[test]
    fn test_failed_decode_is_remembered() {
        let mut viewer = Viewer::open(paths(2), 100, 1).unwrap();
        let path = "/photos/1.png".to_string();
        viewer.mark_requested(&[path.clone()]);
        viewer.store_decoded(path.clone(), Err(DecodeError::NotFound(path.clone())));

        assert!(matches!(viewer.image(&path), Err(DrawError::Decode(_))));
        assert!(matches!(viewer.image("/photos/0.png"), Err(DrawError::Pending(_))));
        assert!(!viewer.wanted_images().contains(&path));
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let mut viewer = Viewer::open(paths(2), 100, 1).unwrap();
        viewer.store_decoded("/elsewhere/x.png".into(), ready());
        assert_eq!(viewer.decoded_count(), 0);
    }

    #[test]
    fn test_far_images_are_evicted() {
        let mut viewer = Viewer::open(paths(20), 100, 1).unwrap();
        for path in paths(20) {
            viewer.store_decoded(path, ready());
        }
        assert_eq!(viewer.decoded_count(), 20);

        viewer.next();

        // keep window: 3 on each side of image 1
        assert_eq!(viewer.decoded_count(), 7);
        assert!(viewer.image("/photos/4.png").is_ok());
        assert!(viewer.image("/photos/18.png").is_ok());
        assert!(matches!(viewer.image("/photos/10.png"), Err(DrawError::Pending(_))));
    }
}
