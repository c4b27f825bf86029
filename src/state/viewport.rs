/// Visible-slot computation and draw dispatch for the filmstrip
///
/// Slot `s` is a page position on the infinite strip; it shows image
/// `s mod image_count` at `x = s * width + normalized_offset`. One extra slot
/// on each side is always produced so partially visible pages at both edges
/// get drawn.
use crate::error::DrawError;
use crate::state::sequence::ImageSequence;

/// One page to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Index into the image sequence
    pub image_index: usize,
    /// Left edge in viewport pixels
    pub x: i32,
}

/// Pixel size of the display area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Request to draw one image scaled to fill a rectangle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCommand {
    pub identifier: String,
    pub x: i32,
    pub width: i32,
    pub height: i32,
}

/// Platform surface that decodes and blits images
pub trait DrawTarget {
    fn draw(&mut self, command: &DrawCommand) -> Result<(), DrawError>;
}

/// Outcome of one paint cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub drawn: usize,
    pub skipped: usize,
}

/// Slots that intersect (or touch) the viewport for a given offset
pub fn visible_slots(offset: i32, viewport_width: i32, image_count: usize) -> Vec<Slot> {
    let Ok(count) = i32::try_from(image_count) else {
        return Vec::new();
    };
    if count == 0 || viewport_width <= 0 {
        return Vec::new();
    }
    let Some(total) = viewport_width.checked_mul(count) else {
        return Vec::new();
    };

    let normalized = offset.rem_euclid(total);

    // One page before the first visible one through two after it (inclusive)
    let start = -(normalized / viewport_width) - 1;
    let end = start + 3;

    (start..=end)
        .map(|slot| Slot {
            image_index: slot.rem_euclid(count) as usize,
            x: slot * viewport_width + normalized,
        })
        .collect()
}

/// Draw every visible slot onto `target`.
///
/// A slot whose image cannot be drawn is skipped; the rest still render.
pub fn render(
    offset: i32,
    viewport: Viewport,
    sequence: &ImageSequence,
    target: &mut impl DrawTarget,
) -> RenderSummary {
    let mut summary = RenderSummary::default();

    for slot in visible_slots(offset, viewport.width, sequence.len()) {
        let command = DrawCommand {
            identifier: sequence.identifier(slot.image_index).to_string(),
            x: slot.x,
            width: viewport.width,
            height: viewport.height,
        };

        match target.draw(&command) {
            Ok(()) => summary.drawn += 1,
            Err(DrawError::Pending(path)) => {
                tracing::trace!("Slot at x={} waiting for {}", command.x, path);
                summary.skipped += 1;
            }
            Err(err) => {
                tracing::debug!("Skipping slot at x={}: {}", command.x, err);
                summary.skipped += 1;
            }
        }
    }

    summary
}

/// A queued request to show `image` at `offset`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintOrder {
    pub image: String,
    pub offset: i32,
}

/// Pending paint orders, flushed by each paint cycle
#[derive(Debug, Clone, Default)]
pub struct PaintOrders {
    orders: Vec<PaintOrder>,
}

impl PaintOrders {
    pub fn paint(&mut self, image: impl Into<String>, offset: i32) {
        self.orders.push(PaintOrder {
            image: image.into(),
            offset,
        });
    }

    pub fn clear(&mut self) {
        self.orders.clear();
    }

    /// Take every pending order, leaving the queue empty
    pub fn drain(&mut self) -> Vec<PaintOrder> {
        std::mem::take(&mut self.orders)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    fn slots(offset: i32, width: i32, count: usize) -> Vec<(usize, i32)> {
        visible_slots(offset, width, count)
            .into_iter()
            .map(|slot| (slot.image_index, slot.x))
            .collect()
    }

    #[test]
    fn test_slots_between_two_pages() {
        // normalized offset 250, slots -3..=0
        assert_eq!(
            slots(-150, 100, 4),
            vec![(1, -50), (2, 50), (3, 150), (0, 250)]
        );
    }

    #[test]
    fn test_slots_when_aligned_on_first_page() {
        assert_eq!(slots(0, 100, 3), vec![(2, -100), (0, 0), (1, 100), (2, 200)]);
    }

    #[test]
    fn test_unbounded_offset_matches_normalized() {
        assert_eq!(slots(-150 - 400 * 7, 100, 4), slots(-150, 100, 4));
        assert_eq!(slots(250, 100, 4), slots(-150, 100, 4));
    }

    #[test]
    fn test_viewport_is_always_covered() {
        for offset in (-900..900).step_by(13) {
            let slots = visible_slots(offset, 100, 3);
            assert!(slots.iter().any(|s| s.x <= 0 && s.x + 100 > 0));
            assert!(slots.iter().any(|s| s.x < 100 && s.x + 100 >= 100));
        }
    }

    #[test]
    fn test_no_slots_without_images_or_width() {
        assert!(visible_slots(-50, 100, 0).is_empty());
        assert!(visible_slots(-50, 0, 3).is_empty());
    }

    struct Recorder {
        broken: &'static str,
        drawn: Vec<DrawCommand>,
    }

    impl DrawTarget for Recorder {
        fn draw(&mut self, command: &DrawCommand) -> Result<(), DrawError> {
            if command.identifier == self.broken {
                return Err(DecodeError::NotFound(command.identifier.clone()).into());
            }
            self.drawn.push(command.clone());
            Ok(())
        }
    }

    #[test]
    fn test_render_skips_failing_slots() {
        let sequence = ImageSequence::new(vec![
            "/a.png".to_string(),
            "/b.png".to_string(),
            "/c.png".to_string(),
            "/d.png".to_string(),
        ])
        .unwrap();
        let mut target = Recorder {
            broken: "/c.png",
            drawn: Vec::new(),
        };

        let summary = render(-150, Viewport::new(100, 80), &sequence, &mut target);

        assert_eq!(summary, RenderSummary { drawn: 3, skipped: 1 });
        let drawn: Vec<_> = target
            .drawn
            .iter()
            .map(|c| (c.identifier.as_str(), c.x))
            .collect();
        assert_eq!(drawn, vec![("/b.png", -50), ("/d.png", 150), ("/a.png", 250)]);
        assert!(target.drawn.iter().all(|c| c.width == 100 && c.height == 80));
    }

    #[test]
    fn test_paint_orders_flush() {
        let mut orders = PaintOrders::default();
        orders.paint("/a.png", 0);
        orders.paint("/b.png", -100);
        assert_eq!(orders.len(), 2);

        let flushed = orders.drain();
        assert_eq!(flushed[1], PaintOrder { image: "/b.png".into(), offset: -100 });
        assert!(orders.is_empty());

        orders.paint("/c.png", 5);
        orders.clear();
        assert!(orders.drain().is_empty());
    }
}
