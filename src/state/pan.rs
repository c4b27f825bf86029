/// Drag-to-pan controller for the filmstrip
///
/// The filmstrip is a row of viewport-wide pages, one per image, repeating
/// forever in both directions. The offset is how far the strip has been
/// moved relative to the viewport's left edge, in pixels.
///
/// While dragging, deltas accumulate without bound so the strip follows the
/// pointer exactly. On release the offset is folded back into
/// `(-total_width, 0]` and snapped onto the page that is more than half
/// visible.

/// Pointer-driven pan state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanController {
    offset: i32,
    drag_anchor: Option<i32>,
    viewport_width: i32,
    image_count: usize,
    /// Last page the strip was aligned on, kept across zero-width viewports
    focused: usize,
}

impl PanController {
    pub fn new(viewport_width: i32, image_count: usize) -> Self {
        Self {
            offset: 0,
            drag_anchor: None,
            viewport_width: viewport_width.max(0),
            image_count,
            focused: 0,
        }
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn viewport_width(&self) -> i32 {
        self.viewport_width
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Width of one full cycle of the strip, `None` when there is nothing to pan
    fn total_width(&self) -> Option<i32> {
        let count = i32::try_from(self.image_count).ok()?;
        let total = self.viewport_width.checked_mul(count)?;
        (total > 0).then_some(total)
    }

    /// Pointer pressed: remember where the drag started
    pub fn press(&mut self, x: i32) {
        self.drag_anchor = Some(x);
    }

    /// Pointer moved while pressed. Returns true when the strip moved.
    pub fn drag(&mut self, x: i32) -> bool {
        let Some(anchor) = self.drag_anchor else {
            return false;
        };

        let delta = x - anchor;
        self.offset = self.offset.saturating_add(delta);
        self.drag_anchor = Some(x);
        delta != 0
    }

    /// Pointer released: apply the last delta, then snap.
    /// Returns the index of the image now in focus.
    pub fn release(&mut self, x: i32) -> Option<usize> {
        if let Some(anchor) = self.drag_anchor.take() {
            self.offset = self.offset.saturating_add(x - anchor);
        }
        self.snap()
    }

    /// Fold the offset into one cycle and align it on the most visible page.
    /// A no-op (returning `None`) when there are no images or no width.
    pub fn snap(&mut self) -> Option<usize> {
        let total = self.total_width()?;

        self.offset %= total;
        if self.offset > 0 {
            self.offset -= total;
        }

        let index = Self::round_to_page(self.offset, self.viewport_width, self.image_count);
        self.focus_on_image(index);
        Some(index)
    }

    /// Index the strip would snap to from the current offset, without moving it
    pub fn focused_index(&self) -> Option<usize> {
        let total = self.total_width()?;
        let mut offset = self.offset % total;
        if offset > 0 {
            offset -= total;
        }
        Some(Self::round_to_page(offset, self.viewport_width, self.image_count))
    }

    /// Page under a normalized offset, rounding up once more than half of
    /// the following page is showing
    fn round_to_page(offset: i32, width: i32, count: usize) -> usize {
        let shifted = -offset;
        let mut index = shifted / width;
        if shifted % width > width / 2 {
            index += 1;
        }

        let count = count as i32;
        ((index % count + count) % count) as usize
    }

    /// Jump straight to an image
    pub fn focus_on_image(&mut self, index: usize) {
        if self.image_count == 0 {
            self.offset = 0;
            return;
        }

        self.focused = index % self.image_count;
        let index = self.focused as i32;
        self.offset = -index.saturating_mul(self.viewport_width);
    }

    /// The viewport changed size: keep the focused image aligned.
    /// Mid-drag only the width is updated; the release snap realigns.
    pub fn resize(&mut self, viewport_width: i32) {
        let viewport_width = viewport_width.max(0);
        if viewport_width == self.viewport_width {
            return;
        }

        self.viewport_width = viewport_width;

        if self.is_dragging() || self.image_count == 0 {
            return;
        }

        self.focus_on_image(self.focused);
    }
}
