/// Scroll position of a 2D viewport over content measured in cells.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewportState {
    pub x: u32,
    pub y: u32,
    pub viewport_w: u16,
    pub viewport_h: u16,
    pub content_w: u32,
    pub content_h: u32,
}

impl ViewportState {
    pub fn set_viewport(&mut self, w: u16, h: u16) {
        self.viewport_w = w;
        self.viewport_h = h;
        self.clamp();
    }

    pub fn set_content(&mut self, w: u32, h: u32) {
        self.content_w = w;
        self.content_h = h;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.y = self.y.min(self.max_y());
        self.x = self.x.min(self.max_x());
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        self.y = (self.y as i64 + delta as i64).clamp(0, self.max_y() as i64) as u32;
    }

    /// Scrolls vertically the minimum amount needed to show content row `row`.
    pub fn ensure_y_visible(&mut self, row: u32) {
        if row < self.y {
            self.y = row;
        } else if self.viewport_h > 0 && row >= self.y + self.viewport_h as u32 {
            self.y = row + 1 - self.viewport_h as u32;
        }
        self.clamp();
    }

    /// Scrolls horizontally so `[start, start + len)` is visible, preferring its left edge.
    pub fn ensure_x_visible(&mut self, start: u32, len: u32) {
        if self.viewport_w == 0 {
            return;
        }
        let end = start.saturating_add(len);
        if start < self.x || len >= self.viewport_w as u32 {
            self.x = start;
        } else if end > self.x + self.viewport_w as u32 {
            self.x = end - self.viewport_w as u32;
        }
        self.clamp();
    }

    pub fn percent_y(&self) -> Option<u8> {
        if self.viewport_h == 0 || self.content_h <= self.viewport_h as u32 {
            return None;
        }
        let visible_bottom = self.y.saturating_add(self.viewport_h as u32) as f64;
        let pct = (visible_bottom / self.content_h as f64 * 100.0).round();
        Some(pct.clamp(0.0, 100.0) as u8)
    }

    fn max_y(&self) -> u32 {
        self.content_h.saturating_sub(self.viewport_h as u32)
    }

    fn max_x(&self) -> u32 {
        self.content_w.saturating_sub(self.viewport_w as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_clamps_both_axes() {
        let mut s = ViewportState::default();
        s.set_viewport(10, 5);
        s.set_content(12, 6);
        s.x = 99;
        s.y = 99;
        s.clamp();
        assert_eq!(s.x, 2);
        assert_eq!(s.y, 1);
    }

    #[test]
    fn ensure_y_visible_scrolls_minimally() {
        let mut s = ViewportState::default();
        s.set_viewport(10, 3);
        s.set_content(10, 20);
        s.ensure_y_visible(5);
        assert_eq!(s.y, 3);
        s.ensure_y_visible(4);
        assert_eq!(s.y, 3);
        s.ensure_y_visible(1);
        assert_eq!(s.y, 1);
    }

    #[test]
    fn ensure_x_visible_reveals_column() {
        let mut s = ViewportState::default();
        s.set_viewport(10, 3);
        s.set_content(40, 3);
        s.ensure_x_visible(12, 5);
        assert_eq!(s.x, 7);
        s.ensure_x_visible(2, 5);
        assert_eq!(s.x, 2);
    }
}
