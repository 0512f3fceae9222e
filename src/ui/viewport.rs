pub struct Viewport {
    pub start_line: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(start_line: usize, height: usize) -> Self {
        Self { start_line, height }
    }

    pub fn scroll_down(&mut self) {
        self.start_line = self.start_line.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.start_line = self.start_line.saturating_sub(1);
    }

    pub fn scroll_down_page(&mut self) {
        self.start_line = self.start_line.saturating_add(self.height / 2);
    }

    pub fn scroll_up_page(&mut self) {
        self.start_line = self.start_line.saturating_sub(self.height / 2);
    }

    /// Scrolls just enough to keep `line` on screen.
    pub fn follow(&mut self, line: usize) {
        if line < self.start_line {
            self.start_line = line;
        } else if self.height > 0 && line >= self.start_line + self.height {
            self.start_line = line + 1 - self.height;
        }
    }

    /// Clamps the scroll position against the total line count.
    pub fn clamp(&mut self, total_lines: usize) {
        let max_start = total_lines.saturating_sub(self.height);
        if self.start_line > max_start {
            self.start_line = max_start;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_keeps_line_visible() {
        let mut vp = Viewport::new(0, 10);
        vp.follow(25);
        assert_eq!(vp.start_line, 16);
        vp.follow(5);
        assert_eq!(vp.start_line, 5);
        vp.follow(7);
        assert_eq!(vp.start_line, 5);
    }

    #[test]
    fn test_clamp_limits_overscroll() {
        let mut vp = Viewport::new(100, 10);
        vp.clamp(30);
        assert_eq!(vp.start_line, 20);
        vp.clamp(5);
        assert_eq!(vp.start_line, 0);
    }
}
