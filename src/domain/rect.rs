/// Integer screen-space rectangle, origin at the top-left corner.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// True if the point lies strictly inside; edges do not count.
    pub const fn contains_strict(&self, px: i32, py: i32) -> bool {
        px > self.x
            && px < self.x.saturating_add(self.w)
            && py > self.y
            && py < self.y.saturating_add(self.h)
    }

    /// Move the origin, keeping the size.
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_interior_point() {
        let r = Rect::new(10, 20, 10, 10);
        assert!(r.contains_strict(15, 25));
    }

    #[test]
    fn test_edges_are_excluded() {
        let r = Rect::new(10, 20, 10, 10);
        assert!(!r.contains_strict(10, 25));
        assert!(!r.contains_strict(20, 25));
        assert!(!r.contains_strict(15, 20));
        assert!(!r.contains_strict(15, 30));
    }
}
