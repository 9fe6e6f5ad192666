//! Screen-space geometry shared by the window chrome and note persistence.
//!
//! All values are physical pixels. Window geometry is signed because frameless
//! windows can be dragged partly off-screen and resizing without a minimum
//! clamp can drive width/height through zero.

/// A point in either window-local or global screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// |dx| + |dy|, used for click-vs-drag decisions
    #[inline]
    pub fn manhattan_length(self) -> i32 {
        self.x.abs() + self.y.abs()
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Window position and size: (x, y, width, height)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowGeometry {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn translated(self, delta: Point) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// True when `other` lies completely inside `self`
    pub fn contains(&self, other: &WindowGeometry) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Same size, centered inside `screen`
    pub fn centered_in(self, screen: &WindowGeometry) -> Self {
        Self::new(
            screen.x + (screen.width - self.width) / 2,
            screen.y + (screen.height - self.height) / 2,
            self.width,
            self.height,
        )
    }

    /// Keep geometry that fits the screen, otherwise recenter it keeping its size
    pub fn fit_to_screen(self, screen: &WindowGeometry) -> Self {
        if screen.contains(&self) {
            self
        } else {
            self.centered_in(screen)
        }
    }

    /// Window-local coordinates for a global point
    pub fn to_local(&self, global: Point) -> Point {
        global - self.origin()
    }

    /// (x, y, width, height) as stored in note files
    pub fn to_array(self) -> [i32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    pub fn from_slice(values: &[i32]) -> Option<Self> {
        match values {
            [x, y, w, h] => Some(Self::new(*x, *y, *w, *h)),
            _ => None,
        }
    }
}

/// A rectangular region in window-local pixel coordinates (layout and hit testing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Region {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Overlap of two regions; empty regions come back with zero size
    pub fn intersect(&self, other: &Region) -> Region {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Region::new(x, y, (right - x).max(0), (bottom - y).max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_length() {
        assert_eq!(Point::new(3, -4).manhattan_length(), 7);
        assert_eq!((Point::new(10, 10) - Point::new(12, 7)).manhattan_length(), 5);
    }

    #[test]
    fn test_contains_requires_full_overlap() {
        let screen = WindowGeometry::new(0, 0, 1920, 1040);
        assert!(screen.contains(&WindowGeometry::new(100, 100, 300, 200)));
        assert!(screen.contains(&WindowGeometry::new(1620, 840, 300, 200)));
        // One pixel past the right edge
        assert!(!screen.contains(&WindowGeometry::new(1621, 840, 300, 200)));
        assert!(!screen.contains(&WindowGeometry::new(-1, 0, 300, 200)));
    }

    #[test]
    fn test_fit_to_screen_recenters_outside_geometry() {
        let screen = WindowGeometry::new(0, 40, 1920, 1000);
        let stored = WindowGeometry::new(5000, -3000, 300, 200);
        let fitted = stored.fit_to_screen(&screen);
        assert_eq!(fitted, WindowGeometry::new(810, 440, 300, 200));
    }

    #[test]
    fn test_fit_to_screen_keeps_visible_geometry() {
        let screen = WindowGeometry::new(0, 0, 1920, 1080);
        let stored = WindowGeometry::new(40, 60, 300, 200);
        assert_eq!(stored.fit_to_screen(&screen), stored);
    }

    #[test]
    fn test_from_slice_needs_four_values() {
        assert_eq!(
            WindowGeometry::from_slice(&[1, 2, 3, 4]),
            Some(WindowGeometry::new(1, 2, 3, 4))
        );
        assert_eq!(WindowGeometry::from_slice(&[1, 2, 3]), None);
        assert_eq!(WindowGeometry::from_slice(&[1, 2, 3, 4, 5]), None);
    }

    #[test]
    fn test_region_intersect() {
        let a = Region::new(0, 0, 100, 50);
        let b = Region::new(80, 40, 100, 100);
        assert_eq!(a.intersect(&b), Region::new(80, 40, 20, 10));
        assert!(a.intersect(&Region::new(200, 200, 5, 5)).is_empty());
    }
}
