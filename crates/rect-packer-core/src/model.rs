use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle. `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }
    /// Inclusive right edge coordinate (`x + w - 1`).
    pub fn right(&self) -> u32 {
        self.x + self.w.saturating_sub(1)
    }
    /// Inclusive bottom edge coordinate (`y + h - 1`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h.saturating_sub(1)
    }
    /// Returns true if `r` is fully inside `self` (inclusive edges).
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
    /// Returns true if `self` and `r` share interior area. Touching edges do
    /// not count as an intersection.
    pub fn intersects(&self, r: &Rect) -> bool {
        self.x < r.x + r.w && r.x < self.x + self.w && self.y < r.y + r.h && r.y < self.y + self.h
    }
}

/// Statistics about how full a bin is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BinStats {
    /// Number of rectangles placed so far.
    pub num_placed: usize,
    /// Canvas area (width * height).
    pub total_area: u64,
    /// Area covered by placed rectangles.
    pub used_area: u64,
    /// Occupancy ratio: used_area / total_area (0.0 to 1.0).
    pub occupancy: f64,
}

impl BinStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Placed: {}, Occupancy: {:.2}%, Total Area: {} px², Used Area: {} px²",
            self.num_placed,
            self.occupancy * 100.0,
            self.total_area,
            self.used_area,
        )
    }

    /// Returns unoccupied space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.total_area.saturating_sub(self.used_area)
    }

    /// Returns unoccupied space as a percentage (0.0 to 100.0).
    pub fn waste_percentage(&self) -> f64 {
        if self.total_area > 0 {
            (self.wasted_area() as f64 / self.total_area as f64) * 100.0
        } else {
            0.0
        }
    }
}
