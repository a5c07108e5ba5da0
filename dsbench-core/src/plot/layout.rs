//! Near-square subplot grid

/// A `side × side` grid holding `count` panels in row-major order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    side: usize,
    count: usize,
}

impl GridLayout {
    /// Smallest square grid that fits `count` panels
    #[must_use]
    pub const fn for_count(count: usize) -> Self {
        let root = count.isqrt();
        let side = if root * root == count { root } else { root + 1 };
        Self { side, count }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.side
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.side
    }

    /// Number of panels placed in the grid
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Total number of cells, including unused ones
    #[must_use]
    pub const fn cells(&self) -> usize {
        self.side * self.side
    }

    /// 1-based cell number of the panel at `index`
    #[must_use]
    pub const fn cell_number(&self, index: usize) -> usize {
        index + 1
    }

    /// `(row, column)` of the panel at `index`
    #[must_use]
    pub const fn position(&self, index: usize) -> (usize, usize) {
        (index / self.side, index % self.side)
    }
}
