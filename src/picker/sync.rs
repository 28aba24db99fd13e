//! Centering of the selected entry inside a horizontal viewport
//!
//! The synchronizer never scrolls anything itself. It emits a `ScrollIntent`
//! that the presentation layer applies to its viewport.

/// Width and horizontal margin of one strip entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemGeometry {
    pub width: f64,
    pub spacing: f64,
}

impl ItemGeometry {
    pub const fn new(width: f64, spacing: f64) -> Self {
        Self { width, spacing }
    }

    /// Distance between the left edges of consecutive entries
    pub fn stride(&self) -> f64 {
        self.width + 2.0 * self.spacing
    }

    /// Total content width of `count` entries
    pub fn content_width(&self, count: usize) -> f64 {
        count as f64 * self.stride()
    }

    /// Entry under content coordinate `x`, or `None` on a margin
    pub fn index_at(&self, x: f64) -> Option<usize> {
        let stride = self.stride();
        if x < 0.0 || stride <= 0.0 {
            return None;
        }
        let index = (x / stride).floor();
        let within = x - index * stride;
        (within >= self.spacing && within < self.spacing + self.width).then_some(index as usize)
    }
}

/// Day entries: 55 wide with 8 on each side
pub const DAY_ITEM_GEOMETRY: ItemGeometry = ItemGeometry::new(55.0, 8.0);

/// Month entries: 150 wide, no margin
pub const MONTH_ITEM_GEOMETRY: ItemGeometry = ItemGeometry::new(150.0, 0.0);

/// Which strip of the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strip {
    Days,
    Months,
}

/// Request to scroll a strip to an offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollIntent {
    pub strip: Strip,
    pub offset: f64,
}

/// Scroll offset that puts the center of entry `index` at the center of the viewport
pub fn offset_for(index: usize, geometry: ItemGeometry, viewport_width: f64) -> f64 {
    let stride = geometry.stride();
    index as f64 * stride - viewport_width / 2.0 + stride / 2.0
}

/// Keeps one strip's selection centered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionSynchronizer {
    strip: Strip,
    geometry: ItemGeometry,
}

impl SelectionSynchronizer {
    pub const fn new(strip: Strip, geometry: ItemGeometry) -> Self {
        Self { strip, geometry }
    }

    pub const fn geometry(&self) -> ItemGeometry {
        self.geometry
    }

    /// Intent for the selected index; a missing index yields nothing
    pub fn intent(&self, index: Option<usize>, viewport_width: f64) -> Option<ScrollIntent> {
        index.map(|index| ScrollIntent {
            strip: self.strip,
            offset: offset_for(index, self.geometry, viewport_width),
        })
    }
}
