//! L4 Atomic Layer: Container geometry and edge detection

/// Scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];
}

/// Content and viewport sizes of a scroll container
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extents {
    pub content_width: f64,
    pub content_height: f64,
    pub visible_width: f64,
    pub visible_height: f64,
}

impl Extents {
    pub fn visible(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.visible_width,
            Axis::Y => self.visible_height,
        }
    }

    /// Largest reachable scroll offset on `axis`
    pub fn max_scroll(&self, axis: Axis) -> f64 {
        let content = match axis {
            Axis::X => self.content_width,
            Axis::Y => self.content_height,
        };
        (content - self.visible(axis)).max(0.0)
    }
}

/// Whether a computed `overflow-x`/`overflow-y` value lets the user scroll
#[inline]
pub fn overflow_permits_scroll(overflow: &str) -> bool {
    matches!(overflow.trim(), "auto" | "scroll" | "overlay")
}

/// Cached scroll capability of the container, refreshed on mount and resize
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContainerGeometry {
    pub is_scrollable_x: bool,
    pub is_scrollable_y: bool,
    pub max_scroll_x: f64,
    pub max_scroll_y: f64,
}

impl ContainerGeometry {
    pub fn from_parts(overflow_x: &str, overflow_y: &str, extents: Extents) -> Self {
        Self {
            is_scrollable_x: overflow_permits_scroll(overflow_x),
            is_scrollable_y: overflow_permits_scroll(overflow_y),
            max_scroll_x: extents.max_scroll(Axis::X),
            max_scroll_y: extents.max_scroll(Axis::Y),
        }
    }

    #[inline]
    pub fn is_scrollable(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.is_scrollable_x,
            Axis::Y => self.is_scrollable_y,
        }
    }

    #[inline]
    pub fn max_scroll(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.max_scroll_x,
            Axis::Y => self.max_scroll_y,
        }
    }

    /// True when `axis` scrolls and `offset` sits at (or beyond) either end
    pub fn is_at_edge(&self, axis: Axis, offset: f64) -> bool {
        self.is_scrollable(axis) && (offset <= 0.0 || offset >= self.max_scroll(axis))
    }
}
