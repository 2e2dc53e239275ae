use crate::scroll::Axis;

/// Live interaction state, created once per controller and updated in place
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragState {
    pub is_pointer_down: bool,
    pub is_dragging_x: bool,
    pub is_dragging_y: bool,
    /// Pointer position at press
    pub initial_pointer_x: f64,
    pub initial_pointer_y: f64,
    /// Pointer position at the previous move sample
    pub last_pointer_x: f64,
    pub last_pointer_y: f64,
    /// Signed velocity in px per tick period
    pub scroll_speed_x: f64,
    pub scroll_speed_y: f64,
    /// Last offset written by the controller (the container's own is authoritative)
    pub last_scroll_x: f64,
    pub last_scroll_y: f64,
    /// A rubber-band transform was written during this interaction
    pub rubber_band_applied: bool,
    /// Pointer position where each axis started pushing against its edge
    pub rubber_band_origin_x: Option<f64>,
    pub rubber_band_origin_y: Option<f64>,
}

impl DragState {
    /// Begin an interaction at (x, y)
    pub fn press(&mut self, x: f64, y: f64) {
        self.is_pointer_down = true;
        self.initial_pointer_x = x;
        self.initial_pointer_y = y;
        self.last_pointer_x = x;
        self.last_pointer_y = y;
        self.rubber_band_applied = false;
        self.rubber_band_origin_x = None;
        self.rubber_band_origin_y = None;
    }

    /// End the pointer part of an interaction; momentum may continue
    pub fn release(&mut self) {
        self.is_pointer_down = false;
        self.last_pointer_x = 0.0;
        self.last_pointer_y = 0.0;
        self.rubber_band_origin_x = None;
        self.rubber_band_origin_y = None;
    }

    pub fn clear_dragging(&mut self) {
        self.is_dragging_x = false;
        self.is_dragging_y = false;
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.is_dragging_x || self.is_dragging_y
    }

    #[inline]
    pub fn speed(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.scroll_speed_x,
            Axis::Y => self.scroll_speed_y,
        }
    }

    #[inline]
    pub fn set_speed(&mut self, axis: Axis, speed: f64) {
        match axis {
            Axis::X => self.scroll_speed_x = speed,
            Axis::Y => self.scroll_speed_y = speed,
        }
    }

    pub fn set_last_scroll(&mut self, axis: Axis, offset: f64) {
        match axis {
            Axis::X => self.last_scroll_x = offset,
            Axis::Y => self.last_scroll_y = offset,
        }
    }

    /// Pointer travel on each axis since press
    pub fn travel(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.initial_pointer_x, y - self.initial_pointer_y)
    }

    pub fn rubber_band_origin_mut(&mut self, axis: Axis) -> &mut Option<f64> {
        match axis {
            Axis::X => &mut self.rubber_band_origin_x,
            Axis::Y => &mut self.rubber_band_origin_y,
        }
    }
}
