//! Pan/zoom state for the displayed map, independent of image content.
//!
//! The "is a map displayed" guard lives in [`crate::session::MapSession`]; the
//! controller here only enforces the scale bounds.

pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 10.0;
pub const DEFAULT_SCALE: f32 = 1.0;
pub const WHEEL_ZOOM_STEP: f32 = 0.1;
pub const BUTTON_ZOOM_STEP: f32 = 0.2;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub scale: f32,
    pub offset: Point,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            offset: Point::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct DragState {
    active: bool,
    anchor: Point,
}

#[derive(Debug, Clone, Default)]
pub struct Viewport {
    state: ViewportState,
    drag: DragState,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn scale(&self) -> f32 {
        self.state.scale
    }

    pub fn offset(&self) -> Point {
        self.state.offset
    }

    /// `(scale, offset)` to apply when drawing the map.
    pub fn transform(&self) -> (f32, Point) {
        (self.state.scale, self.state.offset)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    pub fn reset(&mut self) {
        self.state = ViewportState::default();
    }

    pub fn zoom(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.state.scale = (self.state.scale + delta).clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Browser-style wheel: negative `delta_y` scrolls up and zooms in.
    pub fn wheel(&mut self, delta_y: f32) {
        let step = if delta_y > 0.0 {
            -WHEEL_ZOOM_STEP
        } else {
            WHEEL_ZOOM_STEP
        };
        self.zoom(step);
    }

    pub fn begin_drag(&mut self, pointer: Point) {
        self.drag = DragState {
            active: true,
            anchor: pointer - self.state.offset,
        };
    }

    pub fn continue_drag(&mut self, pointer: Point) {
        if !self.drag.active {
            return;
        }
        self.state.offset = pointer - self.drag.anchor;
    }

    pub fn end_drag(&mut self) {
        self.drag.active = false;
    }
}
