//! Mapping from pointer (display) coordinates to document pixels.

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Maps display-space pointer positions onto a page's pixel grid.
///
/// The page is shown inside `bounds` (on-screen box, display pixels) while
/// its intrinsic size is `intrinsic` (document pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMapper {
    /// On-screen bounding box of the canvas.
    pub bounds: Rect,
    /// Intrinsic pixel size of the canvas (the page size).
    pub intrinsic: Size,
}

impl CanvasMapper {
    /// Create a mapper for a canvas shown at `bounds`.
    pub fn new(bounds: Rect, intrinsic: Size) -> Self {
        Self { bounds, intrinsic }
    }

    /// Mapper for a canvas displayed at its intrinsic size at the origin.
    pub fn identity(intrinsic: Size) -> Self {
        Self::new(Rect::from_origin_size(Point::ORIGIN, intrinsic), intrinsic)
    }

    /// Display-to-document scale factors. Degenerate bounds map 1:1.
    pub fn scale(&self) -> Vec2 {
        let sx = if self.bounds.width() > 0.0 {
            self.intrinsic.width / self.bounds.width()
        } else {
            1.0
        };
        let sy = if self.bounds.height() > 0.0 {
            self.intrinsic.height / self.bounds.height()
        } else {
            1.0
        };
        Vec2::new(sx, sy)
    }

    /// Affine transform from display space to document space.
    pub fn transform(&self) -> Affine {
        let scale = self.scale();
        Affine::scale_non_uniform(scale.x, scale.y) * Affine::translate(-self.bounds.origin().to_vec2())
    }

    /// Map a display position to integer document coordinates (floored).
    pub fn to_document(&self, display: Point) -> (i32, i32) {
        let doc = self.transform() * display;
        (doc.x.floor() as i32, doc.y.floor() as i32)
    }

    /// Clamp a display position to the canvas bounds.
    pub fn clamp_to_bounds(&self, display: Point) -> Point {
        Point::new(
            display.x.clamp(self.bounds.x0, self.bounds.x1.max(self.bounds.x0)),
            display.y.clamp(self.bounds.y0, self.bounds.y1.max(self.bounds.y0)),
        )
    }

    /// Clamp to the canvas bounds, then map to document coordinates.
    pub fn to_document_clamped(&self, display: Point) -> (i32, i32) {
        self.to_document(self.clamp_to_bounds(display))
    }
}
