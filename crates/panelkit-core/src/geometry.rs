//! Panel rectangles, resize handles and hit-testing.

use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Side length of a handle hit-box in document pixels.
pub const HANDLE_SIZE: i32 = 16;
/// Smallest edge length a handle resize can produce.
pub const MIN_RESIZE_EXTENT: i32 = 20;

/// An axis-aligned panel rectangle in document pixels.
///
/// Serialized as the 4-tuple `[x, y, width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct PanelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PanelRect {
    /// Create a new rectangle.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate of the right edge.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Y coordinate of the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Whether the rectangle may be committed to a document.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Area in square document pixels.
    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    /// Check if a point lies inside the rectangle (edges included).
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Convert to a kurbo rectangle for rendering.
    pub fn to_kurbo(&self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.right()),
            f64::from(self.bottom()),
        )
    }
}

impl From<[i32; 4]> for PanelRect {
    fn from([x, y, width, height]: [i32; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

impl From<PanelRect> for [i32; 4] {
    fn from(rect: PanelRect) -> Self {
        [rect.x, rect.y, rect.width, rect.height]
    }
}

/// Minimal rectangle covering every input. Returns `None` for an empty input.
pub fn union<'a, I>(rects: I) -> Option<PanelRect>
where
    I: IntoIterator<Item = &'a PanelRect>,
{
    let mut iter = rects.into_iter();
    let first = iter.next()?;
    let (mut min_x, mut min_y) = (first.x, first.y);
    let (mut max_x, mut max_y) = (first.right(), first.bottom());

    for rect in iter {
        min_x = min_x.min(rect.x);
        min_y = min_y.min(rect.y);
        max_x = max_x.max(rect.right());
        max_y = max_y.max(rect.bottom());
    }

    Some(PanelRect::new(min_x, min_y, max_x - min_x, max_y - min_y))
}

/// Resize handles on the active panel.
///
/// Declaration order is the hit-test order: corners first, then edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandleKind {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Right,
    Bottom,
    Left,
}

impl HandleKind {
    /// All handles in hit-test order.
    pub const ALL: [HandleKind; 8] = [
        HandleKind::TopLeft,
        HandleKind::TopRight,
        HandleKind::BottomLeft,
        HandleKind::BottomRight,
        HandleKind::Top,
        HandleKind::Right,
        HandleKind::Bottom,
        HandleKind::Left,
    ];

    /// Anchor point of the handle on the given rectangle.
    fn anchor(self, rect: &PanelRect) -> (i32, i32) {
        let mid_x = rect.x + rect.width / 2;
        let mid_y = rect.y + rect.height / 2;
        match self {
            HandleKind::TopLeft => (rect.x, rect.y),
            HandleKind::TopRight => (rect.right(), rect.y),
            HandleKind::BottomLeft => (rect.x, rect.bottom()),
            HandleKind::BottomRight => (rect.right(), rect.bottom()),
            HandleKind::Top => (mid_x, rect.y),
            HandleKind::Right => (rect.right(), mid_y),
            HandleKind::Bottom => (mid_x, rect.bottom()),
            HandleKind::Left => (rect.x, mid_y),
        }
    }
}

/// Hit-boxes of all eight handles, centered on corners and edge midpoints.
pub fn handle_rects(rect: &PanelRect, handle_size: i32) -> [(HandleKind, PanelRect); 8] {
    HandleKind::ALL.map(|kind| {
        let (cx, cy) = kind.anchor(rect);
        let half = handle_size / 2;
        (
            kind,
            PanelRect::new(cx.saturating_sub(half), cy.saturating_sub(half), handle_size, handle_size),
        )
    })
}

/// First handle whose hit-box contains the point.
pub fn handle_at(rect: &PanelRect, x: i32, y: i32, handle_size: i32) -> Option<HandleKind> {
    handle_rects(rect, handle_size)
        .into_iter()
        .find(|(_, hit_box)| hit_box.contains(x, y))
        .map(|(kind, _)| kind)
}

/// Apply a handle drag to `original`, never letting a resized edge fall below
/// `min_extent`. The pointer position is absolute in document pixels and may
/// lie anywhere, including far outside the page.
pub fn resize_with_handle(
    original: &PanelRect,
    handle: HandleKind,
    x: i32,
    y: i32,
    min_extent: i32,
) -> PanelRect {
    let right = original.right();
    let bottom = original.bottom();
    let mut rect = *original;

    // Left and top edges stop where the width would no longer fit in an i32,
    // so the opposite edge stays put.
    let drag_left = |rect: &mut PanelRect| {
        rect.x = x
            .max(right.saturating_sub(i32::MAX))
            .min(right.saturating_sub(min_extent));
        rect.width = right - rect.x;
    };
    let drag_top = |rect: &mut PanelRect| {
        rect.y = y
            .max(bottom.saturating_sub(i32::MAX))
            .min(bottom.saturating_sub(min_extent));
        rect.height = bottom - rect.y;
    };
    let drag_right = |rect: &mut PanelRect| {
        rect.width = min_extent.max(x.saturating_sub(original.x));
    };
    let drag_bottom = |rect: &mut PanelRect| {
        rect.height = min_extent.max(y.saturating_sub(original.y));
    };

    match handle {
        HandleKind::TopLeft => {
            drag_left(&mut rect);
            drag_top(&mut rect);
        }
        HandleKind::TopRight => {
            drag_top(&mut rect);
            drag_right(&mut rect);
        }
        HandleKind::BottomLeft => {
            drag_left(&mut rect);
            drag_bottom(&mut rect);
        }
        HandleKind::BottomRight => {
            drag_right(&mut rect);
            drag_bottom(&mut rect);
        }
        HandleKind::Top => drag_top(&mut rect),
        HandleKind::Right => drag_right(&mut rect),
        HandleKind::Bottom => drag_bottom(&mut rect),
        HandleKind::Left => drag_left(&mut rect),
    }

    rect
}
