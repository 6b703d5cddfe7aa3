//! Axis-aligned bounding box collision: overlap test, impact side classification and
//! position resolution. Pure geometry; callers decide what happens to velocities.

use glam::Vec2;

/// Axis-aligned rectangle. `pos` is the top-left corner, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Whether the horizontal extents overlap (open intervals).
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }
}

/// Anything with a collision rectangle.
pub trait Bounded {
    fn bounds(&self) -> Aabb;
}

impl Bounded for Aabb {
    fn bounds(&self) -> Aabb {
        *self
    }
}

/// Which face of the static rectangle the moving rectangle hit.
/// `Top` means the mover sits on top of the static body (landing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Standard AABB overlap. Touching edges do not count.
pub fn check_collision(a: &Aabb, b: &Aabb) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Classify the dominant axis of penetration of `moving` into `fixed`.
///
/// Compares the center-to-center offset against the combined half extents (cross-product
/// test), so a wide platform is hit from the top over most of its width and from the side
/// only near its edges. Returns `None` when the rectangles don't overlap.
pub fn collision_side(moving: &Aabb, fixed: &Aabb) -> Option<Side> {
    if !check_collision(moving, fixed) {
        return None;
    }

    let delta = moving.center() - fixed.center();
    let half_w = (moving.size.x + fixed.size.x) * 0.5;
    let half_h = (moving.size.y + fixed.size.y) * 0.5;

    let cross_w = half_w * delta.y;
    let cross_h = half_h * delta.x;

    let side = if cross_w > cross_h {
        if cross_w > -cross_h {
            Side::Bottom
        } else {
            Side::Left
        }
    } else if cross_w > -cross_h {
        Side::Right
    } else {
        Side::Top
    };
    Some(side)
}

/// Snap `moving` flush against the given face of `fixed`.
pub fn resolve_collision(moving: &mut Aabb, fixed: &Aabb, side: Side) {
    match side {
        Side::Top => moving.pos.y = fixed.top() - moving.size.y,
        Side::Bottom => moving.pos.y = fixed.bottom(),
        Side::Left => moving.pos.x = fixed.left() - moving.size.x,
        Side::Right => moving.pos.x = fixed.right(),
    }
}
