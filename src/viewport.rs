use bevy::prelude::*;

/// Axis-aligned world-space region observed by a security camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl ViewRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Result<Self, String> {
        if ![x, y, w, h].iter().all(|v| v.is_finite()) {
            return Err(format!("view rect ({x}, {y}, {w}, {h}) is not finite"));
        }
        if w <= 0.0 {
            return Err(format!("view rect width must be positive, got {w}"));
        }
        if h <= 0.0 {
            return Err(format!("view rect height must be positive, got {h}"));
        }
        Ok(Self { x, y, w, h })
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect.
    pub fn intersects(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        self.x < x + w && x < self.x + self.w && self.y < y + h && y < self.y + self.h
    }

    /// Whether the bounding box of a circle overlaps this rect.
    pub fn intersects_circle_bounds(&self, center: Vec2, radius: f32) -> bool {
        self.intersects(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    /// Overlapping part of `(x, y, w, h)` with this rect, if any.
    pub fn clip(&self, x: f32, y: f32, w: f32, h: f32) -> Option<(Vec2, Vec2)> {
        if !self.intersects(x, y, w, h) {
            return None;
        }
        let min = Vec2::new(x.max(self.x), y.max(self.y));
        let max = Vec2::new((x + w).min(self.x + self.w), (y + h).min(self.y + self.h));
        Some((min, max))
    }
}

/// World ↔ screen mapping shared by drawing and click hit-testing.
///
/// The scaled view is anchored at the display's top-left corner; when the
/// view's aspect ratio differs from the display's the unused band is left
/// on the right or bottom rather than split around the view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub offset: Vec2,
    pub scale: f32,
}

impl Viewport {
    /// The whole-map view: screen space equals world space.
    pub const IDENTITY: Self = Self {
        offset: Vec2::ZERO,
        scale: 1.0,
    };

    /// Largest uniform scale at which `view` fits entirely inside `display`.
    pub fn fit(view: &ViewRect, display: Vec2) -> Self {
        let scale = (display.x / view.w).min(display.y / view.h);
        Self {
            offset: view.origin(),
            scale,
        }
    }

    pub fn project(&self, world: Vec2) -> Vec2 {
        (world - self.offset) * self.scale
    }

    pub fn project_radius(&self, radius: f32) -> f32 {
        radius * self.scale
    }

    pub fn unproject(&self, screen: Vec2) -> Vec2 {
        screen / self.scale + self.offset
    }

    /// Whether `pointer` lies on or inside the projected circle.
    pub fn hits_circle(&self, pointer: Vec2, center: Vec2, radius: f32) -> bool {
        pointer.distance(self.project(center)) <= self.project_radius(radius)
    }
}

/// Half-open screen-space box, matching how pixel hit-boxes are tested.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitBox {
    pub min: Vec2,
    pub size: Vec2,
}

impl HitBox {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn centered(center: Vec2, half_extent: f32) -> Self {
        Self {
            min: center - Vec2::splat(half_extent),
            size: Vec2::splat(half_extent * 2.0),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.min + self.size;
        p.x >= self.min.x && p.x < max.x && p.y >= self.min.y && p.y < max.y
    }
}
