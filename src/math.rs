#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from(value: (f32, f32)) -> Self {
        Self::new(value.0, value.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl From<(f32, f32)> for Dimensions {
    fn from(value: (f32, f32)) -> Self {
        Self::new(value.0, value.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True if any part of the box overlaps a viewport anchored at the origin.
    pub fn intersects_viewport(&self, viewport: Dimensions) -> bool {
        self.x < viewport.width
            && self.y < viewport.height
            && self.x + self.width > 0.0
            && self.y + self.height > 0.0
    }

    pub fn contains_point(&self, point: Vector2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn viewport_intersection() {
        let viewport = Dimensions::new(800.0, 600.0);
        assert!(BoundingBox::new(0.0, 0.0, 10.0, 10.0).intersects_viewport(viewport));
        assert!(BoundingBox::new(-5.0, -5.0, 10.0, 10.0).intersects_viewport(viewport));
        assert!(!BoundingBox::new(900.0, 0.0, 10.0, 10.0).intersects_viewport(viewport));
        assert!(!BoundingBox::new(0.0, -20.0, 10.0, 10.0).intersects_viewport(viewport));
    }

    #[test]
    fn point_containment() {
        let bbox = BoundingBox::new(10.0, 10.0, 100.0, 50.0);
        assert!(bbox.contains_point(Vector2::new(10.0, 10.0)));
        assert!(bbox.contains_point(Vector2::new(110.0, 60.0)));
        assert!(!bbox.contains_point(Vector2::new(111.0, 30.0)));
    }
}
