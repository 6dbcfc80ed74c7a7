use super::vec2::Vec2;

/// Placement of a shape in the world: translation plus rotation in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f64,
}

impl Transform {
    pub fn new(position: Vec2, rotation: f64) -> Self {
        Self { position, rotation }
    }

    pub fn identity() -> Self {
        Self::new(Vec2::ZERO, 0.0)
    }

    /// Maps a local point to world space (rotate, then translate).
    pub fn apply(self, point: Vec2) -> Vec2 {
        point.rotate(self.rotation) + self.position
    }

    /// Maps a world point back into local space.
    pub fn apply_inverse(self, point: Vec2) -> Vec2 {
        (point - self.position).rotate(-self.rotation)
    }

    /// Rotates a direction without translating it.
    pub fn apply_vector(self, direction: Vec2) -> Vec2 {
        direction.rotate(self.rotation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_transform_apply_translation_and_rotation() {
        let t = Transform::new(Vec2::new(10.0, 5.0), PI / 2.0);
        let p = t.apply(Vec2::new(1.0, 0.0));
        assert!((p.x - 10.0).abs() < EPSILON);
        assert!((p.y - 6.0).abs() < EPSILON);
    }

    #[test]
    fn test_transform_inverse_round_trip() {
        let t = Transform::new(Vec2::new(-3.0, 7.5), 0.7);
        let local = Vec2::new(1.25, -2.0);
        let back = t.apply_inverse(t.apply(local));
        assert!((back.x - local.x).abs() < EPSILON);
        assert!((back.y - local.y).abs() < EPSILON);
    }

    #[test]
    fn test_transform_apply_vector_ignores_translation() {
        let t = Transform::new(Vec2::new(100.0, 100.0), PI);
        let d = t.apply_vector(Vec2::X);
        assert!((d.x + 1.0).abs() < EPSILON);
        assert!(d.y.abs() < EPSILON);
    }

    #[test]
    fn test_transform_identity_is_noop() {
        let p = Vec2::new(5.0, -3.0);
        assert_eq!(Transform::default().apply(p), p);
    }
}
