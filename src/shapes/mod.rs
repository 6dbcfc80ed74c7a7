pub mod circle;
pub mod polygon;

pub use circle::Circle;
pub use polygon::Polygon;

use crate::collision::Aabb;
use crate::math::{Transform, Vec2};

/// Geometric shape of a body, always centered on the body's center of mass.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Polygon(Polygon),
}

/// Discriminant used to put a shape pair into canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ShapeKind {
    Circle,
    Polygon,
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    pub fn area(&self) -> f64 {
        match self {
            Shape::Circle(circle) => circle.area(),
            Shape::Polygon(polygon) => polygon.area(),
        }
    }

    /// Moment of inertia about the center of mass for the given mass.
    pub fn inertia(&self, mass: f64) -> f64 {
        match self {
            Shape::Circle(circle) => circle.inertia(mass),
            Shape::Polygon(polygon) => polygon.inertia(mass),
        }
    }

    /// World-space bounding box of the shape placed at `transform`.
    pub fn aabb(&self, transform: &Transform) -> Aabb {
        match self {
            Shape::Circle(circle) => {
                Aabb::from_center_half_extents(transform.position, Vec2::splat(circle.radius))
            }
            Shape::Polygon(polygon) => {
                let (min, max) = polygon.vertices().iter().map(|v| transform.apply(*v)).fold(
                    (Vec2::splat(f64::INFINITY), Vec2::splat(f64::NEG_INFINITY)),
                    |(min, max), p| (min.min(p), max.max(p)),
                );
                Aabb { min, max }
            }
        }
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_circle_aabb_follows_position() {
        let shape = Shape::from(Circle::new(2.0).unwrap());
        let aabb = shape.aabb(&Transform::new(Vec2::new(5.0, -1.0), 1.3));
        assert_eq!(aabb.min, Vec2::new(3.0, -3.0));
        assert_eq!(aabb.max, Vec2::new(7.0, 1.0));
    }

    #[test]
    fn test_polygon_aabb_rotated() {
        let shape = Shape::from(Polygon::rectangle(2.0, 2.0).unwrap());
        let aabb = shape.aabb(&Transform::new(Vec2::ZERO, PI / 4.0));
        let half_diagonal = 2.0f64.sqrt();
        assert!((aabb.max.x - half_diagonal).abs() < EPSILON);
        assert!((aabb.min.y + half_diagonal).abs() < EPSILON);
    }

    #[test]
    fn test_shape_kind_ordering() {
        assert!(ShapeKind::Circle < ShapeKind::Polygon);
    }
}
