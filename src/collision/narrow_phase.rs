//! Exact shape-pair collision tests.
//!
//! Every entry point puts the pair into canonical order first (circle before
//! polygon, lower index first for equal kinds) and flips the result when the
//! caller asked for the other order. Asking for `(a, b)` and `(b, a)` runs the
//! same arithmetic, so the two normals are exact negations of each other.

use smallvec::smallvec;

use super::contact::{ContactManifold, ContactPoints};
use crate::math::{Transform, Vec2};
use crate::objects::Body;
use crate::shapes::{Polygon, Shape};

/// Distances below this are treated as coincident when building a normal.
const NORMAL_EPSILON: f64 = 1e-10;
/// Bias towards body A's face as reference, keeps the choice stable when
/// both polygons report nearly the same separation.
const REFERENCE_FACE_TOLERANCE: f64 = 5e-4;

/// True when the shapes of bodies `a` and `b` strictly overlap.
pub fn overlaps(bodies: &[Body], a: usize, b: usize) -> bool {
    collide(bodies, a, b).is_some()
}

/// Contact geometry between bodies `a` and `b`, normal pointing from `a` to `b`.
///
/// Returns `None` when the shapes do not overlap, when either index is out of
/// range, or when `a == b`.
pub fn collide(bodies: &[Body], a: usize, b: usize) -> Option<ContactManifold> {
    if a == b {
        return None;
    }
    let body_a = bodies.get(a)?;
    let body_b = bodies.get(b)?;

    if (body_a.shape.kind(), a) <= (body_b.shape.kind(), b) {
        collide_ordered(body_a, body_b)
    } else {
        collide_ordered(body_b, body_a).map(ContactManifold::flipped)
    }
}

fn collide_ordered(a: &Body, b: &Body) -> Option<ContactManifold> {
    match (&a.shape, &b.shape) {
        (Shape::Circle(circle_a), Shape::Circle(circle_b)) => {
            circle_circle(a.position, circle_a.radius, b.position, circle_b.radius)
        }
        (Shape::Circle(circle), Shape::Polygon(polygon)) => {
            circle_polygon(a.position, circle.radius, polygon, b.transform())
        }
        (Shape::Polygon(polygon), Shape::Circle(circle)) => {
            circle_polygon(b.position, circle.radius, polygon, a.transform())
                .map(ContactManifold::flipped)
        }
        (Shape::Polygon(polygon_a), Shape::Polygon(polygon_b)) => {
            polygon_polygon(polygon_a, a.transform(), polygon_b, b.transform())
        }
    }
}

fn circle_circle(
    center_a: Vec2,
    radius_a: f64,
    center_b: Vec2,
    radius_b: f64,
) -> Option<ContactManifold> {
    let offset = center_b - center_a;
    let dist_sq = offset.magnitude_squared();
    let radii_sum = radius_a + radius_b;

    // Written negated so NaN positions never report an overlap.
    if !(dist_sq < radii_sum * radii_sum) {
        return None;
    }

    let distance = dist_sq.sqrt();
    let depth = radii_sum - distance;
    let normal = if distance > NORMAL_EPSILON {
        offset / distance
    } else {
        // Concentric circles: any direction separates them.
        Vec2::Y
    };

    // Halfway between the two surface points.
    let point = center_a + normal * (radius_a - 0.5 * depth);

    Some(ContactManifold {
        normal,
        depth,
        points: smallvec![point],
    })
}

/// Finds the point on a line segment closest to a given point.
fn closest_point_on_segment(segment_a: Vec2, segment_b: Vec2, point: Vec2) -> Vec2 {
    let segment_vec = segment_b - segment_a;
    let length_sq = segment_vec.magnitude_squared();
    if length_sq < 1e-12 {
        return segment_a;
    }
    let t = ((point - segment_a).dot(segment_vec) / length_sq).clamp(0.0, 1.0);
    segment_a + segment_vec * t
}

/// Circle against polygon, normal from the circle towards the polygon.
///
/// Works in the polygon's local frame: the face of greatest separation from
/// the circle center decides between the "center inside" case and the
/// closest-point-on-face case (which also covers vertex regions).
fn circle_polygon(
    center: Vec2,
    radius: f64,
    polygon: &Polygon,
    transform: Transform,
) -> Option<ContactManifold> {
    let local = transform.apply_inverse(center);
    let vertices = polygon.vertices();
    let normals = polygon.normals();
    let count = vertices.len();

    let mut separation = f64::NEG_INFINITY;
    let mut face = 0;
    for i in 0..count {
        let s = normals[i].dot(local - vertices[i]);
        if s > separation {
            separation = s;
            face = i;
        }
    }

    if !(separation < radius) {
        return None;
    }

    // Normal here points from the polygon towards the circle center.
    let (outward, depth, point_local) = if separation <= 0.0 {
        let n = normals[face];
        (n, radius - separation, local - n * separation)
    } else {
        let closest = closest_point_on_segment(vertices[face], vertices[(face + 1) % count], local);
        let offset = local - closest;
        let dist_sq = offset.magnitude_squared();
        if !(dist_sq < radius * radius) {
            return None;
        }
        let distance = dist_sq.sqrt();
        let n = if distance > NORMAL_EPSILON {
            offset / distance
        } else {
            normals[face]
        };
        (n, radius - distance, closest)
    };

    Some(ContactManifold {
        normal: -transform.apply_vector(outward),
        depth,
        points: smallvec![transform.apply(point_local)],
    })
}

/// Polygon vertices and edge normals placed in world space.
struct WorldPolygon {
    vertices: Vec<Vec2>,
    normals: Vec<Vec2>,
}

impl WorldPolygon {
    fn new(polygon: &Polygon, transform: Transform) -> Self {
        Self {
            vertices: polygon.vertices().iter().map(|v| transform.apply(*v)).collect(),
            normals: polygon.normals().iter().map(|n| transform.apply_vector(*n)).collect(),
        }
    }

    fn edge(&self, index: usize) -> (Vec2, Vec2) {
        let next = (index + 1) % self.vertices.len();
        (self.vertices[index], self.vertices[next])
    }
}

/// Face of `reference` along which `other` is furthest outside, with that
/// separation. Negative separation means penetration along every face.
fn max_separation(reference: &WorldPolygon, other: &WorldPolygon) -> (usize, f64) {
    let mut best_face = 0;
    let mut best = f64::NEG_INFINITY;
    for (i, (normal, vertex)) in reference.normals.iter().zip(&reference.vertices).enumerate() {
        let s = other
            .vertices
            .iter()
            .map(|w| normal.dot(*w - *vertex))
            .fold(f64::INFINITY, f64::min);
        if s > best {
            best = s;
            best_face = i;
        }
    }
    (best_face, best)
}

/// Keeps the part of a segment with `normal . p <= offset`.
fn clip_segment(points: &[Vec2], normal: Vec2, offset: f64) -> ContactPoints {
    let mut out: ContactPoints = points
        .iter()
        .copied()
        .filter(|p| normal.dot(*p) - offset <= 0.0)
        .collect();

    if let [p0, p1] = points {
        let d0 = normal.dot(*p0) - offset;
        let d1 = normal.dot(*p1) - offset;
        if d0 * d1 < 0.0 {
            let t = d0 / (d0 - d1);
            out.push(*p0 + (*p1 - *p0) * t);
        }
    }
    out
}

/// Separating-axis test with reference/incident edge clipping.
fn polygon_polygon(
    polygon_a: &Polygon,
    transform_a: Transform,
    polygon_b: &Polygon,
    transform_b: Transform,
) -> Option<ContactManifold> {
    let a = WorldPolygon::new(polygon_a, transform_a);
    let b = WorldPolygon::new(polygon_b, transform_b);

    let (face_a, separation_a) = max_separation(&a, &b);
    if !(separation_a < 0.0) {
        return None;
    }
    let (face_b, separation_b) = max_separation(&b, &a);
    if !(separation_b < 0.0) {
        return None;
    }

    let (reference, incident, reference_face, separation, flip) =
        if separation_b > separation_a + REFERENCE_FACE_TOLERANCE {
            (&b, &a, face_b, separation_b, true)
        } else {
            (&a, &b, face_a, separation_a, false)
        };

    let reference_normal = reference.normals[reference_face];

    // Incident face: the one most anti-parallel to the reference normal.
    let mut incident_face = 0;
    let mut min_dot = f64::INFINITY;
    for (i, n) in incident.normals.iter().enumerate() {
        let d = reference_normal.dot(*n);
        if d < min_dot {
            min_dot = d;
            incident_face = i;
        }
    }

    let (v1, v2) = reference.edge(reference_face);
    let tangent = (v2 - v1).normalize();
    let (i1, i2) = incident.edge(incident_face);

    let clipped = clip_segment(&[i1, i2], -tangent, -tangent.dot(v1));
    let clipped = if clipped.len() == 2 {
        clip_segment(&clipped, tangent, tangent.dot(v2))
    } else {
        clipped
    };

    let mut points: ContactPoints = clipped
        .into_iter()
        .filter(|p| reference_normal.dot(*p - v1) <= 0.0)
        .collect();

    if points.is_empty() {
        // Clipping lost everything to rounding; fall back to the deepest vertex.
        let deepest = incident
            .vertices
            .iter()
            .copied()
            .fold(None, |best: Option<Vec2>, w| match best {
                Some(p) if reference_normal.dot(p) <= reference_normal.dot(w) => Some(p),
                _ => Some(w),
            });
        points.extend(deepest);
    }

    let normal = if flip { -reference_normal } else { reference_normal };

    Some(ContactManifold {
        normal,
        depth: -separation,
        points,
    })
}
