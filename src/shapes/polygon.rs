use crate::error::ShapeError;
use crate::math::Vec2;

const AREA_EPSILON: f64 = 1e-10;
/// Vertices closer than this are merged.
const VERTEX_EPSILON: f64 = 1e-9;
const NORMAL_TOLERANCE: f64 = 1e-6;

/// A convex polygon in local space.
///
/// Construction normalises the winding to counter-clockwise and translates the
/// vertices so the centroid sits at the local origin. A body holding a polygon
/// therefore has its position at the polygon's center of mass.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    normals: Vec<Vec2>,
}

impl Polygon {
    /// Creates a polygon from a list of vertices, in either winding order.
    ///
    /// Repeated vertices, including a closing copy of the first one, are
    /// merged before validation.
    pub fn new(mut vertices: Vec<Vec2>) -> Result<Self, ShapeError> {
        if vertices.iter().any(|v| !v.is_finite()) {
            return Err(ShapeError::NonFinite);
        }
        merge_duplicate_vertices(&mut vertices);
        if vertices.len() < 3 {
            return Err(ShapeError::TooFewVertices(vertices.len()));
        }

        let signed_area = signed_area(&vertices);
        if signed_area.abs() < AREA_EPSILON {
            return Err(ShapeError::ZeroArea);
        }
        if signed_area < 0.0 {
            vertices.reverse();
        }
        if !is_convex(&vertices) {
            return Err(ShapeError::NonConvex);
        }

        let centroid = centroid(&vertices);
        for v in vertices.iter_mut() {
            *v -= centroid;
        }

        let normals = edge_normals(&vertices);
        if let Some(edge) = normals
            .iter()
            .position(|n| (n.magnitude() - 1.0).abs() > NORMAL_TOLERANCE)
        {
            return Err(ShapeError::DegenerateEdge(edge));
        }
        Ok(Self { vertices, normals })
    }

    /// Axis-aligned box of the given width and height, centered on the origin.
    pub fn rectangle(width: f64, height: f64) -> Result<Self, ShapeError> {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self::new(vec![
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ])
    }

    /// Regular polygon with `sides` vertices on a circle of `radius`.
    pub fn regular(sides: usize, radius: f64) -> Result<Self, ShapeError> {
        let step = std::f64::consts::TAU / sides as f64;
        let vertices = (0..sides)
            .map(|i| Vec2::X.rotate(step * i as f64) * radius)
            .collect();
        Self::new(vertices)
    }

    /// Vertices in local space, counter-clockwise, centroid at the origin.
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Outward unit normal of edge `i` (from vertex `i` to vertex `i + 1`).
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    pub fn area(&self) -> f64 {
        signed_area(&self.vertices).abs()
    }

    /// Moment of inertia about the centroid for a body of the given mass.
    pub fn inertia(&self, mass: f64) -> f64 {
        let n = self.vertices.len();
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for i in 0..n {
            let v1 = self.vertices[i];
            let v2 = self.vertices[(i + 1) % n];
            let cross = v1.cross(v2).abs();
            numerator += cross * (v1.dot(v1) + v1.dot(v2) + v2.dot(v2));
            denominator += cross;
        }
        mass * numerator / (6.0 * denominator)
    }

    /// Largest distance from the centroid to a vertex.
    pub fn bounding_radius(&self) -> f64 {
        self.vertices
            .iter()
            .map(|v| v.magnitude())
            .fold(0.0, f64::max)
    }
}

fn merge_duplicate_vertices(vertices: &mut Vec<Vec2>) {
    let limit = VERTEX_EPSILON * VERTEX_EPSILON;
    vertices.dedup_by(|b, a| a.distance_squared(*b) < limit);
    while vertices.len() > 1 {
        match (vertices.first(), vertices.last()) {
            (Some(first), Some(last)) if first.distance_squared(*last) < limit => {
                vertices.pop();
            }
            _ => break,
        }
    }
}

fn signed_area(vertices: &[Vec2]) -> f64 {
    let n = vertices.len();
    let mut area = 0.0;
    for i in 0..n {
        area += vertices[i].cross(vertices[(i + 1) % n]);
    }
    area / 2.0
}

fn centroid(vertices: &[Vec2]) -> Vec2 {
    let n = vertices.len();
    let mut weighted = Vec2::ZERO;
    let mut area_sum = 0.0;
    for i in 0..n {
        let v1 = vertices[i];
        let v2 = vertices[(i + 1) % n];
        let cross = v1.cross(v2);
        area_sum += cross;
        weighted += (v1 + v2) * cross;
    }
    weighted / (3.0 * area_sum)
}

// Assumes counter-clockwise winding. Collinear vertices are tolerated.
fn is_convex(vertices: &[Vec2]) -> bool {
    let n = vertices.len();
    (0..n).all(|i| {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let c = vertices[(i + 2) % n];
        (b - a).cross(c - b) >= -AREA_EPSILON
    })
}

fn edge_normals(vertices: &[Vec2]) -> Vec<Vec2> {
    let n = vertices.len();
    (0..n)
        .map(|i| {
            let edge = vertices[(i + 1) % n] - vertices[i];
            // Outward for CCW winding is the clockwise perpendicular.
            Vec2::new(edge.y, -edge.x).normalize()
        })
        .collect()
}
