use crate::collision::Aabb;
use crate::common::Material;
use crate::math::{Transform, Vec2};
use crate::shapes::Shape;

/// Debug tag a renderer can map to a colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugColor {
    #[default]
    Default,
    /// The body took part in a contact during the last tick.
    Contact,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    // Geometry
    pub shape: Shape,
    pub material: Material,

    // Primary state
    pub position: Vec2, // World position of the center of mass
    pub rotation: f64,  // Radians
    pub velocity: Vec2,
    pub angular_velocity: f64, // Radians per second

    // Accumulators, sampled once per host frame and cleared by the world
    pub force: Vec2,
    pub torque: f64,
    pub acceleration: Vec2,

    // Mass properties, inverse values are 0.0 for static bodies
    pub mass: f64,
    pub inv_mass: f64,
    pub inertia: f64,
    pub inv_inertia: f64,

    pub color: DebugColor,
}

impl Body {
    /// Creates a dynamic body with the given mass at the origin.
    ///
    /// A mass that is zero, negative or not finite produces a static body.
    pub fn new(shape: impl Into<Shape>, mass: f64) -> Self {
        let shape = shape.into();
        let (mass, inv_mass, inertia, inv_inertia) = if mass > 0.0 && mass.is_finite() {
            let inertia = shape.inertia(mass);
            let inv_inertia = if inertia > 0.0 { 1.0 / inertia } else { 0.0 };
            (mass, 1.0 / mass, inertia, inv_inertia)
        } else {
            (0.0, 0.0, f64::INFINITY, 0.0)
        };

        Self {
            shape,
            material: Material::default(),
            position: Vec2::ZERO,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            acceleration: Vec2::ZERO,
            mass,
            inv_mass,
            inertia,
            inv_inertia,
            color: DebugColor::Default,
        }
    }

    /// Creates a dynamic body whose mass is the shape's area times `density`.
    pub fn with_density(shape: impl Into<Shape>, density: f64) -> Self {
        let shape = shape.into();
        let mass = shape.area() * density;
        Self::new(shape, mass)
    }

    /// Creates an immovable body at `position`.
    pub fn new_static(shape: impl Into<Shape>, position: Vec2) -> Self {
        Self::new(shape, 0.0).at(position)
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }

    /// World-space bounding box at the current transform.
    pub fn aabb(&self) -> Aabb {
        self.shape.aabb(&self.transform())
    }

    /// Applies a force at the center of mass.
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Applies a force at a world-space point, producing torque as well.
    pub fn apply_force_at_point(&mut self, force: Vec2, point_world: Vec2) {
        self.force += force;
        self.torque += (point_world - self.position).cross(force);
    }

    /// Adds an acceleration that ignores mass, such as uniform gravity.
    pub fn apply_acceleration(&mut self, acceleration: Vec2) {
        self.acceleration += acceleration;
    }

    /// Applies an instantaneous impulse at offset `r` from the center of mass.
    pub fn apply_impulse(&mut self, impulse: Vec2, r: Vec2) {
        self.velocity += impulse * self.inv_mass;
        self.angular_velocity += r.cross(impulse) * self.inv_inertia;
    }

    /// Velocity of the material point at offset `r` from the center of mass.
    pub fn velocity_at(&self, r: Vec2) -> Vec2 {
        self.velocity + Vec2::cross_scalar(self.angular_velocity, r)
    }

    pub fn clear_accumulators(&mut self) {
        self.force = Vec2::ZERO;
        self.torque = 0.0;
        self.acceleration = Vec2::ZERO;
    }
}
