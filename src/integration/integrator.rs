use crate::objects::Body;

/// Advances a body by `dt` with semi-implicit Euler.
///
/// Velocity is updated first and the new velocity moves the position, which
/// keeps the scheme stable at fixed steps. Accumulators are left untouched:
/// the world samples forces once per host frame and reuses them for every
/// fixed sub-step of that frame.
pub fn semi_implicit_euler(body: &mut Body, dt: f64) {
    if body.is_static() {
        return;
    }

    let linear_acceleration = body.force * body.inv_mass + body.acceleration;
    body.velocity += linear_acceleration * dt;
    body.position += body.velocity * dt;

    let angular_acceleration = body.torque * body.inv_inertia;
    body.angular_velocity += angular_acceleration * dt;
    body.rotation = wrap_angle(body.rotation + body.angular_velocity * dt);
}

/// Wraps an angle in radians to the range [-PI, PI].
fn wrap_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use crate::shapes::Circle;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-9;

    fn unit_body(mass: f64) -> Body {
        Body::new(Circle::new(1.0).unwrap(), mass)
    }

    #[test]
    fn test_integrate_constant_velocity() {
        let mut body = unit_body(1.0).with_velocity(Vec2::new(10.0, -5.0));
        semi_implicit_euler(&mut body, 0.1);
        assert!((body.position.x - 1.0).abs() < EPSILON);
        assert!((body.position.y + 0.5).abs() < EPSILON);
        assert_eq!(body.velocity, Vec2::new(10.0, -5.0));
    }

    #[test]
    fn test_integrate_force_and_acceleration() {
        let mut body = unit_body(2.0);
        body.apply_force(Vec2::new(10.0, 0.0)); // a = 5
        body.apply_acceleration(Vec2::new(0.0, -10.0));
        semi_implicit_euler(&mut body, 0.1);

        assert!((body.velocity.x - 0.5).abs() < EPSILON);
        assert!((body.velocity.y + 1.0).abs() < EPSILON);
        // Position uses the updated velocity.
        assert!((body.position.x - 0.05).abs() < EPSILON);
        assert!((body.position.y + 0.1).abs() < EPSILON);
    }

    #[test]
    fn test_integrate_keeps_accumulators() {
        let mut body = unit_body(1.0);
        body.apply_force(Vec2::new(3.0, 0.0));
        semi_implicit_euler(&mut body, 0.1);
        semi_implicit_euler(&mut body, 0.1);
        assert_eq!(body.force, Vec2::new(3.0, 0.0));
        assert!((body.velocity.x - 0.6).abs() < EPSILON);
    }

    #[test]
    fn test_integrate_torque() {
        let mut body = unit_body(1.0);
        body.torque = 5.0;
        let alpha = 5.0 * body.inv_inertia;
        semi_implicit_euler(&mut body, 0.1);
        assert!((body.angular_velocity - alpha * 0.1).abs() < EPSILON);
        assert!((body.rotation - alpha * 0.01).abs() < EPSILON);
    }

    #[test]
    fn test_integrate_static_body_unchanged() {
        let mut body = unit_body(0.0).at(Vec2::ONE).with_velocity(Vec2::ONE);
        body.apply_force(Vec2::new(10.0, 10.0));
        body.apply_acceleration(Vec2::new(0.0, -9.8));
        let before = body.clone();
        semi_implicit_euler(&mut body, 0.1);
        assert_eq!(body, before);
    }

    #[test]
    fn test_wrap_angle() {
        assert!(wrap_angle(0.0).abs() < EPSILON);
        assert!((wrap_angle(PI + 0.1) - (-PI + 0.1)).abs() < EPSILON);
        assert!((wrap_angle(-PI - 0.1) - (PI - 0.1)).abs() < EPSILON);
        assert!(wrap_angle(2.0 * PI).abs() < EPSILON);
    }
}
