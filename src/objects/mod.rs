pub mod body;

pub use body::{Body, DebugColor};

/// Mutable references to two different bodies of a slice.
///
/// Returns `None` if the indices are equal or out of bounds.
pub(crate) fn get_mutable_body_pair(
    bodies: &mut [Body],
    idx_a: usize,
    idx_b: usize,
) -> Option<(&mut Body, &mut Body)> {
    if idx_a == idx_b || idx_a >= bodies.len() || idx_b >= bodies.len() {
        return None;
    }

    // split_at_mut needs the larger index as the split point
    if idx_a < idx_b {
        let (slice_a, slice_b) = bodies.split_at_mut(idx_b);
        Some((&mut slice_a[idx_a], &mut slice_b[0]))
    } else {
        let (slice_b, slice_a) = bodies.split_at_mut(idx_a);
        Some((&mut slice_a[0], &mut slice_b[idx_b]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use crate::shapes::Circle;

    fn circle_at(x: f64) -> Body {
        Body::new(Circle::new(1.0).unwrap(), 1.0).at(Vec2::new(x, 0.0))
    }

    #[test]
    fn test_body_pair_rejects_bad_indices() {
        let mut bodies = vec![circle_at(0.0)];
        assert!(get_mutable_body_pair(&mut bodies, 0, 0).is_none());
        assert!(get_mutable_body_pair(&mut bodies, 0, 1).is_none());
    }

    #[test]
    fn test_body_pair_either_order() {
        let mut bodies = vec![circle_at(0.0), circle_at(5.0)];
        let (a, b) = get_mutable_body_pair(&mut bodies, 1, 0).unwrap();
        assert_eq!(a.position.x, 5.0);
        assert_eq!(b.position.x, 0.0);
    }
}
