use super::{collect_proxies, BroadPhase, PairSet};
use crate::collision::Aabb;
use crate::objects::Body;

/// Brute-force broad phase: every pair of bodies with intersecting AABBs.
///
/// O(n²), kept as the baseline the other strategies are measured against.
#[derive(Debug, Default)]
pub struct NullBroadPhase {
    pairs: Vec<(usize, usize)>,
}

impl NullBroadPhase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BroadPhase for NullBroadPhase {
    fn build(&mut self, _world_bounds: &Aabb, bodies: &[Body]) {
        let proxies = collect_proxies(bodies);
        let mut pairs = PairSet::default();
        for (i, a) in proxies.iter().enumerate() {
            for b in &proxies[i + 1..] {
                pairs.add(a, b);
            }
        }
        self.pairs = pairs.into_sorted();
    }

    fn query_pairs(&self) -> Vec<(usize, usize)> {
        self.pairs.clone()
    }

    fn potential_collision_count(&self) -> usize {
        self.pairs.len()
    }

    fn debug_bounds(&self) -> Vec<Aabb> {
        Vec::new()
    }

    fn name(&self) -> &'static str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use crate::shapes::Circle;

    fn circle_at(x: f64, y: f64) -> Body {
        Body::new(Circle::new(1.0).unwrap(), 1.0).at(Vec2::new(x, y))
    }

    fn bounds() -> Aabb {
        Aabb::from_center_half_extents(Vec2::ZERO, Vec2::splat(50.0))
    }

    #[test]
    fn test_null_pairs_sorted_and_normalised() {
        let bodies = vec![
            circle_at(0.0, 0.0),
            circle_at(20.0, 0.0),
            circle_at(1.0, 0.0),
            circle_at(2.0, 0.5),
        ];
        let mut broad_phase = NullBroadPhase::new();
        broad_phase.build(&bounds(), &bodies);
        assert_eq!(broad_phase.query_pairs(), vec![(0, 2), (0, 3), (2, 3)]);
        assert_eq!(broad_phase.potential_collision_count(), 3);
    }

    #[test]
    fn test_null_touching_aabbs_are_candidates() {
        let bodies = vec![circle_at(0.0, 0.0), circle_at(2.0, 0.0)];
        let mut broad_phase = NullBroadPhase::new();
        broad_phase.build(&bounds(), &bodies);
        assert_eq!(broad_phase.query_pairs(), vec![(0, 1)]);
    }

    #[test]
    fn test_null_skips_static_pairs() {
        let ground = Circle::new(1.0).unwrap();
        let bodies = vec![
            Body::new_static(ground, Vec2::ZERO),
            Body::new_static(ground, Vec2::new(1.0, 0.0)),
            circle_at(0.5, 1.0),
        ];
        let mut broad_phase = NullBroadPhase::new();
        broad_phase.build(&bounds(), &bodies);
        assert_eq!(broad_phase.query_pairs(), vec![(0, 2), (1, 2)]);
    }

    #[test]
    fn test_null_rebuild_replaces_pairs() {
        let mut bodies = vec![circle_at(0.0, 0.0), circle_at(1.0, 0.0)];
        let mut broad_phase = NullBroadPhase::new();
        broad_phase.build(&bounds(), &bodies);
        assert_eq!(broad_phase.potential_collision_count(), 1);

        bodies[1].position = Vec2::new(10.0, 0.0);
        broad_phase.build(&bounds(), &bodies);
        assert!(broad_phase.query_pairs().is_empty());
    }
}
