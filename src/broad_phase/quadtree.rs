//! Region quadtree over body AABBs, rebuilt top-down every tick.

use serde::{Deserialize, Serialize};

use super::{collect_proxies, BroadPhase, PairSet, Proxy};
use crate::collision::Aabb;
use crate::error::ConfigError;
use crate::objects::Body;

/// Subdivision limits for [`Quadtree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadtreeConfig {
    /// A node holding more bodies than this is split, depth permitting.
    pub capacity: usize,
    /// Depth of the deepest allowed node; the root is depth 0.
    pub max_depth: usize,
}

impl QuadtreeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::InvalidQuadtree);
        }
        Ok(())
    }
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self {
            capacity: 4,
            max_depth: 8,
        }
    }
}

#[derive(Debug)]
enum QuadNode {
    /// Indices into the proxy list of the current build.
    Leaf { bounds: Aabb, entries: Vec<usize> },
    Internal { bounds: Aabb, children: Box<[QuadNode; 4]> },
}

impl QuadNode {
    fn bounds(&self) -> Aabb {
        match self {
            QuadNode::Leaf { bounds, .. } | QuadNode::Internal { bounds, .. } => *bounds,
        }
    }
}

/// Quadtree broad phase.
///
/// The root covers the world bounds grown to fit every body, so nothing is
/// lost when bodies leave the viewport. A body goes into every quadrant its
/// AABB touches; pairs seen in several leaves are reported once.
#[derive(Debug)]
pub struct Quadtree {
    config: QuadtreeConfig,
    root: Option<QuadNode>,
    pairs: Vec<(usize, usize)>,
}

impl Quadtree {
    pub fn new(config: QuadtreeConfig) -> Self {
        Self {
            config,
            root: None,
            pairs: Vec::new(),
        }
    }

    pub fn config(&self) -> QuadtreeConfig {
        self.config
    }

    /// Number of leaves in the last build.
    pub fn leaf_count(&self) -> usize {
        fn count(node: &QuadNode) -> usize {
            match node {
                QuadNode::Leaf { .. } => 1,
                QuadNode::Internal { children, .. } => children.iter().map(count).sum(),
            }
        }
        self.root.as_ref().map_or(0, count)
    }

    fn build_node(&self, bounds: Aabb, entries: Vec<usize>, proxies: &[Proxy], depth: usize) -> QuadNode {
        if entries.len() <= self.config.capacity || depth >= self.config.max_depth {
            return QuadNode::Leaf { bounds, entries };
        }

        let quadrants = bounds.quadrants();
        let mut split: [Vec<usize>; 4] = quadrants.map(|quadrant| {
            entries
                .iter()
                .copied()
                .filter(|&e| proxies[e].aabb.intersects(&quadrant))
                .collect()
        });

        // Every body spans every quadrant: splitting further only copies.
        if split.iter().all(|child| child.len() == entries.len()) {
            return QuadNode::Leaf { bounds, entries };
        }

        let children: [QuadNode; 4] = std::array::from_fn(|i| {
            self.build_node(quadrants[i], std::mem::take(&mut split[i]), proxies, depth + 1)
        });
        QuadNode::Internal {
            bounds,
            children: Box::new(children),
        }
    }
}

impl Default for Quadtree {
    fn default() -> Self {
        Self::new(QuadtreeConfig::default())
    }
}

fn collect_leaf_pairs(node: &QuadNode, proxies: &[Proxy], pairs: &mut PairSet) {
    match node {
        QuadNode::Leaf { entries, .. } => {
            for (i, &a) in entries.iter().enumerate() {
                for &b in &entries[i + 1..] {
                    pairs.add(&proxies[a], &proxies[b]);
                }
            }
        }
        QuadNode::Internal { children, .. } => {
            for child in children.iter() {
                collect_leaf_pairs(child, proxies, pairs);
            }
        }
    }
}

fn collect_bounds(node: &QuadNode, out: &mut Vec<Aabb>) {
    out.push(node.bounds());
    if let QuadNode::Internal { children, .. } = node {
        for child in children.iter() {
            collect_bounds(child, out);
        }
    }
}

impl BroadPhase for Quadtree {
    fn build(&mut self, world_bounds: &Aabb, bodies: &[Body]) {
        let proxies = collect_proxies(bodies);
        let root_bounds = proxies
            .iter()
            .fold(*world_bounds, |acc, proxy| acc.union(&proxy.aabb));

        let root = self.build_node(root_bounds, (0..proxies.len()).collect(), &proxies, 0);

        let mut pairs = PairSet::default();
        collect_leaf_pairs(&root, &proxies, &mut pairs);
        self.pairs = pairs.into_sorted();
        self.root = Some(root);
    }

    fn query_pairs(&self) -> Vec<(usize, usize)> {
        self.pairs.clone()
    }

    fn potential_collision_count(&self) -> usize {
        self.pairs.len()
    }

    fn debug_bounds(&self) -> Vec<Aabb> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            collect_bounds(root, &mut out);
        }
        out
    }

    fn name(&self) -> &'static str {
        "quadtree"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broad_phase::NullBroadPhase;
    use crate::math::Vec2;
    use crate::shapes::{Circle, Polygon};

    fn circle_at(radius: f64, x: f64, y: f64) -> Body {
        Body::new(Circle::new(radius).unwrap(), 1.0).at(Vec2::new(x, y))
    }

    fn bounds() -> Aabb {
        Aabb::from_center_half_extents(Vec2::ZERO, Vec2::splat(16.0))
    }

    #[test]
    fn test_quadtree_config_validate() {
        assert!(QuadtreeConfig::default().validate().is_ok());
        let bad = QuadtreeConfig {
            capacity: 0,
            max_depth: 3,
        };
        assert_eq!(bad.validate(), Err(ConfigError::InvalidQuadtree));
    }

    #[test]
    fn test_quadtree_empty() {
        let mut tree = Quadtree::default();
        tree.build(&bounds(), &[]);
        assert!(tree.query_pairs().is_empty());
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.debug_bounds(), vec![bounds()]);
    }

    #[test]
    fn test_quadtree_subdivides_past_capacity() {
        let bodies: Vec<Body> = (0..8)
            .map(|i| circle_at(0.5, -12.0 + 3.0 * i as f64, -12.0 + 3.0 * i as f64))
            .collect();
        let mut tree = Quadtree::new(QuadtreeConfig {
            capacity: 2,
            max_depth: 4,
        });
        tree.build(&bounds(), &bodies);
        assert!(tree.leaf_count() > 1);
        assert!(tree.debug_bounds().len() > tree.leaf_count());
        assert!(tree.query_pairs().is_empty());
    }

    #[test]
    fn test_quadtree_pair_across_quadrant_boundary_reported_once() {
        // Both bodies straddle the center, so they share all four leaves.
        let bodies = vec![
            circle_at(1.0, 0.2, 0.1),
            circle_at(1.0, -0.3, -0.2),
            circle_at(0.5, 10.0, 10.0),
            circle_at(0.5, -10.0, 10.0),
            circle_at(0.5, 10.0, -10.0),
        ];
        let mut tree = Quadtree::new(QuadtreeConfig {
            capacity: 1,
            max_depth: 5,
        });
        tree.build(&bounds(), &bodies);
        assert_eq!(tree.query_pairs(), vec![(0, 1)]);
        assert_eq!(tree.potential_collision_count(), 1);
    }

    #[test]
    fn test_quadtree_keeps_bodies_outside_world_bounds() {
        let bodies = vec![
            circle_at(1.0, 100.0, 100.0),
            circle_at(1.0, 101.0, 100.0),
            circle_at(1.0, 0.0, 0.0),
        ];
        let mut tree = Quadtree::new(QuadtreeConfig {
            capacity: 1,
            max_depth: 6,
        });
        tree.build(&bounds(), &bodies);
        assert_eq!(tree.query_pairs(), vec![(0, 1)]);
        let root = tree.debug_bounds()[0];
        assert!(root.contains(&bodies[0].aabb()));
        assert!(root.contains(&bounds()));
    }

    #[test]
    fn test_quadtree_matches_null_on_grid() {
        let mut bodies = Vec::new();
        for row in 0..6 {
            for col in 0..6 {
                let position = Vec2::new(-10.0 + 3.5 * col as f64, -10.0 + 3.5 * row as f64);
                let body = if (row + col) % 2 == 0 {
                    circle_at(2.0, position.x, position.y)
                } else {
                    Body::new(Polygon::rectangle(3.0, 2.0).unwrap(), 1.0)
                        .at(position)
                        .with_rotation(0.3 * col as f64)
                };
                bodies.push(body);
            }
        }
        bodies.push(Body::new_static(Polygon::rectangle(30.0, 1.0).unwrap(), Vec2::new(0.0, -14.0)));

        let mut null = NullBroadPhase::new();
        null.build(&bounds(), &bodies);
        let mut tree = Quadtree::new(QuadtreeConfig {
            capacity: 3,
            max_depth: 6,
        });
        tree.build(&bounds(), &bodies);

        assert!(!null.query_pairs().is_empty());
        assert_eq!(tree.query_pairs(), null.query_pairs());
    }
}
