use super::{collect_proxies, BroadPhase, PairSet, Proxy};
use crate::collision::Aabb;
use crate::objects::Body;

/// A node in the BVH.
#[derive(Debug)]
enum BvhNode {
    /// Leaf node holding a single proxy.
    Leaf { bounds: Aabb, proxy: usize },
    /// Internal node with two children.
    Internal {
        bounds: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
}

impl BvhNode {
    fn bounds(&self) -> &Aabb {
        match self {
            BvhNode::Leaf { bounds, .. } | BvhNode::Internal { bounds, .. } => bounds,
        }
    }
}

/// Bounding volume hierarchy broad phase.
///
/// Built top-down every tick: bodies are sorted along the longest axis of
/// their centroid spread and split at the median. Pairs come from walking the
/// tree once, descending into each internal node and testing its two
/// subtrees against each other.
#[derive(Debug, Default)]
pub struct Bvh {
    root: Option<BvhNode>,
    pairs: Vec<(usize, usize)>,
}

impl Bvh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Height of the last built tree, 0 when empty.
    pub fn depth(&self) -> usize {
        fn depth(node: &BvhNode) -> usize {
            match node {
                BvhNode::Leaf { .. } => 1,
                BvhNode::Internal { left, right, .. } => 1 + depth(left).max(depth(right)),
            }
        }
        self.root.as_ref().map_or(0, depth)
    }

    fn build_recursive(mut items: Vec<usize>, proxies: &[Proxy]) -> Option<BvhNode> {
        match items.len() {
            0 => return None,
            1 => {
                let proxy = items[0];
                return Some(BvhNode::Leaf {
                    bounds: proxies[proxy].aabb,
                    proxy,
                });
            }
            _ => {}
        }

        let first = proxies[items[0]].aabb;
        let bounds = items
            .iter()
            .fold(first, |acc, &i| acc.union(&proxies[i].aabb));

        // Split along the longest axis of the centroid spread.
        let centers: Vec<_> = items.iter().map(|&i| proxies[i].aabb.center()).collect();
        let spread = Aabb::from_points(&centers).unwrap_or(bounds);
        let split_on_x = spread.width() >= spread.height();

        // Stable sort keeps equal centroids in body order.
        items.sort_by(|&a, &b| {
            let ca = proxies[a].aabb.center();
            let cb = proxies[b].aabb.center();
            if split_on_x {
                ca.x.total_cmp(&cb.x)
            } else {
                ca.y.total_cmp(&cb.y)
            }
        });

        let mid = items.len() / 2;
        let right_items = items.split_off(mid);

        let left = Self::build_recursive(items, proxies)?;
        let right = Self::build_recursive(right_items, proxies)?;

        Some(BvhNode::Internal {
            bounds,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

/// Pairs within one subtree.
fn self_pairs(node: &BvhNode, proxies: &[Proxy], pairs: &mut PairSet) {
    if let BvhNode::Internal { left, right, .. } = node {
        self_pairs(left, proxies, pairs);
        self_pairs(right, proxies, pairs);
        cross_pairs(left, right, proxies, pairs);
    }
}

/// Pairs with one body in `a` and the other in `b`.
fn cross_pairs(a: &BvhNode, b: &BvhNode, proxies: &[Proxy], pairs: &mut PairSet) {
    if !a.bounds().intersects(b.bounds()) {
        return;
    }
    match (a, b) {
        (BvhNode::Leaf { proxy: pa, .. }, BvhNode::Leaf { proxy: pb, .. }) => {
            pairs.add(&proxies[*pa], &proxies[*pb]);
        }
        (BvhNode::Leaf { .. }, BvhNode::Internal { left, right, .. }) => {
            cross_pairs(a, left, proxies, pairs);
            cross_pairs(a, right, proxies, pairs);
        }
        (BvhNode::Internal { left, right, .. }, _) => {
            cross_pairs(left, b, proxies, pairs);
            cross_pairs(right, b, proxies, pairs);
        }
    }
}

fn collect_bounds(node: &BvhNode, out: &mut Vec<Aabb>) {
    out.push(*node.bounds());
    if let BvhNode::Internal { left, right, .. } = node {
        collect_bounds(left, out);
        collect_bounds(right, out);
    }
}

impl BroadPhase for Bvh {
    fn build(&mut self, _world_bounds: &Aabb, bodies: &[Body]) {
        let proxies = collect_proxies(bodies);
        self.root = Self::build_recursive((0..proxies.len()).collect(), &proxies);

        let mut pairs = PairSet::default();
        if let Some(root) = &self.root {
            self_pairs(root, &proxies, &mut pairs);
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
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            collect_bounds(root, &mut out);
        }
        out
    }

    fn name(&self) -> &'static str {
        "bvh"
    }
}
