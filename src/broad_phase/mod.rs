//! Broad-phase collision culling.
//!
//! A broad phase is rebuilt from scratch every fixed tick and reports the
//! body pairs whose bounding boxes overlap. The narrow phase then decides
//! which of those candidates really collide.

pub mod bvh;
pub mod null;
pub mod quadtree;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use bvh::Bvh;
pub use null::NullBroadPhase;
pub use quadtree::{Quadtree, QuadtreeConfig};

use crate::collision::Aabb;
use crate::error::ConfigError;
use crate::objects::Body;

/// Trait for broad-phase strategies.
///
/// Pairs returned by [`BroadPhase::query_pairs`] satisfy:
/// - the AABBs of both bodies intersect (touching counts),
/// - each unordered pair appears once, as `(lower, higher)`, sorted,
/// - no self pairs,
/// - no pairs where both bodies are static, since neither can move.
///
/// Bodies with a non-finite AABB are left out of every strategy.
pub trait BroadPhase {
    /// Rebuilds the index over the current body AABBs.
    fn build(&mut self, world_bounds: &Aabb, bodies: &[Body]);

    /// Candidate pairs from the last build.
    fn query_pairs(&self) -> Vec<(usize, usize)>;

    /// Number of candidate pairs the last build produced.
    fn potential_collision_count(&self) -> usize;

    /// Node rectangles for debug drawing.
    fn debug_bounds(&self) -> Vec<Aabb>;

    fn name(&self) -> &'static str;
}

/// Selector for the broad-phase strategy, in the order a UI lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadPhaseKind {
    #[default]
    Null,
    Quadtree,
    Bvh,
}

impl BroadPhaseKind {
    pub const ALL: [BroadPhaseKind; 3] = [BroadPhaseKind::Null, BroadPhaseKind::Quadtree, BroadPhaseKind::Bvh];

    /// Maps a selector index (0 = null, 1 = quadtree, 2 = bvh).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BroadPhaseKind::Null => "null",
            BroadPhaseKind::Quadtree => "quadtree",
            BroadPhaseKind::Bvh => "bvh",
        }
    }

    /// Creates an empty broad phase of this kind.
    pub fn create(self, quadtree: &QuadtreeConfig) -> Box<dyn BroadPhase> {
        match self {
            BroadPhaseKind::Null => Box::new(NullBroadPhase::new()),
            BroadPhaseKind::Quadtree => Box::new(Quadtree::new(*quadtree)),
            BroadPhaseKind::Bvh => Box::new(Bvh::new()),
        }
    }
}

impl fmt::Display for BroadPhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BroadPhaseKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "null" => Ok(BroadPhaseKind::Null),
            "quadtree" => Ok(BroadPhaseKind::Quadtree),
            "bvh" => Ok(BroadPhaseKind::Bvh),
            _ => Err(ConfigError::UnknownBroadPhase(s.to_string())),
        }
    }
}

/// A body as the broad phase sees it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Proxy {
    pub index: usize,
    pub aabb: Aabb,
    pub is_static: bool,
}

impl Proxy {
    /// Whether this proxy and `other` form a candidate pair.
    pub fn pairs_with(&self, other: &Proxy) -> bool {
        self.index != other.index
            && !(self.is_static && other.is_static)
            && self.aabb.intersects(&other.aabb)
    }
}

/// Proxies for every body with a finite AABB, in body order.
pub(crate) fn collect_proxies(bodies: &[Body]) -> Vec<Proxy> {
    bodies
        .iter()
        .enumerate()
        .filter_map(|(index, body)| {
            let aabb = body.aabb();
            if aabb.min.is_finite() && aabb.max.is_finite() {
                Some(Proxy {
                    index,
                    aabb,
                    is_static: body.is_static(),
                })
            } else {
                log::trace!("body {index} has a non-finite AABB, skipped by the broad phase");
                None
            }
        })
        .collect()
}

/// Deduplicating, ordered pair collector.
#[derive(Debug, Default)]
pub(crate) struct PairSet(BTreeSet<(usize, usize)>);

impl PairSet {
    pub fn add(&mut self, a: &Proxy, b: &Proxy) {
        if a.pairs_with(b) {
            self.0.insert((a.index.min(b.index), a.index.max(b.index)));
        }
    }

    pub fn into_sorted(self) -> Vec<(usize, usize)> {
        self.0.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_index() {
        assert_eq!(BroadPhaseKind::from_index(0), Some(BroadPhaseKind::Null));
        assert_eq!(BroadPhaseKind::from_index(1), Some(BroadPhaseKind::Quadtree));
        assert_eq!(BroadPhaseKind::from_index(2), Some(BroadPhaseKind::Bvh));
        assert_eq!(BroadPhaseKind::from_index(3), None);
        for kind in BroadPhaseKind::ALL {
            assert_eq!(BroadPhaseKind::from_index(kind.index()), Some(kind));
        }
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("BVH".parse::<BroadPhaseKind>(), Ok(BroadPhaseKind::Bvh));
        assert_eq!(" quadtree ".parse::<BroadPhaseKind>(), Ok(BroadPhaseKind::Quadtree));
        assert_eq!(
            "octree".parse::<BroadPhaseKind>(),
            Err(ConfigError::UnknownBroadPhase("octree".to_string()))
        );
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let json = serde_json::to_string(&BroadPhaseKind::Quadtree).unwrap();
        assert_eq!(json, "\"quadtree\"");
        let kind: BroadPhaseKind = serde_json::from_str("\"bvh\"").unwrap();
        assert_eq!(kind, BroadPhaseKind::Bvh);
    }

    #[test]
    fn test_create_names() {
        let config = QuadtreeConfig::default();
        for kind in BroadPhaseKind::ALL {
            let broad_phase = kind.create(&config);
            assert_eq!(broad_phase.name(), kind.as_str());
            assert_eq!(broad_phase.potential_collision_count(), 0);
        }
    }
}
