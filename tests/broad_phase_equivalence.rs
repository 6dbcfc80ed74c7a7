use physics2d::broad_phase::{BroadPhaseKind, QuadtreeConfig};
use physics2d::collision::{
    create_broad_phase_contacts, create_narrow_phase_contacts, narrow_phase, resolve_contact_info,
};
use physics2d::{Aabb, Body, Circle, Polygon, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const HALF_SIZE: f64 = 40.0;

fn random_body(rng: &mut StdRng) -> Body {
    // Some bodies spawn outside the world bounds on purpose.
    let position = Vec2::new(
        rng.gen_range(-1.2 * HALF_SIZE..1.2 * HALF_SIZE),
        rng.gen_range(-1.2 * HALF_SIZE..1.2 * HALF_SIZE),
    );
    let rotation = rng.gen_range(-3.0..3.0);

    let body = match rng.gen_range(0..3) {
        0 => Body::new(Circle::new(rng.gen_range(0.5..4.0)).unwrap(), 1.0),
        1 => Body::new(
            Polygon::rectangle(rng.gen_range(0.5..6.0), rng.gen_range(0.5..6.0)).unwrap(),
            1.0,
        ),
        _ => Body::new(
            Polygon::regular(rng.gen_range(3..8), rng.gen_range(0.5..4.0)).unwrap(),
            1.0,
        ),
    };
    let body = body.at(position).with_rotation(rotation);

    if rng.gen_bool(0.15) {
        Body::new_static(body.shape.clone(), position).with_rotation(rotation)
    } else {
        body
    }
}

fn random_scene(seed: u64, count: usize) -> Vec<Body> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| random_body(&mut rng)).collect()
}

fn bounds() -> Aabb {
    Aabb::from_center_half_extents(Vec2::ZERO, Vec2::splat(HALF_SIZE))
}

/// Candidate pairs and verified contact pairs for one strategy.
fn run_pipeline(kind: BroadPhaseKind, bodies: &[Body]) -> (Vec<(usize, usize)>, Vec<(usize, usize)>) {
    let config = QuadtreeConfig {
        capacity: 3,
        max_depth: 7,
    };
    let mut broad_phase = kind.create(&config);
    broad_phase.build(&bounds(), bodies);
    let candidates = broad_phase.query_pairs();

    let contacts = create_broad_phase_contacts(broad_phase.as_ref(), bodies);
    let contacts = create_narrow_phase_contacts(contacts, bodies);
    let (contacts, dropped) = resolve_contact_info(contacts, bodies);
    assert_eq!(dropped, 0);

    let verified = contacts.iter().map(|c| (c.body_a, c.body_b)).collect();
    (candidates, verified)
}

#[test]
fn broad_phases_agree_on_random_scenes() {
    let mut total_contacts = 0;
    for seed in 0..20 {
        let bodies = random_scene(seed, 150);
        let (null_candidates, null_verified) = run_pipeline(BroadPhaseKind::Null, &bodies);

        for kind in [BroadPhaseKind::Quadtree, BroadPhaseKind::Bvh] {
            let (candidates, verified) = run_pipeline(kind, &bodies);
            assert_eq!(candidates, null_candidates, "{kind} candidates differ for seed {seed}");
            assert_eq!(verified, null_verified, "{kind} contacts differ for seed {seed}");
        }
        total_contacts += null_verified.len();
    }
    assert!(total_contacts > 0);
}

#[test]
fn candidate_pairs_are_normalised_and_never_static_static() {
    let bodies = random_scene(99, 200);
    for kind in BroadPhaseKind::ALL {
        let (candidates, _) = run_pipeline(kind, &bodies);
        assert!(candidates.windows(2).all(|w| w[0] < w[1]), "{kind} pairs not sorted");
        for &(a, b) in &candidates {
            assert!(a < b);
            assert!(!(bodies[a].is_static() && bodies[b].is_static()));
            assert!(bodies[a].aabb().intersects(&bodies[b].aabb()));
        }
    }
}

#[test]
fn every_true_overlap_is_a_candidate() {
    let bodies = random_scene(7, 120);
    for kind in BroadPhaseKind::ALL {
        let (candidates, _) = run_pipeline(kind, &bodies);
        for a in 0..bodies.len() {
            for b in (a + 1)..bodies.len() {
                if bodies[a].is_static() && bodies[b].is_static() {
                    continue;
                }
                if narrow_phase::overlaps(&bodies, a, b) {
                    assert!(candidates.binary_search(&(a, b)).is_ok(), "{kind} missed ({a}, {b})");
                }
            }
        }
    }
}

#[test]
fn swapped_pairs_have_negated_normals() {
    let bodies = random_scene(3, 120);
    let mut checked = 0;
    for a in 0..bodies.len() {
        for b in (a + 1)..bodies.len() {
            if let Some(forward) = narrow_phase::collide(&bodies, a, b) {
                let backward = narrow_phase::collide(&bodies, b, a).expect("overlap is symmetric");
                assert_eq!(forward.normal, -backward.normal);
                assert_eq!(forward.depth, backward.depth);
                checked += 1;
            }
        }
    }
    assert!(checked > 0);
}
