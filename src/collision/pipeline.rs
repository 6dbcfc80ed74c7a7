//! Value-returning collision stages run once per fixed tick:
//! broad-phase pairs -> verified overlaps -> contacts with geometry.

use super::contact::{Contact, ContactManifold};
use super::narrow_phase;
use crate::broad_phase::BroadPhase;
use crate::error::DegenerateContact;
use crate::objects::Body;

/// How far a normal's squared length may stray from 1 before it is rejected.
const UNIT_TOLERANCE: f64 = 1e-6;

/// One provisional contact per candidate pair of the last broad-phase build.
///
/// Pairs referring to bodies outside `bodies` are skipped.
pub fn create_broad_phase_contacts(broad_phase: &dyn BroadPhase, bodies: &[Body]) -> Vec<Contact> {
    broad_phase
        .query_pairs()
        .into_iter()
        .filter(|&(a, b)| a < bodies.len() && b < bodies.len())
        .map(|(a, b)| Contact::provisional(a, b))
        .collect()
}

/// Keeps only the candidates whose shapes really overlap.
pub fn create_narrow_phase_contacts(contacts: Vec<Contact>, bodies: &[Body]) -> Vec<Contact> {
    contacts
        .into_iter()
        .filter(|contact| narrow_phase::overlaps(bodies, contact.body_a, contact.body_b))
        .collect()
}

/// Fills in normal, depth and contact points.
///
/// On error the contact is left as it was.
pub fn update_contact_info(contact: &mut Contact, bodies: &[Body]) -> Result<(), DegenerateContact> {
    let degenerate = DegenerateContact {
        body_a: contact.body_a,
        body_b: contact.body_b,
    };

    let manifold = narrow_phase::collide(bodies, contact.body_a, contact.body_b).ok_or(degenerate)?;
    if !is_usable(&manifold) {
        return Err(degenerate);
    }

    contact.set_manifold(manifold);
    Ok(())
}

/// Runs [`update_contact_info`] over every contact, dropping the degenerate
/// ones. Returns the usable contacts and how many were dropped.
///
/// Drops are not logged here; the caller decides how to report them.
pub fn resolve_contact_info(contacts: Vec<Contact>, bodies: &[Body]) -> (Vec<Contact>, usize) {
    let mut dropped = 0;
    let resolved = contacts
        .into_iter()
        .filter_map(|mut contact| match update_contact_info(&mut contact, bodies) {
            Ok(()) => Some(contact),
            Err(_) => {
                dropped += 1;
                None
            }
        })
        .collect();
    (resolved, dropped)
}

fn is_usable(manifold: &ContactManifold) -> bool {
    manifold.normal.is_finite()
        && (manifold.normal.magnitude_squared() - 1.0).abs() < UNIT_TOLERANCE
        && manifold.depth.is_finite()
        && manifold.depth >= 0.0
        && !manifold.points.is_empty()
        && manifold.points.iter().all(|p| p.is_finite())
}
