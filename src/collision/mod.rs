pub mod aabb;
pub mod contact;
pub mod narrow_phase;
pub mod pipeline;

// Re-export key types
pub use aabb::Aabb;
pub use contact::{Contact, ContactManifold, ContactPoints};
pub use pipeline::{
    create_broad_phase_contacts, create_narrow_phase_contacts, resolve_contact_info,
    update_contact_info,
};
