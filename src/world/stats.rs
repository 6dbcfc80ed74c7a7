/// Counters a host can show on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorldStats {
    pub body_count: usize,
    /// Broad-phase candidate pairs in the last fixed step.
    pub potential_collisions: usize,
    /// Broad-phase candidate pairs summed over every fixed step.
    pub total_potential_collisions: u64,
    /// Contacts handed to the solver in the last fixed step.
    pub contacts: usize,
    /// Fixed steps run in the last host frame.
    pub substeps: usize,
    /// Contacts dropped for degenerate geometry since the world was created.
    pub degenerate_contacts: u64,
}

/// Outcome of one host frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Fixed steps run.
    pub substeps: usize,
    /// Contacts solved, summed over the fixed steps.
    pub contacts: usize,
}
