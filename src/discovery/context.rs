//! Blackboard threaded through every discovery state handler.
//!
//! `DiscoveryContext` holds the working set the handlers decide on: the
//! candidate ids, the cursor into them, the focused pet and the radius
//! knobs.  The engine rewrites the candidate list on every recompute; the
//! handlers only read it and move the cursor.

use crate::model::PetId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryContext {
    /// Presentable pet ids, catalog order.  In Focused mode this is exactly
    /// the focused pet.
    pub candidates: Vec<PetId>,
    /// Index into `candidates` of the pet on screen.
    pub cursor: usize,
    /// Pet shown outside the normal browsing order.
    pub focused: Option<PetId>,
    /// Account's discovery radius.
    pub radius_km: u16,
    /// Radius constraint lifted.
    pub global: bool,
    /// Number of candidate recomputes so far.
    pub recomputes: u64,
}

impl DiscoveryContext {
    pub fn new(radius_km: u16) -> Self {
        Self {
            radius_km,
            ..Self::default()
        }
    }

    /// Pet under the cursor.
    pub fn current(&self) -> Option<&PetId> {
        self.candidates.get(self.cursor)
    }

    pub fn has_candidates(&self) -> bool {
        !self.candidates.is_empty()
    }

    pub fn is_focused(&self) -> bool {
        self.focused.is_some()
    }

    /// Replace the working set and rewind the cursor.
    pub fn replace_candidates(&mut self, candidates: Vec<PetId>) {
        self.candidates = candidates;
        self.cursor = 0;
        self.recomputes += 1;
    }

    /// Drop `pet_id` from the working set, keeping the cursor on the pet
    /// that followed it.  Wraps to 0 past the end.  Returns `false` if the
    /// pet was not a candidate.
    pub fn remove_candidate(&mut self, pet_id: &str) -> bool {
        let Some(idx) = self.candidates.iter().position(|c| c == pet_id) else {
            return false;
        };
        self.candidates.remove(idx);
        if idx < self.cursor {
            self.cursor -= 1;
        }
        if self.cursor >= self.candidates.len() {
            self.cursor = 0;
        }
        true
    }

    /// Move to the next candidate, wrapping.
    pub fn advance(&mut self) {
        self.cursor = match self.candidates.len() {
            0 => 0,
            n => (self.cursor + 1) % n,
        };
    }
}
