use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an independent page region.
///
/// Each system owns exactly one SIG; no relation may connect two systems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SystemId(pub u32);

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "system#{}", self.0)
    }
}

/// Identifier of a staff within a sheet, used as governing context of alterations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StaffId(pub u32);

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "staff#{}", self.0)
    }
}

/// Stable identity of an Inter: owning system plus arena slot.
///
/// Slots are never reused within a SIG, so an id remains valid (pointing at a
/// REMOVED Inter if need be) for the lifetime of its graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InterId {
    pub system: SystemId,
    pub index: u32,
}

impl InterId {
    pub fn new(system: SystemId, index: u32) -> Self {
        Self { system, index }
    }
}

impl fmt::Display for InterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inter:{}/{}", self.system.0, self.index)
    }
}
