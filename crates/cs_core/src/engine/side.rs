use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Side;

/// The two team slots of a match, in the order the caller passed them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TeamSlot {
    A,
    B,
}

impl TeamSlot {
    pub fn other(&self) -> TeamSlot {
        match self {
            TeamSlot::A => TeamSlot::B,
            TeamSlot::B => TeamSlot::A,
        }
    }
}

/// Single source of truth for which team plays which side.
///
/// Collapses the side bookkeeping into one value so CT/TR derivation cannot
/// drift between the match loop and the round resolver.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SideAssignment {
    side_a: Side,
}

impl SideAssignment {
    pub fn new(side_a: Side) -> Self {
        Self { side_a }
    }

    /// Coin-flip initial assignment.
    pub fn random(rng: &mut impl Rng) -> Self {
        let side_a = if rng.gen_bool(0.5) { Side::CT } else { Side::TR };
        Self { side_a }
    }

    pub fn side_of(&self, slot: TeamSlot) -> Side {
        match slot {
            TeamSlot::A => self.side_a,
            TeamSlot::B => self.side_a.opposite(),
        }
    }

    pub fn slot_on(&self, side: Side) -> TeamSlot {
        if self.side_a == side {
            TeamSlot::A
        } else {
            TeamSlot::B
        }
    }

    pub fn ct_slot(&self) -> TeamSlot {
        self.slot_on(Side::CT)
    }

    pub fn tr_slot(&self) -> TeamSlot {
        self.slot_on(Side::TR)
    }

    /// Halftime swap.
    pub fn swapped(&self) -> Self {
        Self { side_a: self.side_a.opposite() }
    }
}
