//! QuickCheck generators for lattice states and flow infos
//!
//! `NullState` and `FlowInfo` live in another crate, so the `Arbitrary`
//! impls go on local newtype wrappers.

use nullflow_core::{FlowInfo, NullState};
use quickcheck::{Arbitrary, Gen};

/// A uniformly drawn canonical state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArbState(pub NullState);

impl Arbitrary for ArbState {
    fn arbitrary(g: &mut Gen) -> Self {
        let state = g
            .choose(&NullState::ALL)
            .copied()
            .unwrap_or(NullState::Start);
        ArbState(state)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        // shrink toward start, the lattice bottom
        if self.0 == NullState::Start {
            quickcheck::empty_shrinker()
        } else {
            Box::new(std::iter::once(ArbState(NullState::Start)))
        }
    }
}

/// A flow state of random width with random slot contents, spanning up to
/// three storage words so multi-word paths get exercised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArbFlowInfo(pub FlowInfo);

impl Arbitrary for ArbFlowInfo {
    fn arbitrary(g: &mut Gen) -> Self {
        let slot_count = (usize::arbitrary(g) % 192) + 1;
        let mut info = FlowInfo::new(slot_count);
        for slot in 0..slot_count {
            if bool::arbitrary(g) {
                info.set_null_state(slot, ArbState::arbitrary(g).0);
            }
        }
        ArbFlowInfo(info)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        quickcheck::empty_shrinker()
    }
}
