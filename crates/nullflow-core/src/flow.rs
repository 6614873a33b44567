//! Packed flow state and its transformation operators
//!
//! A [`FlowInfo`] records, for every tracked variable slot, the canonical
//! nullness state plus definite/potential assignment bits. Storage is a
//! growable vector of 64-slot words, each word holding six `u64` bit
//! planes; one inline word covers the common case of at most 64 slots.
//!
//! Operators follow a copy-on-write contract: they take `&self`, derive a
//! fresh copy and return it, never mutating the receiver. A flow-analysis
//! driver owns one `FlowInfo` per program point and combines them at
//! sequence and confluence points through the three combinators.

use smallvec::SmallVec;

use crate::state::NullState;
use crate::tables::{self, BinaryTable, UnaryTable};

/// Number of variable slots covered by one storage word.
pub const WORD_SLOTS: usize = 64;

/// Bit planes for one 64-slot segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Word {
    definite_inits: u64,
    potential_inits: u64,
    bit1: u64,
    bit2: u64,
    bit3: u64,
    bit4: u64,
}

impl Word {
    /// Fixture byte of the slot at `bit` within this word.
    fn null_bits(&self, bit: u32) -> u8 {
        ((((self.bit1 >> bit) & 1) as u8) << 5)
            | ((((self.bit2 >> bit) & 1) as u8) << 4)
            | ((((self.bit3 >> bit) & 1) as u8) << 3)
            | ((((self.bit4 >> bit) & 1) as u8) << 2)
    }

    fn set_null_bits(&mut self, bit: u32, bits: u8) {
        let mask = 1u64 << bit;
        self.bit1 = (self.bit1 & !mask) | ((((bits >> 5) & 1) as u64) << bit);
        self.bit2 = (self.bit2 & !mask) | ((((bits >> 4) & 1) as u64) << bit);
        self.bit3 = (self.bit3 & !mask) | ((((bits >> 3) & 1) as u64) << bit);
        self.bit4 = (self.bit4 & !mask) | ((((bits >> 2) & 1) as u64) << bit);
    }

    fn is_empty(&self) -> bool {
        *self == Word::default()
    }
}

/// How a combinator treats the assignment planes.
#[derive(Debug, Clone, Copy)]
enum AssignmentRule {
    /// Union of both definite and potential assignments (sequencing).
    UnionBoth,
    /// Union of potential assignments only (partial-path sequencing).
    UnionPotential,
    /// Intersection of definite, union of potential (confluence).
    Merge,
}

/// Per-analysis-point record of nullness and assignment knowledge.
///
/// Freshly created states hold `start` (all-zero bits) in every slot;
/// `start` is also what reads beyond the current capacity return, which
/// is what lets combinators zero-extend a narrower operand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowInfo {
    words: SmallVec<[Word; 1]>,
}

impl FlowInfo {
    /// A state covering at least `slot_count` slots, all `start`.
    pub fn new(slot_count: usize) -> Self {
        let word_count = slot_count.div_ceil(WORD_SLOTS).max(1);
        FlowInfo {
            words: SmallVec::from_elem(Word::default(), word_count),
        }
    }

    /// Number of slots currently backed by storage.
    pub fn slot_capacity(&self) -> usize {
        self.words.len() * WORD_SLOTS
    }

    /// Extend storage to cover at least `slot_count` slots. Existing slot
    /// bits are untouched; new slots read `start`. A no-op when the
    /// capacity already suffices.
    pub fn ensure_capacity(&mut self, slot_count: usize) {
        let word_count = slot_count.div_ceil(WORD_SLOTS).max(1);
        if word_count > self.words.len() {
            tracing::debug!(
                from = self.words.len(),
                to = word_count,
                "growing flow state"
            );
            self.words.resize(word_count, Word::default());
        }
    }

    /// Extend storage by `additional_slots` more slots.
    pub fn grow(&mut self, additional_slots: usize) {
        self.ensure_capacity(self.slot_capacity() + additional_slots);
    }

    /// Independent deep copy; the basis of the copy-on-write contract.
    pub fn copy(&self) -> FlowInfo {
        self.clone()
    }

    fn word(&self, index: usize) -> Word {
        self.words.get(index).copied().unwrap_or_default()
    }

    /// Canonical state of `slot`. Slots beyond the capacity read `start`.
    ///
    /// # Panics
    ///
    /// Panics if the slot holds the reserved bit pattern, which can only
    /// mean the state was corrupted.
    pub fn null_state_of(&self, slot: usize) -> NullState {
        let word = self.word(slot / WORD_SLOTS);
        let bits = word.null_bits((slot % WORD_SLOTS) as u32);
        match NullState::try_from_bits(bits) {
            Ok(state) => state,
            Err(err) => {
                tracing::error!(slot, %err, "corrupted flow state");
                panic!("corrupted flow state at slot {slot}: {err}");
            }
        }
    }

    /// Overwrite the state of `slot`, growing storage as needed.
    pub fn set_null_state(&mut self, slot: usize, state: NullState) {
        self.ensure_capacity(slot + 1);
        self.words[slot / WORD_SLOTS].set_null_bits((slot % WORD_SLOTS) as u32, state.bits());
    }

    /// Whether `slot` carries any nullness knowledge.
    pub fn has_null_info_for(&self, slot: usize) -> bool {
        self.null_state_of(slot).has_null_info()
    }

    /// Whether `slot` is null on every path reaching this point.
    pub fn is_definitely_null(&self, slot: usize) -> bool {
        self.null_state_of(slot).is_definitely_null()
    }

    /// Whether `slot` is non-null on every path reaching this point.
    pub fn is_definitely_non_null(&self, slot: usize) -> bool {
        self.null_state_of(slot).is_definitely_non_null()
    }

    /// Whether `slot` holds an unclassifiable value on every path.
    pub fn is_definitely_unknown(&self, slot: usize) -> bool {
        self.null_state_of(slot).is_definitely_unknown()
    }

    /// Whether `slot` is null on at least one path.
    pub fn is_potentially_null(&self, slot: usize) -> bool {
        self.null_state_of(slot).is_potentially_null()
    }

    /// Whether `slot` is non-null on at least one path.
    pub fn is_potentially_non_null(&self, slot: usize) -> bool {
        self.null_state_of(slot).is_potentially_non_null()
    }

    /// Whether `slot` is unknown on at least one path.
    pub fn is_potentially_unknown(&self, slot: usize) -> bool {
        self.null_state_of(slot).is_potentially_unknown()
    }

    /// Whether `slot` was compared equal to null and not reassigned since.
    pub fn is_protected_null(&self, slot: usize) -> bool {
        self.null_state_of(slot).is_protected_null()
    }

    /// Whether `slot` was compared equal to non-null and not reassigned
    /// since.
    pub fn is_protected_non_null(&self, slot: usize) -> bool {
        self.null_state_of(slot).is_protected_non_null()
    }

    /// Whether `slot` is assigned on every path reaching this point.
    pub fn is_definitely_assigned(&self, slot: usize) -> bool {
        self.word(slot / WORD_SLOTS).definite_inits & (1u64 << (slot % WORD_SLOTS)) != 0
    }

    /// Whether `slot` is assigned on at least one path.
    pub fn is_potentially_assigned(&self, slot: usize) -> bool {
        self.word(slot / WORD_SLOTS).potential_inits & (1u64 << (slot % WORD_SLOTS)) != 0
    }

    /// Record an unconditional assignment to `slot`.
    pub fn mark_as_definitely_assigned(&self, slot: usize) -> FlowInfo {
        let mut result = self.copy();
        result.ensure_capacity(slot + 1);
        let mask = 1u64 << (slot % WORD_SLOTS);
        let word = &mut result.words[slot / WORD_SLOTS];
        word.definite_inits |= mask;
        word.potential_inits |= mask;
        result
    }

    fn apply_unary(&self, table: &UnaryTable, slot: usize) -> FlowInfo {
        let mut result = self.copy();
        result.ensure_capacity(slot + 1);
        let input = result.null_state_of(slot);
        let output = table.apply(input);
        result.words[slot / WORD_SLOTS].set_null_bits((slot % WORD_SLOTS) as u32, output.bits());
        result
    }

    /// Force `slot` to `def. non null`.
    pub fn mark_as_definitely_non_null(&self, slot: usize) -> FlowInfo {
        self.apply_unary(tables::mark_as_definitely_non_null(), slot)
    }

    /// Force `slot` to `def. null`.
    pub fn mark_as_definitely_null(&self, slot: usize) -> FlowInfo {
        self.apply_unary(tables::mark_as_definitely_null(), slot)
    }

    /// Force `slot` to `def. unknown`.
    pub fn mark_as_definitely_unknown(&self, slot: usize) -> FlowInfo {
        self.apply_unary(tables::mark_as_definitely_unknown(), slot)
    }

    /// Record that `slot` was compared equal to a non-null value.
    pub fn mark_as_compared_equal_to_non_null(&self, slot: usize) -> FlowInfo {
        self.apply_unary(tables::mark_as_compared_equal_to_non_null(), slot)
    }

    /// Record that `slot` was compared equal to null.
    pub fn mark_as_compared_equal_to_null(&self, slot: usize) -> FlowInfo {
        self.apply_unary(tables::mark_as_compared_equal_to_null(), slot)
    }

    fn or_plane_bit(&self, slot: usize, plane: fn(&mut Word) -> &mut u64, what: &str) -> FlowInfo {
        let mut result = self.copy();
        result.ensure_capacity(slot + 1);
        let mask = 1u64 << (slot % WORD_SLOTS);
        let word = &mut result.words[slot / WORD_SLOTS];
        if word.bit1 & mask != 0 {
            tracing::error!(slot, what, "taint mark in unexpected state");
            panic!("adding '{what}' mark in unexpected state at slot {slot}");
        }
        *plane(word) |= mask;
        result
    }

    /// OR the null bit of `slot`, as loop analysis does when a null value
    /// may flow around a back-edge. The slot must not hold a definite or
    /// protected state.
    pub fn mark_potentially_null_bit(&self, slot: usize) -> FlowInfo {
        self.or_plane_bit(slot, |w| &mut w.bit2, "potentially null")
    }

    /// OR the non-null bit of `slot`.
    pub fn mark_potentially_non_null_bit(&self, slot: usize) -> FlowInfo {
        self.or_plane_bit(slot, |w| &mut w.bit3, "potentially non-null")
    }

    /// OR the unknown bit of `slot`.
    pub fn mark_potentially_unknown_bit(&self, slot: usize) -> FlowInfo {
        self.or_plane_bit(slot, |w| &mut w.bit4, "unknown")
    }

    fn combine(&self, other: &FlowInfo, table: &BinaryTable, rule: AssignmentRule) -> FlowInfo {
        let mut result = self.copy();
        // zero-extend the narrower operand; start slots on either side
        // fall through the table's start rows
        let word_count = result.words.len().max(other.words.len());
        result.words.resize(word_count, Word::default());
        for index in 0..word_count {
            let theirs = other.word(index);
            let word = &mut result.words[index];
            match rule {
                AssignmentRule::UnionBoth => {
                    word.definite_inits |= theirs.definite_inits;
                    word.potential_inits |= theirs.potential_inits;
                }
                AssignmentRule::UnionPotential => {
                    word.potential_inits |= theirs.potential_inits;
                }
                AssignmentRule::Merge => {
                    word.definite_inits &= theirs.definite_inits;
                    word.potential_inits |= theirs.potential_inits;
                }
            }
            if word.is_empty() && theirs.is_empty() {
                continue;
            }
            for bit in 0..WORD_SLOTS as u32 {
                let left_bits = word.null_bits(bit);
                let right_bits = theirs.null_bits(bit);
                if left_bits == 0 && right_bits == 0 {
                    continue;
                }
                let slot = index * WORD_SLOTS + bit as usize;
                let left = decode_slot(slot, left_bits);
                let right = decode_slot(slot, right_bits);
                word.set_null_bits(bit, table.apply(left, right).bits());
            }
        }
        result
    }

    /// Sequential combination: model `other`'s effects happening
    /// unconditionally after `self`'s. Asymmetric.
    pub fn add_initializations_from(&self, other: &FlowInfo) -> FlowInfo {
        self.combine(other, tables::add_initializations_from(), AssignmentRule::UnionBoth)
    }

    /// Partial-path combination: model `other`'s effects happening on some
    /// but not all paths, e.g. a loop body. Asymmetric.
    pub fn add_potential_initializations_from(&self, other: &FlowInfo) -> FlowInfo {
        self.combine(
            other,
            tables::add_potential_initializations_from(),
            AssignmentRule::UnionPotential,
        )
    }

    /// Confluence join at a branch merge point. Symmetric.
    pub fn merged_with(&self, other: &FlowInfo) -> FlowInfo {
        self.combine(other, tables::merged_with(), AssignmentRule::Merge)
    }
}

fn decode_slot(slot: usize, bits: u8) -> NullState {
    match NullState::try_from_bits(bits) {
        Ok(state) => state,
        Err(err) => {
            tracing::error!(slot, %err, "corrupted flow state");
            panic!("corrupted flow state at slot {slot}: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_all_start() {
        let info = FlowInfo::new(10);
        assert_eq!(info.slot_capacity(), WORD_SLOTS);
        for slot in 0..info.slot_capacity() {
            assert_eq!(info.null_state_of(slot), NullState::Start);
            assert!(!info.is_definitely_assigned(slot));
        }
    }

    #[test]
    fn test_reads_beyond_capacity_are_start() {
        let info = FlowInfo::new(1);
        assert_eq!(info.null_state_of(500), NullState::Start);
        assert!(!info.is_potentially_assigned(500));
    }

    #[test]
    fn test_growth_preserves_existing_slots() {
        let mut info = FlowInfo::new(WORD_SLOTS);
        for (slot, state) in NullState::ALL.into_iter().enumerate() {
            info.set_null_state(slot, state);
        }
        let before = info.clone();
        info.grow(2 * WORD_SLOTS);
        assert_eq!(info.slot_capacity(), 3 * WORD_SLOTS);
        for slot in 0..WORD_SLOTS {
            assert_eq!(info.null_state_of(slot), before.null_state_of(slot));
        }
        for slot in WORD_SLOTS..info.slot_capacity() {
            assert_eq!(info.null_state_of(slot), NullState::Start);
        }
    }

    #[test]
    fn test_ensure_capacity_is_idempotent() {
        let mut info = FlowInfo::new(1);
        info.set_null_state(3, NullState::DefinitelyNull);
        info.ensure_capacity(200);
        let after_first = info.clone();
        info.ensure_capacity(200);
        info.ensure_capacity(64);
        assert_eq!(info, after_first);
    }

    #[test]
    fn test_copy_independence() {
        let original = FlowInfo::new(4).mark_as_definitely_null(2);
        let mut copied = original.copy();
        copied.set_null_state(2, NullState::DefinitelyNonNull);
        copied.set_null_state(3, NullState::PotentiallyNull);
        assert_eq!(original.null_state_of(2), NullState::DefinitelyNull);
        assert_eq!(original.null_state_of(3), NullState::Start);
    }

    #[test]
    fn test_mark_operators_leave_receiver_untouched() {
        let info = FlowInfo::new(4);
        let marked = info.mark_as_definitely_non_null(1);
        assert_eq!(info.null_state_of(1), NullState::Start);
        assert_eq!(marked.null_state_of(1), NullState::DefinitelyNonNull);
        assert!(marked.is_definitely_non_null(1));
    }

    #[test]
    fn test_mark_beyond_first_word() {
        let info = FlowInfo::new(WORD_SLOTS);
        let marked = info.mark_as_definitely_non_null(WORD_SLOTS + 1);
        assert_eq!(marked.slot_capacity(), 2 * WORD_SLOTS);
        assert_eq!(
            marked.null_state_of(WORD_SLOTS + 1),
            NullState::DefinitelyNonNull
        );
        for slot in 0..marked.slot_capacity() {
            if slot != WORD_SLOTS + 1 {
                assert_eq!(marked.null_state_of(slot), NullState::Start);
            }
        }
    }

    #[test]
    fn test_compared_equal_protects() {
        let info = FlowInfo::new(2).mark_as_definitely_null(0);
        let checked = info.mark_as_compared_equal_to_null(0);
        assert_eq!(checked.null_state_of(0), NullState::DefinitelyNull);
        let fresh = FlowInfo::new(2).mark_as_compared_equal_to_null(0);
        assert_eq!(fresh.null_state_of(0), NullState::ProtectedNull);
        assert!(fresh.is_protected_null(0));
    }

    #[test]
    fn test_merge_of_branches() {
        let base = FlowInfo::new(2);
        let then_branch = base.mark_as_definitely_non_null(0);
        let else_branch = base.mark_as_definitely_null(0);
        let merged = then_branch.merged_with(&else_branch);
        assert_eq!(merged.null_state_of(0), NullState::PotentiallyNullNonNull);
        assert_eq!(merged, else_branch.merged_with(&then_branch));
    }

    #[test]
    fn test_combinators_zero_extend_the_narrower_operand() {
        let narrow = FlowInfo::new(1).mark_as_definitely_null(0);
        let mut wide = FlowInfo::new(3 * WORD_SLOTS);
        wide.set_null_state(2 * WORD_SLOTS, NullState::DefinitelyNonNull);

        let merged = narrow.merged_with(&wide);
        assert_eq!(merged.slot_capacity(), 3 * WORD_SLOTS);
        // def. null merged with absent info weakens to pot. null
        assert_eq!(merged.null_state_of(0), NullState::PotentiallyNull);
        // def. non null merged with absent info weakens to pot. non null
        assert_eq!(
            merged.null_state_of(2 * WORD_SLOTS),
            NullState::PotentiallyNonNull
        );

        let seq = wide.add_initializations_from(&narrow);
        // sequencing from a narrower state keeps the wide slot intact
        assert_eq!(
            seq.null_state_of(2 * WORD_SLOTS),
            NullState::DefinitelyNonNull
        );
        assert_eq!(seq.null_state_of(0), NullState::DefinitelyNull);
    }

    #[test]
    fn test_potential_initializations_weaken_definites() {
        let before = FlowInfo::new(1);
        let body = before.mark_as_definitely_null(0);
        let after_loop = before.add_potential_initializations_from(&body);
        assert_eq!(after_loop.null_state_of(0), NullState::PotentiallyNull);
    }

    #[test]
    fn test_assignment_plane_rules() {
        let a = FlowInfo::new(2).mark_as_definitely_assigned(0);
        let b = FlowInfo::new(2).mark_as_definitely_assigned(1);

        let seq = a.add_initializations_from(&b);
        assert!(seq.is_definitely_assigned(0) && seq.is_definitely_assigned(1));

        let partial = a.add_potential_initializations_from(&b);
        assert!(partial.is_definitely_assigned(0));
        assert!(!partial.is_definitely_assigned(1));
        assert!(partial.is_potentially_assigned(1));

        let merged = a.merged_with(&b);
        assert!(!merged.is_definitely_assigned(0));
        assert!(!merged.is_definitely_assigned(1));
        assert!(merged.is_potentially_assigned(0) && merged.is_potentially_assigned(1));
    }

    #[test]
    fn test_taint_bits_accumulate() {
        let info = FlowInfo::new(1)
            .mark_potentially_null_bit(0)
            .mark_potentially_non_null_bit(0)
            .mark_potentially_unknown_bit(0);
        assert_eq!(
            info.null_state_of(0),
            NullState::PotentiallyNullNonNullUnknown
        );
    }

    #[test]
    #[should_panic(expected = "unexpected state")]
    fn test_taint_bit_on_definite_state_is_a_defect() {
        let info = FlowInfo::new(1).mark_as_definitely_null(0);
        let _ = info.mark_potentially_null_bit(0);
    }
}
