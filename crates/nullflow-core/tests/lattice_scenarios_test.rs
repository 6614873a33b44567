//! End-to-end scenarios exercising the state lattice through the public
//! `FlowInfo` surface, including multi-word growth.

use nullflow_core::prelude::*;

#[test]
fn null_check_then_assignment() {
    // if (o == null) { o = compute(); }
    let before = FlowInfo::new(1);
    let inside_then = before.mark_as_compared_equal_to_null(0);
    assert_eq!(inside_then.null_state_of(0), NullState::ProtectedNull);

    let after_assign = inside_then.mark_as_definitely_unknown(0);
    assert_eq!(after_assign.null_state_of(0), NullState::DefinitelyUnknown);

    // fall-through path keeps the protection narrowed the other way
    let inside_else = before.mark_as_compared_equal_to_non_null(0);
    assert_eq!(inside_else.null_state_of(0), NullState::ProtectedNonNull);

    let merged = after_assign.merged_with(&inside_else);
    assert!(merged.is_potentially_unknown(0));
}

#[test]
fn diamond_merge_weakens_to_potential() {
    let before = FlowInfo::new(4);
    let then_branch = before
        .mark_as_definitely_non_null(0)
        .mark_as_definitely_assigned(0);
    let else_branch = before
        .mark_as_definitely_null(0)
        .mark_as_definitely_assigned(0);

    let after = then_branch.merged_with(&else_branch);
    assert_eq!(after.null_state_of(0), NullState::PotentiallyNullNonNull);
    assert!(after.is_potentially_null(0));
    assert!(after.is_potentially_non_null(0));
    assert!(!after.is_definitely_null(0));
    assert!(!after.is_definitely_non_null(0));
    // assigned on both paths, so still definitely assigned
    assert!(after.is_definitely_assigned(0));
}

#[test]
fn loop_body_effects_are_potential_only() {
    // while (...) { o = null; }
    let before_loop = FlowInfo::new(1).mark_as_definitely_non_null(0);
    let body_exit = before_loop.mark_as_definitely_null(0).mark_as_definitely_assigned(0);

    let after_loop = before_loop.add_potential_initializations_from(&body_exit);
    assert_eq!(
        after_loop.null_state_of(0),
        NullState::PotentiallyNullNonNull
    );
    assert!(!after_loop.is_definitely_assigned(0));
    assert!(after_loop.is_potentially_assigned(0));
}

#[test]
fn sequencing_lets_later_knowledge_win() {
    let first = FlowInfo::new(2)
        .mark_as_definitely_null(0)
        .mark_as_definitely_non_null(1);
    let second = FlowInfo::new(2).mark_as_definitely_non_null(0);

    let combined = first.add_initializations_from(&second);
    // slot 0 overwritten by the later definite knowledge
    assert_eq!(combined.null_state_of(0), NullState::DefinitelyNonNull);
    // slot 1 untouched by the later state
    assert_eq!(combined.null_state_of(1), NullState::DefinitelyNonNull);
}

#[test]
fn growth_across_three_words() {
    let mut info = FlowInfo::new(WORD_SLOTS);
    info.set_null_state(0, NullState::DefinitelyNull);
    info.grow(WORD_SLOTS);

    let marked = info.mark_as_definitely_non_null(WORD_SLOTS + 1);
    assert_eq!(marked.null_state_of(0), NullState::DefinitelyNull);
    assert_eq!(
        marked.null_state_of(WORD_SLOTS + 1),
        NullState::DefinitelyNonNull
    );

    // marking past the second word grows again on the copy only
    let wide = marked.mark_as_definitely_unknown(2 * WORD_SLOTS + 7);
    assert_eq!(marked.slot_capacity(), 2 * WORD_SLOTS);
    assert_eq!(wide.slot_capacity(), 3 * WORD_SLOTS);
    assert_eq!(
        wide.null_state_of(2 * WORD_SLOTS + 7),
        NullState::DefinitelyUnknown
    );
    for slot in 0..wide.slot_capacity() {
        if slot == 0 || slot == WORD_SLOTS + 1 || slot == 2 * WORD_SLOTS + 7 {
            continue;
        }
        assert_eq!(wide.null_state_of(slot), NullState::Start);
    }
}

#[test]
fn merging_states_of_different_widths() {
    let narrow = FlowInfo::new(1).mark_as_definitely_null(0);
    let wide = FlowInfo::new(2 * WORD_SLOTS).mark_as_definitely_null(WORD_SLOTS + 3);

    let merged = narrow.merged_with(&wide);
    assert_eq!(merged.slot_capacity(), 2 * WORD_SLOTS);
    assert_eq!(merged.null_state_of(0), NullState::PotentiallyNull);
    assert_eq!(
        merged.null_state_of(WORD_SLOTS + 3),
        NullState::PotentiallyNull
    );
}

#[test]
fn every_state_survives_a_self_merge() {
    for (slot, state) in NullState::ALL.into_iter().enumerate() {
        let mut info = FlowInfo::new(NullState::ALL.len());
        info.set_null_state(slot, state);
        let merged = info.merged_with(&info.copy());
        assert_eq!(
            merged.null_state_of(slot),
            state,
            "self-merge must be the identity for {}",
            state.name()
        );
    }
}
