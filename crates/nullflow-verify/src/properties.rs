//! Exhaustive property checks for the lattice operators
//!
//! Every check enumerates the full state space (15 states, 225 ordered
//! pairs) rather than sampling it, and repeats the enumeration at several
//! base slots so single-word, boundary and multi-word storage paths are
//! all exercised.

use nullflow_core::{tables, FlowInfo, NullState, WORD_SLOTS};
use tracing::{debug, info};

use crate::report::{PropertyResult, PropertyStatus, VerificationReport};

/// Collects evidence for one property as cases run.
struct PropertyCheck {
    name: &'static str,
    cases: usize,
    violations: Vec<String>,
}

impl PropertyCheck {
    fn new(name: &'static str) -> Self {
        PropertyCheck {
            name,
            cases: 0,
            violations: Vec::new(),
        }
    }

    fn record(&mut self, ok: bool, describe: impl FnOnce() -> String) {
        self.cases += 1;
        if !ok {
            self.violations.push(describe());
        }
    }

    fn finish(self) -> PropertyResult {
        let status = if self.violations.is_empty() {
            PropertyStatus::Proven
        } else {
            PropertyStatus::Violated
        };
        debug!(property = self.name, cases = self.cases, ?status, "property checked");
        PropertyResult {
            name: self.name.to_string(),
            status,
            checked_cases: self.cases,
            violations: self.violations,
        }
    }
}

/// Runs the full property suite against the engine.
pub struct Verifier {
    base_slots: Vec<usize>,
}

impl Default for Verifier {
    fn default() -> Self {
        // first word, first slot of the second word, third word
        Verifier {
            base_slots: vec![0, WORD_SLOTS, 2 * WORD_SLOTS],
        }
    }
}

impl Verifier {
    pub fn new(base_slots: Vec<usize>) -> Self {
        Verifier { base_slots }
    }

    /// Run every check and aggregate the outcomes.
    pub fn verify_all(&self) -> VerificationReport {
        let results = vec![
            self.verify_unary_operators(),
            self.verify_combinator_agreement(),
            self.verify_merge_symmetry(),
            self.verify_merge_idempotence(),
            self.verify_sequential_identity(),
            self.verify_growth_preservation(),
            self.verify_copy_independence(),
            self.verify_assignment_rules(),
            self.verify_mixed_width_combination(),
        ];
        let report = VerificationReport { results };
        info!(
            passed = report.passed(),
            total_cases = report.total_cases(),
            "verification run complete"
        );
        report
    }

    /// Each unary operator agrees with its transition table, leaves its
    /// receiver untouched and does not disturb neighboring slots.
    pub fn verify_unary_operators(&self) -> PropertyResult {
        type UnaryOp = fn(&FlowInfo, usize) -> FlowInfo;
        let operators: [(UnaryOp, &nullflow_core::UnaryTable); 5] = [
            (
                FlowInfo::mark_as_definitely_non_null,
                tables::mark_as_definitely_non_null(),
            ),
            (
                FlowInfo::mark_as_definitely_null,
                tables::mark_as_definitely_null(),
            ),
            (
                FlowInfo::mark_as_definitely_unknown,
                tables::mark_as_definitely_unknown(),
            ),
            (
                FlowInfo::mark_as_compared_equal_to_non_null,
                tables::mark_as_compared_equal_to_non_null(),
            ),
            (
                FlowInfo::mark_as_compared_equal_to_null,
                tables::mark_as_compared_equal_to_null(),
            ),
        ];

        let mut check = PropertyCheck::new("unary operators agree with their tables");
        for &base in &self.base_slots {
            for state in NullState::ALL {
                for (op, table) in &operators {
                    let mut info = FlowInfo::new(base + 2);
                    info.set_null_state(base, state);
                    info.set_null_state(base + 1, NullState::DefinitelyNull);

                    let result = op(&info, base);
                    let expected = table.apply(state);
                    check.record(
                        result.null_state_of(base) == expected
                            && info.null_state_of(base) == state
                            && result.null_state_of(base + 1) == NullState::DefinitelyNull,
                        || {
                            format!(
                                "{} at slot {base} on {}: got {}, expected {}",
                                table.name(),
                                state.name(),
                                result.null_state_of(base).name(),
                                expected.name()
                            )
                        },
                    );
                }
            }
        }
        check.finish()
    }

    /// Each combinator agrees with its transition table over all 225
    /// ordered state pairs and leaves both operands untouched.
    pub fn verify_combinator_agreement(&self) -> PropertyResult {
        type BinaryOp = fn(&FlowInfo, &FlowInfo) -> FlowInfo;
        let combinators: [(BinaryOp, &nullflow_core::BinaryTable); 3] = [
            (
                FlowInfo::add_initializations_from,
                tables::add_initializations_from(),
            ),
            (
                FlowInfo::add_potential_initializations_from,
                tables::add_potential_initializations_from(),
            ),
            (FlowInfo::merged_with, tables::merged_with()),
        ];

        let mut check = PropertyCheck::new("combinators agree with their tables");
        for &base in &self.base_slots {
            for left in NullState::ALL {
                for right in NullState::ALL {
                    for (op, table) in &combinators {
                        let mut a = FlowInfo::new(base + 1);
                        a.set_null_state(base, left);
                        let mut b = FlowInfo::new(base + 1);
                        b.set_null_state(base, right);

                        let result = op(&a, &b);
                        let expected = table.apply(left, right);
                        check.record(
                            result.null_state_of(base) == expected
                                && a.null_state_of(base) == left
                                && b.null_state_of(base) == right,
                            || {
                                format!(
                                    "{} at slot {base} on ({}, {}): got {}, expected {}",
                                    table.name(),
                                    left.name(),
                                    right.name(),
                                    result.null_state_of(base).name(),
                                    expected.name()
                                )
                            },
                        );
                    }
                }
            }
        }
        check.finish()
    }

    /// `mergedWith` commutes over the whole state, null bits and
    /// assignment planes included.
    pub fn verify_merge_symmetry(&self) -> PropertyResult {
        let mut check = PropertyCheck::new("merge is symmetric");
        for &base in &self.base_slots {
            for left in NullState::ALL {
                for right in NullState::ALL {
                    let mut a = FlowInfo::new(base + 1);
                    a.set_null_state(base, left);
                    let a = a.mark_as_definitely_assigned(base);
                    let mut b = FlowInfo::new(base + 1);
                    b.set_null_state(base, right);

                    check.record(a.merged_with(&b) == b.merged_with(&a), || {
                        format!(
                            "merge of ({}, {}) at slot {base} differs by operand order",
                            left.name(),
                            right.name()
                        )
                    });
                }
            }
        }
        check.finish()
    }

    /// Merging a state with a copy of itself changes nothing.
    pub fn verify_merge_idempotence(&self) -> PropertyResult {
        let mut check = PropertyCheck::new("merge is idempotent");
        for &base in &self.base_slots {
            for state in NullState::ALL {
                let mut info = FlowInfo::new(base + 1);
                info.set_null_state(base, state);
                let info = info.mark_as_definitely_assigned(base);

                check.record(info.merged_with(&info.copy()) == info, || {
                    format!("self-merge of {} at slot {base} is not the identity", state.name())
                });
            }
        }
        check.finish()
    }

    /// A freshly created state is the identity of sequential combination
    /// on either side.
    pub fn verify_sequential_identity(&self) -> PropertyResult {
        let mut check = PropertyCheck::new("fresh state is the sequential identity");
        for &base in &self.base_slots {
            for state in NullState::ALL {
                let mut info = FlowInfo::new(base + 1);
                info.set_null_state(base, state);
                let fresh = FlowInfo::new(base + 1);

                check.record(
                    info.add_initializations_from(&fresh) == info
                        && fresh.add_initializations_from(&info).null_state_of(base) == state,
                    || {
                        format!(
                            "sequencing {} with a fresh state at slot {base} is not the identity",
                            state.name()
                        )
                    },
                );
            }
        }
        check.finish()
    }

    /// Growing storage preserves every already-set slot and reads new
    /// slots as `start`.
    pub fn verify_growth_preservation(&self) -> PropertyResult {
        let mut check = PropertyCheck::new("growth preserves existing slots");
        let mut info = FlowInfo::new(WORD_SLOTS);
        for (slot, state) in NullState::ALL.into_iter().enumerate() {
            info.set_null_state(slot, state);
        }
        let before = info.copy();
        info.grow(2 * WORD_SLOTS);

        for slot in 0..before.slot_capacity() {
            check.record(
                info.null_state_of(slot) == before.null_state_of(slot),
                || format!("slot {slot} changed across growth"),
            );
        }
        for slot in before.slot_capacity()..info.slot_capacity() {
            check.record(info.null_state_of(slot) == NullState::Start, || {
                format!("new slot {slot} does not read start")
            });
        }
        check.finish()
    }

    /// Mutating a copy never leaks back into the original.
    pub fn verify_copy_independence(&self) -> PropertyResult {
        let mut check = PropertyCheck::new("copies are independent");
        for &base in &self.base_slots {
            for state in NullState::ALL {
                let mut original = FlowInfo::new(base + 1);
                original.set_null_state(base, state);

                let mut copied = original.copy();
                copied.set_null_state(base, NullState::ProtectedNonNull);
                copied.set_null_state(base + WORD_SLOTS, NullState::DefinitelyNull);

                check.record(
                    original.null_state_of(base) == state
                        && original.null_state_of(base + WORD_SLOTS) == NullState::Start,
                    || format!("mutating a copy leaked into the original at slot {base}"),
                );
            }
        }
        check.finish()
    }

    /// Sequencing unions both assignment planes, partial-path sequencing
    /// unions potential only, and merging intersects definite while
    /// unioning potential.
    pub fn verify_assignment_rules(&self) -> PropertyResult {
        let mut check = PropertyCheck::new("assignment planes follow the combination rules");
        for &base in &self.base_slots {
            let left_only = FlowInfo::new(base + 2).mark_as_definitely_assigned(base);
            let right_only = FlowInfo::new(base + 2).mark_as_definitely_assigned(base + 1);

            let seq = left_only.add_initializations_from(&right_only);
            check.record(
                seq.is_definitely_assigned(base) && seq.is_definitely_assigned(base + 1),
                || format!("sequencing lost a definite assignment near slot {base}"),
            );

            let partial = left_only.add_potential_initializations_from(&right_only);
            check.record(
                partial.is_definitely_assigned(base)
                    && !partial.is_definitely_assigned(base + 1)
                    && partial.is_potentially_assigned(base + 1),
                || format!("partial-path sequencing mishandled slot {}", base + 1),
            );

            let merged = left_only.merged_with(&right_only);
            check.record(
                !merged.is_definitely_assigned(base)
                    && !merged.is_definitely_assigned(base + 1)
                    && merged.is_potentially_assigned(base)
                    && merged.is_potentially_assigned(base + 1),
                || format!("merge mishandled assignment planes near slot {base}"),
            );
        }
        check.finish()
    }

    /// Combining operands of different widths treats the missing slots of
    /// the narrower one as `start`.
    pub fn verify_mixed_width_combination(&self) -> PropertyResult {
        let mut check = PropertyCheck::new("narrow operands are zero-extended");
        let merge_table = tables::merged_with();
        for state in NullState::ALL {
            let narrow = FlowInfo::new(1);
            let mut wide = FlowInfo::new(2 * WORD_SLOTS);
            wide.set_null_state(WORD_SLOTS + 1, state);

            let expected = merge_table.apply(state, NullState::Start);
            let a = wide.merged_with(&narrow);
            let b = narrow.merged_with(&wide);
            check.record(
                a.null_state_of(WORD_SLOTS + 1) == expected
                    && b.null_state_of(WORD_SLOTS + 1) == expected
                    && b.slot_capacity() == wide.slot_capacity(),
                || {
                    format!(
                        "mixed-width merge of {} produced {} / {}, expected {}",
                        state.name(),
                        a.null_state_of(WORD_SLOTS + 1).name(),
                        b.null_state_of(WORD_SLOTS + 1).name(),
                        expected.name()
                    )
                },
            );
        }
        check.finish()
    }
}
