//! Transition tables of the nullness lattice, kept as literal data
//!
//! The semantics of every operator live in the row arrays at the bottom of
//! this file and nowhere else. Rows are `[input, output]` for the
//! single-variable operators and `[left, right, output]` for the
//! combinators, all in fixture bytes (see [`crate::state`]). The rows are
//! hydrated once into dense matrices indexed by state ordinal; a lookup
//! that misses a row is an internal-consistency defect and panics rather
//! than defaulting, because a silent default would mask corrupted states.
//!
//! Several combinator rows are deliberate approximations of the true
//! lattice join. They are load-bearing and must not be "corrected"; tests
//! pin them. The most notable:
//!
//! * sequential combination of `def. non null` (or `def. unknown`) with
//!   `pot. n & pot. nn & pot. un` drops the null bit, yielding
//!   `pot. non null`;
//! * merging `start` against a protected state keeps `start` instead of
//!   tainting the slot;
//! * several `pot. un`-bearing joins lose the unknown bit.

use std::sync::OnceLock;

use crate::state::NullState;

/// Exhaustive one-input transition table over the 15 canonical states.
pub struct UnaryTable {
    name: &'static str,
    out: [Option<NullState>; 16],
}

impl UnaryTable {
    fn hydrate(name: &'static str, rows: &[[u8; 2]]) -> Self {
        let mut out = [None; 16];
        for row in rows {
            let input = decode(name, row[0]);
            let output = decode(name, row[1]);
            if out[input.ordinal()].is_some() {
                panic!("{name}: duplicate row for input {input}");
            }
            out[input.ordinal()] = Some(output);
        }
        UnaryTable { name, out }
    }

    /// Look up the output state for `input`.
    pub fn apply(&self, input: NullState) -> NullState {
        match self.out[input.ordinal()] {
            Some(output) => output,
            None => {
                tracing::error!(table = self.name, input = %input, "missing transition row");
                panic!("{}: no transition for state {input}", self.name);
            }
        }
    }

    /// Operator name as it appears in the fixture tables.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Exhaustive two-input transition table over canonical state pairs.
pub struct BinaryTable {
    name: &'static str,
    out: [[Option<NullState>; 16]; 16],
}

impl BinaryTable {
    fn hydrate(name: &'static str, rows: &[[u8; 3]], symmetric: bool) -> Self {
        let mut out = [[None; 16]; 16];
        for row in rows {
            let left = decode(name, row[0]);
            let right = decode(name, row[1]);
            let output = decode(name, row[2]);
            insert(name, &mut out, left, right, output);
            if symmetric && left != right {
                insert(name, &mut out, right, left, output);
            }
        }
        BinaryTable { name, out }
    }

    /// Look up the output state for the pair `(left, right)`.
    pub fn apply(&self, left: NullState, right: NullState) -> NullState {
        match self.out[left.ordinal()][right.ordinal()] {
            Some(output) => output,
            None => {
                tracing::error!(
                    table = self.name,
                    left = %left,
                    right = %right,
                    "missing transition row"
                );
                panic!(
                    "{}: no transition for state pair ({left}, {right})",
                    self.name
                );
            }
        }
    }

    /// Operator name as it appears in the fixture tables.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

fn decode(table: &str, bits: u8) -> NullState {
    match NullState::try_from_bits(bits) {
        Ok(state) => state,
        Err(err) => panic!("{table}: non-canonical fixture byte: {err}"),
    }
}

fn insert(
    name: &str,
    out: &mut [[Option<NullState>; 16]; 16],
    left: NullState,
    right: NullState,
    output: NullState,
) {
    let cell = &mut out[left.ordinal()][right.ordinal()];
    match *cell {
        None => *cell = Some(output),
        Some(existing) if existing == output => {}
        Some(existing) => panic!(
            "{name}: conflicting rows for ({left}, {right}): {existing} vs {output}"
        ),
    }
}

/// Forces `def. non null` regardless of input.
pub fn mark_as_definitely_non_null() -> &'static UnaryTable {
    static TABLE: OnceLock<UnaryTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        UnaryTable::hydrate("markAsDefinitelyNonNull", &MARK_AS_DEFINITELY_NON_NULL)
    })
}

/// Forces `def. null` regardless of input.
pub fn mark_as_definitely_null() -> &'static UnaryTable {
    static TABLE: OnceLock<UnaryTable> = OnceLock::new();
    TABLE.get_or_init(|| UnaryTable::hydrate("markAsDefinitelyNull", &MARK_AS_DEFINITELY_NULL))
}

/// Forces `def. unknown` regardless of input.
pub fn mark_as_definitely_unknown() -> &'static UnaryTable {
    static TABLE: OnceLock<UnaryTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        UnaryTable::hydrate("markAsDefinitelyUnknown", &MARK_AS_DEFINITELY_UNKNOWN)
    })
}

/// Narrows toward `prot. non null` after an equality check against a
/// non-null value. Input-dependent: definite inputs stay definite.
pub fn mark_as_compared_equal_to_non_null() -> &'static UnaryTable {
    static TABLE: OnceLock<UnaryTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        UnaryTable::hydrate(
            "markAsComparedEqualToNonNull",
            &MARK_AS_COMPARED_EQUAL_TO_NON_NULL,
        )
    })
}

/// Narrows toward `prot. null` after an equality check against null.
pub fn mark_as_compared_equal_to_null() -> &'static UnaryTable {
    static TABLE: OnceLock<UnaryTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        UnaryTable::hydrate(
            "markAsComparedEqualToNull",
            &MARK_AS_COMPARED_EQUAL_TO_NULL,
        )
    })
}

/// Sequential combination: the right state's effects happen
/// unconditionally after the left's. Asymmetric; `start` is the identity
/// on either side.
pub fn add_initializations_from() -> &'static BinaryTable {
    static TABLE: OnceLock<BinaryTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        BinaryTable::hydrate("addInitializationsFrom", &ADD_INITIALIZATIONS_FROM, false)
    })
}

/// Partial-path combination: the right state's effects happen on some but
/// not all paths, weakening definite knowledge toward potential.
pub fn add_potential_initializations_from() -> &'static BinaryTable {
    static TABLE: OnceLock<BinaryTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        BinaryTable::hydrate(
            "addPotentialInitializationsFrom",
            &ADD_POTENTIAL_INITIALIZATIONS_FROM,
            false,
        )
    })
}

/// Confluence join at branch merge points. The fixture enumerates ordered
/// pairs only; hydration closes the table under symmetry.
pub fn merged_with() -> &'static BinaryTable {
    static TABLE: OnceLock<BinaryTable> = OnceLock::new();
    TABLE.get_or_init(|| BinaryTable::hydrate("mergedWith", &MERGED_WITH, true))
}

// Fixture rows. Every byte is one of the 15 canonical state values; the
// hydration step rejects anything else.

pub(crate) const MARK_AS_COMPARED_EQUAL_TO_NON_NULL: [[u8; 2]; 15] = [
    [0x00, 0x3C],
    [0x04, 0x2C],
    [0x08, 0x2C],
    [0x0C, 0x2C],
    [0x10, 0x3C],
    [0x14, 0x2C],
    [0x18, 0x2C],
    [0x1C, 0x3C],
    [0x24, 0x28],
    [0x28, 0x28],
    [0x2C, 0x2C],
    [0x30, 0x3C],
    [0x34, 0x3C],
    [0x38, 0x3C],
    [0x3C, 0x3C],
];

pub(crate) const MARK_AS_COMPARED_EQUAL_TO_NULL: [[u8; 2]; 15] = [
    [0x00, 0x38],
    [0x04, 0x34],
    [0x08, 0x38],
    [0x0C, 0x34],
    [0x10, 0x34],
    [0x14, 0x34],
    [0x18, 0x34],
    [0x1C, 0x34],
    [0x24, 0x30],
    [0x28, 0x38],
    [0x2C, 0x38],
    [0x30, 0x30],
    [0x34, 0x34],
    [0x38, 0x38],
    [0x3C, 0x38],
];

pub(crate) const MARK_AS_DEFINITELY_NON_NULL: [[u8; 2]; 15] = [
    [0x00, 0x28],
    [0x04, 0x28],
    [0x08, 0x28],
    [0x0C, 0x28],
    [0x10, 0x28],
    [0x14, 0x28],
    [0x18, 0x28],
    [0x1C, 0x28],
    [0x24, 0x28],
    [0x28, 0x28],
    [0x2C, 0x28],
    [0x30, 0x28],
    [0x34, 0x28],
    [0x38, 0x28],
    [0x3C, 0x28],
];

pub(crate) const MARK_AS_DEFINITELY_NULL: [[u8; 2]; 15] = [
    [0x00, 0x30],
    [0x04, 0x30],
    [0x08, 0x30],
    [0x0C, 0x30],
    [0x10, 0x30],
    [0x14, 0x30],
    [0x18, 0x30],
    [0x1C, 0x30],
    [0x24, 0x30],
    [0x28, 0x30],
    [0x2C, 0x30],
    [0x30, 0x30],
    [0x34, 0x30],
    [0x38, 0x30],
    [0x3C, 0x30],
];

pub(crate) const MARK_AS_DEFINITELY_UNKNOWN: [[u8; 2]; 15] = [
    [0x00, 0x24],
    [0x04, 0x24],
    [0x08, 0x24],
    [0x0C, 0x24],
    [0x10, 0x24],
    [0x14, 0x24],
    [0x18, 0x24],
    [0x1C, 0x24],
    [0x24, 0x24],
    [0x28, 0x24],
    [0x2C, 0x24],
    [0x30, 0x24],
    [0x34, 0x24],
    [0x38, 0x24],
    [0x3C, 0x24],
];

pub(crate) const ADD_INITIALIZATIONS_FROM: [[u8; 3]; 225] = [
    [0x00, 0x00, 0x00],
    [0x00, 0x04, 0x04],
    [0x00, 0x08, 0x08],
    [0x00, 0x0C, 0x0C],
    [0x00, 0x10, 0x10],
    [0x00, 0x14, 0x14],
    [0x00, 0x18, 0x18],
    [0x00, 0x1C, 0x1C],
    [0x00, 0x24, 0x24],
    [0x00, 0x28, 0x28],
    [0x00, 0x2C, 0x2C],
    [0x00, 0x30, 0x30],
    [0x00, 0x34, 0x34],
    [0x00, 0x38, 0x38],
    [0x00, 0x3C, 0x3C],
    [0x04, 0x00, 0x04],
    [0x04, 0x04, 0x04],
    [0x04, 0x08, 0x0C],
    [0x04, 0x0C, 0x0C],
    [0x04, 0x10, 0x14],
    [0x04, 0x14, 0x14],
    [0x04, 0x18, 0x18],
    [0x04, 0x1C, 0x08],
    [0x04, 0x24, 0x24],
    [0x04, 0x28, 0x28],
    [0x04, 0x2C, 0x2C],
    [0x04, 0x30, 0x30],
    [0x04, 0x34, 0x34],
    [0x04, 0x38, 0x34],
    [0x04, 0x3C, 0x2C],
    [0x08, 0x00, 0x08],
    [0x08, 0x04, 0x0C],
    [0x08, 0x08, 0x08],
    [0x08, 0x0C, 0x0C],
    [0x08, 0x10, 0x18],
    [0x08, 0x14, 0x18],
    [0x08, 0x18, 0x18],
    [0x08, 0x1C, 0x08],
    [0x08, 0x24, 0x24],
    [0x08, 0x28, 0x28],
    [0x08, 0x2C, 0x2C],
    [0x08, 0x30, 0x30],
    [0x08, 0x34, 0x34],
    [0x08, 0x38, 0x38],
    [0x08, 0x3C, 0x2C],
    [0x0C, 0x00, 0x0C],
    [0x0C, 0x04, 0x0C],
    [0x0C, 0x08, 0x0C],
    [0x0C, 0x0C, 0x0C],
    [0x0C, 0x10, 0x18],
    [0x0C, 0x14, 0x18],
    [0x0C, 0x18, 0x18],
    [0x0C, 0x1C, 0x08],
    [0x0C, 0x24, 0x24],
    [0x0C, 0x28, 0x28],
    [0x0C, 0x2C, 0x2C],
    [0x0C, 0x30, 0x30],
    [0x0C, 0x34, 0x34],
    [0x0C, 0x38, 0x34],
    [0x0C, 0x3C, 0x2C],
    [0x10, 0x00, 0x10],
    [0x10, 0x04, 0x14],
    [0x10, 0x08, 0x18],
    [0x10, 0x0C, 0x18],
    [0x10, 0x10, 0x10],
    [0x10, 0x14, 0x14],
    [0x10, 0x18, 0x18],
    [0x10, 0x1C, 0x18],
    [0x10, 0x24, 0x24],
    [0x10, 0x28, 0x28],
    [0x10, 0x2C, 0x2C],
    [0x10, 0x30, 0x30],
    [0x10, 0x34, 0x34],
    [0x10, 0x38, 0x34],
    [0x10, 0x3C, 0x3C],
    [0x14, 0x00, 0x14],
    [0x14, 0x04, 0x14],
    [0x14, 0x08, 0x18],
    [0x14, 0x0C, 0x18],
    [0x14, 0x10, 0x14],
    [0x14, 0x14, 0x14],
    [0x14, 0x18, 0x18],
    [0x14, 0x1C, 0x18],
    [0x14, 0x24, 0x24],
    [0x14, 0x28, 0x28],
    [0x14, 0x2C, 0x2C],
    [0x14, 0x30, 0x30],
    [0x14, 0x34, 0x34],
    [0x14, 0x38, 0x34],
    [0x14, 0x3C, 0x2C],
    [0x18, 0x00, 0x18],
    [0x18, 0x04, 0x18],
    [0x18, 0x08, 0x18],
    [0x18, 0x0C, 0x18],
    [0x18, 0x10, 0x18],
    [0x18, 0x14, 0x18],
    [0x18, 0x18, 0x18],
    [0x18, 0x1C, 0x18],
    [0x18, 0x24, 0x24],
    [0x18, 0x28, 0x28],
    [0x18, 0x2C, 0x2C],
    [0x18, 0x30, 0x30],
    [0x18, 0x34, 0x34],
    [0x18, 0x38, 0x34],
    [0x18, 0x3C, 0x2C],
    [0x1C, 0x00, 0x1C],
    [0x1C, 0x04, 0x1C],
    [0x1C, 0x08, 0x1C],
    [0x1C, 0x0C, 0x1C],
    [0x1C, 0x10, 0x18],
    [0x1C, 0x14, 0x18],
    [0x1C, 0x18, 0x18],
    [0x1C, 0x1C, 0x18],
    [0x1C, 0x24, 0x24],
    [0x1C, 0x28, 0x28],
    [0x1C, 0x2C, 0x2C],
    [0x1C, 0x30, 0x30],
    [0x1C, 0x34, 0x34],
    [0x1C, 0x38, 0x34],
    [0x1C, 0x3C, 0x2C],
    [0x24, 0x00, 0x24],
    [0x24, 0x04, 0x24],
    [0x24, 0x08, 0x24],
    [0x24, 0x0C, 0x24],
    [0x24, 0x10, 0x14],
    [0x24, 0x14, 0x14],
    [0x24, 0x18, 0x18],
    [0x24, 0x1C, 0x08],
    [0x24, 0x24, 0x24],
    [0x24, 0x28, 0x28],
    [0x24, 0x2C, 0x28],
    [0x24, 0x30, 0x30],
    [0x24, 0x34, 0x30],
    [0x24, 0x38, 0x30],
    [0x24, 0x3C, 0x28],
    [0x28, 0x00, 0x28],
    [0x28, 0x04, 0x24],
    [0x28, 0x08, 0x28],
    [0x28, 0x0C, 0x24],
    [0x28, 0x10, 0x18],
    [0x28, 0x14, 0x18],
    [0x28, 0x18, 0x18],
    [0x28, 0x1C, 0x08],
    [0x28, 0x24, 0x24],
    [0x28, 0x28, 0x28],
    [0x28, 0x2C, 0x28],
    [0x28, 0x30, 0x30],
    [0x28, 0x34, 0x34],
    [0x28, 0x38, 0x38],
    [0x28, 0x3C, 0x28],
    [0x2C, 0x00, 0x2C],
    [0x2C, 0x04, 0x0C],
    [0x2C, 0x08, 0x2C],
    [0x2C, 0x0C, 0x0C],
    [0x2C, 0x10, 0x18],
    [0x2C, 0x14, 0x18],
    [0x2C, 0x18, 0x18],
    [0x2C, 0x1C, 0x08],
    [0x2C, 0x24, 0x24],
    [0x2C, 0x28, 0x28],
    [0x2C, 0x2C, 0x2C],
    [0x2C, 0x30, 0x30],
    [0x2C, 0x34, 0x34],
    [0x2C, 0x38, 0x38],
    [0x2C, 0x3C, 0x2C],
    [0x30, 0x00, 0x30],
    [0x30, 0x04, 0x14],
    [0x30, 0x08, 0x18],
    [0x30, 0x0C, 0x18],
    [0x30, 0x10, 0x30],
    [0x30, 0x14, 0x14],
    [0x30, 0x18, 0x18],
    [0x30, 0x1C, 0x1C],
    [0x30, 0x24, 0x24],
    [0x30, 0x28, 0x28],
    [0x30, 0x2C, 0x2C],
    [0x30, 0x30, 0x30],
    [0x30, 0x34, 0x30],
    [0x30, 0x38, 0x30],
    [0x30, 0x3C, 0x3C],
    [0x34, 0x00, 0x34],
    [0x34, 0x04, 0x14],
    [0x34, 0x08, 0x18],
    [0x34, 0x0C, 0x18],
    [0x34, 0x10, 0x34],
    [0x34, 0x14, 0x14],
    [0x34, 0x18, 0x18],
    [0x34, 0x1C, 0x1C],
    [0x34, 0x24, 0x24],
    [0x34, 0x28, 0x28],
    [0x34, 0x2C, 0x2C],
    [0x34, 0x30, 0x30],
    [0x34, 0x34, 0x34],
    [0x34, 0x38, 0x34],
    [0x34, 0x3C, 0x3C],
    [0x38, 0x00, 0x38],
    [0x38, 0x04, 0x04],
    [0x38, 0x08, 0x08],
    [0x38, 0x0C, 0x0C],
    [0x38, 0x10, 0x34],
    [0x38, 0x14, 0x14],
    [0x38, 0x18, 0x18],
    [0x38, 0x1C, 0x1C],
    [0x38, 0x24, 0x24],
    [0x38, 0x28, 0x28],
    [0x38, 0x2C, 0x2C],
    [0x38, 0x30, 0x30],
    [0x38, 0x34, 0x34],
    [0x38, 0x38, 0x38],
    [0x38, 0x3C, 0x3C],
    [0x3C, 0x00, 0x3C],
    [0x3C, 0x04, 0x04],
    [0x3C, 0x08, 0x2C],
    [0x3C, 0x0C, 0x0C],
    [0x3C, 0x10, 0x10],
    [0x3C, 0x14, 0x14],
    [0x3C, 0x18, 0x18],
    [0x3C, 0x1C, 0x1C],
    [0x3C, 0x24, 0x24],
    [0x3C, 0x28, 0x28],
    [0x3C, 0x2C, 0x2C],
    [0x3C, 0x30, 0x30],
    [0x3C, 0x34, 0x34],
    [0x3C, 0x38, 0x38],
    [0x3C, 0x3C, 0x3C],
];

pub(crate) const ADD_POTENTIAL_INITIALIZATIONS_FROM: [[u8; 3]; 225] = [
    [0x00, 0x00, 0x00],
    [0x00, 0x04, 0x04],
    [0x00, 0x08, 0x08],
    [0x00, 0x0C, 0x0C],
    [0x00, 0x10, 0x10],
    [0x00, 0x14, 0x14],
    [0x00, 0x18, 0x18],
    [0x00, 0x1C, 0x18],
    [0x00, 0x24, 0x04],
    [0x00, 0x28, 0x08],
    [0x00, 0x2C, 0x08],
    [0x00, 0x30, 0x10],
    [0x00, 0x34, 0x10],
    [0x00, 0x38, 0x00],
    [0x00, 0x3C, 0x00],
    [0x04, 0x00, 0x04],
    [0x04, 0x04, 0x04],
    [0x04, 0x08, 0x0C],
    [0x04, 0x0C, 0x0C],
    [0x04, 0x10, 0x14],
    [0x04, 0x14, 0x14],
    [0x04, 0x18, 0x18],
    [0x04, 0x1C, 0x18],
    [0x04, 0x24, 0x04],
    [0x04, 0x28, 0x0C],
    [0x04, 0x2C, 0x0C],
    [0x04, 0x30, 0x14],
    [0x04, 0x34, 0x14],
    [0x04, 0x38, 0x04],
    [0x04, 0x3C, 0x04],
    [0x08, 0x00, 0x08],
    [0x08, 0x04, 0x0C],
    [0x08, 0x08, 0x08],
    [0x08, 0x0C, 0x0C],
    [0x08, 0x10, 0x18],
    [0x08, 0x14, 0x18],
    [0x08, 0x18, 0x18],
    [0x08, 0x1C, 0x18],
    [0x08, 0x24, 0x0C],
    [0x08, 0x28, 0x08],
    [0x08, 0x2C, 0x08],
    [0x08, 0x30, 0x18],
    [0x08, 0x34, 0x18],
    [0x08, 0x38, 0x08],
    [0x08, 0x3C, 0x08],
    [0x0C, 0x00, 0x0C],
    [0x0C, 0x04, 0x0C],
    [0x0C, 0x08, 0x0C],
    [0x0C, 0x0C, 0x0C],
    [0x0C, 0x10, 0x18],
    [0x0C, 0x14, 0x18],
    [0x0C, 0x18, 0x18],
    [0x0C, 0x1C, 0x18],
    [0x0C, 0x24, 0x0C],
    [0x0C, 0x28, 0x0C],
    [0x0C, 0x2C, 0x0C],
    [0x0C, 0x30, 0x18],
    [0x0C, 0x34, 0x18],
    [0x0C, 0x38, 0x0C],
    [0x0C, 0x3C, 0x0C],
    [0x10, 0x00, 0x10],
    [0x10, 0x04, 0x14],
    [0x10, 0x08, 0x18],
    [0x10, 0x0C, 0x18],
    [0x10, 0x10, 0x10],
    [0x10, 0x14, 0x14],
    [0x10, 0x18, 0x18],
    [0x10, 0x1C, 0x18],
    [0x10, 0x24, 0x14],
    [0x10, 0x28, 0x18],
    [0x10, 0x2C, 0x18],
    [0x10, 0x30, 0x10],
    [0x10, 0x34, 0x10],
    [0x10, 0x38, 0x10],
    [0x10, 0x3C, 0x10],
    [0x14, 0x00, 0x14],
    [0x14, 0x04, 0x14],
    [0x14, 0x08, 0x18],
    [0x14, 0x0C, 0x18],
    [0x14, 0x10, 0x14],
    [0x14, 0x14, 0x14],
    [0x14, 0x18, 0x18],
    [0x14, 0x1C, 0x18],
    [0x14, 0x24, 0x14],
    [0x14, 0x28, 0x18],
    [0x14, 0x2C, 0x18],
    [0x14, 0x30, 0x14],
    [0x14, 0x34, 0x14],
    [0x14, 0x38, 0x14],
    [0x14, 0x3C, 0x14],
    [0x18, 0x00, 0x18],
    [0x18, 0x04, 0x18],
    [0x18, 0x08, 0x18],
    [0x18, 0x0C, 0x18],
    [0x18, 0x10, 0x18],
    [0x18, 0x14, 0x18],
    [0x18, 0x18, 0x18],
    [0x18, 0x1C, 0x18],
    [0x18, 0x24, 0x18],
    [0x18, 0x28, 0x18],
    [0x18, 0x2C, 0x18],
    [0x18, 0x30, 0x18],
    [0x18, 0x34, 0x18],
    [0x18, 0x38, 0x18],
    [0x18, 0x3C, 0x18],
    [0x1C, 0x00, 0x1C],
    [0x1C, 0x04, 0x1C],
    [0x1C, 0x08, 0x1C],
    [0x1C, 0x0C, 0x1C],
    [0x1C, 0x10, 0x18],
    [0x1C, 0x14, 0x18],
    [0x1C, 0x18, 0x18],
    [0x1C, 0x1C, 0x18],
    [0x1C, 0x24, 0x1C],
    [0x1C, 0x28, 0x1C],
    [0x1C, 0x2C, 0x1C],
    [0x1C, 0x30, 0x18],
    [0x1C, 0x34, 0x18],
    [0x1C, 0x38, 0x1C],
    [0x1C, 0x3C, 0x1C],
    [0x24, 0x00, 0x24],
    [0x24, 0x04, 0x24],
    [0x24, 0x08, 0x24],
    [0x24, 0x0C, 0x24],
    [0x24, 0x10, 0x14],
    [0x24, 0x14, 0x14],
    [0x24, 0x18, 0x18],
    [0x24, 0x1C, 0x18],
    [0x24, 0x24, 0x24],
    [0x24, 0x28, 0x24],
    [0x24, 0x2C, 0x24],
    [0x24, 0x30, 0x14],
    [0x24, 0x34, 0x14],
    [0x24, 0x38, 0x24],
    [0x24, 0x3C, 0x24],
    [0x28, 0x00, 0x28],
    [0x28, 0x04, 0x24],
    [0x28, 0x08, 0x28],
    [0x28, 0x0C, 0x24],
    [0x28, 0x10, 0x18],
    [0x28, 0x14, 0x18],
    [0x28, 0x18, 0x18],
    [0x28, 0x1C, 0x18],
    [0x28, 0x24, 0x24],
    [0x28, 0x28, 0x28],
    [0x28, 0x2C, 0x28],
    [0x28, 0x30, 0x18],
    [0x28, 0x34, 0x18],
    [0x28, 0x38, 0x28],
    [0x28, 0x3C, 0x28],
    [0x2C, 0x00, 0x2C],
    [0x2C, 0x04, 0x0C],
    [0x2C, 0x08, 0x2C],
    [0x2C, 0x0C, 0x0C],
    [0x2C, 0x10, 0x18],
    [0x2C, 0x14, 0x18],
    [0x2C, 0x18, 0x18],
    [0x2C, 0x1C, 0x18],
    [0x2C, 0x24, 0x0C],
    [0x2C, 0x28, 0x2C],
    [0x2C, 0x2C, 0x2C],
    [0x2C, 0x30, 0x18],
    [0x2C, 0x34, 0x18],
    [0x2C, 0x38, 0x2C],
    [0x2C, 0x3C, 0x2C],
    [0x30, 0x00, 0x30],
    [0x30, 0x04, 0x14],
    [0x30, 0x08, 0x18],
    [0x30, 0x0C, 0x18],
    [0x30, 0x10, 0x30],
    [0x30, 0x14, 0x14],
    [0x30, 0x18, 0x18],
    [0x30, 0x1C, 0x18],
    [0x30, 0x24, 0x14],
    [0x30, 0x28, 0x18],
    [0x30, 0x2C, 0x18],
    [0x30, 0x30, 0x30],
    [0x30, 0x34, 0x30],
    [0x30, 0x38, 0x30],
    [0x30, 0x3C, 0x30],
    [0x34, 0x00, 0x34],
    [0x34, 0x04, 0x14],
    [0x34, 0x08, 0x18],
    [0x34, 0x0C, 0x18],
    [0x34, 0x10, 0x34],
    [0x34, 0x14, 0x14],
    [0x34, 0x18, 0x18],
    [0x34, 0x1C, 0x18],
    [0x34, 0x24, 0x14],
    [0x34, 0x28, 0x18],
    [0x34, 0x2C, 0x18],
    [0x34, 0x30, 0x34],
    [0x34, 0x34, 0x34],
    [0x34, 0x38, 0x34],
    [0x34, 0x3C, 0x34],
    [0x38, 0x00, 0x38],
    [0x38, 0x04, 0x04],
    [0x38, 0x08, 0x08],
    [0x38, 0x0C, 0x0C],
    [0x38, 0x10, 0x34],
    [0x38, 0x14, 0x14],
    [0x38, 0x18, 0x18],
    [0x38, 0x1C, 0x1C],
    [0x38, 0x24, 0x04],
    [0x38, 0x28, 0x08],
    [0x38, 0x2C, 0x08],
    [0x38, 0x30, 0x34],
    [0x38, 0x34, 0x34],
    [0x38, 0x38, 0x38],
    [0x38, 0x3C, 0x38],
    [0x3C, 0x00, 0x3C],
    [0x3C, 0x04, 0x04],
    [0x3C, 0x08, 0x2C],
    [0x3C, 0x0C, 0x0C],
    [0x3C, 0x10, 0x10],
    [0x3C, 0x14, 0x14],
    [0x3C, 0x18, 0x18],
    [0x3C, 0x1C, 0x1C],
    [0x3C, 0x24, 0x04],
    [0x3C, 0x28, 0x2C],
    [0x3C, 0x2C, 0x2C],
    [0x3C, 0x30, 0x10],
    [0x3C, 0x34, 0x10],
    [0x3C, 0x38, 0x3C],
    [0x3C, 0x3C, 0x3C],
];

pub(crate) const MERGED_WITH: [[u8; 3]; 120] = [
    [0x00, 0x00, 0x00],
    [0x00, 0x04, 0x04],
    [0x00, 0x08, 0x08],
    [0x00, 0x0C, 0x0C],
    [0x00, 0x10, 0x10],
    [0x00, 0x14, 0x14],
    [0x00, 0x18, 0x18],
    [0x00, 0x1C, 0x1C],
    [0x00, 0x24, 0x04],
    [0x00, 0x28, 0x08],
    [0x00, 0x2C, 0x08],
    [0x00, 0x30, 0x10],
    [0x00, 0x34, 0x10],
    [0x00, 0x38, 0x00],
    [0x00, 0x3C, 0x00],
    [0x04, 0x04, 0x04],
    [0x04, 0x08, 0x0C],
    [0x04, 0x0C, 0x0C],
    [0x04, 0x10, 0x14],
    [0x04, 0x14, 0x14],
    [0x04, 0x18, 0x18],
    [0x04, 0x1C, 0x1C],
    [0x04, 0x24, 0x04],
    [0x04, 0x28, 0x0C],
    [0x04, 0x2C, 0x0C],
    [0x04, 0x30, 0x14],
    [0x04, 0x34, 0x14],
    [0x04, 0x38, 0x04],
    [0x04, 0x3C, 0x04],
    [0x08, 0x08, 0x08],
    [0x08, 0x0C, 0x0C],
    [0x08, 0x10, 0x18],
    [0x08, 0x14, 0x18],
    [0x08, 0x18, 0x18],
    [0x08, 0x1C, 0x1C],
    [0x08, 0x24, 0x0C],
    [0x08, 0x28, 0x08],
    [0x08, 0x2C, 0x08],
    [0x08, 0x30, 0x18],
    [0x08, 0x34, 0x18],
    [0x08, 0x38, 0x18],
    [0x08, 0x3C, 0x08],
    [0x0C, 0x0C, 0x0C],
    [0x0C, 0x10, 0x18],
    [0x0C, 0x14, 0x18],
    [0x0C, 0x18, 0x18],
    [0x0C, 0x1C, 0x1C],
    [0x0C, 0x24, 0x0C],
    [0x0C, 0x28, 0x0C],
    [0x0C, 0x2C, 0x0C],
    [0x0C, 0x30, 0x18],
    [0x0C, 0x34, 0x18],
    [0x0C, 0x38, 0x18],
    [0x0C, 0x3C, 0x0C],
    [0x10, 0x10, 0x10],
    [0x10, 0x14, 0x14],
    [0x10, 0x18, 0x18],
    [0x10, 0x1C, 0x1C],
    [0x10, 0x24, 0x14],
    [0x10, 0x28, 0x18],
    [0x10, 0x2C, 0x18],
    [0x10, 0x30, 0x10],
    [0x10, 0x34, 0x10],
    [0x10, 0x38, 0x10],
    [0x10, 0x3C, 0x10],
    [0x14, 0x14, 0x14],
    [0x14, 0x18, 0x18],
    [0x14, 0x1C, 0x1C],
    [0x14, 0x24, 0x14],
    [0x14, 0x28, 0x18],
    [0x14, 0x2C, 0x18],
    [0x14, 0x30, 0x14],
    [0x14, 0x34, 0x14],
    [0x14, 0x38, 0x14],
    [0x14, 0x3C, 0x14],
    [0x18, 0x18, 0x18],
    [0x18, 0x1C, 0x1C],
    [0x18, 0x24, 0x18],
    [0x18, 0x28, 0x18],
    [0x18, 0x2C, 0x18],
    [0x18, 0x30, 0x18],
    [0x18, 0x34, 0x18],
    [0x18, 0x38, 0x18],
    [0x18, 0x3C, 0x18],
    [0x1C, 0x1C, 0x1C],
    [0x1C, 0x24, 0x1C],
    [0x1C, 0x28, 0x1C],
    [0x1C, 0x2C, 0x1C],
    [0x1C, 0x30, 0x1C],
    [0x1C, 0x34, 0x1C],
    [0x1C, 0x38, 0x1C],
    [0x1C, 0x3C, 0x1C],
    [0x24, 0x24, 0x24],
    [0x24, 0x28, 0x0C],
    [0x24, 0x2C, 0x0C],
    [0x24, 0x30, 0x14],
    [0x24, 0x34, 0x14],
    [0x24, 0x38, 0x04],
    [0x24, 0x3C, 0x24],
    [0x28, 0x28, 0x28],
    [0x28, 0x2C, 0x2C],
    [0x28, 0x30, 0x18],
    [0x28, 0x34, 0x18],
    [0x28, 0x38, 0x08],
    [0x28, 0x3C, 0x2C],
    [0x2C, 0x2C, 0x2C],
    [0x2C, 0x30, 0x18],
    [0x2C, 0x34, 0x18],
    [0x2C, 0x38, 0x18],
    [0x2C, 0x3C, 0x2C],
    [0x30, 0x30, 0x30],
    [0x30, 0x34, 0x34],
    [0x30, 0x38, 0x34],
    [0x30, 0x3C, 0x10],
    [0x34, 0x34, 0x34],
    [0x34, 0x38, 0x34],
    [0x34, 0x3C, 0x10],
    [0x38, 0x38, 0x38],
    [0x38, 0x3C, 0x10],
    [0x3C, 0x3C, 0x3C],
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::NullState;

    #[test]
    fn test_row_counts() {
        assert_eq!(MARK_AS_COMPARED_EQUAL_TO_NON_NULL.len(), 15);
        assert_eq!(MARK_AS_COMPARED_EQUAL_TO_NULL.len(), 15);
        assert_eq!(MARK_AS_DEFINITELY_NON_NULL.len(), 15);
        assert_eq!(MARK_AS_DEFINITELY_NULL.len(), 15);
        assert_eq!(MARK_AS_DEFINITELY_UNKNOWN.len(), 15);
        assert_eq!(ADD_INITIALIZATIONS_FROM.len(), 15 * 15);
        assert_eq!(ADD_POTENTIAL_INITIALIZATIONS_FROM.len(), 15 * 15);
        // symmetric table enumerates ordered pairs only
        assert_eq!(MERGED_WITH.len(), 15 * 16 / 2);
    }

    #[test]
    fn test_table_names_match_the_operator_names() {
        assert_eq!(
            mark_as_definitely_non_null().name(),
            "markAsDefinitelyNonNull"
        );
        assert_eq!(mark_as_definitely_null().name(), "markAsDefinitelyNull");
        assert_eq!(
            mark_as_definitely_unknown().name(),
            "markAsDefinitelyUnknown"
        );
        assert_eq!(
            mark_as_compared_equal_to_non_null().name(),
            "markAsComparedEqualToNonNull"
        );
        assert_eq!(
            mark_as_compared_equal_to_null().name(),
            "markAsComparedEqualToNull"
        );
        assert_eq!(
            add_initializations_from().name(),
            "addInitializationsFrom"
        );
        assert_eq!(
            add_potential_initializations_from().name(),
            "addPotentialInitializationsFrom"
        );
        assert_eq!(merged_with().name(), "mergedWith");
    }

    #[test]
    fn test_unary_totality() {
        for table in [
            mark_as_definitely_non_null(),
            mark_as_definitely_null(),
            mark_as_definitely_unknown(),
            mark_as_compared_equal_to_non_null(),
            mark_as_compared_equal_to_null(),
        ] {
            for state in NullState::ALL {
                // apply() panics on a missing row, so reaching the end of
                // the loop is the assertion
                let _ = table.apply(state);
            }
        }
    }

    #[test]
    fn test_binary_totality() {
        for table in [
            add_initializations_from(),
            add_potential_initializations_from(),
            merged_with(),
        ] {
            for left in NullState::ALL {
                for right in NullState::ALL {
                    let _ = table.apply(left, right);
                }
            }
        }
    }

    #[test]
    fn test_mark_definitely_non_null_from_pot_null() {
        // fixture row {0x10, 0x28}
        assert_eq!(
            mark_as_definitely_non_null().apply(NullState::PotentiallyNull),
            NullState::DefinitelyNonNull
        );
    }

    #[test]
    fn test_merge_of_contradicting_definites() {
        // fixture row {0x28, 0x30, 0x18}
        assert_eq!(
            merged_with().apply(NullState::DefinitelyNonNull, NullState::DefinitelyNull),
            NullState::PotentiallyNullNonNull
        );
    }

    #[test]
    fn test_sequential_pot_unknown_then_pot_non_null() {
        // fixture row {0x04, 0x08, 0x0C}
        assert_eq!(
            add_initializations_from()
                .apply(NullState::PotentiallyUnknown, NullState::PotentiallyNonNull),
            NullState::PotentiallyNonNullUnknown
        );
    }

    #[test]
    fn test_sequential_start_identity() {
        for state in NullState::ALL {
            assert_eq!(
                add_initializations_from().apply(NullState::Start, state),
                state
            );
            assert_eq!(
                add_initializations_from().apply(state, NullState::Start),
                state
            );
        }
    }

    #[test]
    fn test_merge_symmetry_and_idempotence() {
        for left in NullState::ALL {
            assert_eq!(merged_with().apply(left, left), left);
            for right in NullState::ALL {
                assert_eq!(
                    merged_with().apply(left, right),
                    merged_with().apply(right, left)
                );
            }
        }
    }

    #[test]
    fn test_compared_equal_narrows_protection() {
        // equality against non-null protects without forgetting potential
        // non-null knowledge
        assert_eq!(
            mark_as_compared_equal_to_non_null().apply(NullState::PotentiallyNonNull),
            NullState::PotentiallyNonNullProtectedNonNull
        );
        // while a definite input stays definite
        assert_eq!(
            mark_as_compared_equal_to_non_null().apply(NullState::DefinitelyUnknown),
            NullState::DefinitelyNonNull
        );
        assert_eq!(
            mark_as_compared_equal_to_null().apply(NullState::DefinitelyUnknown),
            NullState::DefinitelyNull
        );
        assert_eq!(
            mark_as_compared_equal_to_null().apply(NullState::PotentiallyNull),
            NullState::PotentiallyNullProtectedNull
        );
    }

    #[test]
    fn test_carried_approximation_is_not_fixed() {
        // this row loses the null bit on purpose
        assert_eq!(
            add_initializations_from().apply(
                NullState::DefinitelyNonNull,
                NullState::PotentiallyNullNonNullUnknown
            ),
            NullState::PotentiallyNonNull
        );
        // and merging start against a protected state keeps start
        assert_eq!(
            merged_with().apply(NullState::Start, NullState::ProtectedNull),
            NullState::Start
        );
        assert_eq!(
            merged_with().apply(NullState::Start, NullState::ProtectedNonNull),
            NullState::Start
        );
    }
}
