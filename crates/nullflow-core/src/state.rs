//! Canonical nullness states of the per-variable lattice
//!
//! Each tracked variable slot carries four nullness bits. Bit 1 tags the
//! state as "definite or protected"; bits 2, 3 and 4 record null, non-null
//! and unknown knowledge respectively. Only 15 of the 16 four-bit patterns
//! are meaningful:
//!
//! ```text
//! bit1 bit2 bit3 bit4
//! 0    0    0    0      start
//! 0    0    0    1      pot. unknown
//! 0    0    1    0      pot. non null
//! 0    0    1    1      pot. nn & pot. un
//! 0    1    0    0      pot. null
//! 0    1    0    1      pot. n & pot. un
//! 0    1    1    0      pot. n & pot. nn
//! 0    1    1    1      pot. n & pot. nn & pot. un
//! 1    0    0    1      def. unknown
//! 1    0    1    0      def. non null
//! 1    0    1    1      pot. nn & prot. nn
//! 1    1    0    0      def. null
//! 1    1    0    1      pot. n & prot. n
//! 1    1    1    0      prot. null
//! 1    1    1    1      prot. non null
//! ```
//!
//! The pattern `1000` is reserved; an operator producing it indicates a
//! defect in the engine or a corrupted input, never a recoverable condition.
//!
//! The discriminants below are the fixture byte values used throughout the
//! transition tables: the four bits packed into bits 5..2 of a byte, so
//! every canonical value is a multiple of 4 (e.g. `pot. null` is `0x10`,
//! `def. non null` is `0x28`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixture-byte mask of the "definite or protected" bit.
pub const BIT1: u8 = 0x20;
/// Fixture-byte mask of the null bit.
pub const BIT2: u8 = 0x10;
/// Fixture-byte mask of the non-null bit.
pub const BIT3: u8 = 0x08;
/// Fixture-byte mask of the unknown bit.
pub const BIT4: u8 = 0x04;

/// Raised when a byte does not denote one of the 15 canonical states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid null-state bit pattern 0x{bits:02X}")]
pub struct InvalidStateError {
    /// The offending fixture byte.
    pub bits: u8,
}

/// One of the 15 canonical nullness states of a variable slot.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NullState {
    /// No information yet; the bottom element of the lattice.
    Start = 0x00,
    /// May hold a value the analysis knows nothing about, on some path.
    PotentiallyUnknown = 0x04,
    /// Non-null on at least one path.
    PotentiallyNonNull = 0x08,
    /// Both potentially non-null and potentially unknown.
    PotentiallyNonNullUnknown = 0x0C,
    /// Null on at least one path.
    PotentiallyNull = 0x10,
    /// Both potentially null and potentially unknown.
    PotentiallyNullUnknown = 0x14,
    /// Null on some paths, non-null on others.
    PotentiallyNullNonNull = 0x18,
    /// Potentially null, non-null and unknown at once.
    PotentiallyNullNonNullUnknown = 0x1C,
    /// Assigned a value the analysis cannot classify, on all paths.
    DefinitelyUnknown = 0x24,
    /// Proven non-null on all paths.
    DefinitelyNonNull = 0x28,
    /// Potentially non-null and compared equal to non-null since.
    PotentiallyNonNullProtectedNonNull = 0x2C,
    /// Proven null on all paths.
    DefinitelyNull = 0x30,
    /// Potentially null and compared equal to null since.
    PotentiallyNullProtectedNull = 0x34,
    /// Compared equal to null and not reassigned since.
    ProtectedNull = 0x38,
    /// Compared equal to non-null and not reassigned since.
    ProtectedNonNull = 0x3C,
}

impl NullState {
    /// All canonical states, in fixture-byte order.
    pub const ALL: [NullState; 15] = [
        NullState::Start,
        NullState::PotentiallyUnknown,
        NullState::PotentiallyNonNull,
        NullState::PotentiallyNonNullUnknown,
        NullState::PotentiallyNull,
        NullState::PotentiallyNullUnknown,
        NullState::PotentiallyNullNonNull,
        NullState::PotentiallyNullNonNullUnknown,
        NullState::DefinitelyUnknown,
        NullState::DefinitelyNonNull,
        NullState::PotentiallyNonNullProtectedNonNull,
        NullState::DefinitelyNull,
        NullState::PotentiallyNullProtectedNull,
        NullState::ProtectedNull,
        NullState::ProtectedNonNull,
    ];

    /// The fixture byte for this state.
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Dense index in 0..16 used by the hydrated lookup tables. Index 8
    /// (the reserved pattern) never corresponds to a canonical state.
    pub fn ordinal(self) -> usize {
        (self.bits() >> 2) as usize
    }

    /// Decode a fixture byte into a canonical state.
    pub fn try_from_bits(bits: u8) -> Result<NullState, InvalidStateError> {
        match bits {
            0x00 => Ok(NullState::Start),
            0x04 => Ok(NullState::PotentiallyUnknown),
            0x08 => Ok(NullState::PotentiallyNonNull),
            0x0C => Ok(NullState::PotentiallyNonNullUnknown),
            0x10 => Ok(NullState::PotentiallyNull),
            0x14 => Ok(NullState::PotentiallyNullUnknown),
            0x18 => Ok(NullState::PotentiallyNullNonNull),
            0x1C => Ok(NullState::PotentiallyNullNonNullUnknown),
            0x24 => Ok(NullState::DefinitelyUnknown),
            0x28 => Ok(NullState::DefinitelyNonNull),
            0x2C => Ok(NullState::PotentiallyNonNullProtectedNonNull),
            0x30 => Ok(NullState::DefinitelyNull),
            0x34 => Ok(NullState::PotentiallyNullProtectedNull),
            0x38 => Ok(NullState::ProtectedNull),
            0x3C => Ok(NullState::ProtectedNonNull),
            _ => Err(InvalidStateError { bits }),
        }
    }

    /// Assemble a state from its four bit planes.
    pub fn try_from_planes(
        bit1: bool,
        bit2: bool,
        bit3: bool,
        bit4: bool,
    ) -> Result<NullState, InvalidStateError> {
        let mut bits = 0u8;
        if bit1 {
            bits |= BIT1;
        }
        if bit2 {
            bits |= BIT2;
        }
        if bit3 {
            bits |= BIT3;
        }
        if bit4 {
            bits |= BIT4;
        }
        NullState::try_from_bits(bits)
    }

    /// Canonical symbolic name, kept verbatim for fixture compatibility.
    pub fn name(self) -> &'static str {
        match self {
            NullState::Start => "start",
            NullState::PotentiallyUnknown => "pot. unknown",
            NullState::PotentiallyNonNull => "pot. non null",
            NullState::PotentiallyNonNullUnknown => "pot. nn & pot. un",
            NullState::PotentiallyNull => "pot. null",
            NullState::PotentiallyNullUnknown => "pot. n & pot. un",
            NullState::PotentiallyNullNonNull => "pot. n & pot. nn",
            NullState::PotentiallyNullNonNullUnknown => "pot. n & pot. nn & pot. un",
            NullState::DefinitelyUnknown => "def. unknown",
            NullState::DefinitelyNonNull => "def. non null",
            NullState::PotentiallyNonNullProtectedNonNull => "pot. nn & prot. nn",
            NullState::DefinitelyNull => "def. null",
            NullState::PotentiallyNullProtectedNull => "pot. n & prot. n",
            NullState::ProtectedNull => "prot. null",
            NullState::ProtectedNonNull => "prot. non null",
        }
    }

    fn bit1(self) -> bool {
        self.bits() & BIT1 != 0
    }

    fn bit2(self) -> bool {
        self.bits() & BIT2 != 0
    }

    fn bit3(self) -> bool {
        self.bits() & BIT3 != 0
    }

    fn bit4(self) -> bool {
        self.bits() & BIT4 != 0
    }

    /// Null on every path reaching this point.
    pub fn is_definitely_null(self) -> bool {
        self.bit1() && self.bit2() && (!self.bit3() || !self.bit4())
    }

    /// Non-null on every path reaching this point.
    pub fn is_definitely_non_null(self) -> bool {
        self.bit1() && self.bit3() && (!self.bit2() || self.bit4())
    }

    /// Assigned an unclassifiable value on every path.
    pub fn is_definitely_unknown(self) -> bool {
        self.bit1() && self.bit4() && !self.bit2() && !self.bit3()
    }

    /// Null on at least one path. Deliberately excludes the pure
    /// `prot. null` state.
    pub fn is_potentially_null(self) -> bool {
        self.bit2() && (!self.bit1() || !self.bit3())
    }

    /// Non-null on at least one path. Deliberately excludes the pure
    /// `prot. non null` state.
    pub fn is_potentially_non_null(self) -> bool {
        self.bit3() && (!self.bit1() || !self.bit2())
    }

    /// Unknown on at least one path.
    pub fn is_potentially_unknown(self) -> bool {
        self.bit4() && (!self.bit1() || (!self.bit2() && !self.bit3()))
    }

    /// Compared equal to null and not reassigned since.
    pub fn is_protected_null(self) -> bool {
        self.bit1() && self.bit2() && (self.bit3() ^ self.bit4())
    }

    /// Compared equal to non-null and not reassigned since.
    pub fn is_protected_non_null(self) -> bool {
        self.bit1() && self.bit3() && self.bit4()
    }

    /// Whether any nullness knowledge has been recorded at all.
    pub fn has_null_info(self) -> bool {
        self != NullState::Start
    }
}

impl Default for NullState {
    fn default() -> Self {
        NullState::Start
    }
}

impl std::fmt::Display for NullState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
