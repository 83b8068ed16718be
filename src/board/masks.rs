//! Geometry masks over the 50 playable squares.
//!
//! Square 1 is the top-left playable square, square 50 the bottom-right;
//! bit `i` of every mask is square `i` and bit 0 is never used. Row 1 is the
//! top row (Black's home), row 10 the bottom row (White's home). Column 1 is
//! the leftmost column. Left diagonals run bottom-left to top-right, right
//! diagonals top-left to bottom-right; `right_diagonal[5]` is the long
//! center diagonal.
//!
//! Storing board regions as single `u64` words lets the evaluator answer
//! "does this formation stand" with one AND instead of walking squares.

use once_cell::sync::Lazy;

/// All 50 playable squares.
pub const BOARD: u64 = 0x0007_FFFF_FFFF_FFFE;

/// Mask with only `square` set.
#[inline]
#[must_use]
pub const fn bit(square: usize) -> u64 {
    1 << square
}

const fn squares(list: &[u8]) -> u64 {
    let mut mask = 0u64;
    let mut i = 0;
    while i < list.len() {
        mask |= 1u64 << list[i];
        i += 1;
    }
    mask
}

/// True when `pieces` overlaps `mask` anywhere.
#[inline]
#[must_use]
pub const fn intersects(pieces: u64, mask: u64) -> bool {
    pieces & mask != 0
}

/// True when `pieces` stays entirely off `mask`.
#[inline]
#[must_use]
pub const fn avoids(pieces: u64, mask: u64) -> bool {
    pieces & mask == 0
}

/// True when `pieces` covers every square of `pattern`.
#[inline]
#[must_use]
pub const fn forms(pieces: u64, pattern: u64) -> bool {
    pieces & pattern == pattern
}

// Defensive back-row formations: the strong bridge holds the three
// odd home squares, the weak bridge the two even ones.
pub const WHITE_STRONG_BRIDGE: u64 = squares(&[46, 48, 50]);
pub const WHITE_WEAK_BRIDGE: u64 = squares(&[47, 49]);
pub const BLACK_STRONG_BRIDGE: u64 = squares(&[1, 3, 5]);
pub const BLACK_WEAK_BRIDGE: u64 = squares(&[2, 4]);

// The ten-square wedge anchored on the home row.
pub const WHITE_TRIANGLE: u64 = squares(&[33, 38, 39, 42, 43, 44, 47, 48, 49, 50]);
pub const BLACK_TRIANGLE: u64 = squares(&[1, 2, 3, 4, 7, 8, 9, 12, 13, 18]);

// Zones that must hold nothing but the bridge itself for the bridge to be
// attackable from the front.
pub const WHITE_STRONG_BRIDGE_ZONE: u64 = WHITE_TRIANGLE;
pub const WHITE_WEAK_BRIDGE_ZONE: u64 = squares(&[32, 37, 38, 41, 42, 43, 46, 47, 48, 49]);
pub const BLACK_STRONG_BRIDGE_ZONE: u64 = BLACK_TRIANGLE;
pub const BLACK_WEAK_BRIDGE_ZONE: u64 = squares(&[2, 3, 4, 5, 8, 9, 10, 13, 14, 19]);

/// The two endpoint squares of the long center diagonal.
pub const RIVER_ENDS: u64 = squares(&[5, 46]);

/// Line and region masks derived from the square numbering, built once at
/// startup and shared read-only by every search.
pub struct Geometry {
    /// `row[1..=10]`, five squares each; index 0 is unused.
    pub row: [u64; 11],
    /// `column[1..=10]`, five squares each; index 0 is unused.
    pub column: [u64; 11],
    /// `left_diagonal[1..=10]`; index 0 is unused.
    pub left_diagonal: [u64; 11],
    /// `right_diagonal[1..=9]`; index 0 is unused.
    pub right_diagonal: [u64; 10],
    /// Columns 1-5.
    pub left_side: u64,
    /// Columns 6-10.
    pub right_side: u64,
    /// Rows 4-7 and columns 4-7.
    pub center: u64,
    /// The long center diagonal, `right_diagonal[5]`.
    pub river: u64,
}

static GEOMETRY: Lazy<Geometry> = Lazy::new(Geometry::build);

/// The process-wide geometry table.
#[inline]
#[must_use]
pub fn geometry() -> &'static Geometry {
    &GEOMETRY
}

impl Geometry {
    fn build() -> Self {
        let mut row = [0u64; 11];
        for (r, mask) in row.iter_mut().enumerate().skip(1) {
            for j in 0..5 {
                *mask |= 1u64 << (5 * (r - 1) + j + 1);
            }
        }

        let mut column = [0u64; 11];
        for (c, mask) in column.iter_mut().enumerate().skip(1) {
            // Odd columns lie on even rows, even columns on odd rows.
            let first_row = if c % 2 == 0 { 1 } else { 2 };
            let offset = (c + 1) / 2;
            let mut r = first_row;
            while r <= 10 {
                *mask |= 1u64 << (5 * (r - 1) + offset);
                r += 2;
            }
        }

        let left_diagonal = [
            0,
            squares(&[46]),
            squares(&[36, 41, 47]),
            squares(&[26, 31, 37, 42, 48]),
            squares(&[16, 21, 27, 32, 38, 43, 49]),
            squares(&[6, 11, 17, 22, 28, 33, 39, 44, 50]),
            squares(&[1, 7, 12, 18, 23, 29, 34, 40, 45]),
            squares(&[2, 8, 13, 19, 24, 30, 35]),
            squares(&[3, 9, 14, 20, 25]),
            squares(&[4, 10, 15]),
            squares(&[5]),
        ];

        let right_diagonal = [
            0,
            squares(&[1, 6]),
            squares(&[2, 7, 11, 16]),
            squares(&[3, 8, 12, 17, 21, 26]),
            squares(&[4, 9, 13, 18, 22, 27, 31, 36]),
            squares(&[5, 10, 14, 19, 23, 28, 32, 37, 41, 46]),
            squares(&[15, 20, 24, 29, 33, 38, 42, 47]),
            squares(&[25, 30, 34, 39, 43, 48]),
            squares(&[35, 40, 44, 49]),
            squares(&[45, 50]),
        ];

        let left_side = column[1] | column[2] | column[3] | column[4] | column[5];
        let right_side = column[6] | column[7] | column[8] | column[9] | column[10];

        let mut center = 0u64;
        for i in 4..=7 {
            center |= row[i] | column[i];
        }

        Geometry {
            row,
            column,
            left_diagonal,
            right_diagonal,
            left_side,
            right_side,
            center,
            river: right_diagonal[5],
        }
    }
}
