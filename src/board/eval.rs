//! Bit-mask positional evaluation.
//!
//! Scores are built from White's point of view and flipped once at the end
//! for a Black mover, so every sub-term below returns
//! `white component - black component`. Each term is scaled by a
//! phase-indexed weight; the phase buckets (opening / middlegame / endgame)
//! come from the number of pieces left on the board.
//!
//! Terms:
//! - material (men and kings, kings gaining weight in the endgame)
//! - back-rank strength, tiered by bridge formation
//! - the ten-square triangle formation
//! - left/right side balance
//! - control of the long center diagonal
//! - exploitable-bridge liabilities (negative weights)
//! - run-away men one clear move from promotion
//! - center control, computed but kept out of the total (it never improved
//!   play); `Evaluator::set_center_control` turns it back on

use std::collections::HashMap;

use super::masks::{self, avoids, bit, forms, geometry, intersects};
use super::types::{BitMasks, DraughtsState, PositionKey};

const OPENING_PIECES: u32 = 25;
const MIDDLEGAME_PIECES: u32 = 15;

// Phase-indexed weights: [opening, middlegame, endgame].
const PIECE_WORTH: [i32; 3] = [100, 100, 100];
const KING_WORTH: [i32; 3] = [250, 250, 300];
const BACK_RANK_BONUS: [i32; 3] = [5, 5, 3];
const TRIANGLE_BONUS: [i32; 3] = [10, 0, 0];
const BALANCE_BONUS: [i32; 3] = [4, 6, 3];
const BALANCE_PENALTY: [i32; 3] = [-4, -6, -3];
const RIVER_BONUS: [i32; 3] = [0, 25, 50];
const BRIDGE_PENALTY: [i32; 3] = [0, -10, -15];
const CENTER_BONUS: [i32; 3] = [2, 1, 1];
const RUNAWAY_BONUS: [i32; 3] = [50, 50, 60];

/// Terminal positions are scored a thousandfold so that won games dominate
/// any positional noise and the search prefers the shortest finish.
const TERMINAL_FACTOR: i32 = 1000;

#[inline]
fn game_phase(piece_count: u32) -> usize {
    if piece_count >= MIDDLEGAME_PIECES {
        usize::from(piece_count < OPENING_PIECES)
    } else {
        2
    }
}

#[derive(Clone, Copy)]
struct CachedScore {
    score: i32,
    /// Which side was "us" when the score was computed; a lookup from the
    /// other perspective negates it.
    for_white: bool,
}

/// Position scorer with a per-decision memo.
///
/// One evaluator lives exactly as long as one search session; its cache is
/// keyed on [`PositionKey`] snapshots, never on the mutable host board.
pub struct Evaluator {
    cache: HashMap<PositionKey, CachedScore>,
    we_are_white: bool,
    center_control: bool,
}

impl Evaluator {
    #[must_use]
    pub fn new(we_are_white: bool) -> Self {
        Evaluator {
            cache: HashMap::new(),
            we_are_white,
            center_control: false,
        }
    }

    /// Include the center-control term in the total. Off by default.
    pub fn set_center_control(&mut self, enabled: bool) {
        self.center_control = enabled;
    }

    /// Signed score of `state`: positive favors the evaluator's side.
    pub fn evaluate<S: DraughtsState>(&mut self, state: &S) -> i32 {
        let bitmasks = BitMasks::encode(state);
        let key = bitmasks.key(state.side_to_move());
        if let Some(hit) = self.cache.get(&key) {
            return if hit.for_white == self.we_are_white {
                hit.score
            } else {
                -hit.score
            };
        }

        let white = bitmasks.white();
        let black = bitmasks.black();
        let empty = bitmasks.empty();
        let phase = game_phase(bitmasks.piece_count());

        let white_men = bitmasks.white_men.count_ones() as i32;
        let black_men = bitmasks.black_men.count_ones() as i32;
        let white_kings = bitmasks.white_kings.count_ones() as i32;
        let black_kings = bitmasks.black_kings.count_ones() as i32;

        let mut score = (white_men - black_men) * PIECE_WORTH[phase]
            + (white_kings - black_kings) * KING_WORTH[phase];
        score += back_rank(white, black, bitmasks.white_kings, bitmasks.black_kings, phase);
        score += triangle(&bitmasks, phase);
        score += balance(white, black, phase);
        score += river_control(
            bitmasks.white_kings,
            bitmasks.black_kings,
            bitmasks.occupied(),
            phase,
        );
        score += bridge_exploit(white, black, bitmasks.white_kings, bitmasks.black_kings, phase);
        score += runaway(bitmasks.white_men, bitmasks.black_men, empty, phase);
        if self.center_control {
            score += center_control(white, black, phase);
        }

        if state.is_terminal() {
            score *= TERMINAL_FACTOR;
        }
        if !self.we_are_white {
            score = -score;
        }

        self.cache.insert(
            key,
            CachedScore {
                score,
                for_white: self.we_are_white,
            },
        );
        score
    }
}

/// Bonus for holding the home row so the opponent cannot crown cheaply.
///
/// Three home-row pieces are worth 3/2/1 tiers depending on whether they
/// stand in the strong or the weak bridge; four lose a tier if the back
/// corner is open. Enemy kings devalue the whole idea.
fn back_rank(white: u64, black: u64, white_kings: u64, black_kings: u64, phase: usize) -> i32 {
    let g = geometry();

    let mut white_tier = (white & g.row[10]).count_ones() as i32;
    if white_tier == 3 {
        white_tier = if forms(white, masks::WHITE_STRONG_BRIDGE) {
            3
        } else if forms(white, masks::WHITE_WEAK_BRIDGE) {
            2
        } else {
            1
        };
    } else if white_tier == 4 && avoids(white, bit(50)) {
        white_tier -= 1;
    }
    if black_kings != 0 {
        white_tier = (white_tier - 2).max(0);
    }

    let mut black_tier = (black & g.row[1]).count_ones() as i32;
    if black_tier == 3 {
        black_tier = if forms(black, masks::BLACK_STRONG_BRIDGE) {
            3
        } else if forms(black, masks::BLACK_WEAK_BRIDGE) {
            2
        } else {
            1
        };
    } else if black_tier == 4 && avoids(black, bit(1)) {
        black_tier -= 1;
    }
    if white_kings != 0 {
        black_tier = (black_tier - 2).max(0);
    }

    (white_tier - black_tier) * BACK_RANK_BONUS[phase]
}

/// All-or-nothing bonus for the exact triangle formation of men, only while
/// the opponent has no king to pick it apart.
fn triangle(bitmasks: &BitMasks, phase: usize) -> i32 {
    let white = if forms(bitmasks.white_men, masks::WHITE_TRIANGLE) && bitmasks.black_kings == 0 {
        TRIANGLE_BONUS[phase]
    } else {
        0
    };
    let black = if forms(bitmasks.black_men, masks::BLACK_TRIANGLE) && bitmasks.white_kings == 0 {
        TRIANGLE_BONUS[phase]
    } else {
        0
    };
    white - black
}

/// Bonus for spreading pieces evenly over the two half-boards; a lopsided
/// side is penalized only when the opponent is balanced and can use the
/// open flank.
fn balance(white: u64, black: u64, phase: usize) -> i32 {
    let g = geometry();

    let white_skew =
        (white & g.left_side).count_ones() as i32 - (white & g.right_side).count_ones() as i32;
    let black_skew =
        (black & g.left_side).count_ones() as i32 - (black & g.right_side).count_ones() as i32;
    let white_balanced = white_skew.abs() <= 1;
    let black_balanced = black_skew.abs() <= 1;

    let white_term = if white_balanced {
        BALANCE_BONUS[phase]
    } else if black_balanced {
        BALANCE_PENALTY[phase]
    } else {
        0
    };
    let black_term = if black_balanced {
        BALANCE_BONUS[phase]
    } else if white_balanced {
        BALANCE_PENALTY[phase]
    } else {
        0
    };

    white_term - black_term
}

/// Bonus for a king alone on the long diagonal, holding it from an endpoint.
fn river_control(white_kings: u64, black_kings: u64, occupied: u64, phase: usize) -> i32 {
    let river = geometry().river;
    if (occupied & river).count_ones() != 1 {
        return 0;
    }
    if intersects(white_kings, masks::RIVER_ENDS) {
        RIVER_BONUS[phase]
    } else if intersects(black_kings, masks::RIVER_ENDS) {
        -RIVER_BONUS[phase]
    } else {
        0
    }
}

/// Penalty for a bridge the opponent can walk into.
///
/// A bridge is a liability when it stands bare (nothing else of ours in its
/// zone), an opposing piece is already posted on the approach square, and
/// none of our kings guards the four escape diagonals.
fn bridge_exploit(white: u64, black: u64, white_kings: u64, black_kings: u64, phase: usize) -> i32 {
    let g = geometry();
    let mut white_liabilities = 0;
    let mut black_liabilities = 0;

    if forms(white, masks::WHITE_STRONG_BRIDGE)
        && avoids(white, masks::WHITE_STRONG_BRIDGE_ZONE & !masks::WHITE_STRONG_BRIDGE)
        && intersects(black, bit(37) | bit(39))
        && avoids(
            white_kings,
            g.left_diagonal[3] | g.left_diagonal[5] | g.right_diagonal[5] | g.right_diagonal[7],
        )
    {
        white_liabilities += 1;
    }

    if forms(white, masks::WHITE_WEAK_BRIDGE)
        && avoids(white, masks::WHITE_WEAK_BRIDGE_ZONE & !masks::WHITE_WEAK_BRIDGE)
        && intersects(black, bit(38))
        && avoids(white_kings, g.left_diagonal[4] | g.right_diagonal[6])
    {
        white_liabilities += 1;
    }

    if forms(black, masks::BLACK_STRONG_BRIDGE)
        && avoids(black, masks::BLACK_STRONG_BRIDGE_ZONE & !masks::BLACK_STRONG_BRIDGE)
        && intersects(white, bit(12) | bit(14))
        && avoids(
            black_kings,
            g.left_diagonal[6] | g.left_diagonal[8] | g.right_diagonal[3] | g.right_diagonal[5],
        )
    {
        black_liabilities += 1;
    }

    if forms(black, masks::BLACK_WEAK_BRIDGE)
        && avoids(black, masks::BLACK_WEAK_BRIDGE_ZONE & !masks::BLACK_WEAK_BRIDGE)
        && intersects(white, bit(13))
        && avoids(black_kings, g.left_diagonal[7] | g.right_diagonal[4])
    {
        black_liabilities += 1;
    }

    (white_liabilities - black_liabilities) * BRIDGE_PENALTY[phase]
}

/// Count of pieces on the center rows and columns. Computed but excluded
/// from the total by default.
fn center_control(white: u64, black: u64, phase: usize) -> i32 {
    let center = geometry().center;
    ((white & center).count_ones() as i32 - (black & center).count_ones() as i32)
        * CENTER_BONUS[phase]
}

/// Bonus per man on the penultimate row with a clear diagonal into the
/// promotion row. Edge columns are masked off so the shifted landing square
/// can never wrap around the board.
fn runaway(white_men: u64, black_men: u64, empty: u64, phase: usize) -> i32 {
    let g = geometry();

    let white_front = white_men & g.row[2];
    let white_runners = ((((white_front & !g.column[1]) >> 6) & empty) << 6)
        | (((white_front >> 5) & empty) << 5);

    let black_front = black_men & g.row[9];
    let black_runners = (((black_front << 5) & empty) >> 5)
        | ((((black_front & !g.column[10]) << 6) & empty) >> 6);

    (white_runners.count_ones() as i32 - black_runners.count_ones() as i32) * RUNAWAY_BONUS[phase]
}
