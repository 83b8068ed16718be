//! A compact draughts board implementing the collaborator contract.
//!
//! This is the board the test suite, the property tests and the benchmarks
//! play on; hosts bring their own. The rules model is deliberately small:
//! men step one square diagonally toward promotion and capture by a single
//! jump in any of the four diagonal directions, kings step and jump in all
//! four directions, captures are compulsory (when any jump exists, only
//! jumps are legal), and a man promotes on reaching the far row. Multi-jump
//! chains, flying kings and the majority-capture rule are left out — the
//! search never depends on which rule set produced the move list.

use super::error::SquareError;
use super::types::{Color, DraughtsMove, DraughtsState, Occupant};

const UP: [(i32, i32); 2] = [(-1, -1), (-1, 1)];
const DOWN: [(i32, i32); 2] = [(1, -1), (1, 1)];
const ALL: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// 1-based row of a playable square.
#[inline]
fn row_of(square: usize) -> i32 {
    ((square - 1) / 5 + 1) as i32
}

/// 1-based column of a playable square on the full 10x10 grid.
#[inline]
fn col_of(square: usize) -> i32 {
    let pos = ((square - 1) % 5 + 1) as i32;
    if row_of(square) % 2 == 1 {
        2 * pos
    } else {
        2 * pos - 1
    }
}

/// The playable square at (`row`, `col`), if that grid cell is playable.
fn square_at(row: i32, col: i32) -> Option<usize> {
    if !(1..=10).contains(&row) || !(1..=10).contains(&col) {
        return None;
    }
    // Odd rows hold the even columns, even rows the odd ones.
    if (row % 2 == 1) == (col % 2 == 1) {
        return None;
    }
    let pos = if row % 2 == 1 { col / 2 } else { (col + 1) / 2 };
    Some(((row - 1) * 5 + pos) as usize)
}

/// A step or a single jump on a [`SimpleBoard`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleMove {
    from: usize,
    to: usize,
    /// Jumped-over square and what stood there, restored on undo.
    capture: Option<(usize, Occupant)>,
    /// Whether the mover is a man arriving on its promotion row.
    promotes: bool,
}

impl SimpleMove {
    #[must_use]
    pub fn from_square(&self) -> usize {
        self.from
    }

    #[must_use]
    pub fn to_square(&self) -> usize {
        self.to
    }

    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }
}

impl DraughtsMove for SimpleMove {
    fn capture_count(&self) -> usize {
        usize::from(self.capture.is_some())
    }
}

/// In-memory board with value semantics over piece placement and side to
/// move.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SimpleBoard {
    /// Index 0 is unused and stays `Empty`.
    squares: [Occupant; 51],
    side: Color,
}

impl SimpleBoard {
    /// An empty board with White to move.
    #[must_use]
    pub fn empty() -> Self {
        SimpleBoard {
            squares: [Occupant::Empty; 51],
            side: Color::White,
        }
    }

    /// The standard starting position: Black men on squares 1-20, White men
    /// on squares 31-50, White to move.
    #[must_use]
    pub fn initial() -> Self {
        let mut board = SimpleBoard::empty();
        for square in 1..=20 {
            board.squares[square] = Occupant::BlackMan;
        }
        for square in 31..=50 {
            board.squares[square] = Occupant::WhiteMan;
        }
        board
    }

    /// Put `occupant` on `square`, replacing whatever stood there.
    ///
    /// # Panics
    /// Panics when `square` is outside `1..=50`; use
    /// [`try_place`](Self::try_place) for a checked variant.
    pub fn place(&mut self, square: usize, occupant: Occupant) -> &mut Self {
        self.try_place(square, occupant)
            .expect("square out of range");
        self
    }

    /// Checked [`place`](Self::place).
    pub fn try_place(
        &mut self,
        square: usize,
        occupant: Occupant,
    ) -> Result<&mut Self, SquareError> {
        if !(1..=50).contains(&square) {
            return Err(SquareError { square });
        }
        self.squares[square] = occupant;
        Ok(self)
    }

    pub fn set_side_to_move(&mut self, side: Color) -> &mut Self {
        self.side = side;
        self
    }

    fn has_piece(&self, color: Color) -> bool {
        self.squares
            .iter()
            .any(|occ| occ.color() == Some(color))
    }

    fn promotion_row(color: Color) -> i32 {
        match color {
            Color::White => 1,
            Color::Black => 10,
        }
    }

    fn moves_for(&self, square: usize, captures: &mut Vec<SimpleMove>, steps: &mut Vec<SimpleMove>) {
        let occ = self.squares[square];
        let row = row_of(square);
        let col = col_of(square);
        let promotion = Self::promotion_row(self.side);

        let step_dirs: &[(i32, i32)] = if occ.is_king() {
            &ALL
        } else if self.side.is_white() {
            &UP
        } else {
            &DOWN
        };
        for &(dr, dc) in step_dirs {
            if let Some(to) = square_at(row + dr, col + dc) {
                if self.squares[to] == Occupant::Empty {
                    steps.push(SimpleMove {
                        from: square,
                        to,
                        capture: None,
                        promotes: !occ.is_king() && row + dr == promotion,
                    });
                }
            }
        }

        // Men jump backward too.
        for &(dr, dc) in &ALL {
            let over = square_at(row + dr, col + dc);
            let to = square_at(row + 2 * dr, col + 2 * dc);
            if let (Some(over), Some(to)) = (over, to) {
                let victim = self.squares[over];
                if victim.color() == Some(self.side.opposite())
                    && self.squares[to] == Occupant::Empty
                {
                    captures.push(SimpleMove {
                        from: square,
                        to,
                        capture: Some((over, victim)),
                        promotes: !occ.is_king() && row + 2 * dr == promotion,
                    });
                }
            }
        }
    }
}

impl DraughtsState for SimpleBoard {
    type Move = SimpleMove;

    fn legal_moves(&self) -> Vec<SimpleMove> {
        let mut captures = Vec::new();
        let mut steps = Vec::new();
        for square in 1..=50 {
            if self.squares[square].color() == Some(self.side) {
                self.moves_for(square, &mut captures, &mut steps);
            }
        }
        if captures.is_empty() {
            steps
        } else {
            captures
        }
    }

    fn apply(&mut self, mv: &SimpleMove) {
        let mover = self.squares[mv.from];
        debug_assert_eq!(mover.color(), Some(self.side), "apply out of turn");
        self.squares[mv.from] = Occupant::Empty;
        if let Some((over, victim)) = mv.capture {
            debug_assert_eq!(self.squares[over], victim, "stale capture in apply");
            self.squares[over] = Occupant::Empty;
        }
        self.squares[mv.to] = if mv.promotes { mover.crowned() } else { mover };
        self.side = self.side.opposite();
    }

    fn undo(&mut self, mv: &SimpleMove) {
        self.side = self.side.opposite();
        let mover = self.squares[mv.to];
        self.squares[mv.to] = Occupant::Empty;
        if let Some((over, victim)) = mv.capture {
            self.squares[over] = victim;
        }
        self.squares[mv.from] = if mv.promotes { mover.uncrowned() } else { mover };
    }

    fn is_terminal(&self) -> bool {
        if !self.has_piece(Color::White) || !self.has_piece(Color::Black) {
            return true;
        }
        self.legal_moves().is_empty()
    }

    fn side_to_move(&self) -> Color {
        self.side
    }

    fn occupant(&self, square: usize) -> Occupant {
        assert!((1..=50).contains(&square), "square {square} out of range");
        self.squares[square]
    }
}
