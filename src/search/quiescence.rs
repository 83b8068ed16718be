//! Capture-only extension at the search horizon.
//!
//! A position in the middle of an exchange cannot be trusted to the static
//! evaluation: the next capture may swing it by a piece. So when the main
//! search runs out of depth it keeps playing captures — and only captures —
//! until the position goes quiet, then evaluates.

use crate::board::{DraughtsMove, DraughtsState};

use super::SearchContext;

impl<S: DraughtsState> SearchContext<'_, S> {
    /// Fail-hard capture-only search below the horizon.
    ///
    /// Runs to completion once entered: no stop-flag checks and no bounds
    /// cache in here — the extension is bounded and cheap enough to finish.
    pub fn quiesce(&mut self, alpha: i32, beta: i32, depth: u32, maximize: bool) -> i32 {
        if depth == 0 || self.state.is_terminal() {
            return self.evaluate();
        }
        self.nodes += 1;

        let mut moves = self.state.legal_moves();
        // Captures first, biggest first: the loop below stops at the first
        // quiet move and relies on captures forming a prefix.
        moves.sort_by(|a, b| b.capture_count().cmp(&a.capture_count()));

        let mut best;
        if maximize {
            best = i32::MIN;
            let mut a = alpha;
            for mv in &moves {
                if best >= beta {
                    break;
                }
                if mv.capture_count() == 0 {
                    break;
                }
                self.state.apply(mv);
                best = best.max(self.quiesce(a, beta, depth - 1, false));
                self.state.undo(mv);
                a = a.max(best);
            }
        } else {
            best = i32::MAX;
            let mut b = beta;
            for mv in &moves {
                if best <= alpha {
                    break;
                }
                if mv.capture_count() == 0 {
                    break;
                }
                self.state.apply(mv);
                best = best.min(self.quiesce(alpha, b, depth - 1, true));
                self.state.undo(mv);
                b = b.min(best);
            }
        }

        if best == i32::MIN || best == i32::MAX {
            // No capture explored: the position is quiet as it stands.
            best = self.evaluate();
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use crate::board::{DraughtsMove, DraughtsState, Occupant, SimpleBoard};
    use crate::search::{SearchConfig, SearchContext, SearchSession, QUIESCENCE_DEPTH};

    fn quiesce_white(board: &mut SimpleBoard, depth: u32) -> i32 {
        let mut session = SearchSession::new(true, &SearchConfig::default());
        let stop = AtomicBool::new(false);
        let config = SearchConfig::default();
        let mut ctx = SearchContext::new(board, &mut session, &stop, &config);
        ctx.quiesce(i32::MIN, i32::MAX, depth, true)
    }

    fn static_eval(board: &SimpleBoard) -> i32 {
        crate::board::Evaluator::new(true).evaluate(board)
    }

    #[test]
    fn quiet_position_returns_the_static_evaluation() {
        let mut board = SimpleBoard::initial();
        let expected = static_eval(&board);
        assert_eq!(quiesce_white(&mut board, QUIESCENCE_DEPTH), expected);
    }

    #[test]
    fn depth_zero_returns_the_static_evaluation() {
        let mut board = SimpleBoard::empty();
        board
            .place(28, Occupant::WhiteMan)
            .place(22, Occupant::BlackMan)
            .place(48, Occupant::WhiteMan);
        // A capture is available, but the budget is spent.
        assert!(board.legal_moves()[0].capture_count() >= 1);
        let expected = static_eval(&board);
        assert_eq!(quiesce_white(&mut board, 0), expected);
    }

    #[test]
    fn capture_is_taken_when_it_wins_material() {
        let mut board = SimpleBoard::empty();
        board
            .place(28, Occupant::WhiteMan)
            .place(22, Occupant::BlackMan)
            .place(2, Occupant::BlackMan)
            .place(48, Occupant::WhiteMan);
        let before = board.clone();

        let stand_pat = static_eval(&board);
        let resolved = quiesce_white(&mut board, QUIESCENCE_DEPTH);
        // The free capture must improve on standing pat.
        assert!(
            resolved > stand_pat,
            "resolved {resolved} vs stand pat {stand_pat}"
        );
        assert_eq!(board, before);
    }

    #[test]
    fn exchange_settles_to_the_post_capture_balance() {
        // White must jump 33x22, Black must recapture 17x28; the extension
        // has to see both jumps before trusting an evaluation.
        let mut board = SimpleBoard::empty();
        board
            .place(33, Occupant::WhiteMan)
            .place(28, Occupant::BlackMan)
            .place(17, Occupant::BlackMan)
            .place(50, Occupant::WhiteMan)
            .place(5, Occupant::BlackMan);

        // Play the forced exchange by hand; the extension must agree with
        // the quiet position at its end.
        let mut settled = board.clone();
        for _ in 0..2 {
            let jumps = settled.legal_moves();
            assert_eq!(jumps.len(), 1);
            assert_eq!(jumps[0].capture_count(), 1);
            let jump = jumps[0].clone();
            settled.apply(&jump);
        }
        let expected = static_eval(&settled);

        let resolved = quiesce_white(&mut board, QUIESCENCE_DEPTH);
        assert_eq!(resolved, expected);
        // Down a man once the smoke clears.
        assert!(resolved < 0);
    }
}
