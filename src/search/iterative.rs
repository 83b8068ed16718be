//! Root move ordering and the iterative-deepening loop.

use log::{debug, info};

use crate::board::DraughtsState;

use super::{Cancelled, SearchContext, SearchOutcome, SearchStats};

impl<S: DraughtsState> SearchContext<'_, S> {
    /// One full-width root pass at `depth`.
    ///
    /// The root is the only node worth ordering: the previous iteration's
    /// best move goes first, the rest follow by a one-ply
    /// apply/evaluate/undo probe, best for the mover first. Each candidate
    /// is then resolved one ply down with a rising alpha. Returns the best
    /// move with the root alpha it earned.
    pub fn root_search(
        &mut self,
        depth: u32,
        previous_best: Option<&S::Move>,
    ) -> SearchOutcome<(Option<S::Move>, i32)> {
        let moves = self.state.legal_moves();
        let mut scored: Vec<(S::Move, i32)> = Vec::with_capacity(moves.len());
        for mv in moves {
            let score = if previous_best.is_some_and(|best| *best == mv) {
                i32::MAX
            } else {
                self.state.apply(&mv);
                let probe = self.evaluate();
                self.state.undo(&mv);
                probe
            };
            scored.push((mv, score));
        }
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        let mut alpha = i32::MIN;
        let beta = i32::MAX;
        let mut best: Option<S::Move> = None;
        for (mv, _) in &scored {
            self.state.apply(mv);
            let value = self.search(alpha, beta, depth - 1, false);
            self.state.undo(mv);
            let value = value?;
            if value > alpha {
                alpha = value;
                best = Some(mv.clone());
            }
        }
        Ok((best, alpha))
    }

    /// Deepen until the stop signal (or the configured depth cap) and
    /// return the best move of the last finished iteration.
    ///
    /// Depth climbs by two so the root horizon stays on the mover's own
    /// ply. A cancelled iteration is discarded, never retried. When not a
    /// single iteration finished, the first legal move is returned rather
    /// than nothing — a player never forfeits by silence.
    pub fn deepen(&mut self) -> (Option<S::Move>, SearchStats) {
        let mut stats = SearchStats::default();
        let mut best: Option<S::Move> = None;

        if self.state.legal_moves().is_empty() {
            return (None, stats);
        }

        let mut depth = 1;
        loop {
            if self.config.max_depth.is_some_and(|limit| depth > limit) {
                break;
            }
            match self.root_search(depth, best.as_ref()) {
                Ok((mv, alpha)) => {
                    if mv.is_some() {
                        best = mv;
                    }
                    stats.depth_completed = depth;
                    stats.root_estimate = alpha;
                    if let Some(report) = self.on_iteration {
                        report(depth, alpha);
                    }
                    debug!(
                        "depth {depth} finished: estimate {alpha}, {nodes} nodes",
                        nodes = self.nodes
                    );
                }
                Err(Cancelled) => {
                    stats.stopped = true;
                    info!(
                        "stopped at depth {depth} after {nodes} nodes",
                        nodes = self.nodes
                    );
                    break;
                }
            }
            depth += 2;
        }

        if best.is_none() {
            best = self.state.legal_moves().into_iter().next();
        }
        stats.nodes = self.nodes;
        (best, stats)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use crate::board::{Color, DraughtsState, Occupant, SimpleBoard};
    use crate::search::{SearchConfig, SearchContext, SearchSession, SearchStats};

    fn decide_with_depth(board: &mut SimpleBoard, max_depth: u32) -> (Option<<SimpleBoard as DraughtsState>::Move>, SearchStats) {
        let config = SearchConfig {
            max_depth: Some(max_depth),
            ..SearchConfig::default()
        };
        let we_are_white = board.side_to_move() == Color::White;
        let mut session = SearchSession::new(we_are_white, &config);
        let stop = AtomicBool::new(false);
        let mut ctx = SearchContext::new(board, &mut session, &stop, &config);
        ctx.deepen()
    }

    #[test]
    fn depth_one_opening_estimate_is_level() {
        let mut board = SimpleBoard::initial();
        let (mv, stats) = decide_with_depth(&mut board, 1);
        assert!(mv.is_some());
        assert_eq!(stats.depth_completed, 1);
        assert_eq!(stats.root_estimate, 0);
        assert!(!stats.stopped);
    }

    #[test]
    fn depth_climbs_in_steps_of_two() {
        let mut board = SimpleBoard::initial();
        let (_, stats) = decide_with_depth(&mut board, 4);
        // Depths 1 and 3 run; 5 exceeds the cap.
        assert_eq!(stats.depth_completed, 3);
    }

    #[test]
    fn forced_capture_is_chosen() {
        let mut board = SimpleBoard::empty();
        board
            .place(28, Occupant::WhiteMan)
            .place(22, Occupant::BlackMan)
            .place(2, Occupant::BlackMan)
            .place(48, Occupant::WhiteMan);
        let (mv, _) = decide_with_depth(&mut board, 3);
        let mv = mv.expect("a move exists");
        assert!(mv.is_capture());
        assert_eq!(mv.from_square(), 28);
    }

    #[test]
    fn stop_before_the_first_iteration_yields_the_first_legal_move() {
        let mut board = SimpleBoard::initial();
        let first = board.legal_moves().into_iter().next().unwrap();

        let config = SearchConfig::default();
        let mut session = SearchSession::new(true, &config);
        let stop = AtomicBool::new(true);
        let mut ctx = SearchContext::new(&mut board, &mut session, &stop, &config);
        let (mv, stats) = ctx.deepen();

        assert_eq!(mv, Some(first));
        assert_eq!(stats.depth_completed, 0);
        assert!(stats.stopped);
    }

    #[test]
    fn no_legal_moves_yields_none() {
        let mut board = SimpleBoard::empty();
        board
            .place(46, Occupant::WhiteKing)
            .place(41, Occupant::BlackMan)
            .place(37, Occupant::BlackMan);
        let (mv, stats) = decide_with_depth(&mut board, 3);
        assert_eq!(mv, None);
        assert_eq!(stats.depth_completed, 0);
    }

    #[test]
    fn estimate_callback_fires_per_iteration() {
        use std::cell::RefCell;

        let mut board = SimpleBoard::initial();
        let config = SearchConfig {
            max_depth: Some(3),
            ..SearchConfig::default()
        };
        let mut session = SearchSession::new(true, &config);
        let stop = AtomicBool::new(false);
        let mut ctx = SearchContext::new(&mut board, &mut session, &stop, &config);

        let depths = RefCell::new(Vec::new());
        let report = |depth: u32, alpha: i32| depths.borrow_mut().push((depth, alpha));
        ctx.on_iteration = Some(&report);
        let (mv, _) = ctx.deepen();

        assert!(mv.is_some());
        let depths = depths.into_inner();
        assert_eq!(depths.len(), 2);
        assert_eq!(depths[0].0, 1);
        assert_eq!(depths[1].0, 3);
    }
}
