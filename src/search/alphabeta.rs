//! Fail-hard alpha-beta core.

use crate::board::{DraughtsState, PositionKey};

use super::{SearchContext, SearchOutcome};

impl<S: DraughtsState> SearchContext<'_, S> {
    /// Resolve the position's value inside `[alpha, beta]` at `depth`
    /// remaining plies, maximizing or minimizing for the mover at the root.
    ///
    /// The stop flag is observed on entry, before anything else; a set flag
    /// unwinds the whole tree walk as [`Cancelled`](super::Cancelled). The
    /// bounds cache is consulted next: an entry proven at this depth or
    /// deeper either cuts off outright or narrows the window. Bounds are
    /// recorded against the window as it stood before the move loop.
    pub fn search(
        &mut self,
        mut alpha: i32,
        mut beta: i32,
        depth: u32,
        maximize: bool,
    ) -> SearchOutcome<i32> {
        self.check_stop()?;
        self.nodes += 1;

        let key = PositionKey::of(&*self.state);
        if let Some(entry) = self.session.bounds.probe(&key) {
            if entry.depth >= depth {
                if entry.lower >= beta {
                    return Ok(entry.lower);
                }
                if entry.upper <= alpha {
                    return Ok(entry.upper);
                }
                alpha = alpha.max(entry.lower);
                beta = beta.min(entry.upper);
            }
        }

        if self.state.is_terminal() {
            return Ok(self.evaluate());
        }
        if depth == 0 {
            return Ok(self.quiesce(alpha, beta, self.config.quiescence_depth, maximize));
        }

        // Interior nodes take the host's move order as-is; ordering pays
        // for itself only at the root.
        let moves = self.state.legal_moves();
        let mut best;
        if maximize {
            best = i32::MIN;
            let mut a = alpha;
            for mv in &moves {
                if best >= beta {
                    break;
                }
                self.state.apply(mv);
                let value = self.search(a, beta, depth - 1, false);
                self.state.undo(mv);
                best = best.max(value?);
                a = a.max(best);
            }
        } else {
            best = i32::MAX;
            let mut b = beta;
            for mv in &moves {
                if best <= alpha {
                    break;
                }
                self.state.apply(mv);
                let value = self.search(alpha, b, depth - 1, true);
                self.state.undo(mv);
                best = best.min(value?);
                b = b.min(best);
            }
        }

        self.session.bounds.record(key, best, alpha, beta, depth);
        Ok(best)
    }
}
