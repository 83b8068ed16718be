//! Player lifecycle: one decision per call, stopped from outside.
//!
//! The host owns the clock. It calls [`Player::decide`] on its scheduling
//! thread and, when time is up, calls [`Player::request_stop`] from its
//! timer thread; the search notices the flag at the next node and unwinds.
//! Between those two calls [`Player::current_estimate`] reports how good
//! the position looks after the last finished iteration.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use log::debug;
use parking_lot::Mutex;

use crate::board::{Color, DraughtsState};
use crate::search::{SearchConfig, SearchContext, SearchSession, SearchStats};

/// A draughts player driven by an external stop signal.
///
/// All methods take `&self`, so a host can share one player between its
/// scheduling and timer threads behind an `Arc`.
pub struct Player {
    stop: AtomicBool,
    estimate: AtomicI32,
    stats: Mutex<SearchStats>,
    config: SearchConfig,
}

impl Player {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    #[must_use]
    pub fn with_config(config: SearchConfig) -> Self {
        Player {
            stop: AtomicBool::new(false),
            estimate: AtomicI32::new(0),
            stats: Mutex::new(SearchStats::default()),
            config,
        }
    }

    /// Pick a move for the side to move on `state`.
    ///
    /// Every call starts a fresh session: empty caches, the mover's color
    /// captured, estimate reset. The search deepens until
    /// [`request_stop`](Self::request_stop) (or the configured depth cap)
    /// and hands back the best move of the last finished iteration,
    /// degrading to the first legal move when not even depth 1 finished.
    /// Returns `None` only when `state` offers no legal move at all.
    pub fn decide<S: DraughtsState>(&self, state: &mut S) -> Option<S::Move> {
        let we_are_white = state.side_to_move() == Color::White;
        self.estimate.store(0, Ordering::Relaxed);

        let mut session = SearchSession::new(we_are_white, &self.config);
        let mut ctx = SearchContext::new(state, &mut session, &self.stop, &self.config);
        let report = |_depth: u32, alpha: i32| self.estimate.store(alpha, Ordering::Relaxed);
        ctx.on_iteration = Some(&report);

        let (best, stats) = ctx.deepen();
        debug!(
            "decision done: depth {depth}, {nodes} nodes, estimate {estimate}",
            depth = stats.depth_completed,
            nodes = stats.nodes,
            estimate = stats.root_estimate
        );
        *self.stats.lock() = stats;
        best
    }

    /// Ask the running decision to stop. Callable from any thread at any
    /// time, including before the first decision; the pending signal is
    /// consumed by the next search node that observes it.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Root score after the last finished iteration of the current (or most
    /// recent) decision; positive favors this player.
    #[must_use]
    pub fn current_estimate(&self) -> i32 {
        self.estimate.load(Ordering::Relaxed)
    }

    /// Counters of the most recent finished decision.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        *self.stats.lock()
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
