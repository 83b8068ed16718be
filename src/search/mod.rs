//! Time-bounded search.
//!
//! - Iterative deepening over odd depths, stopped only by the host's signal
//! - Fail-hard alpha-beta with a depth-aware bounds cache
//! - Capture-only quiescence at the depth horizon
//! - Root-only move ordering seeded with the previous iteration's best move
//! - Cooperative cancellation carried as a result value, never a panic
//!
//! Everything here is single-threaded: one thread walks the whole tree, and
//! the only cross-thread traffic is the host setting the stop flag.

mod alphabeta;
mod iterative;
mod quiescence;

use std::sync::atomic::{AtomicBool, Ordering};

use crate::board::{DraughtsState, Evaluator};
use crate::tt::BoundsTable;

/// Default ply budget for the capture-only extension. Forced-capture chains
/// resolve long before this, so it is effectively unbounded.
pub const QUIESCENCE_DEPTH: u32 = 100;

/// Control marker: the host asked the running decision to stop.
///
/// Not an error. It unwinds through every recursive search return to the
/// deepening loop, which recovers by keeping the last finished iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cancelled;

/// Result of every recursive search call.
pub type SearchOutcome<T> = Result<T, Cancelled>;

/// Knobs for one decision.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Ply budget handed to the quiescence extension at the horizon.
    pub quiescence_depth: u32,
    /// Stop deepening past this depth; `None` runs until the stop signal.
    pub max_depth: Option<u32>,
    /// Include the center-control evaluation term.
    pub center_control: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            quiescence_depth: QUIESCENCE_DEPTH,
            max_depth: None,
            center_control: false,
        }
    }
}

/// Counters reported after a decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes visited, quiescence included.
    pub nodes: u64,
    /// Deepest fully finished iteration; 0 when none finished.
    pub depth_completed: u32,
    /// Root alpha of the last finished iteration.
    pub root_estimate: i32,
    /// Whether the stop signal ended the decision.
    pub stopped: bool,
}

/// Per-decision caches and perspective.
///
/// Created fresh for every decision and dropped with it; nothing in here
/// survives into the next move request, trading cache hits for correctness
/// while the host board churns.
pub struct SearchSession {
    pub(crate) evaluator: Evaluator,
    pub(crate) bounds: BoundsTable,
}

impl SearchSession {
    #[must_use]
    pub fn new(we_are_white: bool, config: &SearchConfig) -> Self {
        let mut evaluator = Evaluator::new(we_are_white);
        evaluator.set_center_control(config.center_control);
        SearchSession {
            evaluator,
            bounds: BoundsTable::new(),
        }
    }
}

/// Callback fired after each finished deepening iteration: (depth, root
/// alpha).
pub type IterationCallback<'a> = &'a dyn Fn(u32, i32);

/// Everything one decision's tree walk needs, borrowed together.
pub struct SearchContext<'a, S: DraughtsState> {
    pub state: &'a mut S,
    pub session: &'a mut SearchSession,
    pub stop: &'a AtomicBool,
    pub config: &'a SearchConfig,
    pub nodes: u64,
    pub on_iteration: Option<IterationCallback<'a>>,
}

impl<'a, S: DraughtsState> SearchContext<'a, S> {
    pub fn new(
        state: &'a mut S,
        session: &'a mut SearchSession,
        stop: &'a AtomicBool,
        config: &'a SearchConfig,
    ) -> Self {
        SearchContext {
            state,
            session,
            stop,
            config,
            nodes: 0,
            on_iteration: None,
        }
    }

    /// Static evaluation of the current position, memoized per session.
    pub(crate) fn evaluate(&mut self) -> i32 {
        self.session.evaluator.evaluate(&*self.state)
    }

    /// Observe the stop flag. Observation consumes it: a set flag is
    /// cleared here and turned into [`Cancelled`].
    pub(crate) fn check_stop(&self) -> SearchOutcome<()> {
        if self.stop.load(Ordering::Relaxed) {
            self.stop.store(false, Ordering::Relaxed);
            return Err(Cancelled);
        }
        Ok(())
    }
}
