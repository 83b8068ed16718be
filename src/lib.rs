//! Decision engine for 10x10 draughts.
//!
//! Given a mutable board position supplied by the host and a stop signal
//! driven by the host's clock, [`Player::decide`] runs a time-bounded
//! iterative-deepening alpha-beta search and returns the best move found
//! before the signal arrived. Board representation, move legality and turn
//! scheduling stay on the host side; the engine consumes them through the
//! [`board::DraughtsState`] contract.
//!
//! # Example
//! ```
//! use draughts_engine::board::SimpleBoard;
//! use draughts_engine::{Player, SearchConfig};
//!
//! let mut board = SimpleBoard::initial();
//! let player = Player::with_config(SearchConfig {
//!     max_depth: Some(3),
//!     ..SearchConfig::default()
//! });
//! let mv = player.decide(&mut board).expect("the opening has legal moves");
//! # let _ = mv;
//! ```

pub mod board;
pub mod engine;
pub mod search;
pub mod tt;

pub use board::{BitMasks, Color, DraughtsMove, DraughtsState, Occupant, PositionKey};
pub use engine::Player;
pub use search::{Cancelled, SearchConfig, SearchStats};
pub use tt::{BoundsEntry, BoundsTable};
