//! Board-side types: the host collaborator contract, the bit-mask codec and
//! the geometry tables the evaluator reads.
//!
//! The engine never owns a board. The host hands a mutable position into the
//! search, the search plays moves forward and takes them back on that same
//! object, and everything cache-shaped is keyed on an immutable snapshot of
//! the position ([`PositionKey`]) rather than on the host object itself.

pub mod masks;

mod error;
mod eval;
mod simple;
mod types;


pub use error::SquareError;
pub use eval::Evaluator;
pub use simple::{SimpleBoard, SimpleMove};
pub use types::{BitMasks, Color, DraughtsMove, DraughtsState, Occupant, PositionKey};
