//! Unopinionated standalone utilities.

mod geom;
pub use geom::{s4, s8, VecExt};

mod path;
pub use path::{astar_path, flood_fill_4};

mod rng;
pub use rng::{srng, RngExt};

pub type FastHasher = rustc_hash::FxHasher;

/// Map with an efficient hash function.
pub use rustc_hash::FxHashMap as HashMap;

/// Set with an efficient hash function.
pub use rustc_hash::FxHashSet as HashSet;

/// Good default concrete rng.
pub type GameRng = rand_xorshift::XorShiftRng;
