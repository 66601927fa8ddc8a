//! Number Rush: click the numbers 1..N in ascending order as fast as you can.
//!
//! Core modules:
//! - `sequence`: shuffled label order for a round
//! - `placement`: mostly non-overlapping target layout
//! - `state`: round state machine and its reducer
//! - `scheduler`: browser and virtual timer sources
//! - `game`: controller tying state, clock and fade-out together
//! - `bindings`: wasm-bindgen API for non-Yew hosts

pub mod bindings;
pub mod config;
pub mod game;
pub mod placement;
pub mod scheduler;
pub mod sequence;
pub mod state;

pub use config::{parse_count, ConfigError, GameConfig};
pub use game::{Game, Snapshot, TargetView};
pub use placement::{Canvas, Position, Target};
pub use scheduler::{BrowserScheduler, Scheduler, VirtualClock};
pub use state::{GameAction, GameState, GameStatus, Tone};

/// On-screen clock text, e.g. `Time: 3.4 s`.
pub fn format_clock(snapshot: &Snapshot) -> String {
    format!("Time: {} s", snapshot.elapsed_label)
}
