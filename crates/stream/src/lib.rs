//! Streaming: tile grid indexing and the resident-tile window.
//!
//! # Invariants
//! - After every update the resident set equals the Chebyshev window of
//!   `render_radius` tiles around the viewer's tile.
//! - A tile is loaded once when it enters the window and unloaded once when
//!   it leaves; no tile is ever loaded twice without an unload in between.
//!
//! Tile contents are not owned here. [`StreamState`] decides the transitions
//! and hands them to a [`ResidencyHandler`] supplied by the world.

mod frame;
mod grid;
mod residency;

pub use frame::FrameTimer;
pub use grid::{TileGrid, window};
pub use residency::{ResidencyHandler, StreamConfig, StreamState, StreamStats};

pub fn crate_info() -> &'static str {
    "liminal-stream v0.1.0"
}
