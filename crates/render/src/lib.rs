//! Rendering Adapter: pushes world events to a scene and snapshots to a HUD.
//!
//! # Invariants
//! - Renderers cannot mutate world truth; they only consume events.
//! - Everything placed for a tile is removable with one call naming that tile.

mod hud;
mod scene;

pub use hud::{Presenter, TextHud};
pub use scene::{ApplyStats, RecordingScene, SceneAdapter, SceneSink};

pub fn crate_info() -> &'static str {
    "liminal-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
