//! Developer Tooling: read-only world inspection.
//!
//! # Invariants
//! - Tools never mutate the world.

mod inspector;

pub use inspector::{TileInfo, WorldInspector, WorldSummary};

pub fn crate_info() -> &'static str {
    "liminal-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
