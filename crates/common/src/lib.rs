//! Shared types for the liminal workspace.

mod types;

pub use types::{Aabb, EntityId, ThemeId, TileCoord, Transform};
