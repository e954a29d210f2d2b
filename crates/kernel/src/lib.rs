//! World Kernel: authoritative session state and the fixed-order tick loop.
//!
//! # Invariants
//! - All state mutations flow through explicit operations on [`World`].
//! - Evicting a tile removes every obstacle, collectible and portal it owns.
//! - The inventory never exceeds its capacity.
//! - A theme transition tears the old world down before generating the new one.

pub mod collision;
pub mod config;
pub mod events;
pub mod inventory;
pub mod observer;
pub mod portal;
pub mod registry;
pub mod snapshot;
pub mod tiles;
pub mod world;

pub use collision::{CollisionResolver, MoveResolution};
pub use config::{ConfigError, PlayerConfig, SessionConfig};
pub use events::{Notification, Placement, VisualCategory, WorldEvent};
pub use inventory::{INVENTORY_CAPACITY, Inventory, InventoryError};
pub use observer::Observer;
pub use portal::{Portal, PortalError, PortalRegistry};
pub use registry::{Obstacle, ObstacleRegistry};
pub use snapshot::HudSnapshot;
pub use tiles::{Collectible, Tile, WorldContent};
pub use world::World;

pub fn crate_info() -> &'static str {
    "liminal-kernel v0.1.0"
}
