use liminal_assets::ItemId;
use liminal_common::{EntityId, ThemeId, TileCoord, Transform};
use liminal_tilegen::{ObstacleCategory, PortalKind, PropKind};
use serde::{Deserialize, Serialize};

/// How a placed object should look. Renderers map this to meshes and
/// materials; the world never reads it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualCategory {
    Obstacle(ObstacleCategory),
    Prop(PropKind),
    Collectible(ItemId),
    Portal(PortalKind),
}

/// One renderable object belonging to a tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub id: EntityId,
    pub transform: Transform,
    pub visual: VisualCategory,
}

/// An event record produced by every externally visible change to the world.
///
/// Collaborators (renderers, inspectors, logs) consume these by draining the
/// world's log after each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// Tile became resident with these objects.
    TileLoaded {
        coord: TileCoord,
        theme: ThemeId,
        placements: Vec<Placement>,
    },
    /// Tile left residency; everything tagged with it is gone.
    TileEvicted { coord: TileCoord },
    CollectibleCollected {
        id: EntityId,
        tile: TileCoord,
        item: ItemId,
    },
    ItemUsed { item: ItemId, consumed: bool },
    ItemDropped { item: ItemId },
    /// Walked time crossed the exploration threshold in this theme.
    ExplorationUnlocked { theme: ThemeId },
    ThemeChanged { from: ThemeId, to: ThemeId },
    LightingBoosted { until: f64 },
    LightingRestored,
    /// Simulation advanced one tick.
    Stepped { tick: u64 },
}

/// Short-lived message for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
    /// Session clock time at which the message disappears.
    pub expires_at: f64,
}
