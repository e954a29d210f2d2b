use glam::Vec3;
use liminal_assets::ItemId;
use liminal_common::{Aabb, ThemeId, TileCoord};
use serde::{Deserialize, Serialize};

/// What an obstacle is, for rendering and for placement rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleCategory {
    Wall,
    Pillar,
    Furniture,
    StairStep,
    Structural,
}

/// A collidable box emitted by a theme. Sized and centered exactly as it will
/// be registered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub category: ObstacleCategory,
    pub bounds: Aabb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropKind {
    Floor,
    Ceiling,
    DeepWater,
}

/// Non-colliding decoration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prop {
    pub kind: PropKind,
    pub bounds: Aabb,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollectibleSpec {
    pub item: ItemId,
    pub position: Vec3,
}

/// Where a portal leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    Fixed(ThemeId),
    /// Uniform over every theme except the one active at activation time.
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortalKind {
    /// Themed exit set into a wall.
    Door,
    /// Floating random-destination door in the pool rooms.
    WaterDoor,
    /// Long-distance random-destination door in the dark halls.
    TeleportDoor,
}

impl PortalKind {
    pub fn label(&self) -> &'static str {
        match self {
            PortalKind::Door => "door",
            PortalKind::WaterDoor => "water door",
            PortalKind::TeleportDoor => "teleport door",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortalSpec {
    pub kind: PortalKind,
    pub destination: Destination,
    pub position: Vec3,
    /// Facing, radians about +Y.
    pub yaw: f32,
    pub activation_radius: f32,
}

/// Everything generated for one tile. Pure data; the caller decides how to
/// register and render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileContents {
    pub coord: TileCoord,
    pub theme: ThemeId,
    pub props: Vec<Prop>,
    pub obstacles: Vec<ObstacleSpec>,
    pub collectibles: Vec<CollectibleSpec>,
    pub portals: Vec<PortalSpec>,
}

impl TileContents {
    pub fn empty(coord: TileCoord, theme: ThemeId) -> Self {
        Self {
            coord,
            theme,
            props: Vec::new(),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            portals: Vec::new(),
        }
    }

    pub fn push_obstacle(&mut self, category: ObstacleCategory, center: Vec3, size: Vec3) {
        self.obstacles.push(ObstacleSpec {
            category,
            bounds: Aabb::new(center, size),
        });
    }

    pub fn push_prop(&mut self, kind: PropKind, center: Vec3, size: Vec3) {
        self.props.push(Prop {
            kind,
            bounds: Aabb::new(center, size),
        });
    }

    pub fn obstacles_of(&self, category: ObstacleCategory) -> impl Iterator<Item = &ObstacleSpec> {
        self.obstacles.iter().filter(move |o| o.category == category)
    }

    /// True when no obstacle footprint comes within `clearance` of `point`.
    pub fn is_clear(&self, point: Vec3, clearance: f32) -> bool {
        !self
            .obstacles
            .iter()
            .any(|o| o.bounds.overlaps_xz(point, clearance))
    }
}
