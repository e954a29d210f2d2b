use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique handle for anything the world places: obstacles, collectibles, portals, props.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, for logs and debug output.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    /// Transform of a box of `size` centered at `position`.
    pub fn sized(position: Vec3, size: Vec3) -> Self {
        Self {
            position,
            scale: size,
            ..Self::default()
        }
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.rotation = Quat::from_rotation_y(yaw);
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// Integer coordinate of a square world tile (room) on the XZ plane.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct TileCoord {
    pub x: i32,
    pub z: i32,
}

impl TileCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chebyshev (king-move) distance in tiles.
    pub fn chebyshev(&self, other: TileCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// World-space corner with the smallest x and z.
    pub fn origin(&self, room_size: f32) -> Vec3 {
        Vec3::new(self.x as f32 * room_size, 0.0, self.z as f32 * room_size)
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Axis-aligned box given by its center and full extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec3,
    pub size: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.size * 0.5
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.size * 0.5
    }

    /// Horizontal overlap with a square footprint of half-width `radius` at `point`.
    ///
    /// Vertical extent is ignored. The comparison is strict, so touching edges
    /// do not overlap.
    pub fn overlaps_xz(&self, point: Vec3, radius: f32) -> bool {
        let dx = (point.x - self.center.x).abs();
        let dz = (point.z - self.center.z).abs();
        dx < self.size.x * 0.5 + radius && dz < self.size.z * 0.5 + radius
    }

    /// True when the XZ footprint lies inside `[lo, hi]` on both axes.
    pub fn footprint_within(&self, lo: Vec3, hi: Vec3) -> bool {
        let (min, max) = (self.min(), self.max());
        min.x >= lo.x && min.z >= lo.z && max.x <= hi.x && max.z <= hi.z
    }

    pub fn transform(&self) -> Transform {
        Transform::sized(self.center, self.size)
    }
}

/// The four environment variants a session can be in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum ThemeId {
    #[default]
    Backrooms,
    PoolRooms,
    Office,
    DarkHalls,
}

impl ThemeId {
    pub const ALL: [ThemeId; 4] = [
        ThemeId::Backrooms,
        ThemeId::PoolRooms,
        ThemeId::Office,
        ThemeId::DarkHalls,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ThemeId::Backrooms => "Backrooms Level 0",
            ThemeId::PoolRooms => "Pool Rooms",
            ThemeId::Office => "The Office",
            ThemeId::DarkHalls => "Dark Halls",
        }
    }

    /// Every theme except `self`, in declaration order.
    pub fn others(self) -> impl Iterator<Item = ThemeId> {
        Self::ALL.into_iter().filter(move |t| *t != self)
    }
}

impl std::fmt::Display for ThemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
