use liminal_common::{Aabb, EntityId, TileCoord};
use liminal_tilegen::{ObstacleCategory, ObstacleSpec};
use serde::{Deserialize, Serialize};

/// A registered collidable box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: EntityId,
    pub tile: TileCoord,
    pub category: ObstacleCategory,
    pub bounds: Aabb,
}

/// Flat list of every resident obstacle, each tagged with its owning tile.
///
/// Collision scans the whole list, so there is no spatial index here. The
/// resident window keeps the count small.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleRegistry {
    obstacles: Vec<Obstacle>,
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tile: TileCoord, spec: &ObstacleSpec) -> EntityId {
        let id = EntityId::new();
        self.obstacles.push(Obstacle {
            id,
            tile,
            category: spec.category,
            bounds: spec.bounds,
        });
        id
    }

    /// Remove every obstacle owned by `tile`. Returns how many were removed.
    pub fn remove_tile(&mut self, tile: TileCoord) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.tile != tile);
        before - self.obstacles.len()
    }

    pub fn count_for(&self, tile: TileCoord) -> usize {
        self.obstacles.iter().filter(|o| o.tile == tile).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
