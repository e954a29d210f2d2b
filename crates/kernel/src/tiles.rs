use glam::Vec3;
use liminal_assets::ItemId;
use liminal_common::{EntityId, ThemeId, TileCoord, Transform};
use liminal_tilegen::{Prop, TileContents};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::events::{Placement, VisualCategory};
use crate::portal::PortalRegistry;
use crate::registry::ObstacleRegistry;

const COLLECTIBLE_SIZE: Vec3 = Vec3::splat(0.5);
const PORTAL_SIZE: Vec3 = Vec3::new(2.0, 4.0, 0.2);

/// A resident tile and the handles it owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub coord: TileCoord,
    pub theme: ThemeId,
    pub props: Vec<Prop>,
    pub obstacles: Vec<EntityId>,
    pub collectibles: Vec<EntityId>,
    pub portals: Vec<EntityId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: EntityId,
    pub tile: TileCoord,
    pub item: ItemId,
    pub position: Vec3,
    /// Collected items stay registered, hidden, until their tile is evicted.
    pub collected: bool,
}

/// Everything currently resident: tiles plus the flat registries their
/// contents were registered into.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldContent {
    tiles: BTreeMap<TileCoord, Tile>,
    obstacles: ObstacleRegistry,
    collectibles: Vec<Collectible>,
    portals: PortalRegistry,
}

impl WorldContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly generated tile. Returns the renderable placements.
    ///
    /// Replaces nothing: the caller must evict a coordinate before inserting
    /// it again.
    pub fn insert_tile(&mut self, contents: TileContents) -> Vec<Placement> {
        let coord = contents.coord;
        debug_assert!(!self.tiles.contains_key(&coord), "tile {coord} inserted twice");

        let mut placements = Vec::with_capacity(
            contents.props.len()
                + contents.obstacles.len()
                + contents.collectibles.len()
                + contents.portals.len(),
        );
        let mut tile = Tile {
            coord,
            theme: contents.theme,
            props: contents.props,
            obstacles: Vec::with_capacity(contents.obstacles.len()),
            collectibles: Vec::with_capacity(contents.collectibles.len()),
            portals: Vec::with_capacity(contents.portals.len()),
        };

        for prop in &tile.props {
            placements.push(Placement {
                id: EntityId::new(),
                transform: prop.bounds.transform(),
                visual: VisualCategory::Prop(prop.kind),
            });
        }
        for spec in &contents.obstacles {
            let id = self.obstacles.insert(coord, spec);
            tile.obstacles.push(id);
            placements.push(Placement {
                id,
                transform: spec.bounds.transform(),
                visual: VisualCategory::Obstacle(spec.category),
            });
        }
        for spec in &contents.collectibles {
            let id = EntityId::new();
            self.collectibles.push(Collectible {
                id,
                tile: coord,
                item: spec.item,
                position: spec.position,
                collected: false,
            });
            tile.collectibles.push(id);
            placements.push(Placement {
                id,
                transform: Transform::sized(spec.position, COLLECTIBLE_SIZE),
                visual: VisualCategory::Collectible(spec.item),
            });
        }
        for spec in &contents.portals {
            let id = self.portals.insert(coord, spec);
            tile.portals.push(id);
            placements.push(Placement {
                id,
                transform: Transform::sized(spec.position, PORTAL_SIZE).with_yaw(spec.yaw),
                visual: VisualCategory::Portal(spec.kind),
            });
        }

        self.tiles.insert(coord, tile);
        placements
    }

    /// Drop a tile and every obstacle, collectible and portal tagged with it.
    /// Returns false when the tile was not resident.
    pub fn evict_tile(&mut self, coord: TileCoord) -> bool {
        let Some(tile) = self.tiles.remove(&coord) else {
            return false;
        };
        let obstacles = self.obstacles.remove_tile(coord);
        let before = self.collectibles.len();
        self.collectibles.retain(|c| c.tile != coord);
        let collectibles = before - self.collectibles.len();
        let portals = self.portals.remove_tile(coord);
        debug_assert_eq!(obstacles, tile.obstacles.len());
        debug_assert_eq!(collectibles, tile.collectibles.len());
        debug_assert_eq!(portals, tile.portals.len());
        true
    }

    pub fn tile(&self, coord: TileCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    pub fn tiles(&self) -> &BTreeMap<TileCoord, Tile> {
        &self.tiles
    }

    pub fn obstacles(&self) -> &ObstacleRegistry {
        &self.obstacles
    }

    pub fn portals(&self) -> &PortalRegistry {
        &self.portals
    }

    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    pub fn collectibles_mut(&mut self) -> &mut [Collectible] {
        &mut self.collectibles
    }

    pub fn collectible_count_for(&self, coord: TileCoord) -> usize {
        self.collectibles.iter().filter(|c| c.tile == coord).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liminal_tilegen::{
        CollectibleSpec, Destination, ObstacleCategory, PortalKind, PortalSpec, PropKind,
    };

    fn contents(coord: TileCoord) -> TileContents {
        let origin = coord.origin(50.0);
        let mut out = TileContents::empty(coord, ThemeId::Backrooms);
        out.push_prop(
            PropKind::Floor,
            origin + Vec3::new(25.0, 0.0, 25.0),
            Vec3::new(50.0, 0.0, 50.0),
        );
        for i in 0..3 {
            out.push_obstacle(
                ObstacleCategory::Pillar,
                origin + Vec3::new(8.0 * (i + 1) as f32, 4.0, 8.0),
                Vec3::new(1.0, 8.0, 1.0),
            );
        }
        out.collectibles.push(CollectibleSpec {
            item: ItemId(0),
            position: origin + Vec3::new(20.0, 1.0, 20.0),
        });
        out.portals.push(PortalSpec {
            kind: PortalKind::Door,
            destination: Destination::Fixed(ThemeId::PoolRooms),
            position: origin + Vec3::new(25.0, 3.5, 49.0),
            yaw: std::f32::consts::PI,
            activation_radius: 3.0,
        });
        out
    }

    #[test]
    fn insert_registers_everything_and_places_it() {
        let mut world = WorldContent::new();
        let coord = TileCoord::new(1, -1);
        let placements = world.insert_tile(contents(coord));
        assert_eq!(placements.len(), 1 + 3 + 1 + 1);
        assert_eq!(world.obstacles().count_for(coord), 3);
        assert_eq!(world.collectible_count_for(coord), 1);
        assert_eq!(world.portals().count_for(coord), 1);

        let tile = world.tile(coord).expect("resident");
        for id in &tile.obstacles {
            assert!(placements.iter().any(|p| p.id == *id));
        }
        let portal = placements
            .iter()
            .find(|p| matches!(p.visual, VisualCategory::Portal(_)))
            .expect("portal placed");
        assert_eq!(portal.transform.position, coord.origin(50.0) + Vec3::new(25.0, 3.5, 49.0));
    }

    #[test]
    fn evict_removes_every_tagged_entry() {
        let mut world = WorldContent::new();
        let keep = TileCoord::new(0, 0);
        let gone = TileCoord::new(0, 1);
        world.insert_tile(contents(keep));
        world.insert_tile(contents(gone));

        let (obs, col, por) = (
            world.obstacles().len(),
            world.collectibles().len(),
            world.portals().len(),
        );
        assert!(world.evict_tile(gone));
        assert_eq!(world.obstacles().len(), obs - 3);
        assert_eq!(world.collectibles().len(), col - 1);
        assert_eq!(world.portals().len(), por - 1);
        assert_eq!(world.obstacles().count_for(gone), 0);
        assert_eq!(world.collectible_count_for(gone), 0);
        assert_eq!(world.portals().count_for(gone), 0);
        assert!(world.tile(gone).is_none());
        assert_eq!(world.obstacles().count_for(keep), 3);

        assert!(!world.evict_tile(gone));
    }

    #[test]
    fn collected_items_stay_until_eviction() {
        let mut world = WorldContent::new();
        let coord = TileCoord::new(0, 0);
        world.insert_tile(contents(coord));
        world.collectibles_mut()[0].collected = true;
        assert_eq!(world.collectible_count_for(coord), 1);
        world.evict_tile(coord);
        assert!(world.collectibles().is_empty());
    }

    #[test]
    fn evicting_every_tile_empties_all_registries() {
        let mut world = WorldContent::new();
        world.insert_tile(contents(TileCoord::new(0, 0)));
        world.insert_tile(contents(TileCoord::new(3, 3)));
        assert!(world.evict_tile(TileCoord::new(0, 0)));
        assert!(world.evict_tile(TileCoord::new(3, 3)));
        assert!(world.tiles().is_empty());
        assert!(world.obstacles().is_empty());
        assert!(world.collectibles().is_empty());
        assert!(world.portals().is_empty());
    }
}
