use liminal_common::{ThemeId, TileCoord};
use liminal_kernel::World;

/// Read-only queries against a session, for logs and debugging.
pub struct WorldInspector;

impl WorldInspector {
    pub fn summary(world: &World) -> WorldSummary {
        let content = world.content();
        WorldSummary {
            tick: world.tick(),
            seed: world.seed(),
            theme: world.theme(),
            observer_tile: world.observer_tile(),
            resident_tiles: world.resident_tiles().len(),
            obstacles: content.obstacles().len(),
            collectibles: content.collectibles().iter().filter(|c| !c.collected).count(),
            portals: content.portals().len(),
            pending_events: world.events().len(),
        }
    }

    pub fn inspect_tile(world: &World, coord: TileCoord) -> Option<TileInfo> {
        let content = world.content();
        content.tile(coord).map(|tile| TileInfo {
            coord,
            theme: tile.theme,
            props: tile.props.len(),
            obstacles: tile.obstacles.len(),
            collectibles: tile.collectibles.len(),
            collected: content
                .collectibles()
                .iter()
                .filter(|c| c.tile == coord && c.collected)
                .count(),
            portals: tile.portals.len(),
        })
    }

    /// Resident tile coordinates in ascending order.
    pub fn list_tiles(world: &World) -> Vec<TileCoord> {
        world.content().tiles().keys().copied().collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorldSummary {
    pub tick: u64,
    pub seed: u64,
    pub theme: ThemeId,
    pub observer_tile: TileCoord,
    pub resident_tiles: usize,
    pub obstacles: usize,
    /// Uncollected only.
    pub collectibles: usize,
    pub portals: usize,
    pub pending_events: usize,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: tick={} seed={} theme={} at={} tiles={} obstacles={} collectibles={} portals={} pending_events={}",
            self.tick,
            self.seed,
            self.theme,
            self.observer_tile,
            self.resident_tiles,
            self.obstacles,
            self.collectibles,
            self.portals,
            self.pending_events
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileInfo {
    pub coord: TileCoord,
    pub theme: ThemeId,
    pub props: usize,
    pub obstacles: usize,
    pub collectibles: usize,
    pub collected: usize,
    pub portals: usize,
}

impl std::fmt::Display for TileInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tile {} [{}] props={} obstacles={} collectibles={} ({} collected) portals={}",
            self.coord,
            self.theme,
            self.props,
            self.obstacles,
            self.collectibles,
            self.collected,
            self.portals
        )
    }
}
