use liminal_common::{EntityId, TileCoord};
use liminal_kernel::{Placement, WorldEvent};
use std::collections::{BTreeMap, BTreeSet};

/// What the world needs from a renderer: place things, hide things, and drop
/// a tile's worth of things at once. Never read back.
pub trait SceneSink {
    fn add_object(&mut self, tile: TileCoord, placement: &Placement);
    fn hide_object(&mut self, id: EntityId);
    fn remove_tile(&mut self, tile: TileCoord);
}

/// Counts of scene operations issued by one [`SceneAdapter::apply`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyStats {
    pub added: usize,
    pub hidden: usize,
    pub tiles_removed: usize,
}

/// Translates drained world events into scene operations.
#[derive(Debug, Default)]
pub struct SceneAdapter;

impl SceneAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn apply<S: SceneSink + ?Sized>(&self, sink: &mut S, events: &[WorldEvent]) -> ApplyStats {
        let mut stats = ApplyStats::default();
        for event in events {
            match event {
                WorldEvent::TileLoaded {
                    coord, placements, ..
                } => {
                    for placement in placements {
                        sink.add_object(*coord, placement);
                    }
                    stats.added += placements.len();
                }
                WorldEvent::TileEvicted { coord } => {
                    sink.remove_tile(*coord);
                    stats.tiles_removed += 1;
                }
                WorldEvent::CollectibleCollected { id, .. } => {
                    sink.hide_object(*id);
                    stats.hidden += 1;
                }
                _ => {}
            }
        }
        if stats != ApplyStats::default() {
            tracing::trace!(?stats, "scene updated");
        }
        stats
    }
}

/// In-memory scene that records what a renderer would hold. Used by the CLI
/// and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingScene {
    tiles: BTreeMap<TileCoord, Vec<Placement>>,
    hidden: BTreeSet<EntityId>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn object_count(&self) -> usize {
        self.tiles.values().map(Vec::len).sum()
    }

    pub fn visible_count(&self) -> usize {
        self.tiles
            .values()
            .flatten()
            .filter(|p| !self.hidden.contains(&p.id))
            .count()
    }

    pub fn objects_in(&self, tile: TileCoord) -> &[Placement] {
        self.tiles.get(&tile).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_hidden(&self, id: EntityId) -> bool {
        self.hidden.contains(&id)
    }
}

impl SceneSink for RecordingScene {
    fn add_object(&mut self, tile: TileCoord, placement: &Placement) {
        self.tiles.entry(tile).or_default().push(*placement);
    }

    fn hide_object(&mut self, id: EntityId) {
        self.hidden.insert(id);
    }

    fn remove_tile(&mut self, tile: TileCoord) {
        if let Some(removed) = self.tiles.remove(&tile) {
            for placement in removed {
                self.hidden.remove(&placement.id);
            }
        }
    }
}
