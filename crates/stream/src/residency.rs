use liminal_common::TileCoord;
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::grid::window;

/// Streaming configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    /// Chebyshev radius (in tiles) around the viewer's tile that must be resident.
    pub render_radius: i32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { render_radius: 2 }
    }
}

/// Receives the tile lifecycle transitions decided by [`StreamState`].
///
/// `load` is called exactly once when a tile becomes resident and `unload`
/// exactly once when it stops being resident.
pub trait ResidencyHandler {
    fn load(&mut self, coord: TileCoord);
    fn unload(&mut self, coord: TileCoord);
}

/// Per-update streaming statistics for instrumentation.
#[derive(Debug, Clone, Default)]
pub struct StreamStats {
    pub tiles_loaded: usize,
    pub tiles_unloaded: usize,
    pub total_resident: usize,
    pub update_time: Duration,
}

/// Tracks which tiles are resident (absent → resident → absent).
#[derive(Debug, Clone, Default)]
pub struct StreamState {
    pub config: StreamConfig,
    resident: BTreeSet<TileCoord>,
    stats: StreamStats,
}

impl StreamState {
    pub fn new(config: StreamConfig) -> Self {
        Self {
            config,
            resident: BTreeSet::new(),
            stats: StreamStats::default(),
        }
    }

    /// Make the resident set exactly the render window around `viewer`.
    ///
    /// Tiles leaving the window are unloaded first, then new tiles are loaded
    /// in coordinate order. Returns the loaded and unloaded coordinates.
    pub fn ensure_resident<H: ResidencyHandler + ?Sized>(
        &mut self,
        viewer: TileCoord,
        handler: &mut H,
    ) -> (Vec<TileCoord>, Vec<TileCoord>) {
        let _span = tracing::debug_span!("stream_update", %viewer).entered();
        let started = Instant::now();

        let desired = window(viewer, self.config.render_radius);
        let to_unload: Vec<TileCoord> = self.resident.difference(&desired).copied().collect();
        let to_load: Vec<TileCoord> = desired.difference(&self.resident).copied().collect();

        for coord in &to_unload {
            tracing::debug!(%coord, "unloading tile");
            self.resident.remove(coord);
            handler.unload(*coord);
        }
        for coord in &to_load {
            tracing::debug!(%coord, "loading tile");
            self.resident.insert(*coord);
            handler.load(*coord);
        }

        self.stats = StreamStats {
            tiles_loaded: to_load.len(),
            tiles_unloaded: to_unload.len(),
            total_resident: self.resident.len(),
            update_time: started.elapsed(),
        };
        if !to_load.is_empty() || !to_unload.is_empty() {
            tracing::trace!(
                loaded = to_load.len(),
                unloaded = to_unload.len(),
                total = self.resident.len(),
                "stream update complete"
            );
        }

        (to_load, to_unload)
    }

    /// Unload every resident tile. Returns the coordinates that were dropped.
    pub fn reset<H: ResidencyHandler + ?Sized>(&mut self, handler: &mut H) -> Vec<TileCoord> {
        let dropped: Vec<TileCoord> = std::mem::take(&mut self.resident).into_iter().collect();
        for coord in &dropped {
            handler.unload(*coord);
        }
        tracing::debug!(tiles = dropped.len(), "stream reset");
        self.stats = StreamStats {
            tiles_unloaded: dropped.len(),
            ..StreamStats::default()
        };
        dropped
    }

    pub fn resident_tiles(&self) -> &BTreeSet<TileCoord> {
        &self.resident
    }

    pub fn is_resident(&self, coord: TileCoord) -> bool {
        self.resident.contains(&coord)
    }

    /// Statistics from the last update.
    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }
}
