use glam::Vec3;
use liminal_common::ThemeId;
use liminal_tilegen::PortalKind;
use serde::{Deserialize, Serialize};

/// Read-only view of the session published once per tick for the
/// presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub tick: u64,
    pub theme: ThemeId,
    pub position: Vec3,
    pub health: f32,
    pub energy: f32,
    pub walk_time: f64,
    pub exploration_threshold: f64,
    pub exploration_unlocked: bool,
    /// Held item names, oldest first.
    pub inventory: Vec<String>,
    pub inventory_capacity: usize,
    pub lighting_boosted: bool,
    pub nearby_portal: Option<PortalKind>,
    /// Live notification texts, oldest first.
    pub notifications: Vec<String>,
}

impl HudSnapshot {
    /// Seconds of walking still needed before portals can appear.
    pub fn walk_remaining(&self) -> f64 {
        (self.exploration_threshold - self.walk_time).max(0.0)
    }

    /// Held items grouped by name, in order of first appearance.
    pub fn inventory_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for name in &self.inventory {
            match counts.iter_mut().find(|(n, _)| *n == name.as_str()) {
                Some((_, count)) => *count += 1,
                None => counts.push((name.as_str(), 1)),
            }
        }
        counts
    }
}
