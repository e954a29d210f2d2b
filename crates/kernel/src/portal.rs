use glam::Vec3;
use liminal_common::{EntityId, ThemeId, TileCoord};
use liminal_tilegen::{Destination, PortalKind, PortalSpec};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PortalError {
    #[error("portal not found: {0}")]
    NotFound(EntityId),
}

/// A registered, interactable portal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    pub id: EntityId,
    pub tile: TileCoord,
    pub kind: PortalKind,
    pub destination: Destination,
    pub position: Vec3,
    pub yaw: f32,
    pub activation_radius: f32,
}

impl Portal {
    /// Prompt shown when this portal becomes the nearest one in reach.
    pub fn prompt(&self) -> &'static str {
        match self.kind {
            PortalKind::Door => "Press F to open the door",
            PortalKind::WaterDoor => "Press F to enter a random level through the water door",
            PortalKind::TeleportDoor => "Press F to teleport to a random level",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalRegistry {
    portals: Vec<Portal>,
}

impl PortalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tile: TileCoord, spec: &PortalSpec) -> EntityId {
        let id = EntityId::new();
        self.portals.push(Portal {
            id,
            tile,
            kind: spec.kind,
            destination: spec.destination,
            position: spec.position,
            yaw: spec.yaw,
            activation_radius: spec.activation_radius,
        });
        id
    }

    pub fn remove_tile(&mut self, tile: TileCoord) -> usize {
        let before = self.portals.len();
        self.portals.retain(|p| p.tile != tile);
        before - self.portals.len()
    }

    pub fn get(&self, id: EntityId) -> Result<&Portal, PortalError> {
        self.portals
            .iter()
            .find(|p| p.id == id)
            .ok_or(PortalError::NotFound(id))
    }

    /// Closest portal whose activation radius contains `position`.
    pub fn nearest_within(&self, position: Vec3) -> Option<&Portal> {
        self.portals
            .iter()
            .map(|p| (p, p.position.distance(position)))
            .filter(|(p, d)| *d < p.activation_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(p, _)| p)
    }

    pub fn count_for(&self, tile: TileCoord) -> usize {
        self.portals.iter().filter(|p| p.tile == tile).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Portal> {
        self.portals.iter()
    }

    pub fn len(&self) -> usize {
        self.portals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portals.is_empty()
    }
}

/// Pick the theme a portal leads to from `current`.
///
/// Random destinations draw uniformly from every theme except `current`.
pub fn resolve_destination<R: Rng + ?Sized>(
    destination: Destination,
    current: ThemeId,
    rng: &mut R,
) -> ThemeId {
    match destination {
        Destination::Fixed(theme) => theme,
        Destination::Random => {
            let choices: Vec<ThemeId> = current.others().collect();
            choices[rng.random_range(0..choices.len())]
        }
    }
}
