use glam::Vec3;
use liminal_assets::ItemCatalog;
use liminal_common::{Aabb, ThemeId, TileCoord};
use rand::{Rng, RngCore};

use crate::contents::{Destination, PortalKind, PortalSpec, PropKind, TileContents};
use crate::placement;
use crate::{backrooms, dark_halls, office, pool};

/// Ceiling height shared by every theme.
pub const CEILING_HEIGHT: f32 = 8.0;
pub const WALL_HEIGHT: f32 = 8.0;
pub const WALL_THICKNESS: f32 = 0.5;

/// Inputs to one generation call.
#[derive(Debug, Clone, Copy)]
pub struct GenContext<'a> {
    pub coord: TileCoord,
    pub theme: ThemeId,
    pub room_size: f32,
    pub exploration_unlocked: bool,
    /// Seconds walked since the last theme transition.
    pub walk_time: f64,
    pub portal_radius: f32,
    /// World-space point the observer (re)spawns at.
    pub spawn: Vec3,
    /// Collision radius that must stay free around `spawn`.
    pub spawn_clearance: f32,
    pub catalog: &'a ItemCatalog,
}

impl GenContext<'_> {
    pub fn origin(&self) -> Vec3 {
        self.coord.origin(self.room_size)
    }

    /// Tile-local point to world space.
    pub fn at(&self, x: f32, y: f32, z: f32) -> Vec3 {
        self.origin() + Vec3::new(x, y, z)
    }

    /// Uniform tile-local coordinate in `[margin, room_size - margin)`.
    pub fn inset<R: RngCore + ?Sized>(&self, rng: &mut R, margin: f32) -> f32 {
        rng.random::<f32>() * (self.room_size - 2.0 * margin) + margin
    }

    /// False when a collidable box at `bounds` would trap an observer
    /// standing at the spawn point.
    pub fn keeps_spawn_clear(&self, bounds: &Aabb) -> bool {
        !bounds.overlaps_xz(self.spawn, self.spawn_clearance)
    }

    pub fn portal(
        &self,
        kind: PortalKind,
        destination: Destination,
        position: Vec3,
        yaw: f32,
    ) -> PortalSpec {
        PortalSpec {
            kind,
            destination,
            position,
            yaw,
            activation_radius: self.portal_radius,
        }
    }
}

/// Per-tile portal odds for themes that use plain dice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortalPolicy {
    /// Chance and target of a themed exit door.
    pub exit: Option<(f32, ThemeId)>,
    /// Chance of a floating random-destination door.
    pub random_chance: f32,
}

/// Generation rules of one theme.
///
/// Every method appends to `out`; nothing outside the tile is touched.
pub trait ThemeGenerator: Sync {
    fn theme(&self) -> ThemeId;

    /// Floor and ceiling. Defaults to full-tile planes.
    fn surfaces(&self, ctx: &GenContext<'_>, out: &mut TileContents) {
        let half = ctx.room_size * 0.5;
        let size = Vec3::new(ctx.room_size, 0.0, ctx.room_size);
        out.push_prop(PropKind::Floor, ctx.at(half, 0.0, half), size);
        out.push_prop(PropKind::Ceiling, ctx.at(half, CEILING_HEIGHT, half), size);
    }

    /// Collidable geometry and decorative props.
    fn layout(&self, ctx: &GenContext<'_>, rng: &mut dyn RngCore, out: &mut TileContents);

    fn spawns_collectibles(&self) -> bool {
        true
    }

    fn portal_policy(&self) -> PortalPolicy;

    /// Only called once exploration is unlocked.
    fn portals(&self, ctx: &GenContext<'_>, rng: &mut dyn RngCore, out: &mut TileContents) {
        let policy = self.portal_policy();
        if let Some((chance, target)) = policy.exit {
            if rng.random::<f32>() < chance {
                placement::wall_door(ctx, rng, out, Destination::Fixed(target));
            }
        }
        if policy.random_chance > 0.0 && rng.random::<f32>() < policy.random_chance {
            placement::floating_door(ctx, rng, out);
        }
    }
}

/// Single dispatch point from a theme tag to its rules.
pub fn generator_for(theme: ThemeId) -> &'static dyn ThemeGenerator {
    match theme {
        ThemeId::Backrooms => &backrooms::Backrooms,
        ThemeId::PoolRooms => &pool::PoolRooms,
        ThemeId::Office => &office::Office,
        ThemeId::DarkHalls => &dark_halls::DarkHalls,
    }
}
