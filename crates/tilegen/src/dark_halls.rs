use glam::Vec3;
use liminal_common::ThemeId;
use rand::{Rng, RngCore};
use std::f32::consts::PI;

use crate::contents::{Destination, ObstacleCategory, PortalKind, PropKind, TileContents};
use crate::placement::PORTAL_CLEARANCE;
use crate::theme::{
    CEILING_HEIGHT, GenContext, PortalPolicy, ThemeGenerator, WALL_HEIGHT, WALL_THICKNESS,
};

pub const HALLWAY_WIDTH: f32 = 4.0;
/// Regular doors appear when whole walked seconds are a multiple of this.
pub const DOOR_INTERVAL_SECS: u64 = 5;
/// Walk time after which teleport doors may roll.
pub const LONG_RANGE_SECS: f64 = 30.0;
pub const TELEPORT_CHANCE: f32 = 0.25;
/// Doors hug the walls, this far in from the hallway centre line.
const DOOR_OFFSET: f32 = HALLWAY_WIDTH * 0.5 - 1.0;
const DOOR_ATTEMPTS: usize = 4;

/// Dark halls: a single narrow corridor along x; portals age off walked time
/// rather than per-tile dice alone.
pub struct DarkHalls;

impl DarkHalls {
    fn hallway_door(
        &self,
        ctx: &GenContext<'_>,
        rng: &mut dyn RngCore,
        out: &mut TileContents,
        kind: PortalKind,
        destination: Destination,
    ) {
        let half = ctx.room_size * 0.5;
        for _ in 0..DOOR_ATTEMPTS {
            let on_left = rng.random::<f32>() < 0.5;
            let x = ctx.inset(rng, 2.0);
            let z = if on_left { half - DOOR_OFFSET } else { half + DOOR_OFFSET };
            let position = ctx.at(x, 3.0, z);
            if out.is_clear(position, PORTAL_CLEARANCE) {
                let yaw = if on_left { PI } else { 0.0 };
                out.portals.push(ctx.portal(kind, destination, position, yaw));
                return;
            }
        }
    }
}

impl ThemeGenerator for DarkHalls {
    fn theme(&self) -> ThemeId {
        ThemeId::DarkHalls
    }

    fn surfaces(&self, ctx: &GenContext<'_>, out: &mut TileContents) {
        let half = ctx.room_size * 0.5;
        let size = Vec3::new(ctx.room_size, 0.0, HALLWAY_WIDTH);
        out.push_prop(PropKind::Floor, ctx.at(half, 0.0, half), size);
        out.push_prop(PropKind::Ceiling, ctx.at(half, CEILING_HEIGHT, half), size);
    }

    fn layout(&self, ctx: &GenContext<'_>, _rng: &mut dyn RngCore, out: &mut TileContents) {
        let half = ctx.room_size * 0.5;
        let size = Vec3::new(ctx.room_size, WALL_HEIGHT, WALL_THICKNESS);
        for side in [-1.0, 1.0] {
            let center = ctx.at(half, WALL_HEIGHT * 0.5, half + side * HALLWAY_WIDTH * 0.5);
            out.push_obstacle(ObstacleCategory::Structural, center, size);
        }
    }

    fn spawns_collectibles(&self) -> bool {
        false
    }

    fn portal_policy(&self) -> PortalPolicy {
        PortalPolicy {
            exit: None,
            random_chance: 0.0,
        }
    }

    fn portals(&self, ctx: &GenContext<'_>, rng: &mut dyn RngCore, out: &mut TileContents) {
        if ctx.walk_time <= 0.0 {
            return;
        }
        let whole_secs = ctx.walk_time.floor() as u64;
        if whole_secs % DOOR_INTERVAL_SECS == 0 {
            let exit = Destination::Fixed(ThemeId::Backrooms);
            self.hallway_door(ctx, rng, out, PortalKind::Door, exit);
        }
        if ctx.walk_time >= LONG_RANGE_SECS && rng.random::<f32>() < TELEPORT_CHANCE {
            self.hallway_door(ctx, rng, out, PortalKind::TeleportDoor, Destination::Random);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liminal_assets::ItemCatalog;
    use liminal_common::TileCoord;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ctx(catalog: &ItemCatalog, walk_time: f64) -> GenContext<'_> {
        GenContext {
            coord: TileCoord::new(0, 1),
            theme: ThemeId::DarkHalls,
            room_size: 50.0,
            exploration_unlocked: true,
            walk_time,
            portal_radius: 3.0,
            spawn: Vec3::new(25.0, 1.0, 25.0),
            spawn_clearance: 0.5,
            catalog,
        }
    }

    fn doors(ctx: &GenContext<'_>, rng: &mut StdRng) -> Vec<PortalKind> {
        let mut out = TileContents::empty(ctx.coord, ctx.theme);
        DarkHalls.layout(ctx, rng, &mut out);
        DarkHalls.portals(ctx, rng, &mut out);
        out.portals.iter().map(|p| p.kind).collect()
    }

    #[test]
    fn corridor_walls_frame_the_hallway() {
        let catalog = ItemCatalog::builtin();
        let ctx = ctx(&catalog, 0.0);
        let mut out = TileContents::empty(ctx.coord, ctx.theme);
        DarkHalls.surfaces(&ctx, &mut out);
        DarkHalls.layout(&ctx, &mut StdRng::seed_from_u64(0), &mut out);
        assert_eq!(out.obstacles.len(), 2);
        assert_eq!(out.props[0].bounds.size, Vec3::new(50.0, 0.0, HALLWAY_WIDTH));
        let spawn = ctx.at(25.0, 1.0, 25.0);
        assert!(out.is_clear(spawn, 0.5));
    }

    #[test]
    fn regular_doors_only_on_five_second_boundaries() {
        let catalog = ItemCatalog::builtin();
        let mut rng = StdRng::seed_from_u64(4);
        for t in [30.0, 30.9, 35.2, 40.0] {
            assert!(doors(&ctx(&catalog, t), &mut rng).contains(&PortalKind::Door), "t = {t}");
        }
        for t in [31.0, 33.5, 39.99] {
            assert!(!doors(&ctx(&catalog, t), &mut rng).contains(&PortalKind::Door), "t = {t}");
        }
    }

    #[test]
    fn teleport_doors_roll_after_thirty_seconds() {
        let catalog = ItemCatalog::builtin();
        let mut rng = StdRng::seed_from_u64(8);
        let early = ctx(&catalog, 29.0);
        let late = ctx(&catalog, 31.0);
        let mut late_hits = 0;
        for _ in 0..400 {
            assert!(!doors(&early, &mut rng).contains(&PortalKind::TeleportDoor));
            if doors(&late, &mut rng).contains(&PortalKind::TeleportDoor) {
                late_hits += 1;
            }
        }
        assert!((60..140).contains(&late_hits), "teleport doors: {late_hits}");
    }

    #[test]
    fn doors_sit_inside_the_walkable_hallway() {
        let catalog = ItemCatalog::builtin();
        let ctx = ctx(&catalog, 45.0);
        let mut rng = StdRng::seed_from_u64(1);
        let mut out = TileContents::empty(ctx.coord, ctx.theme);
        DarkHalls.layout(&ctx, &mut rng, &mut out);
        DarkHalls.portals(&ctx, &mut rng, &mut out);
        let center_z = ctx.at(0.0, 0.0, 25.0).z;
        for p in &out.portals {
            assert!((p.position.z - center_z).abs() <= DOOR_OFFSET + 1e-4);
            assert!(out.is_clear(p.position, PORTAL_CLEARANCE));
        }
    }
}
