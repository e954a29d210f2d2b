//! Shared placement rules for collectibles and portals.

use rand::{Rng, RngCore};
use std::f32::consts::{FRAC_PI_2, PI};

use crate::contents::{CollectibleSpec, Destination, ObstacleCategory, PortalKind, TileContents};
use crate::theme::GenContext;

/// Placement attempts per tile.
pub const COLLECTIBLE_ATTEMPTS: usize = 5;
/// Minimum horizontal distance between a collectible and any pillar.
pub const PILLAR_CLEARANCE: f32 = 2.0;
pub const COLLECTIBLE_HEIGHT: f32 = 1.0;
/// A portal point must be this far outside every obstacle footprint.
pub const PORTAL_CLEARANCE: f32 = 0.5;
const FLOATING_DOOR_ATTEMPTS: usize = 8;

/// Weighted item draws at random spots, skipping spots too close to a pillar.
///
/// A rejected attempt is simply lost; the tile gets fewer collectibles.
pub(crate) fn scatter_collectibles(
    ctx: &GenContext<'_>,
    rng: &mut dyn RngCore,
    out: &mut TileContents,
) {
    for _ in 0..COLLECTIBLE_ATTEMPTS {
        let Some(item) = ctx.catalog.pick_weighted(rng) else {
            return;
        };
        let x = ctx.inset(rng, 2.0);
        let z = ctx.inset(rng, 2.0);
        let position = ctx.at(x, COLLECTIBLE_HEIGHT, z);

        let near_pillar = out.obstacles_of(ObstacleCategory::Pillar).any(|pillar| {
            let dx = position.x - pillar.bounds.center.x;
            let dz = position.z - pillar.bounds.center.z;
            (dx * dx + dz * dz).sqrt() < PILLAR_CLEARANCE
        });
        if near_pillar {
            tracing::trace!(coord = %ctx.coord, "collectible rejected near pillar");
            continue;
        }
        out.collectibles.push(CollectibleSpec { item, position });
    }
}

/// A door one unit inside the middle of a random wall. Other walls are tried
/// in turn if the first is blocked; with all four blocked no door spawns.
pub(crate) fn wall_door(
    ctx: &GenContext<'_>,
    rng: &mut dyn RngCore,
    out: &mut TileContents,
    destination: Destination,
) {
    let size = ctx.room_size;
    let half = size * 0.5;
    let sides = [
        (ctx.at(half, 3.5, size - 1.0), PI),
        (ctx.at(half, 3.5, 1.0), 0.0),
        (ctx.at(size - 1.0, 3.5, half), -FRAC_PI_2),
        (ctx.at(1.0, 3.5, half), FRAC_PI_2),
    ];
    let start = rng.random_range(0..sides.len());
    let free = (0..sides.len())
        .map(|i| sides[(start + i) % sides.len()])
        .find(|(position, _)| out.is_clear(*position, PORTAL_CLEARANCE));
    match free {
        Some((position, yaw)) => {
            let portal = ctx.portal(PortalKind::Door, destination, position, yaw);
            out.portals.push(portal);
        }
        None => tracing::debug!(coord = %ctx.coord, "no free wall for door"),
    }
}

/// A random-destination door somewhere on the open floor.
pub(crate) fn floating_door(ctx: &GenContext<'_>, rng: &mut dyn RngCore, out: &mut TileContents) {
    for _ in 0..FLOATING_DOOR_ATTEMPTS {
        let position = ctx.at(ctx.inset(rng, 5.0), 2.8, ctx.inset(rng, 5.0));
        if out.is_clear(position, PORTAL_CLEARANCE) {
            let portal = ctx.portal(PortalKind::WaterDoor, Destination::Random, position, 0.0);
            out.portals.push(portal);
            return;
        }
    }
    tracing::debug!(coord = %ctx.coord, "no free spot for water door");
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use liminal_assets::ItemCatalog;
    use liminal_common::{ThemeId, TileCoord};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ctx(catalog: &ItemCatalog) -> GenContext<'_> {
        GenContext {
            coord: TileCoord::new(1, -2),
            theme: ThemeId::Backrooms,
            room_size: 50.0,
            exploration_unlocked: true,
            walk_time: 40.0,
            portal_radius: 3.0,
            spawn: Vec3::new(25.0, 1.0, 25.0),
            spawn_clearance: 0.5,
            catalog,
        }
    }

    #[test]
    fn collectibles_stay_clear_of_pillars() {
        let catalog = ItemCatalog::builtin();
        let ctx = ctx(&catalog);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let mut out = TileContents::empty(ctx.coord, ctx.theme);
            // Dense pillar field so rejections actually happen.
            for i in 0..10 {
                for j in 0..10 {
                    let center = ctx.at(5.0 * i as f32 + 2.5, 4.0, 5.0 * j as f32 + 2.5);
                    out.push_obstacle(ObstacleCategory::Pillar, center, Vec3::new(1.0, 8.0, 1.0));
                }
            }
            scatter_collectibles(&ctx, &mut rng, &mut out);
            assert!(out.collectibles.len() <= COLLECTIBLE_ATTEMPTS);
            for c in &out.collectibles {
                for p in out.obstacles_of(ObstacleCategory::Pillar) {
                    let offset = (c.position - p.bounds.center) * Vec3::new(1.0, 0.0, 1.0);
                    assert!(offset.length() >= PILLAR_CLEARANCE, "{offset:?}");
                }
            }
        }
    }

    #[test]
    fn empty_tile_keeps_every_attempt() {
        let catalog = ItemCatalog::builtin();
        let ctx = ctx(&catalog);
        let mut rng = StdRng::seed_from_u64(9);
        let mut out = TileContents::empty(ctx.coord, ctx.theme);
        scatter_collectibles(&ctx, &mut rng, &mut out);
        assert_eq!(out.collectibles.len(), COLLECTIBLE_ATTEMPTS);
        let lo = ctx.origin();
        for c in &out.collectibles {
            assert!(c.position.x >= lo.x + 2.0 && c.position.x < lo.x + 48.0);
            assert!(c.position.z >= lo.z + 2.0 && c.position.z < lo.z + 48.0);
            assert_eq!(c.position.y, COLLECTIBLE_HEIGHT);
        }
    }

    #[test]
    fn wall_door_avoids_blocked_sides() {
        let catalog = ItemCatalog::builtin();
        let ctx = ctx(&catalog);
        let mut rng = StdRng::seed_from_u64(11);
        let mut out = TileContents::empty(ctx.coord, ctx.theme);
        // Block north, south and east door spots.
        for p in [ctx.at(25.0, 4.0, 49.0), ctx.at(25.0, 4.0, 1.0), ctx.at(49.0, 4.0, 25.0)] {
            out.push_obstacle(ObstacleCategory::Wall, p, Vec3::new(2.0, 8.0, 2.0));
        }
        wall_door(&ctx, &mut rng, &mut out, Destination::Fixed(ThemeId::PoolRooms));
        assert_eq!(out.portals.len(), 1);
        assert_eq!(out.portals[0].position, ctx.at(1.0, 3.5, 25.0));
        assert_eq!(out.portals[0].activation_radius, 3.0);
    }

    #[test]
    fn wall_door_skipped_when_all_sides_blocked() {
        let catalog = ItemCatalog::builtin();
        let ctx = ctx(&catalog);
        let mut rng = StdRng::seed_from_u64(11);
        let mut out = TileContents::empty(ctx.coord, ctx.theme);
        out.push_obstacle(
            ObstacleCategory::Structural,
            ctx.at(25.0, 4.0, 25.0),
            Vec3::new(50.0, 8.0, 50.0),
        );
        wall_door(&ctx, &mut rng, &mut out, Destination::Random);
        assert!(out.portals.is_empty());
    }
}
