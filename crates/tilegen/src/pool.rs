use glam::Vec3;
use liminal_common::{Aabb, ThemeId};
use rand::{Rng, RngCore};

use crate::contents::{ObstacleCategory, PropKind, TileContents};
use crate::theme::{GenContext, PortalPolicy, ThemeGenerator};

const STAIR_CHANCE: f32 = 0.3;
const STAIR_STEPS: usize = 8;
const STEP_SIZE: Vec3 = Vec3::new(6.0, 0.5, 2.0);
const STEP_RISE: f32 = 0.5;
const STEP_RUN: f32 = 0.8;
/// Redraws before a staircase that would cover the spawn point is dropped.
const STAIR_ATTEMPTS: usize = 4;

/// Pool rooms: open walkable water, the odd decorative staircase that leads
/// nowhere.
pub struct PoolRooms;

impl ThemeGenerator for PoolRooms {
    fn theme(&self) -> ThemeId {
        ThemeId::PoolRooms
    }

    fn layout(&self, ctx: &GenContext<'_>, rng: &mut dyn RngCore, out: &mut TileContents) {
        let size = ctx.room_size;

        let deep_patches = if rng.random::<f32>() < 0.5 { 1 } else { 2 };
        for i in 0..deep_patches {
            let x = size * (0.2 + 0.5 * i as f32);
            let patch = Vec3::new(size * 0.4, 0.0, size * 0.3);
            out.push_prop(PropKind::DeepWater, ctx.at(x, -0.2, size * 0.3), patch);
        }

        if rng.random::<f32>() < STAIR_CHANCE {
            let run = STEP_RUN * (STAIR_STEPS - 1) as f32;
            for _ in 0..STAIR_ATTEMPTS {
                let stair_x = ctx.inset(rng, 5.0);
                let stair_z = rng.random::<f32>() * (size - 10.0 - run) + 5.0;
                let steps: Vec<Aabb> = (0..STAIR_STEPS)
                    .map(|step| {
                        let center = ctx.at(
                            stair_x,
                            step as f32 * STEP_RISE + STEP_RISE * 0.5,
                            stair_z + step as f32 * STEP_RUN,
                        );
                        Aabb::new(center, STEP_SIZE)
                    })
                    .collect();
                if steps.iter().all(|b| ctx.keeps_spawn_clear(b)) {
                    for b in steps {
                        out.push_obstacle(ObstacleCategory::StairStep, b.center, b.size);
                    }
                    break;
                }
            }
        }
    }

    fn portal_policy(&self) -> PortalPolicy {
        PortalPolicy {
            exit: Some((0.25, ThemeId::Backrooms)),
            random_chance: 0.15,
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

    #[test]
    fn stairs_are_contained_and_rise() {
        let catalog = ItemCatalog::builtin();
        let ctx = GenContext {
            coord: TileCoord::new(2, 2),
            theme: ThemeId::PoolRooms,
            room_size: 50.0,
            exploration_unlocked: false,
            walk_time: 0.0,
            portal_radius: 3.0,
            spawn: Vec3::new(25.0, 1.0, 25.0),
            spawn_clearance: 0.5,
            catalog: &catalog,
        };
        let lo = ctx.origin();
        let hi = lo + Vec3::new(50.0, 0.0, 50.0);
        let mut rng = StdRng::seed_from_u64(0);
        let mut with_stairs = 0;
        for _ in 0..200 {
            let mut out = TileContents::empty(ctx.coord, ctx.theme);
            PoolRooms.layout(&ctx, &mut rng, &mut out);
            let patches = out.props.iter().filter(|p| p.kind == PropKind::DeepWater).count();
            assert!(patches == 1 || patches == 2);
            if out.obstacles.is_empty() {
                continue;
            }
            with_stairs += 1;
            assert_eq!(out.obstacles.len(), STAIR_STEPS);
            for (i, o) in out.obstacles.iter().enumerate() {
                assert_eq!(o.category, ObstacleCategory::StairStep);
                assert!(o.bounds.footprint_within(lo, hi), "{o:?}");
                assert!((o.bounds.center.y - (0.25 + 0.5 * i as f32)).abs() < 1e-5);
            }
        }
        // 30% of 200 tiles, with generous slack.
        assert!((30..100).contains(&with_stairs), "stairs in {with_stairs} tiles");
    }

    #[test]
    fn stairs_never_cover_the_spawn_point() {
        let catalog = ItemCatalog::builtin();
        let ctx = GenContext {
            coord: TileCoord::new(0, 0),
            theme: ThemeId::PoolRooms,
            room_size: 50.0,
            exploration_unlocked: false,
            walk_time: 0.0,
            portal_radius: 3.0,
            spawn: Vec3::new(25.0, 1.0, 25.0),
            spawn_clearance: 0.5,
            catalog: &catalog,
        };
        let spawn = ctx.at(25.0, 1.0, 25.0);
        let mut with_stairs = 0;
        for seed in 0..2000 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut out = TileContents::empty(ctx.coord, ctx.theme);
            PoolRooms.layout(&ctx, &mut rng, &mut out);
            assert!(out.is_clear(spawn, 0.5), "seed {seed} blocks spawn");
            if !out.obstacles.is_empty() {
                assert_eq!(out.obstacles.len(), STAIR_STEPS);
                with_stairs += 1;
            }
        }
        // Redraws keep the staircase rate near 30%.
        assert!((450..750).contains(&with_stairs), "stairs in {with_stairs} tiles");
    }
}
