use glam::Vec3;
use liminal_common::ThemeId;
use rand::RngCore;

use crate::contents::{ObstacleCategory, TileContents};
use crate::theme::{GenContext, PortalPolicy, ThemeGenerator};

const DESK_SIZE: Vec3 = Vec3::new(8.0, 3.0, 4.0);
const DESKS: usize = 3;

/// The office: a row of desks across every room.
pub struct Office;

impl ThemeGenerator for Office {
    fn theme(&self) -> ThemeId {
        ThemeId::Office
    }

    fn layout(&self, ctx: &GenContext<'_>, _rng: &mut dyn RngCore, out: &mut TileContents) {
        let size = ctx.room_size;
        for i in 0..DESKS {
            let x = size * (0.2 + 0.3 * i as f32);
            let center = ctx.at(x, DESK_SIZE.y * 0.5, size * 0.4);
            out.push_obstacle(ObstacleCategory::Furniture, center, DESK_SIZE);
        }
    }

    fn portal_policy(&self) -> PortalPolicy {
        PortalPolicy {
            exit: Some((0.25, ThemeId::Backrooms)),
            random_chance: 0.0,
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
    fn three_desks_in_a_row() {
        let catalog = ItemCatalog::builtin();
        let ctx = GenContext {
            coord: TileCoord::new(0, 0),
            theme: ThemeId::Office,
            room_size: 50.0,
            exploration_unlocked: false,
            walk_time: 0.0,
            portal_radius: 3.0,
            spawn: Vec3::new(25.0, 1.0, 25.0),
            spawn_clearance: 0.5,
            catalog: &catalog,
        };
        let mut out = TileContents::empty(ctx.coord, ctx.theme);
        Office.layout(&ctx, &mut StdRng::seed_from_u64(0), &mut out);

        let xs: Vec<f32> = out.obstacles.iter().map(|o| o.bounds.center.x).collect();
        assert_eq!(out.obstacles.len(), 3);
        for (x, expected) in xs.iter().zip([10.0, 25.0, 40.0]) {
            assert!((x - expected).abs() < 1e-4);
        }
        assert!(out.obstacles.iter().all(|o| o.category == ObstacleCategory::Furniture));
        assert!(out.obstacles.iter().all(|o| (o.bounds.center.z - 20.0).abs() < 1e-4));
    }
}
