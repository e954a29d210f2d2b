use glam::Vec3;
use liminal_common::ThemeId;
use rand::{Rng, RngCore};

use crate::contents::{ObstacleCategory, TileContents};
use crate::theme::{GenContext, PortalPolicy, ThemeGenerator, WALL_HEIGHT, WALL_THICKNESS};

const PILLAR_SPACING: f32 = 8.0;
const PILLAR_SIZE: Vec3 = Vec3::new(1.0, 8.0, 1.0);
const WALL_SEGMENT: f32 = 2.0;
/// A perimeter segment is built when a roll exceeds this, leaving ~60% gaps.
const WALL_ROLL: f32 = 0.6;

/// Level 0: a regular pillar grid with patchy perimeter walls.
pub struct Backrooms;

impl ThemeGenerator for Backrooms {
    fn theme(&self) -> ThemeId {
        ThemeId::Backrooms
    }

    fn layout(&self, ctx: &GenContext<'_>, rng: &mut dyn RngCore, out: &mut TileContents) {
        let size = ctx.room_size;

        let mut x = PILLAR_SPACING;
        while x < size - 1.0 {
            let mut z = PILLAR_SPACING;
            while z < size - 1.0 {
                let center = ctx.at(x, PILLAR_SIZE.y * 0.5, z);
                out.push_obstacle(ObstacleCategory::Pillar, center, PILLAR_SIZE);
                z += PILLAR_SPACING;
            }
            x += PILLAR_SPACING;
        }

        // Segments sit just inside the tile edge so neighbouring tiles never
        // share geometry.
        let y = WALL_HEIGHT * 0.5;
        let edge = WALL_THICKNESS * 0.5;
        let mut i = 0.0;
        while i < size {
            let len = WALL_SEGMENT.min(size - i);
            let mid = i + len * 0.5;
            let along_x = Vec3::new(len, WALL_HEIGHT, WALL_THICKNESS);
            let along_z = Vec3::new(WALL_THICKNESS, WALL_HEIGHT, len);
            for (center, extent) in [
                (ctx.at(mid, y, size - edge), along_x),
                (ctx.at(mid, y, edge), along_x),
                (ctx.at(size - edge, y, mid), along_z),
                (ctx.at(edge, y, mid), along_z),
            ] {
                if rng.random::<f32>() > WALL_ROLL {
                    out.push_obstacle(ObstacleCategory::Wall, center, extent);
                }
            }
            i += WALL_SEGMENT;
        }
    }

    fn portal_policy(&self) -> PortalPolicy {
        PortalPolicy {
            exit: Some((0.25, ThemeId::PoolRooms)),
            random_chance: 0.0,
        }
    }
}
