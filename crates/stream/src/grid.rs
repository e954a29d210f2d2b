use glam::Vec3;
use liminal_common::TileCoord;
use std::collections::BTreeSet;

/// Fixed-size square tiling of the XZ plane.
///
/// Tile `(x, z)` covers `[x * room_size, (x + 1) * room_size)` on x and the
/// same on z. The Y axis plays no part in tiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGrid {
    room_size: f32,
}

impl TileGrid {
    /// Create a grid with the given tile edge length.
    pub fn new(room_size: f32) -> Self {
        assert!(room_size > 0.0, "room_size must be positive");
        Self { room_size }
    }

    /// Tile containing a world position.
    pub fn position_to_tile(&self, pos: Vec3) -> TileCoord {
        TileCoord {
            x: (pos.x / self.room_size).floor() as i32,
            z: (pos.z / self.room_size).floor() as i32,
        }
    }
}

/// Every tile within Chebyshev distance `radius` of `center`.
///
/// Ordered, so callers that generate in iteration order draw randomness in a
/// reproducible sequence. A negative radius yields the empty set.
pub fn window(center: TileCoord, radius: i32) -> BTreeSet<TileCoord> {
    let mut result = BTreeSet::new();
    for dx in -radius..=radius {
        for dz in -radius..=radius {
            result.insert(TileCoord::new(center.x + dx, center.z + dz));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_to_tile_basic() {
        let grid = TileGrid::new(50.0);
        assert_eq!(grid.position_to_tile(Vec3::new(25.0, 1.0, 25.0)), TileCoord::new(0, 0));
        assert_eq!(grid.position_to_tile(Vec3::new(60.0, 0.0, -5.0)), TileCoord::new(1, -1));
    }

    #[test]
    fn tile_edges_belong_to_the_upper_tile() {
        let grid = TileGrid::new(50.0);
        assert_eq!(grid.position_to_tile(Vec3::new(50.0, 0.0, 0.0)), TileCoord::new(1, 0));
        assert_eq!(grid.position_to_tile(Vec3::new(-0.001, 0.0, 0.0)), TileCoord::new(-1, 0));
    }

    #[test]
    fn window_is_the_chebyshev_square() {
        for radius in 0..5 {
            let center = TileCoord::new(3, -7);
            let tiles = window(center, radius);
            let side = (2 * radius + 1) as usize;
            assert_eq!(tiles.len(), side * side);
            assert!(tiles.iter().all(|t| t.chebyshev(center) <= radius));
            // Nothing just outside the square is included.
            for dx in -radius - 1..=radius + 1 {
                for dz in -radius - 1..=radius + 1 {
                    let t = TileCoord::new(center.x + dx, center.z + dz);
                    assert_eq!(tiles.contains(&t), t.chebyshev(center) <= radius);
                }
            }
        }
    }

    #[test]
    fn negative_radius_is_empty() {
        assert!(window(TileCoord::new(0, 0), -1).is_empty());
    }

    #[test]
    #[should_panic(expected = "room_size must be positive")]
    fn zero_room_size_panics() {
        TileGrid::new(0.0);
    }
}
