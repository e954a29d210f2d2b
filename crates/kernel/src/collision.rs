use glam::Vec3;

use crate::registry::Obstacle;

/// Outcome of resolving one horizontal move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResolution {
    pub position: Vec3,
    pub blocked: bool,
}

/// 2.5D collision: obstacles are tested on X/Z only, against a square footprint
/// of half-width `radius` around the observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolver {
    pub radius: f32,
}

impl CollisionResolver {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// True when any obstacle overlaps the footprint at `candidate`.
    pub fn blocked<'a>(
        &self,
        obstacles: impl IntoIterator<Item = &'a Obstacle>,
        candidate: Vec3,
    ) -> bool {
        obstacles
            .into_iter()
            .any(|o| o.bounds.overlaps_xz(candidate, self.radius))
    }

    /// Apply `displacement` from `from`, or discard it whole when the
    /// destination is blocked. There is no sliding along walls.
    pub fn resolve<'a>(
        &self,
        obstacles: impl IntoIterator<Item = &'a Obstacle>,
        from: Vec3,
        displacement: Vec3,
    ) -> MoveResolution {
        if displacement == Vec3::ZERO {
            return MoveResolution {
                position: from,
                blocked: false,
            };
        }
        let candidate = from + displacement;
        if self.blocked(obstacles, candidate) {
            tracing::trace!(?from, ?candidate, "move blocked");
            MoveResolution {
                position: from,
                blocked: true,
            }
        } else {
            MoveResolution {
                position: candidate,
                blocked: false,
            }
        }
    }
}
