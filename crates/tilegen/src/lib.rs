//! Tile generation: one pure function from (tile, theme, RNG stream) to a
//! description of that tile's contents.
//!
//! # Invariants
//! - Generation never touches state outside the returned [`TileContents`].
//! - Every obstacle footprint lies inside its tile.
//! - No portal is emitted before exploration is unlocked.
//! - All random draws for one tile happen inside one [`generate`] call.

mod backrooms;
mod contents;
mod dark_halls;
mod office;
mod placement;
mod pool;
mod theme;

pub use contents::{
    CollectibleSpec, Destination, ObstacleCategory, ObstacleSpec, PortalKind, PortalSpec, Prop,
    PropKind, TileContents,
};
pub use placement::{COLLECTIBLE_ATTEMPTS, PILLAR_CLEARANCE};
pub use theme::{GenContext, PortalPolicy, ThemeGenerator, generator_for};

use rand::RngCore;

/// Generate the contents of `ctx.coord` for `ctx.theme`.
pub fn generate<R: RngCore>(ctx: &GenContext<'_>, rng: &mut R) -> TileContents {
    let _span =
        tracing::debug_span!("generate_tile", coord = %ctx.coord, theme = ?ctx.theme).entered();
    let generator = generator_for(ctx.theme);
    let mut out = TileContents::empty(ctx.coord, ctx.theme);

    generator.surfaces(ctx, &mut out);
    generator.layout(ctx, rng, &mut out);
    if generator.spawns_collectibles() {
        placement::scatter_collectibles(ctx, rng, &mut out);
    }
    if ctx.exploration_unlocked {
        generator.portals(ctx, rng, &mut out);
    }

    debug_assert!(
        out.obstacles.iter().all(|o| {
            let lo = ctx.origin();
            let hi = lo + glam::Vec3::new(ctx.room_size, 0.0, ctx.room_size);
            o.bounds.footprint_within(lo, hi)
        }),
        "obstacle escaped tile {}",
        ctx.coord
    );
    tracing::trace!(
        obstacles = out.obstacles.len(),
        collectibles = out.collectibles.len(),
        portals = out.portals.len(),
        "tile generated"
    );
    out
}

pub fn crate_info() -> &'static str {
    "liminal-tilegen v0.1.0"
}
