mod algos;
mod constants;
mod types;

pub mod error;
pub mod layout;
pub mod templates;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{Level, event, span};

pub use algos::{DockBuilder, DockBuilderConfig, GridPathfinder, Pathfinder, RoomPool};
pub use error::{GeneratorError, Result, TemplateError};
pub use layout::DockLayout;
pub use types::{
    GenerationGrid, GenerationTile, PathfindType, Point, PointPair, Rect, Room, TileType,
};

/// Generates one layout with the default pathfinder. The same arguments
/// always produce the same layout.
pub fn create_layout(
    columns: u32,
    rows: u32,
    config: &DockBuilderConfig,
    pool: RoomPool,
    seed: u64,
) -> Result<DockLayout> {
    let span = span!(Level::DEBUG, "create_layout", seed);
    let _guard = span.enter();

    let builder = DockBuilder::new(columns, rows, *config)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    Ok(builder.build(pool, &mut rng, &GridPathfinder))
}

/// Like [`create_layout`], but retries with `seed + 1`, `seed + 2`, ... until
/// every room is reachable from the first one.
///
/// Fails with [`GeneratorError::Disconnected`] once `max_attempts` runs have
/// all left some room unreachable.
pub fn create_connected_layout(
    columns: u32,
    rows: u32,
    config: &DockBuilderConfig,
    pool: &RoomPool,
    seed: u64,
    max_attempts: u32,
) -> Result<DockLayout> {
    let span = span!(Level::DEBUG, "create_connected_layout", seed, max_attempts);
    let _guard = span.enter();

    let builder = DockBuilder::new(columns, rows, *config)?;
    let attempts = max_attempts.max(1);
    let mut unreachable = 0;

    for attempt in 0..attempts {
        let attempt_seed = seed.wrapping_add(attempt as u64);
        let mut rng = ChaCha8Rng::seed_from_u64(attempt_seed);

        let layout = builder.build(pool.clone(), &mut rng, &GridPathfinder);
        unreachable = layout.unreachable_rooms().len();

        if unreachable == 0 {
            event!(
                Level::DEBUG,
                "Connected layout found with seed {} after {} attempt/s",
                attempt_seed,
                attempt + 1
            );

            return Ok(layout);
        }

        event!(
            Level::DEBUG,
            "Seed {} left {} room/s unreachable, retrying",
            attempt_seed,
            unreachable
        );
    }

    Err(GeneratorError::Disconnected {
        attempts,
        unreachable,
    })
}
