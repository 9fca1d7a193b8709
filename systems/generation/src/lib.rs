#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Placement of resource generators on freshly built maps.
//!
//! Generators are scattered over walkable tiles, but never close to a
//! spawner: a generator inside a spawn area would be farmed the instant the
//! map opens. Placement draws without replacement, so no tile hosts two
//! generators.

use rand::Rng;

use overgrowth_core::TileCoord;
use overgrowth_map::Map;

/// Placement parameters.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    generator_count: usize,
    min_distance_from_spawner: f32,
}

impl Config {
    /// Creates a placement configuration.
    ///
    /// `min_distance_from_spawner` is a straight-line tile distance; every
    /// candidate tile must be at least that far from every spawner.
    #[must_use]
    pub const fn new(generator_count: usize, min_distance_from_spawner: f32) -> Self {
        Self {
            generator_count,
            min_distance_from_spawner,
        }
    }

    /// Number of generators to place.
    #[must_use]
    pub const fn generator_count(&self) -> usize {
        self.generator_count
    }

    /// Minimum straight-line distance from any spawner.
    #[must_use]
    pub const fn min_distance_from_spawner(&self) -> f32 {
        self.min_distance_from_spawner
    }
}

/// Picks generator tiles at random from the walkable tiles far enough from
/// every spawner.
///
/// When the map cannot host the requested count, placement stops early with a
/// warning and returns the tiles placed so far.
pub fn place_generators<R: Rng>(map: &Map, config: Config, rng: &mut R) -> Vec<TileCoord> {
    let spawners: Vec<TileCoord> = map
        .all_spawner_tiles()
        .iter()
        .map(|tile| tile.coord())
        .collect();

    let mut candidates: Vec<TileCoord> = map
        .all_walkable_tiles()
        .iter()
        .map(|tile| tile.coord())
        .filter(|candidate| {
            spawners.iter().all(|spawner| {
                spawner.euclidean_distance(*candidate) >= config.min_distance_from_spawner()
            })
        })
        .collect();

    let mut placed = Vec::with_capacity(config.generator_count());
    for _ in 0..config.generator_count() {
        if candidates.is_empty() {
            log::warn!(
                "ran out of generator sites after {} of {}; the map is too small or too close to its spawners",
                placed.len(),
                config.generator_count()
            );
            break;
        }
        let choice = rng.gen_range(0..candidates.len());
        placed.push(candidates.remove(choice));
    }
    placed
}
