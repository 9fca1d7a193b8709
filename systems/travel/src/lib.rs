#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tile-by-tile traversal of derived map paths.
//!
//! A [`Traveler`] binds itself to one concrete path at spawn time and then
//! only ever steps forward through it. Because the map's successor tables
//! already forbid backtracking, travel needs no pathfinding of its own.

use rand::seq::SliceRandom;
use rand::Rng;

use overgrowth_core::{Facing, TileCoord};
use overgrowth_map::Map;

/// Outcome of advancing a traveler by one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The traveler moved onto the given tile.
    Moved(TileCoord),
    /// The traveler already sits on the final tile of its path.
    Arrived,
}

/// A unit walking one of the map's derived paths.
#[derive(Clone, Debug)]
pub struct Traveler {
    tiles: Vec<TileCoord>,
    cursor: usize,
    facing: Facing,
}

impl Traveler {
    /// Spawns a traveler on a random spawner tile, bound to a random path
    /// through that tile in the requested direction.
    ///
    /// Returns `None` when the map has no spawners, or when the chosen
    /// spawner lies on no path of the requested facing. The latter happens on
    /// malformed maps that generated no paths at all.
    #[must_use]
    pub fn spawn<R: Rng>(map: &Map, facing: Facing, rng: &mut R) -> Option<Self> {
        let spawners = map.all_spawner_tiles();
        let spawner = spawners.choose(rng)?.coord();
        let path = map.path_starting_with(spawner.column(), spawner.row(), facing, rng)?;
        Some(Self {
            cursor: path.index_in_path(),
            tiles: path.tiles().to_vec(),
            facing,
        })
    }

    /// Tile the traveler currently occupies.
    #[must_use]
    pub fn position(&self) -> TileCoord {
        self.tiles[self.cursor]
    }

    /// Direction of travel the traveler was spawned with.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Tiles still ahead of the traveler, excluding its current position.
    #[must_use]
    pub fn remaining(&self) -> &[TileCoord] {
        &self.tiles[self.cursor + 1..]
    }

    /// Moves the traveler one tile forward along its path.
    pub fn advance(&mut self) -> Step {
        if self.cursor + 1 >= self.tiles.len() {
            return Step::Arrived;
        }
        self.cursor += 1;
        Step::Moved(self.tiles[self.cursor])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overgrowth_core::GridLayout;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn corridor() -> Map {
        Map::new(&GridLayout::new(5, vec![1; 5])).expect("corridor builds")
    }

    #[test]
    fn traveler_walks_corridor_end_to_end() {
        let map = corridor();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut traveler =
            Traveler::spawn(&map, Facing::Rightward, &mut rng).expect("corridor has a spawner");

        assert_eq!(traveler.position(), TileCoord::new(0, 0));
        assert_eq!(traveler.facing(), Facing::Rightward);
        assert_eq!(traveler.remaining().len(), 4);

        let mut moves = 0;
        while let Step::Moved(next) = traveler.advance() {
            moves += 1;
            assert_eq!(next, TileCoord::new(moves, 0));
        }
        assert_eq!(moves, 4);
        assert_eq!(traveler.position(), TileCoord::new(4, 0));
        assert_eq!(traveler.advance(), Step::Arrived);
    }

    #[test]
    fn leftward_traveler_spawned_at_left_edge_is_already_home() {
        // The corridor's only spawner sits at the far left; in the mirrored
        // half that tile is the destination.
        let map = corridor();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut traveler =
            Traveler::spawn(&map, Facing::Leftward, &mut rng).expect("mirror half has the tile");

        assert_eq!(traveler.position(), TileCoord::new(0, 0));
        assert_eq!(traveler.advance(), Step::Arrived);
    }

    #[test]
    fn spawn_fails_without_spawners() {
        let map = Map::new(&GridLayout::new(2, vec![0, 0])).expect("blocked grid builds");
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(Traveler::spawn(&map, Facing::Rightward, &mut rng).is_none());
    }

    #[test]
    fn fork_traveler_stays_on_one_branch() {
        //   0 1 0
        //   1 0 1
        //   0 1 0
        let map = Map::new(&GridLayout::new(3, vec![0, 1, 0, 1, 0, 1, 0, 1, 0]))
            .expect("diamond builds");
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut traveler =
            Traveler::spawn(&map, Facing::Rightward, &mut rng).expect("diamond has a spawner");

        let mut visited = vec![traveler.position()];
        while let Step::Moved(next) = traveler.advance() {
            visited.push(next);
        }

        let over = vec![TileCoord::new(0, 1), TileCoord::new(1, 0), TileCoord::new(2, 1)];
        let under = vec![TileCoord::new(0, 1), TileCoord::new(1, 2), TileCoord::new(2, 1)];
        assert!(visited == over || visited == under, "unexpected route {visited:?}");
    }
}
