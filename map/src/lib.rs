#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tile grid ownership and one-shot traversal-path derivation.
//!
//! A [`Map`] is built once from a [`GridLayout`] and immediately derives the
//! complete set of non-redundant left-to-right paths (plus their right-to-left
//! mirrors) that units can follow without ever needing to look behind
//! themselves. The pipeline runs start to finish inside the constructor:
//! adjacency, endpoint classification, left-list construction and pruning,
//! exhaustive fork-snapshot enumeration, geometric optimization and
//! deduplication. After construction the grid and path set are read-only;
//! only fog of war and spawner flags may change at runtime.

use std::fmt::Write as _;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use overgrowth_core::{Facing, GridLayout, MapDiagnostic, TileCoord};

mod adjacency;
mod endpoints;
mod enumerate;
mod left_list;
mod optimize;

use adjacency::GridView;
use left_list::LeftLists;

/// Fog is lifted this many tiles around each spawner when the map opens.
const SPAWNER_FOG_RADIUS: u32 = 3;

/// A single grid cell: its arena position, coordinate, walkability and the
/// role flags assigned during path computation.
#[derive(Clone, Debug)]
pub struct Tile {
    index: usize,
    coord: TileCoord,
    walkable: bool,
    left_endpoint: bool,
    right_endpoint: bool,
    spawner: bool,
}

impl Tile {
    pub(crate) const fn new(index: usize, coord: TileCoord, walkable: bool) -> Self {
        Self {
            index,
            coord,
            walkable,
            left_endpoint: false,
            right_endpoint: false,
            spawner: false,
        }
    }

    /// Row-major arena index of the tile.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Grid coordinate of the tile.
    #[must_use]
    pub const fn coord(&self) -> TileCoord {
        self.coord
    }

    /// Whether units may occupy the tile.
    #[must_use]
    pub const fn is_walkable(&self) -> bool {
        self.walkable
    }

    /// Whether left-to-right paths start at the tile.
    #[must_use]
    pub const fn is_left_endpoint(&self) -> bool {
        self.left_endpoint
    }

    /// Whether left-to-right paths end at the tile.
    #[must_use]
    pub const fn is_right_endpoint(&self) -> bool {
        self.right_endpoint
    }

    /// Whether the tile currently spawns units.
    #[must_use]
    pub const fn is_spawner_point(&self) -> bool {
        self.spawner
    }
}

/// Errors rejecting a malformed [`GridLayout`] before any computation runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MapError {
    /// The layout declared zero columns.
    #[error("grid width must be non-zero")]
    ZeroWidth,
    /// The marker count does not divide evenly into rows.
    #[error("marker count {len} is not a multiple of the grid width {width}")]
    LengthNotMultipleOfWidth {
        /// Number of markers supplied.
        len: usize,
        /// Declared row length.
        width: u32,
    },
}

/// A path selected through a queried tile, together with where in the path
/// that tile sits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathThroughTile {
    tiles: Vec<TileCoord>,
    index_in_path: usize,
}

impl PathThroughTile {
    /// Tile coordinates of the chosen path, in travel order.
    #[must_use]
    pub fn tiles(&self) -> &[TileCoord] {
        &self.tiles
    }

    /// Position of the queried tile within [`Self::tiles`].
    #[must_use]
    pub const fn index_in_path(&self) -> usize {
        self.index_in_path
    }
}

/// Owns the tile grid, the fog array and the derived path set.
#[derive(Clone, Debug)]
pub struct Map {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
    fog: Vec<bool>,
    left_lists: LeftLists,
    paths: Vec<Vec<usize>>,
    diagnostics: Vec<MapDiagnostic>,
}

impl Map {
    /// Builds a map from the layout and derives its traversal paths.
    ///
    /// Only structurally invalid input is rejected here. Algorithmic trouble
    /// (conflicting endpoints, orphan tiles, an empty path set) is reported
    /// through [`Self::diagnostics`], and callers decide whether the map is
    /// usable.
    pub fn new(layout: &GridLayout) -> Result<Self, MapError> {
        if layout.columns() == 0 {
            return Err(MapError::ZeroWidth);
        }
        if layout.markers().len() % layout.columns() as usize != 0 {
            return Err(MapError::LengthNotMultipleOfWidth {
                len: layout.markers().len(),
                width: layout.columns(),
            });
        }

        let columns = layout.columns();
        let rows = (layout.markers().len() / columns as usize) as u32;
        let tiles = layout
            .markers()
            .iter()
            .enumerate()
            .map(|(index, &marker)| {
                let coord = TileCoord::new(index as u32 % columns, index as u32 / columns);
                Tile::new(index, coord, marker != 0)
            })
            .collect::<Vec<_>>();
        let fog = vec![true; tiles.len()];

        let mut map = Self {
            columns,
            rows,
            tiles,
            fog,
            left_lists: Vec::new(),
            paths: Vec::new(),
            diagnostics: Vec::new(),
        };
        map.compute_paths();
        map.convert_left_endpoints_to_spawners();

        let spawners: Vec<TileCoord> = map
            .all_spawner_tiles()
            .iter()
            .map(|tile| tile.coord())
            .collect();
        for spawner in spawners {
            map.set_fog(
                spawner.column(),
                spawner.row(),
                SPAWNER_FOG_RADIUS,
                false,
                false,
            );
        }

        Ok(map)
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// The full tile arena in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The tile at the given arena index, if it exists.
    #[must_use]
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Every derived path as a tile-index sequence. The first half travels
    /// left-to-right; the second half holds the exact mirrors, so path `i` and
    /// path `i + count / 2` reverse each other.
    #[must_use]
    pub fn paths(&self) -> &[Vec<usize>] {
        &self.paths
    }

    /// Number of left-to-right paths (half the total).
    #[must_use]
    pub fn left_to_right_count(&self) -> usize {
        self.paths.len() / 2
    }

    /// Diagnostics recorded while deriving the paths, in emission order.
    #[must_use]
    pub fn diagnostics(&self) -> &[MapDiagnostic] {
        &self.diagnostics
    }

    /// Legal next steps out of `index` for a unit that arrived from
    /// `predecessor`, per the pruned left-list. A left-endpoint keys its entry
    /// by itself.
    #[must_use]
    pub fn successors_from(&self, index: usize, predecessor: usize) -> Option<&[usize]> {
        self.left_lists
            .get(index)?
            .get(&predecessor)
            .map(Vec::as_slice)
    }

    fn index_of(&self, column: u32, row: u32) -> Option<usize> {
        if column < self.columns && row < self.rows {
            Some(row as usize * self.columns as usize + column as usize)
        } else {
            None
        }
    }

    // ------------------------------------------------------------------
    // Path derivation
    // ------------------------------------------------------------------

    fn compute_paths(&mut self) {
        let left_endpoints = self.classify_endpoints();

        let lists = {
            let view = GridView::new(self.columns, self.rows, &self.tiles);
            let mut lists = left_list::build(&view);
            left_list::prune(&view, &mut lists);
            lists
        };

        let mut paths: Vec<Vec<usize>> = Vec::new();
        {
            let view = GridView::new(self.columns, self.rows, &self.tiles);
            for &start in &left_endpoints {
                let mut found = enumerate::paths_from(&lists, view.tiles(), start);
                optimize::optimize(&view, &mut found, &mut self.diagnostics);
                optimize::dedup(&mut found);
                paths.append(&mut found);
            }
        }

        let mirrored: Vec<Vec<usize>> = paths
            .iter()
            .map(|path| path.iter().rev().copied().collect())
            .collect();
        paths.extend(mirrored);

        if paths.is_empty() {
            log::error!("no paths generated; the map cannot support unit traversal");
            self.diagnostics.push(MapDiagnostic::NoPathsGenerated);
        }

        self.left_lists = lists;
        self.paths = paths;
        self.flag_orphan_tiles();
    }

    /// Flags every walkable tile as a left and/or right endpoint, returning
    /// the left-endpoints in ascending index order. A tile claiming both roles
    /// is reported and keeps both flags; the grid itself is malformed.
    fn classify_endpoints(&mut self) -> Vec<usize> {
        let tile_count = self.tiles.len();
        let mut left_flags = vec![false; tile_count];
        let mut right_flags = vec![false; tile_count];
        let mut left_endpoints = Vec::new();

        {
            let view = GridView::new(self.columns, self.rows, &self.tiles);
            for tile in &self.tiles {
                if !tile.is_walkable() {
                    continue;
                }
                let index = tile.index();
                right_flags[index] = endpoints::is_endpoint(&view, index, false);
                left_flags[index] = endpoints::is_endpoint(&view, index, true);
                if left_flags[index] {
                    left_endpoints.push(index);
                }
                if left_flags[index] && right_flags[index] {
                    let coord = tile.coord();
                    log::warn!(
                        "tile ({}, {}) classified as both a left and right endpoint; the grid is malformed",
                        coord.column(),
                        coord.row()
                    );
                    self.diagnostics
                        .push(MapDiagnostic::ConflictingEndpoints { tile: coord });
                }
            }
        }

        for tile in &mut self.tiles {
            tile.left_endpoint = left_flags[tile.index];
            tile.right_endpoint = right_flags[tile.index];
        }

        left_endpoints
    }

    fn flag_orphan_tiles(&mut self) {
        for index in 0..self.tiles.len() {
            if !self.tiles[index].is_walkable() {
                continue;
            }
            if self.paths.iter().any(|path| path.contains(&index)) {
                continue;
            }
            let coord = self.tiles[index].coord();
            log::warn!(
                "walkable tile ({}, {}) appears in no path; anything spawning there may be unreachable",
                coord.column(),
                coord.row()
            );
            self.diagnostics
                .push(MapDiagnostic::OrphanTile { tile: coord });
        }
    }

    fn convert_left_endpoints_to_spawners(&mut self) {
        for tile in &mut self.tiles {
            if tile.left_endpoint {
                tile.spawner = true;
            }
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Uniformly picks one of the paths containing tile `(column, row)` in
    /// the requested directional half, along with the tile's position inside
    /// the chosen path.
    ///
    /// Only paths in the stored set qualify. A tile mid-path may well lie on
    /// routes that would exist had it been an endpoint, but those were never
    /// enumerated and cannot be chosen.
    #[must_use]
    pub fn path_starting_with<R: Rng>(
        &self,
        column: u32,
        row: u32,
        facing: Facing,
        rng: &mut R,
    ) -> Option<PathThroughTile> {
        let target = self.index_of(column, row)?;
        let half = self.paths.len() / 2;
        let range = match facing {
            Facing::Rightward => 0..half,
            Facing::Leftward => half..self.paths.len(),
        };

        let mut candidates: Vec<(usize, usize)> = Vec::new();
        for path_index in range {
            for (offset, &tile_index) in self.paths[path_index].iter().enumerate() {
                if tile_index == target {
                    candidates.push((path_index, offset));
                }
            }
        }

        let &(path_index, index_in_path) = candidates.choose(rng)?;
        let tiles = self.paths[path_index]
            .iter()
            .map(|&tile_index| self.tiles[tile_index].coord())
            .collect();
        Some(PathThroughTile {
            tiles,
            index_in_path,
        })
    }

    /// Picks a random walkable tile.
    ///
    /// With `even_distribution` every walkable tile is equally likely.
    /// Without it, a random path is drawn first and then a tile within it, so
    /// tiles shared by many paths come up more often.
    #[must_use]
    pub fn random_walkable_tile<R: Rng>(
        &self,
        even_distribution: bool,
        rng: &mut R,
    ) -> Option<TileCoord> {
        if even_distribution {
            let walkable = self.all_walkable_tiles();
            return walkable.choose(rng).map(|tile| tile.coord());
        }
        let path = self.paths.choose(rng)?;
        let &tile_index = path.as_slice().choose(rng)?;
        Some(self.tiles[tile_index].coord())
    }

    /// Every walkable tile on the map.
    #[must_use]
    pub fn all_walkable_tiles(&self) -> Vec<&Tile> {
        self.tiles.iter().filter(|tile| tile.is_walkable()).collect()
    }

    /// Every spawner tile on the map.
    #[must_use]
    pub fn all_spawner_tiles(&self) -> Vec<&Tile> {
        self.tiles
            .iter()
            .filter(|tile| tile.is_spawner_point())
            .collect()
    }

    /// Whether `(column, row)` is a spawner tile. Out-of-bounds coordinates
    /// are not.
    #[must_use]
    pub fn is_spawner_point(&self, column: u32, row: u32) -> bool {
        self.index_of(column, row)
            .map_or(false, |index| self.tiles[index].is_spawner_point())
    }

    /// Attempts to flag `(column, row)` as a new spawner.
    ///
    /// The tile must be walkable, free of fog, not already a spawner, and
    /// within `max_distance` (straight-line) of an existing spawner:
    /// otherwise a spawner could be dropped right next to the far side of the
    /// map. Returns whether the flag was set; nothing mutates on failure.
    pub fn attempt_to_create_spawner(
        &mut self,
        column: u32,
        row: u32,
        max_distance: f32,
    ) -> bool {
        let Some(index) = self.index_of(column, row) else {
            return false;
        };
        if self.tiles[index].is_spawner_point() || !self.tiles[index].is_walkable() {
            return false;
        }
        if self.fog[index] {
            return false;
        }

        let target = self.tiles[index].coord();
        let close_enough = self
            .all_spawner_tiles()
            .iter()
            .any(|spawner| spawner.coord().euclidean_distance(target) <= max_distance);
        if !close_enough {
            return false;
        }

        self.tiles[index].spawner = true;
        true
    }

    // ------------------------------------------------------------------
    // Fog of war
    // ------------------------------------------------------------------

    /// Whether fog currently covers `(column, row)`. Out-of-bounds
    /// coordinates report as fogged.
    #[must_use]
    pub fn is_fogged(&self, column: u32, row: u32) -> bool {
        self.index_of(column, row)
            .map_or(true, |index| self.fog[index])
    }

    /// Sets or clears fog around `(column, row)`.
    ///
    /// `circular` restricts the affected square to a Manhattan diamond. The
    /// radius is capped at twice the larger grid dimension.
    pub fn set_fog(&mut self, column: u32, row: u32, radius: u32, foggy: bool, circular: bool) {
        let radius = i64::from(radius.min(self.columns.max(self.rows) * 2));
        let centre_column = i64::from(column);
        let centre_row = i64::from(row);

        for candidate_column in centre_column - radius..=centre_column + radius {
            for candidate_row in centre_row - radius..=centre_row + radius {
                if candidate_column < 0
                    || candidate_row < 0
                    || candidate_column >= i64::from(self.columns)
                    || candidate_row >= i64::from(self.rows)
                {
                    continue;
                }
                if circular
                    && (centre_column - candidate_column).abs()
                        + (centre_row - candidate_row).abs()
                        > radius
                {
                    continue;
                }
                let index =
                    candidate_row as usize * self.columns as usize + candidate_column as usize;
                self.fog[index] = foggy;
            }
        }
    }

    /// Clears every fog tile at once.
    pub fn clear_all_fog(&mut self) {
        self.fog.fill(false);
    }

    // ------------------------------------------------------------------
    // Debugging
    // ------------------------------------------------------------------

    /// Renders the path set as one `(column, row)` sequence per line, in the
    /// same order the paths are stored.
    #[must_use]
    pub fn describe_paths(&self, only_left_to_right: bool) -> String {
        let limit = if only_left_to_right {
            self.paths.len() / 2
        } else {
            self.paths.len()
        };

        let mut out = String::new();
        for (number, path) in self.paths.iter().take(limit).enumerate() {
            let _ = write!(out, "Path #{number}:");
            for &index in path {
                let coord = self.tiles[index].coord();
                let _ = write!(out, " ({}, {})", coord.column(), coord.row());
            }
            out.push('\n');
        }
        out
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use overgrowth_core::{GridLayout, MapDiagnostic};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn corridor() -> Map {
        Map::new(&GridLayout::new(5, vec![1; 5])).expect("corridor builds")
    }

    #[test]
    fn rejects_zero_width_layout() {
        assert_eq!(
            Map::new(&GridLayout::new(0, vec![1])).unwrap_err(),
            MapError::ZeroWidth
        );
    }

    #[test]
    fn rejects_ragged_layout() {
        assert_eq!(
            Map::new(&GridLayout::new(3, vec![1; 7])).unwrap_err(),
            MapError::LengthNotMultipleOfWidth { len: 7, width: 3 }
        );
    }

    #[test]
    fn corridor_produces_one_path_each_way() {
        let map = corridor();
        assert_eq!(
            map.paths(),
            &[vec![0, 1, 2, 3, 4], vec![4, 3, 2, 1, 0]]
        );
        assert!(map.diagnostics().is_empty());
    }

    #[test]
    fn left_endpoints_become_spawners() {
        let map = corridor();
        assert!(map.is_spawner_point(0, 0));
        assert!(!map.is_spawner_point(4, 0));
        assert_eq!(map.all_spawner_tiles().len(), 1);
    }

    #[test]
    fn fog_lifts_around_spawners_only() {
        let map = corridor();
        // Spawner at column 0, radius 3: columns 0..=3 clear, column 4 stays.
        assert!(!map.is_fogged(0, 0));
        assert!(!map.is_fogged(3, 0));
        assert!(map.is_fogged(4, 0));
    }

    #[test]
    fn isolated_tile_reports_conflicting_endpoints() {
        let map = Map::new(&GridLayout::new(1, vec![1])).expect("single tile builds");
        assert_eq!(
            map.diagnostics(),
            &[MapDiagnostic::ConflictingEndpoints {
                tile: TileCoord::new(0, 0)
            }]
        );
        // Both classifications stick and the tile still carries its paths.
        assert_eq!(map.paths(), &[vec![0], vec![0]]);
    }

    #[test]
    fn all_blocked_grid_reports_no_paths() {
        let map = Map::new(&GridLayout::new(2, vec![0, 0])).expect("blocked grid builds");
        assert_eq!(map.diagnostics(), &[MapDiagnostic::NoPathsGenerated]);
        assert_eq!(map.left_to_right_count(), 0);
    }

    #[test]
    fn appendage_tile_reports_as_orphan() {
        // The hanging tile under the corridor is pruned out of every path.
        //
        //   1 1 1
        //   0 1 0
        let map = Map::new(&GridLayout::new(3, vec![1, 1, 1, 0, 1, 0])).expect("map builds");
        assert_eq!(map.paths()[0], vec![0, 1, 2]);
        assert!(map
            .diagnostics()
            .contains(&MapDiagnostic::OrphanTile {
                tile: TileCoord::new(1, 1)
            }));
    }

    #[test]
    fn path_starting_with_respects_facing_and_index() {
        let map = corridor();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let rightward = map
            .path_starting_with(2, 0, Facing::Rightward, &mut rng)
            .expect("tile lies on the corridor");
        assert_eq!(rightward.tiles()[rightward.index_in_path()], TileCoord::new(2, 0));
        assert_eq!(rightward.tiles().first(), Some(&TileCoord::new(0, 0)));

        let leftward = map
            .path_starting_with(2, 0, Facing::Leftward, &mut rng)
            .expect("mirror half contains the tile");
        assert_eq!(leftward.tiles().first(), Some(&TileCoord::new(4, 0)));
        assert_eq!(leftward.tiles()[leftward.index_in_path()], TileCoord::new(2, 0));
    }

    #[test]
    fn path_starting_with_misses_off_path_tiles() {
        let map = corridor();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(map
            .path_starting_with(0, 3, Facing::Rightward, &mut rng)
            .is_none());
    }

    #[test]
    fn random_walkable_tile_is_walkable_under_both_distributions() {
        let map = Map::new(&GridLayout::new(3, vec![1, 1, 1, 0, 1, 0])).expect("map builds");
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for even in [true, false] {
            for _ in 0..32 {
                let coord = map
                    .random_walkable_tile(even, &mut rng)
                    .expect("map has walkable tiles");
                let index = coord.row() as usize * 3 + coord.column() as usize;
                assert!(map.tile(index).expect("in bounds").is_walkable());
            }
        }
    }

    #[test]
    fn spawner_creation_rejects_invalid_targets() {
        let mut map = corridor();

        // Already a spawner.
        assert!(!map.attempt_to_create_spawner(0, 0, 10.0));
        // Out of bounds.
        assert!(!map.attempt_to_create_spawner(9, 9, 10.0));
        // Fogged (column 4 is outside the spawner's cleared radius).
        assert!(!map.attempt_to_create_spawner(4, 0, 10.0));
        // Too far from every existing spawner.
        assert!(!map.attempt_to_create_spawner(2, 0, 1.0));
        assert!(!map.is_spawner_point(2, 0));
    }

    #[test]
    fn spawner_creation_rejects_non_walkable_tile() {
        //   1 1 1
        //   0 1 0
        let mut map = Map::new(&GridLayout::new(3, vec![1, 1, 1, 0, 1, 0])).expect("map builds");
        map.clear_all_fog();

        // (0, 1) is blocked; fog and distance are both permissive here.
        assert!(!map.attempt_to_create_spawner(0, 1, 10.0));
        assert!(!map.is_spawner_point(0, 1));
    }

    #[test]
    fn spawner_creation_flips_valid_target() {
        let mut map = corridor();
        assert!(map.attempt_to_create_spawner(2, 0, 5.0));
        assert!(map.is_spawner_point(2, 0));
    }

    #[test]
    fn circular_fog_clears_a_manhattan_diamond() {
        let mut map = Map::new(&GridLayout::new(5, vec![1; 25])).expect("grid builds");
        map.set_fog(2, 2, 10, true, false);
        map.set_fog(2, 2, 2, false, true);

        // Centre, diamond tips and an interior diagonal are cleared.
        for (column, row) in [(2, 2), (0, 2), (4, 2), (2, 0), (2, 4), (1, 1)] {
            assert!(!map.is_fogged(column, row), "({column}, {row}) should be clear");
        }
        // The square's corners sit at Manhattan distance 4 and stay fogged,
        // as does anything at distance 3.
        for (column, row) in [(0, 0), (4, 0), (0, 4), (4, 4), (3, 0)] {
            assert!(map.is_fogged(column, row), "({column}, {row}) should stay fogged");
        }
    }

    #[test]
    fn clear_all_fog_uncovers_everything() {
        let mut map = corridor();
        assert!(map.is_fogged(4, 0));
        map.clear_all_fog();
        assert!(!map.is_fogged(4, 0));
    }

    #[test]
    fn describe_paths_lists_coordinates() {
        let map = corridor();
        let listing = map.describe_paths(true);
        assert_eq!(listing, "Path #0: (0, 0) (1, 0) (2, 0) (3, 0) (4, 0)\n");
    }

    #[test]
    fn successors_follow_the_pruned_left_list() {
        let map = corridor();
        assert_eq!(map.successors_from(0, 0), Some(&[1][..]));
        assert_eq!(map.successors_from(4, 3), Some(&[4][..]));
        assert_eq!(map.successors_from(2, 0), None);
    }
}
