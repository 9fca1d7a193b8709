//! Directional tile adjacency over the walkability grid.

use overgrowth_core::{Facing, TileCoord};

use crate::Tile;

/// Borrowed view of the tile arena used by the path-computation phases.
///
/// Splitting the read-only grid data away from [`crate::Map`] lets the
/// builder mutate endpoint flags and left-lists while adjacency lookups keep
/// an immutable borrow of the tiles.
#[derive(Clone, Copy, Debug)]
pub(crate) struct GridView<'a> {
    columns: u32,
    rows: u32,
    tiles: &'a [Tile],
}

impl<'a> GridView<'a> {
    pub(crate) const fn new(columns: u32, rows: u32, tiles: &'a [Tile]) -> Self {
        Self {
            columns,
            rows,
            tiles,
        }
    }

    pub(crate) const fn tiles(&self) -> &'a [Tile] {
        self.tiles
    }

    pub(crate) fn coord(&self, index: usize) -> TileCoord {
        self.tiles[index].coord()
    }

    /// Arena index of the tile offset from `index` by whole columns and rows,
    /// or `None` when the offset leaves the grid.
    pub(crate) fn offset_index(&self, index: usize, dc: i64, dr: i64) -> Option<usize> {
        let coord = self.tiles.get(index)?.coord();
        let column = i64::from(coord.column()) + dc;
        let row = i64::from(coord.row()) + dr;
        if column < 0 || row < 0 || column >= i64::from(self.columns) || row >= i64::from(self.rows)
        {
            return None;
        }
        Some(row as usize * self.columns as usize + column as usize)
    }

    /// Walkable in-bounds neighbours of the tile in the requested facing.
    ///
    /// The eight surrounding cells are considered: the three neighbours in the
    /// facing column plus the shared vertical neighbours directly above and
    /// below. An out-of-bounds index yields an empty list. The returned order
    /// is fixed (facing column top-to-bottom, then up, then down for leftward
    /// lookups; up, down, then facing column top-to-bottom for rightward) so
    /// that every later phase iterates deterministically.
    pub(crate) fn adjacent_tiles(&self, index: usize, facing: Facing) -> Vec<usize> {
        if index >= self.tiles.len() {
            return Vec::new();
        }

        let offsets: [(i64, i64); 5] = match facing {
            Facing::Leftward => [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1)],
            Facing::Rightward => [(0, -1), (0, 1), (1, -1), (1, 0), (1, 1)],
        };

        let mut neighbors = Vec::with_capacity(offsets.len());
        for (dc, dr) in offsets {
            let Some(neighbor) = self.offset_index(index, dc, dr) else {
                continue;
            };
            if self.tiles[neighbor].is_walkable() {
                neighbors.push(neighbor);
            }
        }
        neighbors
    }

    /// Whether the two tiles share an edge.
    pub(crate) fn are_cardinal(&self, first: usize, second: usize) -> bool {
        let a = self.coord(first);
        let b = self.coord(second);
        a.column().abs_diff(b.column()) + a.row().abs_diff(b.row()) == 1
    }

    /// Discards every diagonal neighbour whose step could be routed through an
    /// adjacent cardinal neighbour instead.
    ///
    /// With the tile in the centre of its 3x3 neighbourhood, a corner entry is
    /// kept only when neither of the two edges flanking that corner is present
    /// in `neighbors`. Cardinal entries always survive, as does the tile
    /// itself (endpoints list themselves as their sole successor). The result
    /// uses a canonical order: self, up, right, down, left, then surviving
    /// corners clockwise from up-left.
    pub(crate) fn prune_diagonal_if_cardinal(&self, index: usize, neighbors: &[usize]) -> Vec<usize> {
        let centre = self.coord(index);

        let mut up = None;
        let mut right = None;
        let mut down = None;
        let mut left = None;
        let mut up_left = None;
        let mut up_right = None;
        let mut down_right = None;
        let mut down_left = None;
        let mut keep = Vec::with_capacity(neighbors.len());

        for &neighbor in neighbors {
            let coord = self.coord(neighbor);
            let dc = i64::from(coord.column()) - i64::from(centre.column());
            let dr = i64::from(coord.row()) - i64::from(centre.row());
            match (dc, dr) {
                (0, 0) => keep.push(neighbor),
                (0, -1) => up = Some(neighbor),
                (1, 0) => right = Some(neighbor),
                (0, 1) => down = Some(neighbor),
                (-1, 0) => left = Some(neighbor),
                (-1, -1) => up_left = Some(neighbor),
                (1, -1) => up_right = Some(neighbor),
                (1, 1) => down_right = Some(neighbor),
                (-1, 1) => down_left = Some(neighbor),
                _ => {}
            }
        }

        keep.extend(up);
        keep.extend(right);
        keep.extend(down);
        keep.extend(left);

        if up.is_none() && left.is_none() {
            keep.extend(up_left);
        }
        if up.is_none() && right.is_none() {
            keep.extend(up_right);
        }
        if down.is_none() && right.is_none() {
            keep.extend(down_right);
        }
        if down.is_none() && left.is_none() {
            keep.extend(down_left);
        }

        keep
    }
}
