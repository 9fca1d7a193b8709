#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Overgrowth engine.
//!
//! This crate defines the value types that connect the map core to its
//! consumers. The map crate ingests a [`GridLayout`], derives the traversal
//! paths once at construction time, and surfaces every algorithmic failure as
//! a [`MapDiagnostic`] value rather than an error, so callers inspect the
//! diagnostics and the resulting path count before relying on the map.

use serde::{Deserialize, Serialize};

/// Location of a single grid tile expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    column: u32,
    row: u32,
}

impl TileCoord {
    /// Creates a new grid tile coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two tile coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: TileCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Computes the straight-line distance between two tile coordinates.
    ///
    /// Spawner and generator placement measure their radii this way, so a
    /// diagonal neighbour counts as roughly 1.41 tiles rather than 2.
    #[must_use]
    pub fn euclidean_distance(self, other: TileCoord) -> f32 {
        let dc = self.column().abs_diff(other.column()) as f32;
        let dr = self.row().abs_diff(other.row()) as f32;
        (dc * dc + dr * dr).sqrt()
    }
}

/// Horizontal travel direction used by path queries and adjacency lookups.
///
/// Paths are stored left-to-right in the first half of the map's path set and
/// right-to-left in the second half; the facing selects which half a query
/// inspects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Travel toward decreasing column indices.
    Leftward,
    /// Travel toward increasing column indices.
    Rightward,
}

/// Severity attached to a [`MapDiagnostic`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// The map remains usable; the condition points at an authoring mistake.
    Warning,
    /// The map cannot support unit traversal and should be rejected.
    Fatal,
}

/// Value-level report emitted while deriving the traversal paths.
///
/// Path computation never fails across the module boundary: malformed maps
/// produce diagnostics and the surrounding application decides whether to
/// refuse the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapDiagnostic {
    /// A tile classified as both a left and a right endpoint. The grid is
    /// malformed; both classifications are kept and computation continues.
    ConflictingEndpoints {
        /// Coordinate of the doubly-classified tile.
        tile: TileCoord,
    },
    /// A zero-length path surfaced during optimization. Should be impossible;
    /// the path is dropped and computation continues.
    EmptyPath,
    /// No paths were generated at all. Unit traversal cannot function.
    NoPathsGenerated,
    /// A walkable tile that appears in no path. Anything spawning there may be
    /// permanently unreachable.
    OrphanTile {
        /// Coordinate of the uncovered tile.
        tile: TileCoord,
    },
}

impl MapDiagnostic {
    /// Severity class of the diagnostic.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::ConflictingEndpoints { .. } | Self::EmptyPath | Self::OrphanTile { .. } => {
                Severity::Warning
            }
            Self::NoPathsGenerated => Severity::Fatal,
        }
    }
}

/// Row-major walkability grid accepted by the map constructor.
///
/// A zero marker denotes a blocked tile, any other value a walkable one. The
/// marker count must be an exact multiple of `columns`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    columns: u32,
    markers: Vec<u8>,
}

impl GridLayout {
    /// Creates a new layout from a row length and row-major markers.
    #[must_use]
    pub fn new(columns: u32, markers: Vec<u8>) -> Self {
        Self { columns, markers }
    }

    /// Number of tile columns per row.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Row-major walkability markers.
    #[must_use]
    pub fn markers(&self) -> &[u8] {
        &self.markers
    }
}
