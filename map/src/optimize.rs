//! Geometric pruning of the enumerated path set.
//!
//! Paths violating a rule are dropped whole rather than repaired: the
//! enumerator produced every possible path, so the repaired variant already
//! exists elsewhere in the set. On the original test map this stage reduces
//! 197 enumerated paths to five.

use overgrowth_core::{Facing, MapDiagnostic};

use crate::adjacency::GridView;

/// Applies the elimination rules in order. Diagnostics are appended for the
/// conditions that should be impossible on a well-formed map.
pub(crate) fn optimize(
    view: &GridView<'_>,
    paths: &mut Vec<Vec<usize>>,
    diagnostics: &mut Vec<MapDiagnostic>,
) {
    // RULE: paths cannot be empty.
    paths.retain(|path| {
        if path.is_empty() {
            log::warn!("a zero-length path surfaced during optimization; dropping it");
            diagnostics.push(MapDiagnostic::EmptyPath);
            return false;
        }
        true
    });

    // RULE: a middle tile that adds no horizontal progress is a detour. If the
    // tile two steps ahead is cardinally adjacent to the current one, the step
    // between them was pointless:
    //
    //   0 2 3
    //     1      (down-right, up, right)  -->  should be just 0 2 3
    paths.retain(|path| {
        path.windows(3).all(|window| {
            let [first, _, third] = [window[0], window[1], window[2]];
            let neighbors = view.adjacent_tiles(first, Facing::Rightward);
            !(neighbors.contains(&third) && view.are_cardinal(first, third))
        })
    });

    // RULE: two consecutive diagonal steps that net out to two tiles of pure
    // horizontal progress are redundant whenever the straight middle tile is
    // walkable:
    //
    //     1
    //   0 - 2    and    0 - 2     should both be just  0 1 2
    //                     1
    paths.retain(|path| {
        path.windows(3).all(|window| {
            let a = view.coord(window[0]);
            let b = view.coord(window[1]);
            let c = view.coord(window[2]);
            let zigzag = b.column() == a.column() + 1
                && b.row() != a.row()
                && c.row() == a.row()
                && c.column() == a.column() + 2;
            if !zigzag {
                return true;
            }
            match view.offset_index(window[0], 1, 0) {
                Some(middle) => !view.tiles()[middle].is_walkable(),
                None => true,
            }
        })
    });

    // RULE: no cutting corners. Any diagonal step that the cardinal-preference
    // rule would reroute invalidates the whole path; the rerouted variant is
    // already in the set. This keeps the tile inside the corner reachable:
    //
    //   0            0
    //   - 1   -->    1 2
    paths.retain(|path| {
        path.windows(2).all(|window| {
            let neighbors = view.adjacent_tiles(window[0], Facing::Rightward);
            let allowed = view.prune_diagonal_if_cardinal(window[0], &neighbors);
            allowed.contains(&window[1])
        })
    });
}

/// Removes exact tile-sequence duplicates, keeping the first occurrence.
pub(crate) fn dedup(paths: &mut Vec<Vec<usize>>) {
    let mut kept: Vec<Vec<usize>> = Vec::with_capacity(paths.len());
    for path in paths.drain(..) {
        if !kept.contains(&path) {
            kept.push(path);
        }
    }
    *paths = kept;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::classified_tiles;

    #[test]
    fn pointless_vertical_detour_is_dropped() {
        //   1 1 1
        //   1 1 1
        let tiles = classified_tiles(3, 2, &[1; 6]);
        let view = GridView::new(3, 2, &tiles);
        let mut diagnostics = Vec::new();

        // 0 -> 4 (down-right), 4 -> 1 (up), 1 -> 2 (right): tile 1 is cardinal
        // to tile 0, so the excursion through 4 achieved nothing.
        let mut paths = vec![vec![0, 4, 1, 2]];
        optimize(&view, &mut paths, &mut diagnostics);
        assert!(paths.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn double_diagonal_with_walkable_middle_is_dropped() {
        //   1 1 1
        //   1 1 1
        let tiles = classified_tiles(3, 2, &[1; 6]);
        let view = GridView::new(3, 2, &tiles);
        let mut diagnostics = Vec::new();

        // 3 -> 1 -> 5 nets two columns of progress while tile 4 sits walkable
        // in between.
        let mut paths = vec![vec![3, 1, 5]];
        optimize(&view, &mut paths, &mut diagnostics);
        assert!(paths.is_empty());
    }

    #[test]
    fn double_diagonal_without_middle_survives() {
        //   0 1 0
        //   1 0 1
        //   0 1 0
        let tiles = classified_tiles(3, 3, &[0, 1, 0, 1, 0, 1, 0, 1, 0]);
        let view = GridView::new(3, 3, &tiles);
        let mut diagnostics = Vec::new();

        let mut paths = vec![vec![3, 1, 5], vec![3, 7, 5]];
        optimize(&view, &mut paths, &mut diagnostics);
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn corner_cutting_step_is_dropped() {
        //   1 1 0
        //   0 1 1
        let tiles = classified_tiles(3, 2, &[1, 1, 0, 0, 1, 1]);
        let view = GridView::new(3, 2, &tiles);
        let mut diagnostics = Vec::new();

        // 0 -> 4 cuts the corner that 0 -> 1 -> 4 routes around.
        let mut paths = vec![vec![0, 4, 5], vec![0, 1, 4, 5]];
        optimize(&view, &mut paths, &mut diagnostics);
        assert_eq!(paths, vec![vec![0, 1, 4, 5]]);
    }

    #[test]
    fn empty_path_is_dropped_with_diagnostic() {
        let tiles = classified_tiles(2, 1, &[1, 1]);
        let view = GridView::new(2, 1, &tiles);
        let mut diagnostics = Vec::new();

        let mut paths = vec![Vec::new(), vec![0, 1]];
        optimize(&view, &mut paths, &mut diagnostics);
        assert_eq!(paths, vec![vec![0, 1]]);
        assert_eq!(diagnostics, vec![MapDiagnostic::EmptyPath]);
    }

    #[test]
    fn dedup_keeps_first_occurrence_in_order() {
        let mut paths = vec![vec![0, 1], vec![2, 3], vec![0, 1], vec![4, 5]];
        dedup(&mut paths);
        assert_eq!(paths, vec![vec![0, 1], vec![2, 3], vec![4, 5]]);
    }
}
