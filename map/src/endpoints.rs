//! Classification of walkable tiles into path start and end points.

use overgrowth_core::Facing;

use crate::adjacency::GridView;

/// Tests whether a tile begins (left) or terminates (right) directional paths.
///
/// A right-endpoint has no right-neighbours at all: a left-to-right path must
/// always end with horizontal progress. Without that restriction the top and
/// bottom arms of a plus-shaped map would classify as right-endpoints too, and
/// paths could end before reaching the far side of the map.
///
/// A left-endpoint either has no left-neighbours, or every one of its
/// right-neighbours doubles as a left-neighbour: any forward step out of the
/// tile is a vertical-only detour, so forward traversal truly begins here.
pub(crate) fn is_endpoint(view: &GridView<'_>, index: usize, test_left: bool) -> bool {
    let right_neighbors = view.adjacent_tiles(index, Facing::Rightward);

    if !test_left {
        return right_neighbors.is_empty();
    }

    let left_neighbors = view.adjacent_tiles(index, Facing::Leftward);
    if left_neighbors.is_empty() {
        return true;
    }
    if right_neighbors.is_empty() {
        return false;
    }

    right_neighbors
        .iter()
        .all(|neighbor| left_neighbors.contains(neighbor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::walkable_tiles;

    #[test]
    fn corridor_ends_classify_as_expected() {
        let tiles = walkable_tiles(5, 1, &[1; 5]);
        let view = GridView::new(5, 1, &tiles);

        assert!(is_endpoint(&view, 0, true));
        assert!(!is_endpoint(&view, 0, false));
        assert!(is_endpoint(&view, 4, false));
        assert!(!is_endpoint(&view, 4, true));
        assert!(!is_endpoint(&view, 2, true));
        assert!(!is_endpoint(&view, 2, false));
    }

    #[test]
    fn isolated_tile_classifies_as_both_endpoints() {
        let tiles = walkable_tiles(1, 1, &[1]);
        let view = GridView::new(1, 1, &tiles);

        assert!(is_endpoint(&view, 0, true));
        assert!(is_endpoint(&view, 0, false));
    }

    #[test]
    fn vertical_detour_tile_classifies_as_left_endpoint() {
        // Right column of a 2x2 open square: the only forward steps are the
        // vertical neighbours, which are left-neighbours as well.
        let tiles = walkable_tiles(2, 2, &[1, 1, 1, 1]);
        let view = GridView::new(2, 2, &tiles);

        assert!(is_endpoint(&view, 1, true));
        assert!(is_endpoint(&view, 3, true));
        assert!(!is_endpoint(&view, 0, true));
        assert!(!is_endpoint(&view, 2, true));
    }
}
