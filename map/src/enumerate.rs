//! Exhaustive path enumeration from a left-endpoint.

use crate::left_list::LeftLists;
use crate::Tile;

/// Snapshot of traversal state captured at a fork: the successor to resume
/// from, the tiles already seen on this branch, and the path accumulated so
/// far.
///
/// The search deliberately restores full snapshots instead of backtracking.
/// Once several forks share partial history, unwinding a seen-set reliably is
/// not possible, so each fork carries its own copies.
struct Fork {
    resume: usize,
    seen: Vec<usize>,
    path: Vec<usize>,
}

/// Enumerates every simple path from `start` to any right-endpoint, following
/// the successor tables. The result is the raw combinatorial set; the
/// optimizer reduces it afterwards.
pub(crate) fn paths_from(lists: &LeftLists, tiles: &[Tile], start: usize) -> Vec<Vec<usize>> {
    let mut paths = Vec::new();
    let mut fork_list = vec![Fork {
        resume: start,
        seen: vec![start],
        path: Vec::new(),
    }];

    while let Some(fork) = fork_list.pop() {
        let mut seen = fork.seen;
        let mut path = fork.path;
        // The stack never holds more than one tile: forks interrupt the
        // linear walk instead of queueing siblings here.
        let mut stack = vec![fork.resume];

        while let Some(next) = stack.pop() {
            path.push(next);
            if !seen.contains(&next) {
                seen.push(next);
            }

            if tiles[next].is_right_endpoint() {
                paths.push(path.clone());
                break;
            }

            let came_from = if path.len() > 1 {
                path[path.len() - 2]
            } else {
                next
            };
            // Pruning may have deleted the entry entirely; the branch is then
            // a dead end.
            let Some(successors) = lists[next].get(&came_from) else {
                break;
            };

            if let [only] = successors.as_slice() {
                if !seen.contains(only) {
                    stack.push(*only);
                }
                continue;
            }
            for &successor in successors {
                if seen.contains(&successor) {
                    continue;
                }
                // Seen only within this fork's snapshot; sibling forks must
                // still be free to explore the same successor.
                seen.push(successor);
                fork_list.push(Fork {
                    resume: successor,
                    seen: seen.clone(),
                    path: path.clone(),
                });
                let _ = seen.pop();
            }
        }
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::GridView;
    use crate::left_list;
    use crate::test_support::classified_tiles;

    fn tables(columns: u32, rows: u32, markers: &[u8]) -> (Vec<Tile>, LeftLists) {
        let tiles = classified_tiles(columns, rows, markers);
        let view = GridView::new(columns, rows, &tiles);
        let mut lists = left_list::build(&view);
        left_list::prune(&view, &mut lists);
        (tiles, lists)
    }

    #[test]
    fn corridor_yields_single_linear_path() {
        let (tiles, lists) = tables(5, 1, &[1; 5]);
        let paths = paths_from(&lists, &tiles, 0);
        assert_eq!(paths, vec![vec![0, 1, 2, 3, 4]]);
    }

    #[test]
    fn fork_produces_one_path_per_branch() {
        // Diamond: tile 3 starts paths, tile 5 ends them, and the walk forks
        // over or under the blocked centre.
        //
        //   0 1 0
        //   1 0 1
        //   0 1 0
        let (tiles, lists) = tables(3, 3, &[0, 1, 0, 1, 0, 1, 0, 1, 0]);
        let paths = paths_from(&lists, &tiles, 3);
        assert_eq!(paths, vec![vec![3, 7, 5], vec![3, 1, 5]]);
        for path in &paths {
            let last = *path.last().expect("non-empty path");
            assert!(tiles[last].is_right_endpoint());
        }
    }

    #[test]
    fn no_tile_repeats_within_a_path() {
        let (tiles, lists) = tables(3, 3, &[0, 1, 0, 1, 0, 1, 0, 1, 0]);
        for path in paths_from(&lists, &tiles, 3) {
            let mut sorted = path.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), path.len(), "path revisits a tile: {path:?}");
        }
    }
}
