//! Construction and pruning of per-tile successor tables.
//!
//! Every walkable tile carries a mapping from "predecessor I arrived from" to
//! "successors I may legally step to next". Units cannot look behind
//! themselves, so the table encodes up front which forward steps never force a
//! unit to backtrack; the enumerator then only ever follows table entries.

use std::collections::BTreeMap;

use overgrowth_core::Facing;

use crate::adjacency::GridView;

/// Per-tile successor tables, indexed by arena position. Keys iterate in
/// ascending predecessor order, which keeps path enumeration reproducible.
pub(crate) type LeftLists = Vec<BTreeMap<usize, Vec<usize>>>;

/// Builds the raw successor tables for every walkable tile.
///
/// A left-endpoint keys its table by itself (traversal starts there); a
/// right-endpoint lists itself as its sole successor (traversal stops there).
/// When a tile offers two or more forward steps, each candidate is kept only
/// if some endpoint remains reachable from it without revisiting a tile.
pub(crate) fn build(view: &GridView<'_>) -> LeftLists {
    let mut lists: LeftLists = vec![BTreeMap::new(); view.tiles().len()];

    for tile in view.tiles() {
        if !tile.is_walkable() {
            continue;
        }
        let index = tile.index();

        let left_neighbors = view.adjacent_tiles(index, Facing::Leftward);
        let right_neighbors = view.adjacent_tiles(index, Facing::Rightward);

        let predecessor_keys = if tile.is_left_endpoint() {
            vec![index]
        } else {
            left_neighbors
        };
        let mut successors = if tile.is_right_endpoint() {
            vec![index]
        } else {
            right_neighbors
        };

        if successors.len() >= 2 {
            successors.retain(|&candidate| reaches_any_endpoint(view, candidate, index));
        }

        for key in predecessor_keys {
            let _ = lists[index].insert(key, successors.clone());
        }
    }

    lists
}

/// Snapshot of traversal state captured whenever the walk forks.
struct Fork {
    resume: usize,
    seen: Vec<usize>,
}

/// Exhaustive forked depth-first search over the rightward adjacency graph,
/// answering whether any right-endpoint is reachable from `start` without
/// revisiting a tile. The immediate predecessor is pre-seeded into the
/// seen-set to block instant backtracking.
fn reaches_any_endpoint(view: &GridView<'_>, start: usize, from: usize) -> bool {
    let mut fork_list = vec![Fork {
        resume: start,
        seen: vec![start, from],
    }];

    while let Some(fork) = fork_list.pop() {
        let mut seen = fork.seen;
        let mut stack = vec![fork.resume];

        while let Some(next) = stack.pop() {
            if !seen.contains(&next) {
                seen.push(next);
            }

            if view.tiles()[next].is_right_endpoint() {
                return true;
            }

            let neighbors = view.adjacent_tiles(next, Facing::Rightward);
            if let [only] = neighbors.as_slice() {
                if !seen.contains(only) {
                    stack.push(*only);
                }
                continue;
            }
            for neighbor in neighbors {
                if seen.contains(&neighbor) {
                    continue;
                }
                // The neighbour counts as seen only inside the snapshot taken
                // for its fork; siblings still get to explore it.
                seen.push(neighbor);
                fork_list.push(Fork {
                    resume: neighbor,
                    seen: seen.clone(),
                });
                let _ = seen.pop();
            }
        }
    }

    false
}

/// Global pruning pass over the built tables.
///
/// Per tile and per predecessor key: (a) a successor equal to the predecessor
/// is dropped, since arriving from a vertically adjacent tile and stepping
/// straight back is meaningless; (b) when (a) fired, the tile cardinally
/// right of the predecessor is dropped too, since the predecessor could have
/// stepped there directly; (c) diagonal steps with an equivalent cardinal
/// route are dropped;
/// (d) every successor removed by (c) loses its own table entry keyed by the
/// current tile, keeping the graph symmetric; (e) emptied keys are deleted.
pub(crate) fn prune(view: &GridView<'_>, lists: &mut LeftLists) {
    for index in 0..lists.len() {
        let predecessors: Vec<usize> = lists[index].keys().copied().collect();

        for predecessor in predecessors {
            let Some(mut successors) = lists[index].get(&predecessor).cloned() else {
                continue;
            };

            let removed_predecessor = remove_value(&mut successors, predecessor);
            if removed_predecessor {
                if let Some(right_of_predecessor) = view.offset_index(predecessor, 1, 0) {
                    if view.tiles()[right_of_predecessor].is_walkable() {
                        let _ = remove_value(&mut successors, right_of_predecessor);
                    }
                }
            }

            let kept = view.prune_diagonal_if_cardinal(index, &successors);

            for &removed in &successors {
                if kept.contains(&removed) {
                    continue;
                }
                let _ = lists[removed].remove(&index);
            }

            if kept.is_empty() {
                let _ = lists[index].remove(&predecessor);
            } else {
                let _ = lists[index].insert(predecessor, kept);
            }
        }
    }
}

fn remove_value(values: &mut Vec<usize>, value: usize) -> bool {
    if let Some(position) = values.iter().position(|&candidate| candidate == value) {
        let _ = values.remove(position);
        true
    } else {
        false
    }
}
