//! A* pathfinding over the obstacle grid.
//!
//! Movement is 4-connected with unit step cost and a Manhattan heuristic.
//! Expansion order is fully deterministic: among open nodes with equal
//! `f = g + h`, the one with lower `h` is expanded first, then the one pushed
//! earliest. Neighbours are pushed in [`DIRECTIONS`](crate::DIRECTIONS) order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{manhattan, Cell, Grid};

/// Node in the A* open set
#[derive(Debug, Clone, Copy)]
struct PathNode {
    index: usize,
    f_cost: u32,
    h_cost: u32,
    /// Push order, last tie-breaker
    seq: u64,
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.h_cost.cmp(&self.h_cost))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a shortest path from `start` to `goal`.
///
/// Returns the cells in order, `start` first and `goal` last. The path is
/// empty if the goal is unreachable or either endpoint is blocked or out of
/// bounds. `start == goal` on a free cell yields `[start]`.
///
/// # Example
///
/// ```
/// use glam::IVec2;
/// use thicket::{find_path, Grid};
///
/// let grid = Grid::from_ascii(
///     "...
///      .#.
///      ...",
/// )
/// .unwrap();
///
/// let path = find_path(&grid, IVec2::new(0, 1), IVec2::new(2, 1));
/// assert_eq!(path.len(), 5);
/// ```
#[must_use]
pub fn find_path(grid: &Grid, start: Cell, goal: Cell) -> Vec<Cell> {
    let (Some(start_idx), Some(goal_idx)) = (grid.index(start), grid.index(goal)) else {
        return Vec::new();
    };
    if grid.is_blocked(start) || grid.is_blocked(goal) {
        return Vec::new();
    }
    if start == goal {
        return vec![start];
    }

    let size = grid.width() as usize * grid.height() as usize;
    let mut g_scores = vec![u32::MAX; size];
    let mut came_from: Vec<Option<usize>> = vec![None; size];
    let mut closed = vec![false; size];
    let mut open_set = BinaryHeap::new();
    let mut seq = 0u64;

    g_scores[start_idx] = 0;
    let h = manhattan(start, goal);
    open_set.push(PathNode {
        index: start_idx,
        f_cost: h,
        h_cost: h,
        seq,
    });

    while let Some(current) = open_set.pop() {
        if current.index == goal_idx {
            return reconstruct_path(grid, &came_from, goal_idx);
        }
        if closed[current.index] {
            continue;
        }
        closed[current.index] = true;

        let cell = cell_at(grid, current.index);
        let next_g = g_scores[current.index] + 1;

        for neighbor in grid.neighbors(cell) {
            let Some(n_idx) = grid.index(neighbor) else {
                continue;
            };
            if closed[n_idx] || next_g >= g_scores[n_idx] {
                continue;
            }

            g_scores[n_idx] = next_g;
            came_from[n_idx] = Some(current.index);

            seq += 1;
            let h = manhattan(neighbor, goal);
            open_set.push(PathNode {
                index: n_idx,
                f_cost: next_g + h,
                h_cost: h,
                seq,
            });
        }
    }

    Vec::new()
}

fn cell_at(grid: &Grid, index: usize) -> Cell {
    let width = grid.width() as usize;
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    Cell::new((index % width) as i32, (index / width) as i32)
}

/// Walk `came_from` back from the goal and reverse.
fn reconstruct_path(grid: &Grid, came_from: &[Option<usize>], goal: usize) -> Vec<Cell> {
    let mut path = vec![cell_at(grid, goal)];
    let mut current = goal;

    while let Some(prev) = came_from[current] {
        path.push(cell_at(grid, prev));
        current = prev;
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    fn assert_valid_path(grid: &Grid, path: &[Cell]) {
        for pair in path.windows(2) {
            assert_eq!(manhattan(pair[0], pair[1]), 1, "non-adjacent step in {path:?}");
        }
        for cell in path {
            assert!(grid.is_free(*cell), "path crosses blocked cell {cell}");
        }
    }

    /// Reference shortest distance by breadth-first search.
    fn bfs_distance(grid: &Grid, start: Cell, goal: Cell) -> Option<u32> {
        if grid.is_blocked(start) || grid.is_blocked(goal) {
            return None;
        }
        let mut dist = vec![None; grid.width() as usize * grid.height() as usize];
        let mut queue = VecDeque::new();
        dist[grid.index(start)?] = Some(0u32);
        queue.push_back(start);

        while let Some(cell) = queue.pop_front() {
            let d = dist[grid.index(cell)?]?;
            if cell == goal {
                return Some(d);
            }
            for next in grid.neighbors(cell) {
                let i = grid.index(next)?;
                if dist[i].is_none() {
                    dist[i] = Some(d + 1);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    mod basic_tests {
        use super::*;

        #[test]
        fn start_equals_goal() {
            let grid = Grid::open(4, 4).unwrap();
            let cell = Cell::new(2, 2);
            assert_eq!(find_path(&grid, cell, cell), vec![cell]);
        }

        #[test]
        fn straight_line_on_open_grid() {
            let grid = Grid::open(6, 1).unwrap();
            let path = find_path(&grid, Cell::new(0, 0), Cell::new(5, 0));
            assert_eq!(path.len(), 6);
            assert_valid_path(&grid, &path);
        }

        #[test]
        fn detours_around_wall() {
            let grid = Grid::from_ascii(
                "
                .....
                ..#..
                ..#..
                ..#..
                .....
                ",
            )
            .unwrap();

            let start = Cell::new(0, 2);
            let goal = Cell::new(4, 2);
            let path = find_path(&grid, start, goal);

            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&goal));
            assert_eq!(path.len(), 9);
            assert_valid_path(&grid, &path);
        }

        #[test]
        fn enclosed_goal_is_unreachable() {
            let grid = Grid::from_ascii(
                "
                .....
                .###.
                .#.#.
                .###.
                .....
                ",
            )
            .unwrap();

            assert!(find_path(&grid, Cell::new(0, 0), Cell::new(2, 2)).is_empty());
        }

        #[test]
        fn blocked_goal_or_start_yields_empty() {
            let grid = Grid::from_ascii(
                "
                .#.
                ...
                ",
            )
            .unwrap();

            assert!(find_path(&grid, Cell::new(0, 0), Cell::new(1, 0)).is_empty());
            assert!(find_path(&grid, Cell::new(1, 0), Cell::new(0, 0)).is_empty());
        }

        #[test]
        fn out_of_bounds_endpoints_yield_empty() {
            let grid = Grid::open(3, 3).unwrap();
            assert!(find_path(&grid, Cell::new(-1, 0), Cell::new(2, 2)).is_empty());
            assert!(find_path(&grid, Cell::new(0, 0), Cell::new(3, 3)).is_empty());
        }

        #[test]
        fn identical_queries_return_identical_paths() {
            let grid = Grid::open(10, 10).unwrap();
            let a = find_path(&grid, Cell::new(0, 0), Cell::new(9, 9));
            let b = find_path(&grid, Cell::new(0, 0), Cell::new(9, 9));
            assert_eq!(a, b);
        }

        #[test]
        fn border_path_exists_on_generated_grid() {
            let grid = Grid::generate(&crate::GridConfig::default()).unwrap();
            let path = find_path(&grid, Cell::new(0, 10), Cell::new(23, 0));
            // Both corners sit on the free border ring
            assert!(!path.is_empty());
            assert_valid_path(&grid, &path);
        }
    }

    fn small_grid() -> impl Strategy<Value = (Grid, Cell, Cell)> {
        (2u32..8, 2u32..8).prop_flat_map(|(w, h)| {
            let cells = (w * h) as usize;
            #[allow(clippy::cast_possible_wrap)]
            let (wi, hi) = (w as i32, h as i32);
            (
                proptest::collection::vec(proptest::bool::weighted(0.3), cells),
                (0..wi, 0..hi),
                (0..wi, 0..hi),
            )
                .prop_map(move |(blocked, (sx, sy), (gx, gy))| {
                    let mut grid = Grid::open(w, h).unwrap();
                    let cells: Vec<Cell> = grid.cells().collect();
                    for (cell, b) in cells.into_iter().zip(blocked) {
                        grid.set_blocked(cell, b);
                    }
                    (grid, Cell::new(sx, sy), Cell::new(gx, gy))
                })
        })
    }

    proptest! {
        #[test]
        fn path_length_matches_bfs((grid, start, goal) in small_grid()) {
            let path = find_path(&grid, start, goal);
            match bfs_distance(&grid, start, goal) {
                Some(d) => {
                    prop_assert_eq!(path.len(), d as usize + 1);
                    prop_assert_eq!(path.first(), Some(&start));
                    prop_assert_eq!(path.last(), Some(&goal));
                    assert_valid_path(&grid, &path);
                }
                None => prop_assert!(path.is_empty()),
            }
        }
    }
}
