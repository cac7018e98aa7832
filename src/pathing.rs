use std::collections::VecDeque;

use error_chain::bail;

use crate::cells::GridPosition;
use crate::errors::{ErrorKind, Result};
use crate::maze::Maze;
use crate::utils::{self, FnvHashMap};

/// The boundary cell farthest from the (0, 0) origin, by breadth first search
/// over open-wall adjacency. Candidates are cells on the outer edge of the
/// grid; the running best is replaced only on a strictly greater distance, so
/// the first cell dequeued at a new maximum wins any tie and the result is
/// deterministic for a given maze.
///
/// Always yields an in-bounds cell: for a 1x1 grid that is (0, 0) itself.
/// The caller typically opens the exit there with `Maze::open_exit`.
pub fn farthest_boundary_cell(maze: &Maze) -> GridPosition {
    let origin = GridPosition::new(0, 0);
    let mut distances: FnvHashMap<GridPosition, u32> = utils::fnv_hashmap(maze.size());
    distances.insert(origin, 0);
    let mut queue = VecDeque::new();
    queue.push_back(origin);

    let mut farthest = origin;
    let mut max_distance = 0;

    while let Some(current) = queue.pop_front() {
        let distance = *distances.get(&current).expect("queued cells have a distance");

        if distance > max_distance && maze.is_boundary(current) {
            max_distance = distance;
            farthest = current;
        }

        for next in maze.open_neighbours(current) {
            if !distances.contains_key(&next) {
                distances.insert(next, distance + 1);
                queue.push_back(next);
            }
        }
    }

    farthest
}

/// Shortest route between two cells as a start-to-goal position sequence,
/// by breadth first search recording a predecessor per visited cell and
/// stopping as soon as the goal is dequeued. `start == goal` yields the one
/// element path `[start]`.
///
/// Off-grid endpoints are an error distinct from unreachability; failing to
/// reach an in-bounds goal means the maze is not the spanning tree the
/// generator promises, which is surfaced rather than patched over.
pub fn shortest_path(maze: &Maze,
                     start: GridPosition,
                     goal: GridPosition)
                     -> Result<Vec<GridPosition>> {

    if !maze.is_valid_position(start) {
        bail!(ErrorKind::PositionOutOfBounds(start.x, start.y));
    }
    if !maze.is_valid_position(goal) {
        bail!(ErrorKind::PositionOutOfBounds(goal.x, goal.y));
    }

    let mut predecessors: FnvHashMap<GridPosition, GridPosition> = utils::fnv_hashmap(maze.size());
    predecessors.insert(start, start);
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Ok(walk_predecessors(&predecessors, start, goal));
        }

        for next in maze.open_neighbours(current) {
            if !predecessors.contains_key(&next) {
                predecessors.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    Err(ErrorKind::UnreachableGoal(goal.x, goal.y).into())
}

fn walk_predecessors(predecessors: &FnvHashMap<GridPosition, GridPosition>,
                     start: GridPosition,
                     goal: GridPosition)
                     -> Vec<GridPosition> {

    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = *predecessors.get(&current).expect("visited cells have a predecessor");
        path.push(current);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {

    use std::collections::VecDeque;

    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::cells::WallFlags;
    use crate::errors::Error;
    use crate::generators::recursive_backtracker;
    use crate::units::{Height, Width};
    use crate::utils;

    fn generate(w: usize, h: usize, seed: u64) -> Maze {
        recursive_backtracker(Width(w), Height(h), Some(seed)).expect("valid test dimensions")
    }

    fn gp(x: u32, y: u32) -> GridPosition {
        GridPosition::new(x, y)
    }

    fn manhattan(a: GridPosition, b: GridPosition) -> u32 {
        let dx = if a.x > b.x { a.x - b.x } else { b.x - a.x };
        let dy = if a.y > b.y { a.y - b.y } else { b.y - a.y };
        dx + dy
    }

    fn reachable_cells(maze: &Maze) -> usize {
        let mut seen = utils::fnv_hashset(maze.size());
        seen.insert(gp(0, 0));
        let mut queue = VecDeque::new();
        queue.push_back(gp(0, 0));
        while let Some(current) = queue.pop_front() {
            for next in maze.open_neighbours(current) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen.len()
    }

    fn path_is_walkable(maze: &Maze, path: &[GridPosition]) -> bool {
        path.windows(2).all(|pair| {
            maze.neighbours_in_bounds(pair[0])
                .iter()
                .any(|n| n.position == pair[1] && maze.is_open(pair[0], n.shared_wall))
        })
    }

    #[test]
    fn farthest_cell_is_always_on_the_boundary() {
        for seed in 0..10 {
            let m = generate(10, 7, seed);
            let far = farthest_boundary_cell(&m);
            assert!(m.is_boundary(far), "seed {} gave interior cell {:?}", seed, far);
        }
    }

    #[test]
    fn farthest_cell_on_one_by_one_grid_is_the_origin() {
        let m = generate(1, 1, 5);
        assert_eq!(farthest_boundary_cell(&m), gp(0, 0));
    }

    #[test]
    fn farthest_cell_is_deterministic_per_maze() {
        let m = generate(8, 8, 77);
        assert_eq!(farthest_boundary_cell(&m), farthest_boundary_cell(&m));
    }

    #[test]
    fn path_from_a_cell_to_itself_is_that_cell() {
        let m = generate(4, 4, 21);
        let cell = gp(2, 3);
        assert_eq!(shortest_path(&m, cell, cell).unwrap(), vec![cell]);

        let tiny = generate(1, 1, 0);
        assert_eq!(shortest_path(&tiny, gp(0, 0), gp(0, 0)).unwrap(), vec![gp(0, 0)]);
    }

    #[test]
    fn paths_walk_open_walls_between_their_endpoints() {
        for seed in 0..6 {
            let m = generate(9, 9, seed);
            let goal = farthest_boundary_cell(&m);
            let path = shortest_path(&m, gp(0, 0), goal).unwrap();

            assert_eq!(*path.first().unwrap(), gp(0, 0));
            assert_eq!(*path.last().unwrap(), goal);
            assert!(path_is_walkable(&m, &path));
        }
    }

    #[test]
    fn path_length_is_bounded_by_cell_count_and_manhattan_distance() {
        for seed in 0..10 {
            let m = generate(10, 10, seed);
            let start = gp(0, 0);
            let goal = gp(9, 9);
            let path = shortest_path(&m, start, goal).unwrap();

            assert!(path.len() <= 100);
            assert!(path.len() as u32 - 1 >= manhattan(start, goal));
        }
    }

    #[test]
    fn out_of_bounds_endpoints_are_rejected() {
        let m = generate(3, 3, 1);
        match shortest_path(&m, gp(3, 0), gp(0, 0)) {
            Err(Error(ErrorKind::PositionOutOfBounds(3, 0), _)) => {}
            other => panic!("expected PositionOutOfBounds, got {:?}", other),
        }
        match shortest_path(&m, gp(0, 0), gp(0, 9)) {
            Err(Error(ErrorKind::PositionOutOfBounds(0, 9), _)) => {}
            other => panic!("expected PositionOutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn a_walled_off_goal_is_an_invariant_violation() {
        // Hand built grid, not generator output: nothing is reachable.
        let m = Maze::fully_walled(Width(2), Height(2)).unwrap();
        match shortest_path(&m, gp(0, 0), gp(1, 1)) {
            Err(Error(ErrorKind::UnreachableGoal(1, 1), _)) => {}
            other => panic!("expected UnreachableGoal, got {:?}", other),
        }
    }

    #[test]
    fn exit_carving_preserves_full_connectivity() {
        for seed in 0..6 {
            let mut m = generate(8, 5, seed);
            let exit = farthest_boundary_cell(&m);
            let opened = m.open_exit(exit).unwrap();
            assert_ne!(opened, WallFlags::empty());
            assert_eq!(reachable_cells(&m), 8 * 5);
        }
    }

    #[test]
    fn every_cell_is_reachable_from_every_other() {
        fn prop(w: usize, h: usize, seed: u64) -> TestResult {
            if w == 0 || h == 0 || w > 10 || h > 10 {
                return TestResult::discard();
            }
            let m = generate(w, h, seed);
            let far = farthest_boundary_cell(&m);
            let all_paths_exist = m.iter().all(|pos| {
                shortest_path(&m, pos, far).is_ok()
            });
            TestResult::from_bool(all_paths_exist && m.is_boundary(far))
        }
        quickcheck(prop as fn(usize, usize, u64) -> TestResult);
    }
}
