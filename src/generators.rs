use rand::{Rng, SeedableRng, XorShiftRng};

use crate::cells::GridPosition;
use crate::errors::Result;
use crate::maze::{Maze, Neighbour, NeighbourSmallVec};
use crate::units::{Height, Width};

/// Carve a perfect maze over a fully walled grid using the randomized
/// recursive backtracker, run iteratively over an explicit stack so the
/// working depth is bounded by the grid area, never the call stack.
///
/// The top of the stack is peeked, not popped: a cell only leaves the stack
/// once it has no unvisited neighbours left. That detail is what makes the
/// carved passages a spanning tree of the grid graph rather than a forest -
/// connected, acyclic, exactly `width * height - 1` walls removed.
///
/// A seed makes the layout reproducible run to run; without one the
/// generator seeds itself from system entropy.
pub fn recursive_backtracker(width: Width, height: Height, seed: Option<u64>) -> Result<Maze> {
    let mut maze = Maze::fully_walled(width, height)?;
    let mut rng = rng_for_seed(seed);

    let start = random_position(&mut rng, &maze);
    maze.mark_visited(start);
    let mut frontier = vec![start];

    while let Some(&current) = frontier.last() {
        let candidates = unvisited_neighbours(&maze, current);

        if candidates.is_empty() {
            // Dead end: the cell is finished and never looked at again.
            frontier.pop();
            continue;
        }

        let chosen: Neighbour = *rng.choose(&candidates).expect("candidate list is non-empty");
        maze.open_wall(current, chosen.shared_wall);
        maze.mark_visited(chosen.position);
        frontier.push(chosen.position);
    }

    maze.strip_visited();
    Ok(maze)
}

fn unvisited_neighbours(maze: &Maze, pos: GridPosition) -> NeighbourSmallVec {
    maze.neighbours_in_bounds(pos)
        .into_iter()
        .filter(|neighbour| !maze.is_visited(neighbour.position))
        .collect()
}

fn random_position<R: Rng>(rng: &mut R, maze: &Maze) -> GridPosition {
    let index = rng.gen::<usize>() % maze.size();
    GridPosition::from_row_major_index(index, maze.width())
}

/// XorShift RNG for an optional caller-supplied seed.
pub(crate) fn rng_for_seed(seed: Option<u64>) -> XorShiftRng {
    match seed {
        Some(seed) => {
            let low = seed as u32;
            let high = (seed >> 32) as u32;
            // Spread the 64 seed bits over the four state words; the trailing
            // `| 1` keeps the state non-zero as XorShift requires.
            XorShiftRng::from_seed([low, high, low ^ 0x9E37_79B9, high | 1])
        }
        None => rand::weak_rng(),
    }
}
