use std::fmt;

use crate::cells::{GridPosition, WallFlags};
use crate::maze::Maze;
use crate::units::{Height, Width};
use crate::utils::FnvHashSet;

/// Render the contents of a maze cell as text.
/// The String should be 3 glyphs long, padded if required.
pub trait CellDecorator {
    fn render_cell_body(&self, _: GridPosition) -> String {
        String::from("   ")
    }
}

/// Empty cell bodies.
#[derive(Debug, Copy, Clone)]
pub struct PlainCells;

impl CellDecorator for PlainCells {}

/// Draws a dot on every cell of a route, the way the hint overlay shows it.
#[derive(Debug)]
pub struct PathDecorator {
    on_path_positions: FnvHashSet<GridPosition>,
}

impl PathDecorator {
    pub fn new(path: &[GridPosition]) -> PathDecorator {
        PathDecorator { on_path_positions: path.iter().cloned().collect() }
    }
}

impl CellDecorator for PathDecorator {
    fn render_cell_body(&self, pos: GridPosition) -> String {
        if self.on_path_positions.contains(&pos) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

/// Marks the entry cell with an 'S' and the exit cell with an 'E'.
#[derive(Debug)]
pub struct MarkersDecorator {
    entry: GridPosition,
    exit: GridPosition,
}

impl MarkersDecorator {
    pub fn new(entry: GridPosition, exit: GridPosition) -> MarkersDecorator {
        MarkersDecorator { entry, exit }
    }
}

impl CellDecorator for MarkersDecorator {
    fn render_cell_body(&self, pos: GridPosition) -> String {
        if pos == self.entry {
            String::from(" S ")
        } else if pos == self.exit {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}

/// A maze paired with a decorator for the cell bodies.
pub struct DecoratedMaze<'a> {
    maze: &'a Maze,
    decorator: &'a dyn CellDecorator,
}

impl<'a> DecoratedMaze<'a> {
    pub fn new(maze: &'a Maze, decorator: &'a dyn CellDecorator) -> DecoratedMaze<'a> {
        DecoratedMaze { maze, decorator }
    }
}

impl<'a> fmt::Display for DecoratedMaze<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        render_maze(self.maze, self.decorator, f)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        render_maze(self, &PlainCells, f)
    }
}

// Each cell draws the wall above it and the wall to its left; the last column
// and the bottom row close the frame. A carved exit therefore shows up as a
// gap in the outer frame.
fn render_maze(maze: &Maze, decorator: &dyn CellDecorator, f: &mut fmt::Formatter) -> fmt::Result {
    let Width(width) = maze.width();
    let Height(height) = maze.height();

    let state_at = |x: usize, y: usize| -> WallFlags {
        maze.wall_state(GridPosition::new(x as u32, y as u32))
            .expect("rendering stays inside the grid")
    };

    let mut output = String::new();

    for y in (0..height).rev() {
        for x in 0..width {
            output.push('+');
            output.push_str(if state_at(x, y).contains(WallFlags::UP) { "---" } else { "   " });
        }
        output.push_str("+\n");

        for x in 0..width {
            let state = state_at(x, y);
            output.push(if state.contains(WallFlags::LEFT) { '|' } else { ' ' });
            output.push_str(&decorator.render_cell_body(GridPosition::new(x as u32, y as u32)));
        }
        let row_end = state_at(width - 1, y);
        output.push(if row_end.contains(WallFlags::RIGHT) { '|' } else { ' ' });
        output.push('\n');
    }

    for x in 0..width {
        output.push('+');
        output.push_str(if state_at(x, 0).contains(WallFlags::DOWN) { "---" } else { "   " });
    }
    output.push_str("+\n");

    write!(f, "{}", output)
}
