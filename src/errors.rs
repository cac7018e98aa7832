use error_chain::*;

error_chain! {

    errors {
        // Configuration error: a maze cannot be generated over a degenerate grid.
        InvalidDimensions(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}: width and height must be positive", width, height)
        }

        // A queried cell lies outside the grid.
        PositionOutOfBounds(x: u32, y: u32) {
            description("position outside the maze grid")
            display("position ({}, {}) lies outside the maze grid", x, y)
        }

        // Exit carving was requested on an interior cell.
        NotOnBoundary(x: u32, y: u32) {
            description("position not on the maze boundary")
            display("position ({}, {}) is not on the maze boundary", x, y)
        }

        // No route between two in-bounds cells. A correctly carved maze is a
        // spanning tree, so this signals a broken maze, not a normal outcome.
        UnreachableGoal(x: u32, y: u32) {
            description("goal cell unreachable from the start cell")
            display("no route to ({}, {}): the maze graph is disconnected", x, y)
        }
    }
}
