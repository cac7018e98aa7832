use error_chain::bail;
use serde_derive::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cells::{GridPosition, WallFlags};
use crate::errors::{ErrorKind, Result};
use crate::units::{Height, Width};

/// An adjacent in-bounds cell together with the wall shared with it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Neighbour {
    pub position: GridPosition,
    pub shared_wall: WallFlags,
}

pub type NeighbourSmallVec = SmallVec<[Neighbour; 4]>;
pub type PositionSmallVec = SmallVec<[GridPosition; 4]>;

/// The wall-state grid: one `WallFlags` per cell, row major.
///
/// A maze is created fully walled, carved exactly once by a generator and
/// immutable afterwards, except for the single exit wall opened through
/// `open_exit`. Wall openness is always symmetric: opening a wall clears the
/// matching flag on both sides of the shared edge, so checking either cell
/// answers for the pair.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Maze {
    width: Width,
    height: Height,
    cells: Vec<WallFlags>,
}

impl Maze {
    /// A grid with every wall in place and nothing visited.
    ///
    /// Degenerate dimensions are a configuration error, rejected before any
    /// allocation happens.
    pub fn fully_walled(width: Width, height: Height) -> Result<Maze> {
        if width.0 == 0 || height.0 == 0 {
            bail!(ErrorKind::InvalidDimensions(width.0, height.0));
        }

        Ok(Maze {
            width,
            height,
            cells: vec![WallFlags::ALL_SIDES; width.0 * height.0],
        })
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.width.0 * self.height.0
    }

    #[inline]
    pub fn is_valid_position(&self, pos: GridPosition) -> bool {
        (pos.x as usize) < self.width.0 && (pos.y as usize) < self.height.0
    }

    /// Is the cell on the outer edge of the grid?
    #[inline]
    pub fn is_boundary(&self, pos: GridPosition) -> bool {
        pos.x == 0 || pos.y == 0
            || pos.x as usize == self.width.0 - 1
            || pos.y as usize == self.height.0 - 1
    }

    /// The wall state of one cell, or None for an off-grid position.
    pub fn wall_state(&self, pos: GridPosition) -> Option<WallFlags> {
        if self.is_valid_position(pos) {
            Some(self.cells[self.cell_index(pos)])
        } else {
            None
        }
    }

    /// The in-bounds cell on the other side of the given wall, if any.
    pub fn neighbour_through(&self, pos: GridPosition, wall: WallFlags) -> Option<GridPosition> {
        pos.through_wall(wall)
            .and_then(|adjacent| if self.is_valid_position(adjacent) {
                Some(adjacent)
            } else {
                None
            })
    }

    /// Up to four adjacent in-bounds cells with the wall shared with each.
    /// Probe order is LEFT, DOWN, UP, RIGHT; callers must not read any meaning
    /// into it.
    pub fn neighbours_in_bounds(&self, pos: GridPosition) -> NeighbourSmallVec {
        [WallFlags::LEFT, WallFlags::DOWN, WallFlags::UP, WallFlags::RIGHT]
            .iter()
            .filter_map(|&shared_wall| {
                self.neighbour_through(pos, shared_wall)
                    .map(|position| Neighbour { position, shared_wall })
            })
            .collect()
    }

    /// Is the wall in the given direction cleared? False for off-grid cells.
    pub fn is_open(&self, pos: GridPosition, wall: WallFlags) -> bool {
        self.wall_state(pos)
            .map_or(false, |state| !state.intersects(wall))
    }

    /// Adjacent cells reachable through an open wall - the BFS adjacency.
    pub fn open_neighbours(&self, pos: GridPosition) -> PositionSmallVec {
        self.neighbours_in_bounds(pos)
            .iter()
            .filter(|neighbour| self.is_open(pos, neighbour.shared_wall))
            .map(|neighbour| neighbour.position)
            .collect()
    }

    /// Clear a wall on `pos` and the opposite wall on the adjacent cell, when
    /// there is one, keeping the two sides of the edge coherent.
    pub(crate) fn open_wall(&mut self, pos: GridPosition, wall: WallFlags) {
        let index = self.cell_index(pos);
        self.cells[index].remove(wall);

        if let Some(adjacent) = self.neighbour_through(pos, wall) {
            let adjacent_index = self.cell_index(adjacent);
            self.cells[adjacent_index].remove(wall.opposite());
        }
    }

    /// Open the single outward-facing wall of a boundary cell, creating the
    /// level exit. The one mutation permitted on a finished maze: it touches
    /// no shared edge, so interior connectivity cannot change.
    ///
    /// For corner cells the outward wall is chosen with the fixed priority
    /// DOWN, UP, LEFT, RIGHT. Returns the wall that was opened.
    pub fn open_exit(&mut self, pos: GridPosition) -> Result<WallFlags> {
        if !self.is_valid_position(pos) {
            bail!(ErrorKind::PositionOutOfBounds(pos.x, pos.y));
        }

        let outward = self.outward_wall(pos);
        if outward == WallFlags::empty() {
            bail!(ErrorKind::NotOnBoundary(pos.x, pos.y));
        }

        let index = self.cell_index(pos);
        self.cells[index].remove(outward);
        Ok(outward)
    }

    /// Count of carved passages between adjacent cells. A perfect maze over
    /// `n` cells has exactly `n - 1` of them. The exit wall faces off-grid and
    /// is not a passage.
    pub fn passages_count(&self) -> usize {
        self.iter()
            .map(|pos| {
                [WallFlags::RIGHT, WallFlags::UP]
                    .iter()
                    .filter(|&&wall| {
                        self.neighbour_through(pos, wall).is_some() && self.is_open(pos, wall)
                    })
                    .count()
            })
            .sum()
    }

    /// Iterate every cell position in row-major order.
    pub fn iter(&self) -> PositionIter {
        PositionIter {
            current_cell_number: 0,
            cells_count: self.size(),
            width: self.width,
        }
    }

    pub(crate) fn mark_visited(&mut self, pos: GridPosition) {
        let index = self.cell_index(pos);
        self.cells[index].insert(WallFlags::VISITED);
    }

    pub(crate) fn is_visited(&self, pos: GridPosition) -> bool {
        self.cells[self.cell_index(pos)].contains(WallFlags::VISITED)
    }

    /// Drop the generation bookkeeping so only wall bits leave the generator.
    pub(crate) fn strip_visited(&mut self) {
        for cell in &mut self.cells {
            cell.remove(WallFlags::VISITED);
        }
    }

    fn outward_wall(&self, pos: GridPosition) -> WallFlags {
        if pos.y == 0 {
            WallFlags::DOWN
        } else if pos.y as usize == self.height.0 - 1 {
            WallFlags::UP
        } else if pos.x == 0 {
            WallFlags::LEFT
        } else if pos.x as usize == self.width.0 - 1 {
            WallFlags::RIGHT
        } else {
            WallFlags::empty()
        }
    }

    #[inline]
    fn cell_index(&self, pos: GridPosition) -> usize {
        pos.row_major_index(self.width)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct PositionIter {
    current_cell_number: usize,
    cells_count: usize,
    width: Width,
}

impl Iterator for PositionIter {
    type Item = GridPosition;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let pos = GridPosition::from_row_major_index(self.current_cell_number, self.width);
            self.current_cell_number += 1;
            Some(pos)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PositionIter {} // default impl using size_hint()

impl<'a> IntoIterator for &'a Maze {
    type Item = GridPosition;
    type IntoIter = PositionIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
