use bitflags::bitflags;
use serde_derive::{Deserialize, Serialize};

use crate::units::Width;

/// A cell position on the grid. `(0, 0)` is the bottom-left cell; `x` grows
/// rightwards and `y` grows upwards.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: u32,
    pub y: u32,
}

impl GridPosition {
    pub fn new(x: u32, y: u32) -> GridPosition {
        GridPosition { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, width: Width) -> GridPosition {
        let Width(w) = width;
        GridPosition::new((index % w) as u32, (index / w) as u32)
    }

    #[inline]
    pub fn row_major_index(&self, width: Width) -> usize {
        let Width(w) = width;
        self.y as usize * w + self.x as usize
    }

    /// The position one cell away on the other side of the given wall.
    /// Returns None if that position is not representable (off the low edges).
    /// Bounds against the grid's far edges are the maze's concern.
    pub fn through_wall(&self, wall: WallFlags) -> Option<GridPosition> {
        let (x, y) = (self.x, self.y);
        if wall == WallFlags::LEFT {
            if x > 0 { Some(GridPosition::new(x - 1, y)) } else { None }
        } else if wall == WallFlags::RIGHT {
            Some(GridPosition::new(x + 1, y))
        } else if wall == WallFlags::UP {
            Some(GridPosition::new(x, y + 1))
        } else if wall == WallFlags::DOWN {
            if y > 0 { Some(GridPosition::new(x, y - 1)) } else { None }
        } else {
            None
        }
    }
}

impl From<(u32, u32)> for GridPosition {
    fn from(x_y_pair: (u32, u32)) -> GridPosition {
        GridPosition::new(x_y_pair.0, x_y_pair.1)
    }
}

bitflags! {
    /// Which sides of a cell are blocked by a wall.
    ///
    /// `VISITED` is bookkeeping for the carving algorithm only; the generator
    /// strips it from every cell before handing the maze out.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct WallFlags: u8 {
        const LEFT = 0b0001;
        const RIGHT = 0b0010;
        const UP = 0b0100;
        const DOWN = 0b1000;
        const ALL_SIDES = Self::LEFT.bits() | Self::RIGHT.bits() | Self::UP.bits() | Self::DOWN.bits();
        const VISITED = 0b1000_0000;
    }
}

impl WallFlags {
    /// The same edge seen from the adjacent cell: LEFT↔RIGHT and UP↔DOWN.
    /// Anything that is not a single side wall maps to the empty set.
    pub fn opposite(self) -> WallFlags {
        if self == WallFlags::LEFT {
            WallFlags::RIGHT
        } else if self == WallFlags::RIGHT {
            WallFlags::LEFT
        } else if self == WallFlags::UP {
            WallFlags::DOWN
        } else if self == WallFlags::DOWN {
            WallFlags::UP
        } else {
            WallFlags::empty()
        }
    }
}
