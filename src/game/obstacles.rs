//! Fixed wall shapes placed on the grid.
//!
//! Two shapes, both derived from the grid dimensions alone:
//! - a vertical wall on the center column, spanning rows `[5, height - 5)`
//! - an L in the top-left corner: row 2 over columns `[2, 8)` and column 2
//!   over rows `[2, 8)`
//!
//! The set has to be rebuilt whenever the grid dimensions change.

use std::collections::HashSet;

use super::config::ObstacleLayout;
use super::state::Position;

/// First row of the center wall
const CENTER_WALL_MARGIN: i32 = 5;
/// Row and column the L shape sits on
const CORNER_OFFSET: i32 = 2;
/// Exclusive end of both L segments
const CORNER_END: i32 = 8;

/// Closed-form test for the wall layout on a `width` x `height` grid
pub fn is_wall(width: usize, height: usize, pos: Position) -> bool {
    let (width, height) = (width as i64, height as i64);
    let (x, y) = (pos.x as i64, pos.y as i64);
    if x < 0 || y < 0 || x >= width || y >= height {
        return false;
    }

    let center_x = width / 2;
    let margin = CENTER_WALL_MARGIN as i64;
    let on_center_wall = x == center_x && y >= margin && y < height - margin;

    let (offset, end) = (CORNER_OFFSET as i64, CORNER_END as i64);
    let on_corner_row = y == offset && x >= offset && x < end;
    let on_corner_column = x == offset && y >= offset && y < end;

    on_center_wall || on_corner_row || on_corner_column
}

/// Immovable cells that end the game on contact
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObstacleSet {
    cells: HashSet<Position>,
}

impl ObstacleSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the obstacle cells for a layout on a `width` x `height` grid.
    /// Cells falling outside small grids are clipped.
    pub fn for_grid(layout: ObstacleLayout, width: usize, height: usize) -> Self {
        match layout {
            ObstacleLayout::None => Self::empty(),
            ObstacleLayout::Walls if width == 0 || height == 0 => Self::empty(),
            ObstacleLayout::Walls => {
                let (width, height) = (width as i32, height as i32);

                let center_x = width / 2;
                let center_wall = (CENTER_WALL_MARGIN..height - CENTER_WALL_MARGIN)
                    .map(move |y| Position::new(center_x, y));
                let corner_row = (CORNER_OFFSET..CORNER_END.min(width))
                    .filter(move |_| CORNER_OFFSET < height)
                    .map(|x| Position::new(x, CORNER_OFFSET));
                let corner_column = (CORNER_OFFSET..CORNER_END.min(height))
                    .filter(move |_| CORNER_OFFSET < width)
                    .map(|y| Position::new(CORNER_OFFSET, y));

                let cells = center_wall.chain(corner_row).chain(corner_column).collect();
                Self { cells }
            }
        }
    }

    pub fn insert(&mut self, pos: Position) {
        self.cells.insert(pos);
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
