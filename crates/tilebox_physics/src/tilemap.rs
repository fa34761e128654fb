//! Tile grids and slope geometry
//!
//! A level supplies two parallel grids: a boolean block map (fully solid
//! cells) and a slope map holding at most one [`SlopeType`] per cell. Cell
//! `(i, j)` is the unit square centered on world `(i, j)`; reads outside the
//! grid come back empty so the world has no implicit border walls.

use serde::{Deserialize, Serialize};
use tilebox_math::Vec2;

use crate::shapes::Aabb;

/// Grid cell coordinates
pub type Cell = (i32, i32);

/// Half the side length of a tile cell
pub const TILE_HALF: f32 = 0.5;

/// Map a world point to the cell containing it
#[inline]
pub fn cell_at(point: Vec2) -> Cell {
    (point.x.round() as i32, point.y.round() as i32)
}

/// The four triangular tile shapes
///
/// `Positive*` diagonals run bottom-left to top-right (gradient +1),
/// `Negative*` top-left to bottom-right (gradient -1). `*Bottom` cells are
/// solid below the diagonal and act as floors; `*Top` cells are solid above
/// it and act as ceilings. Each shape keeps one full-height vertical face
/// (its "tall side") and one flat face flush with a plain block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlopeType {
    /// Floor rising to the right; tall side on the right
    PositiveBottom,
    /// Floor rising to the left; tall side on the left
    NegativeBottom,
    /// Ceiling rising to the right; tall side on the left
    PositiveTop,
    /// Ceiling rising to the left; tall side on the right
    NegativeTop,
}

impl SlopeType {
    /// Floor-type slope (solid below the diagonal)
    #[inline]
    pub fn is_bottom(self) -> bool {
        matches!(self, SlopeType::PositiveBottom | SlopeType::NegativeBottom)
    }

    /// Ceiling-type slope (solid above the diagonal)
    #[inline]
    pub fn is_top(self) -> bool {
        !self.is_bottom()
    }

    /// Diagonal gradient: +1.0 or -1.0
    #[inline]
    pub fn gradient(self) -> f32 {
        match self {
            SlopeType::PositiveBottom | SlopeType::PositiveTop => 1.0,
            SlopeType::NegativeBottom | SlopeType::NegativeTop => -1.0,
        }
    }

    /// Signed x offset of the full-height vertical face from the cell center
    #[inline]
    pub fn tall_side(self) -> f32 {
        match self {
            SlopeType::PositiveBottom | SlopeType::NegativeTop => TILE_HALF,
            SlopeType::NegativeBottom | SlopeType::PositiveTop => -TILE_HALF,
        }
    }

    /// Diagonal height at a world x, clamped into the cell's horizontal span
    ///
    /// For floor slopes this is the walkable surface; for ceiling slopes the
    /// underside.
    pub fn surface_at(self, cell: Cell, x: f32) -> f32 {
        let cx = cell.0 as f32;
        let cy = cell.1 as f32;
        let clamped = x.clamp(cx - TILE_HALF, cx + TILE_HALF);
        (clamped - cx) * self.gradient() + cy
    }

    /// The x of the AABB corner that penetrates this slope deepest
    pub fn leading_x(self, aabb: &Aabb) -> f32 {
        match self {
            // Floor rising right / ceiling lowest at the right
            SlopeType::PositiveBottom | SlopeType::NegativeTop => aabb.max().x,
            // Floor rising left / ceiling lowest at the left
            SlopeType::NegativeBottom | SlopeType::PositiveTop => aabb.min().x,
        }
    }
}

/// Rectangular cell storage with empty out-of-bounds reads
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    /// Create a grid filled with the default cell value
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![T::default(); (width * height) as usize],
        }
    }
}

impl<T> Grid<T> {
    /// Create a grid from row-major cell data
    ///
    /// Panics when the data length does not match the dimensions; a
    /// malformed grid is a loader bug, not a runtime condition.
    pub fn from_cells(width: u32, height: u32, cells: Vec<T>) -> Self {
        assert_eq!(
            cells.len(),
            (width * height) as usize,
            "grid data length must be width * height"
        );
        Self {
            width,
            height,
            cells,
        }
    }

    /// An empty 0x0 grid; every read misses
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell lookup; `None` outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<&T> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        self.cells.get((y as u32 * self.width + x as u32) as usize)
    }

    /// Write a cell inside the grid; writes outside are ignored
    pub fn set(&mut self, x: i32, y: i32, value: T) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let index = (y as u32 * self.width + x as u32) as usize;
        self.cells[index] = value;
    }

    /// Iterate cells with their coordinates, row by row
    pub fn iter_cells(&self) -> impl Iterator<Item = (Cell, &T)> {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(index, value)| {
            let x = (index as u32 % width) as i32;
            let y = (index as u32 / width) as i32;
            ((x, y), value)
        })
    }
}
