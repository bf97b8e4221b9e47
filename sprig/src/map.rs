//! Passability grid for tile-based levels.
//!
//! Cells hold raw bytes. `0` and `1` are [`CellType::Passable`] and
//! [`CellType::Impassable`]; other values are left to the game.

use serde::{Deserialize, Serialize};

use crate::error::MapError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellType {
    Passable = 0,
    Impassable = 1,
}

impl From<CellType> for u8 {
    fn from(cell: CellType) -> Self {
        cell as u8
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    columns: usize,
    rows: usize,
    cells: Vec<u8>, // Row-major: [row * columns + column]
}

impl Map {
    /// An all-passable map.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![CellType::Passable.into(); columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Raw row-major cell storage.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn get(&self, column: usize, row: usize) -> Result<u8, MapError> {
        let index = self.index(column, row)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, column: usize, row: usize, value: impl Into<u8>) -> Result<(), MapError> {
        let index = self.index(column, row)?;
        self.cells[index] = value.into();
        Ok(())
    }

    /// True for in-bounds cells holding [`CellType::Passable`].
    pub fn is_passable(&self, column: usize, row: usize) -> bool {
        self.get(column, row)
            .is_ok_and(|value| value == u8::from(CellType::Passable))
    }

    /// Fill the outer ring of the map, `width` cells thick, with `value`.
    ///
    /// A zero width is a no-op. A width larger than either dimension fails.
    pub fn set_borders(&mut self, width: usize, value: impl Into<u8>) -> Result<(), MapError> {
        if width == 0 {
            return Ok(());
        }
        if width > self.columns || width > self.rows {
            return Err(MapError::BorderTooWide {
                width,
                columns: self.columns,
                rows: self.rows,
            });
        }

        let value = value.into();
        let columns = self.columns;
        for (row, cells) in self.cells.chunks_mut(columns).enumerate() {
            let edge_row = row < width || row >= self.rows - width;
            for (column, cell) in cells.iter_mut().enumerate() {
                if edge_row || column < width || column >= columns - width {
                    *cell = value;
                }
            }
        }
        Ok(())
    }

    fn index(&self, column: usize, row: usize) -> Result<usize, MapError> {
        if column >= self.columns || row >= self.rows {
            return Err(MapError::OutOfBounds {
                column,
                row,
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(row * self.columns + column)
    }
}
