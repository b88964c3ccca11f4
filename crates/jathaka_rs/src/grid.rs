//! South-Indian chart layout as data.
//!
//! Signs sit in fixed cells around the border of a 4x4 grid, Meena at the
//! top-left and proceeding clockwise. The four centre cells are empty.

use jathaka_vedic_base::Rashi;
use serde::{Deserialize, Serialize};

use crate::chart::{Chart, Occupant};

/// `(row, col)` of each sign, indexed by sign index.
pub const SOUTH_INDIAN_CELLS: [(usize, usize); 12] = [
    (0, 1), // Mesha
    (0, 2), // Vrishabha
    (0, 3), // Mithuna
    (1, 3), // Karka
    (2, 3), // Simha
    (3, 3), // Kanya
    (3, 2), // Tula
    (3, 1), // Vrischika
    (3, 0), // Dhanu
    (2, 0), // Makara
    (1, 0), // Kumbha
    (0, 0), // Meena
];

/// One border cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub rashi: Rashi,
    /// Lagna first, then grahas in traditional order.
    pub occupants: Vec<Occupant>,
}

impl GridCell {
    pub fn has_lagna(&self) -> bool {
        self.occupants.first() == Some(&Occupant::Lagna)
    }
}

/// 4x4 grid; `None` for the centre cells.
pub type SouthIndianGrid = [[Option<GridCell>; 4]; 4];

/// Lay a chart's sign occupancy out in the South-Indian style.
pub fn south_indian_grid(chart: &Chart) -> SouthIndianGrid {
    let mut grid: SouthIndianGrid = Default::default();
    for (sign, &(row, col)) in SOUTH_INDIAN_CELLS.iter().enumerate() {
        grid[row][col] = Some(GridCell {
            rashi: Rashi::from_index(sign as u8),
            occupants: chart.occupancy[sign].clone(),
        });
    }
    grid
}
