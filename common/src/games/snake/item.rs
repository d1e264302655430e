use std::collections::HashSet;
use std::fmt;

use crate::games::SessionRng;
use super::entity::{Entity, Shape};
use super::grid::Grid;
use super::types::{Palette, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementError {
    NoFreeCell { excluded: usize },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::NoFreeCell { excluded } => write!(
                f,
                "no free cell left for item placement ({} cells excluded)",
                excluded
            ),
        }
    }
}

impl std::error::Error for PlacementError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Apple,
    Stone,
}

#[derive(Clone, Debug)]
pub struct Item {
    kind: ItemKind,
    position: Position,
}

/// Uniform draw from `grid` cells not in `excluded`.
pub fn place(
    grid: &Grid,
    excluded: &HashSet<Position>,
    rng: &mut SessionRng,
) -> Result<Position, PlacementError> {
    let free: Vec<Position> = grid
        .all_cells()
        .iter()
        .copied()
        .filter(|cell| !excluded.contains(cell))
        .collect();

    rng.choose(&free).copied().ok_or(PlacementError::NoFreeCell {
        excluded: excluded.len(),
    })
}

impl Item {
    pub fn spawn(
        kind: ItemKind,
        grid: &Grid,
        excluded: &HashSet<Position>,
        rng: &mut SessionRng,
    ) -> Result<Self, PlacementError> {
        let position = place(grid, excluded, rng)?;
        Ok(Self { kind, position })
    }

    pub fn at(kind: ItemKind, position: Position) -> Self {
        Self { kind, position }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Moves the item to a fresh free cell.
    pub fn reset(
        &mut self,
        grid: &Grid,
        excluded: &HashSet<Position>,
        rng: &mut SessionRng,
    ) -> Result<(), PlacementError> {
        self.position = place(grid, excluded, rng)?;
        Ok(())
    }
}

impl Entity for Item {
    fn occupied(&self) -> Vec<Position> {
        vec![self.position]
    }

    fn shape(&self, palette: &Palette) -> Shape {
        match self.kind() {
            ItemKind::Apple => Shape::Disc {
                fill: palette.apple,
                outline: palette.apple_outline,
            },
            ItemKind::Stone => Shape::Cell {
                fill: palette.stone,
                border: palette.border,
            },
        }
    }
}
