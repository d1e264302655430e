use super::settings::GameSettings;
use super::types::{Direction, Position};

/// Toroidal board of `width x height` pixels split into square cells.
#[derive(Clone, Debug)]
pub struct Grid {
    width: i32,
    height: i32,
    cell_size: i32,
    cells: Vec<Position>,
}

/// Reduces `coordinate` into `[0, extent)`; leaving one edge re-enters on the other.
pub fn wrap(coordinate: i32, extent: i32) -> i32 {
    coordinate.rem_euclid(extent)
}

impl Grid {
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        let columns = width / cell_size;
        let rows = height / cell_size;
        let cells = (0..rows)
            .flat_map(|j| (0..columns).map(move |i| Position::new(i * cell_size, j * cell_size)))
            .collect();

        Self {
            width,
            height,
            cell_size,
            cells,
        }
    }

    pub fn from_settings(settings: &GameSettings) -> Self {
        Self::new(settings.board_width, settings.board_height, settings.cell_size)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Every valid cell, row-major. The order is fixed so seeded placement is reproducible.
    pub fn all_cells(&self) -> &[Position] {
        &self.cells
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.x < self.width
            && position.y >= 0
            && position.y < self.height
            && position.x % self.cell_size == 0
            && position.y % self.cell_size == 0
    }

    /// Cell containing the board's pixel centre.
    pub fn center(&self) -> Position {
        let x = (self.width / 2) / self.cell_size * self.cell_size;
        let y = (self.height / 2) / self.cell_size * self.cell_size;
        Position::new(x, y)
    }

    pub fn step(&self, from: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(
            wrap(from.x + dx * self.cell_size, self.width),
            wrap(from.y + dy * self.cell_size, self.height),
        )
    }
}
