use super::types::{Palette, Position, Rgb};

/// How the renderer should paint each cell an entity occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Cell { fill: Rgb, border: Rgb },
    Disc { fill: Rgb, outline: Rgb },
}

/// Something on the board: the snake, the apple or the stone.
pub trait Entity {
    fn occupied(&self) -> Vec<Position>;
    fn shape(&self, palette: &Palette) -> Shape;
}
