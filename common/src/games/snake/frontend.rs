use super::clock::TickClock;
use super::types::{Direction, Position, Rgb};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    SpeedUp,
    SlowDown,
    Escape,
    Other,
}

impl Key {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
}

/// Drawing side of the window. Positions are cell origins in board pixels.
pub trait Renderer {
    fn draw_cell(&mut self, position: Position, fill: Rgb, border: Rgb);
    fn draw_circle_with_outline(
        &mut self,
        center: (f32, f32),
        radius: f32,
        fill: Rgb,
        outline: Rgb,
    );
    fn erase_cell(&mut self, position: Position);
    fn present(&mut self);
    fn set_window_title(&mut self, _title: &str) {}
}

pub trait InputSource {
    /// Everything queued since the last call. Never blocks.
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

pub trait Pacer {
    /// Blocks until the next frame boundary at `rate` ticks per second.
    fn tick(&mut self, rate: u32);
}

impl Pacer for TickClock {
    fn tick(&mut self, rate: u32) {
        self.wait(rate);
    }
}
