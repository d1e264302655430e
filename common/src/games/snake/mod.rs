mod clock;
mod entity;
mod frontend;
mod game_state;
mod grid;
mod item;
mod settings;
mod snake;
mod types;

pub use clock::{TickClock, interval};
pub use entity::{Entity, Shape};
pub use frontend::{InputEvent, InputSource, Key, Pacer, Renderer};
pub use game_state::{GameError, GameState, SnakeGame};
pub use grid::{Grid, wrap};
pub use item::{Item, ItemKind, PlacementError, place};
pub use settings::{GameSettings, MAX_SPEED, MIN_SPEED};
pub use snake::{MoveOutcome, Snake};
pub use types::{Direction, Palette, Position, Rgb, TerminationReason};
