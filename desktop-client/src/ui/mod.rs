mod app;
mod canvas;
mod input;

pub use app::{SessionOutcome, SnakeApp};
