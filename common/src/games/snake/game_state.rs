use std::collections::HashSet;

use crate::config::Validate;
use crate::games::SessionRng;
use crate::log;
use super::entity::{Entity, Shape};
use super::frontend::{InputEvent, InputSource, Key, Pacer, Renderer};
use super::grid::Grid;
use super::item::{Item, ItemKind, PlacementError};
use super::settings::GameSettings;
use super::snake::{MoveOutcome, Snake};
use super::types::{Position, TerminationReason};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    /// The snake bit itself on the last tick. Its old body is already erased;
    /// the next tick starts by going back to `Running`.
    ResetPending,
    Terminated(TerminationReason),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    InvalidSettings(String),
    Placement(PlacementError),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidSettings(e) => write!(f, "Invalid game settings: {}", e),
            GameError::Placement(e) => write!(f, "Placement error: {}", e),
        }
    }
}

impl std::error::Error for GameError {}

impl From<PlacementError> for GameError {
    fn from(e: PlacementError) -> Self {
        GameError::Placement(e)
    }
}

/// Owns the snake, the apple and the stone, and drives them one tick at a time.
#[derive(Clone)]
pub struct SnakeGame {
    settings: GameSettings,
    grid: Grid,
    snake: Snake,
    apple: Item,
    stone: Item,
    rng: SessionRng,
    state: GameState,
    title: String,
    shown_title: Option<String>,
    ticks: u64,
}

impl SnakeGame {
    pub fn new(
        settings: GameSettings,
        title: impl Into<String>,
        mut rng: SessionRng,
    ) -> Result<Self, GameError> {
        settings.validate().map_err(GameError::InvalidSettings)?;
        let grid = Grid::from_settings(&settings);
        let snake = Snake::new(grid.center(), settings.initial_speed);

        let mut occupied: HashSet<Position> = snake.positions().iter().copied().collect();
        let apple = Item::spawn(ItemKind::Apple, &grid, &occupied, &mut rng)?;
        occupied.insert(apple.position());
        let stone = Item::spawn(ItemKind::Stone, &grid, &occupied, &mut rng)?;

        log!(
            "Session started: {}x{} board, cell {}, speed {}, seed {}",
            settings.board_width,
            settings.board_height,
            settings.cell_size,
            snake.speed(),
            rng.seed()
        );

        Ok(Self {
            settings,
            grid,
            snake,
            apple,
            stone,
            rng,
            state: GameState::Running,
            title: title.into(),
            shown_title: None,
            ticks: 0,
        })
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> &Item {
        &self.apple
    }

    pub fn stone(&self) -> &Item {
        &self.stone
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn speed(&self) -> u32 {
        self.snake.speed()
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.state, GameState::Terminated(_))
    }

    pub fn window_title(&self) -> String {
        format!(
            "{} | length {} | speed {}",
            self.title,
            self.snake.length(),
            self.snake.speed()
        )
    }

    /// Quit requests bypass the tick cycle entirely.
    pub fn quit(&mut self) {
        self.terminate(TerminationReason::Quit);
    }

    fn terminate(&mut self, reason: TerminationReason) {
        if self.is_terminated() {
            return;
        }
        match reason {
            TerminationReason::Quit => log!("Quit requested at length {}", self.snake.length()),
            TerminationReason::CrushedByStone => {
                log!("Crushed by the stone at {:?}, game over", self.stone.position())
            }
        }
        self.state = GameState::Terminated(reason);
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        let key = match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => {
                self.quit();
                return;
            }
            InputEvent::KeyDown(key) => key,
        };

        if let Some(direction) = key.direction() {
            self.snake.request_direction(direction);
            return;
        }

        let changed = match key {
            Key::SpeedUp => self.snake.speed_up(),
            Key::SlowDown => self.snake.slow_down(),
            _ => false,
        };
        if changed {
            log!("Speed set to {}", self.snake.speed());
        }
    }

    /// One full tick: drain input, turn, move, resolve items, redraw.
    /// Callers are responsible for pacing.
    pub fn tick<F: Renderer + InputSource>(
        &mut self,
        frontend: &mut F,
    ) -> Result<GameState, PlacementError> {
        match self.state {
            GameState::Terminated(_) => return Ok(self.state),
            GameState::ResetPending => self.state = GameState::Running,
            GameState::Running => {}
        }

        for event in frontend.poll_events() {
            self.handle_event(event);
            if self.is_terminated() {
                return Ok(self.state);
            }
        }

        self.snake.update_direction();
        let outcome = self
            .snake
            .advance(&self.grid, &mut self.apple, &mut self.stone, &mut self.rng)?;
        self.ticks += 1;

        match outcome {
            MoveOutcome::Moved => {}
            MoveOutcome::Grew => log!(
                "Apple eaten, length {}, apple moved to {:?}",
                self.snake.length(),
                self.apple.position()
            ),
            MoveOutcome::Shrank => log!(
                "Stone hit, length {}, stone moved to {:?}",
                self.snake.length(),
                self.stone.position()
            ),
            MoveOutcome::SelfCollision => {
                log!("Self-collision after {} ticks, snake reset", self.ticks);
                self.state = GameState::ResetPending;
            }
            MoveOutcome::CrushedByStone => self.terminate(TerminationReason::CrushedByStone),
        }

        self.render(frontend);
        Ok(self.state)
    }

    /// Blocking loop: wait for the tick boundary, then tick, until terminated.
    pub fn run<F: Renderer + InputSource + Pacer>(
        &mut self,
        frontend: &mut F,
    ) -> Result<TerminationReason, PlacementError> {
        self.render_full(frontend);
        loop {
            if let GameState::Terminated(reason) = self.state {
                return Ok(reason);
            }
            frontend.tick(self.snake.speed());
            self.tick(frontend)?;
        }
    }

    /// Paints the whole board, used for the first frame.
    pub fn render_full<R: Renderer>(&mut self, renderer: &mut R) {
        for cell in self.grid.all_cells() {
            renderer.erase_cell(*cell);
        }
        self.render(renderer);
    }

    fn render<R: Renderer>(&mut self, renderer: &mut R) {
        for cell in self.snake.take_vacated() {
            renderer.erase_cell(cell);
        }

        let palette = &self.settings.palette;
        let radius = self.grid.cell_size() as f32 / 2.0;
        let entities: [&dyn Entity; 3] = [&self.snake, &self.apple, &self.stone];
        for entity in entities {
            let shape = entity.shape(palette);
            for cell in entity.occupied() {
                match shape {
                    Shape::Cell { fill, border } => renderer.draw_cell(cell, fill, border),
                    Shape::Disc { fill, outline } => {
                        let center = (cell.x as f32 + radius, cell.y as f32 + radius);
                        renderer.draw_circle_with_outline(center, radius, fill, outline);
                    }
                }
            }
        }

        let title = self.window_title();
        if self.shown_title.as_deref() != Some(title.as_str()) {
            renderer.set_window_title(&title);
            self.shown_title = Some(title);
        }

        renderer.present();
    }

    #[cfg(test)]
    pub(crate) fn with_entities(
        settings: GameSettings,
        snake: Snake,
        apple: Position,
        stone: Position,
    ) -> Self {
        let grid = Grid::from_settings(&settings);
        Self {
            settings,
            grid,
            snake,
            apple: Item::at(ItemKind::Apple, apple),
            stone: Item::at(ItemKind::Stone, stone),
            rng: SessionRng::new(42),
            state: GameState::Running,
            title: "Snake".to_string(),
            shown_title: None,
            ticks: 0,
        }
    }
}
