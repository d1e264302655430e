use std::collections::{HashSet, VecDeque};

use crate::games::SessionRng;
use super::entity::{Entity, Shape};
use super::grid::Grid;
use super::item::{Item, PlacementError};
use super::settings::{MAX_SPEED, MIN_SPEED};
use super::types::{Direction, Palette, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Grew,
    Shrank,
    /// The head ran into the body; the snake is back at its starting state.
    SelfCollision,
    /// A one-segment snake hit the stone. The session is over.
    CrushedByStone,
}

#[derive(Clone, Debug)]
pub struct Snake {
    positions: VecDeque<Position>,
    direction: Direction,
    next_direction: Option<Direction>,
    length: usize,
    last: Option<Position>,
    vacated: Vec<Position>,
    speed: u32,
    start: Position,
    initial_speed: u32,
}

impl Snake {
    pub fn new(start: Position, initial_speed: u32) -> Self {
        let initial_speed = initial_speed.clamp(MIN_SPEED, MAX_SPEED);
        Self {
            positions: VecDeque::from([start]),
            direction: Direction::Right,
            next_direction: None,
            length: 1,
            last: None,
            vacated: Vec::new(),
            speed: initial_speed,
            start,
            initial_speed,
        }
    }

    pub fn head(&self) -> Position {
        *self.positions.front().expect("Snake body should never be empty")
    }

    pub fn positions(&self) -> &VecDeque<Position> {
        &self.positions
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Option<Direction> {
        self.next_direction
    }

    pub fn last(&self) -> Option<Position> {
        self.last
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Queues a turn for the next tick. A reversal of the current direction is
    /// dropped, otherwise the head would run straight into the neck.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(self.direction) {
            return false;
        }
        self.next_direction = Some(direction);
        true
    }

    pub fn update_direction(&mut self) {
        if let Some(direction) = self.next_direction.take() {
            self.direction = direction;
        }
    }

    pub fn speed_up(&mut self) -> bool {
        self.set_speed(self.speed + 1)
    }

    pub fn slow_down(&mut self) -> bool {
        self.set_speed(self.speed.saturating_sub(1))
    }

    fn set_speed(&mut self, speed: u32) -> bool {
        let speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        let changed = speed != self.speed;
        self.speed = speed;
        changed
    }

    /// Back to one segment at the start cell, heading right at the initial speed.
    /// Cells still waiting to be erased are kept.
    pub fn reset(&mut self) {
        self.positions.clear();
        self.positions.push_back(self.start);
        self.direction = Direction::Right;
        self.next_direction = None;
        self.length = 1;
        self.last = None;
        self.speed = self.initial_speed;
    }

    /// Cells the snake left since the previous call, for the renderer to erase.
    pub fn take_vacated(&mut self) -> Vec<Position> {
        self.last = None;
        std::mem::take(&mut self.vacated)
    }

    fn vacate_tail(&mut self) {
        let tail = self
            .positions
            .pop_back()
            .expect("Snake body should never be empty");
        self.last = Some(tail);
        self.vacated.push(tail);
    }

    fn occupied_with(&self, extra: &[Position]) -> HashSet<Position> {
        self.positions
            .iter()
            .chain(extra.iter())
            .copied()
            .collect()
    }

    /// One step in the current direction, resolving apple, body and stone in
    /// that order.
    pub fn advance(
        &mut self,
        grid: &Grid,
        apple: &mut Item,
        stone: &mut Item,
        rng: &mut SessionRng,
    ) -> Result<MoveOutcome, PlacementError> {
        let new_head = grid.step(self.head(), self.direction);

        let grew = new_head == apple.position();
        if grew {
            let excluded = self.occupied_with(&[new_head, stone.position()]);
            apple.reset(grid, &excluded, rng)?;
            self.length += 1;
        } else {
            self.vacate_tail();
        }

        if self.positions.contains(&new_head) {
            self.vacated.extend(self.positions.iter().copied());
            self.reset();
            return Ok(MoveOutcome::SelfCollision);
        }

        self.positions.push_front(new_head);

        if new_head == stone.position() {
            if self.length == 1 {
                return Ok(MoveOutcome::CrushedByStone);
            }
            let excluded = self.occupied_with(&[apple.position()]);
            stone.reset(grid, &excluded, rng)?;
            self.length -= 1;
            self.vacate_tail();
            return Ok(MoveOutcome::Shrank);
        }

        Ok(if grew { MoveOutcome::Grew } else { MoveOutcome::Moved })
    }

    #[cfg(test)]
    pub(crate) fn with_body(
        body: &[Position],
        direction: Direction,
        initial_speed: u32,
        start: Position,
    ) -> Self {
        let mut snake = Self::new(start, initial_speed);
        snake.positions = body.iter().copied().collect();
        snake.length = body.len();
        snake.direction = direction;
        snake
    }
}

impl Entity for Snake {
    fn occupied(&self) -> Vec<Position> {
        self.positions.iter().copied().collect()
    }

    fn shape(&self, palette: &Palette) -> Shape {
        Shape::Cell {
            fill: palette.snake,
            border: palette.border,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::item::ItemKind;

    const CELL: i32 = 20;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn grid() -> Grid {
        Grid::new(640, 480, CELL)
    }

    fn items(apple: Position, stone: Position) -> (Item, Item) {
        (Item::at(ItemKind::Apple, apple), Item::at(ItemKind::Stone, stone))
    }

    fn snake(body: &[Position], direction: Direction) -> Snake {
        Snake::with_body(body, direction, 4, grid().center())
    }

    fn assert_consistent(snake: &Snake) {
        assert_eq!(snake.length(), snake.positions().len());
        let unique: HashSet<Position> = snake.positions().iter().copied().collect();
        assert_eq!(unique.len(), snake.positions().len());
    }

    #[test]
    fn test_new_snake_is_fresh() {
        let snake = Snake::new(p(320, 240), 4);
        assert_eq!(snake.head(), p(320, 240));
        assert_eq!(snake.length(), 1);
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.next_direction(), None);
        assert_eq!(snake.last(), None);
        assert_eq!(snake.speed(), 4);
    }

    #[test]
    fn test_wrap_on_every_edge() {
        let cases = [
            (p(620, 100), Direction::Right, p(0, 100)),
            (p(0, 100), Direction::Left, p(620, 100)),
            (p(100, 0), Direction::Up, p(100, 460)),
            (p(100, 460), Direction::Down, p(100, 0)),
        ];
        for (start, direction, expected) in cases {
            let mut rng = SessionRng::new(42);
            let mut snake = snake(&[start], direction);
            let (mut apple, mut stone) = items(p(300, 300), p(400, 400));
            let outcome = snake.advance(&grid(), &mut apple, &mut stone, &mut rng).unwrap();
            assert_eq!(outcome, MoveOutcome::Moved);
            assert_eq!(snake.head(), expected);
        }
    }

    #[test]
    fn test_plain_move_keeps_length_and_records_tail() {
        let mut rng = SessionRng::new(42);
        let mut snake = snake(&[p(100, 100), p(80, 100), p(60, 100)], Direction::Right);
        let (mut apple, mut stone) = items(p(300, 300), p(400, 400));

        let outcome = snake.advance(&grid(), &mut apple, &mut stone, &mut rng).unwrap();

        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(
            snake.positions().iter().copied().collect::<Vec<_>>(),
            vec![p(120, 100), p(100, 100), p(80, 100)]
        );
        assert_eq!(snake.last(), Some(p(60, 100)));
        assert_eq!(snake.take_vacated(), vec![p(60, 100)]);
        assert_eq!(snake.last(), None);
        assert_consistent(&snake);
    }

    #[test]
    fn test_eating_apple_grows_and_relocates_apple() {
        let mut rng = SessionRng::new(42);
        let mut snake = snake(&[p(100, 100)], Direction::Right);
        let (mut apple, mut stone) = items(p(120, 100), p(400, 400));

        let outcome = snake.advance(&grid(), &mut apple, &mut stone, &mut rng).unwrap();

        assert_eq!(outcome, MoveOutcome::Grew);
        assert_eq!(snake.head(), p(120, 100));
        assert_eq!(snake.length(), 2);
        assert!(snake.take_vacated().is_empty());
        assert!(![p(100, 100), p(120, 100), stone.position()].contains(&apple.position()));
        assert!(grid().contains(apple.position()));
        assert_consistent(&snake);
    }

    #[test]
    fn test_growth_over_many_seeds_never_lands_apple_on_body_or_stone() {
        for seed in 0..50 {
            let mut rng = SessionRng::new(seed);
            let grid = Grid::new(100, 20, CELL);
            let mut snake = Snake::with_body(&[p(40, 0), p(20, 0)], Direction::Right, 4, p(40, 0));
            let (mut apple, mut stone) = items(p(60, 0), p(0, 0));
            assert_eq!(
                snake.advance(&grid, &mut apple, &mut stone, &mut rng).unwrap(),
                MoveOutcome::Grew
            );
            assert_eq!(apple.position(), p(80, 0));
        }
    }

    #[test]
    fn test_stone_shrinks_snake_and_relocates_stone() {
        let mut rng = SessionRng::new(42);
        let mut snake = snake(&[p(100, 100), p(80, 100), p(60, 100)], Direction::Right);
        let (mut apple, mut stone) = items(p(300, 300), p(120, 100));

        let outcome = snake.advance(&grid(), &mut apple, &mut stone, &mut rng).unwrap();

        assert_eq!(outcome, MoveOutcome::Shrank);
        assert_eq!(snake.length(), 2);
        assert_eq!(
            snake.positions().iter().copied().collect::<Vec<_>>(),
            vec![p(120, 100), p(100, 100)]
        );
        assert_eq!(snake.take_vacated(), vec![p(60, 100), p(80, 100)]);
        assert!(!snake.positions().contains(&stone.position()));
        assert_ne!(stone.position(), apple.position());
        assert_ne!(stone.position(), p(120, 100));
        assert_consistent(&snake);
    }

    #[test]
    fn test_stone_at_length_one_is_fatal() {
        let mut rng = SessionRng::new(42);
        let mut snake = snake(&[p(100, 100)], Direction::Right);
        let (mut apple, mut stone) = items(p(300, 300), p(120, 100));

        let outcome = snake.advance(&grid(), &mut apple, &mut stone, &mut rng).unwrap();

        assert_eq!(outcome, MoveOutcome::CrushedByStone);
        assert_eq!(stone.position(), p(120, 100));
    }

    #[test]
    fn test_self_collision_resets_to_fresh_state() {
        let mut rng = SessionRng::new(42);
        let body = [p(100, 100), p(100, 120), p(80, 120), p(80, 100), p(60, 100)];
        let mut snake = snake(&body, Direction::Left);
        snake.speed_up();
        snake.request_direction(Direction::Up);
        let (mut apple, mut stone) = items(p(300, 300), p(400, 400));

        let outcome = snake.advance(&grid(), &mut apple, &mut stone, &mut rng).unwrap();

        assert_eq!(outcome, MoveOutcome::SelfCollision);
        assert_eq!(snake.length(), 1);
        assert_eq!(snake.head(), grid().center());
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.next_direction(), None);
        assert_eq!(snake.speed(), 4);
        let vacated: HashSet<Position> = snake.take_vacated().into_iter().collect();
        assert_eq!(vacated, body.iter().copied().collect());
    }

    #[test]
    fn test_moving_into_vacated_tail_is_not_a_collision() {
        let mut rng = SessionRng::new(42);
        let body = [p(100, 100), p(100, 120), p(80, 120), p(80, 100)];
        let mut snake = snake(&body, Direction::Left);
        let (mut apple, mut stone) = items(p(300, 300), p(400, 400));

        let outcome = snake.advance(&grid(), &mut apple, &mut stone, &mut rng).unwrap();

        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(snake.head(), p(80, 100));
        assert_consistent(&snake);
    }

    #[test]
    fn test_reverse_direction_request_is_ignored() {
        let mut snake = snake(&[p(100, 100)], Direction::Right);
        assert!(!snake.request_direction(Direction::Left));
        assert_eq!(snake.next_direction(), None);

        assert!(snake.request_direction(Direction::Up));
        assert!(!snake.request_direction(Direction::Left));
        assert_eq!(snake.next_direction(), Some(Direction::Up));
    }

    #[test]
    fn test_update_direction_consumes_pending() {
        let mut snake = snake(&[p(100, 100)], Direction::Right);
        snake.update_direction();
        assert_eq!(snake.direction(), Direction::Right);

        snake.request_direction(Direction::Down);
        snake.update_direction();
        assert_eq!(snake.direction(), Direction::Down);
        assert_eq!(snake.next_direction(), None);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut snake = Snake::new(p(0, 0), 4);
        for _ in 0..50 {
            snake.speed_up();
        }
        assert_eq!(snake.speed(), MAX_SPEED);
        assert!(!snake.speed_up());
        for _ in 0..50 {
            snake.slow_down();
        }
        assert_eq!(snake.speed(), MIN_SPEED);
        assert!(!snake.slow_down());
    }

    #[test]
    fn test_apple_placement_error_propagates() {
        let mut rng = SessionRng::new(42);
        let grid = Grid::new(60, 20, CELL);
        let mut snake = Snake::with_body(&[p(20, 0), p(0, 0)], Direction::Right, 4, p(20, 0));
        let (mut apple, mut stone) = items(p(40, 0), p(40, 0));
        let result = snake.advance(&grid, &mut apple, &mut stone, &mut rng);
        assert!(matches!(result, Err(PlacementError::NoFreeCell { .. })));
    }
}
