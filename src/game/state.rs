use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::mode::GameMode;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Fold the position back onto a toroidal grid of the given size
    pub fn wrapped(&self, grid_size: usize) -> Self {
        let size = grid_size as i32;
        Self {
            x: self.x.rem_euclid(size),
            y: self.y.rem_euclid(size),
        }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Create a snake from explicit segments, head first
    pub fn from_segments(body: Vec<Position>) -> Self {
        debug_assert!(!body.is_empty(), "snake needs at least a head");
        Self { body }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn push_head(&mut self, head: Position) {
        self.body.insert(0, head);
    }

    /// Move the head onto another cell without touching the rest of the body
    pub fn relocate_head(&mut self, head: Position) {
        self.body[0] = head;
    }

    /// Drop the tail segment, never removing the head
    pub fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Current and best score of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub current: u32,
    pub best: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero the current score; best is kept
    pub fn reset_current(&mut self) {
        self.current = 0;
    }

    /// Record the score of the running game, raising best when exceeded
    pub fn record(&mut self, score: u32) {
        self.current = score;
        if score > self.best {
            self.best = score;
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Vec<Position>,
    pub walls: Vec<Position>,
    pub mode: GameMode,
    pub grid_size: usize,
    pub score: u32,
    pub steps: u32,
    pub is_alive: bool,
}

impl GameState {
    /// Create a new game state with no walls
    pub fn new(snake: Snake, food: Vec<Position>, mode: GameMode, grid_size: usize) -> Self {
        Self {
            snake,
            food,
            walls: Vec::new(),
            mode,
            grid_size,
            score: 0,
            steps: 0,
            is_alive: true,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.grid_size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.contains(pos)
    }

    /// Check if a position holds snake, food or wall
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.snake.contains(pos) || self.food.contains(&pos) || self.walls.contains(&pos)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.body.clone(),
            food: self.food.clone(),
            walls: self.walls.clone(),
            mode: self.mode,
        }
    }
}

/// What the renderer needs to draw one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Snake cells, head first
    pub snake: Vec<Position>,
    pub food: Vec<Position>,
    pub walls: Vec<Position>,
    pub mode: GameMode,
}

impl Snapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
    }

    #[test]
    fn test_position_wrapping() {
        assert_eq!(Position::new(-1, 10).wrapped(20), Position::new(19, 10));
        assert_eq!(Position::new(20, 10).wrapped(20), Position::new(0, 10));
        assert_eq!(Position::new(3, -1).wrapped(20), Position::new(3, 19));
        assert_eq!(Position::new(3, 20).wrapped(20), Position::new(3, 0));
        assert_eq!(Position::new(7, 8).wrapped(20), Position::new(7, 8));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(10, 10));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(10, 10));
        assert_eq!(snake.tail(), Position::new(10, 10));
        assert!(snake.body_segments().is_empty());
    }

    #[test]
    fn test_snake_grow_and_shrink() {
        let mut snake = Snake::new(Position::new(5, 5));

        snake.push_head(Position::new(6, 5));
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(5, 5));

        snake.pop_tail();
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(6, 5));

        // The head is never popped
        snake.pop_tail();
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::from_segments(vec![
            Position::new(5, 5),
            Position::new(4, 5),
            Position::new(3, 5),
        ]);
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(10, 10))); // empty
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5)),
            vec![Position::new(10, 10)],
            GameMode::Classic,
            20,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_occupancy() {
        let mut state = GameState::new(
            Snake::new(Position::new(5, 5)),
            vec![Position::new(10, 10)],
            GameMode::Walls,
            20,
        );
        state.walls.push(Position::new(2, 2));

        assert!(state.is_occupied(Position::new(5, 5)));
        assert!(state.is_occupied(Position::new(10, 10)));
        assert!(state.is_occupied(Position::new(2, 2)));
        assert!(!state.is_occupied(Position::new(0, 0)));
    }

    #[test]
    fn test_scoreboard_best_never_decreases() {
        let mut scores = Scoreboard::new();
        scores.record(3);
        assert_eq!(scores, Scoreboard { current: 3, best: 3 });

        scores.reset_current();
        assert_eq!(scores.current, 0);
        assert_eq!(scores.best, 3);

        scores.record(1);
        assert_eq!(scores, Scoreboard { current: 1, best: 3 });

        scores.record(5);
        assert_eq!(scores.best, 5);
    }

    #[test]
    fn test_snapshot_copies_cells() {
        let mut state = GameState::new(
            Snake::from_segments(vec![Position::new(1, 1), Position::new(0, 1)]),
            vec![Position::new(4, 4)],
            GameMode::Walls,
            20,
        );
        state.walls.push(Position::new(7, 7));

        let snapshot = state.snapshot();
        assert_eq!(snapshot.head(), Some(Position::new(1, 1)));
        assert_eq!(snapshot.snake.len(), 2);
        assert_eq!(snapshot.food, vec![Position::new(4, 4)]);
        assert_eq!(snapshot.walls, vec![Position::new(7, 7)]);
        assert_eq!(snapshot.mode, GameMode::Walls);
    }
}
