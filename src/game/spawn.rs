//! Placement of food and wall cells.
//!
//! Free cells are enumerated up front and one is drawn uniformly, so placement
//! always terminates: a board with no room left yields [`SpawnError::BoardFull`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::state::{GameState, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("no free cell left on the {grid_size}x{grid_size} board")]
    BoardFull { grid_size: usize },
}

/// Random placement of food and walls on free cells
pub struct Spawner {
    rng: StdRng,
}

impl Spawner {
    /// Seeded spawners produce the same placements for the same game
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Cells not covered by snake, food, walls or `reserved`
    pub fn free_cells(state: &GameState, reserved: &[Position]) -> Vec<Position> {
        let size = state.grid_size as i32;
        (0..size)
            .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
            .filter(|pos| !state.is_occupied(*pos) && !reserved.contains(pos))
            .collect()
    }

    fn pick(&mut self, state: &GameState, reserved: &[Position]) -> Result<Position, SpawnError> {
        let free = Self::free_cells(state, reserved);
        if free.is_empty() {
            return Err(SpawnError::BoardFull {
                grid_size: state.grid_size,
            });
        }
        Ok(free[self.rng.gen_range(0..free.len())])
    }

    /// Replace the food set with `count` fresh cells
    ///
    /// Each cell is checked against the ones already placed in this call, so
    /// the new food cells never coincide.
    pub fn spawn_food(&mut self, state: &mut GameState, count: usize) -> Result<(), SpawnError> {
        state.food.clear();
        let mut placed = Vec::with_capacity(count);
        for _ in 0..count {
            let cell = self.pick(state, &placed)?;
            placed.push(cell);
        }
        state.food = placed;
        Ok(())
    }

    /// Add one wall cell
    pub fn spawn_wall(&mut self, state: &mut GameState) -> Result<Position, SpawnError> {
        let cell = self.pick(state, &[])?;
        state.walls.push(cell);
        Ok(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::mode::GameMode;
    use crate::game::state::Snake;

    fn empty_state(grid_size: usize) -> GameState {
        GameState::new(Snake::new(Position::new(0, 0)), Vec::new(), GameMode::Classic, grid_size)
    }

    #[test]
    fn test_free_cells_excludes_everything_occupied() {
        let mut state = empty_state(3);
        state.food.push(Position::new(1, 1));
        state.walls.push(Position::new(2, 2));

        let free = Spawner::free_cells(&state, &[Position::new(2, 0)]);
        assert_eq!(free.len(), 9 - 4);
        assert!(!free.contains(&Position::new(0, 0)));
        assert!(!free.contains(&Position::new(1, 1)));
        assert!(!free.contains(&Position::new(2, 2)));
        assert!(!free.contains(&Position::new(2, 0)));
    }

    #[test]
    fn test_food_lands_on_free_cell() {
        let mut spawner = Spawner::new(Some(1));
        let mut state = empty_state(20);
        state.snake = Snake::from_segments(vec![
            Position::new(10, 10),
            Position::new(9, 10),
            Position::new(8, 10),
        ]);
        state.walls = vec![Position::new(3, 3), Position::new(4, 4)];

        for _ in 0..200 {
            spawner.spawn_food(&mut state, 1).unwrap();
            assert_eq!(state.food.len(), 1);
            let food = state.food[0];
            assert!(state.is_in_bounds(food));
            assert!(!state.snake.contains(food));
            assert!(!state.walls.contains(&food));
        }
    }

    #[test]
    fn test_portal_food_cells_are_distinct() {
        let mut spawner = Spawner::new(Some(2));
        let mut state = empty_state(3);

        for _ in 0..100 {
            spawner.spawn_food(&mut state, 2).unwrap();
            assert_eq!(state.food.len(), 2);
            assert_ne!(state.food[0], state.food[1]);
            assert!(!state.snake.contains(state.food[0]));
            assert!(!state.snake.contains(state.food[1]));
        }
    }

    #[test]
    fn test_last_free_cell_is_found() {
        let mut spawner = Spawner::new(Some(3));
        let mut state = empty_state(2);
        state.snake = Snake::from_segments(vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
        ]);

        spawner.spawn_food(&mut state, 1).unwrap();
        assert_eq!(state.food, vec![Position::new(0, 1)]);
    }

    #[test]
    fn test_full_board_reports_error() {
        let mut spawner = Spawner::new(Some(4));
        let mut state = empty_state(2);
        state.snake = Snake::from_segments(vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
            Position::new(0, 1),
        ]);

        assert_eq!(
            spawner.spawn_food(&mut state, 1),
            Err(SpawnError::BoardFull { grid_size: 2 })
        );
        assert_eq!(
            spawner.spawn_wall(&mut state),
            Err(SpawnError::BoardFull { grid_size: 2 })
        );
        assert!(state.walls.is_empty());
    }

    #[test]
    fn test_portal_needs_two_free_cells() {
        let mut spawner = Spawner::new(Some(5));
        let mut state = empty_state(2);
        state.snake = Snake::from_segments(vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
        ]);

        assert!(spawner.spawn_food(&mut state, 2).is_err());
    }

    #[test]
    fn test_walls_avoid_snake_food_and_walls() {
        let mut spawner = Spawner::new(Some(6));
        let mut state = empty_state(4);
        state.food = vec![Position::new(3, 3)];

        for _ in 0..14 {
            let wall = spawner.spawn_wall(&mut state).unwrap();
            assert_ne!(wall, Position::new(0, 0));
            assert_ne!(wall, Position::new(3, 3));
        }
        let mut walls = state.walls.clone();
        walls.sort_by_key(|p| (p.x, p.y));
        walls.dedup();
        assert_eq!(walls.len(), 14);

        assert!(spawner.spawn_wall(&mut state).is_err());
    }

    #[test]
    fn test_same_seed_same_placement() {
        let mut a = Spawner::new(Some(42));
        let mut b = Spawner::new(Some(42));
        let mut state_a = empty_state(20);
        let mut state_b = empty_state(20);

        for _ in 0..10 {
            a.spawn_food(&mut state_a, 2).unwrap();
            b.spawn_food(&mut state_b, 2).unwrap();
            assert_eq!(state_a.food, state_b.food);
        }
    }
}
