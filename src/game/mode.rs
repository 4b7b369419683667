use serde::{Deserialize, Serialize};

/// Rule set a game is played under. Fixed for the whole game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Classic,
    /// Every food eaten shortens the tick interval
    Speed,
    /// Edges wrap around and the snake may cross itself; walls still kill
    NoDie,
    /// Two food cells; eating one teleports the head onto the other
    Portal,
    /// Every food eaten adds a wall cell
    Walls,
}

impl GameMode {
    pub const ALL: [GameMode; 5] = [
        GameMode::Classic,
        GameMode::Speed,
        GameMode::NoDie,
        GameMode::Portal,
        GameMode::Walls,
    ];

    /// Number of food cells kept on the board
    pub fn food_count(&self, portal_food_count: usize) -> usize {
        match self {
            GameMode::Portal => portal_food_count,
            _ => 1,
        }
    }

    /// Whether leaving the grid wraps onto the opposite edge
    pub fn wraps_edges(&self) -> bool {
        matches!(self, GameMode::NoDie)
    }

    /// Whether running into the snake's own body ends the game
    pub fn self_collision_is_lethal(&self) -> bool {
        !matches!(self, GameMode::NoDie)
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::Speed => "Speed",
            GameMode::NoDie => "No Die",
            GameMode::Portal => "Portal",
            GameMode::Walls => "Walls",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameMode::Classic => "Eat, grow, avoid the edges and yourself",
            GameMode::Speed => "Each meal makes the snake 10% faster",
            GameMode::NoDie => "Edges wrap around, crossing yourself is fine",
            GameMode::Portal => "Eat one food to jump to the other",
            GameMode::Walls => "Each meal leaves a wall behind",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    pub fn next(&self) -> GameMode {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> GameMode {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}
