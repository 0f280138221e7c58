use super::{
    config::GameConfig,
    direction::Direction,
    state::{Cell, CollisionType, GameState, GameStatus, Snake},
};
use rand::Rng;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Collision that ended the game, if any
    pub collision: Option<CollisionType>,
}

impl TickOutcome {
    fn none() -> Self {
        Self {
            ate_food: false,
            collision: None,
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// State shown before the first start action: the snake is placed but
    /// nothing ticks until `start`
    pub fn initial_state(&mut self) -> GameState {
        let snake = self.fresh_snake();
        let food = self.spawn_food(&snake);
        let mut state = GameState::new(snake, food, self.config.grid_size);
        state.status = GameStatus::Idle;
        state
    }

    /// Begin a game: single-cell snake at the grid centre heading right,
    /// score zero, fresh food. Used for both start and restart.
    pub fn start(&mut self, state: &mut GameState) {
        let snake = self.fresh_snake();
        let food = self.spawn_food(&snake);
        *state = GameState::new(snake, food, self.config.grid_size);
    }

    /// Advance the game by one tick.
    ///
    /// The queued direction intent is committed first unless it reverses
    /// the committed direction. A collision flips the state to GameOver and
    /// leaves the snake exactly as it was.
    pub fn tick(&mut self, state: &mut GameState, intent: Option<Direction>) -> TickOutcome {
        if state.status != GameStatus::Playing {
            return TickOutcome::none();
        }

        if let Some(wanted) = intent {
            if !state.snake.direction.is_opposite(wanted) {
                state.snake.direction = wanted;
            }
        }

        let candidate = state.snake.head().neighbor(state.snake.direction);

        if !state.in_bounds(candidate) {
            state.status = GameStatus::GameOver;
            return TickOutcome {
                ate_food: false,
                collision: Some(CollisionType::Wall),
            };
        }

        if state.snake.occupies(candidate) {
            state.status = GameStatus::GameOver;
            return TickOutcome {
                ate_food: false,
                collision: Some(CollisionType::SelfCollision),
            };
        }

        let ate_food = candidate == state.food;
        state.snake.advance(ate_food);

        if ate_food {
            state.score += self.config.points_per_food;
            state.food = self.spawn_food(&state.snake);
        }

        TickOutcome {
            ate_food,
            collision: None,
        }
    }

    fn fresh_snake(&self) -> Snake {
        let center = (self.config.grid_size / 2) as i32;
        Snake::new(Cell::new(center, center), Direction::Right, 1)
    }

    /// Sample uniformly random cells until one misses the snake
    fn spawn_food(&mut self, snake: &Snake) -> Cell {
        let size = self.config.grid_size as i32;
        loop {
            let cell = Cell::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
            if !snake.occupies(cell) {
                return cell;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_state(engine: &mut GameEngine) -> GameState {
        let mut state = engine.initial_state();
        engine.start(&mut state);
        state
    }

    #[test]
    fn test_initial_state_is_idle() {
        let mut engine = GameEngine::new(GameConfig::default());
        let state = engine.initial_state();

        assert_eq!(state.status, GameStatus::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.body, vec![Cell::new(7, 7)]);
        assert_eq!(state.snake.direction, Direction::Right);
        assert!(state.in_bounds(state.food));
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn test_start_resets_everything() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = playing_state(&mut engine);

        state.score = 70;
        state.status = GameStatus::GameOver;
        engine.start(&mut state);

        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Cell::new(7, 7));
        assert_eq!(state.snake.direction, Direction::Right);
    }

    #[test]
    fn test_tick_is_noop_unless_playing() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = engine.initial_state();
        let before = state.clone();

        let outcome = engine.tick(&mut state, Some(Direction::Up));
        assert_eq!(outcome, TickOutcome::none());
        assert_eq!(state, before);

        state.status = GameStatus::GameOver;
        let before = state.clone();
        let outcome = engine.tick(&mut state, None);
        assert_eq!(outcome, TickOutcome::none());
        assert_eq!(state, before);
    }

    #[test]
    fn test_basic_movement_keeps_length() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = playing_state(&mut engine);
        state.food = Cell::new(0, 0);

        let outcome = engine.tick(&mut state, None);

        assert!(outcome.collision.is_none());
        assert!(!outcome.ate_food);
        assert_eq!(state.snake.body, vec![Cell::new(8, 7)]);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_food_consumption_grows_and_scores() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = playing_state(&mut engine);

        state.food = state.snake.head().neighbor(state.snake.direction);
        let initial_length = state.snake.len();

        let outcome = engine.tick(&mut state, None);

        assert!(outcome.ate_food);
        assert_eq!(state.score, 10);
        assert_eq!(state.snake.len(), initial_length + 1);
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn test_food_respawn_avoids_snake() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = playing_state(&mut engine);

        // Feed the snake along a staircase path and check the invariant
        // after every regeneration.
        let path = [
            Direction::Right,
            Direction::Down,
            Direction::Right,
            Direction::Down,
            Direction::Right,
            Direction::Down,
        ];
        for &step in &path {
            state.food = state.snake.head().neighbor(step);
            let outcome = engine.tick(&mut state, Some(step));
            assert!(outcome.ate_food);
            assert!(!state.snake.occupies(state.food));
        }
        assert_eq!(state.snake.len(), 7);
        assert_eq!(state.score, 60);
    }

    #[test]
    fn test_wall_collision_leaves_snake_unchanged() {
        let mut engine = GameEngine::new(GameConfig::default());
        let snake = Snake::new(Cell::new(0, 7), Direction::Left, 1);
        let mut state = GameState::new(snake, Cell::new(5, 5), 15);
        let body_before = state.snake.body.clone();

        let outcome = engine.tick(&mut state, None);

        assert_eq!(outcome.collision, Some(CollisionType::Wall));
        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.snake.body, body_before);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = GameEngine::new(GameConfig::default());

        // Snake at (5, 5) going Right with length 4, then a tight loop:
        // Right, Down, Left, Up lands the candidate head back on the body.
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 4);
        let mut state = GameState::new(snake, Cell::new(12, 12), 15);

        engine.tick(&mut state, None);
        engine.tick(&mut state, Some(Direction::Down));
        engine.tick(&mut state, Some(Direction::Left));
        let body_before = state.snake.body.clone();
        let outcome = engine.tick(&mut state, Some(Direction::Up));

        assert_eq!(outcome.collision, Some(CollisionType::SelfCollision));
        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.snake.body, body_before);
    }

    #[test]
    fn test_opposite_intent_never_changes_direction() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = playing_state(&mut engine);
        state.food = Cell::new(0, 0);
        assert_eq!(state.snake.direction, Direction::Right);

        for _ in 0..3 {
            engine.tick(&mut state, Some(Direction::Left));
            assert_eq!(state.snake.direction, Direction::Right);
        }
    }

    #[test]
    fn test_perpendicular_intent_is_committed() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = playing_state(&mut engine);
        state.food = Cell::new(0, 0);

        engine.tick(&mut state, Some(Direction::Down));

        assert_eq!(state.snake.direction, Direction::Down);
        assert_eq!(state.snake.head(), Cell::new(7, 8));
    }

    #[test]
    fn test_invariants_hold_over_random_play() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = playing_state(&mut engine);
        let mut rng = rand::thread_rng();
        let directions = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];

        let mut last_score = 0;
        for _ in 0..500 {
            if state.status == GameStatus::GameOver {
                engine.start(&mut state);
                last_score = 0;
            }

            let intent = directions[rng.gen_range(0..directions.len())];
            engine.tick(&mut state, Some(intent));

            assert!(!state.snake.is_empty());
            assert!(state.score >= last_score);
            last_score = state.score;
            if state.status == GameStatus::Playing {
                for &cell in &state.snake.body {
                    assert!(state.in_bounds(cell));
                }
                assert!(!state.snake.occupies(state.food));
            }
        }
    }
}
