//! Authoritative world state and the per-tick simulation pipeline.

use crate::entity::Snake;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::{CellKind, Direction, Position, SnapshotCell};

/// The shared game world: one snake per connected player plus the fruit
/// list. Mutated only by the tick loop; player intents arrive through
/// [`World::turn`].
pub struct World {
    /// Indexed by player id; iteration order is ascending id, which makes
    /// simultaneous-collision tie-breaks deterministic.
    snakes: Vec<Snake>,
    /// Spawn positions are never checked for overlap, so duplicates with
    /// bodies or other fruits are possible (matching the reference
    /// behavior).
    fruits: Vec<Position>,
    grid_width: i32,
    grid_height: i32,
    desired_fruit_count: usize,
    rng: StdRng,
}

impl World {
    pub fn new(grid_width: i32, grid_height: i32, desired_fruit_count: usize) -> Self {
        Self::with_rng(
            grid_width,
            grid_height,
            desired_fruit_count,
            StdRng::from_entropy(),
        )
    }

    /// Seedable constructor for deterministic tests.
    pub fn with_rng(
        grid_width: i32,
        grid_height: i32,
        desired_fruit_count: usize,
        rng: StdRng,
    ) -> Self {
        Self {
            snakes: Vec::new(),
            fruits: Vec::new(),
            grid_width,
            grid_height,
            desired_fruit_count,
            rng,
        }
    }

    pub fn num_players(&self) -> usize {
        self.snakes.len()
    }

    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    pub fn fruits(&self) -> &[Position] {
        &self.fruits
    }

    /// Spawns the snake for a newly accepted player slot. Slots are
    /// assigned in accept order, so ids always equal the vector index.
    pub fn add_snake(&mut self, player_id: usize) {
        debug_assert_eq!(player_id, self.snakes.len());
        let snake = Snake::new(1, 1 + 2 * player_id as i32, player_id);
        info!(
            "Player {} spawned at ({}, {})",
            player_id,
            snake.head().x,
            snake.head().y
        );
        self.snakes.push(snake);
    }

    /// Records a player's turn intent for the next tick. Out-of-range
    /// player ids and dead snakes are silent no-ops.
    pub fn turn(&mut self, player: usize, dir: Direction) {
        if let Some(snake) = self.snakes.get_mut(player) {
            snake.turn(dir);
        }
    }

    /// Appends a fruit unconditionally; no overlap check.
    pub fn spawn_fruit(&mut self, x: i32, y: i32) {
        self.fruits.push(Position::new(x, y));
    }

    /// Advances the world one tick. Returns `true` when the game is over,
    /// i.e. at least one snake died; the caller is expected to stop
    /// driving ticks.
    ///
    /// Strict order: every snake moves (ascending player id), then every
    /// snake is checked against the others' bodies, then fruit is
    /// replenished by at most one per tick.
    pub fn tick(&mut self) -> bool {
        let Self {
            snakes,
            fruits,
            grid_width,
            grid_height,
            ..
        } = self;
        for snake in snakes.iter_mut() {
            snake.advance(fruits, *grid_width, *grid_height);
        }

        for i in 0..self.snakes.len() {
            let hit = self.snakes[i].alive && self.snakes[i].collides_with_any(&self.snakes);
            if hit {
                self.snakes[i].alive = false;
            }
        }

        let game_over = self.snakes.iter().any(|s| !s.alive);

        if self.fruits.len() < self.desired_fruit_count {
            let x = self.rng.gen_range(0..self.grid_width);
            let y = self.rng.gen_range(0..self.grid_height);
            self.spawn_fruit(x, y);
        }

        game_over
    }

    /// All occupied cells in wire order: every snake's segments tail to
    /// head, snakes in ascending player id, then every fruit.
    pub fn snapshot_cells(&self) -> Vec<SnapshotCell> {
        let mut cells = Vec::new();
        for snake in &self.snakes {
            for seg in &snake.body {
                cells.push(SnapshotCell {
                    pos: *seg,
                    kind: CellKind::Snake,
                });
            }
        }
        for fruit in &self.fruits {
            cells.push(SnapshotCell {
                pos: *fruit,
                kind: CellKind::Fruit,
            });
        }
        cells
    }
}
