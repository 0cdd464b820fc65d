//! Snake entity and its per-tick transition rules.
//!
//! A snake's body is an ordered list of grid cells, tail first and head
//! last. Movement, wall/self collision and fruit consumption all happen in
//! [`Snake::advance`]; collisions against other snakes are a separate pass
//! run after every snake has moved (see [`Snake::collides_with_any`]).

use shared::{Direction, Position};

/// One player's snake. Created at session acceptance and never removed;
/// a dead snake stays in the world but stops moving and turning.
#[derive(Debug, Clone)]
pub struct Snake {
    pub player_id: usize,
    /// Body cells, tail at index 0, head at the end. Non-empty.
    pub body: Vec<Position>,
    pub velocity: Direction,
    /// Most recent turn request since the previous tick, last write wins.
    pub pending_direction: Option<Direction>,
    /// Segments still owed from eaten fruit, consumed one per tick by
    /// keeping the tail in place instead of inserting sentinel cells.
    pub pending_growth: u32,
    pub alive: bool,
}

impl Snake {
    /// Spawns a length-1 snake moving East with one segment of pending
    /// growth, so it reaches its steady length-2 shape on the first tick.
    pub fn new(x: i32, y: i32, player_id: usize) -> Self {
        Self {
            player_id,
            body: vec![Position::new(x, y)],
            velocity: Direction::East,
            pending_direction: None,
            pending_growth: 1,
            alive: true,
        }
    }

    pub fn head(&self) -> Position {
        // Invariant: body is never empty.
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Records a turn request. Applied at the start of the next tick,
    /// subject to the reversal rule; overwrites any earlier request.
    pub fn turn(&mut self, dir: Direction) {
        if self.alive {
            self.pending_direction = Some(dir);
        }
    }

    /// Applies the pending turn request. A request is accepted only if it
    /// changes the axis of travel, which also rules out 180° reversals.
    fn apply_pending_turn(&mut self) {
        if let Some(dir) = self.pending_direction.take() {
            if dir.axis() != self.velocity.axis() {
                self.velocity = dir;
            }
        }
    }

    /// Advances the snake by one tick: turn, move, then resolve wall
    /// death, self-collision and fruit consumption, in that order.
    ///
    /// Eaten fruits are removed from `fruits` in place. On a wall death
    /// the head is left out of bounds rather than clamped.
    pub fn advance(&mut self, fruits: &mut Vec<Position>, width: i32, height: i32) {
        if !self.alive {
            return;
        }

        self.apply_pending_turn();

        let (dx, dy) = self.velocity.delta();
        let old_head = self.head();
        let new_head = Position::new(old_head.x + dx, old_head.y + dy);

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.body.remove(0);
        }

        let mut die = !new_head.in_bounds(width, height);

        // Self-collision against the already-shifted body.
        if self.body.iter().any(|seg| *seg == new_head) {
            die = true;
        }

        self.body.push(new_head);

        if !die {
            if let Some(idx) = fruits.iter().position(|f| *f == new_head) {
                fruits.remove(idx);
                self.pending_growth += 1;
            }
        }

        self.alive = !die;
    }

    /// True if this snake's head lies on any segment of any *other*
    /// snake. Run after all snakes have moved; head-to-head outcomes fall
    /// out of the fixed iteration order in the world tick.
    pub fn collides_with_any(&self, others: &[Snake]) -> bool {
        let head = self.head();
        others
            .iter()
            .filter(|other| other.player_id != self.player_id)
            .any(|other| other.body.iter().any(|seg| *seg == head))
    }
}
