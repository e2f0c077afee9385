use rand::prelude::*;

use std::fmt::{Debug, Display};
use std::hash::Hash;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GameColor {
    Player1,
    Player2,
}

impl GameColor {
    pub fn opposite(&self) -> GameColor {
        match self {
            GameColor::Player1 => GameColor::Player2,
            GameColor::Player2 => GameColor::Player1,
        }
    }
}

pub trait GameMove: Clone + Copy + Eq + Hash + Display + Debug {}

pub trait GamePosition: Clone + Eq + Hash {
    type Move: GameMove;

    /// The player whose turn it is to move.
    fn get_turn(&self) -> GameColor;

    /// All moves playable from this position. Empty only when no placement
    /// is possible at all; terminality is a separate question (`is_over`).
    fn get_legal_moves(&self) -> Vec<Self::Move>;

    fn get_moved_position(&self, m: Self::Move) -> Self;

    fn is_over(&self) -> bool;

    /// Winner of a terminal position, None for a draw.
    /// Must only be called when `is_over` is true.
    fn get_winner(&self) -> Option<GameColor>;

    /// Score of a terminal position from the given player's viewpoint,
    /// in [0, 1]. The two viewpoints always sum to 1.
    fn get_result(&self, viewpoint: GameColor) -> f32 {
        match self.get_winner() {
            Some(winner) if winner == viewpoint => 1.0,
            Some(_) => 0.0,
            None => 0.5,
        }
    }
}

pub trait GamePlayer<Position: GamePosition> {
    fn next_move(&mut self, position: &Position) -> Option<Position::Move>;
}

pub struct PlayerRand {
    rand: StdRng,
}
impl Default for PlayerRand {
    fn default() -> Self {
        Self::new()
    }
}
impl PlayerRand {
    pub fn new() -> Self {
        Self::from_seed(rand::thread_rng().gen())
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rand: StdRng::seed_from_u64(seed),
        }
    }
}

impl<Position: GamePosition> GamePlayer<Position> for PlayerRand {
    fn next_move(&mut self, position: &Position) -> Option<Position::Move> {
        let moves = position.get_legal_moves();
        if moves.is_empty() {
            None
        } else {
            Some(moves[self.rand.gen_range(0..moves.len())])
        }
    }
}
