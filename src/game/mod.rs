pub mod common;
pub mod mcts;
pub mod self_play;
