use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rand::prelude::*;

use crate::error::Error;
use crate::game::common::{GameColor, GamePlayer, GamePosition};

/// Monte Carlo Tree Search (MCTS) implementation with the UCB1 selection policy

struct MctsNode<Position: GamePosition> {
    /// Legal moves of the represented position not yet attached as children.
    /// Computed once at node creation and only shrunk afterwards.
    untried_moves: Vec<Position::Move>,

    /// This is the variable n from the UCB1 formula
    simulations_n: u32,

    /// This is the variable w from the UCB1 formula.
    /// Accumulated from the viewpoint of this node's `player_just_moved`.
    score_w: f32,

    /// The player who made the move leading to the represented position.
    player_just_moved: GameColor,
}

impl<Position: GamePosition> MctsNode<Position> {
    pub fn from_position(position: &Position) -> Self {
        Self {
            untried_moves: position.get_legal_moves(),
            simulations_n: 0,
            score_w: 0.0,
            player_just_moved: position.get_turn().opposite(),
        }
    }
}

pub struct MctsPlayer<Position: GamePosition> {
    search_tree: DiGraph<MctsNode<Position>, Position::Move>,

    sim_num: u32,
    rand: StdRng,
}

impl<Position: GamePosition> MctsPlayer<Position> {
    pub fn new(sim_num: u32) -> Self {
        Self::from_seed(sim_num, rand::thread_rng().gen())
    }

    pub fn from_seed(sim_num: u32, seed: u64) -> Self {
        Self {
            search_tree: DiGraph::new(),
            sim_num,
            rand: StdRng::seed_from_u64(seed),
        }
    }

    /// Search for the best move from the given position.
    ///
    /// Runs exactly `sim_num` iterations of select/expand/rollout/backpropagate
    /// over a fresh tree rooted at a clone of `position`, and returns the move
    /// of the root child with the highest visit count.
    pub fn search(&mut self, position: &Position) -> Result<Position::Move, Error> {
        if self.sim_num < 1 {
            return Err(Error::InvalidConfiguration {
                message: format!("sim_num must be at least 1, got {}", self.sim_num),
            });
        }
        if position.is_over() {
            return Err(Error::NoLegalMoves);
        }

        let root_id = self.develop_tree(position);
        let best = self.best_move(root_id);
        self.search_tree.clear();

        /* The root is not terminal, so the first iteration expanded at least one child */
        Ok(best.unwrap())
    }

    fn develop_tree(&mut self, position: &Position) -> NodeIndex {
        self.search_tree.clear();
        let root_id = self.search_tree.add_node(MctsNode::from_position(position));
        for _ in 0..self.sim_num {
            self.run_iteration(root_id, position);
        }
        root_id
    }

    fn run_iteration(&mut self, root_id: NodeIndex, root_position: &Position) {
        let mut position = root_position.clone();
        let mut node_id = root_id;

        /* Select: descend while the node is fully expanded and has children */
        while self.search_tree[node_id].untried_moves.is_empty() {
            match self.select_child(node_id) {
                Some((child_id, m)) => {
                    position = position.get_moved_position(m);
                    node_id = child_id;
                }
                None => break,
            }
        }

        /* Expand: attach one random untried move as a new child and descend into it */
        let untried_num = self.search_tree[node_id].untried_moves.len();
        if untried_num > 0 {
            let m = {
                let idx = self.rand.gen_range(0..untried_num);
                let node = self.search_tree.node_weight_mut(node_id).unwrap();
                node.untried_moves.remove(idx)
            };
            position = position.get_moved_position(m);
            let child_id = self
                .search_tree
                .add_node(MctsNode::from_position(&position));
            self.search_tree.add_edge(node_id, child_id, m);
            node_id = child_id;
        }

        /* Rollout: play uniformly random moves until the position is terminal */
        while !position.is_over() {
            let moves = position.get_legal_moves();
            let m = moves[self.rand.gen_range(0..moves.len())];
            position = position.get_moved_position(m);
        }

        /* Backpropagate: walk parent links up to the root, scoring each node
         * from the viewpoint of its own recorded mover */
        let mut current = Some(node_id);
        while let Some(id) = current {
            let result = position.get_result(self.search_tree[id].player_just_moved);
            let node = self.search_tree.node_weight_mut(id).unwrap();
            node.simulations_n += 1;
            node.score_w += result;
            current = self
                .search_tree
                .edges_directed(id, Direction::Incoming)
                .next()
                .map(|edge| edge.source());
        }
    }

    /// Child of `node_id` maximizing the UCB1 score, with the move on its edge.
    ///
    /// petgraph iterates out-edges newest-first and `max_by` keeps the last
    /// maximum, so equal scores resolve to the earliest-expanded child. This
    /// tie-break is an observable policy and is covered by a test.
    fn select_child(&self, node_id: NodeIndex) -> Option<(NodeIndex, Position::Move)> {
        let parent_n = self.search_tree[node_id].simulations_n;
        self.search_tree
            .edges(node_id)
            .max_by(|e1, e2| {
                let val1 = Self::ucb1(&self.search_tree[e1.target()], parent_n);
                let val2 = Self::ucb1(&self.search_tree[e2.target()], parent_n);
                val1.partial_cmp(&val2).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|edge| (edge.target(), *edge.weight()))
    }

    /// Fixed unweighted UCB1: w/n + sqrt(2 ln N / n).
    fn ucb1(child: &MctsNode<Position>, parent_n: u32) -> f32 {
        assert!(child.simulations_n > 0 && parent_n > 0);
        child.score_w / child.simulations_n as f32
            + (2.0 * (parent_n as f32).ln() / child.simulations_n as f32).sqrt()
    }

    /// Move of the most visited root child. Same tie-break as `select_child`:
    /// equal visit counts resolve to the earliest-expanded child.
    fn best_move(&self, root_id: NodeIndex) -> Option<Position::Move> {
        self.search_tree
            .edges(root_id)
            .max_by_key(|edge| self.search_tree[edge.target()].simulations_n)
            .map(|edge| *edge.weight())
    }
}

impl<Position: GamePosition> GamePlayer<Position> for MctsPlayer<Position> {
    fn next_move(&mut self, position: &Position) -> Option<Position::Move> {
        self.search(position).ok()
    }
}

#[cfg(test)]
#[path = "mcts_test.rs"]
mod mcts_test;
