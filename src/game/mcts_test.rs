use super::*;
use crate::game::common::PlayerRand;
use crate::game::self_play::play_until_over;
use crate::ovc::ovc_game::{play_one_game, OvcMove, OvcPosition, Symbol};

#[test]
fn root_visits_equal_sim_num() {
    let pos = OvcPosition::new(3, 3, 3).unwrap();
    let mut player: MctsPlayer<OvcPosition> = MctsPlayer::from_seed(50, 0x1234);

    let root_id = player.develop_tree(&pos);
    assert_eq!(player.search_tree[root_id].simulations_n, 50);
}

#[test]
fn search_rejects_zero_iterations() {
    let pos = OvcPosition::new(3, 3, 3).unwrap();
    let mut player: MctsPlayer<OvcPosition> = MctsPlayer::from_seed(0, 1);
    assert!(matches!(
        player.search(&pos),
        Err(Error::InvalidConfiguration { .. })
    ));
}

#[test]
fn search_rejects_terminal_position() {
    let mut player: MctsPlayer<OvcPosition> = MctsPlayer::from_seed(10, 1);

    /* full board without a run */
    let full = OvcPosition::from_str(3, 3, 3, "xxoooxxxo");
    assert_eq!(player.search(&full), Err(Error::NoLegalMoves));

    /* board with a completed run */
    let won = OvcPosition::from_str(3, 3, 3, "xxx______");
    assert_eq!(player.search(&won), Err(Error::NoLegalMoves));
}

#[test]
fn ucb1_matches_formula() {
    let node = MctsNode::<OvcPosition> {
        untried_moves: vec![],
        simulations_n: 4,
        score_w: 2.0,
        player_just_moved: GameColor::Player1,
    };
    let expected = 0.5 + (2.0 * (16.0f32).ln() / 4.0).sqrt();
    assert!((MctsPlayer::<OvcPosition>::ucb1(&node, 16) - expected).abs() < 1e-6);
}

#[test]
fn ties_resolve_to_earliest_expanded_child() {
    let pos = OvcPosition::new(3, 3, 3).unwrap();
    let mut player: MctsPlayer<OvcPosition> = MctsPlayer::from_seed(1, 1);

    let root_id = player.search_tree.add_node(MctsNode::from_position(&pos));
    player.search_tree.node_weight_mut(root_id).unwrap().simulations_n = 9;

    let moves = [
        OvcMove::new(0, 0, Symbol::X),
        OvcMove::new(1, 0, Symbol::O),
        OvcMove::new(2, 2, Symbol::X),
    ];
    for m in moves {
        let child_pos = pos.get_moved_position(m);
        let mut child = MctsNode::from_position(&child_pos);
        child.simulations_n = 3;
        child.score_w = 1.5;
        let child_id = player.search_tree.add_node(child);
        player.search_tree.add_edge(root_id, child_id, m);
    }

    /* all three children carry identical statistics: both the UCB1 selection
     * and the final most-visited pick must fall back to expansion order */
    assert_eq!(player.best_move(root_id), Some(moves[0]));
    let (_, selected) = player.select_child(root_id).unwrap();
    assert_eq!(selected, moves[0]);
}

#[test]
fn search_returns_legal_move() {
    let mut pos = OvcPosition::new(4, 4, 4).unwrap();
    pos.make_move(OvcMove::new(1, 1, Symbol::X));
    pos.make_move(OvcMove::new(2, 2, Symbol::O));

    let mut player: MctsPlayer<OvcPosition> = MctsPlayer::from_seed(100, 0xfeed);
    let m = player.search(&pos).unwrap();
    assert!(pos.is_valid_move(m));
}

#[test]
fn search_is_reproducible_with_seed() {
    let pos = OvcPosition::new(4, 4, 4).unwrap();

    let mut player1: MctsPlayer<OvcPosition> = MctsPlayer::from_seed(200, 0xabcdef);
    let mut player2: MctsPlayer<OvcPosition> = MctsPlayer::from_seed(200, 0xabcdef);
    assert_eq!(player1.search(&pos).unwrap(), player2.search(&pos).unwrap());
}

#[test]
fn play_one_game_terminates_within_board_size() {
    let record = play_one_game(3, 3, 3, 20).unwrap();

    assert!(record.final_pos.is_over());
    assert!(record.moves.len() <= record.final_pos.width() * record.final_pos.length());
    match record.winner.unwrap() {
        GameColor::Player1 => assert!(record.final_pos.in_order()),
        GameColor::Player2 => {
            assert!(record.final_pos.is_full());
            assert!(!record.final_pos.in_order());
        }
    }
}

#[test]
fn play_one_game_rejects_bad_configuration() {
    assert!(matches!(
        play_one_game(3, 3, 3, 0),
        Err(Error::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        play_one_game(3, 3, 7, 10),
        Err(Error::InvalidConfiguration { .. })
    ));
}

#[test]
fn mcts_vs_random_plays_legal_game() {
    let start = OvcPosition::new(3, 3, 3).unwrap();
    let mut player1: MctsPlayer<OvcPosition> = MctsPlayer::from_seed(30, 7);
    let mut player2 = PlayerRand::from_seed(11);

    let record = play_until_over(&start, &mut player1, &mut player2);
    assert!(record.final_pos.is_over());

    /* replaying the recorded moves must be legal and end in the same position */
    let mut pos = start.clone();
    for m in &record.moves {
        assert!(pos.is_valid_move(*m));
        pos.make_move(*m);
    }
    assert!(pos == record.final_pos);
}
