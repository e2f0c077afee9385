use clap::Parser;
use itertools::Itertools;
use std::fs;

use ovc::game::common::GameColor;
use ovc::game::self_play::GamesResults;
use ovc::ovc::ovc_game::{color_to_str, play_one_game};

#[derive(Parser, Debug)]
#[clap(about, long_about = None)]
struct Args {
    #[clap(long, default_value = "8")]
    width: usize,
    #[clap(long, default_value = "8")]
    length: usize,
    #[clap(long, default_value = "6")]
    to_win: usize,
    #[clap(long, default_value = "3000")]
    sim_num: u32,
    #[clap(long, default_value = "100")]
    games_num: u32,
    #[clap(long)]
    result_file: Option<String>,
}

fn main() {
    ovc::util::init_globals();

    let args = Args::parse();

    let mut results = GamesResults::default();
    let mut all_moves = Vec::new();

    for game_idx in 0..args.games_num {
        log::info!("Game {}", game_idx);

        let record = play_one_game(args.width, args.length, args.to_win, args.sim_num)
            .unwrap_or_else(|err| {
                log::error!("Failed to play game: {}", err);
                std::process::exit(1);
            });

        /* Player1 always owns the first move */
        for (move_idx, m) in record.moves.iter().enumerate() {
            let player_num = if move_idx % 2 == 0 { 1 } else { 2 };
            println!("Player {} move: {}", player_num, m);
        }
        match record.winner {
            Some(GameColor::Player1) => println!("Player 1 wins!"),
            Some(GameColor::Player2) => println!("Player 2 wins!"),
            None => println!("Nobody wins!"),
        }

        results.update(record.winner);
        println!("order wins: {} chaos wins: {}", results.w1, results.w2);

        all_moves.push(record.moves);
    }

    for (game_idx, moves) in all_moves.iter().enumerate() {
        let moves_str = moves.iter().map(|m| m.to_string()).collect_vec();
        println!("Game {}: {}", game_idx, moves_str.join(" "));
    }
    log::info!(
        "Played {} games, {} wins: {}, {} wins: {}",
        args.games_num,
        color_to_str(Some(GameColor::Player1)),
        results.w1,
        color_to_str(Some(GameColor::Player2)),
        results.w2
    );

    if let Some(result_file) = args.result_file {
        let json_obj = json::object! {
            player1_wins: results.w1,
            player2_wins: results.w2,
            draws: results.d,
        };
        fs::write(&result_file, json_obj.dump()).unwrap();
    }
}
