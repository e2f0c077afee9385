use crate::game::common::{GameColor, GamePlayer, GamePosition};

/// One finished game: the moves in play order, the terminal position and the winner.
pub struct GameRecord<Position: GamePosition> {
    pub moves: Vec<Position::Move>,
    pub final_pos: Position,
    pub winner: Option<GameColor>,
}

/// Running win tally across games, updated by the driver only.
#[derive(Copy, Clone, Default, Debug)]
pub struct GamesResults {
    pub w1: u32,
    pub w2: u32,
    pub d: u32,
}

impl GamesResults {
    pub fn update(&mut self, winner: Option<GameColor>) {
        match winner {
            Some(GameColor::Player1) => self.w1 += 1,
            Some(GameColor::Player2) => self.w2 += 1,
            None => self.d += 1,
        }
    }
}

/// Play a single game from `start` until a terminal position is reached.
///
/// The player owning the turn is queried each round; the move is applied to
/// the authoritative position held here, never by the players themselves.
pub fn play_until_over<Position: GamePosition>(
    start: &Position,
    player1: &mut dyn GamePlayer<Position>,
    player2: &mut dyn GamePlayer<Position>,
) -> GameRecord<Position> {
    let mut pos = start.clone();
    let mut moves = Vec::new();

    while !pos.is_over() {
        let player: &mut dyn GamePlayer<Position> = match pos.get_turn() {
            GameColor::Player1 => player1,
            GameColor::Player2 => player2,
        };
        let next_move = player.next_move(&pos).unwrap();
        pos = pos.get_moved_position(next_move);
        moves.push(next_move);
    }

    let winner = pos.get_winner();
    GameRecord {
        moves,
        final_pos: pos,
        winner,
    }
}
