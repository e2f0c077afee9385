use std::fmt::{self, Display};

use crate::error::Error;
use crate::game::common::{GameColor, GameMove, GamePosition};
use crate::game::mcts::MctsPlayer;
use crate::game::self_play::{play_until_over, GameRecord};

/// Order and Chaos: both players place either symbol on the same board.
/// Player1 ("Order") wins by completing a straight run of `to_win` equal
/// symbols, Player2 ("Chaos") wins when the board fills without such a run.

pub fn color_to_str(c: Option<GameColor>) -> String {
    match c {
        None => String::from("Nobody"),
        Some(GameColor::Player1) => String::from("Order"),
        Some(GameColor::Player2) => String::from("Chaos"),
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    pub fn other(&self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::X => write!(f, "X"),
            Symbol::O => write!(f, "O"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct OvcMove {
    x: u8,
    y: u8,
    symbol: Symbol,
}

impl OvcMove {
    pub fn new(x: usize, y: usize, symbol: Symbol) -> Self {
        assert!(x <= u8::MAX as usize && y <= u8::MAX as usize);
        Self {
            x: x as u8,
            y: y as u8,
            symbol,
        }
    }

    pub fn x(&self) -> usize {
        self.x as usize
    }

    pub fn y(&self) -> usize {
        self.y as usize
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }
}

impl GameMove for OvcMove {}

impl Display for OvcMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.symbol)
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct OvcPosition {
    width: usize,
    length: usize,
    to_win: usize,
    board: Vec<Option<Symbol>>,
    pub player_just_moved: GameColor,
}

impl OvcPosition {
    pub fn new(width: usize, length: usize, to_win: usize) -> Result<Self, Error> {
        if width < 1 || length < 1 {
            return Err(Error::InvalidConfiguration {
                message: format!("board dimensions must be positive, got {}x{}", width, length),
            });
        }
        if width > u8::MAX as usize || length > u8::MAX as usize {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "board dimensions must fit in a move coordinate (max {}), got {}x{}",
                    u8::MAX,
                    width,
                    length
                ),
            });
        }
        if to_win < 1 || to_win > width.min(length) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "run length to_win must be in 1..={}, got {}",
                    width.min(length),
                    to_win
                ),
            });
        }
        Ok(Self {
            width,
            length,
            to_win,
            board: vec![None; width * length],
            /* Player1 makes the first move */
            player_just_moved: GameColor::Player2,
        })
    }

    /// Build a position from a compact board string: 'x'/'o' are placed
    /// symbols, '_' is an empty cell, cells ordered row by row (y major).
    /// Skips the constructor validation of `to_win`; panics on bad input.
    pub fn from_str(width: usize, length: usize, to_win: usize, s: &str) -> Self {
        assert!(width >= 1 && length >= 1 && to_win >= 1);
        assert_eq!(s.len(), width * length);
        let board = s
            .chars()
            .map(|c| match c {
                'x' => Some(Symbol::X),
                'o' => Some(Symbol::O),
                '_' => None,
                other => panic!("unknown board character: {}", other),
            })
            .collect();
        Self {
            width,
            length,
            to_win,
            board,
            player_just_moved: GameColor::Player2,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn to_win(&self) -> usize {
        self.to_win
    }

    pub fn get_tile(&self, x: usize, y: usize) -> Option<Symbol> {
        assert!(x < self.width && y < self.length);
        self.board[y * self.width + x]
    }

    pub fn is_valid_move(&self, m: OvcMove) -> bool {
        m.x() < self.width && m.y() < self.length && self.get_tile(m.x(), m.y()).is_none()
    }

    pub fn make_move(&mut self, m: OvcMove) {
        assert!(self.is_valid_move(m));
        self.board[m.y() * self.width + m.x()] = Some(m.symbol());
        self.player_just_moved = self.player_just_moved.opposite();
    }

    pub fn make_move_new(&self, m: OvcMove) -> Self {
        let mut res = self.clone();
        res.make_move(m);
        res
    }

    pub fn is_full(&self) -> bool {
        self.board.iter().all(|cell| cell.is_some())
    }

    /// True iff `to_win` consecutive equal symbols exist horizontally,
    /// vertically or on either diagonal. Start indices are bounded so every
    /// probed run fits on the board; the subtractions saturate so an
    /// oversized `to_win` scans nothing and reports false.
    pub fn in_order(&self) -> bool {
        let k = self.to_win;
        let start_x_num = (self.width + 1).saturating_sub(k);
        let start_y_num = (self.length + 1).saturating_sub(k);

        // horizontals
        for y in 0..self.length {
            for x in 0..start_x_num {
                if self.run_from(x, y, 1, 0) {
                    return true;
                }
            }
        }
        // verticals
        for x in 0..self.width {
            for y in 0..start_y_num {
                if self.run_from(x, y, 0, 1) {
                    return true;
                }
            }
        }
        // down diagonals
        for x in 0..start_x_num {
            for y in 0..start_y_num {
                if self.run_from(x, y, 1, 1) {
                    return true;
                }
            }
        }
        // up diagonals, start rows leave room above
        for x in 0..start_x_num {
            for y in k.saturating_sub(1)..self.length {
                if self.run_from(x, y, 1, -1) {
                    return true;
                }
            }
        }
        false
    }

    /// Whether `to_win` equal symbols start at (x, y) along (step_x, step_y).
    /// The caller's start bounds guarantee the whole run is on the board.
    fn run_from(&self, x: usize, y: usize, step_x: isize, step_y: isize) -> bool {
        let first = match self.get_tile(x, y) {
            Some(symbol) => symbol,
            None => return false,
        };
        for i in 1..self.to_win as isize {
            let cx = (x as isize + i * step_x) as usize;
            let cy = (y as isize + i * step_y) as usize;
            if self.get_tile(cx, cy) != Some(first) {
                return false;
            }
        }
        true
    }
}

impl GamePosition for OvcPosition {
    type Move = OvcMove;

    fn get_turn(&self) -> GameColor {
        self.player_just_moved.opposite()
    }

    /// Both symbols are offered for every empty cell, even once a run exists;
    /// the rollout and the driver loop stop at terminal positions instead.
    fn get_legal_moves(&self) -> Vec<OvcMove> {
        let mut moves = Vec::new();
        for y in 0..self.length {
            for x in 0..self.width {
                if self.get_tile(x, y).is_none() {
                    moves.push(OvcMove::new(x, y, Symbol::X));
                    moves.push(OvcMove::new(x, y, Symbol::O));
                }
            }
        }
        moves
    }

    fn get_moved_position(&self, m: OvcMove) -> Self {
        self.make_move_new(m)
    }

    fn is_over(&self) -> bool {
        self.in_order() || self.is_full()
    }

    /// Order (Player1) wins iff a run exists, Chaos (Player2) wins on a full
    /// board without one, regardless of who placed which symbols. There is
    /// no draw.
    fn get_winner(&self) -> Option<GameColor> {
        assert!(self.is_over());
        if self.in_order() {
            Some(GameColor::Player1)
        } else {
            Some(GameColor::Player2)
        }
    }
}

/// Play one full game with a UCT player on both sides.
///
/// Returns the move sequence and the winner; terminates after at most
/// `width * length` moves since every move fills a cell.
pub fn play_one_game(
    width: usize,
    length: usize,
    to_win: usize,
    sim_num: u32,
) -> Result<GameRecord<OvcPosition>, Error> {
    if sim_num < 1 {
        return Err(Error::InvalidConfiguration {
            message: format!("sim_num must be at least 1, got {}", sim_num),
        });
    }
    let start = OvcPosition::new(width, length, to_win)?;

    let mut player1 = MctsPlayer::new(sim_num);
    let mut player2 = MctsPlayer::new(sim_num);
    Ok(play_until_over(&start, &mut player1, &mut player2))
}
