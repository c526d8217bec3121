//! 随机棋盘生成

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::constants::{BOARD_SQUARES, DRAWN_SQUARES, SQUARE_VALUES};
use crate::error::Result;
use crate::game::GameState;
use crate::position::Position;

/// 生成的初始局面
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedBoard {
    pub board: Board,
    pub start_white: Position,
    pub start_black: Position,
}

impl GeneratedBoard {
    /// 以该局面开始新对局
    pub fn into_game(self) -> Result<GameState> {
        GameState::new_game(&self.board, self.start_white, self.start_black)
    }
}

/// 随机棋盘生成器
pub struct BoardGenerator;

impl BoardGenerator {
    /// 不放回地抽取 12 个格子：前 10 个按抽取顺序分配 [`SQUARE_VALUES`]，
    /// 第 11 个是白马起点，第 12 个是黑马起点
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> GeneratedBoard {
        let drawn: Vec<Position> = index::sample(rng, BOARD_SQUARES, DRAWN_SQUARES)
            .into_iter()
            .filter_map(Position::from_index)
            .collect();

        let mut board = Board::empty();
        for (pos, value) in drawn.iter().zip(SQUARE_VALUES) {
            board.set(*pos, value);
        }

        let start_white = drawn[SQUARE_VALUES.len()];
        let start_black = drawn[SQUARE_VALUES.len() + 1];
        debug!(%start_white, %start_black, "random board generated");

        GeneratedBoard {
            board,
            start_white,
            start_black,
        }
    }
}

impl GameState {
    /// 随机生成棋盘并开始新对局
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Result<Self> {
        BoardGenerator::generate(rng).into_game()
    }
}
