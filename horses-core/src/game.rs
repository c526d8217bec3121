//! 对局状态与状态转移

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::board::{BlockedSquares, Board};
use crate::constants::FORFEIT_PENALTY;
use crate::error::{GameError, Result};
use crate::moves::{legal_moves, Move};
use crate::position::{Position, Side};

/// 对局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    /// 白方得分高
    White,
    /// 黑方得分高
    Black,
    /// 平局
    Draw,
}

/// 一次成功走子的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// 实际执行的走法
    pub mv: Move,
    /// 因无路可走被扣分的一方
    pub penalized: Option<Side>,
    /// 走完后对局是否结束
    pub terminal: bool,
}

/// 完整的对局状态
///
/// 只能通过 [`GameState::apply_move`] / [`GameState::try_apply_move`] 和
/// [`GameState::pass_turn`] 修改。反序列化经过 [`GameState::from_parts`] 校验，
/// 无路可走标志与结束标志重新计算。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredState")]
pub struct GameState {
    board: Board,
    white: Position,
    black: Position,
    white_score: i32,
    black_score: i32,
    current_turn: Side,
    blocked: BlockedSquares,
    terminal: bool,
    white_stuck: bool,
    black_stuck: bool,
}

/// 反序列化时的原始字段
#[derive(Deserialize)]
struct StoredState {
    board: Board,
    white: Position,
    black: Position,
    white_score: i32,
    black_score: i32,
    current_turn: Side,
    blocked: BlockedSquares,
}

impl TryFrom<StoredState> for GameState {
    type Error = GameError;

    fn try_from(stored: StoredState) -> Result<Self> {
        let mut state = Self::from_parts(
            stored.board,
            stored.white,
            stored.black,
            stored.blocked,
            stored.current_turn,
        )?;
        state.white_score = stored.white_score;
        state.black_score = stored.black_score;
        Ok(state)
    }
}

impl GameState {
    /// 创建新对局（白方先走）
    ///
    /// 棋盘按值复制，调用方之后对原棋盘的修改不会影响对局。
    pub fn new_game(board: &Board, start_white: Position, start_black: Position) -> Result<Self> {
        Self::from_parts(*board, start_white, start_black, BlockedSquares::new(), Side::White)
    }

    /// 从任意局面创建状态，分数从 0 开始
    pub fn from_parts(
        board: Board,
        white: Position,
        black: Position,
        blocked: BlockedSquares,
        current_turn: Side,
    ) -> Result<Self> {
        for pos in [white, black] {
            if !pos.is_valid() {
                return Err(GameError::InvalidPosition {
                    row: pos.row,
                    col: pos.col,
                });
            }
        }
        if white == black {
            return Err(GameError::SameStartSquare);
        }

        let mut state = Self {
            board,
            white,
            black,
            white_score: 0,
            black_score: 0,
            current_turn,
            blocked,
            terminal: false,
            white_stuck: false,
            black_stuck: false,
        };
        state.refresh_flags();
        Ok(state)
    }

    /// 棋盘
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 已封锁的格子
    pub fn blocked(&self) -> &BlockedSquares {
        &self.blocked
    }

    /// 当前走子方
    pub fn current_turn(&self) -> Side {
        self.current_turn
    }

    /// 指定阵营的马所在位置
    pub fn position(&self, side: Side) -> Position {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    /// 指定阵营的得分
    pub fn score(&self, side: Side) -> i32 {
        match side {
            Side::White => self.white_score,
            Side::Black => self.black_score,
        }
    }

    /// 指定阵营是否无路可走（上次状态转移后计算）
    pub fn is_stuck(&self, side: Side) -> bool {
        match side {
            Side::White => self.white_stuck,
            Side::Black => self.black_stuck,
        }
    }

    /// 双方都无路可走时对局结束
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// 指定阵营的合法走法（按固定方向顺序）
    pub fn legal_moves(&self, side: Side) -> Vec<Position> {
        legal_moves(self.position(side), &self.blocked, self.position(side.opponent()))
    }

    /// 从指定位置出发的合法走法，另一匹马取不在该位置的那一匹
    ///
    /// `from` 上没有马时返回空列表。
    pub fn legal_moves_from(&self, from: Position) -> Vec<Position> {
        if from == self.white {
            legal_moves(from, &self.blocked, self.black)
        } else if from == self.black {
            legal_moves(from, &self.blocked, self.white)
        } else {
            Vec::new()
        }
    }

    /// 当前走子方无路可走但对局未结束，需要让步
    pub fn must_pass(&self) -> bool {
        !self.terminal && self.is_stuck(self.current_turn)
    }

    /// 比较双方得分
    pub fn winner(&self) -> Winner {
        match self.white_score.cmp(&self.black_score) {
            std::cmp::Ordering::Greater => Winner::White,
            std::cmp::Ordering::Less => Winner::Black,
            std::cmp::Ordering::Equal => Winner::Draw,
        }
    }

    /// 执行走子，非法时返回 false 且状态不变
    pub fn apply_move(&mut self, to: Position) -> bool {
        self.try_apply_move(to).is_ok()
    }

    /// 执行走子
    pub fn try_apply_move(&mut self, to: Position) -> Result<MoveOutcome> {
        if self.terminal {
            return Err(GameError::GameOver);
        }

        let side = self.current_turn;
        let opponent = side.opponent();
        if !self.legal_moves(side).contains(&to) {
            return Err(GameError::InvalidMove {
                row: to.row,
                col: to.col,
            });
        }

        // 对方无路可走时，每走一步都扣对方分
        let penalized = if self.is_stuck(opponent) {
            *self.score_mut(opponent) -= FORFEIT_PENALTY;
            Some(opponent)
        } else {
            None
        };

        let from = self.position(side);
        self.blocked.insert(from);
        match side {
            Side::White => self.white = to,
            Side::Black => self.black = to,
        }
        let captured = self.board.take(to);
        *self.score_mut(side) += captured;
        self.blocked.insert(to);

        self.current_turn = opponent;
        self.refresh_flags();

        let mv = Move {
            side,
            from,
            to,
            captured,
        };
        trace!(
            %mv,
            captured,
            ?penalized,
            white_score = self.white_score,
            black_score = self.black_score,
            terminal = self.terminal,
            "move applied"
        );

        Ok(MoveOutcome {
            mv,
            penalized,
            terminal: self.terminal,
        })
    }

    /// 当前走子方无路可走时把回合交给对方
    pub fn pass_turn(&mut self) -> Result<()> {
        if self.terminal {
            return Err(GameError::GameOver);
        }
        if !self.is_stuck(self.current_turn) {
            return Err(GameError::CannotPass);
        }

        trace!(side = %self.current_turn, "turn passed");
        self.current_turn = self.current_turn.opponent();
        Ok(())
    }

    fn score_mut(&mut self, side: Side) -> &mut i32 {
        match side {
            Side::White => &mut self.white_score,
            Side::Black => &mut self.black_score,
        }
    }

    fn refresh_flags(&mut self) {
        self.white_stuck = self.legal_moves(Side::White).is_empty();
        self.black_stuck = self.legal_moves(Side::Black).is_empty();
        self.terminal = self.white_stuck && self.black_stuck;
    }
}
