//! 错误类型定义

use thiserror::Error;

/// 对局规则错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// 无效的位置
    #[error("Invalid position: ({row}, {col})")]
    InvalidPosition { row: u8, col: u8 },

    /// 目标格不在当前走子方的合法走法中
    #[error("Invalid move to ({row}, {col})")]
    InvalidMove { row: u8, col: u8 },

    /// 双方起始位置重合
    #[error("White and Black cannot start on the same square")]
    SameStartSquare,

    /// 当前走子方仍有合法走法，不能让步
    #[error("Side to move still has legal moves")]
    CannotPass,

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, GameError>;
