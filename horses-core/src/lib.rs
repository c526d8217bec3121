//! Smart Horses 规则核心库
//!
//! 包含:
//! - 棋盘、位置、封锁格等核心数据结构
//! - 马的走法生成（对局与 AI 搜索共用）
//! - 对局状态与状态转移
//! - 随机棋盘生成
//! - 难度预设

mod board;
mod constants;
mod difficulty;
mod error;
mod game;
mod generator;
mod moves;
mod position;

pub use board::{BlockedSquares, Board};
pub use constants::*;
pub use difficulty::Difficulty;
pub use error::{GameError, Result};
pub use game::{GameState, MoveOutcome, Winner};
pub use generator::{BoardGenerator, GeneratedBoard};
pub use moves::{legal_moves, mobility, Move};
pub use position::{Position, Side};
