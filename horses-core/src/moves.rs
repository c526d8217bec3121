//! 走法生成
//!
//! 对局本身与 AI 的前瞻搜索共用这里的 [`legal_moves`]，保证双方对“合法”的判断完全一致。

use serde::{Deserialize, Serialize};

use crate::board::BlockedSquares;
use crate::constants::KNIGHT_OFFSETS;
use crate::position::{Position, Side};

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 走子方
    pub side: Side,
    /// 起始位置
    pub from: Position,
    /// 目标位置
    pub to: Position,
    /// 收集到的分值
    pub captured: i32,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.side, self.from, self.to)
    }
}

/// 生成马从 `from` 出发的合法目标格
///
/// 按 [`KNIGHT_OFFSETS`] 的顺序返回；越界、已封锁或被另一匹马占据的格子被排除。
/// 格子上的分值不影响走法。
pub fn legal_moves(from: Position, blocked: &BlockedSquares, other_knight: Position) -> Vec<Position> {
    let mut moves = Vec::with_capacity(KNIGHT_OFFSETS.len());
    moves.extend(destinations(from, blocked, other_knight));
    moves
}

/// 机动性：合法目标格的数量
pub fn mobility(from: Position, blocked: &BlockedSquares, other_knight: Position) -> usize {
    destinations(from, blocked, other_knight).count()
}

/// 走法过滤规则只写在这里，[`legal_moves`] 与 [`mobility`] 都经由它
fn destinations<'a>(
    from: Position,
    blocked: &'a BlockedSquares,
    other_knight: Position,
) -> impl Iterator<Item = Position> + 'a {
    KNIGHT_OFFSETS
        .into_iter()
        .filter_map(move |(d_row, d_col)| from.offset(d_row, d_col))
        .filter(move |&to| !blocked.contains(to) && to != other_knight)
}
