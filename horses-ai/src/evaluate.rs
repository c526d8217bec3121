//! 局面评估函数

use horses_core::{mobility, BlockedSquares, GameState, Position, Side};

/// 机动性权重：每多一个可走格子加 0.5 分
pub const MOBILITY_WEIGHT: f64 = 0.5;

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 评估对局（白方视角，正值对白方有利）
    pub fn evaluate(state: &GameState) -> f64 {
        Self::evaluate_parts(
            state.position(Side::White),
            state.position(Side::Black),
            state.score(Side::White),
            state.score(Side::Black),
            state.blocked(),
        )
    }

    /// 由搜索节点的各个分量直接评估，机动性按当前封锁格重新计算
    pub fn evaluate_parts(
        white: Position,
        black: Position,
        white_score: i32,
        black_score: i32,
        blocked: &BlockedSquares,
    ) -> f64 {
        let white_mobility = mobility(white, blocked, black) as f64;
        let black_mobility = mobility(black, blocked, white) as f64;

        (white_score - black_score) as f64 + MOBILITY_WEIGHT * (white_mobility - black_mobility)
    }
}
