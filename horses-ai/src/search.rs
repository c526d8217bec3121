//! 搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝（定深），以及 AI 决策入口

use horses_core::{
    legal_moves, BlockedSquares, Board, Difficulty, GameState, Position, Side, FORFEIT_PENALTY,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::evaluate::Evaluator;

/// 走子方无路可走时的默认偏置
pub const DEFAULT_STALL_BIAS: f64 = 100.0;

/// AI 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    pub max_depth: u8,
    /// 搜索中走子方无路可走时施加的偏置：白方减去，黑方加上
    pub stall_bias: f64,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            max_depth: difficulty.depth(),
            stall_bias: DEFAULT_STALL_BIAS,
        }
    }

    /// 覆盖搜索深度
    pub fn with_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::default())
    }
}

/// 一次搜索的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// 根节点的 minimax 值（白方视角）
    pub value: f64,
    /// 最佳走法；走子方无路可走或深度为 0 时为 None
    pub best_move: Option<Position>,
    /// 访问的节点数
    pub nodes: u64,
}

/// 搜索节点：每个分支持有自己的棋盘与封锁格副本
#[derive(Debug, Clone, Copy)]
struct Node {
    board: Board,
    white: Position,
    black: Position,
    white_score: i32,
    black_score: i32,
    blocked: BlockedSquares,
}

impl Node {
    fn from_state(state: &GameState) -> Self {
        Self {
            board: *state.board(),
            white: state.position(Side::White),
            black: state.position(Side::Black),
            white_score: state.score(Side::White),
            black_score: state.score(Side::Black),
            blocked: *state.blocked(),
        }
    }

    fn position(&self, side: Side) -> Position {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    fn moves(&self, side: Side) -> Vec<Position> {
        legal_moves(self.position(side), &self.blocked, self.position(side.opponent()))
    }

    fn evaluate(&self) -> f64 {
        Evaluator::evaluate_parts(
            self.white,
            self.black,
            self.white_score,
            self.black_score,
            &self.blocked,
        )
    }

    /// 走子后的子节点：收集分值，封锁起点和终点。对局中的“无路可走扣分”不在搜索中模拟。
    fn child(&self, side: Side, to: Position) -> Node {
        let mut next = *self;
        let captured = next.board.take(to);
        next.blocked.insert(self.position(side));
        next.blocked.insert(to);
        match side {
            Side::White => {
                next.white = to;
                next.white_score += captured;
            }
            Side::Black => {
                next.black = to;
                next.black_score += captured;
            }
        }
        next
    }
}

/// AI 引擎（执白）
pub struct AiEngine {
    config: AiConfig,
    nodes_searched: u64,
    rng: ChaCha8Rng,
}

impl AiEngine {
    /// 使用固定随机种子创建（兜底随机走法可复现）
    pub fn with_seed(config: AiConfig, seed: u64) -> Self {
        Self {
            config,
            nodes_searched: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 按配置的深度为白方选择走法
    pub fn best_move(&mut self, state: &GameState) -> Option<Position> {
        self.best_move_for_ai(state, self.config.max_depth)
    }

    /// 为白方选择走法
    ///
    /// 搜索没有给出走法时，从白方当前的合法走法中随机选一个；
    /// 只有白方确实无路可走时返回 None。
    pub fn best_move_for_ai(&mut self, state: &GameState, depth: u8) -> Option<Position> {
        let result = self.search_for(state, depth, Side::White);
        if result.best_move.is_some() {
            return result.best_move;
        }

        let moves = state.legal_moves(Side::White);
        let fallback = moves.choose(&mut self.rng).copied();
        if fallback.is_some() {
            warn!(depth, "search returned no move, falling back to a random legal move");
        }
        fallback
    }

    /// 从当前走子方开始搜索
    pub fn search(&mut self, state: &GameState, depth: u8) -> SearchResult {
        self.search_for(state, depth, state.current_turn())
    }

    fn search_for(&mut self, state: &GameState, depth: u8, to_move: Side) -> SearchResult {
        self.nodes_searched = 0;

        let root = Node::from_state(state);
        let (value, best_move) =
            self.alpha_beta(&root, depth, to_move, f64::NEG_INFINITY, f64::INFINITY);

        debug!(
            depth,
            ?to_move,
            value,
            ?best_move,
            nodes = self.nodes_searched,
            "search finished"
        );

        SearchResult {
            value,
            best_move,
            nodes: self.nodes_searched,
        }
    }

    /// Alpha-Beta 搜索，白方取最大，黑方取最小
    fn alpha_beta(
        &mut self,
        node: &Node,
        depth: u8,
        to_move: Side,
        mut alpha: f64,
        mut beta: f64,
    ) -> (f64, Option<Position>) {
        self.nodes_searched += 1;

        // 到达深度限制，返回评估值
        if depth == 0 {
            return (node.evaluate(), None);
        }

        let moves = node.moves(to_move);

        // 无子可动
        if moves.is_empty() {
            let diff = (node.white_score - node.black_score) as f64;
            let value = match to_move {
                Side::White => diff - self.config.stall_bias,
                Side::Black => diff + FORFEIT_PENALTY as f64 + self.config.stall_bias,
            };
            return (value, None);
        }

        let mut best_move = None;

        match to_move {
            Side::White => {
                let mut max_eval = f64::NEG_INFINITY;
                for to in moves {
                    let child = node.child(Side::White, to);
                    let (score, _) = self.alpha_beta(&child, depth - 1, Side::Black, alpha, beta);

                    if score > max_eval {
                        max_eval = score;
                        best_move = Some(to);
                    }
                    alpha = alpha.max(score);
                    if beta <= alpha {
                        break; // Beta 剪枝
                    }
                }
                (max_eval, best_move)
            }
            Side::Black => {
                let mut min_eval = f64::INFINITY;
                for to in moves {
                    let child = node.child(Side::Black, to);
                    let (score, _) = self.alpha_beta(&child, depth - 1, Side::White, alpha, beta);

                    if score < min_eval {
                        min_eval = score;
                        best_move = Some(to);
                    }
                    beta = beta.min(score);
                    if beta <= alpha {
                        break; // Alpha 剪枝
                    }
                }
                (min_eval, best_move)
            }
        }
    }

    /// 获取上次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horses_core::BoardGenerator;
    use rand::Rng;

    fn pos(row: u8, col: u8) -> Position {
        Position::new_unchecked(row, col)
    }

    /// 不剪枝的完整 minimax，返回 (值, 最佳走法, 节点数)
    fn plain_minimax(node: &Node, depth: u8, to_move: Side, nodes: &mut u64) -> (f64, Option<Position>) {
        *nodes += 1;
        if depth == 0 {
            return (node.evaluate(), None);
        }
        let moves = node.moves(to_move);
        if moves.is_empty() {
            let diff = (node.white_score - node.black_score) as f64;
            return match to_move {
                Side::White => (diff - DEFAULT_STALL_BIAS, None),
                Side::Black => (diff + 4.0 + DEFAULT_STALL_BIAS, None),
            };
        }

        let mut best: Option<(f64, Position)> = None;
        for to in moves {
            let (score, _) = plain_minimax(&node.child(to_move, to), depth - 1, to_move.opponent(), nodes);
            let better = match (to_move, best) {
                (_, None) => true,
                (Side::White, Some((v, _))) => score > v,
                (Side::Black, Some((v, _))) => score < v,
            };
            if better {
                best = Some((score, to));
            }
        }
        best.map_or((0.0, None), |(v, m)| (v, Some(m)))
    }

    /// 随机生成棋盘并随机走若干步
    fn random_midgame(rng: &mut ChaCha8Rng, plies: usize) -> GameState {
        let mut state = BoardGenerator::generate(rng).into_game().unwrap();
        for _ in 0..plies {
            if state.is_terminal() {
                break;
            }
            if state.must_pass() {
                state.pass_turn().unwrap();
                continue;
            }
            let moves = state.legal_moves(state.current_turn());
            let to = moves[rng.gen_range(0..moves.len())];
            assert!(state.apply_move(to));
        }
        state
    }

    #[test]
    fn test_prefers_valued_square() {
        let mut board = Board::empty();
        board.set(pos(2, 1), 5);
        let state = GameState::new_game(&board, pos(0, 0), pos(7, 7)).unwrap();

        let mut engine = AiEngine::with_seed(AiConfig::default(), 1);
        let result = engine.search(&state, 1);
        assert_eq!(result.best_move, Some(pos(2, 1)));
        // 分差 5，白马 5 个走法对黑马 2 个
        assert_eq!(result.value, 5.0 + 0.5 * 3.0);

        assert_eq!(engine.best_move_for_ai(&state, 1), Some(pos(2, 1)));
    }

    #[test]
    fn test_tie_keeps_first_offset() {
        // (1, 2) 与 (2, 1) 评估完全相同，保留方向表中靠前的 (1, 2)
        let state = GameState::new_game(&Board::empty(), pos(0, 0), pos(7, 7)).unwrap();
        let mut engine = AiEngine::with_seed(AiConfig::default(), 1);

        let result = engine.search(&state, 1);
        assert_eq!(result.value, 1.5);
        assert_eq!(result.best_move, Some(pos(1, 2)));
    }

    #[test]
    fn test_pruning_matches_plain_minimax() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut engine = AiEngine::with_seed(AiConfig::default(), 5);

        for round in 0..40 {
            let state = random_midgame(&mut rng, round % 12);
            if state.is_terminal() {
                continue;
            }
            let root = Node::from_state(&state);

            for depth in 1..=4 {
                let mut plain_nodes = 0;
                let (value, best) =
                    plain_minimax(&root, depth, state.current_turn(), &mut plain_nodes);
                let result = engine.search(&state, depth);

                assert_eq!(result.value, value, "round {} depth {}", round, depth);
                assert_eq!(result.best_move, best, "round {} depth {}", round, depth);
                assert!(result.nodes <= plain_nodes);
            }
        }
    }

    #[test]
    fn test_pruning_reduces_nodes() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let state = BoardGenerator::generate(&mut rng).into_game().unwrap();
        let mut engine = AiEngine::with_seed(AiConfig::default(), 5);

        let mut plain_nodes = 0;
        plain_minimax(&Node::from_state(&state), 4, Side::White, &mut plain_nodes);
        let result = engine.search(&state, 4);

        assert!(result.nodes < plain_nodes, "{} vs {}", result.nodes, plain_nodes);
        assert_eq!(engine.nodes_searched(), result.nodes);
    }

    #[test]
    fn test_stuck_white_returns_stall_value() {
        let blocked: BlockedSquares = [pos(1, 2), pos(2, 1)].into_iter().collect();
        let state =
            GameState::from_parts(Board::empty(), pos(0, 0), pos(7, 7), blocked, Side::White)
                .unwrap();
        let mut engine = AiEngine::with_seed(AiConfig::default(), 1);

        let result = engine.search(&state, 3);
        assert_eq!(result.value, -100.0);
        assert_eq!(result.best_move, None);
        assert_eq!(engine.best_move_for_ai(&state, 3), None);
    }

    #[test]
    fn test_stuck_black_returns_stall_value() {
        let blocked: BlockedSquares = [pos(5, 6), pos(6, 5)].into_iter().collect();
        let state =
            GameState::from_parts(Board::empty(), pos(0, 0), pos(7, 7), blocked, Side::Black)
                .unwrap();
        let mut engine = AiEngine::with_seed(AiConfig::default(), 1);

        let result = engine.search(&state, 2);
        assert_eq!(result.value, 104.0);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_stall_bias_is_configurable() {
        let blocked: BlockedSquares = [pos(1, 2), pos(2, 1)].into_iter().collect();
        let state =
            GameState::from_parts(Board::empty(), pos(0, 0), pos(7, 7), blocked, Side::White)
                .unwrap();
        let config = AiConfig {
            stall_bias: 20.0,
            ..AiConfig::default()
        };
        let mut engine = AiEngine::with_seed(config, 1);
        assert_eq!(engine.search(&state, 1).value, -20.0);
    }

    #[test]
    fn test_depth_zero_falls_back_to_random_move() {
        let state = GameState::new_game(&Board::empty(), pos(3, 3), pos(7, 7)).unwrap();
        let mut engine = AiEngine::with_seed(AiConfig::default(), 17);

        let result = engine.search(&state, 0);
        assert_eq!(result.best_move, None);
        assert_eq!(result.nodes, 1);

        let legal = state.legal_moves(Side::White);
        for _ in 0..10 {
            let mv = engine.best_move_for_ai(&state, 0).unwrap();
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn test_search_does_not_touch_live_state() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let state = random_midgame(&mut rng, 6);
        let before = state.clone();

        let mut engine = AiEngine::with_seed(AiConfig::default(), 3);
        engine.search(&state, 4);
        assert_eq!(state, before);
    }

    #[test]
    fn test_engine_moves_accepted_by_live_game() {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let mut engine = AiEngine::with_seed(AiConfig::from_difficulty(Difficulty::Beginner), 3);

        for _ in 0..10 {
            let mut state = BoardGenerator::generate(&mut rng).into_game().unwrap();
            while !state.is_terminal() {
                if state.must_pass() {
                    state.pass_turn().unwrap();
                    continue;
                }
                let to = match state.current_turn() {
                    Side::White => engine.best_move(&state),
                    Side::Black => engine.search(&state, 2).best_move,
                };
                let to = to.expect("side to move has legal moves");
                assert!(state.apply_move(to));
            }
        }
    }

    #[test]
    fn test_difficulty_config() {
        let beginner = AiConfig::from_difficulty(Difficulty::Beginner);
        assert_eq!(beginner.max_depth, 2);
        assert_eq!(beginner.stall_bias, DEFAULT_STALL_BIAS);

        let amateur = AiConfig::default();
        assert_eq!(amateur.max_depth, 4);

        let expert = AiConfig::from_difficulty(Difficulty::Expert).with_depth(5);
        assert_eq!(expert.difficulty, Difficulty::Expert);
        assert_eq!(expert.max_depth, 5);

        let json = serde_json::to_string(&expert).unwrap();
        let decoded: AiConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, expert);
    }
}
