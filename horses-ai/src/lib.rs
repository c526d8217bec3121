//! Smart Horses AI 引擎
//!
//! 包含:
//! - 局面评估函数
//! - Minimax + Alpha-Beta 搜索（定深）
//! - AI 决策入口（搜索无结果时随机兜底）

mod evaluate;
mod search;

pub use evaluate::{Evaluator, MOBILITY_WEIGHT};
pub use search::{AiConfig, AiEngine, SearchResult, DEFAULT_STALL_BIAS};
