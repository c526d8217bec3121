//! Smart Horses 终端对局
//!
//! 包含:
//! - 命令行参数与设置文件
//! - 黑方走子来源（终端输入、随机、贪心）
//! - 对局控制
//! - 文本棋盘显示

pub mod cli;
pub mod display;
pub mod opponent;
pub mod session;
pub mod settings;

pub use cli::Args;
pub use opponent::{GreedyOpponent, HumanOpponent, Opponent, RandomOpponent};
pub use session::{MatchReport, Session};
pub use settings::{LogLevel, MatchSettings, OpponentKind};
