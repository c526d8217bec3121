//! 命令行参数

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use horses_core::Difficulty;

use crate::settings::{MatchSettings, OpponentKind};

/// 难度选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DifficultyArg {
    /// 搜索 2 层
    Beginner,
    /// 搜索 4 层
    Amateur,
    /// 搜索 6 层
    Expert,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Beginner => Difficulty::Beginner,
            DifficultyArg::Amateur => Difficulty::Amateur,
            DifficultyArg::Expert => Difficulty::Expert,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "horses")]
#[command(about = "Smart Horses: two knights collecting points, White played by a minimax AI", long_about = None)]
pub struct Args {
    /// AI difficulty preset
    #[arg(short, long, value_enum)]
    pub difficulty: Option<DifficultyArg>,

    /// Search depth in plies, overrides the difficulty preset
    #[arg(long)]
    pub depth: Option<u8>,

    /// Who plays Black
    #[arg(short, long, value_enum)]
    pub opponent: Option<OpponentKind>,

    /// Random seed for the board and the AI fallback move
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Settings file (JSON); defaults to the user config directory
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Only print moves and the final result
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// 用命令行参数覆盖设置
    pub fn apply(&self, mut settings: MatchSettings) -> MatchSettings {
        if let Some(difficulty) = self.difficulty {
            settings.difficulty = difficulty.into();
        }
        if self.depth.is_some() {
            settings.depth = self.depth;
        }
        if let Some(opponent) = self.opponent {
            settings.opponent = opponent;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if self.quiet {
            settings.show_board = false;
        }
        settings
    }
}
