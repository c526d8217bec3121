//! 难度预设

use serde::{Deserialize, Serialize};

/// AI 难度，对应搜索深度（层数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    /// 初级：depth=2
    Beginner,
    /// 业余：depth=4
    #[default]
    Amateur,
    /// 专家：depth=6
    Expert,
}

impl Difficulty {
    /// 搜索深度
    pub fn depth(&self) -> u8 {
        match self {
            Difficulty::Beginner => 2,
            Difficulty::Amateur => 4,
            Difficulty::Expert => 6,
        }
    }

    /// 显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Amateur => "Amateur",
            Difficulty::Expert => "Expert",
        }
    }

    /// 所有选项
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Beginner, Difficulty::Amateur, Difficulty::Expert]
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (depth {})", self.display_name(), self.depth())
    }
}
