//! 阵营与棋盘位置

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_HEIGHT, BOARD_SQUARES, BOARD_WIDTH};

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 白马（AI，先手）
    White,
    /// 黑马（外部玩家，后手）
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// 显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// 棋盘位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// 行 (0-7)
    pub row: u8,
    /// 列 (0-7)
    pub col: u8,
}

impl Position {
    /// 创建新位置
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_HEIGHT && (col as usize) < BOARD_WIDTH {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 检查位置是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.row as usize) < BOARD_HEIGHT && (self.col as usize) < BOARD_WIDTH
    }

    /// 获取偏移后的位置，越界返回 None
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Position> {
        let new_row = self.row as i16 + d_row as i16;
        let new_col = self.col as i16 + d_col as i16;
        if new_row >= 0
            && (new_row as usize) < BOARD_HEIGHT
            && new_col >= 0
            && (new_col as usize) < BOARD_WIDTH
        {
            Some(Position {
                row: new_row as u8,
                col: new_col as u8,
            })
        } else {
            None
        }
    }

    /// 转换为数组索引
    pub fn to_index(&self) -> usize {
        self.row as usize * BOARD_WIDTH + self.col as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_SQUARES {
            Some(Position {
                row: (index / BOARD_WIDTH) as u8,
                col: (index % BOARD_WIDTH) as u8,
            })
        } else {
            None
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
