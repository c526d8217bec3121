//! 棋盘与封锁格集合

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::position::Position;

/// 棋盘
///
/// 每格保存一个分值（可正可负），0 表示空格或分值已被收集。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// 8x8 分值表，索引为 [row][col]
    cells: [[i32; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            cells: [[0; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    /// 获取指定位置的分值
    pub fn get(&self, pos: Position) -> i32 {
        if pos.is_valid() {
            self.cells[pos.row as usize][pos.col as usize]
        } else {
            0
        }
    }

    /// 设置指定位置的分值
    pub fn set(&mut self, pos: Position, value: i32) {
        if pos.is_valid() {
            self.cells[pos.row as usize][pos.col as usize] = value;
        }
    }

    /// 收集指定位置的分值：返回原值并将该格清零
    pub fn take(&mut self, pos: Position) -> i32 {
        let value = self.get(pos);
        self.set(pos, 0);
        value
    }

    /// 获取所有非零分值格
    pub fn valued_squares(&self) -> Vec<(Position, i32)> {
        let mut result = Vec::new();
        for row in 0..BOARD_HEIGHT {
            for col in 0..BOARD_WIDTH {
                let value = self.cells[row][col];
                if value != 0 {
                    result.push((Position::new_unchecked(row as u8, col as u8), value));
                }
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

/// 封锁格集合
///
/// 以 64 位位图表示，只能增加不能删除。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockedSquares(u64);

impl BlockedSquares {
    /// 创建空集合
    pub fn new() -> Self {
        Self(0)
    }

    /// 加入一个格子，返回该格子之前是否不在集合中
    pub fn insert(&mut self, pos: Position) -> bool {
        if !pos.is_valid() {
            return false;
        }
        let bit = 1u64 << pos.to_index();
        let added = self.0 & bit == 0;
        self.0 |= bit;
        added
    }

    /// 检查格子是否已封锁
    pub fn contains(&self, pos: Position) -> bool {
        pos.is_valid() && self.0 & (1u64 << pos.to_index()) != 0
    }

    /// 已封锁格子数量
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// 是否包含另一个集合的全部格子
    pub fn is_superset(&self, other: &BlockedSquares) -> bool {
        self.0 & other.0 == other.0
    }
}

impl FromIterator<Position> for BlockedSquares {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut blocked = Self::new();
        for pos in iter {
            blocked.insert(pos);
        }
        blocked
    }
}
