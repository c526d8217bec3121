//! 规则常量定义

/// 棋盘宽度（列数）
pub const BOARD_WIDTH: usize = 8;

/// 棋盘高度（行数）
pub const BOARD_HEIGHT: usize = 8;

/// 棋盘格子总数
pub const BOARD_SQUARES: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// 有分值格子的固定分值（按抽取顺序依次分配）
pub const SQUARE_VALUES: [i32; 10] = [-10, -5, -4, -3, -1, 1, 3, 4, 5, 10];

/// 随机棋盘需要抽取的格子数：10 个分值格 + 双方起始位置
pub const DRAWN_SQUARES: usize = SQUARE_VALUES.len() + 2;

/// 一方无路可走时，对方每走一步扣除的分数
pub const FORFEIT_PENALTY: i32 = 4;

/// 马的 8 个跳跃方向 (行偏移, 列偏移)
///
/// 顺序固定，搜索在分值相同时保留先出现的走法。
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
