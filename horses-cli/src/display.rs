//! 终端棋盘显示

use std::fmt::Write;

use horses_core::{GameState, Position, Side, BOARD_HEIGHT, BOARD_WIDTH};

/// 将对局渲染为文本棋盘
///
/// `W`/`B` 为双方的马，`##` 为封锁格，数字为剩余分值，`.` 为空格。
pub fn render(state: &GameState) -> String {
    let mut out = String::new();
    let white = state.position(Side::White);
    let black = state.position(Side::Black);

    out.push_str("    ");
    for col in 0..BOARD_WIDTH {
        let _ = write!(out, "{:>3}", col);
    }
    out.push('\n');

    for row in 0..BOARD_HEIGHT {
        let _ = write!(out, "{:>3} ", row);
        for col in 0..BOARD_WIDTH {
            let pos = Position::new_unchecked(row as u8, col as u8);
            let cell = if pos == white {
                "W".to_string()
            } else if pos == black {
                "B".to_string()
            } else if state.blocked().contains(pos) {
                "##".to_string()
            } else {
                match state.board().get(pos) {
                    0 => ".".to_string(),
                    value => value.to_string(),
                }
            };
            let _ = write!(out, "{:>3}", cell);
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "White {} : {} Black, {} to move",
        state.score(Side::White),
        state.score(Side::Black),
        state.current_turn()
    );
    out
}
