//! 黑方走子来源

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use horses_core::{GameState, Position, Side};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// 黑方玩家
pub trait Opponent {
    /// 显示名称
    fn name(&self) -> &str;

    /// 选择目标格。只在黑方有合法走法时调用，返回的格子仍由对局规则校验。
    fn choose_move(&mut self, state: &GameState) -> Result<Position>;
}

/// 终端输入的玩家，每行输入 `row col`
pub struct HumanOpponent<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanOpponent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

/// 解析 `row col`（也接受 `row,col`）
pub fn parse_square(line: &str) -> Option<Position> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Position::new(row, col)
}

impl<R: BufRead, W: Write> Opponent for HumanOpponent<R, W> {
    fn name(&self) -> &str {
        "Human"
    }

    fn choose_move(&mut self, state: &GameState) -> Result<Position> {
        let options: Vec<String> = state
            .legal_moves(Side::Black)
            .iter()
            .map(|p| p.to_string())
            .collect();

        loop {
            write!(self.output, "Your move [{}] (row col, q to quit): ", options.join(" "))?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self.input.read_line(&mut line).context("读取输入失败")?;
            let line = line.trim();
            if read == 0 || line.eq_ignore_ascii_case("q") {
                bail!("对局被玩家中止");
            }

            match parse_square(line) {
                Some(pos) => return Ok(pos),
                None => writeln!(self.output, "Cannot parse {:?}, expected e.g. `5 6`", line)?,
            }
        }
    }
}

/// 随机走子
pub struct RandomOpponent {
    rng: ChaCha8Rng,
}

impl RandomOpponent {
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self { rng }
    }
}

impl Opponent for RandomOpponent {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose_move(&mut self, state: &GameState) -> Result<Position> {
        match state.legal_moves(Side::Black).choose(&mut self.rng) {
            Some(pos) => Ok(*pos),
            None => bail!("黑方无路可走"),
        }
    }
}

/// 贪心走子：收集分值最高的相邻格，分值相同取先出现的
pub struct GreedyOpponent;

impl Opponent for GreedyOpponent {
    fn name(&self) -> &str {
        "Greedy"
    }

    fn choose_move(&mut self, state: &GameState) -> Result<Position> {
        let mut best: Option<(i32, Position)> = None;
        for to in state.legal_moves(Side::Black) {
            let value = state.board().get(to);
            if best.map_or(true, |(v, _)| value > v) {
                best = Some((value, to));
            }
        }
        match best {
            Some((_, pos)) => Ok(pos),
            None => bail!("黑方无路可走"),
        }
    }
}
