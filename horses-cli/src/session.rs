//! 对局控制
//!
//! 白方由 AI 引擎走子，黑方由 [`Opponent`] 走子；无路可走的一方自动让步。

use std::io::Write;

use anyhow::{bail, Result};
use horses_ai::AiEngine;
use horses_core::{GameError, GameState, MoveOutcome, Side, Winner};
use tracing::info;

use crate::display;
use crate::opponent::Opponent;

/// 对局结果汇总
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchReport {
    pub winner: Winner,
    pub white_score: i32,
    pub black_score: i32,
    /// 实际走子步数（不含让步）
    pub plies: u32,
    /// 让步次数
    pub passes: u32,
}

/// 一局对局
pub struct Session<O, W> {
    state: GameState,
    engine: AiEngine,
    opponent: O,
    output: W,
    show_board: bool,
}

impl<O: Opponent, W: Write> Session<O, W> {
    pub fn new(state: GameState, engine: AiEngine, opponent: O, output: W) -> Self {
        Self {
            state,
            engine,
            opponent,
            output,
            show_board: true,
        }
    }

    /// 是否每步后打印棋盘
    pub fn show_board(mut self, show: bool) -> Self {
        self.show_board = show;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// 下完整局
    pub fn run(&mut self) -> Result<MatchReport> {
        let mut plies = 0;
        let mut passes = 0;

        info!(
            white = %self.state.position(Side::White),
            black = %self.state.position(Side::Black),
            opponent = self.opponent.name(),
            depth = self.engine.config().max_depth,
            "match started"
        );
        if self.show_board {
            write!(self.output, "{}", display::render(&self.state))?;
        }

        while !self.state.is_terminal() {
            let side = self.state.current_turn();

            if self.state.must_pass() {
                self.state.pass_turn()?;
                passes += 1;
                info!(%side, "no legal moves, turn passed");
                writeln!(self.output, "{} has no legal moves and passes.", side)?;
                continue;
            }

            let outcome = match side {
                Side::White => self.ai_turn()?,
                Side::Black => self.opponent_turn()?,
            };
            plies += 1;
            self.report_move(&outcome)?;
        }

        let report = MatchReport {
            winner: self.state.winner(),
            white_score: self.state.score(Side::White),
            black_score: self.state.score(Side::Black),
            plies,
            passes,
        };
        info!(
            winner = ?report.winner,
            white_score = report.white_score,
            black_score = report.black_score,
            plies,
            passes,
            "match finished"
        );
        writeln!(
            self.output,
            "Game over. White {} : {} Black. {}",
            report.white_score,
            report.black_score,
            match report.winner {
                Winner::White => "White (AI) wins.",
                Winner::Black => "Black wins.",
                Winner::Draw => "Draw.",
            }
        )?;
        Ok(report)
    }

    fn ai_turn(&mut self) -> Result<MoveOutcome> {
        let Some(to) = self.engine.best_move(&self.state) else {
            bail!("AI found no move although White is not stuck");
        };
        Ok(self.state.try_apply_move(to)?)
    }

    fn opponent_turn(&mut self) -> Result<MoveOutcome> {
        loop {
            let to = self.opponent.choose_move(&self.state)?;
            match self.state.try_apply_move(to) {
                Ok(outcome) => return Ok(outcome),
                Err(GameError::InvalidMove { .. }) => {
                    writeln!(self.output, "{} is not a legal move.", to)?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn report_move(&mut self, outcome: &MoveOutcome) -> Result<()> {
        let mv = outcome.mv;
        info!(%mv, captured = mv.captured, "move committed");

        write!(self.output, "{}", mv)?;
        if mv.captured != 0 {
            write!(self.output, " collects {}", mv.captured)?;
        }
        if let Some(stuck) = outcome.penalized {
            write!(self.output, ", {} is stuck and loses 4", stuck)?;
        }
        writeln!(self.output)?;

        if self.show_board {
            write!(self.output, "{}", display::render(&self.state))?;
        }
        Ok(())
    }
}
