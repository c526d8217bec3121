use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use horses_ai::AiEngine;
use horses_core::GameState;
use horses_cli::{
    Args, GreedyOpponent, HumanOpponent, MatchSettings, Opponent, OpponentKind, RandomOpponent,
    Session,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = match &args.settings {
        Some(path) => MatchSettings::load_from(path)?,
        None => MatchSettings::load(),
    };
    let settings = args.apply(settings);

    // 初始化日志，RUST_LOG 优先
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().or_else(|_| {
                tracing_subscriber::EnvFilter::try_new(format!(
                    "horses_cli={0},horses_ai={0},horses_core={0}",
                    settings.log_level.as_directive()
                ))
            })?,
        )
        .init();

    let seed = settings.seed.unwrap_or_else(rand::random);
    info!(seed, difficulty = %settings.difficulty, "Smart Horses 启动");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let state = GameState::random(&mut rng).context("无法生成初始局面")?;
    let engine = AiEngine::with_seed(settings.ai_config(), seed);

    let stdout = io::stdout();
    let report = match settings.opponent {
        OpponentKind::Human => {
            let human = HumanOpponent::new(io::stdin().lock(), io::stdout());
            play(state, engine, human, stdout.lock(), settings.show_board)?
        }
        OpponentKind::Random => {
            let random = RandomOpponent::new(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)));
            play(state, engine, random, stdout.lock(), settings.show_board)?
        }
        OpponentKind::Greedy => play(state, engine, GreedyOpponent, stdout.lock(), settings.show_board)?,
    };

    info!(?report, "对局结束");
    Ok(())
}

fn play<O: Opponent, W: io::Write>(
    state: GameState,
    engine: AiEngine,
    opponent: O,
    output: W,
    show_board: bool,
) -> Result<horses_cli::MatchReport> {
    Session::new(state, engine, opponent, output)
        .show_board(show_board)
        .run()
}
