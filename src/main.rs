use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chessbot::config::{EngineConfig, Mode, Side};
use chessbot::position::Position;
use chessbot::search::SearchEngine;
use chessbot::types::Depth;
use chessbot::uci::UciHandler;

#[derive(Parser)]
#[command(name = "chessbot")]
#[command(about = "Fixed-depth negamax chess engine", long_about = None)]
struct Args {
    /// Protocol to speak
    #[arg(value_enum, default_value_t = Mode::Uci)]
    mode: Mode,

    /// Search depth in plies
    #[arg(short, long, default_value_t = Depth::DEFAULT)]
    depth: Depth,

    /// Side the human plays in terminal mode
    #[arg(long, value_enum, default_value_t = Side::White)]
    human: Side,

    /// Log filter when RUST_LOG is unset (logs go to stderr)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries the protocol, so logs must stay on stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = EngineConfig {
        mode: args.mode,
        depth: args.depth,
        human: args.human.into(),
    };
    tracing::debug!(?config, "starting");

    match config.mode {
        Mode::Uci => {
            let mut handler = UciHandler::with_engine(SearchEngine::default(), config.depth, io::stdout());
            handler.run(io::stdin().lock())?;
        }
        Mode::Terminal => {
            let mut out = io::stdout();
            chessbot::terminal::play(&config, Position::startpos(), io::stdin().lock(), &mut out)?;
        }
    }

    Ok(())
}
