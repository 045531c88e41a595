use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use connect4_engine::ai::{Agent, EngineAgent, RandomAgent, Strategy};
use connect4_engine::arena::play_match;
use connect4_engine::config::AppConfig;
use connect4_engine::game::Board;
use connect4_engine::harness::Connect4Agent;

/// Connect Four move-selection engine.
#[derive(Parser)]
#[command(name = "connect4", about = "Bounded-depth Connect Four engine")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true, default_value = "connect4.toml")]
    config: PathBuf,

    /// Override the search strategy
    #[arg(long, global = true)]
    strategy: Option<StrategyArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the 1-based column to play on a board read from a file or stdin
    Move {
        /// Board file (printed `|X|O| |` layout or raw rows with `.` blanks)
        #[arg(long)]
        board: Option<PathBuf>,

        /// Symbol to move: X or O
        #[arg(long, default_value = "X")]
        symbol: char,
    },
    /// Play the engine against an opponent and report the tally
    Match {
        #[arg(long, default_value_t = 10)]
        games: usize,

        #[arg(long, value_enum, default_value = "random")]
        opponent: Opponent,

        #[arg(long, default_value_t = 6)]
        rows: usize,

        #[arg(long, default_value_t = 7)]
        cols: usize,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the default configuration as TOML
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    AlphaBeta,
    BestFirst,
}

#[derive(Clone, Copy, ValueEnum)]
enum Opponent {
    Random,
    Greedy,
    AlphaBeta,
    BestFirst,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    if let Some(strategy) = cli.strategy {
        config.search.strategy = match strategy {
            StrategyArg::AlphaBeta => Strategy::AlphaBeta,
            StrategyArg::BestFirst => Strategy::BestFirst,
        };
    }

    match cli.command {
        Command::Move { board, symbol } => {
            let text = match board {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading board {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("reading board from stdin")?;
                    buf
                }
            };
            let board = Board::parse_text(&text).context("parsing board")?;
            if board.is_full() {
                bail!("the board is full, there is no move to make");
            }

            let mut agent = Connect4Agent::new("cli", config);
            let grid = board.to_grid();
            agent.init_agent(symbol, board.rows(), board.cols(), &grid)?;
            let column = agent.choose_move(&grid, board.rows(), board.cols(), symbol)?;
            println!("{column}");
        }
        Command::Match {
            games,
            opponent,
            rows,
            cols,
            json,
        } => {
            if rows == 0 || cols == 0 {
                bail!("board dimensions must be at least 1x1");
            }
            let mut engine = EngineAgent::new(&config);
            let mut other: Box<dyn Agent> = match opponent {
                Opponent::Random => Box::new(RandomAgent::new()),
                Opponent::Greedy => Box::new(RandomAgent::greedy(None)),
                Opponent::AlphaBeta | Opponent::BestFirst => {
                    let mut other_config = config.clone();
                    other_config.search.strategy = match opponent {
                        Opponent::BestFirst => Strategy::BestFirst,
                        _ => Strategy::AlphaBeta,
                    };
                    Box::new(EngineAgent::new(&other_config))
                }
            };

            let summary = play_match(&mut engine, other.as_mut(), games, rows, cols)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{} vs {}", summary.agent_a, summary.agent_b);
                println!(
                    "  games: {}  wins: {}  losses: {}  draws: {}",
                    summary.games, summary.wins_a, summary.wins_b, summary.draws
                );
                println!(
                    "  win rate: {:.1}%  avg length: {:.1} moves",
                    summary.win_rate_a() * 100.0,
                    summary.avg_game_length
                );
            }
        }
        Command::Config => {
            print!("{}", AppConfig::default_toml()?);
        }
    }

    Ok(())
}
