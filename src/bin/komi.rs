//! Headless driver for the komi engine.
//!
//! Reads commands from stdin (`<row> <col>`, `reset`, `yes`, `no`,
//! `quit`) or plays random concurrent games, and writes every controller
//! event to stdout as one JSON line. Logs go to stderr.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use komi_engine::{
    Color, GameConfig, GameController, GameError, GameEvent, Phase, RandomPlayer,
};

/// Capture-Go rule engine driver
#[derive(Parser, Debug)]
#[command(name = "komi")]
#[command(about = "Play capture-Go from the command line", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board dimension (overrides the file)
    #[arg(long)]
    board_size: Option<usize>,

    /// Captures needed to win (overrides the file)
    #[arg(long)]
    win_threshold: Option<u32>,

    /// Colour that moves first (overrides the file)
    #[arg(long, value_enum)]
    starting_color: Option<ColorArg>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read moves from stdin (default)
    Play,

    /// Let random players race each other on separate threads
    Random {
        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Number of player threads
        #[arg(long, default_value = "4")]
        threads: usize,

        /// Games to play back to back
        #[arg(long, default_value = "1")]
        games: usize,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorArg {
    Black,
    White,
}

impl From<ColorArg> for Color {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Black => Color::Black,
            ColorArg::White => Color::White,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!(?config, "configuration loaded");

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_play(config),
        Command::Random {
            seed,
            threads,
            games,
        } => run_random(config, seed, threads, games),
    }
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            GameConfig::from_toml_str(&text)?
        }
        None => GameConfig::default(),
    };
    if let Some(size) = cli.board_size {
        config = config.with_board_size(size);
    }
    if let Some(threshold) = cli.win_threshold {
        config = config.with_win_threshold(threshold);
    }
    if let Some(color) = cli.starting_color {
        config = config.with_starting_color(color.into());
    }
    config.validate()?;
    Ok(config)
}

/// Start a thread that prints events as JSON lines.
fn spawn_printer() -> (mpsc::Sender<GameEvent>, thread::JoinHandle<Result<()>>) {
    let (tx, rx) = mpsc::channel::<GameEvent>();
    let handle = thread::spawn(move || -> Result<()> {
        let stdout = io::stdout();
        for event in rx {
            let mut out = stdout.lock();
            serde_json::to_writer(&mut out, &event)?;
            writeln!(out)?;
        }
        Ok(())
    });
    (tx, handle)
}

/// What a stdin line did.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Applied,
    Rejected(GameError),
    Ignored,
    Quit,
}

fn handle_line(controller: &GameController, line: &str) -> Result<Outcome> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let outcome = match words.as_slice() {
        [] => Outcome::Ignored,
        ["quit"] => Outcome::Quit,
        ["reset"] => {
            controller.reset()?;
            Outcome::Applied
        }
        ["yes"] => {
            controller.respond_to_game_over(true)?;
            Outcome::Applied
        }
        ["no"] => {
            controller.respond_to_game_over(false)?;
            Outcome::Applied
        }
        [row, col] => match (row.parse::<i32>(), col.parse::<i32>()) {
            (Ok(row), Ok(col)) => match controller.submit_move(row, col) {
                Ok(_) => Outcome::Applied,
                Err(err) => Outcome::Rejected(err),
            },
            _ => {
                warn!(line, "expected two integers");
                Outcome::Ignored
            }
        },
        _ => {
            warn!(line, "unknown command");
            Outcome::Ignored
        }
    };
    Ok(outcome)
}

fn run_play(config: GameConfig) -> Result<()> {
    let (tx, printer) = spawn_printer();
    let controller = GameController::new(config)?.with_observer(Arc::new(tx));

    for line in io::stdin().lock().lines() {
        let line = line?;
        match handle_line(&controller, &line)? {
            Outcome::Quit => break,
            Outcome::Rejected(err) => warn!(%err, line = %line, "move not played"),
            Outcome::Applied | Outcome::Ignored => {}
        }
        if controller.phase() == Phase::Terminated {
            break;
        }
    }

    drop(controller);
    join_printer(printer)
}

fn run_random(config: GameConfig, seed: u64, threads: usize, games: usize) -> Result<()> {
    if threads == 0 {
        bail!("at least one player thread is needed");
    }

    let (tx, printer) = spawn_printer();
    let controller = Arc::new(GameController::new(config)?.with_observer(Arc::new(tx)));
    let mut root = RandomPlayer::new(seed);

    for game in 0..games {
        if game > 0 {
            controller.reset()?;
        }

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let controller = Arc::clone(&controller);
                let mut player = root.fork();
                thread::spawn(move || {
                    while controller.phase() == Phase::AwaitingMove {
                        if player.submit(&controller).is_none() {
                            break;
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            if handle.join().is_err() {
                bail!("player thread panicked");
            }
        }

        let snapshot = controller.snapshot();
        info!(
            game,
            winner = ?snapshot.winner,
            black = snapshot.captures[Color::Black],
            white = snapshot.captures[Color::White],
            "game finished"
        );
    }

    controller.terminate();
    drop(controller);
    join_printer(printer)
}

fn join_printer(printer: thread::JoinHandle<Result<()>>) -> Result<()> {
    match printer.join() {
        Ok(result) => result,
        Err(_) => bail!("event printer panicked"),
    }
}
