//! Cryptogram - CLI
//!
//! Generate, plan, simulate and play cryptogram puzzles built from famous quotes.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use cryptogram::{
    commands::{
        FixedPuzzle, GenerateConfig, PuzzleExport, QuoteChoice, RandomPuzzles, SimulateConfig,
        generate_puzzle, run_play, run_simulation,
    },
    core::{Difficulty, Puzzle, Quote},
    daily::{daily_puzzle, today},
    game::{GameMode, RevealOrderPlanner, TimedConfig},
    output::{print_plan, print_puzzle, print_simulation_result},
    quotes::{QUOTES, loader::load_from_file, loader::quotes_from_slice},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashSet;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cryptogram",
    about = "Cryptogram puzzles: decrypt famous quotes letter by letter",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Difficulty: easy, medium (default), hard
    #[arg(short, long, global = true, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Quote file ('text|author' lines or a .json array); defaults to the embedded corpus
    #[arg(short = 'q', long, global = true, env = "CRYPTOGRAM_QUOTES")]
    quotes: Option<String>,

    /// Rng seed for reproducible puzzles
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively (default)
    Play {
        /// Auto-reveal letters on a clock and lose when time runs out
        #[arg(short, long)]
        timed: bool,

        /// Seconds between timed reveals
        #[arg(long, default_value = "20")]
        interval: u64,

        /// Time limit in seconds for timed mode
        #[arg(long, default_value = "300")]
        limit: u64,

        /// Play today's daily challenge
        #[arg(long)]
        daily: bool,
    },

    /// Generate and print a puzzle
    Generate {
        /// Use the quote at this index in the corpus
        #[arg(short, long, conflicts_with = "text")]
        index: Option<usize>,

        /// Encipher custom text instead of a corpus quote
        #[arg(long)]
        text: Option<String>,

        /// Author for custom text
        #[arg(long, default_value = "Unknown", requires = "text")]
        author: String,

        /// Print the cipher key and solution
        #[arg(short = 'k', long)]
        show_key: bool,

        /// Emit JSON instead of a board
        #[arg(long)]
        json: bool,
    },

    /// Show the daily challenge
    Daily {
        /// Date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Print the cipher key and solution
        #[arg(short = 'k', long)]
        show_key: bool,

        /// Emit JSON instead of a board
        #[arg(long)]
        json: bool,
    },

    /// Show the timed-mode reveal order for a puzzle
    Plan {
        /// Use the quote at this index in the corpus
        #[arg(short, long)]
        index: Option<usize>,
    },

    /// Simulate games with a frequency-analysis bot
    Simulate {
        /// Number of games to play
        #[arg(short = 'n', long, default_value = "300")]
        count: usize,

        /// Use only the global difficulty instead of cycling through all levels
        #[arg(long)]
        fixed: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cryptogram={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the quote corpus based on the -q flag
fn load_quotes(path: Option<&str>) -> Result<Vec<Quote>> {
    match path {
        None => Ok(quotes_from_slice(QUOTES)),
        Some(path) => {
            let quotes = load_from_file(path).with_context(|| format!("Loading {path}"))?;
            anyhow::ensure!(!quotes.is_empty(), "No valid quotes in {path}");
            Ok(quotes)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let quotes = load_quotes(cli.quotes.as_deref())?;
    info!(count = quotes.len(), "quote corpus ready");

    let command = cli.command.unwrap_or(Commands::Play {
        timed: false,
        interval: 20,
        limit: 300,
        daily: false,
    });

    match command {
        Commands::Play {
            timed,
            interval,
            limit,
            daily,
        } => {
            let mode = if timed {
                GameMode::Timed(TimedConfig {
                    reveal_interval: Duration::from_secs(interval),
                    time_limit: Duration::from_secs(limit),
                })
            } else {
                GameMode::Classic
            };
            run_play_command(&quotes, cli.difficulty, cli.seed, mode, daily)
        }
        Commands::Generate {
            index,
            text,
            author,
            show_key,
            json,
        } => {
            let quote = match (text, index) {
                (Some(text), _) => QuoteChoice::Text { text, author },
                (None, Some(index)) => QuoteChoice::Index(index),
                (None, None) => QuoteChoice::Random,
            };
            let config = GenerateConfig {
                difficulty: cli.difficulty,
                seed: cli.seed,
                quote,
            };
            let puzzle = generate_puzzle(&quotes, &config)?;
            show_puzzle(&puzzle, show_key, json)
        }
        Commands::Daily {
            date,
            show_key,
            json,
        } => {
            let date = date.unwrap_or_else(today);
            let puzzle = daily_puzzle(date, &quotes, cli.difficulty)?;
            if !json {
                println!("\n📅 Daily challenge for {date}");
            }
            show_puzzle(&puzzle, show_key, json)
        }
        Commands::Plan { index } => {
            let config = GenerateConfig {
                difficulty: cli.difficulty,
                seed: cli.seed,
                quote: index.map_or(QuoteChoice::Random, QuoteChoice::Index),
            };
            let puzzle = generate_puzzle(&quotes, &config)?;
            let solved: FxHashSet<u8> = puzzle.prerevealed().iter().copied().collect();
            let ranks = RevealOrderPlanner.ranked(&puzzle, &solved);
            print_plan(&puzzle, &ranks);
            Ok(())
        }
        Commands::Simulate { count, fixed } => {
            println!("Simulating {count} games...");
            let config = SimulateConfig {
                seed: cli.seed.unwrap_or(0),
                difficulty: fixed.then_some(cli.difficulty),
                ..SimulateConfig::new(count)
            };
            let result = run_simulation(&quotes, &config)?;
            print_simulation_result(&result);
            Ok(())
        }
    }
}

fn show_puzzle(puzzle: &Puzzle, show_key: bool, json: bool) -> Result<()> {
    if json {
        println!("{}", PuzzleExport::new(puzzle, show_key).to_json()?);
    } else {
        print_puzzle(puzzle, show_key);
    }
    Ok(())
}

fn run_play_command(
    quotes: &[Quote],
    difficulty: Difficulty,
    seed: Option<u64>,
    mode: GameMode,
    daily: bool,
) -> Result<()> {
    let stats = if daily {
        let date = today();
        println!("\n📅 Daily challenge for {date}");
        let mut source = FixedPuzzle(daily_puzzle(date, quotes, difficulty)?);
        run_play(&mut source, mode)?
    } else {
        let rng = seed.map_or_else(
            || StdRng::from_rng(&mut rand::rng()),
            StdRng::seed_from_u64,
        );
        let mut source = RandomPuzzles {
            quotes,
            difficulty,
            rng,
        };
        run_play(&mut source, mode)?
    };

    debug!(games = stats.games, wins = stats.wins, "session ended");
    Ok(())
}
