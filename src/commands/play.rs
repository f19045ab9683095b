//! Interactive play mode
//!
//! Line-based game loop: the board is printed, the player types a guess such
//! as `X=E`, and the loop repeats until the puzzle is won or lost.

use crate::core::{Difficulty, Puzzle, Quote};
use crate::game::{Game, GameMode, GameStatus, GuessError, GuessOutcome};
use crate::output::display::{print_board, print_game_summary, print_session_stats};
use crate::output::formatters::letter_list;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, Write};
use std::time::Instant;

/// A parsed line of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Guess { cipher: char, plain: char },
    Hint,
    Board,
    Quit,
    Unknown,
}

impl PlayerCommand {
    /// Parse `X=Y`, `X Y`, `XY`, `hint`, `board` or `quit`
    ///
    /// # Examples
    /// ```
    /// use cryptogram::commands::PlayerCommand;
    ///
    /// assert_eq!(
    ///     PlayerCommand::parse("q = e"),
    ///     PlayerCommand::Guess { cipher: 'Q', plain: 'E' }
    /// );
    /// assert_eq!(PlayerCommand::parse("?"), PlayerCommand::Hint);
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim().to_ascii_lowercase();
        match trimmed.as_str() {
            "hint" | "h" | "?" => return Self::Hint,
            "board" | "b" | "" => return Self::Board,
            "quit" | "q" | "exit" => return Self::Quit,
            _ => {}
        }

        let letters: Vec<char> = trimmed
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '=')
            .collect();
        match letters.as_slice() {
            [cipher, plain] if cipher.is_ascii_alphabetic() && plain.is_ascii_alphabetic() => {
                Self::Guess {
                    cipher: cipher.to_ascii_uppercase(),
                    plain: plain.to_ascii_uppercase(),
                }
            }
            _ => Self::Unknown,
        }
    }
}

/// Statistics for one interactive session
#[derive(Debug, Default, Clone)]
pub struct SessionStats {
    pub games: usize,
    pub wins: usize,
    pub total_score: u64,
    pub best_score: u32,
}

impl SessionStats {
    pub fn record(&mut self, won: bool, score: u32) {
        self.games += 1;
        self.wins += usize::from(won);
        self.total_score += u64::from(score);
        self.best_score = self.best_score.max(score);
    }
}

/// How each new game's puzzle is produced
pub trait PuzzleSource {
    fn next_puzzle(&mut self) -> Result<Puzzle>;
}

/// Random puzzles from a corpus
pub struct RandomPuzzles<'a> {
    pub quotes: &'a [Quote],
    pub difficulty: Difficulty,
    pub rng: rand::rngs::StdRng,
}

impl PuzzleSource for RandomPuzzles<'_> {
    fn next_puzzle(&mut self) -> Result<Puzzle> {
        use rand::Rng;

        anyhow::ensure!(!self.quotes.is_empty(), "No quotes available");
        let quote = self.quotes[self.rng.random_range(0..self.quotes.len())].clone();
        Ok(Puzzle::generate(quote, self.difficulty, &mut self.rng))
    }
}

/// A single fixed puzzle, such as the daily challenge
pub struct FixedPuzzle(pub Puzzle);

impl PuzzleSource for FixedPuzzle {
    fn next_puzzle(&mut self) -> Result<Puzzle> {
        Ok(self.0.clone())
    }
}

/// Run the interactive game loop
///
/// # Errors
///
/// Returns an error on I/O failure reading input or if no puzzle can be built.
pub fn run_play<P: PuzzleSource>(source: &mut P, mode: GameMode) -> Result<SessionStats> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Cryptogram - Interactive Mode               ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Each letter of the quote has been swapped for a different letter.");
    println!("Enter a guess as CIPHER=PLAIN, e.g. 'X=E'.");
    println!("Commands: 'hint' to reveal a letter, 'board' to redraw, 'quit' to exit\n");
    if let GameMode::Timed(config) = mode {
        println!(
            "⏱  Timed mode: a letter is revealed every {}s, {}s limit\n",
            config.reveal_interval.as_secs(),
            config.time_limit.as_secs()
        );
    }

    let mut stats = SessionStats::default();

    loop {
        let mut game = Game::new(source.next_puzzle()?, mode);
        let started = Instant::now();
        print_board(game.puzzle(), game.tracker(), false);

        let quit = loop {
            let revealed = game.tick(started.elapsed());
            if !revealed.is_empty() {
                println!("⏱  Revealed: {}", letter_list(&revealed).bright_magenta());
                print_board(game.puzzle(), game.tracker(), false);
            }
            if game.status().is_over() {
                break false;
            }

            if let Some(next) = game.next_reveal_in(started.elapsed()) {
                println!("   next reveal in {}s", next.as_secs());
            }

            let input = get_user_input("Guess")?;
            // Input may have taken a while; apply the clock before the guess
            let late = game.tick(started.elapsed());
            if !late.is_empty() {
                println!("⏱  Revealed: {}", letter_list(&late).bright_magenta());
            }
            if game.status().is_over() {
                break false;
            }

            match PlayerCommand::parse(&input) {
                PlayerCommand::Quit => break true,
                PlayerCommand::Board => print_board(game.puzzle(), game.tracker(), false),
                PlayerCommand::Hint => match game.hint() {
                    Ok(letter) => {
                        println!(
                            "💡 Revealed {}",
                            char::from(letter).to_string().bright_cyan()
                        );
                        print_board(game.puzzle(), game.tracker(), false);
                    }
                    Err(GuessError::HintsExhausted) => println!("{}", "No hints left!".red()),
                    Err(e) => println!("{}", e.to_string().red()),
                },
                PlayerCommand::Guess { cipher, plain } => match game.guess(cipher, plain) {
                    Ok(GuessOutcome::Correct { occurrences }) => {
                        println!(
                            "{}",
                            format!("✓ {cipher} is {plain} ({occurrences} found)").green()
                        );
                        print_board(game.puzzle(), game.tracker(), false);
                    }
                    Ok(GuessOutcome::Incorrect { mistakes_left }) => {
                        println!(
                            "{}",
                            format!("✗ {cipher} is not {plain} ({mistakes_left} mistakes left)")
                                .red()
                        );
                    }
                    Ok(GuessOutcome::AlreadySolved) => println!("{cipher} is already solved"),
                    Err(e) => println!("{}", e.to_string().red()),
                },
                PlayerCommand::Unknown => {
                    println!("❌ Invalid input! Use X=E, 'hint', 'board' or 'quit'");
                }
            }
        };

        let elapsed = started.elapsed();
        if quit && game.status() == GameStatus::InProgress {
            println!("\n👋 Thanks for playing!\n");
            print_session_stats(&stats);
            return Ok(stats);
        }

        let score = game.score(elapsed);
        stats.record(game.status() == GameStatus::Won, score.total);
        print_game_summary(&game, &score, elapsed);

        match get_user_input("Play again? (yes/no)")?
            .to_lowercase()
            .as_str()
        {
            "yes" | "y" => println!("\n🔄 New game started!\n"),
            _ => {
                println!("\n👋 Thanks for playing!\n");
                print_session_stats(&stats);
                return Ok(stats);
            }
        }
    }
}

/// Get user input with a prompt
fn get_user_input(prompt: &str) -> Result<String> {
    print!("{prompt}: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("Failed to read input")?;
    if read == 0 {
        return Ok("quit".to_string());
    }

    Ok(input.trim().to_string())
}
