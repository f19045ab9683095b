//! Display functions for boards and command results

use super::formatters::{create_progress_bar, letter_list, render_board};
use crate::commands::{SessionStats, SimulationResult};
use crate::core::Puzzle;
use crate::game::{Game, GameStatus, GuessTracker, LetterRank, ScoreBreakdown};
use colored::Colorize;
use rustc_hash::FxHashSet;
use std::time::Duration;

/// Board width in characters
pub const BOARD_WIDTH: usize = 48;

/// Print the puzzle board with the tracker's solved letters filled in
pub fn print_board(puzzle: &Puzzle, tracker: &GuessTracker, show_solution: bool) {
    let solved: FxHashSet<u8> = if show_solution {
        puzzle.cipher_letters().into_iter().collect()
    } else {
        tracker.solved().clone()
    };

    println!("\n{}", "─".repeat(BOARD_WIDTH + 4).cyan());
    for (cipher_row, guess_row) in render_board(puzzle, &solved, BOARD_WIDTH) {
        println!("  {}", cipher_row.bright_black());
        println!("  {}\n", guess_row.bright_white().bold());
    }
    println!("  {}", format!("— {}", puzzle.quote().author()).italic());
    println!("{}", "─".repeat(BOARD_WIDTH + 4).cyan());

    println!(
        "  Progress: [{}] {:.0}%",
        create_progress_bar(tracker.progress(), 1.0, 20).green(),
        tracker.progress() * 100.0
    );
    println!(
        "  Mistakes left: {}   Hints left: {}",
        tracker.mistakes_left().to_string().yellow(),
        tracker.hints_left().to_string().cyan()
    );
}

/// Print a freshly generated puzzle, optionally with its key
pub fn print_puzzle(puzzle: &Puzzle, show_key: bool) {
    println!("\n{}", "═".repeat(BOARD_WIDTH + 4).cyan());
    println!(
        " {} {} ",
        "CRYPTOGRAM".bright_cyan().bold(),
        format!("({})", puzzle.difficulty()).bright_yellow()
    );
    println!("{}", "═".repeat(BOARD_WIDTH + 4).cyan());

    let given: FxHashSet<u8> = puzzle.prerevealed().iter().copied().collect();
    for (cipher_row, guess_row) in render_board(puzzle, &given, BOARD_WIDTH) {
        println!("  {}", cipher_row.bright_white().bold());
        println!("  {}\n", guess_row.bright_black());
    }
    println!("  {}", format!("— {}", puzzle.quote().author()).italic());

    println!("\n  Letters:      {}", puzzle.cipher_letters().len());
    if !puzzle.prerevealed().is_empty() {
        println!("  Given:        {}", letter_list(puzzle.prerevealed()));
    }
    println!(
        "  Max mistakes: {}   Hints: {}",
        puzzle.difficulty().max_mistakes(),
        puzzle.difficulty().hint_budget()
    );

    if show_key {
        println!(
            "\n  Key:      {}",
            "ABCDEFGHIJKLMNOPQRSTUVWXYZ".bright_black()
        );
        println!("            {}", puzzle.cipher().key().bright_yellow());
        println!("  Solution: {}", puzzle.quote().text().green());
    }
}

/// Print the reveal order with each letter's ease score
pub fn print_plan(puzzle: &Puzzle, ranks: &[LetterRank]) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "REVEAL ORDER".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!("\n  {}", puzzle.ciphertext().bright_white());
    println!("\n   #  cipher  plain  count  tier  bonus  ease");

    for (i, rank) in ranks.iter().enumerate() {
        println!(
            "  {:>2}  {:^6}  {:^5}  {:>5}  {:>4}  {:>5}  {:>4}",
            i + 1,
            char::from(rank.cipher).to_string().bright_yellow(),
            char::from(rank.plain),
            rank.occurrences,
            rank.tier,
            rank.pattern_bonus,
            rank.ease.to_string().bold()
        );
    }
}

/// Print the itemized score
pub fn print_score(score: &ScoreBreakdown) {
    println!("\n📊 {}", "Score".bright_cyan().bold());
    println!("   Base:            {:>7.0}", score.base);
    println!("   Mistakes:        {:>7.0}", -score.mistake_penalty);
    println!("   Hints:           {:>7.0}", -score.hint_penalty);
    println!("   Timed reveals:   {:>7.0}", -score.timed_reveal_penalty);
    println!("   Time over par:   {:>7.0}", -score.time_penalty);
    println!("   Multiplier:      {:>7.1}x", score.multiplier);
    println!(
        "   Total:           {}",
        format!("{:>7}", score.total).bright_yellow().bold()
    );
}

/// Print the end-of-game banner, solution and score
pub fn print_game_summary(game: &Game, score: &ScoreBreakdown, elapsed: Duration) {
    let tracker = game.tracker();
    print_board(game.puzzle(), tracker, true);

    println!("\n{}", "═".repeat(70).bright_cyan());
    match game.status() {
        GameStatus::Won => println!(
            "{}",
            "    🎉 🎊 ✨  C R Y P T O G R A M   S O L V E D !  ✨ 🎊 🎉    "
                .bright_green()
                .bold()
        ),
        GameStatus::Lost if game.is_expired() => {
            println!("{}", "    ⏱  Out of time!".red().bold());
        }
        _ => println!("{}", "    ❌ Out of mistakes!".red().bold()),
    }
    println!("{}", "═".repeat(70).bright_cyan());

    println!("\n  {}", game.puzzle().quote().to_string().bright_white());
    println!(
        "\n  Time: {}s   Mistakes: {}   Hints: {}   Auto-reveals: {}",
        elapsed.as_secs(),
        tracker.mistakes(),
        tracker.hints_used(),
        tracker.timed_reveals()
    );
    print_score(score);
}

/// Print totals for an interactive session
pub fn print_session_stats(stats: &SessionStats) {
    if stats.games == 0 {
        return;
    }
    println!("📈 {}", "Session".bright_cyan().bold());
    println!("   Games played: {}", stats.games);
    println!(
        "   Won:          {} ({:.0}%)",
        stats.wins,
        stats.wins as f64 / stats.games as f64 * 100.0
    );
    println!("   Total score:  {}", stats.total_score);
    println!("   Best score:   {}\n", stats.best_score);
}

/// Print the result of a simulation batch
pub fn print_simulation_result(result: &SimulationResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "SIMULATION RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    let overall = &result.overall;
    println!("\n📊 {}", "Overall:".bright_cyan().bold());
    println!("   Games played:   {}", overall.games);
    println!(
        "   Win rate:       {}",
        format!("{:.1}%", overall.win_rate() * 100.0)
            .bright_yellow()
            .bold()
    );
    println!("   Mean score:     {:.1}", overall.mean_score());
    println!("   Mean mistakes:  {:.2}", overall.mean_mistakes());
    println!(
        "   Best score:     {}",
        result.best_score.to_string().green()
    );
    println!("   Time taken:     {:.2}s", result.duration.as_secs_f64());

    println!("\n📈 {}", "By difficulty:".bright_cyan().bold());
    for (difficulty, summary) in &result.by_difficulty {
        let bar = format!(
            "{}",
            create_progress_bar(summary.win_rate(), 1.0, 30).green()
        );
        println!(
            "   {:<6} {} {:5.1}% won, mean score {:7.1}, mean mistakes {:.2} ({} games)",
            difficulty.to_string(),
            bar,
            summary.win_rate() * 100.0,
            summary.mean_score(),
            summary.mean_mistakes(),
            summary.games
        );
    }
}
