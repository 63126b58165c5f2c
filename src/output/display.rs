//! Display functions for command results

use super::formatters::{grid_lines, score_bar, word_chips};
use crate::api::{DailyPuzzle, Leaderboard, PlayerScore};
use crate::core::{Coord, points_for};
use crate::session::SubmitOutcome;
use chrono::NaiveDate;
use colored::Colorize;

/// Print the puzzle grid, highlighting any selected path
pub fn print_puzzle(puzzle: &DailyPuzzle, path: &[Coord]) {
    let size = puzzle.grid.size();
    println!("\n{}", "─".repeat(40).cyan());
    println!(
        "Puzzle {} • {}x{} • seed {}",
        puzzle.date.to_string().bright_yellow().bold(),
        size,
        size,
        puzzle.seed
    );
    println!("{}", "─".repeat(40).cyan());

    // Column header
    let header: String = (0..size).map(|c| format!(" {c} ")).collect();
    println!("\n     {}", header.bright_black());
    for (r, line) in grid_lines(&puzzle.grid, path).into_iter().enumerate() {
        println!("  {}  {}", r.to_string().bright_black(), line.bright_white().bold());
    }
    println!();
}

/// Print the leaderboard, marking `me` if present
pub fn print_leaderboard(date: NaiveDate, board: &Leaderboard, me: Option<&str>) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "LEADERBOARD".bright_cyan().bold(),
        date.to_string().bright_yellow()
    );
    println!("{}", "═".repeat(60).cyan());

    if board.top.is_empty() {
        println!("\n   No scores yet.");
        return;
    }

    let top = board.top.first().map_or(0, |row| row.score);
    println!();
    for (i, row) in board.top.iter().enumerate() {
        let name = format!("{:<16}", row.username);
        let name = if Some(row.username.as_str()) == me {
            name.bright_green().bold()
        } else {
            name.normal()
        };
        println!(
            "  {:>3}. {} {:>4} pts {:>3} words  {}",
            i + 1,
            name,
            row.score,
            row.words_found,
            score_bar(row.score, top, 20).green()
        );
    }
}

/// Print a player's score for a date
pub fn print_player_score(username: &str, date: NaiveDate, me: Option<&PlayerScore>) {
    println!(
        "\n📊 {} on {}",
        username.bright_cyan().bold(),
        date.to_string().bright_yellow()
    );
    match me {
        Some(me) if me.has_submitted() => {
            println!("   Score:  {}", me.score.unwrap_or_default().to_string().bold());
            println!("   Words:  {}", me.words_found.unwrap_or_default());
            if let Some(words) = me.words.as_ref().filter(|w| !w.is_empty()) {
                println!("   Found:  {}", words.join(", "));
            }
        }
        Some(_) => println!("   No submission yet."),
        None => println!("   Enter your name to check score."),
    }
}

/// Print the words that were sent, flagging ones unlikely to count
pub fn print_submission_preview(words: &[String], suspicious: &[String]) {
    let preview: u32 = words.iter().map(|w| points_for(w)).sum();
    println!(
        "\nSent {} words (up to {} pts): {}",
        words.len(),
        preview,
        word_chips(words.iter().map(String::as_str))
    );
    if !suspicious.is_empty() {
        println!(
            "{}",
            format!("⚠  Too short or not on this grid: {}", suspicious.join(", ")).yellow()
        );
    }
}

/// Print the reconciled result of a submission
pub fn print_submit_outcome(outcome: &SubmitOutcome) {
    let Some(message) = outcome.user_message() else {
        return;
    };

    match outcome {
        SubmitOutcome::Accepted(result) => {
            println!("\n{}", format!("✅ {message}").green().bold());
            if let Some(words) = result.words.as_ref().filter(|w| !w.is_empty()) {
                println!("   Counted: {}", words.join(", "));
            }
            println!(
                "{}",
                "   🎉 🎊 ✨  W O R D S   S C O R E D !  ✨ 🎊 🎉".bright_green()
            );
        }
        SubmitOutcome::Rejected(_) => println!("\n{}", format!("❌ {message}").yellow().bold()),
        _ => println!("\n{}", format!("❌ {message}").red().bold()),
    }
}
