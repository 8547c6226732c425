//! Display functions for the console game

use super::formatters::{create_progress_bar, round_label, spell_out};
use crate::core::ScrambledWord;
use colored::Colorize;

/// Print the header for a live round
pub fn print_round(round: u32, max_rounds: u32, score: u32, scramble: &ScrambledWord) {
    println!("{}", "─".repeat(60).cyan());
    println!(
        "{}  [{}]  Score: {}",
        round_label(round, max_rounds),
        create_progress_bar(round, max_rounds, 20),
        score.to_string().bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());
    println!(
        "\n  Unscramble:  {}\n",
        spell_out(scramble).bright_white().bold()
    );
}

/// Print the end-of-session summary
pub fn print_summary(score: u32, max_score: u32, high_score: u32, new_record: bool) {
    println!("\n{}", "═".repeat(60).bright_cyan());
    println!(" {} ", "GAME OVER".bright_cyan().bold());
    println!("{}", "═".repeat(60).bright_cyan());

    println!(
        "\n  Final score:  {} / {}",
        score.to_string().bright_yellow().bold(),
        max_score
    );
    if new_record {
        println!("  {}", "🏆 New high score!".bright_green().bold());
    } else {
        println!("  High score:   {high_score}");
    }
    println!();
}

/// Print the persisted high score
pub fn print_high_score(high_score: u32) {
    println!(
        "🏆 High score: {}",
        high_score.to_string().bright_yellow().bold()
    );
}
