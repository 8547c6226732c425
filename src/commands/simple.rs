//! Simple console mode
//!
//! Line-based game loop without TUI

use crate::core::{Scramble, Word};
use crate::game::{GameSession, Phase};
use crate::output::{print_round, print_summary};
use crate::persistence::ScorePersistence;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Console input that is a command rather than a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConsoleCommand {
    Quit,
    Skip,
    NewGame,
}

impl ConsoleCommand {
    fn parse(line: &str) -> Option<Self> {
        match line {
            "quit" | "q" | "exit" => Some(Self::Quit),
            "skip" | "s" => Some(Self::Skip),
            "new" | "n" => Some(Self::NewGame),
            _ => None,
        }
    }
}

/// Vocabulary entries the console would read as commands
///
/// Such words could never be guessed in console mode.
#[must_use]
pub fn command_words(words: &[Word]) -> Vec<&Word> {
    words
        .iter()
        .filter(|word| ConsoleCommand::parse(&word.text().to_lowercase()).is_some())
        .collect()
}

/// Run the console game on stdin/stdout
///
/// # Errors
///
/// Returns an error on I/O failure or when the session cannot draw a word.
pub fn run_simple<P, S, R>(session: &mut GameSession<P, S, R>) -> Result<()>
where
    P: ScorePersistence,
    S: Scramble,
    R: rand::Rng,
{
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Unscramble - Console Mode                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Unscramble the letters to find the word.");
    println!("Commands: 'skip' for the next word, 'new' to start over, 'quit' to exit\n");

    play(session, &mut io::stdin().lock())
}

/// Drive a session from any line source
///
/// Returns when the player quits, declines another game, or input ends.
///
/// # Errors
///
/// Returns an error on I/O failure or when the session cannot draw a word.
pub fn play<P, S, R, I>(session: &mut GameSession<P, S, R>, input: &mut I) -> Result<()>
where
    P: ScorePersistence,
    S: Scramble,
    R: rand::Rng,
    I: BufRead,
{
    if session.phase() == Phase::Idle {
        session.start()?;
    }
    let mut best_at_start = session.high_score();

    loop {
        if session.phase() == Phase::Complete {
            let score = session.score();
            let new_record = score > best_at_start;
            print_summary(
                score,
                session.config().max_score(),
                session.high_score().max(score),
                new_record,
            );

            match prompt(input, "Play again? (yes/no)")?.as_deref() {
                Some("yes" | "y") => {
                    best_at_start = best_at_start.max(score);
                    session.reinitialize()?;
                    println!("\n🔄 New game started!\n");
                    continue;
                }
                _ => {
                    println!("\n👋 Thanks for playing!\n");
                    return Ok(());
                }
            }
        }

        let scramble = session
            .current_scramble()
            .cloned()
            .context("session in round without a scramble")?;
        print_round(
            session.round_count(),
            session.config().max_rounds,
            session.score(),
            &scramble,
        );

        let Some(line) = prompt(input, "Your guess")? else {
            return Ok(());
        };

        match (line.as_str(), ConsoleCommand::parse(&line)) {
            ("", _) => {}
            (_, Some(ConsoleCommand::Quit)) => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            (_, Some(ConsoleCommand::Skip)) => {
                session.advance()?;
            }
            (_, Some(ConsoleCommand::NewGame)) => {
                session.reinitialize()?;
                println!("\n🔄 New game started!\n");
            }
            (guess, None) => {
                if session.submit_guess(guess)? {
                    println!(
                        "{}\n",
                        format!("✅ Correct! +{}", session.config().score_increase)
                            .green()
                            .bold()
                    );
                    session.advance()?;
                } else {
                    println!("{}\n", "❌ Not quite, try again!".red());
                }
            }
        }
    }
}

/// Read one trimmed, lowercased line; `None` at end of input
fn prompt<I: BufRead>(input: &mut I, message: &str) -> Result<Option<String>> {
    print!("{message}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RandomScrambler;
    use crate::game::{GameConfig, WordBank};
    use crate::persistence::{HighScoreStore, MemoryBackend};
    use crate::wordlists::loader::words_from_slice;
    use std::io::Cursor;

    async fn session(words: &[&str], max_rounds: u32) -> GameSession<HighScoreStore> {
        let store = HighScoreStore::open(MemoryBackend::default()).await;
        GameSession::new(
            GameConfig::new(max_rounds, 20),
            WordBank::seeded(words_from_slice(words), 3).unwrap(),
            RandomScrambler::seeded(3),
            store,
        )
    }

    #[tokio::test]
    async fn correct_guess_scores_and_completes() {
        let mut session = session(&["kotlin"], 1).await;
        play(&mut session, &mut Cursor::new("wrong\nKOTLIN\nno\n")).unwrap();

        assert_eq!(session.phase(), Phase::Complete);
        assert_eq!(session.score(), 20);
    }

    #[tokio::test]
    async fn skipping_every_word_scores_nothing() {
        let mut session = session(&["android", "kotlin"], 2).await;
        play(&mut session, &mut Cursor::new("skip\ns\nno\n")).unwrap();

        assert_eq!(session.phase(), Phase::Complete);
        assert_eq!(session.score(), 0);
        assert_eq!(session.round_count(), 2);
    }

    #[tokio::test]
    async fn play_again_starts_fresh_session() {
        let mut session = session(&["kotlin"], 1).await;
        play(&mut session, &mut Cursor::new("kotlin\nyes\nquit\n")).unwrap();

        assert_eq!(session.phase(), Phase::InRound);
        assert_eq!(session.score(), 0);
        assert_eq!(session.round_count(), 1);
    }

    #[test]
    fn command_words_are_flagged() {
        let words = words_from_slice(&["android", "new", "S", "quit", "skipper"]);
        let flagged: Vec<&str> = command_words(&words).iter().map(|word| word.text()).collect();
        assert_eq!(flagged, vec!["new", "S", "quit"]);
    }

    #[tokio::test]
    async fn end_of_input_leaves_session_resumable() {
        let mut session = session(&["android", "kotlin"], 2).await;
        play(&mut session, &mut Cursor::new("")).unwrap();

        assert_eq!(session.phase(), Phase::InRound);
        assert_eq!(session.round_count(), 1);
    }
}
