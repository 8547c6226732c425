//! Unscramble - CLI
//!
//! Word-scramble game with TUI and console modes and a persistent high score.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use unscramble::{
    commands::{command_words, persist_session, resume_session, run_simple, snapshot_path_for},
    core::{RandomScrambler, Word},
    game::{GameConfig, GameSession, MAX_ROUNDS, SCORE_INCREASE, WordBank},
    interactive::run_tui,
    output::print_high_score,
    persistence::{HighScoreStore, JsonFileBackend, MemoryBackend},
    wordlists::{
        WORDS,
        loader::{load_from_file, unscrambleable, words_from_slice},
    },
};

#[derive(Parser)]
#[command(
    name = "unscramble",
    about = "Unscramble the word, beat your high score",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Words per game
    #[arg(long, global = true, default_value_t = MAX_ROUNDS)]
    max_rounds: u32,

    /// Points per correct guess
    #[arg(long, global = true, default_value_t = SCORE_INCREASE)]
    score_increase: u32,

    /// Wordlist: 'builtin' (default) or path to a file with one word per line
    #[arg(short = 'w', long, global = true, default_value = "builtin")]
    words: String,

    /// High score file (default: platform data directory)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Keep the high score in memory only
    #[arg(long, global = true, conflicts_with = "store")]
    ephemeral: bool,

    /// Seed for reproducible word order and scrambles
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Continue the game left unfinished last time
    #[arg(long, global = true)]
    resume: bool,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple console mode (line-based, no TUI)
    Simple,

    /// Show the all-time high score
    HighScore,
}

/// Load the vocabulary based on the -w flag
fn load_vocabulary(source: &str) -> Result<Vec<Word>> {
    match source {
        "builtin" => Ok(words_from_slice(WORDS)),
        path => load_from_file(path).with_context(|| format!("loading word list {path}")),
    }
}

/// Refuse vocabularies that cannot carry a full game
fn check_vocabulary(words: &[Word], config: &GameConfig, command: Commands) -> Result<()> {
    let bad = unscrambleable(words);
    if !bad.is_empty() {
        let names: Vec<&str> = bad.iter().map(|word| word.text()).collect();
        bail!("word list has entries that cannot be scrambled: {}", names.join(", "));
    }

    if command == Commands::Simple {
        let reserved = command_words(words);
        if !reserved.is_empty() {
            let names: Vec<&str> = reserved.iter().map(|word| word.text()).collect();
            bail!(
                "word list has entries that console mode reads as commands: {}",
                names.join(", ")
            );
        }
    }

    let mut distinct: Vec<&Word> = words.iter().collect();
    distinct.sort();
    distinct.dedup();
    if distinct.len() < config.max_rounds as usize {
        bail!(
            "word list has {} distinct words but a game needs {}",
            distinct.len(),
            config.max_rounds
        );
    }
    Ok(())
}

fn init_logging(log_file: Option<&Path>, tui: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        // Anything written to the terminal would tear the TUI
        None if tui => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);
    init_logging(cli.log_file.as_deref(), command == Commands::Play)?;

    let store_path = if cli.ephemeral {
        None
    } else {
        Some(
            cli.store
                .clone()
                .or_else(JsonFileBackend::default_path)
                .context("no data directory; pass --store or --ephemeral")?,
        )
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let store = runtime.block_on(async {
        match &store_path {
            Some(path) => HighScoreStore::open(JsonFileBackend::new(path)).await,
            None => HighScoreStore::open(MemoryBackend::default()).await,
        }
    });

    if command == Commands::HighScore {
        print_high_score(store.current());
        return Ok(());
    }

    let config = GameConfig::new(cli.max_rounds, cli.score_increase);
    let words = load_vocabulary(&cli.words)?;
    check_vocabulary(&words, &config, command)?;

    let (bank, scrambler) = match cli.seed {
        Some(seed) => (WordBank::seeded(words, seed)?, RandomScrambler::seeded(seed)),
        None => (WordBank::new(words)?, RandomScrambler::new()),
    };
    let session = GameSession::new(config, bank, scrambler, store.clone());
    let result = play(session, command, cli.resume, store_path.as_deref());

    // Let queued high score writes land before the runtime goes away
    runtime.block_on(store.flush());
    result
}

fn play(
    mut session: GameSession<HighScoreStore>,
    command: Commands,
    resume: bool,
    store_path: Option<&Path>,
) -> Result<()> {
    let snapshot = store_path.map(snapshot_path_for);
    if resume && let Some(path) = &snapshot {
        resume_session(&mut session, path);
    }

    match command {
        Commands::Simple => run_simple(&mut session)?,
        _ => run_tui(&mut session)?,
    }

    if let Some(path) = &snapshot {
        persist_session(&session, path)?;
    }
    Ok(())
}
