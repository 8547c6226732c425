//! TUI application state and logic

use crate::core::{Scramble, ScrambledWord};
use crate::game::{GameSession, Phase};
use crate::persistence::ScorePersistence;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::sync::watch;

/// How long to wait for a key before redrawing (picks up high score writes)
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Messages kept for the log panel
const MESSAGE_LOG_LEN: usize = 5;

/// Application state
///
/// Everything shown on screen comes from the session's watch channels; the
/// app never reads session fields directly.
pub struct App {
    pub score: watch::Receiver<u32>,
    pub round_count: watch::Receiver<u32>,
    pub scramble: watch::Receiver<Option<ScrambledWord>>,
    pub phase: watch::Receiver<Phase>,
    pub high_score: watch::Receiver<u32>,
    pub max_rounds: u32,
    pub score_increase: u32,
    /// High score when the current game began, to spot a new record
    pub best_at_start: u32,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub should_quit: bool,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl App {
    #[must_use]
    pub fn new<P, S, R>(session: &GameSession<P, S, R>) -> Self
    where
        P: ScorePersistence,
        S: Scramble,
        R: rand::Rng,
    {
        let high_score = session.observe_high_score();
        let best_at_start = *high_score.borrow();

        Self {
            score: session.subscribe_score(),
            round_count: session.subscribe_round_count(),
            scramble: session.subscribe_scramble(),
            phase: session.subscribe_phase(),
            high_score,
            max_rounds: session.config().max_rounds,
            score_increase: session.config().score_increase,
            best_at_start,
            input_buffer: String::new(),
            messages: vec![
                Message {
                    text: "Welcome! Unscramble the letters to find the word.".to_string(),
                    style: MessageStyle::Info,
                },
                Message {
                    text: "Type your guess and press Enter. Tab skips the word.".to_string(),
                    style: MessageStyle::Info,
                },
            ],
            should_quit: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        *self.score.borrow()
    }

    #[must_use]
    pub fn round_count(&self) -> u32 {
        *self.round_count.borrow()
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        *self.high_score.borrow()
    }

    #[must_use]
    pub fn current_scramble(&self) -> Option<ScrambledWord> {
        self.scramble.borrow().clone()
    }

    /// Whether the finished game beat the previous record
    #[must_use]
    pub fn is_new_record(&self) -> bool {
        self.score() > self.best_at_start
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MESSAGE_LOG_LEN {
            self.messages.remove(0);
        }
    }

    /// Forward one key press to the session
    ///
    /// # Errors
    ///
    /// Returns the session fault if a word cannot be drawn.
    pub fn handle_key<P, S, R>(
        &mut self,
        session: &mut GameSession<P, S, R>,
        key: KeyEvent,
    ) -> Result<()>
    where
        P: ScorePersistence,
        S: Scramble,
        R: rand::Rng,
    {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        match self.phase() {
            Phase::Complete => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('n') => self.new_game(session)?,
                _ => {}
            },
            Phase::Idle => {
                session.start()?;
            }
            Phase::InRound => match key.code {
                KeyCode::Esc => self.should_quit = true,
                KeyCode::Tab => self.skip(session)?,
                KeyCode::Char(c) if c.is_alphabetic() => self.input_buffer.push(c),
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Enter => self.submit(session)?,
                _ => {}
            },
        }
        Ok(())
    }

    fn submit<P, S, R>(&mut self, session: &mut GameSession<P, S, R>) -> Result<()>
    where
        P: ScorePersistence,
        S: Scramble,
        R: rand::Rng,
    {
        if self.input_buffer.is_empty() {
            return Ok(());
        }

        let guess = std::mem::take(&mut self.input_buffer);
        if session.submit_guess(&guess)? {
            self.add_message(
                &format!(
                    "✅ {} is correct! +{}",
                    guess.to_uppercase(),
                    self.score_increase
                ),
                MessageStyle::Success,
            );
            self.next_word(session)
        } else {
            self.add_message(
                &format!("❌ {} is not it, try again", guess.to_uppercase()),
                MessageStyle::Error,
            );
            Ok(())
        }
    }

    fn skip<P, S, R>(&mut self, session: &mut GameSession<P, S, R>) -> Result<()>
    where
        P: ScorePersistence,
        S: Scramble,
        R: rand::Rng,
    {
        self.input_buffer.clear();
        self.add_message("⏭ Skipped", MessageStyle::Info);
        self.next_word(session)
    }

    fn next_word<P, S, R>(&mut self, session: &mut GameSession<P, S, R>) -> Result<()>
    where
        P: ScorePersistence,
        S: Scramble,
        R: rand::Rng,
    {
        if !session.advance()? {
            let text = if self.is_new_record() {
                format!("🏆 New high score: {}!", self.score())
            } else {
                format!("🎉 Game over! Final score: {}", self.score())
            };
            self.add_message(&text, MessageStyle::Success);
            self.add_message("Press 'n' for new game or 'q' to quit.", MessageStyle::Info);
        }
        Ok(())
    }

    fn new_game<P, S, R>(&mut self, session: &mut GameSession<P, S, R>) -> Result<()>
    where
        P: ScorePersistence,
        S: Scramble,
        R: rand::Rng,
    {
        self.best_at_start = self.best_at_start.max(self.score());
        self.input_buffer.clear();
        self.messages.clear();
        session.reinitialize()?;
        self.add_message("New game started!", MessageStyle::Info);
        Ok(())
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui<P, S, R>(session: &mut GameSession<P, S, R>) -> Result<()>
where
    P: ScorePersistence,
    S: Scramble,
    R: rand::Rng,
{
    if session.phase() == Phase::Idle {
        session.start()?;
    }
    let app = App::new(session);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app, session);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B, P, S, R>(
    terminal: &mut Terminal<B>,
    mut app: App,
    session: &mut GameSession<P, S, R>,
) -> Result<()>
where
    B: ratatui::backend::Backend,
    P: ScorePersistence,
    S: Scramble,
    R: rand::Rng,
{
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(session, key)?;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RandomScrambler;
    use crate::game::{GameConfig, WordBank};
    use crate::persistence::{HighScoreStore, MemoryBackend};
    use crate::wordlists::loader::words_from_slice;

    async fn started(words: &[&str], max_rounds: u32) -> GameSession<HighScoreStore> {
        let store = HighScoreStore::open(MemoryBackend::new(Some(10))).await;
        let mut session = GameSession::new(
            GameConfig::new(max_rounds, 20),
            WordBank::seeded(words_from_slice(words), 8).unwrap(),
            RandomScrambler::seeded(8),
            store,
        );
        session.start().unwrap();
        session
    }

    fn press(app: &mut App, session: &mut GameSession<HighScoreStore>, code: KeyCode) {
        app.handle_key(session, KeyEvent::from(code)).unwrap();
    }

    fn type_text(app: &mut App, session: &mut GameSession<HighScoreStore>, text: &str) {
        for c in text.chars() {
            press(app, session, KeyCode::Char(c));
        }
    }

    #[tokio::test]
    async fn app_mirrors_session() {
        let session = started(&["android", "kotlin"], 2).await;
        let app = App::new(&session);

        assert_eq!(app.phase(), Phase::InRound);
        assert_eq!(app.round_count(), 1);
        assert_eq!(app.high_score(), 10);
        assert_eq!(app.best_at_start, 10);
        assert_eq!(app.current_scramble().as_ref(), session.current_scramble());
    }

    #[tokio::test]
    async fn correct_guess_scores_and_moves_on() {
        let mut session = started(&["android", "kotlin"], 2).await;
        let mut app = App::new(&session);
        let word = session.current_word().unwrap().text().to_uppercase();

        type_text(&mut app, &mut session, &word);
        press(&mut app, &mut session, KeyCode::Enter);

        assert_eq!(app.score(), 20);
        assert_eq!(app.round_count(), 2);
        assert!(app.input_buffer.is_empty());
    }

    #[tokio::test]
    async fn wrong_guess_reports_error() {
        let mut session = started(&["android", "kotlin"], 2).await;
        let mut app = App::new(&session);

        type_text(&mut app, &mut session, "java");
        press(&mut app, &mut session, KeyCode::Enter);

        assert_eq!(app.score(), 0);
        assert_eq!(app.round_count(), 1);
        assert!(matches!(
            app.messages.last().unwrap().style,
            MessageStyle::Error
        ));
    }

    #[tokio::test]
    async fn message_log_keeps_latest_entries() {
        let session = started(&["android"], 1).await;
        let mut app = App::new(&session);

        for i in 0..8 {
            app.add_message(&format!("note {i}"), MessageStyle::Info);
        }
        assert_eq!(app.messages.len(), MESSAGE_LOG_LEN);
        assert_eq!(app.messages[0].text, "note 3");
        assert_eq!(app.messages.last().unwrap().text, "note 7");
    }

    #[tokio::test]
    async fn non_letters_are_ignored() {
        let mut session = started(&["android"], 1).await;
        let mut app = App::new(&session);

        type_text(&mut app, &mut session, "a1 b-");
        assert_eq!(app.input_buffer, "ab");
        press(&mut app, &mut session, KeyCode::Backspace);
        assert_eq!(app.input_buffer, "a");
    }

    #[tokio::test]
    async fn skipping_to_the_end_then_new_game() {
        let mut session = started(&["android", "kotlin"], 2).await;
        let mut app = App::new(&session);

        press(&mut app, &mut session, KeyCode::Tab);
        press(&mut app, &mut session, KeyCode::Tab);
        assert_eq!(app.phase(), Phase::Complete);

        // Letters do nothing once the game is over
        press(&mut app, &mut session, KeyCode::Char('x'));
        assert!(app.input_buffer.is_empty());

        press(&mut app, &mut session, KeyCode::Char('n'));
        assert_eq!(app.phase(), Phase::InRound);
        assert_eq!(app.round_count(), 1);
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn ctrl_c_quits_from_any_phase() {
        let mut session = started(&["android"], 1).await;
        let mut app = App::new(&session);

        app.handle_key(
            &mut session,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        )
        .unwrap();
        assert!(app.should_quit);
        assert!(app.input_buffer.is_empty());
    }
}
