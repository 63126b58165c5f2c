//! TUI application state and logic

use crate::api::{self, DailyPuzzle, Leaderboard, PlayerScore, ScoringApi, SubmissionResult};
use crate::config::{ClientConfig, clamp_grid_size, normalize_username};
use crate::core::{Coord, split_words};
use crate::session::{Command, RequestToken, Session, SessionEvent, SubmitOutcome, TokenGate};
use anyhow::Result;
use chrono::{Days, NaiveDate};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedSender};

use super::effects::Effects;
use super::rendering;

const FRAME: Duration = Duration::from_millis(16);

/// A finished network call, tagged with the token it was issued under
#[derive(Debug)]
pub enum ApiReply {
    Daily {
        token: RequestToken,
        result: api::Result<DailyPuzzle>,
    },
    Leaderboard {
        token: RequestToken,
        result: api::Result<Leaderboard>,
    },
    Me {
        token: RequestToken,
        result: api::Result<PlayerScore>,
    },
    Submit {
        token: RequestToken,
        result: api::Result<SubmissionResult>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Grid,
    Typing,
    Queue,
    Username,
}

impl InputMode {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Grid => Self::Typing,
            Self::Typing => Self::Queue,
            Self::Queue | Self::Username => Self::Grid,
        }
    }
}

/// Contents of the personal score panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MePanel {
    SignedOut,
    Loading,
    NoSubmission,
    Score(PlayerScore),
    Failed,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Application state
pub struct App {
    pub config: ClientConfig,
    pub session: Session,
    pub date: NaiveDate,
    /// Date being fetched by `change_date`; committed once its puzzle loads
    pub pending_date: Option<NaiveDate>,
    pub cursor: Coord,
    pub input_mode: InputMode,
    pub typed_words: String,
    pub username_input: String,
    pub queue_cursor: usize,
    pub leaderboard: Option<Leaderboard>,
    pub me: MePanel,
    pub submit_status: Option<String>,
    pub loading: bool,
    pub messages: Vec<Message>,
    pub effects: Effects,
    pub viewport: Rect,
    pub should_quit: bool,
    leaderboard_gate: TokenGate,
    me_gate: TokenGate,
    api: Arc<dyn ScoringApi>,
    replies: UnboundedSender<ApiReply>,
}

impl App {
    #[must_use]
    pub fn new(
        config: ClientConfig,
        api: Arc<dyn ScoringApi>,
        replies: UnboundedSender<ApiReply>,
    ) -> Self {
        let date = config.puzzle_date();
        Self {
            config,
            session: Session::new(),
            date,
            pending_date: None,
            cursor: Coord::new(0, 0),
            input_mode: InputMode::Grid,
            typed_words: String::new(),
            username_input: String::new(),
            queue_cursor: 0,
            leaderboard: None,
            me: MePanel::SignedOut,
            submit_status: None,
            loading: false,
            messages: vec![Message {
                text: "Trace words through neighbouring letters. Tab switches panels.".to_string(),
                style: MessageStyle::Info,
            }],
            effects: Effects::new(),
            viewport: Rect::default(),
            should_quit: false,
            leaderboard_gate: TokenGate::new(),
            me_gate: TokenGate::new(),
            api,
            replies,
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.config.username
    }

    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.session
            .grid()
            .map_or(self.config.grid_size, crate::core::Grid::size)
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    // ---------------------------------------------------------------------
    // Requests
    // ---------------------------------------------------------------------

    pub fn request_daily(&mut self) {
        let token = self.session.begin_load();
        let (date, size) = (self.target_date(), self.config.grid_size);
        self.loading = true;
        tracing::debug!("Requesting {} puzzle size {} ({})", date, size, token);

        let api = Arc::clone(&self.api);
        let tx = self.replies.clone();
        tokio::spawn(async move {
            let result = api.daily(date, size).await;
            let _ = tx.send(ApiReply::Daily { token, result });
        });
    }

    pub fn request_leaderboard(&mut self) {
        let token = self.leaderboard_gate.issue();
        let (date, limit) = (self.date, self.config.leaderboard_limit);

        let api = Arc::clone(&self.api);
        let tx = self.replies.clone();
        tokio::spawn(async move {
            let result = api.leaderboard(date, limit).await;
            let _ = tx.send(ApiReply::Leaderboard { token, result });
        });
    }

    pub fn request_me(&mut self) {
        let token = self.me_gate.issue();
        let date = self.date;
        let username = self.config.username.clone();
        self.me = MePanel::Loading;

        let api = Arc::clone(&self.api);
        let tx = self.replies.clone();
        tokio::spawn(async move {
            let result = api.me(date, &username).await;
            let _ = tx.send(ApiReply::Me { token, result });
        });
    }

    fn target_date(&self) -> NaiveDate {
        self.pending_date.unwrap_or(self.date)
    }

    /// Reload puzzle, leaderboard and personal score for the current date
    pub fn refresh_all(&mut self) {
        self.request_daily();
        self.request_leaderboard();
        self.request_me();
    }

    pub fn submit(&mut self) {
        let extra = split_words(&self.typed_words);
        let username = self.config.username.clone();
        match self.session.begin_submit(&username, &extra) {
            Ok(pending) => {
                self.submit_status = Some("...".to_string());

                let api = Arc::clone(&self.api);
                let tx = self.replies.clone();
                tokio::spawn(async move {
                    let result = api.submit(pending.date, &pending.request).await;
                    let _ = tx.send(ApiReply::Submit {
                        token: pending.token,
                        result,
                    });
                });
            }
            Err(blocked) => self.add_message(&blocked.to_string(), MessageStyle::Error),
        }
    }

    // ---------------------------------------------------------------------
    // Replies
    // ---------------------------------------------------------------------

    pub fn handle_reply(&mut self, reply: ApiReply, now: Instant) {
        match reply {
            ApiReply::Daily { token, result } => self.on_daily(token, result),
            ApiReply::Leaderboard { token, result } => {
                if !self.leaderboard_gate.settle(token) {
                    tracing::warn!("Discarding stale leaderboard ({})", token);
                    return;
                }
                match result {
                    Ok(board) => self.leaderboard = Some(board),
                    Err(e) => {
                        tracing::error!("Leaderboard failed: {}", e);
                        self.add_message("Could not load leaderboard", MessageStyle::Error);
                    }
                }
            }
            ApiReply::Me { token, result } => {
                if !self.me_gate.settle(token) {
                    tracing::warn!("Discarding stale score ({})", token);
                    return;
                }
                self.me = match result {
                    Ok(me) if me.has_submitted() => MePanel::Score(me),
                    Ok(_) => MePanel::NoSubmission,
                    Err(e) if e.is_auth() || matches!(e, api::ApiError::NotFound) => {
                        MePanel::SignedOut
                    }
                    Err(e) => {
                        tracing::error!("Score lookup failed: {}", e);
                        MePanel::Failed
                    }
                };
            }
            ApiReply::Submit { token, result } => self.on_submit(token, result),
        }
        self.flush_events(now);
    }

    fn on_daily(&mut self, token: RequestToken, result: api::Result<DailyPuzzle>) {
        match result {
            Ok(puzzle) => {
                let date = puzzle.date;
                let was_submitting = self.session.submit_in_flight();
                if !self.session.finish_load(token, puzzle) {
                    return;
                }
                self.loading = false;
                self.pending_date = None;
                self.cursor = Coord::new(0, 0);
                self.queue_cursor = 0;
                if was_submitting {
                    self.submit_status = Some("Submission discarded".to_string());
                }
                self.add_message(&format!("Loaded puzzle for {date}"), MessageStyle::Info);

                if date != self.date {
                    self.date = date;
                    self.request_leaderboard();
                    self.request_me();
                }
            }
            Err(e) => {
                if self.session.fail_load(token) {
                    self.loading = false;
                    tracing::error!("Daily load failed: {}", e);
                    match self.pending_date.take() {
                        Some(date) => self.add_message(
                            &format!("Could not load puzzle for {date}"),
                            MessageStyle::Error,
                        ),
                        None => self.add_message("Could not load puzzle", MessageStyle::Error),
                    }
                }
            }
        }
    }

    fn on_submit(&mut self, token: RequestToken, result: api::Result<SubmissionResult>) {
        let outcome = self.session.finish_submit(token, result);
        let Some(text) = outcome.user_message() else {
            return;
        };
        self.submit_status = Some(text.clone());

        match outcome {
            SubmitOutcome::Accepted(_) => {
                self.typed_words.clear();
                self.queue_cursor = 0;
                self.add_message(&text, MessageStyle::Success);
            }
            SubmitOutcome::Rejected(_) => self.add_message(&text, MessageStyle::Info),
            _ => self.add_message(&text, MessageStyle::Error),
        }

        // The server answered, so standings may have moved
        if matches!(outcome, SubmitOutcome::Accepted(_) | SubmitOutcome::Rejected(_)) {
            self.request_leaderboard();
            self.request_me();
        }
    }

    // ---------------------------------------------------------------------
    // Session commands
    // ---------------------------------------------------------------------

    pub fn apply(&mut self, command: Command, now: Instant) {
        let events = self.session.apply(command);
        self.route_events(events, now);
    }

    fn flush_events(&mut self, now: Instant) {
        let events = self.session.take_events();
        self.route_events(events, now);
    }

    /// Start effects and post messages for session events
    fn route_events(&mut self, events: Vec<SessionEvent>, now: Instant) {
        let area = (self.viewport.width, self.viewport.height);
        let mut rng = rand::rng();
        for event in events {
            self.effects.on_event(&event, now, &mut rng, area);
            match event {
                SessionEvent::WordQueued(word) => {
                    self.add_message(&format!("Queued {word}"), MessageStyle::Success);
                }
                SessionEvent::WordTooShort(_) => {
                    self.add_message("Words need at least 3 letters", MessageStyle::Error);
                }
                SessionEvent::WordRemoved { word, .. } => {
                    self.add_message(&format!("Removed {word}"), MessageStyle::Info);
                }
                _ => {}
            }
        }
        let len = self.session.queue().len();
        if self.queue_cursor >= len {
            self.queue_cursor = len.saturating_sub(1);
        }
    }

    pub fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let max = self.grid_size().saturating_sub(1);
        let step = |v: usize, d: isize| v.saturating_add_signed(d).min(max);
        self.cursor = Coord::new(step(self.cursor.row, d_row), step(self.cursor.col, d_col));
    }

    /// Fetch the neighbouring day's puzzle; `date` follows once it loads
    pub fn change_date(&mut self, forward: bool) {
        let from = self.target_date();
        let next = if forward {
            from.checked_add_days(Days::new(1))
        } else {
            from.checked_sub_days(Days::new(1))
        };
        if let Some(date) = next {
            self.pending_date = Some(date);
            self.request_daily();
        }
    }

    pub fn change_size(&mut self, grow: bool) {
        let size = if grow {
            self.config.grid_size + 1
        } else {
            self.config.grid_size.saturating_sub(1)
        };
        let size = clamp_grid_size(size);
        if size != self.config.grid_size {
            self.config.grid_size = size;
            self.request_daily();
        }
    }

    pub fn set_username(&mut self, name: &str) {
        self.config.username = normalize_username(name);
        self.add_message(
            &format!("Playing as {}", self.config.username),
            MessageStyle::Info,
        );
        self.request_me();
    }

    // ---------------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Grid => self.handle_grid_key(key.code, now),
            InputMode::Typing => match key.code {
                KeyCode::Esc | KeyCode::Tab => self.input_mode = self.input_mode.next(),
                KeyCode::Enter => self.submit(),
                KeyCode::Backspace => {
                    self.typed_words.pop();
                }
                KeyCode::Char(c) => self.typed_words.push(c),
                _ => {}
            },
            InputMode::Queue => match key.code {
                KeyCode::Esc | KeyCode::Tab => self.input_mode = self.input_mode.next(),
                KeyCode::Up | KeyCode::Char('k') => {
                    self.queue_cursor = self.queue_cursor.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if self.queue_cursor + 1 < self.session.queue().len() {
                        self.queue_cursor += 1;
                    }
                }
                KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('x' | 'd') => {
                    self.apply(Command::RemoveWord(self.queue_cursor), now);
                }
                KeyCode::Char('s') => self.submit(),
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
            InputMode::Username => match key.code {
                KeyCode::Esc => {
                    self.username_input.clear();
                    self.input_mode = InputMode::Grid;
                }
                KeyCode::Enter => {
                    let name = std::mem::take(&mut self.username_input);
                    self.set_username(&name);
                    self.input_mode = InputMode::Grid;
                }
                KeyCode::Backspace => {
                    self.username_input.pop();
                }
                KeyCode::Char(c) => self.username_input.push(c),
                _ => {}
            },
        }
    }

    fn handle_grid_key(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::Char(' ') | KeyCode::Enter => self.apply(Command::SelectCell(self.cursor), now),
            KeyCode::Backspace | KeyCode::Char('u') => self.apply(Command::Undo, now),
            KeyCode::Char('c') => self.apply(Command::Clear, now),
            KeyCode::Char('a') => self.apply(Command::Confirm, now),
            KeyCode::Char('s') => self.submit(),
            KeyCode::Tab => self.input_mode = self.input_mode.next(),
            KeyCode::Char('n') => {
                self.username_input = self.config.username.clone();
                self.input_mode = InputMode::Username;
            }
            KeyCode::Char('r') => self.request_daily(),
            KeyCode::Char('[') => self.change_date(false),
            KeyCode::Char(']') => self.change_date(true),
            KeyCode::Char('+' | '=') => self.change_size(true),
            KeyCode::Char('-') => self.change_size(false),
            KeyCode::Char('L') => self.request_leaderboard(),
            KeyCode::Char('m') => self.request_me(),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let size = self.grid_size();
        let grid = rendering::grid_rect(self.viewport, size);
        if let Some(coord) = rendering::cell_at(grid, size, mouse.column, mouse.row) {
            self.cursor = coord;
            self.input_mode = InputMode::Grid;
            self.apply(Command::SelectCell(coord), now);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub async fn run_tui(config: ClientConfig, api: Arc<dyn ScoringApi>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, config, api).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: ClientConfig,
    api: Arc<dyn ScoringApi>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(config, api, tx);
    app.refresh_all();

    loop {
        let now = Instant::now();
        let size = terminal.size()?;
        app.viewport = Rect::new(0, 0, size.width, size.height);
        app.effects.tick(now);
        terminal.draw(|f| rendering::ui(f, &app, now))?;

        tokio::select! {
            Some(reply) = rx.recv() => app.handle_reply(reply, Instant::now()),
            () = tokio::time::sleep(FRAME) => {}
        }

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                // Only process key press events (fixes Windows double-input bug)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, Instant::now());
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse, Instant::now()),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
