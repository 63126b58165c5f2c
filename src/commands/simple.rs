//! Simple interactive CLI mode
//!
//! Line-based play without the TUI: select cells by coordinates, queue words
//! and submit them.

use anyhow::Result;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::fetch::{fetch_daily, fetch_leaderboard, fetch_me};
use crate::api::ScoringApi;
use crate::config::{ClientConfig, normalize_username};
use crate::core::{Coord, split_words};
use crate::output::formatters::{word_chips, word_or_sentinel};
use crate::output::{print_leaderboard, print_player_score, print_puzzle, print_submit_outcome};
use crate::session::{Command, Session, SessionEvent};

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    /// One or more `row col` pairs, selected in order
    Select(Vec<Coord>),
    Undo,
    Clear,
    Add,
    /// Zero-based queue index
    Remove(usize),
    Submit(Vec<String>),
    Board,
    Leaders,
    Me,
    Name(String),
    Reload,
    Help,
    Quit,
}

/// Parse one input line
///
/// # Errors
///
/// Returns a message describing the problem if the line is not a command.
pub fn parse_line(line: &str) -> Result<LineCommand, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = tokens.split_first() else {
        return Err("Type 'help' for commands".to_string());
    };

    if head.parse::<usize>().is_ok() {
        return parse_coords(&tokens).map(LineCommand::Select);
    }

    match head.to_lowercase().as_str() {
        "undo" | "u" => Ok(LineCommand::Undo),
        "clear" | "c" => Ok(LineCommand::Clear),
        "add" | "a" => Ok(LineCommand::Add),
        "rm" | "remove" => match rest {
            [n] => match n.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(LineCommand::Remove(n - 1)),
                _ => Err(format!("Not a word number: {n}")),
            },
            _ => Err("Usage: rm N".to_string()),
        },
        "submit" | "s" => Ok(LineCommand::Submit(
            rest.iter().flat_map(|w| split_words(w)).collect(),
        )),
        "board" | "b" => Ok(LineCommand::Board),
        "leaders" | "l" => Ok(LineCommand::Leaders),
        "me" | "m" => Ok(LineCommand::Me),
        "name" | "n" => Ok(LineCommand::Name(rest.join(" "))),
        "reload" | "r" => Ok(LineCommand::Reload),
        "help" | "h" | "?" => Ok(LineCommand::Help),
        "quit" | "q" | "exit" => Ok(LineCommand::Quit),
        other => Err(format!("Unknown command: {other}")),
    }
}

fn parse_coords(tokens: &[&str]) -> Result<Vec<Coord>, String> {
    if tokens.len() % 2 != 0 {
        return Err("Coordinates come in pairs: row col".to_string());
    }
    tokens
        .chunks(2)
        .map(|pair| match (pair[0].parse(), pair[1].parse()) {
            (Ok(row), Ok(col)) => Ok(Coord::new(row, col)),
            _ => Err(format!("Not a coordinate: {} {}", pair[0], pair[1])),
        })
        .collect()
}

/// Line-mode game state
pub struct SimpleGame<'a, A: ScoringApi + ?Sized> {
    api: &'a A,
    config: ClientConfig,
    session: Session,
}

impl<'a, A: ScoringApi + ?Sized> SimpleGame<'a, A> {
    #[must_use]
    pub fn new(api: &'a A, config: ClientConfig) -> Self {
        Self {
            api,
            config,
            session: Session::new(),
        }
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.config.username
    }

    /// Fetch the configured day's puzzle and show it
    ///
    /// # Errors
    ///
    /// Returns an error if the puzzle cannot be loaded.
    pub async fn load(&mut self) -> Result<()> {
        let puzzle = fetch_daily(
            self.api,
            self.config.puzzle_date(),
            self.config.grid_size,
        )
        .await?;
        self.session.load(puzzle);
        self.session.take_events();
        self.show_board();
        Ok(())
    }

    /// Run one command; returns `false` when the player quits
    ///
    /// Network failures are printed and leave the game as it was.
    pub async fn handle(&mut self, command: LineCommand) -> bool {
        match command {
            LineCommand::Select(coords) => {
                for coord in coords {
                    let events = self.session.apply(Command::SelectCell(coord));
                    if events.contains(&SessionEvent::SelectionRejected(coord)) {
                        println!("{}", format!("✗ Can't select {coord}").red());
                        break;
                    }
                }
                self.show_board();
            }
            LineCommand::Undo => {
                if self.session.apply(Command::Undo).is_empty() {
                    println!("Nothing to undo!");
                }
                self.show_board();
            }
            LineCommand::Clear => {
                self.session.apply(Command::Clear);
                self.show_board();
            }
            LineCommand::Add => {
                for event in self.session.apply(Command::Confirm) {
                    match event {
                        SessionEvent::WordQueued(word) => {
                            println!("{}", format!("✓ Queued {word}").green());
                        }
                        SessionEvent::WordTooShort(_) => {
                            println!("{}", "Too short.".yellow());
                        }
                        _ => {}
                    }
                }
                self.show_queue();
            }
            LineCommand::Remove(index) => {
                if self.session.apply(Command::RemoveWord(index)).is_empty() {
                    println!("No word #{}", index + 1);
                }
                self.show_queue();
            }
            LineCommand::Submit(extra) => self.submit(&extra).await,
            LineCommand::Board => self.show_board(),
            LineCommand::Leaders => self.show_leaders().await,
            LineCommand::Me => self.show_me().await,
            LineCommand::Name(name) => {
                self.config.username = normalize_username(&name);
                println!("Playing as {}", self.config.username.bright_cyan());
            }
            LineCommand::Reload => {
                if let Err(e) = self.load().await {
                    println!("{}", format!("❌ {e:#}").red());
                }
            }
            LineCommand::Help => print_help(),
            LineCommand::Quit => return false,
        }
        true
    }

    async fn submit(&mut self, extra: &[String]) {
        match self.session.submit(self.api, &self.config.username, extra).await {
            Ok(outcome) => {
                print_submit_outcome(&outcome);
                self.session.take_events();
            }
            Err(blocked) => println!("{}", blocked.to_string().yellow()),
        }
    }

    async fn show_leaders(&self) {
        let date = self.config.puzzle_date();
        match fetch_leaderboard(self.api, date, self.config.leaderboard_limit).await {
            Ok(board) => print_leaderboard(date, &board, Some(&self.config.username)),
            Err(e) => println!("{}", format!("❌ {e:#}").red()),
        }
    }

    async fn show_me(&self) {
        let date = self.config.puzzle_date();
        match fetch_me(self.api, date, &self.config.username).await {
            Ok(me) => print_player_score(&self.config.username, date, me.as_ref()),
            Err(e) => println!("{}", format!("❌ {e:#}").red()),
        }
    }

    fn show_board(&self) {
        if let Some(puzzle) = self.session.puzzle() {
            print_puzzle(puzzle, self.session.path().coords());
        }
        println!(
            "Current: {}",
            word_or_sentinel(self.session.current_word().as_deref())
                .bright_yellow()
                .bold()
        );
    }

    fn show_queue(&self) {
        if self.session.queue().is_empty() {
            println!("Queue: (empty)");
        } else {
            println!("Queue: {}", word_chips(self.session.queue().iter()));
        }
    }
}

fn print_help() {
    println!("\nCommands:");
    println!("  R C [R C ...]   select cells (row col, from 0)");
    println!("  undo | clear    remove the last cell / the whole path");
    println!("  add             queue the current word");
    println!("  rm N            remove word N from the queue");
    println!("  submit [words]  submit the queue plus any typed words");
    println!("  board | leaders | me | name NAME | reload | quit\n");
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if the puzzle cannot be loaded or stdin fails.
pub async fn run_simple<A: ScoringApi + ?Sized>(api: &A, config: ClientConfig) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Word Hunt - Interactive Mode                 ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Trace words through neighbouring letters, queue them, then submit.");
    println!("Playing as {}", config.username.bright_cyan());
    print_help();

    let mut game = SimpleGame::new(api, config);
    game.load().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout())?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_line(&line) {
            Ok(command) => {
                if !game.handle(command).await {
                    break;
                }
            }
            Err(message) => println!("{message}"),
        }
    }

    println!("\n👋 Thanks for playing!\n");
    Ok(())
}
