//! TUI rendering with ratatui
//!
//! Grid, word builder, queue and scores for the Word Hunt interface.

use super::app::{App, InputMode, MePanel, MessageStyle};
use crate::core::{Coord, points_for, total_points};
use crate::output::formatters::{score_bar, word_or_sentinel};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};
use std::time::Instant;

/// Width of one grid cell in columns
pub const CELL_W: u16 = 5;
/// Height of one grid cell in rows
pub const CELL_H: u16 = 3;

struct Areas {
    header: Rect,
    grid: Rect,
    word: Rect,
    queue: Rect,
    leaderboard: Rect,
    me: Rect,
    messages: Rect,
    input: Rect,
    status: Rect,
}

fn areas(area: Rect) -> Areas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Grid
            Constraint::Length(3), // Current word
            Constraint::Length(4), // Queue
        ])
        .split(main[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50), // Leaderboard
            Constraint::Length(5),      // Personal score
            Constraint::Min(3),         // Messages
        ])
        .split(main[1]);

    Areas {
        header: chunks[0],
        grid: left[0],
        word: left[1],
        queue: left[2],
        leaderboard: right[0],
        me: right[1],
        messages: right[2],
        input: chunks[2],
        status: chunks[3],
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Screen rectangle holding the letter cells for a `size` x `size` grid
#[must_use]
pub fn grid_rect(area: Rect, size: usize) -> Rect {
    let inner = Block::default().borders(Borders::ALL).inner(areas(area).grid);
    let width = (to_u16(size).saturating_mul(CELL_W)).min(inner.width);
    let height = (to_u16(size).saturating_mul(CELL_H)).min(inner.height);
    Rect::new(
        inner.x + (inner.width - width) / 2,
        inner.y + (inner.height - height) / 2,
        width,
        height,
    )
}

/// Grid cell under the terminal position `(x, y)`
#[must_use]
pub fn cell_at(grid: Rect, size: usize, x: u16, y: u16) -> Option<Coord> {
    if !grid.contains(Position::new(x, y)) {
        return None;
    }
    let row = usize::from((y - grid.y) / CELL_H);
    let col = usize::from((x - grid.x) / CELL_W);
    (row < size && col < size).then(|| Coord::new(row, col))
}

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App, now: Instant) {
    let areas = areas(f.area());

    render_header(f, app, areas.header);
    render_grid(f, app, areas.grid, now);
    render_word(f, app, areas.word, now);
    render_queue(f, app, areas.queue);
    render_leaderboard(f, app, areas.leaderboard);
    render_me(f, app, areas.me);
    render_messages(f, app, areas.messages);
    render_input(f, app, areas.input);
    render_status(f, app, areas.status);

    render_confetti(f, app, now);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let mut title = format!("🔤 WORD HUNT • {}", app.date);
    if let Some(puzzle) = app.session.puzzle() {
        let size = puzzle.grid.size();
        title.push_str(&format!(" • {size}x{size} • seed {}", puzzle.seed));
    }
    match (app.loading, app.pending_date) {
        (true, Some(date)) => title.push_str(&format!(" • loading {date}...")),
        (true, None) => title.push_str(" • loading..."),
        _ => {}
    }

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_grid(f: &mut Frame, app: &App, area: Rect, now: Instant) {
    let focused = app.input_mode == InputMode::Grid;
    let block = Block::default()
        .title(" Grid ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(if focused { Color::Cyan } else { Color::Gray }));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(grid) = app.session.grid() else {
        let text = if app.loading { "Loading..." } else { "No puzzle" };
        f.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
        return;
    };

    let size = grid.size();
    let origin = grid_rect(f.area(), size);
    let path = app.session.path();
    let last = path.coords().last().copied();

    for row in 0..size {
        for col in 0..size {
            let coord = Coord::new(row, col);
            if !app.effects.is_revealed(row * size + col, now) {
                continue;
            }

            let shift = app.effects.shake_offset(coord, now);
            let x = (origin.x + to_u16(col) * CELL_W).saturating_add_signed(shift);
            let y = origin.y + to_u16(row) * CELL_H;
            let cell_area = Rect::new(x, y, CELL_W, CELL_H).intersection(inner);
            if cell_area.is_empty() {
                continue;
            }

            let (border, letter) = if Some(coord) == last {
                (
                    Style::default().fg(Color::Yellow),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else if path.contains(coord) {
                (
                    Style::default().fg(Color::Yellow),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else if app.effects.is_fading(coord, now) {
                (
                    Style::default().fg(Color::DarkGray),
                    Style::default().fg(Color::DarkGray),
                )
            } else {
                (Style::default().fg(Color::Gray), Style::default().fg(Color::White))
            };

            let is_cursor = focused && coord == app.cursor;
            let (border, border_type) = if is_cursor {
                (border.fg(Color::Cyan), BorderType::Thick)
            } else {
                (border, BorderType::Rounded)
            };

            let ch = grid.letter(coord).unwrap_or(' ');
            let cell = Paragraph::new(Span::styled(ch.to_string(), letter))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(border_type)
                        .border_style(border),
                );
            f.render_widget(cell, cell_area);
        }
    }
}

fn render_word(f: &mut Frame, app: &App, area: Rect, now: Instant) {
    let word = app.session.current_word();
    let mut style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    if app.effects.is_bumping(now) {
        style = style.fg(Color::Red).add_modifier(Modifier::REVERSED);
    }

    let mut spans = vec![Span::styled(word_or_sentinel(word.as_deref()), style)];
    if let Some(points) = word.as_deref().map(points_for).filter(|p| *p > 0) {
        spans.push(Span::styled(
            format!("  +{points}"),
            Style::default().fg(Color::Green),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" Current Word | a: add  u: undo  c: clear ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(paragraph, area);
}

fn render_queue(f: &mut Frame, app: &App, area: Rect) {
    let queue = app.session.queue();
    let focused = app.input_mode == InputMode::Queue;

    let content = if queue.is_empty() {
        Line::from(Span::styled(
            "No words queued",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = Vec::new();
        for (i, word) in queue.iter().enumerate() {
            let style = if focused && i == app.queue_cursor {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(format!(" {word} ✕ "), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    };

    let words: Vec<&str> = queue.iter().collect();
    let title = format!(
        " Queue ({}) • up to {} pts ",
        queue.len(),
        total_points(&words)
    );
    let paragraph = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .style(Style::default().fg(if focused { Color::Cyan } else { Color::Reset })),
    );
    f.render_widget(paragraph, area);
}

fn render_leaderboard(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = match &app.leaderboard {
        None => vec![ListItem::new("Loading...")],
        Some(board) if board.top.is_empty() => vec![ListItem::new("No scores yet.")],
        Some(board) => {
            let top = board.top.first().map_or(0, |row| row.score);
            board
                .top
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    let style = if row.username == app.config.username {
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!("{:>2}. {:<12} {:>4} {:>3}w ", i + 1, row.username, row.score, row.words_found),
                            style,
                        ),
                        Span::styled(score_bar(row.score, top, 10), Style::default().fg(Color::Cyan)),
                    ]))
                })
                .collect()
        }
    };

    let list = List::new(items).block(
        Block::default()
            .title(" Leaderboard ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(list, area);
}

fn render_me(f: &mut Frame, app: &App, area: Rect) {
    let lines = match &app.me {
        MePanel::SignedOut => vec![Line::from("Enter your name to check score.")],
        MePanel::Loading => vec![Line::from("Loading...")],
        MePanel::NoSubmission => vec![Line::from("No submission yet.")],
        MePanel::Failed => vec![Line::from(Span::styled(
            "Could not load score",
            Style::default().fg(Color::Red),
        ))],
        MePanel::Score(me) => vec![
            Line::from(format!(
                "Score: {}  •  Words: {}",
                me.score.unwrap_or_default(),
                me.words_found.unwrap_or_default()
            )),
            Line::from(Span::styled(
                me.words.as_deref().unwrap_or_default().join(", "),
                Style::default().fg(Color::DarkGray),
            )),
        ],
    };

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(format!(" {} ", app.config.username))
            .borders(Borders::ALL),
    );
    f.render_widget(paragraph, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let status = app.submit_status.as_deref().unwrap_or("");
    let (title, content, color) = match app.input_mode {
        InputMode::Typing => (
            format!(" Extra words | Enter to submit | Esc to go back {status} "),
            app.typed_words.as_str(),
            Color::Yellow,
        ),
        InputMode::Username => (
            " Player name | Enter to save | Esc to cancel ".to_string(),
            app.username_input.as_str(),
            Color::Magenta,
        ),
        InputMode::Grid | InputMode::Queue => (
            format!(" Extra words (Tab to edit) | s: submit {status} "),
            app.typed_words.as_str(),
            Color::DarkGray,
        ),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.input_mode {
        InputMode::Grid => {
            "q: Quit | arrows/hjkl: Move | Space: Select | s: Submit | n: Name | [ ]: Date | + -: Size | r L m: Refresh"
        }
        InputMode::Typing => "Enter: Submit | Tab: Queue | Esc: Grid",
        InputMode::Queue => "↑↓: Pick | x: Remove | s: Submit | Tab: Grid",
        InputMode::Username => "Enter: Save | Esc: Cancel",
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, area);
}

fn render_confetti(f: &mut Frame, app: &App, now: Instant) {
    let Some(confetti) = app.effects.confetti() else {
        return;
    };
    let buf = f.buffer_mut();
    for (x, y, glyph, color) in confetti.pieces_at(now) {
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_char(glyph).set_fg(color);
        }
    }
}
