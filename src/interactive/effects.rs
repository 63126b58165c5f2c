//! Cosmetic animations driven by session events
//!
//! Every effect is a pure function of its start instant and `now`.

use crate::core::Coord;
use crate::session::SessionEvent;
use rand::Rng;
use ratatui::style::Color;
use std::time::{Duration, Instant};

pub const CONFETTI_PIECES: usize = 140;
pub const CONFETTI_DURATION: Duration = Duration::from_millis(1800);
pub const SHAKE_DURATION: Duration = Duration::from_millis(160);
pub const BUMP_DURATION: Duration = Duration::from_millis(160);
pub const FADE_DURATION: Duration = Duration::from_millis(300);
/// Delay between consecutive cells appearing after a load
pub const REVEAL_STEP: Duration = Duration::from_millis(30);

pub const PALETTE: [Color; 5] = [
    Color::Rgb(0x6e, 0xa8, 0xff),
    Color::Rgb(0x9c, 0x6e, 0xff),
    Color::Rgb(0x6e, 0xff, 0xc1),
    Color::Rgb(0xff, 0xd3, 0x6e),
    Color::Rgb(0xff, 0x6e, 0xa8),
];

const GLYPHS: [char; 4] = ['■', '▪', '◆', '▴'];

/// A time-boxed animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    started: Instant,
    duration: Duration,
}

impl Pulse {
    #[must_use]
    pub const fn new(started: Instant, duration: Duration) -> Self {
        Self { started, duration }
    }

    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    #[must_use]
    pub fn is_active(&self, now: Instant) -> bool {
        self.elapsed(now) < self.duration
    }
}

/// Horizontal offset of a shaking cell: right, then left, then still
#[must_use]
pub fn shake_offset(pulse: &Pulse, now: Instant) -> i16 {
    match pulse.elapsed(now).as_millis() {
        0..60 => 1,
        60..160 => -1,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy)]
struct Piece {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    color: Color,
    glyph: char,
}

/// Falling confetti over a `width` x `height` area
#[derive(Debug, Clone)]
pub struct Confetti {
    pulse: Pulse,
    width: u16,
    height: u16,
    pieces: Vec<Piece>,
}

impl Confetti {
    pub fn new<R: Rng>(rng: &mut R, width: u16, height: u16, now: Instant) -> Self {
        let w = f32::from(width.max(1));
        let pieces = (0..CONFETTI_PIECES)
            .map(|_| Piece {
                x: rng.random_range(0.0..w),
                y: rng.random_range(-5.0..-1.0),
                // cells per second
                vx: rng.random_range(-2.0..2.0),
                vy: rng.random_range(6.0..13.0),
                color: PALETTE[rng.random_range(0..PALETTE.len())],
                glyph: GLYPHS[rng.random_range(0..GLYPHS.len())],
            })
            .collect();
        Self {
            pulse: Pulse::new(now, CONFETTI_DURATION),
            width,
            height,
            pieces,
        }
    }

    #[must_use]
    pub fn is_done(&self, now: Instant) -> bool {
        !self.pulse.is_active(now)
    }

    /// Visible pieces at `now` as `(x, y, glyph, color)`
    ///
    /// Pieces that fall past the bottom wrap back to the top.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // values checked to be in range
    pub fn pieces_at(&self, now: Instant) -> Vec<(u16, u16, char, Color)> {
        if self.is_done(now) || self.width == 0 || self.height == 0 {
            return Vec::new();
        }
        let t = self.pulse.elapsed(now).as_secs_f32();
        let span = f32::from(self.height) + 2.0;
        self.pieces
            .iter()
            .filter_map(|p| {
                let x = p.x + p.vx * t;
                let y = (p.y + p.vy * t).rem_euclid(span) - 1.0;
                let in_bounds =
                    (0.0..f32::from(self.width)).contains(&x) && (0.0..f32::from(self.height)).contains(&y);
                in_bounds.then(|| (x as u16, y as u16, p.glyph, p.color))
            })
            .collect()
    }
}

/// Active animations
#[derive(Debug, Default)]
pub struct Effects {
    shake: Option<(Coord, Pulse)>,
    fades: Vec<(Coord, Pulse)>,
    bump: Option<Pulse>,
    reveal: Option<Instant>,
    confetti: Option<Confetti>,
}

impl Effects {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start whatever animation `event` calls for
    pub fn on_event<R: Rng>(
        &mut self,
        event: &SessionEvent,
        now: Instant,
        rng: &mut R,
        area: (u16, u16),
    ) {
        match event {
            SessionEvent::SelectionRejected(coord) => {
                self.shake = Some((*coord, Pulse::new(now, SHAKE_DURATION)));
            }
            SessionEvent::CellSelected(coord) => self.fades.retain(|(c, _)| c != coord),
            SessionEvent::CellReleased(coord) => {
                self.fades.retain(|(c, _)| c != coord);
                self.fades.push((*coord, Pulse::new(now, FADE_DURATION)));
            }
            SessionEvent::WordTooShort(_) => self.bump = Some(Pulse::new(now, BUMP_DURATION)),
            SessionEvent::PuzzleLoaded { .. } => {
                self.shake = None;
                self.fades.clear();
                self.reveal = Some(now);
            }
            SessionEvent::Celebrate => {
                self.confetti = Some(Confetti::new(rng, area.0, area.1, now));
            }
            SessionEvent::WordQueued(_)
            | SessionEvent::WordRemoved { .. }
            | SessionEvent::QueueCleared => {}
        }
    }

    /// Drop finished animations
    pub fn tick(&mut self, now: Instant) {
        if self.shake.is_some_and(|(_, p)| !p.is_active(now)) {
            self.shake = None;
        }
        self.fades.retain(|(_, p)| p.is_active(now));
        if self.bump.is_some_and(|p| !p.is_active(now)) {
            self.bump = None;
        }
        if self.confetti.as_ref().is_some_and(|c| c.is_done(now)) {
            self.confetti = None;
        }
    }

    #[must_use]
    pub fn shake_offset(&self, coord: Coord, now: Instant) -> i16 {
        match &self.shake {
            Some((c, pulse)) if *c == coord => shake_offset(pulse, now),
            _ => 0,
        }
    }

    #[must_use]
    pub fn is_fading(&self, coord: Coord, now: Instant) -> bool {
        self.fades
            .iter()
            .any(|(c, p)| *c == coord && p.is_active(now))
    }

    #[must_use]
    pub fn is_bumping(&self, now: Instant) -> bool {
        self.bump.is_some_and(|p| p.is_active(now))
    }

    /// Whether the `index`-th cell (row-major) has appeared yet
    #[must_use]
    pub fn is_revealed(&self, index: usize, now: Instant) -> bool {
        self.reveal.is_none_or(|start| {
            let delay = REVEAL_STEP.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
            now.saturating_duration_since(start) >= delay
        })
    }

    #[must_use]
    pub const fn confetti(&self) -> Option<&Confetti> {
        self.confetti.as_ref()
    }
}
