use std::time::Instant;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use itertools::Itertools;
use tracing::warn;

use crate::error::Result;
use crate::history::{AttemptStat, HistoryDb, RoundStat};
use crate::session::{GameSession, RoundState};
use crate::vocabulary::{Token, WordGroup};

/// Words per row in the word bank
pub const COLUMNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Play,
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankRow {
    pub group: WordGroup,
    /// First row of its group; the group label is drawn above it
    pub opens_group: bool,
    pub tokens: Vec<Token>,
}

/// The selectable words, laid out in rows of [`COLUMNS`] per group, with a cursor
#[derive(Debug, Clone)]
pub struct WordBank {
    rows: Vec<BankRow>,
    row: usize,
    col: usize,
}

impl WordBank {
    pub fn new() -> Self {
        let rows = WordGroup::ALL
            .into_iter()
            .flat_map(|group| {
                group
                    .tokens()
                    .chunks(COLUMNS)
                    .enumerate()
                    .map(|(i, chunk)| BankRow {
                        group,
                        opens_group: i == 0,
                        tokens: chunk.to_vec(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        Self { rows, row: 0, col: 0 }
    }

    pub fn rows(&self) -> &[BankRow] {
        &self.rows
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn selected(&self) -> Token {
        self.rows[self.row].tokens[self.col]
    }

    pub fn left(&mut self) {
        self.col = self.col.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.col + 1 < self.rows[self.row].tokens.len() {
            self.col += 1;
        }
    }

    pub fn up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.clamp_col();
        }
    }

    pub fn down(&mut self) {
        if self.row + 1 < self.rows.len() {
            self.row += 1;
            self.clamp_col();
        }
    }

    /// Move the cursor onto `token`
    pub fn select(&mut self, token: Token) {
        for (r, row) in self.rows.iter().enumerate() {
            if let Some(c) = row.tokens.iter().position(|t| *t == token) {
                self.row = r;
                self.col = c;
                return;
            }
        }
    }

    fn clamp_col(&mut self) {
        let len = self.rows[self.row].tokens.len();
        if self.col >= len {
            self.col = len - 1;
        }
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AppOptions {
    pub show_hints: bool,
    pub show_answer: bool,
}

#[derive(Debug)]
pub struct App {
    pub session: GameSession,
    pub history: Option<HistoryDb>,
    pub view: View,
    pub bank: WordBank,
    pub show_hints: bool,
    pub show_answer: bool,
    pub mistakes: u32,
}

impl App {
    /// Wraps `session` and starts its first round
    pub fn new(
        mut session: GameSession,
        history: Option<HistoryDb>,
        options: AppOptions,
    ) -> Result<Self> {
        session.start_round()?;
        Ok(Self {
            session,
            history,
            view: View::Play,
            bank: WordBank::new(),
            show_hints: options.show_hints,
            show_answer: options.show_answer,
            mistakes: 0,
        })
    }

    pub fn next_round(&mut self) -> Result<()> {
        self.session.next_round()?;
        self.mistakes = 0;
        Ok(())
    }

    /// Returns true when the screen needs a redraw
    pub fn on_tick(&mut self, now: Instant) -> bool {
        self.session.poll(now)
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Result<Control> {
        self.on_key_at(key, Instant::now())
    }

    pub fn on_key_at(&mut self, key: KeyEvent, now: Instant) -> Result<Control> {
        // a steady key stream starves the tick
        self.session.poll(now);

        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Ok(Control::Quit);
        }

        match self.view {
            View::Stats => {
                if matches!(key.code, KeyCode::Char('b') | KeyCode::Backspace) {
                    self.view = View::Play;
                }
            }
            View::Play => match key.code {
                KeyCode::Left | KeyCode::Char('h') => self.bank.left(),
                KeyCode::Right | KeyCode::Char('l') => self.bank.right(),
                KeyCode::Up | KeyCode::Char('k') => self.bank.up(),
                KeyCode::Down | KeyCode::Char('j') => self.bank.down(),
                KeyCode::Char('?') => self.show_hints = !self.show_hints,
                KeyCode::Char('a') => self.show_answer = !self.show_answer,
                KeyCode::Char('d') => {
                    self.session.toggle_dark_mode();
                }
                KeyCode::Char('s') => self.view = View::Stats,
                KeyCode::Char('n') if self.session.state() == RoundState::Won => {
                    self.next_round()?
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if self.session.state() == RoundState::Won {
                        self.next_round()?;
                    } else {
                        self.submit_at(self.bank.selected(), now);
                    }
                }
                _ => {}
            },
        }
        Ok(Control::Continue)
    }

    /// Submit one word and record the outcome in the history
    pub fn submit_at(&mut self, token: Token, now: Instant) {
        self.session.poll(now);
        if self.session.state() != RoundState::Playing {
            return;
        }
        let position = self.session.user_sequence().len();
        let (Some(expected), Some(time)) = (self.session.expected_token(), self.session.time())
        else {
            return;
        };

        let snap = self.session.submit_at(token, now);
        let was_correct = snap.state != RoundState::Error;
        if !was_correct {
            self.mistakes += 1;
        }

        if let Some(history) = &self.history {
            let attempt = AttemptStat {
                time,
                position,
                expected,
                submitted: token.to_string(),
                was_correct,
                timestamp: Local::now(),
            };
            if let Err(e) = history.record_attempt(&attempt) {
                warn!(error = %e, "could not record attempt");
            }
            if snap.state == RoundState::Won {
                let round = RoundStat {
                    time,
                    mistakes: self.mistakes,
                    streak_after: snap.streak,
                    timestamp: Local::now(),
                };
                if let Err(e) = history.record_round(&round) {
                    warn!(error = %e, "could not record round");
                }
            }
        }
    }

    /// The learner's words so far, space separated
    pub fn sentence(&self) -> String {
        self.session.user_sequence().iter().join(" ")
    }
}
