//! One learner's game: the current round, the words picked so far, and the
//! streak/record bookkeeping.
//!
//! A wrong word puts the round into [`RoundState::Error`] for a short flash.
//! The way back to [`RoundState::Playing`] is a [`PendingRevert`] tagged with
//! the round it belongs to; the owner drives it by calling
//! [`GameSession::poll`] from its tick. Starting a round drops any pending
//! revert, and a revert whose round no longer matches is discarded.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::clock::ClockTime;
use crate::config::{Settings, SettingsStore};
use crate::error::Result;
use crate::phrase::{phrase_for, Phrase};
use crate::score::ScoreState;
use crate::time_source::TimeSource;
use crate::vocabulary::Token;

/// How long a wrong answer is shown before input is accepted again
pub const ERROR_FLASH: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum RoundState {
    Playing,
    Won,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRevert {
    pub round: u64,
    pub due: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundStart {
    pub round: u64,
    pub time: ClockTime,
    pub phrase_len: usize,
}

/// What the caller sees after each submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub state: RoundState,
    pub user_sequence: Vec<Token>,
    pub streak: u32,
    pub best_streak: u32,
    pub is_new_record: bool,
}

#[derive(Debug, Clone)]
struct Round {
    id: u64,
    time: ClockTime,
    phrase: Phrase,
}

pub struct GameSession {
    round: Option<Round>,
    next_round_id: u64,
    user_sequence: Vec<Token>,
    state: RoundState,
    score: ScoreState,
    settings: Settings,
    pending_revert: Option<PendingRevert>,
    time_source: Box<dyn TimeSource>,
    store: Option<Box<dyn SettingsStore>>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("round", &self.round)
            .field("user_sequence", &self.user_sequence)
            .field("state", &self.state)
            .field("score", &self.score)
            .field("settings", &self.settings)
            .field("pending_revert", &self.pending_revert)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// A session that keeps its record in memory only
    pub fn new(initial_best_streak: u32, time_source: Box<dyn TimeSource>) -> Self {
        let settings = Settings {
            best_streak: initial_best_streak,
            ..Settings::default()
        };
        Self::build(settings, time_source, None)
    }

    /// A session whose record and display settings are read from, and written back to, `store`
    pub fn with_store(time_source: Box<dyn TimeSource>, store: Box<dyn SettingsStore>) -> Self {
        let settings = store.load();
        Self::build(settings, time_source, Some(store))
    }

    fn build(
        settings: Settings,
        time_source: Box<dyn TimeSource>,
        store: Option<Box<dyn SettingsStore>>,
    ) -> Self {
        Self {
            round: None,
            next_round_id: 1,
            user_sequence: Vec::new(),
            state: RoundState::Playing,
            score: ScoreState::with_best(settings.best_streak),
            settings,
            pending_revert: None,
            time_source,
            store,
        }
    }

    pub fn start_round(&mut self) -> Result<RoundStart> {
        let time = self.time_source.next_time();
        let phrase = phrase_for(time)?;
        let id = self.next_round_id;
        self.next_round_id += 1;

        if let Some(stale) = self.pending_revert.take() {
            debug!(round = stale.round, "cancelled pending revert");
        }
        let start = RoundStart {
            round: id,
            time,
            phrase_len: phrase.len(),
        };
        self.round = Some(Round { id, time, phrase });
        self.user_sequence.clear();
        self.state = RoundState::Playing;
        self.score.begin_round();

        info!(round = id, time = %time, "round started");
        Ok(start)
    }

    /// The "next" action after a won round
    pub fn next_round(&mut self) -> Result<RoundStart> {
        self.start_round()
    }

    pub fn submit(&mut self, token: Token) -> Snapshot {
        self.submit_at(token, Instant::now())
    }

    /// Submit free text; anything outside the vocabulary counts as a wrong word
    pub fn submit_word(&mut self, word: &str) -> Snapshot {
        self.submit_word_at(word, Instant::now())
    }

    pub fn submit_word_at(&mut self, word: &str, now: Instant) -> Snapshot {
        match word.parse::<Token>() {
            Ok(token) => self.submit_at(token, now),
            Err(e) => {
                debug!(error = %e, "unknown word");
                self.judge(None, now)
            }
        }
    }

    pub fn submit_at(&mut self, token: Token, now: Instant) -> Snapshot {
        self.judge(Some(token), now)
    }

    fn judge(&mut self, token: Option<Token>, now: Instant) -> Snapshot {
        // a flash that is already over must not swallow this word
        self.poll(now);
        if self.state != RoundState::Playing {
            return self.snapshot();
        }
        let Some(round) = self.round.as_ref() else {
            return self.snapshot();
        };
        let idx = self.user_sequence.len();
        let Some(expected) = round.phrase.get(idx) else {
            return self.snapshot();
        };
        let round_id = round.id;
        let phrase_len = round.phrase.len();

        match token {
            Some(token) if token == expected => {
                self.user_sequence.push(token);
                debug!(round = round_id, position = idx, word = %token, "accepted");
                if self.user_sequence.len() == phrase_len {
                    self.state = RoundState::Won;
                    if self.score.record_win() {
                        self.settings.best_streak = self.score.best_streak;
                        self.persist();
                    }
                    info!(
                        round = round_id,
                        streak = self.score.streak,
                        best = self.score.best_streak,
                        "round won"
                    );
                }
            }
            _ => {
                self.score.record_miss();
                self.state = RoundState::Error;
                self.pending_revert = Some(PendingRevert {
                    round: round_id,
                    due: now + ERROR_FLASH,
                });
                debug!(round = round_id, position = idx, "mismatch");
            }
        }

        self.snapshot()
    }

    /// Apply a due revert. Returns true when the state went back to playing.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending_revert else {
            return false;
        };
        if now < pending.due {
            return false;
        }
        self.pending_revert = None;

        let current = self.round.as_ref().map(|r| r.id);
        if current != Some(pending.round) || self.state != RoundState::Error {
            debug!(round = pending.round, "discarded stale revert");
            return false;
        }
        self.state = RoundState::Playing;
        true
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            user_sequence: self.user_sequence.clone(),
            streak: self.score.streak,
            best_streak: self.score.best_streak,
            is_new_record: self.score.is_new_record,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn round_id(&self) -> Option<u64> {
        self.round.as_ref().map(|r| r.id)
    }

    pub fn time(&self) -> Option<ClockTime> {
        self.round.as_ref().map(|r| r.time)
    }

    pub fn phrase_len(&self) -> usize {
        self.round.as_ref().map_or(0, |r| r.phrase.len())
    }

    pub fn user_sequence(&self) -> &[Token] {
        &self.user_sequence
    }

    pub fn score(&self) -> ScoreState {
        self.score
    }

    pub fn pending_revert(&self) -> Option<PendingRevert> {
        self.pending_revert
    }

    /// The word the learner has to pick next. Exposes the answer.
    pub fn expected_token(&self) -> Option<Token> {
        self.round
            .as_ref()
            .and_then(|r| r.phrase.get(self.user_sequence.len()))
    }

    /// The full target phrase, for an answer display. Exposes the answer.
    pub fn answer(&self) -> Option<&Phrase> {
        self.round.as_ref().map(|r| &r.phrase)
    }

    pub fn is_dark_mode(&self) -> bool {
        self.settings.is_dark_mode
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.settings.is_dark_mode = !self.settings.is_dark_mode;
        self.persist();
        self.settings.is_dark_mode
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.settings) {
                warn!(error = %e, "could not save settings");
            }
        }
    }
}
