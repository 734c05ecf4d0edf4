use chrono::{DateTime, Local};
use rusqlite::{params, Connection};
use std::path::Path;

use crate::clock::ClockTime;
use crate::error::Result;
use crate::vocabulary::Token;

/// One word picked by the learner
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptStat {
    pub time: ClockTime,
    pub position: usize,
    pub expected: Token,
    pub submitted: String,
    pub was_correct: bool,
    pub timestamp: DateTime<Local>,
}

/// One completed round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundStat {
    pub time: ClockTime,
    pub mistakes: u32,
    pub streak_after: u32,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenSummary {
    pub token: Token,
    pub attempts: i64,
    pub misses: i64,
    pub miss_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MinuteSummary {
    pub minute: u8,
    pub rounds: i64,
    pub mistakes: i64,
    pub avg_mistakes: f64,
}

/// Practice history kept in SQLite
#[derive(Debug)]
pub struct HistoryDb {
    conn: Connection,
}

impl HistoryDb {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS attempts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                hour INTEGER NOT NULL,
                minute INTEGER NOT NULL,
                position INTEGER NOT NULL,
                expected TEXT NOT NULL,
                submitted TEXT NOT NULL,
                was_correct BOOLEAN NOT NULL,
                timestamp TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_attempts_expected ON attempts(expected);
            CREATE TABLE IF NOT EXISTS rounds (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                hour INTEGER NOT NULL,
                minute INTEGER NOT NULL,
                mistakes INTEGER NOT NULL,
                streak_after INTEGER NOT NULL,
                timestamp TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_rounds_minute ON rounds(minute);
            "#,
        )?;
        Ok(HistoryDb { conn })
    }

    pub fn record_attempt(&self, stat: &AttemptStat) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO attempts
            (hour, minute, position, expected, submitted, was_correct, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                stat.time.hour(),
                stat.time.minute(),
                stat.position as i64,
                stat.expected.to_string(),
                stat.submitted,
                stat.was_correct,
                stat.timestamp.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn record_round(&self, stat: &RoundStat) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO rounds (hour, minute, mistakes, streak_after, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                stat.time.hour(),
                stat.time.minute(),
                stat.mistakes,
                stat.streak_after,
                stat.timestamp.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Attempts and misses per expected word, worst first
    pub fn token_summary(&self) -> Result<Vec<TokenSummary>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT
                expected,
                COUNT(*) as attempts,
                SUM(CASE WHEN was_correct = 0 THEN 1 ELSE 0 END) as misses
            FROM attempts
            GROUP BY expected
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        let mut summary = Vec::new();
        for row in rows {
            let (word, attempts, misses) = row?;
            // rows written by an older vocabulary are skipped
            if let Ok(token) = word.parse::<Token>() {
                summary.push(TokenSummary {
                    token,
                    attempts,
                    misses,
                    miss_rate: rate(misses, attempts),
                });
            }
        }
        summary.sort_by(|a, b| {
            b.miss_rate
                .partial_cmp(&a.miss_rate)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.token.cmp(&b.token))
        });
        Ok(summary)
    }

    /// Completed rounds and their mistakes per minute value, ordered by minute
    pub fn minute_summary(&self) -> Result<Vec<MinuteSummary>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT minute, COUNT(*), SUM(mistakes)
            FROM rounds
            GROUP BY minute
            ORDER BY minute
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            let minute: u8 = row.get(0)?;
            let rounds: i64 = row.get(1)?;
            let mistakes: i64 = row.get(2)?;
            Ok(MinuteSummary {
                minute,
                rounds,
                mistakes,
                avg_mistakes: if rounds == 0 {
                    0.0
                } else {
                    mistakes as f64 / rounds as f64
                },
            })
        })?;

        let mut summary = Vec::new();
        for row in rows {
            summary.push(row?);
        }
        Ok(summary)
    }

    pub fn rounds_played(&self) -> Result<i64> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM rounds", [], |row| row.get(0))?;
        Ok(n)
    }

    pub fn clear_all(&self) -> Result<()> {
        self.conn
            .execute_batch("DELETE FROM attempts; DELETE FROM rounds;")?;
        Ok(())
    }
}

fn rate(part: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}
