#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub streak: u32,
    pub best_streak: u32,
    pub is_new_record: bool,
}

impl ScoreState {
    pub fn with_best(best_streak: u32) -> Self {
        Self {
            best_streak,
            ..Self::default()
        }
    }

    /// Count a completed round. Returns true when the record was raised.
    pub fn record_win(&mut self) -> bool {
        self.streak += 1;
        if self.streak > self.best_streak {
            self.best_streak = self.streak;
            self.is_new_record = true;
            true
        } else {
            false
        }
    }

    pub fn record_miss(&mut self) {
        self.streak = 0;
    }

    pub fn begin_round(&mut self) {
        self.is_new_record = false;
    }
}
