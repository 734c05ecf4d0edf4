use std::collections::VecDeque;

use rand::Rng;

use crate::clock::ClockTime;

/// Supplies the time shown at the start of each round
pub trait TimeSource {
    fn next_time(&mut self) -> ClockTime;
}

/// Uniform draw: hour in 1..=12, minute in 0, 5, ..., 55
#[derive(Debug, Default)]
pub struct RandomTimeSource;

impl TimeSource for RandomTimeSource {
    fn next_time(&mut self) -> ClockTime {
        let mut rng = rand::thread_rng();
        ClockTime::on_dial(rng.gen_range(1..=12), rng.gen_range(0..12))
    }
}

/// Replays a fixed list of times, cycling when exhausted. Used by tests and demos.
#[derive(Debug, Clone)]
pub struct ScriptedTimeSource {
    times: VecDeque<ClockTime>,
}

impl ScriptedTimeSource {
    /// Panics on an empty list; a source must always be able to produce a time.
    pub fn new(times: Vec<ClockTime>) -> Self {
        assert!(
            !times.is_empty(),
            "scripted time source needs at least one time",
        );
        Self {
            times: times.into(),
        }
    }
}

impl TimeSource for ScriptedTimeSource {
    fn next_time(&mut self) -> ClockTime {
        let time = self.times[0];
        self.times.rotate_left(1);
        time
    }
}
