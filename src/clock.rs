use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A time on a 12-hour dial, in five minute steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if !(1..=12).contains(&hour) || minute > 55 || minute % 5 != 0 {
            return Err(Error::InvalidTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// The hour the phrase refers to once past the half; 12 wraps to 1
    pub fn next_hour(&self) -> u8 {
        self.hour % 12 + 1
    }

    pub fn hint_zone(&self) -> Option<HintZone> {
        HintZone::for_minute(self.minute)
    }

    /// A dial position: `hour` is clamped to 1..=12, `step` counts five minutes modulo the hour
    pub fn on_dial(hour: u8, step: u8) -> Self {
        Self {
            hour: hour.clamp(1, 12),
            minute: step % 12 * 5,
        }
    }

    /// Every valid time, 1:00 through 12:55
    pub fn all() -> impl Iterator<Item = ClockTime> {
        (1..=12u8).flat_map(|hour| {
            (0..12u8).map(move |step| ClockTime::on_dial(hour, step))
        })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (h, m) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| Error::ParseTime(s.to_string()))?;
        let hour = h.parse::<u8>().map_err(|_| Error::ParseTime(s.to_string()))?;
        if m.len() != 2 {
            return Err(Error::ParseTime(s.to_string()));
        }
        let minute = m.parse::<u8>().map_err(|_| Error::ParseTime(s.to_string()))?;
        ClockTime::new(hour, minute)
    }
}

/// Zones of the clock face that tell which connective a minute hand position calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum HintZone {
    #[strum(serialize = "OVER")]
    Over,
    #[strum(serialize = "KVART OVER")]
    KvartOver,
    #[strum(serialize = "PÅ HALV")]
    PaHalv,
    #[strum(serialize = "HALV")]
    Halv,
    #[strum(serialize = "OVER HALV")]
    OverHalv,
    #[strum(serialize = "KVART PÅ")]
    KvartPa,
    #[strum(serialize = "PÅ")]
    Pa,
}

impl HintZone {
    pub fn for_minute(minute: u8) -> Option<HintZone> {
        match minute {
            1..=14 => Some(HintZone::Over),
            15 => Some(HintZone::KvartOver),
            16..=29 => Some(HintZone::PaHalv),
            30 => Some(HintZone::Halv),
            31..=44 => Some(HintZone::OverHalv),
            45 => Some(HintZone::KvartPa),
            46..=59 => Some(HintZone::Pa),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_new_accepts_valid_times() {
        let t = ClockTime::new(8, 20).unwrap();
        assert_eq!(t.hour(), 8);
        assert_eq!(t.minute(), 20);
        assert!(ClockTime::new(1, 0).is_ok());
        assert!(ClockTime::new(12, 55).is_ok());
    }

    #[test]
    fn test_new_rejects_out_of_domain() {
        assert_matches!(
            ClockTime::new(0, 0),
            Err(Error::InvalidTime { hour: 0, minute: 0 })
        );
        assert_matches!(ClockTime::new(13, 0), Err(Error::InvalidTime { .. }));
        assert_matches!(ClockTime::new(8, 7), Err(Error::InvalidTime { .. }));
        assert_matches!(ClockTime::new(8, 60), Err(Error::InvalidTime { .. }));
    }

    #[test]
    fn test_next_hour_wraps() {
        assert_eq!(ClockTime::new(8, 30).unwrap().next_hour(), 9);
        assert_eq!(ClockTime::new(11, 30).unwrap().next_hour(), 12);
        assert_eq!(ClockTime::new(12, 30).unwrap().next_hour(), 1);
    }

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(ClockTime::new(8, 5).unwrap().to_string(), "08:05");
        assert_eq!(ClockTime::new(12, 45).unwrap().to_string(), "12:45");
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "8:20".parse::<ClockTime>().unwrap(),
            ClockTime::new(8, 20).unwrap(),
        );
        assert_eq!(
            "08:20".parse::<ClockTime>().unwrap(),
            ClockTime::new(8, 20).unwrap(),
        );
        assert_eq!(
            " 12:00 ".parse::<ClockTime>().unwrap(),
            ClockTime::new(12, 0).unwrap(),
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_matches!("820".parse::<ClockTime>(), Err(Error::ParseTime(_)));
        assert_matches!("8:5".parse::<ClockTime>(), Err(Error::ParseTime(_)));
        assert_matches!("x:20".parse::<ClockTime>(), Err(Error::ParseTime(_)));
        assert_matches!("13:20".parse::<ClockTime>(), Err(Error::InvalidTime { .. }));
        assert_matches!("8:21".parse::<ClockTime>(), Err(Error::InvalidTime { .. }));
    }

    #[test]
    fn test_on_dial() {
        assert_eq!(ClockTime::on_dial(8, 4), ClockTime::new(8, 20).unwrap());
        assert_eq!(ClockTime::on_dial(12, 11), ClockTime::new(12, 55).unwrap());
        assert_eq!(ClockTime::on_dial(0, 12), ClockTime::new(1, 0).unwrap());
        assert_eq!(ClockTime::on_dial(13, 0), ClockTime::new(12, 0).unwrap());
    }

    #[test]
    fn test_all_times() {
        let all: Vec<ClockTime> = ClockTime::all().collect();
        assert_eq!(all.len(), 144);
        assert_eq!(all[0], ClockTime::new(1, 0).unwrap());
        assert_eq!(all[143], ClockTime::new(12, 55).unwrap());
        let unique: std::collections::HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), 144);
    }

    #[test]
    fn test_hint_zones() {
        assert_eq!(HintZone::for_minute(0), None);
        assert_eq!(HintZone::for_minute(10), Some(HintZone::Over));
        assert_eq!(HintZone::for_minute(15), Some(HintZone::KvartOver));
        assert_eq!(HintZone::for_minute(20), Some(HintZone::PaHalv));
        assert_eq!(HintZone::for_minute(30), Some(HintZone::Halv));
        assert_eq!(HintZone::for_minute(40), Some(HintZone::OverHalv));
        assert_eq!(HintZone::for_minute(45), Some(HintZone::KvartPa));
        assert_eq!(HintZone::for_minute(55), Some(HintZone::Pa));
    }

    #[test]
    fn test_hint_zone_labels() {
        assert_eq!(HintZone::PaHalv.to_string(), "PÅ HALV");
        assert_eq!(HintZone::KvartOver.to_string(), "KVART OVER");
    }
}
