//! Time-of-day mood used to flavour a few replies.

use chrono::{DateTime, Local, Timelike, Utc};

/// The assistant's mood, derived from the local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    /// Before 10:00.
    Happy,
    /// 10:00 to 17:59.
    Work,
    /// 18:00 onwards.
    Sleepy,
}

impl Mood {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=9 => Self::Happy,
            10..=17 => Self::Work,
            _ => Self::Sleepy,
        }
    }

    /// Mood at `now` in the machine's local time zone.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self::from_hour(now.with_timezone(&Local).hour())
    }

    /// Line spoken before asking to confirm a shutdown.
    pub fn shutdown_preamble(self) -> Option<&'static str> {
        match self {
            Self::Happy => Some("You did great today."),
            Self::Work => None,
            Self::Sleepy => Some("Finally, good night."),
        }
    }
}
