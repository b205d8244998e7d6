//! Sprinkler heads and their activation schedules.

use irrigation_core::fixed::{GameMinutes, MINUTES_PER_DAY};
use irrigation_core::grid::GridPosition;
use irrigation_core::id::SprinklerId;
use irrigation_coverage::{CoverageTile, SprinklerClass};
use serde::{Deserialize, Serialize};

/// Errors from building a schedule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("minute of day {0} is out of range (must be below {MINUTES_PER_DAY})")]
    MinuteOutOfRange(u16),
    #[error("time range starting and ending at {0} is empty")]
    EmptyRange(u16),
}

/// A daily window, in minutes since midnight. `start` is inclusive and
/// `end` exclusive; `start > end` wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(u16, u16)", into = "(u16, u16)")]
pub struct TimeRange {
    start: u16,
    end: u16,
}

impl TimeRange {
    pub fn new(start: u16, end: u16) -> Result<Self, ScheduleError> {
        for minute in [start, end] {
            if u64::from(minute) >= MINUTES_PER_DAY {
                return Err(ScheduleError::MinuteOutOfRange(minute));
            }
        }
        if start == end {
            return Err(ScheduleError::EmptyRange(start));
        }
        Ok(Self { start, end })
    }

    /// Convenience for whole hours, e.g. `TimeRange::hours(22, 4)`.
    pub fn hours(start: u16, end: u16) -> Result<Self, ScheduleError> {
        Self::new(start.saturating_mul(60), end.saturating_mul(60))
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    /// Whether `minute_of_day` falls inside this window.
    pub fn contains(&self, minute_of_day: u16) -> bool {
        if self.start < self.end {
            self.start <= minute_of_day && minute_of_day < self.end
        } else {
            minute_of_day >= self.start || minute_of_day < self.end
        }
    }
}

impl TryFrom<(u16, u16)> for TimeRange {
    type Error = ScheduleError;

    fn try_from((start, end): (u16, u16)) -> Result<Self, Self::Error> {
        TimeRange::new(start, end)
    }
}

impl From<TimeRange> for (u16, u16) {
    fn from(range: TimeRange) -> Self {
        (range.start, range.end)
    }
}

/// When an active head is allowed to run.
///
/// A disabled schedule places no restriction: the head runs whenever it is
/// active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprinklerSchedule {
    pub enabled: bool,
    pub ranges: Vec<TimeRange>,
}

impl SprinklerSchedule {
    /// An enabled schedule with the given windows.
    pub fn windows(ranges: Vec<TimeRange>) -> Self {
        Self {
            enabled: true,
            ranges,
        }
    }

    /// Whether the schedule allows running at game time `now`.
    pub fn allows(&self, now: GameMinutes) -> bool {
        if !self.enabled {
            return true;
        }
        // Always below MINUTES_PER_DAY, so it fits.
        let minute_of_day = (now % MINUTES_PER_DAY) as u16;
        self.ranges.iter().any(|r| r.contains(minute_of_day))
    }
}

/// A water-emitting fixture.
///
/// `coverage` is derived: the aggregate recomputes it from the class and the
/// pressure of the pipe under the head whenever pressures are updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprinklerHead {
    pub id: SprinklerId,
    pub position: GridPosition,
    pub class: SprinklerClass,
    pub installed_at: GameMinutes,
    pub active: bool,
    pub coverage: Vec<CoverageTile>,
    #[serde(default)]
    pub schedule: SprinklerSchedule,
}

impl SprinklerHead {
    /// Whether the head waters at `now`: active and allowed by its schedule.
    pub fn runs_at(&self, now: GameMinutes) -> bool {
        self.active && self.schedule.allows(now)
    }
}
