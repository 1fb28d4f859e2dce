use crate::error::{StatsError, StatsResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reporting time window requested for a stats query.
///
/// `Unknown` is the zero value of the numeric encoding and never resolves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatsType {
    #[default]
    Unknown,
    Season,
    AverageSeason,
    Date,
    LastWeek,
    LastWeekAverage,
    LastMonth,
    LastMonthAverage,
    Week,
}

impl StatsType {
    pub const ALL: [StatsType; 8] = [
        StatsType::Season,
        StatsType::AverageSeason,
        StatsType::Date,
        StatsType::LastWeek,
        StatsType::LastWeekAverage,
        StatsType::LastMonth,
        StatsType::LastMonthAverage,
        StatsType::Week,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatsType::Unknown => "unknown",
            StatsType::Season => "season",
            StatsType::AverageSeason => "season-average",
            StatsType::Date => "today",
            StatsType::LastWeek => "last-week",
            StatsType::LastWeekAverage => "last-week-average",
            StatsType::LastMonth => "last-month",
            StatsType::LastMonthAverage => "last-month-average",
            StatsType::Week => "week",
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            StatsType::Unknown => 0,
            StatsType::Season => 1,
            StatsType::AverageSeason => 2,
            StatsType::Date => 3,
            StatsType::LastWeek => 4,
            StatsType::LastWeekAverage => 5,
            StatsType::LastMonth => 6,
            StatsType::LastMonthAverage => 7,
            StatsType::Week => 8,
        }
    }

    /// Translate into the window and sort selectors a downstream query needs.
    /// `week` is only read for `StatsType::Week`, which requires it.
    pub fn resolve(self, week: Option<u32>) -> StatsResult<QueryWindow> {
        let window = match self {
            StatsType::Unknown => {
                return Err(StatsError::InvalidStatsType("unknown stats type requested".into()));
            }
            StatsType::Season => WindowSelector::Season,
            StatsType::AverageSeason => WindowSelector::AverageSeason,
            StatsType::Date => WindowSelector::Today,
            StatsType::LastWeek => WindowSelector::LastWeek,
            StatsType::LastWeekAverage => WindowSelector::LastWeekAverage,
            StatsType::LastMonth => WindowSelector::LastMonth,
            StatsType::LastMonthAverage => WindowSelector::LastMonthAverage,
            StatsType::Week => match week {
                Some(week) if week >= 1 => WindowSelector::Week(week),
                Some(week) => {
                    return Err(StatsError::InvalidStatsType(format!("week {week} is out of range")));
                }
                None => {
                    return Err(StatsError::InvalidStatsType("week stats type requires a week number".into()));
                }
            },
        };
        Ok(QueryWindow::from(window))
    }
}

impl TryFrom<i64> for StatsType {
    type Error = StatsError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        std::iter::once(StatsType::Unknown)
            .chain(StatsType::ALL)
            .find(|t| t.code() == code)
            .ok_or_else(|| StatsError::InvalidStatsType(format!("unrecognized stats type code {code}")))
    }
}

impl FromStr for StatsType {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('_', "-");
        if needle == StatsType::Unknown.label() {
            return Ok(StatsType::Unknown);
        }
        if let Ok(code) = needle.parse::<i64>() {
            return StatsType::try_from(code);
        }
        StatsType::ALL
            .into_iter()
            .find(|t| t.label() == needle)
            .ok_or_else(|| StatsError::InvalidStatsType(format!("unrecognized stats type {s:?}")))
    }
}

impl fmt::Display for StatsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Derived query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WindowSelector {
    Season,
    AverageSeason,
    Today,
    LastWeek,
    LastWeekAverage,
    LastMonth,
    LastMonthAverage,
    Week(u32),
}

impl WindowSelector {
    /// Sort tag family compatible with this window. Aggregates and their
    /// per-game averages share a family.
    pub fn sort(&self) -> SortSelector {
        match self {
            WindowSelector::Season | WindowSelector::AverageSeason => SortSelector::Season,
            WindowSelector::Today => SortSelector::Date,
            WindowSelector::LastWeek | WindowSelector::LastWeekAverage => SortSelector::LastWeek,
            WindowSelector::LastMonth | WindowSelector::LastMonthAverage => SortSelector::LastMonth,
            WindowSelector::Week(week) => SortSelector::Week(*week),
        }
    }

    pub fn fragment(&self, today: NaiveDate) -> String {
        match self {
            WindowSelector::Season => "type=season".into(),
            WindowSelector::AverageSeason => "type=average_season".into(),
            WindowSelector::Today => format!("type=date;date={}", today.format("%Y-%m-%d")),
            WindowSelector::LastWeek => "type=lastweek".into(),
            WindowSelector::LastWeekAverage => "type=average_lastweek".into(),
            WindowSelector::LastMonth => "type=lastmonth".into(),
            WindowSelector::LastMonthAverage => "type=average_lastmonth".into(),
            WindowSelector::Week(week) => format!("type=week;week={week}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortSelector {
    Season,
    Date,
    LastWeek,
    LastMonth,
    Week(u32),
}

impl SortSelector {
    pub fn fragment(&self, today: NaiveDate) -> String {
        match self {
            SortSelector::Season => "sort_type=season".into(),
            SortSelector::Date => format!("sort_type=date;sort_date={}", today.format("%Y-%m-%d")),
            SortSelector::LastWeek => "sort_type=lastweek".into(),
            SortSelector::LastMonth => "sort_type=lastmonth".into(),
            SortSelector::Week(week) => format!("sort_type=week;sort_week={week}"),
        }
    }
}

/// Resolved (window, sort) pair for one time-windowed query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryWindow {
    pub window: WindowSelector,
    pub sort: SortSelector,
}

impl From<WindowSelector> for QueryWindow {
    fn from(window: WindowSelector) -> Self {
        Self { window, sort: window.sort() }
    }
}
