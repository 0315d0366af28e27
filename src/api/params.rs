use crate::error::AppError;
use chrono::{Datelike, Utc};
use std::fmt;

pub type PlayerId = u64;
pub type TeamId = u64;

/// TeamID=0 means "all teams" on player-scoped endpoints.
pub const ALL_TEAMS: TeamId = 0;

pub const LEAGUE_ID: &str = "00";

/// League season label, e.g. "2023-24".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season(String);

impl Season {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        let bytes = value.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(AppError::InvalidSeason(value.to_string()));
        }
        let start: i32 = value[..4]
            .parse()
            .map_err(|_| AppError::InvalidSeason(value.to_string()))?;
        let suffix: i32 = value[5..]
            .parse()
            .map_err(|_| AppError::InvalidSeason(value.to_string()))?;
        if suffix != (start + 1) % 100 {
            return Err(AppError::InvalidSeason(value.to_string()));
        }
        Ok(Season(value.to_string()))
    }

    /// Season in progress right now; a new one starts in October.
    pub fn current() -> Self {
        let today = Utc::now().date_naive();
        let start = if today.month() >= 10 {
            today.year()
        } else {
            today.year() - 1
        };
        Season::from_start_year(start)
    }

    pub fn from_start_year(start: i32) -> Self {
        Season(format!("{}-{:02}", start, (start + 1) % 100))
    }

    pub fn start_year(&self) -> i32 {
        self.0[..4].parse().unwrap_or(0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SeasonType {
    #[default]
    Regular,
    Playoffs,
    Preseason,
    AllStar,
}

impl SeasonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonType::Regular => "Regular Season",
            SeasonType::Playoffs => "Playoffs",
            SeasonType::Preseason => "Pre Season",
            SeasonType::AllStar => "All Star",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PerMode {
    Totals,
    #[default]
    PerGame,
    Per36,
}

impl PerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerMode::Totals => "Totals",
            PerMode::PerGame => "PerGame",
            PerMode::Per36 => "Per36",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasureType {
    #[default]
    Base,
    Advanced,
    Misc,
    Scoring,
    Usage,
    Opponent,
    Defense,
}

impl MeasureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasureType::Base => "Base",
            MeasureType::Advanced => "Advanced",
            MeasureType::Misc => "Misc",
            MeasureType::Scoring => "Scoring",
            MeasureType::Usage => "Usage",
            MeasureType::Opponent => "Opponent",
            MeasureType::Defense => "Defense",
        }
    }
}

/// Filter for the defense dashboard (shot categories the defender contests).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefenseCategory {
    #[default]
    Overall,
    ThreePointers,
    TwoPointers,
    LessThan6Ft,
    LessThan10Ft,
    GreaterThan15Ft,
}

impl DefenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefenseCategory::Overall => "Overall",
            DefenseCategory::ThreePointers => "3 Pointers",
            DefenseCategory::TwoPointers => "2 Pointers",
            DefenseCategory::LessThan6Ft => "Less Than 6Ft",
            DefenseCategory::LessThan10Ft => "Less Than 10Ft",
            DefenseCategory::GreaterThan15Ft => "Greater Than 15Ft",
        }
    }
}
