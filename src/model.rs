use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One commit as seen by the aggregator: when it was authored and by whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitEvent {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub author_email: String,
}

impl CommitEvent {
    pub fn new(timestamp: i64, author_email: impl Into<String>) -> Self {
        Self {
            timestamp,
            author_email: author_email.into(),
        }
    }
}

/// Display class of a cell. Variant order is part of the public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Empty,
    Low,
    Medium,
    High,
    Today,
}

impl Tier {
    pub fn classify(count: u32, is_today: bool) -> Self {
        if is_today {
            return Tier::Today;
        }
        match count {
            0 => Tier::Empty,
            1..=4 => Tier::Low,
            5..=9 => Tier::Medium,
            _ => Tier::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedCell {
    pub count: u32,
    pub tier: Tier,
    pub is_today: bool,
}

impl ClassifiedCell {
    pub fn new(count: u32, is_today: bool) -> Self {
        Self {
            count,
            tier: Tier::classify(count, is_today),
            is_today,
        }
    }
}

impl Default for ClassifiedCell {
    fn default() -> Self {
        Self::new(0, false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub total_days: u32,
    pub total_months: u32,
    pub total_commits: u64,
    pub average_commits_per_day: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowInfo {
    pub today: NaiveDate,
    pub window_days: u32,
    pub window_weeks: u32,
    pub alignment_offset: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub week: u32,
    pub weekday: u32,
    pub count: u32,
    pub tier: Tier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub author_email: Option<String>,
    pub window: WindowInfo,
    pub report: Report,
    pub days: Vec<DayEntry>,
}
