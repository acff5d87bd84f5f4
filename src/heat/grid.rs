use super::aggregate::DayBuckets;
use super::window::WindowClock;
use crate::model::ClassifiedCell;
use chrono::{Days, NaiveDate};

pub const DAYS_PER_WEEK: usize = 7;

/// Column and row of a day offset in a grid `window_weeks` columns wide.
/// Column 0 is the oldest week; row 0 is Sunday.
/// Offset `k` maps to `weeks_back = (k - 1) / 7`, `weekday = (7 - k % 7) % 7`,
/// which puts today on its calendar weekday row in the last column.
pub fn position(day_offset: u32, window_weeks: u32) -> Option<(usize, usize)> {
    if day_offset == 0 {
        return None;
    }
    let weeks_back = (day_offset - 1) / 7;
    if weeks_back >= window_weeks {
        return None;
    }
    let week = window_weeks - 1 - weeks_back;
    let weekday = (7 - day_offset % 7) % 7;
    Some((week as usize, weekday as usize))
}

/// Dense week-by-weekday view of the buckets. The last column holds today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    weeks: Vec<[u32; DAYS_PER_WEEK]>,
    today: Option<(usize, usize)>,
    current_sunday: NaiveDate,
}

impl Grid {
    pub fn build(buckets: &DayBuckets, window: &WindowClock) -> Self {
        let window_weeks = window.window_weeks();
        let mut weeks = vec![[0u32; DAYS_PER_WEEK]; window_weeks as usize];

        // Offsets past the first column are still in the report totals.
        for (day_offset, count) in buckets.iter() {
            if let Some((week, weekday)) = position(day_offset, window_weeks) {
                weeks[week][weekday] = count;
            }
        }

        let today = position(window.alignment_offset(), window_weeks);
        let current_sunday = window
            .today()
            .checked_sub_days(Days::new(u64::from(window.today_weekday())))
            .unwrap_or(window.today());

        Self {
            weeks,
            today,
            current_sunday,
        }
    }

    pub fn window_weeks(&self) -> usize {
        self.weeks.len()
    }

    pub fn count(&self, week: usize, weekday: usize) -> u32 {
        self.weeks
            .get(week)
            .and_then(|days| days.get(weekday))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_today(&self, week: usize, weekday: usize) -> bool {
        self.today == Some((week, weekday))
    }

    /// Any position outside the grid reads as an empty cell.
    pub fn cell(&self, week: usize, weekday: usize) -> ClassifiedCell {
        ClassifiedCell::new(self.count(week, weekday), self.is_today(week, weekday))
    }

    pub fn today(&self) -> Option<(usize, usize)> {
        self.today
    }

    /// Sunday opening column `week`.
    pub fn column_start(&self, week: usize) -> Option<NaiveDate> {
        let weeks_back = self.weeks.len().checked_sub(week + 1)?;
        self.current_sunday
            .checked_sub_days(Days::new(weeks_back as u64 * DAYS_PER_WEEK as u64))
    }

    pub fn date_of(&self, week: usize, weekday: usize) -> Option<NaiveDate> {
        if weekday >= DAYS_PER_WEEK {
            return None;
        }
        self.column_start(week)?
            .checked_add_days(Days::new(weekday as u64))
    }

    /// Cells in rendering order: oldest column first, Sunday first.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, ClassifiedCell)> + '_ {
        (0..self.weeks.len()).flat_map(move |week| {
            (0..DAYS_PER_WEEK).map(move |weekday| (week, weekday, self.cell(week, weekday)))
        })
    }
}
