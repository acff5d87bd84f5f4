use chrono::{DateTime, Datelike, FixedOffset, Local, Months, NaiveDate, TimeZone, Utc, Weekday};

/// Calendar months covered by the trailing window.
pub const WINDOW_MONTHS: u32 = 6;

/// Time zone in which commit instants are turned into calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayZone {
    /// The system zone, with each instant taking the offset in force at
    /// that instant (daylight saving included).
    Local,
    Fixed(FixedOffset),
}

impl DayZone {
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            DayZone::Local => instant.with_timezone(&Local).date_naive(),
            DayZone::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }
}

/// The trailing observation window for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowClock {
    now: DateTime<FixedOffset>,
    zone: DayZone,
    today: NaiveDate,
    window_days: u32,
    window_weeks: u32,
    alignment_offset: u32,
}

impl WindowClock {
    /// Window ending at the local wall clock. Event dates follow the local
    /// zone's rules, not just today's offset.
    pub fn now() -> Self {
        Self::build(Local::now().fixed_offset(), DayZone::Local)
    }

    /// Window ending at `now`, dating events in the offset `now` carries.
    pub fn compute<Tz: TimeZone>(now: DateTime<Tz>) -> Self {
        let now = now.fixed_offset();
        Self::build(now, DayZone::Fixed(*now.offset()))
    }

    fn build(now: DateTime<FixedOffset>, zone: DayZone) -> Self {
        let today = now.date_naive();

        // Chrono clamps month ends (Aug 31 minus six months is Feb 28/29),
        // so the length moves between 181 and 184 days.
        let window_days = today
            .checked_sub_months(Months::new(WINDOW_MONTHS))
            .map(|start| (today - start).num_days())
            .and_then(|days| u32::try_from(days).ok())
            .unwrap_or(0);

        Self {
            now,
            zone,
            today,
            window_days,
            window_weeks: window_days.div_ceil(7),
            alignment_offset: alignment_offset(today.weekday()),
        }
    }

    pub fn now_instant(&self) -> &DateTime<FixedOffset> {
        &self.now
    }

    pub fn zone(&self) -> DayZone {
        self.zone
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    pub fn window_weeks(&self) -> u32 {
        self.window_weeks
    }

    pub fn alignment_offset(&self) -> u32 {
        self.alignment_offset
    }

    /// Grid row of today, 0 = Sunday.
    pub fn today_weekday(&self) -> u32 {
        self.today.weekday().num_days_from_sunday()
    }
}

/// Days added to every raw distance so grid columns are whole
/// Sunday..Saturday weeks.
pub fn alignment_offset(weekday: Weekday) -> u32 {
    match weekday.num_days_from_sunday() {
        0 => 7,
        day => 7 - day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> WindowClock {
        WindowClock::compute(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap())
    }

    #[test]
    fn offsets_follow_weekday() {
        let expected = [
            (Weekday::Sun, 7),
            (Weekday::Mon, 6),
            (Weekday::Tue, 5),
            (Weekday::Wed, 4),
            (Weekday::Thu, 3),
            (Weekday::Fri, 2),
            (Weekday::Sat, 1),
        ];
        for (weekday, offset) in expected {
            assert_eq!(alignment_offset(weekday), offset, "{weekday:?}");
        }
    }

    #[test]
    fn window_length_follows_calendar_months() {
        // Feb 5 2024 .. Aug 5 2024 crosses a leap February.
        assert_eq!(at(2024, 8, 5).window_days(), 182);
        // Nov 5 2024 .. May 5 2025
        assert_eq!(at(2025, 5, 5).window_days(), 181);
        // Aug 31 clamps to Feb 29.
        assert_eq!(at(2024, 8, 31).window_days(), 184);
    }

    #[test]
    fn weeks_round_up() {
        let window = at(2024, 8, 5);
        assert_eq!(window.window_weeks(), 26);
        let window = at(2024, 8, 31);
        assert_eq!(window.window_weeks(), 27);
    }

    #[test]
    fn alignment_is_recomputed_from_the_given_day() {
        assert_eq!(at(2024, 8, 4).alignment_offset(), 7);
        assert_eq!(at(2024, 8, 5).alignment_offset(), 6);
        assert_eq!(at(2024, 8, 10).alignment_offset(), 1);
    }

    #[test]
    fn today_uses_the_instant_offset() {
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        // 20:00 UTC on Aug 4 is already Aug 5 in UTC+9.
        let window = WindowClock::compute(
            Utc.with_ymd_and_hms(2024, 8, 4, 20, 0, 0)
                .unwrap()
                .with_timezone(&tz),
        );
        assert_eq!(window.today(), NaiveDate::from_ymd_opt(2024, 8, 5).unwrap());
        assert_eq!(window.alignment_offset(), 6);
        assert_eq!(window.zone(), DayZone::Fixed(tz));
    }

    #[test]
    fn fixed_zone_dates_across_midnight() {
        let zone = DayZone::Fixed(FixedOffset::east_opt(10 * 3600).unwrap());
        let late = Utc.with_ymd_and_hms(2024, 3, 1, 13, 30, 0).unwrap();
        assert_eq!(zone.date_of(late), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let next = Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap();
        assert_eq!(zone.date_of(next), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn local_clock_dates_each_instant_with_its_own_offset() {
        let window = WindowClock::now();
        assert_eq!(window.zone(), DayZone::Local);
        // Half-year steps land on both sides of any daylight saving switch.
        for days_back in [0i64, 45, 90, 135, 180] {
            let instant = Utc::now() - chrono::Duration::days(days_back);
            let expected = Local
                .timestamp_opt(instant.timestamp(), 0)
                .single()
                .map(|local| local.date_naive());
            assert_eq!(Some(window.zone().date_of(instant)), expected, "{days_back}");
        }
    }
}
