use super::aggregate::DayBuckets;
use super::window::WindowClock;
use crate::model::Report;

impl Report {
    pub fn compute(buckets: &DayBuckets, window: &WindowClock) -> Self {
        let total_days = window.window_days();
        let total_commits = buckets.total();
        let average_commits_per_day = if total_days == 0 {
            0.0
        } else {
            total_commits as f64 / f64::from(total_days)
        };

        Self {
            total_days,
            // Thirty day months, kept for output compatibility.
            total_months: total_days / 30,
            total_commits,
            average_commits_per_day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heat::aggregate::aggregate;
    use crate::model::CommitEvent;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn monday() -> WindowClock {
        WindowClock::compute(Utc.with_ymd_and_hms(2024, 8, 5, 9, 0, 0).unwrap())
    }

    #[test]
    fn empty_run_reports_zero_commits() {
        let report = Report::compute(&DayBuckets::new(), &monday());
        assert_eq!(
            report,
            Report {
                total_days: 182,
                total_months: 6,
                total_commits: 0,
                average_commits_per_day: 0.0,
            }
        );
    }

    #[test]
    fn totals_count_only_accepted_events() {
        let window = monday();
        let now = window.now_instant().timestamp();
        let events = vec![
            CommitEvent::new(now, "me@example.com"),
            CommitEvent::new(now, "me@example.com"),
            CommitEvent::new(now - 200 * 86_400, "me@example.com"),
            CommitEvent::new(now - 5 * 86_400, "other@example.com"),
        ];
        let buckets = aggregate(&events, "me@example.com", &window);
        let report = Report::compute(&buckets, &window);

        assert_eq!(report.total_commits, 2);
        let summed: u64 = buckets.iter().map(|(_, c)| u64::from(c)).sum();
        assert_eq!(report.total_commits, summed);
        assert!((report.average_commits_per_day - 2.0 / 182.0).abs() < f64::EPSILON);
    }

    #[test]
    fn months_are_thirty_day_floors() {
        let window = WindowClock::compute(Utc.with_ymd_and_hms(2024, 8, 31, 9, 0, 0).unwrap());
        let report = Report::compute(&DayBuckets::new(), &window);
        assert_eq!(report.total_days, 184);
        assert_eq!(report.total_months, 6);
    }

    #[test]
    fn report_covers_days_left_of_the_grid() {
        let window = monday();
        let mut buckets = DayBuckets::new();
        // Raw distance 182 on a Monday lands one column before the grid.
        buckets.add(182 + window.alignment_offset(), 3);

        let grid = crate::heat::grid::Grid::build(&buckets, &window);
        assert_eq!(grid.cells().map(|(_, _, c)| c.count).sum::<u32>(), 0);
        assert_eq!(Report::compute(&buckets, &window).total_commits, 3);
    }
}
