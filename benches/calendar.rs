use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gitcal::heat::{aggregate, Grid, WindowClock};
use gitcal::model::{CommitEvent, Report};

fn events(window: &WindowClock, n: i64) -> Vec<CommitEvent> {
    let now = window.now_instant().timestamp();
    (0..n)
        .map(|i| {
            let email = if i % 5 == 0 { "other@example.com" } else { "me@example.com" };
            // Spread over ~300 days so some fall outside the window.
            CommitEvent::new(now - (i * 7_919) % (300 * 86_400), email)
        })
        .collect()
}

fn bench_calendar(c: &mut Criterion) {
    let window = WindowClock::compute(Utc.with_ymd_and_hms(2024, 8, 5, 12, 0, 0).unwrap());
    let events = events(&window, 20_000);

    c.bench_function("aggregate_20k", |b| {
        b.iter(|| aggregate(black_box(&events), "me@example.com", &window))
    });

    let buckets = aggregate(&events, "me@example.com", &window);
    c.bench_function("grid_and_report", |b| {
        b.iter(|| {
            let grid = Grid::build(black_box(&buckets), &window);
            let report = Report::compute(&buckets, &window);
            (grid, report)
        })
    });
}

criterion_group!(benches, bench_calendar);
criterion_main!(benches);
