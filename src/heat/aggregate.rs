use super::window::WindowClock;
use crate::error::EventError;
use crate::model::CommitEvent;
use chrono::{DateTime, NaiveDate};
use std::collections::btree_map::{self, BTreeMap};
use tracing::debug;

/// Raw distance reported for dates further back than the window.
pub const OUT_OF_RANGE: u32 = 99_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayDistance {
    Within(u32),
    OutOfRange,
}

impl DayDistance {
    pub fn raw(self) -> u32 {
        match self {
            DayDistance::Within(days) => days,
            DayDistance::OutOfRange => OUT_OF_RANGE,
        }
    }
}

/// Counts day boundaries from `date` up to today one day at a time, giving
/// up as soon as the count passes the window. Dates on or after today are 0.
pub fn day_distance(date: NaiveDate, window: &WindowClock) -> DayDistance {
    let today = window.today();
    let mut cursor = date;
    let mut days = 0u32;

    while cursor < today {
        cursor = match cursor.succ_opt() {
            Some(next) => next,
            None => break,
        };
        days += 1;
        if days > window.window_days() {
            return DayDistance::OutOfRange;
        }
    }

    DayDistance::Within(days)
}

/// Calendar date of an event in the window's zone.
pub fn event_date(event: &CommitEvent, window: &WindowClock) -> Result<NaiveDate, EventError> {
    DateTime::from_timestamp(event.timestamp, 0)
        .map(|utc| window.zone().date_of(utc))
        .ok_or(EventError::MalformedTimestamp(event.timestamp))
}

/// Sparse commit counts keyed by day offset (raw days ago plus the
/// window's alignment offset).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayBuckets {
    counts: BTreeMap<u32, u32>,
}

impl DayBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, day_offset: u32) -> u32 {
        self.counts.get(&day_offset).copied().unwrap_or(0)
    }

    pub fn add(&mut self, day_offset: u32, count: u32) {
        *self.counts.entry(day_offset).or_insert(0) += count;
    }

    /// Ascending by day offset, i.e. from today backwards.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.counts.iter().map(|(offset, count)| (*offset, *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().map(|c| u64::from(*c)).sum()
    }

    /// Sums another partial map into this one, key by key.
    pub fn merge(&mut self, other: &DayBuckets) {
        for (offset, count) in other.iter() {
            self.add(offset, count);
        }
    }
}

impl IntoIterator for DayBuckets {
    type Item = (u32, u32);
    type IntoIter = btree_map::IntoIter<u32, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateStats {
    pub accepted: usize,
    pub foreign: usize,
    pub out_of_range: usize,
    pub malformed: usize,
}

/// Accumulates events for one run. Feeding order does not matter.
pub struct Aggregator<'w> {
    window: &'w WindowClock,
    buckets: DayBuckets,
    stats: AggregateStats,
}

impl<'w> Aggregator<'w> {
    pub fn new(window: &'w WindowClock) -> Self {
        Self {
            window,
            buckets: DayBuckets::new(),
            stats: AggregateStats::default(),
        }
    }

    /// Adds an event already known to belong to the reported author.
    /// Returns the day offset it landed on, `None` when it fell outside
    /// the window.
    pub fn ingest(&mut self, event: &CommitEvent) -> Result<Option<u32>, EventError> {
        let date = match event_date(event, self.window) {
            Ok(date) => date,
            Err(e) => {
                self.stats.malformed += 1;
                return Err(e);
            }
        };

        match day_distance(date, self.window) {
            DayDistance::Within(days) => {
                let day_offset = days + self.window.alignment_offset();
                self.buckets.add(day_offset, 1);
                self.stats.accepted += 1;
                Ok(Some(day_offset))
            }
            DayDistance::OutOfRange => {
                self.stats.out_of_range += 1;
                Ok(None)
            }
        }
    }

    /// Adds an event only if it was authored by `target_email`.
    pub fn ingest_for(
        &mut self,
        event: &CommitEvent,
        target_email: &str,
    ) -> Result<Option<u32>, EventError> {
        if event.author_email != target_email {
            self.stats.foreign += 1;
            return Ok(None);
        }
        self.ingest(event)
    }

    pub fn stats(&self) -> AggregateStats {
        self.stats
    }

    pub fn finish(self) -> DayBuckets {
        let AggregateStats {
            accepted,
            foreign,
            out_of_range,
            malformed,
        } = self.stats;
        debug!(
            accepted,
            foreign,
            out_of_range,
            malformed,
            days = self.buckets.len(),
            "aggregated commit events"
        );
        self.buckets
    }
}

/// Buckets the events authored by `target_email`.
pub fn aggregate<'a, I>(events: I, target_email: &str, window: &WindowClock) -> DayBuckets
where
    I: IntoIterator<Item = &'a CommitEvent>,
{
    let mut aggregator = Aggregator::new(window);
    for event in events {
        if let Err(e) = aggregator.ingest_for(event, target_email) {
            debug!("skipping commit by {}: {e}", event.author_email);
        }
    }
    aggregator.finish()
}

/// Buckets events the caller has already narrowed to one author.
pub fn aggregate_filtered<'a, I>(events: I, window: &WindowClock) -> DayBuckets
where
    I: IntoIterator<Item = &'a CommitEvent>,
{
    let mut aggregator = Aggregator::new(window);
    for event in events {
        if let Err(e) = aggregator.ingest(event) {
            debug!("skipping commit by {}: {e}", event.author_email);
        }
    }
    aggregator.finish()
}
