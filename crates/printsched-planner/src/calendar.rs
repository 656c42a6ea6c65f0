//! Calendar arithmetic: working-day and working-window computation from
//! shifts, breaks, and holidays, plus the duration-placement primitive the
//! planner drives everything else from.
//!
//! All arithmetic happens in a single configured local timezone (spec §9);
//! inputs/outputs at the edge of this module are `DateTime<Utc>`.

use chrono::{DateTime, Datelike, Duration as ChronoDuration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use printsched_core::{Break, Holiday, Shift};
use std::collections::{HashMap, HashSet};

/// A half-open wall-clock interval, in UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Failures the calendar itself can raise. The planner attaches stage/job
/// context before surfacing these as `printsched_core::PlannerIssue`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// No working window covering `minutes` of work was found within the
    /// configured horizon starting at `earliest`.
    HorizonExhausted {
        earliest: DateTime<Utc>,
        requested_minutes: i64,
    },
}

impl std::fmt::Display for CalendarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalendarError::HorizonExhausted { earliest, requested_minutes } => write!(
                f,
                "no working window for {requested_minutes} minutes found starting at {earliest} within the configured horizon"
            ),
        }
    }
}

impl std::error::Error for CalendarError {}

/// The working calendar: a union of shifts per weekday, a break list applied
/// to every working day, and a holiday set, all resolved in one timezone.
#[derive(Debug, Clone)]
pub struct Calendar {
    tz: Tz,
    /// Unioned `[start, end)` shift windows per weekday (0 = Sunday).
    windows_by_weekday: HashMap<u8, Vec<(NaiveTime, NaiveTime)>>,
    breaks: Vec<Break>,
    holidays: HashSet<NaiveDate>,
    horizon_days: i64,
}

impl Calendar {
    pub fn new(shifts: &[Shift], breaks: &[Break], holidays: &[Holiday], tz: Tz, horizon_days: i64) -> Self {
        let mut raw: HashMap<u8, Vec<(NaiveTime, NaiveTime)>> = HashMap::new();
        for shift in shifts {
            if !shift.is_working_day {
                continue;
            }
            // Overnight shifts (end <= start) are not supported in this version.
            if shift.shift_end <= shift.shift_start {
                continue;
            }
            raw.entry(shift.day_of_week)
                .or_default()
                .push((shift.shift_start, shift.shift_end));
        }
        let windows_by_weekday = raw
            .into_iter()
            .map(|(day, intervals)| (day, union_intervals(intervals)))
            .collect();

        Self {
            tz,
            windows_by_weekday,
            breaks: breaks.to_vec(),
            holidays: holidays.iter().map(|h| h.date).collect(),
            horizon_days: horizon_days.max(1),
        }
    }

    fn to_utc(&self, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
        let naive = date.and_time(time);
        match self.tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _latest) => earliest.with_timezone(&Utc),
            // Nonexistent local time (DST spring-forward gap): nudge forward
            // an hour and retry once, which always lands in a valid offset.
            LocalResult::None => {
                let nudged = naive + ChronoDuration::hours(1);
                match self.tz.from_local_datetime(&nudged) {
                    LocalResult::Single(dt) => dt.with_timezone(&Utc),
                    LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
                    LocalResult::None => self.tz.from_utc_datetime(&naive).with_timezone(&Utc),
                }
            }
        }
    }

    /// True iff `date` has at least one working shift and is not a holiday.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        if self.holidays.contains(&date) {
            return false;
        }
        let weekday = date.weekday().num_days_from_sunday() as u8;
        self.windows_by_weekday
            .get(&weekday)
            .is_some_and(|w| !w.is_empty())
    }

    /// Disjoint working intervals for one date, breaks subtracted, sorted
    /// ascending. Empty for non-working days (spec §4.1).
    pub fn daily_windows(&self, date: NaiveDate) -> Vec<Interval> {
        if !self.is_working_day(date) {
            return Vec::new();
        }
        let weekday = date.weekday().num_days_from_sunday() as u8;
        let mut segments = self
            .windows_by_weekday
            .get(&weekday)
            .cloned()
            .unwrap_or_default();

        for brk in &self.breaks {
            let break_end = brk.start + ChronoDuration::minutes(brk.minutes.max(0));
            segments = segments
                .into_iter()
                .flat_map(|(s, e)| subtract_interval(s, e, brk.start, break_end))
                .collect();
        }

        segments.sort_by_key(|(s, _)| *s);
        segments
            .into_iter()
            .map(|(s, e)| Interval {
                start: self.to_utc(date, s),
                end: self.to_utc(date, e),
            })
            .collect()
    }

    /// Yields working windows starting at `from`'s local date, clipping the
    /// first emitted window's start to `from`, and skipping windows that end
    /// at or before `from`. Bounded by `horizon_days` calendar days.
    pub fn iterate_working_windows(&self, from: DateTime<Utc>) -> impl Iterator<Item = Interval> + '_ {
        let local_date = self.local_date(from);
        (0..self.horizon_days).flat_map(move |offset| {
            let date = local_date + ChronoDuration::days(offset);
            self.daily_windows(date)
                .into_iter()
                .filter_map(move |mut window| {
                    if window.end <= from {
                        return None;
                    }
                    if window.start < from {
                        window.start = from;
                    }
                    Some(window)
                })
        })
    }

    fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.tz).date_naive()
    }

    /// The start of the first working window at or after `from`.
    pub fn next_working_start(&self, from: DateTime<Utc>) -> Result<DateTime<Utc>, CalendarError> {
        self.iterate_working_windows(from)
            .next()
            .map(|w| w.start)
            .ok_or(CalendarError::HorizonExhausted {
                earliest: from,
                requested_minutes: 0,
            })
    }

    /// Returns the ordered working-time segments that collectively contain
    /// exactly `minutes` of work starting no earlier than `earliest` (spec
    /// §4.1). Sub-minute durations are rounded up by the caller.
    pub fn place_duration(&self, earliest: DateTime<Utc>, minutes: i64) -> Result<Vec<Interval>, CalendarError> {
        let minutes = minutes.max(0);
        if minutes == 0 {
            let start = self.next_working_start(earliest)?;
            return Ok(vec![Interval { start, end: start }]);
        }

        let mut remaining = minutes;
        let mut segments = Vec::new();
        for window in self.iterate_working_windows(earliest) {
            if remaining <= 0 {
                break;
            }
            let available = window.minutes();
            if available <= 0 {
                continue;
            }
            let take = remaining.min(available);
            let end = window.start + ChronoDuration::minutes(take);
            segments.push(Interval { start: window.start, end });
            remaining -= take;
        }

        if remaining > 0 {
            return Err(CalendarError::HorizonExhausted {
                earliest,
                requested_minutes: minutes,
            });
        }
        Ok(segments)
    }
}

/// Merges overlapping/adjacent `[start, end)` intervals into their union,
/// sorted ascending (spec §4.1: "multiple active shifts ... are unioned").
fn union_intervals(mut intervals: Vec<(NaiveTime, NaiveTime)>) -> Vec<(NaiveTime, NaiveTime)> {
    intervals.sort_by_key(|(s, _)| *s);
    let mut merged: Vec<(NaiveTime, NaiveTime)> = Vec::new();
    for (s, e) in intervals {
        match merged.last_mut() {
            Some((_, last_end)) if s <= *last_end => {
                if e > *last_end {
                    *last_end = e;
                }
            }
            _ => merged.push((s, e)),
        }
    }
    merged
}

/// Removes `[cut_start, cut_end)` from `[start, end)`, producing 0, 1, or 2
/// remaining sub-intervals. A cut entirely outside `[start, end)` is a no-op;
/// a cut straddling an edge is clipped (spec §4.1).
fn subtract_interval(
    start: NaiveTime,
    end: NaiveTime,
    cut_start: NaiveTime,
    cut_end: NaiveTime,
) -> Vec<(NaiveTime, NaiveTime)> {
    let cut_start = cut_start.max(start);
    let cut_end = cut_end.min(end);
    if cut_start >= cut_end || cut_end <= start || cut_start >= end {
        return vec![(start, end)];
    }
    let mut out = Vec::new();
    if cut_start > start {
        out.push((start, cut_start));
    }
    if cut_end < end {
        out.push((cut_end, end));
    }
    out
}
