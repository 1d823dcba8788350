use chrono::{DateTime, Datelike, Days, Local, NaiveDate, TimeZone, Weekday};
use serde::Serialize;

/// Report columns, in display order. Weekends are counted but never shown.
pub const WORK_DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
        .unwrap_or(NaiveDate::MIN)
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Inclusive range of calendar days the report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// `weeks` whole Monday..Sunday weeks, the last one containing `today`.
    ///
    /// Clamped to the range chrono can represent.
    pub fn trailing_weeks(today: NaiveDate, weeks: u32) -> Self {
        let this_monday = week_start(today);
        let back = u64::from(weeks.saturating_sub(1)) * 7;
        Self {
            start: this_monday
                .checked_sub_days(Days::new(back))
                .unwrap_or(NaiveDate::MIN),
            end: this_monday
                .checked_add_days(Days::new(6))
                .unwrap_or(NaiveDate::MAX),
        }
    }

    /// Compared on the local calendar date, both ends inclusive.
    pub fn contains<Tz: TimeZone>(&self, ts: &DateTime<Tz>) -> bool {
        self.contains_date(ts.with_timezone(&Local).date_naive())
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Local time on `date`; a wall-clock time skipped by a DST jump resolves to
/// the first instant after the gap.
#[cfg(test)]
pub(crate) fn local_at(date: NaiveDate, h: u32, m: u32, s: u32) -> DateTime<Local> {
    let naive = date.and_hms_opt(h, m, s).unwrap();
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            Local
                .from_local_datetime(&(naive + chrono::Duration::hours(1)))
                .earliest()
        })
        .unwrap()
}
