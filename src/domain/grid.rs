use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::reflog::CommitRecord;
use crate::domain::window::{week_start, weekday_name, DateWindow};

pub type ProjectCounts = BTreeMap<String, usize>;

/// week start -> day name -> project -> commits.
///
/// Only positive counts are ever stored; a missing key means zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActivityGrid {
    weeks: BTreeMap<NaiveDate, BTreeMap<&'static str, ProjectCounts>>,
}

impl ActivityGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold every record of `records` that falls inside `window`.
    pub fn collect<I>(records: I, window: &DateWindow) -> Self
    where
        I: IntoIterator<Item = CommitRecord>,
    {
        let mut grid = Self::new();
        for r in records {
            grid.record(&r, window);
        }
        grid
    }

    /// Count `r` if it is inside `window`. Returns whether it was counted.
    pub fn record(&mut self, r: &CommitRecord, window: &DateWindow) -> bool {
        if !window.contains(&r.timestamp) {
            return false;
        }
        let date = r.timestamp.date_naive();
        self.add(week_start(date), weekday_name(date), &r.project, 1);

        debug!(
            "{:^20.20} - {:<20.20} ({}) on {}",
            format!("[ {} ]", r.project.to_uppercase()),
            r.summary,
            r.short_id(),
            r.timestamp
        );
        true
    }

    /// Add all of `other`'s counts into `self`.
    pub fn merge(&mut self, other: ActivityGrid) {
        for (week, days) in other.weeks {
            for (day, projects) in days {
                for (project, n) in projects {
                    self.add(week, day, &project, n);
                }
            }
        }
    }

    fn add(&mut self, week: NaiveDate, day: &'static str, project: &str, n: usize) {
        if n == 0 {
            return;
        }
        *self
            .weeks
            .entry(week)
            .or_default()
            .entry(day)
            .or_default()
            .entry(project.to_string())
            .or_default() += n;
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// Week start dates, ascending.
    pub fn weeks(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.weeks.keys().copied()
    }

    pub fn day(&self, week: NaiveDate, day: &str) -> Option<&ProjectCounts> {
        self.weeks.get(&week).and_then(|days| days.get(day))
    }

    pub fn total(&self) -> usize {
        self.weeks
            .values()
            .flat_map(|days| days.values())
            .flat_map(|projects| projects.values())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::window::local_at;
    use pretty_assertions::assert_eq;

    fn at(project: &str, y: i32, m: u32, d: u32, h: u32) -> CommitRecord {
        CommitRecord {
            project: project.to_string(),
            id: format!("{project}{y}{m:02}{d:02}{h:02}0000000000000000000000000000"),
            timestamp: local_at(date(y, m, d), h, 0, 0),
            summary: format!("work on {project}"),
        }
    }

    impl ActivityGrid {
        fn count(&self, week: NaiveDate, day: &str, project: &str) -> usize {
            self.day(week, day)
                .and_then(|p| p.get(project))
                .copied()
                .unwrap_or(0)
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<CommitRecord> {
        vec![
            at("alpha", 2024, 5, 13, 9),
            at("alpha", 2024, 5, 13, 15),
            at("beta", 2024, 5, 15, 11),
            at("beta", 2024, 5, 17, 18),
            at("gamma", 2024, 5, 7, 10),
            at("gamma", 2024, 5, 18, 12),
            at("alpha", 2024, 4, 1, 12),
            at("beta", 2024, 5, 20, 8),
        ]
    }

    #[test]
    fn counts_by_week_day_and_project() {
        let window = DateWindow::trailing_weeks(date(2024, 5, 15), 2);
        let grid = ActivityGrid::collect(sample(), &window);

        let this_week = date(2024, 5, 13);
        let last_week = date(2024, 5, 6);
        assert_eq!(grid.weeks().collect::<Vec<_>>(), vec![last_week, this_week]);
        assert_eq!(grid.count(this_week, "Monday", "alpha"), 2);
        assert_eq!(grid.count(this_week, "Wednesday", "beta"), 1);
        assert_eq!(grid.count(this_week, "Friday", "beta"), 1);
        assert_eq!(grid.count(this_week, "Saturday", "gamma"), 1);
        assert_eq!(grid.count(last_week, "Tuesday", "gamma"), 1);
        assert_eq!(grid.total(), 6);
    }

    #[test]
    fn records_outside_window_are_dropped() {
        let window = DateWindow::trailing_weeks(date(2024, 5, 15), 1);
        let mut grid = ActivityGrid::new();
        assert!(!grid.record(&at("alpha", 2024, 5, 12, 23), &window));
        assert!(!grid.record(&at("alpha", 2024, 5, 20, 0), &window));
        assert!(grid.is_empty());
        assert!(grid.record(&at("alpha", 2024, 5, 13, 0), &window));
        assert!(grid.record(&at("alpha", 2024, 5, 19, 23), &window));
        assert_eq!(grid.total(), 2);
    }

    #[test]
    fn empty_cells_have_no_keys() {
        let window = DateWindow::trailing_weeks(date(2024, 5, 15), 1);
        let grid = ActivityGrid::collect(vec![at("alpha", 2024, 5, 13, 9)], &window);
        let week = date(2024, 5, 13);
        assert!(grid.day(week, "Monday").is_some());
        assert!(grid.day(week, "Tuesday").is_none());
        assert_eq!(grid.count(week, "Monday", "beta"), 0);
        assert!(grid.day(date(2024, 5, 6), "Monday").is_none());
    }

    #[test]
    fn order_of_records_does_not_matter() {
        let window = DateWindow::trailing_weeks(date(2024, 5, 15), 2);
        let records = sample();
        let expected = ActivityGrid::collect(records.clone(), &window);

        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(ActivityGrid::collect(reversed, &window), expected);

        for shift in 1..records.len() {
            let mut rotated = records.clone();
            rotated.rotate_left(shift);
            assert_eq!(ActivityGrid::collect(rotated, &window), expected);
        }
    }

    #[test]
    fn merging_partial_grids_matches_single_fold() {
        let window = DateWindow::trailing_weeks(date(2024, 5, 15), 2);
        let records = sample();
        let expected = ActivityGrid::collect(records.clone(), &window);

        let (left, right) = records.split_at(3);
        let mut a = ActivityGrid::collect(left.to_vec(), &window);
        let b = ActivityGrid::collect(right.to_vec(), &window);
        let mut b_then_a = b.clone();
        b_then_a.merge(a.clone());
        a.merge(b);

        assert_eq!(a, expected);
        assert_eq!(b_then_a, expected);
    }

    #[test]
    fn serializes_as_nested_maps() {
        let window = DateWindow::trailing_weeks(date(2024, 5, 15), 1);
        let grid = ActivityGrid::collect(vec![at("alpha", 2024, 5, 14, 9)], &window);
        let v = serde_json::to_value(&grid).unwrap();
        assert_eq!(v["2024-05-13"]["Tuesday"]["alpha"], 1);
    }
}
