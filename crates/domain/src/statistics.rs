use std::collections::BTreeMap;

use chrono::{Days, Duration, NaiveDate};

use crate::ProgressEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl Interval {
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }
}

impl From<std::ops::RangeInclusive<NaiveDate>> for Interval {
    fn from(value: std::ops::RangeInclusive<NaiveDate>) -> Self {
        Interval {
            first: *value.start(),
            last: *value.end(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultInterval {
    All,
    _1Y = 365,
    _6M = 182,
    _3M = 91,
    _1M = 30,
}

/// Interval ending today that shows either all data or the default range.
///
/// The default range is only applied if the latest date lies within it, so
/// that a history which stopped a while ago is still visible.
#[must_use]
pub fn init_interval(
    dates: &[NaiveDate],
    default_interval: DefaultInterval,
    today: NaiveDate,
) -> Interval {
    let mut first = dates.iter().copied().min().unwrap_or(today);
    let last = dates.iter().copied().max().unwrap_or(today);

    if default_interval != DefaultInterval::All
        && last >= today - Duration::days(default_interval as i64)
    {
        first = today - Duration::days(default_interval as i64);
    }

    Interval { first, last: today }
}

/// Entries of a progress series which lie within the interval.
pub fn progress_within<'a>(
    entries: impl IntoIterator<Item = ProgressEntry> + 'a,
    interval: &'a Interval,
) -> impl Iterator<Item = ProgressEntry> + 'a {
    entries
        .into_iter()
        .filter(move |entry| interval.contains(entry.date))
}

/// Smoothed trend of the best estimated one-rep max of a progress series.
#[must_use]
pub fn e1rm_trend(
    entries: &[ProgressEntry],
    interval: &Interval,
    radius: u64,
) -> Vec<Vec<(NaiveDate, f32)>> {
    centered_moving_average(
        &entries
            .iter()
            .filter(|e| e.best_e1rm > 0.0)
            .map(|e| (e.date, e.best_e1rm))
            .collect::<Vec<_>>(),
        interval,
        radius,
    )
}

/// Calculate a series of moving averages from a given series of (date, value) pairs.
///
/// The radius argument determines the number of days to include into the calculated
/// average before and after each value within the interval. Multiple values for the
/// same date are averaged first.
///
/// Days without any value within their radius split the result into several series.
#[must_use]
pub fn centered_moving_average(
    data: &[(NaiveDate, f32)],
    interval: &Interval,
    radius: u64,
) -> Vec<Vec<(NaiveDate, f32)>> {
    let mut values_per_day: BTreeMap<NaiveDate, Vec<f32>> = BTreeMap::new();

    for (date, value) in data {
        values_per_day.entry(*date).or_default().push(*value);
    }

    let daily: BTreeMap<NaiveDate, f32> = values_per_day
        .into_iter()
        .filter_map(|(date, values)| average(&values).map(|avg| (date, avg)))
        .collect();

    let mut result: Vec<Vec<(NaiveDate, f32)>> = vec![vec![]];

    for center in interval.first.iter_days().take_while(|d| *d <= interval.last) {
        let from = center.checked_sub_days(Days::new(radius)).unwrap_or(center);
        let to = center
            .checked_add_days(Days::new(radius))
            .unwrap_or(center)
            .min(interval.last);
        let window = daily.range(from..=to).map(|(_, v)| *v).collect::<Vec<_>>();

        if let Some(current) = result.last_mut() {
            match average(&window) {
                Some(avg) => current.push((center, avg)),
                None => {
                    if !current.is_empty() {
                        result.push(vec![]);
                    }
                }
            }
        }
    }

    result.into_iter().filter(|s| !s.is_empty()).collect()
}

fn average(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        None
    } else {
        #[allow(clippy::cast_precision_loss)]
        Some(values.iter().sum::<f32>() / values.len() as f32)
    }
}
