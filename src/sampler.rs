// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Density reduction for net-worth history.
//!
//! Short ranges keep every daily point. Six-month ranges keep the first point
//! of each week, one-year and all-time ranges keep the first point of each
//! month. The output is always a subsequence of the input: nothing is
//! interpolated and the first point is always kept.
//!
//! Callers must pass a chronologically ascending series. Unordered input is
//! not detected; the result is still a subsequence but buckets may repeat.

use chrono::{Datelike, NaiveDate};

use crate::models::{Granularity, NetWorthPoint, TimeRange};

/// Week number used for six-month sampling.
///
/// `ceil((days_since_jan1 + jan1_weekday + 1) / 7)` with Sunday = 0. This is
/// a simple calendar-row count, not ISO-8601: week 1 always contains
/// January 1 and weeks start on Sunday, so the last days of December and the
/// first days of January never share a number.
pub fn week_of_year(date: NaiveDate) -> u32 {
    let jan1_weekday = NaiveDate::from_ymd_opt(date.year(), 1, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0);
    (date.ordinal0() + jan1_weekday + 1).div_ceil(7)
}

pub fn sample_history(series: &[NetWorthPoint], range: TimeRange) -> Vec<NetWorthPoint> {
    match range.granularity() {
        Granularity::Daily => series.to_vec(),
        Granularity::Weekly => first_per_bucket(series, |p| week_of_year(p.date)),
        Granularity::Monthly => first_per_bucket(series, |p| p.date.month0()),
    }
}

// Keeps a point whenever its bucket differs from the last kept point's bucket.
// Only the bucket number is compared, not the year.
fn first_per_bucket<F>(series: &[NetWorthPoint], bucket: F) -> Vec<NetWorthPoint>
where
    F: Fn(&NetWorthPoint) -> u32,
{
    let mut out = Vec::new();
    let mut last: Option<u32> = None;
    for point in series {
        let key = bucket(point);
        if last != Some(key) {
            out.push(*point);
            last = Some(key);
        }
    }
    out
}
