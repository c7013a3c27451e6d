// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use comfy_table::Cell;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::metrics::{ChangeMetric, Direction};

fn round2(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `1234567.891` -> `1,234,567.89`. Sign is not included.
fn grouped_magnitude(d: Decimal) -> String {
    let raw = format!("{:.2}", round2(d).abs());
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));
    let digits = int_part.as_bytes();
    let mut out = String::with_capacity(raw.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*ch as char);
    }
    out.push('.');
    out.push_str(frac_part);
    out
}

pub fn fmt_money(d: Decimal, ccy: &str) -> String {
    let sign = if round2(d) < Decimal::ZERO { "-" } else { "" };
    format!("{} {}{}", ccy, sign, grouped_magnitude(d))
}

/// Always signed, sign ahead of the currency code: `+USD 5,000.00`.
pub fn fmt_signed_money(d: Decimal, ccy: &str) -> String {
    let dir = Direction::of(round2(d));
    format!("{}{} {}", dir.prefix(), ccy, grouped_magnitude(d))
}

pub fn fmt_percent(p: Decimal) -> String {
    let rounded = round2(p);
    let dir = Direction::of(rounded);
    format!("{}{:.2}%", dir.prefix(), rounded.abs())
}

pub fn fmt_change(metric: &ChangeMetric, ccy: &str) -> String {
    format!(
        "{} ({})",
        fmt_signed_money(metric.change, ccy),
        fmt_percent(metric.percent)
    )
}

/// Table cell coloured by the metric's sign.
pub fn styled_delta_cell(metric: &ChangeMetric, ccy: &str) -> Cell {
    Cell::new(fmt_change(metric, ccy)).fg(metric.direction.color())
}
