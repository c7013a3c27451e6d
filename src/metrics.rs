// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use comfy_table::Color;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{NetWorthError, Result};
use crate::models::NetWorthPoint;

/// Arithmetic sign of a delta. Says nothing about whether the move is good:
/// a growing liability is still `Positive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn of(delta: Decimal) -> Self {
        if delta < Decimal::ZERO {
            Direction::Negative
        } else {
            Direction::Positive
        }
    }

    /// Leading sign for display, placed before the magnitude.
    pub fn prefix(&self) -> &'static str {
        match self {
            Direction::Positive => "+",
            Direction::Negative => "-",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Direction::Positive => Color::Green,
            Direction::Negative => Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeMetric {
    pub change: Decimal,
    /// Unrounded; rounding to two places happens when formatting.
    pub percent: Decimal,
    pub direction: Direction,
}

impl ChangeMetric {
    /// Delta from `reference` to `current`.
    ///
    /// A missing reference counts as zero. A zero reference yields a percent
    /// of zero instead of a division by zero. Fails only when the delta does
    /// not fit in a `Decimal`.
    pub fn between(current: Decimal, reference: Option<Decimal>) -> Result<Self> {
        let reference = reference.unwrap_or(Decimal::ZERO);
        let change = current.checked_sub(reference).ok_or_else(|| {
            NetWorthError::InvalidAmount(format!("{current} - {reference} overflows"))
        })?;
        Ok(Self {
            change,
            percent: percent_change(change, reference),
            direction: Direction::of(change),
        })
    }
}

pub fn percent_change(change: Decimal, reference: Decimal) -> Decimal {
    if reference.is_zero() {
        return Decimal::ZERO;
    }
    change
        .checked_div(reference)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// `reference` is the value at the start of the prior calendar month; locating
/// it is the data service's job.
pub fn month_over_month(current: Decimal, reference: Option<Decimal>) -> Result<ChangeMetric> {
    ChangeMetric::between(current, reference)
}

/// Change across a displayed window, measured from its first point.
pub fn period_change(current: Decimal, series: &[NetWorthPoint]) -> Result<ChangeMetric> {
    ChangeMetric::between(current, series.first().map(|p| p.value))
}
