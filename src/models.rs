// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::NetWorthError;
use crate::metrics::ChangeMetric;

/// One day of net-worth history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetWorthPoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

impl NetWorthPoint {
    pub fn new(date: NaiveDate, value: Decimal) -> Self {
        Self { date, value }
    }
}

/// Selects both the fetch window and the display granularity of a history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "ALL")]
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl TimeRange {
    pub const ALL_RANGES: [TimeRange; 5] = [
        TimeRange::OneMonth,
        TimeRange::ThreeMonths,
        TimeRange::SixMonths,
        TimeRange::OneYear,
        TimeRange::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::OneMonth => "1M",
            TimeRange::ThreeMonths => "3M",
            TimeRange::SixMonths => "6M",
            TimeRange::OneYear => "1Y",
            TimeRange::All => "ALL",
        }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            TimeRange::OneMonth | TimeRange::ThreeMonths => Granularity::Daily,
            TimeRange::SixMonths => Granularity::Weekly,
            TimeRange::OneYear | TimeRange::All => Granularity::Monthly,
        }
    }

    /// First day of the fetch window ending at `as_of`, or `None` for `All`.
    /// Month arithmetic clamps to the last day of shorter months.
    pub fn window_start(&self, as_of: NaiveDate) -> Option<NaiveDate> {
        let months = match self {
            TimeRange::OneMonth => 1,
            TimeRange::ThreeMonths => 3,
            TimeRange::SixMonths => 6,
            TimeRange::OneYear => 12,
            TimeRange::All => return None,
        };
        as_of.checked_sub_months(Months::new(months))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = NetWorthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1M" => Ok(TimeRange::OneMonth),
            "3M" => Ok(TimeRange::ThreeMonths),
            "6M" => Ok(TimeRange::SixMonths),
            "1Y" | "12M" => Ok(TimeRange::OneYear),
            "ALL" => Ok(TimeRange::All),
            _ => Err(NetWorthError::InvalidRange(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Asset,
    /// Balances are stored as positive magnitudes and subtracted from net worth.
    Liability,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Asset => "asset",
            AccountKind::Liability => "liability",
        }
    }

    /// Contribution of a stored balance to net worth.
    pub fn signed(&self, value: Decimal) -> Decimal {
        match self {
            AccountKind::Asset => value,
            AccountKind::Liability => -value,
        }
    }
}

impl FromStr for AccountKind {
    type Err = NetWorthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asset" => Ok(AccountKind::Asset),
            "liability" => Ok(AccountKind::Liability),
            _ => Err(NetWorthError::InvalidAccountKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub kind: AccountKind,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub account_id: i64,
    pub date: NaiveDate,
    pub value: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBreakdown {
    pub name: String,
    pub kind: AccountKind,
    pub currency: String,
    /// Signed contribution in the snapshot's base currency.
    pub current_value: Decimal,
    pub history: Vec<NetWorthPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetWorthSnapshot {
    pub as_of: NaiveDate,
    pub currency: String,
    pub range: TimeRange,
    pub current_total: Decimal,
    pub month_over_month: ChangeMetric,
    pub period: ChangeMetric,
    pub history: Vec<NetWorthPoint>,
    pub accounts: Vec<AccountBreakdown>,
}
