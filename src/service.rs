// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Net-worth data service.
//!
//! [`NetWorthService`] owns nothing global: it borrows the connection it is
//! given and is built wherever a command needs it. Fetching a snapshot and
//! reacting to one are separate: [`NetWorthService::fetch_snapshot`] is a
//! plain call, and [`SnapshotFeed`] pushes fresh snapshots to registered
//! [`SnapshotObserver`]s after an explicit refresh or a write.

use chrono::{Datelike, Months, NaiveDate};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::errors::{NetWorthError, Result};
use crate::fx::FxRates;
use crate::metrics::{month_over_month, period_change};
use crate::models::{
    Account, AccountBreakdown, AccountKind, BalanceEntry, NetWorthPoint, NetWorthSnapshot,
    TimeRange,
};

#[derive(Debug, Clone, Serialize)]
pub struct BalanceRow {
    pub date: NaiveDate,
    pub account: String,
    pub kind: AccountKind,
    pub currency: String,
    pub value: Decimal,
}

/// Stored balances for one account, by date.
type Ledger = BTreeMap<NaiveDate, Decimal>;

fn parse_stored_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| NetWorthError::InvalidDate(s.to_string()))
}

fn parse_stored_amount(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .map_err(|_| NetWorthError::InvalidAmount(s.to_string()))
}

/// First day of the calendar month before the one containing `date`.
pub fn start_of_prior_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)
        .and_then(|d| d.checked_sub_months(Months::new(1)))
}

pub struct NetWorthService<'a> {
    conn: &'a Connection,
    base_currency: String,
}

impl<'a> NetWorthService<'a> {
    pub fn new(conn: &'a Connection, base_currency: impl Into<String>) -> Self {
        Self {
            conn,
            base_currency: base_currency.into(),
        }
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    pub fn add_account(&self, name: &str, kind: AccountKind, currency: &str) -> Result<Account> {
        let currency = currency.trim().to_uppercase();
        self.conn.execute(
            "INSERT INTO accounts(name, kind, currency) VALUES (?1, ?2, ?3)",
            params![name.trim(), kind.as_str(), currency],
        )?;
        Ok(Account {
            id: self.conn.last_insert_rowid(),
            name: name.trim().to_string(),
            kind,
            currency,
        })
    }

    /// Returns false when no account had that name.
    pub fn remove_account(&self, name: &str) -> Result<bool> {
        let n = self
            .conn
            .execute("DELETE FROM accounts WHERE name=?1", params![name.trim()])?;
        Ok(n > 0)
    }

    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, kind, currency FROM accounts ORDER BY name")?;
        let rows = stmt.query_map([], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, name, kind, currency) = row?;
            out.push(Account {
                id,
                name,
                kind: kind.parse()?,
                currency,
            });
        }
        Ok(out)
    }

    pub fn account_by_name(&self, name: &str) -> Result<Account> {
        let row: Option<(i64, String, String, String)> = self
            .conn
            .query_row(
                "SELECT id, name, kind, currency FROM accounts WHERE name=?1",
                params![name.trim()],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )
            .optional()?;
        let (id, name, kind, currency) =
            row.ok_or_else(|| NetWorthError::AccountNotFound(name.trim().to_string()))?;
        Ok(Account {
            id,
            name,
            kind: kind.parse()?,
            currency,
        })
    }

    /// Upserts the balance of `account` on `date`.
    pub fn record_balance(
        &self,
        account: &str,
        date: NaiveDate,
        value: Decimal,
    ) -> Result<BalanceEntry> {
        let acct = self.account_by_name(account)?;
        self.record_balance_for(&acct, date, value)
    }

    /// Same as [`record_balance`](Self::record_balance) for an account the
    /// caller already resolved.
    pub fn record_balance_for(
        &self,
        acct: &Account,
        date: NaiveDate,
        value: Decimal,
    ) -> Result<BalanceEntry> {
        self.conn.execute(
            "INSERT INTO balances(account_id, date, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(account_id, date) DO UPDATE SET value=excluded.value",
            params![acct.id, date.to_string(), value.to_string()],
        )?;
        tracing::debug!(account = %acct.name, %date, %value, "balance recorded");
        Ok(BalanceEntry {
            account_id: acct.id,
            date,
            value,
        })
    }

    pub fn list_balances(&self, account: Option<&str>) -> Result<Vec<BalanceRow>> {
        let filter_id = match account {
            Some(name) => Some(self.account_by_name(name)?.id),
            None => None,
        };
        let mut stmt = self.conn.prepare(
            "SELECT b.date, a.name, a.kind, a.currency, b.value
             FROM balances b JOIN accounts a ON b.account_id=a.id
             WHERE (?1 IS NULL OR a.id=?1)
             ORDER BY b.date, a.name",
        )?;
        let rows = stmt.query_map(params![filter_id], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, String>(4)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (d, account, kind, currency, v) = row?;
            out.push(BalanceRow {
                date: parse_stored_date(&d)?,
                account,
                kind: kind.parse()?,
                currency,
                value: parse_stored_amount(&v)?,
            });
        }
        Ok(out)
    }

    fn load_ledgers(&self, accounts: &[Account], until: NaiveDate) -> Result<Vec<Ledger>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT date, value FROM balances WHERE account_id=?1 AND date<=?2")?;
        let mut ledgers = Vec::with_capacity(accounts.len());
        for acct in accounts {
            let rows = stmt.query_map(params![acct.id, until.to_string()], |r| {
                Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
            })?;
            let mut ledger = Ledger::new();
            for row in rows {
                let (d, v) = row?;
                ledger.insert(parse_stored_date(&d)?, parse_stored_amount(&v)?);
            }
            ledgers.push(ledger);
        }
        Ok(ledgers)
    }

    /// Net worth as of `date`, or `None` when no account has a balance yet.
    fn value_at(
        &self,
        accounts: &[Account],
        ledgers: &[Ledger],
        fx: &FxRates,
        date: NaiveDate,
    ) -> Result<Option<Decimal>> {
        let mut total: Option<Decimal> = None;
        for (acct, ledger) in accounts.iter().zip(ledgers) {
            if let Some((_, v)) = ledger.range(..=date).next_back() {
                let contribution = self.contribution(acct, fx, date, *v)?;
                let sum = total.unwrap_or(Decimal::ZERO);
                total = Some(sum.checked_add(contribution).ok_or_else(|| {
                    NetWorthError::InvalidAmount(format!(
                        "net worth on {date} overflows at account '{}'",
                        acct.name
                    ))
                })?);
            }
        }
        Ok(total)
    }

    fn contribution(
        &self,
        acct: &Account,
        fx: &FxRates,
        date: NaiveDate,
        stored: Decimal,
    ) -> Result<Decimal> {
        let converted = fx.convert(date, stored, &acct.currency, &self.base_currency)?;
        Ok(acct.kind.signed(converted))
    }

    /// Assembles everything the summary and history views need.
    ///
    /// The history has one point per day on which any balance was recorded
    /// inside the range window; each point carries forward every account's
    /// latest balance on or before that day. When balances predate the
    /// window, the value they add up to is carried forward onto the window's
    /// first day, so the period change is measured from where the window
    /// starts.
    pub fn fetch_snapshot(&self, range: TimeRange, as_of: NaiveDate) -> Result<NetWorthSnapshot> {
        let accounts = self.list_accounts()?;
        let ledgers = self.load_ledgers(&accounts, as_of)?;
        let fx = FxRates::load(self.conn, &self.base_currency)?;
        let start = range.window_start(as_of);
        let in_window = |d: NaiveDate| start.is_none_or(|s| d >= s);

        let mut days: BTreeSet<NaiveDate> = ledgers
            .iter()
            .flat_map(|l| l.keys().copied())
            .filter(|d| in_window(*d))
            .collect();
        if let Some(s) = start {
            if ledgers.iter().any(|l| l.range(..s).next().is_some()) {
                days.insert(s);
            }
        }
        let mut history = Vec::with_capacity(days.len());
        for d in days {
            if let Some(v) = self.value_at(&accounts, &ledgers, &fx, d)? {
                history.push(NetWorthPoint::new(d, v));
            }
        }

        let current_total = self
            .value_at(&accounts, &ledgers, &fx, as_of)?
            .unwrap_or(Decimal::ZERO);
        let mom_reference = match start_of_prior_month(as_of) {
            Some(d) => self.value_at(&accounts, &ledgers, &fx, d)?,
            None => None,
        };

        let mut breakdown = Vec::with_capacity(accounts.len());
        for (acct, ledger) in accounts.iter().zip(&ledgers) {
            let current_value = match ledger.range(..=as_of).next_back() {
                Some((_, v)) => self.contribution(acct, &fx, as_of, *v)?,
                None => Decimal::ZERO,
            };
            let mut account_history = Vec::new();
            if let Some(s) = start {
                if let Some((_, v)) = ledger.range(..=s).next_back() {
                    account_history.push(NetWorthPoint::new(s, self.contribution(acct, &fx, s, *v)?));
                }
            }
            for (d, v) in ledger.iter().filter(|(d, _)| start.is_none_or(|s| **d > s)) {
                account_history.push(NetWorthPoint::new(*d, self.contribution(acct, &fx, *d, *v)?));
            }
            breakdown.push(AccountBreakdown {
                name: acct.name.clone(),
                kind: acct.kind,
                currency: acct.currency.clone(),
                current_value,
                history: account_history,
            });
        }

        tracing::debug!(
            %range,
            %as_of,
            accounts = accounts.len(),
            points = history.len(),
            "snapshot assembled"
        );

        Ok(NetWorthSnapshot {
            as_of,
            currency: self.base_currency.clone(),
            range,
            current_total,
            month_over_month: month_over_month(current_total, mom_reference)?,
            period: period_change(current_total, &history)?,
            history,
            accounts: breakdown,
        })
    }
}

/// Receives every snapshot a [`SnapshotFeed`] fetches.
pub trait SnapshotObserver {
    fn on_snapshot(&mut self, snapshot: &NetWorthSnapshot);
}

impl<F> SnapshotObserver for F
where
    F: FnMut(&NetWorthSnapshot),
{
    fn on_snapshot(&mut self, snapshot: &NetWorthSnapshot) {
        self(snapshot)
    }
}

pub struct SnapshotFeed {
    range: TimeRange,
    as_of: NaiveDate,
    observers: Vec<Box<dyn SnapshotObserver>>,
}

impl SnapshotFeed {
    pub fn new(range: TimeRange, as_of: NaiveDate) -> Self {
        Self {
            range,
            as_of,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn SnapshotObserver>) {
        self.observers.push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Fetches once and hands the result to observers in subscription order.
    pub fn refresh(&mut self, service: &NetWorthService<'_>) -> Result<NetWorthSnapshot> {
        let snapshot = service.fetch_snapshot(self.range, self.as_of)?;
        for observer in self.observers.iter_mut() {
            observer.on_snapshot(&snapshot);
        }
        Ok(snapshot)
    }

    /// Call after a write so observers see the new data.
    pub fn notify_mutation(&mut self, service: &NetWorthService<'_>) -> Result<NetWorthSnapshot> {
        tracing::debug!(observers = self.observers.len(), "refreshing after write");
        self.refresh(service)
    }
}
