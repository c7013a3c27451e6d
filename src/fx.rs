// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::errors::{NetWorthError, Result};

const UA: &str = concat!(
    "networth/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/networth)"
);

const FRANKFURTER_URL: &str = "https://api.frankfurter.dev";

#[derive(Debug, Clone, Serialize)]
pub struct FxRate {
    pub date: NaiveDate,
    pub base: String,
    pub quote: String,
    pub rate: Decimal,
}

/// In-memory copy of `fx_rates`, keyed by pair then date.
///
/// Rates are `base -> quote` (1 base = rate quote). Lookups take the closest
/// rate on or before the requested date.
#[derive(Debug, Default)]
pub struct FxRates {
    hub: String,
    rates: HashMap<(String, String), BTreeMap<NaiveDate, Decimal>>,
}

impl FxRates {
    pub fn load(conn: &Connection, hub: &str) -> Result<Self> {
        let mut stmt = conn.prepare("SELECT date, base, quote, rate FROM fx_rates")?;
        let rows = stmt.query_map([], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
            ))
        })?;
        let mut rates: HashMap<(String, String), BTreeMap<NaiveDate, Decimal>> = HashMap::new();
        for row in rows {
            let (d, base, quote, rate_s) = row?;
            let date = NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                .map_err(|_| NetWorthError::InvalidDate(d.clone()))?;
            let rate = rate_s
                .parse::<Decimal>()
                .map_err(|_| NetWorthError::InvalidAmount(rate_s.clone()))?;
            rates.entry((base, quote)).or_default().insert(date, rate);
        }
        tracing::debug!(pairs = rates.len(), hub, "loaded fx rates");
        Ok(Self {
            hub: hub.to_string(),
            rates,
        })
    }

    fn find_rate(&self, date: NaiveDate, base: &str, quote: &str) -> Option<Decimal> {
        self.rates
            .get(&(base.to_string(), quote.to_string()))
            .and_then(|by_date| by_date.range(..=date).next_back())
            .map(|(_, r)| *r)
    }

    /// Converts through the hub currency when neither side is the hub. A pair
    /// quoted against the hub is preferred; the opposite pair is used as its
    /// reciprocal. Without any usable rate the amount is returned unchanged.
    pub fn convert(
        &self,
        date: NaiveDate,
        amount: Decimal,
        from: &str,
        to: &str,
    ) -> Result<Decimal> {
        if from == to {
            return Ok(amount);
        }
        let hub = self.hub.as_str();

        if from != hub && to != hub {
            let via_hub = self.convert(date, amount, from, hub)?;
            return self.convert(date, via_hub, hub, to);
        }

        let converted = if to == hub {
            self.usable_rate(date, hub, from)
                .map(|r| amount.checked_div(r))
                .or_else(|| self.usable_rate(date, from, hub).map(|r| amount.checked_mul(r)))
        } else {
            self.usable_rate(date, hub, to)
                .map(|r| amount.checked_mul(r))
                .or_else(|| self.usable_rate(date, to, hub).map(|r| amount.checked_div(r)))
        };

        match converted {
            Some(Some(value)) => Ok(value),
            Some(None) => Err(NetWorthError::InvalidAmount(format!(
                "{amount} {from} does not fit after conversion to {to}"
            ))),
            None => {
                tracing::warn!(
                    %date,
                    from,
                    to,
                    "no fx rate on or before date; amount left unconverted"
                );
                Ok(amount)
            }
        }
    }

    fn usable_rate(&self, date: NaiveDate, base: &str, quote: &str) -> Option<Decimal> {
        self.find_rate(date, base, quote).filter(|r| !r.is_zero())
    }
}

pub fn add_rate(conn: &Connection, rate: &FxRate) -> Result<()> {
    conn.execute(
        "INSERT INTO fx_rates(date, base, quote, rate) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(date, base, quote) DO UPDATE SET rate=excluded.rate",
        params![
            rate.date.to_string(),
            rate.base.to_uppercase(),
            rate.quote.to_uppercase(),
            rate.rate.to_string()
        ],
    )?;
    Ok(())
}

pub fn list_rates(conn: &Connection, limit: usize) -> Result<Vec<FxRate>> {
    let mut stmt = conn.prepare(
        "SELECT date, base, quote, rate FROM fx_rates ORDER BY date DESC, base, quote LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit as i64], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (d, base, quote, rate_s) = row?;
        out.push(FxRate {
            date: NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                .map_err(|_| NetWorthError::InvalidDate(d.clone()))?,
            base,
            quote,
            rate: rate_s
                .parse()
                .map_err(|_| NetWorthError::InvalidAmount(rate_s.clone()))?,
        });
    }
    Ok(out)
}

/// Account currencies other than `base`.
pub fn foreign_currencies(conn: &Connection, base: &str) -> Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT DISTINCT currency FROM accounts WHERE currency != ?1 ORDER BY currency")?;
    let rows = stmt.query_map(params![base], |r| r.get::<_, String>(0))?;
    let mut out = Vec::new();
    for row in rows {
        let c = row?;
        if !c.is_empty() {
            out.push(c);
        }
    }
    Ok(out)
}

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

#[derive(Debug, Deserialize)]
struct TimeSeries {
    rates: HashMap<String, HashMap<String, Decimal>>,
}

/// Pulls daily ECB rates from Frankfurter for `base -> targets` and stores
/// them. Existing rows are kept. Returns the number of rows inserted.
pub fn fetch_rates(
    conn: &Connection,
    client: &reqwest::blocking::Client,
    base: &str,
    targets: &[String],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<usize> {
    if targets.is_empty() {
        return Ok(0);
    }
    let url = format!(
        "{FRANKFURTER_URL}/{start}..{end}?from={base}&to={}",
        targets.join(",")
    );
    tracing::info!(%url, "fetching fx rates");
    let series: TimeSeries = client.get(url).send()?.error_for_status()?.json()?;
    let mut inserted = 0;
    for (date, quotes) in series.rates {
        for (quote, rate) in quotes {
            inserted += conn.execute(
                "INSERT OR IGNORE INTO fx_rates(date, base, quote, rate) VALUES (?1, ?2, ?3, ?4)",
                params![date, base, quote, rate.to_string()],
            )?;
        }
    }
    Ok(inserted)
}
