// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use std::path::PathBuf;

use crate::errors::Result;
use crate::models::TimeRange;

pub const BASE_CURRENCY_KEY: &str = "base_currency";
pub const DEFAULT_RANGE_KEY: &str = "default_range";
pub const DEFAULT_BASE_CURRENCY: &str = "USD";
pub const DEFAULT_RANGE: TimeRange = TimeRange::SixMonths;

/// Settings resolved once at startup and handed to commands.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub db_path: PathBuf,
    pub base_currency: String,
    pub default_range: TimeRange,
}

impl Config {
    pub fn load(conn: &Connection, db_path: PathBuf) -> Result<Self> {
        let base_currency = get_base_currency(conn)?;
        let default_range = match get_setting(conn, DEFAULT_RANGE_KEY)? {
            Some(raw) => raw.parse()?,
            None => DEFAULT_RANGE,
        };
        Ok(Self {
            db_path,
            base_currency,
            default_range,
        })
    }
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn get_base_currency(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, BASE_CURRENCY_KEY)?
        .unwrap_or_else(|| DEFAULT_BASE_CURRENCY.to_string()))
}

pub fn set_base_currency(conn: &Connection, ccy: &str) -> Result<()> {
    set_setting(conn, BASE_CURRENCY_KEY, &ccy.to_uppercase())
}

pub fn set_default_range(conn: &Connection, range: TimeRange) -> Result<()> {
    set_setting(conn, DEFAULT_RANGE_KEY, range.as_str())
}
