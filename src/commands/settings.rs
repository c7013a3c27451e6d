// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Config, set_default_range};
use crate::utils::{parse_range, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-range", sub)) => {
            let range = parse_range(sub.get_one::<String>("range").unwrap())?;
            set_default_range(conn, range)?;
            println!("Default range set to {}", range);
        }
        Some(("show", _)) => {
            let rows = vec![
                vec!["database".to_string(), cfg.db_path.display().to_string()],
                vec!["base_currency".to_string(), cfg.base_currency.clone()],
                vec!["default_range".to_string(), cfg.default_range.to_string()],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
