// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::models::AccountKind;
use crate::service::NetWorthService;
use crate::utils::pretty_table;
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    let svc = NetWorthService::new(conn, cfg.base_currency.clone());
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let kind: AccountKind = sub.get_one::<String>("kind").unwrap().parse()?;
            let ccy = sub.get_one::<String>("currency").unwrap();
            let acct = svc.add_account(name, kind, ccy)?;
            println!(
                "Added account '{}' ({}, {})",
                acct.name,
                acct.kind.as_str(),
                acct.currency
            );
        }
        Some(("list", _)) => {
            let data = svc
                .list_accounts()?
                .into_iter()
                .map(|a| vec![a.name, a.kind.as_str().to_string(), a.currency])
                .collect();
            println!("{}", pretty_table(&["Name", "Kind", "Currency"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            if !svc.remove_account(name)? {
                return Err(anyhow!("Account '{}' not found", name));
            }
            println!("Removed account '{}' and its balances", name);
        }
        _ => {}
    }
    Ok(())
}
