// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use networth::{cli, commands, config::Config, db};

fn init_logging(verbose: bool) {
    // RUST_LOG wins over --verbose; stderr keeps stdout clean for JSON output
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    let path = db::db_path(matches.get_one::<String>("db").map(Path::new))?;
    let mut conn = db::open_or_init(&path)?;
    let cfg = Config::load(&conn, path)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", cfg.db_path.display());
        }
        Some(("account", sub)) => commands::accounts::handle(&conn, &cfg, sub)?,
        Some(("balance", sub)) => commands::balances::handle(&conn, &cfg, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut conn, &cfg, sub)?,
        Some(("summary", sub)) => commands::summary::handle(&conn, &cfg, sub)?,
        Some(("history", sub)) => commands::history::handle(&conn, &cfg, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, &cfg, sub)?,
        Some(("fx", sub)) => commands::fx::handle(&conn, &cfg, sub)?,
        Some(("config", sub)) => commands::settings::handle(&conn, &cfg, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
