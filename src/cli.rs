// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    ]
}

fn range_arg() -> Arg {
    Arg::new("range")
        .long("range")
        .short('r')
        .help("Time range: 1M, 3M, 6M, 1Y or ALL (defaults to the configured range)")
}

fn as_of_arg() -> Arg {
    Arg::new("as_of")
        .long("as-of")
        .help("Report date YYYY-MM-DD (defaults to today)")
}

pub fn build_cli() -> Command {
    Command::new("networth")
        .version(crate_version!())
        .about("Track account balances and net worth over time")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the SQLite database (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging (RUST_LOG takes precedence)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .default_value("asset")
                                .help("asset or liability"),
                        )
                        .arg(Arg::new("currency").long("currency").default_value("USD")),
                )
                .subcommand(Command::new("list"))
                .subcommand(Command::new("rm").arg(Arg::new("name").long("name").required(true))),
        )
        .subcommand(
            Command::new("balance")
                .about("Record and list account balances")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(
                            Arg::new("value")
                                .long("value")
                                .required(true)
                                .allow_hyphen_values(true),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .arg(Arg::new("account").long("account"))
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import data from CSV")
                .subcommand(
                    Command::new("balances")
                        .about("CSV columns: date,account,value")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("summary")
                .about("Current net worth with month-over-month and period change")
                .arg(range_arg())
                .arg(as_of_arg())
                .args(json_args()),
        )
        .subcommand(
            Command::new("history")
                .about("Net-worth history sampled for the selected range")
                .arg(range_arg())
                .arg(as_of_arg())
                .arg(Arg::new("account").long("account"))
                .arg(
                    Arg::new("raw")
                        .long("raw")
                        .action(ArgAction::SetTrue)
                        .help("Show every daily point"),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("history")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv or json"),
                    )
                    .arg(Arg::new("out").long("out").required(true))
                    .arg(range_arg())
                    .arg(as_of_arg()),
            ),
        )
        .subcommand(
            Command::new("fx")
                .about("Currency settings and rates")
                .subcommand(
                    Command::new("set-base")
                        .arg(Arg::new("currency").long("currency").required(true)),
                )
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("base").long("base").required(true))
                        .arg(Arg::new("quote").long("quote").required(true))
                        .arg(Arg::new("rate").long("rate").required(true)),
                )
                .subcommand(
                    Command::new("fetch").arg(
                        Arg::new("days")
                            .long("days")
                            .value_parser(clap::value_parser!(usize))
                            .default_value("120"),
                    ),
                )
                .subcommand(Command::new("list")),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(
                    Command::new("set-range")
                        .arg(Arg::new("range").long("range").required(true)),
                )
                .subcommand(Command::new("show")),
        )
}
