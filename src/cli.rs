// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl"),
    )
    .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue))
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["expense", "income"])
}

fn tx_command() -> Command {
    Command::new("tx")
        .about("Record and browse transactions")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(type_arg().default_value("expense"))
                .arg(
                    Arg::new("category")
                        .long("category")
                        .help("Category name; classified from the note when omitted"),
                )
                .arg(Arg::new("icon").long("icon"))
                .arg(Arg::new("note").long("note"))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD, defaults to today"),
                ),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(type_arg())
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(json_args(
            Command::new("show").arg(Arg::new("id").long("id").required(true)),
        ))
        .subcommand(
            Command::new("edit")
                .about("Change fields of a transaction")
                .arg(Arg::new("id").long("id").required(true))
                .arg(Arg::new("amount").long("amount"))
                .arg(type_arg())
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("icon").long("icon"))
                .arg(Arg::new("note").long("note").conflicts_with("clear_note"))
                .arg(
                    Arg::new("clear_note")
                        .long("clear-note")
                        .action(ArgAction::SetTrue),
                )
                .arg(Arg::new("date").long("date")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(Arg::new("id").long("id").required(true)),
        )
}

fn fixed_command() -> Command {
    Command::new("fixed")
        .about("Manage recurring fixed expenses")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Create a fixed expense, or edit one with --id")
                .arg(Arg::new("id").long("id"))
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(type_arg().default_value("expense"))
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("icon").long("icon"))
                .arg(
                    Arg::new("day")
                        .long("day")
                        .required(true)
                        .value_parser(value_parser!(u32)),
                ),
        )
        .subcommand(json_args(Command::new("list")))
        .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true)))
        .subcommand(
            Command::new("run")
                .about("Generate this month's due fixed expenses")
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("Run as of YYYY-MM-DD instead of today"),
                ),
        )
}

fn report_command() -> Command {
    Command::new("report")
        .about("Monthly summaries")
        .subcommand_required(true)
        .subcommand(json_args(
            Command::new("summary").arg(Arg::new("month").long("month").help("YYYY-MM")),
        ))
        .subcommand(json_args(
            Command::new("breakdown")
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(type_arg().default_value("expense")),
        ))
        .subcommand(json_args(
            Command::new("recent").arg(
                Arg::new("limit")
                    .long("limit")
                    .value_parser(value_parser!(usize))
                    .default_value("5"),
            ),
        ))
}

pub fn build_cli() -> Command {
    Command::new("kakeibo")
        .version(crate_version!())
        .about("Household budget tracker")
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(tx_command())
        .subcommand(fixed_command())
        .subcommand(
            Command::new("sync")
                .about("Import transactions from the spreadsheet web app")
                .arg(
                    Arg::new("url")
                        .long("url")
                        .help("Endpoint to fetch; remembered for later syncs"),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import transactions from files")
                .subcommand_required(true)
                .subcommand(
                    Command::new("csv")
                        .about("CSV with headers date,amount,note[,id][,type]")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(report_command())
        .subcommand(
            Command::new("category")
                .about("Category catalog and classification")
                .subcommand_required(true)
                .subcommand(Command::new("list").arg(type_arg()))
                .subcommand(
                    Command::new("classify").arg(Arg::new("text").long("text").required(true)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Stored settings")
                .subcommand_required(true)
                .subcommand(
                    Command::new("get").arg(
                        Arg::new("key")
                            .required(true)
                            .value_parser(["sync_url", "currency_symbol"]),
                    ),
                )
                .subcommand(
                    Command::new("set")
                        .arg(
                            Arg::new("key")
                                .required(true)
                                .value_parser(["sync_url", "currency_symbol"]),
                        )
                        .arg(Arg::new("value").required(true)),
                ),
        )
}
