// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.
//   * "Rust-upgrade" - place where code can be improved using a Rust feature
//       that is not implemented or stabilized yet.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod client_config;
mod client_main;
mod command;
mod http_transport;
mod query_main;
mod tui;

use clap::{ArgMatches, Command, arg};


fn base_url_arg() -> clap::Arg {
    arg!(--"base-url" <URL> "Remote chess API root, e.g. http://localhost:8080/chess")
        .required(false)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .filter_module("reqwest", log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let matches = Command::new("Remote chess")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Console client for a remote chess engine")
        .subcommand_required(true)
        .subcommand(
            Command::new("client")
                .about("Play interactively")
                .arg(
                    arg!(-c --config <FILE> "Path to the configuration file: yaml-serialized ClientOptions.")
                        .required(false),
                )
                .arg(base_url_arg())
                .arg(
                    arg!(--"poll-interval" <DURATION> "How often to sync with the server, e.g. 300ms")
                        .required(false),
                ),
        )
        .subcommand(Command::new("pgn").about("Print the game in PGN").arg(base_url_arg()))
        .subcommand(Command::new("score").about("Print the score").arg(base_url_arg()))
        .subcommand(
            Command::new("state")
                .about("Print game state and score breakdown")
                .arg(base_url_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("client", sub_matches)) => {
            let options = client_config::load_options(
                sub_matches.get_one::<String>("config").map(String::as_str),
                base_url(sub_matches),
                sub_matches.get_one::<String>("poll-interval").map(String::as_str),
            )?;
            client_main::run(options)
        }
        Some(("pgn", sub_matches)) => query_main::run(query_main::Query::Pgn, base_url(sub_matches)),
        Some(("score", sub_matches)) => {
            query_main::run(query_main::Query::Score, base_url(sub_matches))
        }
        Some(("state", sub_matches)) => {
            query_main::run(query_main::Query::State, base_url(sub_matches))
        }
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}

fn base_url(matches: &ArgMatches) -> Option<&str> {
    matches.get_one::<String>("base-url").map(String::as_str)
}
