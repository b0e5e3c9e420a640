use crate::CLAP_STYLING;
use clap::arg;
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("shownotes")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("shownotes")
        .about("Scrape podcast show notes and sort the links by what they point at")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(
            arg!([EPISODES] ...)
                .required(false)
                .help("Episode numbers to scrape")
                .value_parser(clap::value_parser!(u32))
                .conflicts_with("all-episodes"),
        )
        .arg(
            arg!(--"all-episodes")
                .required(false)
                .help("Scrape every episode listed in the podcast feed")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(--"feed-url" <URL>)
                .required(false)
                .help("Podcast feed to read episodes from with --all-episodes")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            arg!(--"base-url" <URL>)
                .required(false)
                .help("Episode page prefix; episode N is fetched from <URL>/epN")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Report format: text, csv, json")
                .value_parser(["text", "csv", "json"])
                .default_value("text"),
        )
        .arg(
            arg!(--"aggregate")
                .required(false)
                .help("Combine all episodes into a single listing (text format only)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Save report to file (default: display to screen)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            arg!(--"directory" <PATH>)
                .required(false)
                .help("JSON file overriding the built-in site directory"),
        )
        .arg(
            arg!(--"keep-footer")
                .required(false)
                .help("Keep sponsor/footer boilerplate links")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("20"),
        )
        .arg(
            arg!(--"pause" <SECONDS>)
                .required(false)
                .help("Seconds to wait between episodes")
                .value_parser(clap::value_parser!(u64))
                .default_value("3"),
        )
}
