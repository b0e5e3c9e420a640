use anyhow::Context;
use clap::ArgMatches;
use colored::Colorize;
use shownotes_core::SiteDirectory;
use shownotes_core::report::{self, ReportFormat};
use shownotes_core::run::{EpisodeSelection, RunOptions, execute_run};
use shownotes_scanner::HttpFetcher;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log to stderr so reports written to stdout stay parseable.
/// `RUST_LOG` wins over the default level.
pub fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Episode numbers or the whole feed; one of the two is required
pub fn build_selection(numbers: Vec<u32>, all_episodes: bool) -> Result<EpisodeSelection, String> {
    match (numbers.is_empty(), all_episodes) {
        (false, false) => Ok(EpisodeSelection::Numbers(numbers)),
        (true, true) => Ok(EpisodeSelection::WholeFeed),
        (false, true) => Err("Episode numbers can't be combined with --all-episodes".to_string()),
        (true, false) => {
            Err("Give at least one episode number, or --all-episodes to walk the feed".to_string())
        }
    }
}

/// Built-in directory, or the JSON file at `path` (`~` is expanded)
pub fn load_directory(path: Option<&str>) -> anyhow::Result<SiteDirectory> {
    let Some(path) = path else {
        return Ok(SiteDirectory::default());
    };

    let expanded = shellexpand::tilde(path);
    let directory = SiteDirectory::from_json_file(Path::new(expanded.as_ref()))
        .with_context(|| format!("Failed to load site directory from {}", path))?;
    info!("Loaded site directory from {}", expanded);
    Ok(directory)
}

pub fn parse_format(value: &str) -> Result<ReportFormat, String> {
    ReportFormat::from_str(value).ok_or_else(|| format!("Unknown report format '{}'", value))
}

/// `--aggregate` only shapes the text listing
pub fn check_aggregate(format: ReportFormat, aggregate: bool) -> Result<(), String> {
    if aggregate && format != ReportFormat::Text {
        return Err("--aggregate only applies to the text format".to_string());
    }
    Ok(())
}

pub fn build_run_options(args: &ArgMatches) -> Result<RunOptions, String> {
    let numbers: Vec<u32> = args
        .get_many::<u32>("EPISODES")
        .map(|values| values.copied().collect())
        .unwrap_or_default();
    let selection = build_selection(numbers, args.get_flag("all-episodes"))?;

    let mut options = RunOptions {
        selection,
        filter_footer: !args.get_flag("keep-footer"),
        show_progress_bars: !args.get_flag("quiet"),
        ..RunOptions::default()
    };

    if let Some(base) = args.get_one::<url::Url>("base-url") {
        options.base_episodes_url = base.as_str().trim_end_matches('/').to_string();
    }
    if let Some(feed) = args.get_one::<url::Url>("feed-url") {
        options.feed_url = feed.to_string();
    }
    if let Some(pause) = args.get_one::<u64>("pause") {
        options.pause = Duration::from_secs(*pause);
    }

    Ok(options)
}

/// Write the report to `output`, or to stdout when no path is given
pub fn write_report(content: &str, output: Option<&PathBuf>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            report::save_report(content, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!(
                "{} Report saved to: {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        None => print!("{}", content),
    }
    Ok(())
}

pub async fn handle_scrape(args: &ArgMatches) -> anyhow::Result<()> {
    let options = build_run_options(args).map_err(anyhow::Error::msg)?;
    let directory = load_directory(args.get_one::<String>("directory").map(String::as_str))?;
    let format = parse_format(
        args.get_one::<String>("format")
            .map(String::as_str)
            .unwrap_or("text"),
    )
    .map_err(anyhow::Error::msg)?;
    let aggregate = args.get_flag("aggregate");
    check_aggregate(format, aggregate).map_err(anyhow::Error::msg)?;
    let timeout = args.get_one::<u64>("timeout").copied().unwrap_or(20);
    let quiet = args.get_flag("quiet");

    let fetcher = HttpFetcher::with_timeout(Duration::from_secs(timeout))
        .context("Failed to build HTTP client")?;

    let outcome = execute_run(options, directory, &fetcher, None)
        .await
        .context("Run failed")?;

    if !quiet {
        eprintln!(
            "{} {} episode(s) scraped, {} link(s) found",
            "✓".green().bold(),
            outcome.episodes.len(),
            outcome.aggregate().total()
        );
        if !outcome.failures.is_empty() {
            eprintln!(
                "{} {} episode(s) failed",
                "✗".red().bold(),
                outcome.failures.len()
            );
        }
    }

    let rendered = report::render(&outcome, format, aggregate)?;
    write_report(&rendered, args.get_one::<PathBuf>("output"))
}
