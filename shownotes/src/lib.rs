// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

pub use handlers::{
    build_run_options, build_selection, check_aggregate, handle_scrape, init_logging, load_directory,
    parse_format, write_report,
};

pub use shownotes_core::run::{EpisodeSelection, RunOptions};
