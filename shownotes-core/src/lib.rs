pub mod category;
pub mod classify;
pub mod directory;
pub mod model;
pub mod probe;
pub mod report;
pub mod run;

pub use category::Category;
pub use classify::Classifier;
pub use directory::SiteDirectory;
pub use model::ClassificationResult;
pub use probe::PageProbe;

use colored::Colorize;

pub fn print_banner() {
    eprintln!(
        "{} {}",
        "shownotes".bright_cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
    eprintln!("{}", "sorting show notes into films, books, podcasts and more".bright_black());
    eprintln!();
}
