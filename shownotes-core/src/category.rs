use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a show-notes link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Film,
    Book,
    Podcast,
    WebClip,
    Music,
    TvShow,
    /// Anything no rule claimed
    Misc,
}

impl Category {
    /// Categories with a classification rule, in the order the rules are tried.
    pub const PRIORITY: [Category; 6] = [
        Category::Film,
        Category::Book,
        Category::Podcast,
        Category::WebClip,
        Category::Music,
        Category::TvShow,
    ];

    /// Every category, residual bucket last.
    pub const ALL: [Category; 7] = [
        Category::Film,
        Category::Book,
        Category::Podcast,
        Category::WebClip,
        Category::Music,
        Category::TvShow,
        Category::Misc,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::Film => "film",
            Category::Book => "book",
            Category::Podcast => "podcast",
            Category::WebClip => "web_clip",
            Category::Music => "music",
            Category::TvShow => "tv_show",
            Category::Misc => "misc",
        }
    }

    /// Heading used by the text listing, e.g. `tv show`.
    pub fn heading(&self) -> String {
        self.key().replace('_', " ")
    }

    /// Human readable label: title-cased words, with `TV` kept upper case.
    pub fn label(&self) -> String {
        self.key()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .map(|word| if word == "Tv" { "TV".to_string() } else { word })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Category::ALL
            .into_iter()
            .find(|c| c.key() == normalized)
            .ok_or_else(|| format!("Unknown category '{}'", s))
    }
}
