// Tests for the site directory and category naming

use shownotes_core::Category;
use shownotes_core::directory::{DirectoryError, PathRule, SiteDirectory, netloc};
use std::io::Write;
use tempfile::NamedTempFile;
use url::Url;

// ============================================================================
// Category Tests
// ============================================================================

#[test]
fn test_category_labels() {
    assert_eq!(Category::Film.label(), "Film");
    assert_eq!(Category::WebClip.label(), "Web Clip");
    assert_eq!(Category::TvShow.label(), "TV Show");
    assert_eq!(Category::Misc.label(), "Misc");
}

#[test]
fn test_category_headings() {
    assert_eq!(Category::TvShow.heading(), "tv show");
    assert_eq!(Category::WebClip.heading(), "web clip");
    assert_eq!(Category::Book.heading(), "book");
}

#[test]
fn test_category_from_str() {
    assert_eq!("film".parse::<Category>(), Ok(Category::Film));
    assert_eq!("TV Show".parse::<Category>(), Ok(Category::TvShow));
    assert_eq!("web-clip".parse::<Category>(), Ok(Category::WebClip));
    assert!("documentary".parse::<Category>().is_err());
}

#[test]
fn test_priority_excludes_misc() {
    assert!(!Category::PRIORITY.contains(&Category::Misc));
    assert_eq!(Category::ALL.last(), Some(&Category::Misc));
}

// ============================================================================
// Directory Tests
// ============================================================================

#[test]
fn test_netloc_keeps_explicit_port() {
    let url = Url::parse("http://127.0.0.1:9000/m/x").unwrap();
    assert_eq!(netloc(&url), "127.0.0.1:9000");

    let url = Url::parse("https://www.imdb.com/title/tt1/").unwrap();
    assert_eq!(netloc(&url), "www.imdb.com");
}

#[test]
fn test_host_membership_is_exact() {
    let directory = SiteDirectory::default();
    assert!(directory.is_listed(Category::Film, "www.imdb.com"));
    assert!(!directory.is_listed(Category::Film, "imdb.com"));
    assert!(!directory.is_listed(Category::Misc, "www.imdb.com"));
}

#[test]
fn test_path_verdict() {
    let directory = SiteDirectory::default();
    let rt = "www.rottentomatoes.com";

    assert_eq!(directory.path_verdict(rt, "/m/departed/", Category::Film), Some(true));
    assert_eq!(directory.path_verdict(rt, "/m/departed/", Category::TvShow), Some(false));
    assert_eq!(directory.path_verdict(rt, "/tv/veep", Category::TvShow), Some(true));
    assert_eq!(directory.path_verdict("www.imdb.com", "/m/", Category::Film), None);
}

#[test]
fn test_custom_path_rule() {
    let directory = SiteDirectory::empty().with_path_rule(PathRule::new(
        "www.goodreads.com",
        "/book/",
        Category::Book,
    ));
    assert_eq!(
        directory.path_verdict("www.goodreads.com", "/book/show/1", Category::Book),
        Some(true)
    );
}

#[test]
fn test_footer_links() {
    let directory = SiteDirectory::default();
    assert!(directory.is_footer_link("https://diamantina.com.au/"));
    assert!(!directory.is_footer_link("https://diamantina.com.au/shop"));
}

#[test]
fn test_json_overrides_only_given_fields() {
    let directory = SiteDirectory::from_json_str(
        r#"{ "web_clip": ["clips.example.com"], "marketplaces": [] }"#,
    )
    .unwrap();

    assert!(directory.is_listed(Category::WebClip, "clips.example.com"));
    assert!(!directory.is_listed(Category::WebClip, "www.youtube.com"));
    assert!(!directory.is_marketplace("www.amazon.com"));
    // Untouched fields keep the built-in lists.
    assert!(directory.is_listed(Category::Film, "www.imdb.com"));
    assert_eq!(directory.podcast_fingerprints, vec!["podcast", "radio"]);
}

#[test]
fn test_json_path_rules() {
    let directory = SiteDirectory::from_json_str(
        r#"{ "path_rules": [ { "host": "www.sbs.com.au", "marker": "/ondemand/", "category": "tv_show" } ] }"#,
    )
    .unwrap();

    assert_eq!(directory.path_rules.len(), 1);
    assert_eq!(directory.path_rules[0].category, Category::TvShow);
}

#[test]
fn test_invalid_json_is_rejected() {
    let err = SiteDirectory::from_json_str(r#"{ "film": "not a list" }"#).unwrap_err();
    assert!(matches!(err, DirectoryError::Json(_)));
}

#[test]
fn test_from_json_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, r#"{{ "book": ["www.goodreads.com"] }}"#)?;

    let directory = SiteDirectory::from_json_file(temp_file.path())?;
    assert!(directory.is_listed(Category::Book, "www.goodreads.com"));
    assert!(!directory.is_listed(Category::Book, "www.booktopia.com.au"));

    Ok(())
}

#[test]
fn test_missing_file() {
    let err = SiteDirectory::from_json_file(std::path::Path::new("/nonexistent/sites.json"))
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/sites.json"));
}
